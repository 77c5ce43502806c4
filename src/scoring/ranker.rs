const ENABLE_LOGS: bool = true;

use crate::log_info;
use crate::models::{AudioFeatures, Candidate, ComponentScores, Platform};
use crate::scoring::calibrator::compute_composite_score;
use crate::scoring::config::ScoringConfig;

/// Attach `composite_score`, drop candidates under `threshold`, sort descending.
///
/// Candidates without audio features use neutral defaults; candidates
/// without component scores score as all zeros.
pub fn rank(
    candidates: &[Candidate],
    platform: Platform,
    threshold: f64,
    config: &ScoringConfig,
) -> Vec<Candidate> {
    let mut passing: Vec<Candidate> = candidates
        .iter()
        .map(|candidate| {
            let scores = candidate.scores.unwrap_or_default();
            let audio = candidate.audio_features.unwrap_or_default();
            let mut ranked = candidate.clone();
            ranked.composite_score = Some(composite_for(&scores, &audio, platform, config));
            ranked
        })
        .filter(|c| c.composite_score.unwrap_or(0.0) >= threshold)
        .collect();

    passing.sort_by(|a, b| {
        b.composite_score
            .unwrap_or(0.0)
            .total_cmp(&a.composite_score.unwrap_or(0.0))
    });

    log_info!(
        "rank: {}/{} candidates passed threshold {:.1}",
        passing.len(),
        candidates.len(),
        threshold
    );
    passing
}

fn composite_for(
    scores: &ComponentScores,
    audio: &AudioFeatures,
    platform: Platform,
    config: &ScoringConfig,
) -> f64 {
    compute_composite_score(scores, audio, platform, &config.platform, &config.audio)
}
