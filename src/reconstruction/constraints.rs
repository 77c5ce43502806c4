//! Duration, opening-hook and coherence filters over assembled clips.

const ENABLE_LOGS: bool = true;

use std::collections::{HashMap, HashSet};

use crate::models::{Candidate, ScoredUnit};
use crate::reconstruction::config::ReconstructionConfig;
use crate::utils::text::{round_to, token_set};
use crate::{log_debug, log_info, log_warn};

/// Brings 0–10 boundary scores down to roughly 0–0.25.
const BOUNDARY_WEIGHT: f64 = 0.025;
/// Brings 0–1 coherence up to the pattern-score range.
const COHERENCE_SCALE: f64 = 5.0;
const PATTERN_WEIGHT: f64 = 0.40;

/// Hook score a clip's first unit must reach: the score at the top
/// `fraction` rank across every unit in the transcript.
pub fn hook_cutoff(units: &[ScoredUnit], fraction: f64) -> f64 {
    let mut scores: Vec<f64> = units.iter().map(|u| u.scores.hook_score).collect();
    if scores.is_empty() {
        return 0.0;
    }
    scores.sort_by(|a, b| b.total_cmp(a));
    let rank = ((scores.len() as f64 * fraction) as usize).saturating_sub(1);
    scores[rank.min(scores.len() - 1)]
}

/// Speaker agreement blended with vocabulary overlap, in `[0, 1]`.
///
/// One shared speaker gives 0.5, mixed speakers 0.2. Half of the token-set
/// Jaccard similarity across all member sentences is added; a single unit
/// counts as 0.5 similarity.
pub fn coherence_score(members: &[&ScoredUnit]) -> f64 {
    if members.is_empty() {
        return 0.0;
    }
    let speakers: HashSet<&str> = members.iter().map(|u| u.unit.speaker.as_str()).collect();
    let speaker_bonus = if speakers.len() == 1 { 0.5 } else { 0.2 };

    let similarity = if members.len() >= 2 {
        let sets: Vec<HashSet<String>> = members.iter().map(|u| token_set(&u.unit.text)).collect();
        let union: HashSet<&String> = sets.iter().flatten().collect();
        let shared = sets[0]
            .iter()
            .filter(|token| sets[1..].iter().all(|set| set.contains(*token)))
            .count();
        shared as f64 / union.len().max(1) as f64
    } else {
        0.5
    };

    (speaker_bonus + similarity * 0.5).min(1.0)
}

/// Keep clips that fit the duration window, open on a top-tier hook and
/// hang together, then rank them by a composite of pattern score,
/// boundary scores and coherence.
///
/// The closing unit's delivery intensity feeds the ranking but never
/// rejects a clip on its own.
pub fn apply_constraints(
    candidates: &[Candidate],
    units: &[ScoredUnit],
    config: &ReconstructionConfig,
) -> Vec<Candidate> {
    if candidates.is_empty() || units.is_empty() {
        log_warn!("apply_constraints: empty input");
        return Vec::new();
    }

    let by_index: HashMap<usize, &ScoredUnit> = units.iter().map(|u| (u.index(), u)).collect();
    let threshold = hook_cutoff(units, config.hook_top_fraction);

    let mut passed: Vec<Candidate> = Vec::new();
    for candidate in candidates {
        if candidate.duration < config.min_duration_secs
            || candidate.duration > config.max_duration_secs
        {
            continue;
        }

        let members: Vec<&ScoredUnit> = candidate
            .unit_indices
            .iter()
            .filter_map(|i| by_index.get(i).copied())
            .collect();
        let first_hook = candidate
            .unit_indices
            .iter()
            .min()
            .and_then(|i| by_index.get(i))
            .map(|u| u.scores.hook_score)
            .unwrap_or(0.0);
        if first_hook < threshold {
            continue;
        }
        let last_impact = candidate
            .unit_indices
            .iter()
            .max()
            .and_then(|i| by_index.get(i))
            .map(|u| u.scores.delivery_intensity)
            .unwrap_or(0.0);

        let coherence = coherence_score(&members);
        if coherence < config.coherence_threshold {
            log_debug!(
                "apply_constraints: {} incoherent ({:.2} < {:.2})",
                candidate.id,
                coherence,
                config.coherence_threshold
            );
            continue;
        }

        let Some(mut meta) = candidate.reconstruction else {
            continue;
        };
        meta.hook_score_first = Some(round_to(first_hook, 3));
        meta.impact_score_last = Some(round_to(last_impact, 3));
        meta.coherence = Some(round_to(coherence, 3));
        meta.constraint_score = Some(round_to(
            meta.pattern_score * PATTERN_WEIGHT
                + first_hook * BOUNDARY_WEIGHT
                + last_impact * BOUNDARY_WEIGHT
                + coherence * COHERENCE_SCALE,
            4,
        ));

        let mut kept = candidate.clone();
        kept.reconstruction = Some(meta);
        passed.push(kept);
    }

    passed.sort_by(|a, b| constraint_score(b).total_cmp(&constraint_score(a)));
    passed.truncate(config.target_max_candidates);

    log_info!(
        "apply_constraints: {} → {} candidates (duration {:.0}-{:.0}s, hook ≥ {:.2}, coherence ≥ {:.2})",
        candidates.len(),
        passed.len(),
        config.min_duration_secs,
        config.max_duration_secs,
        threshold,
        config.coherence_threshold
    );
    passed
}

fn constraint_score(candidate: &Candidate) -> f64 {
    candidate
        .reconstruction
        .and_then(|meta| meta.constraint_score)
        .unwrap_or(0.0)
}
