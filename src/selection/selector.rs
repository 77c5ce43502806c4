const ENABLE_LOGS: bool = true;

use crate::log_info;
use crate::models::{Candidate, ScoreKey};
use crate::selection::config::SelectionConfig;

/// Nearest-rank percentile: the value at `floor(pct · (n − 1))` of the
/// ascending sort. 0.0 for no scores.
pub fn percentile_value(scores: &[f64], pct: f64) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    let mut sorted = scores.to_vec();
    sorted.sort_by(f64::total_cmp);
    let idx = ((pct * (sorted.len() - 1) as f64) as usize).min(sorted.len() - 1);
    sorted[idx]
}

fn by_score_desc(key: ScoreKey) -> impl Fn(&Candidate, &Candidate) -> std::cmp::Ordering {
    move |a, b| b.score(key).total_cmp(&a.score(key))
}

/// Pick the final clips for one source video.
///
/// Keeps candidates at or above both the percentile value and the floor,
/// capped at `max_clips`. When fewer than `min_clips` survive, the best
/// remaining candidates are added regardless of floor and flagged
/// `low_confidence`. The floor is given on the 0–10 scale and rescaled for
/// keys that live on 0–100.
pub fn select_clips(
    candidates: &[Candidate],
    score_key: ScoreKey,
    config: &SelectionConfig,
) -> Vec<Candidate> {
    if candidates.is_empty() {
        return Vec::new();
    }

    let floor = config.floor * score_key.floor_scale();
    let scores: Vec<f64> = candidates.iter().map(|c| c.score(score_key)).collect();
    let threshold = percentile_value(&scores, config.percentile);

    let mut ranked: Vec<(usize, &Candidate)> = candidates.iter().enumerate().collect();
    ranked.sort_by(|(_, a), (_, b)| by_score_desc(score_key)(*a, *b));

    let mut picked: Vec<usize> = ranked
        .iter()
        .filter(|(_, c)| c.score(score_key) >= threshold && c.score(score_key) >= floor)
        .map(|(i, _)| *i)
        .take(config.max_clips)
        .collect();
    let qualified = picked.len();

    for (i, _) in &ranked {
        if picked.len() >= config.min_clips {
            break;
        }
        if !picked.contains(i) {
            picked.push(*i);
        }
    }

    let mut selected: Vec<Candidate> = picked
        .iter()
        .enumerate()
        .map(|(rank, &i)| {
            let mut chosen = candidates[i].clone();
            chosen.low_confidence = rank >= qualified || chosen.score(score_key) < floor;
            chosen
        })
        .collect();
    selected.sort_by(by_score_desc(score_key));

    log_info!(
        "select_clips: {}/{} selected (threshold={:.2}, floor={:.1})",
        selected.len(),
        candidates.len(),
        threshold,
        floor
    );
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CandidateKind;

    fn with_blended(scores: &[f64]) -> Vec<Candidate> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                let mut c = Candidate::new(format!("macro-{i}"), CandidateKind::Macro, 0.0, 20.0, "");
                c.blended_score = Some(s);
                c
            })
            .collect()
    }

    #[test]
    fn nearest_rank_percentile() {
        let scores: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(percentile_value(&scores, 0.85), 8.0);
        assert_eq!(percentile_value(&[3.0], 0.85), 3.0);
        assert_eq!(percentile_value(&[], 0.85), 0.0);
    }

    #[test]
    fn keeps_top_percentile_above_floor() {
        let candidates = with_blended(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);
        let selected = select_clips(&candidates, ScoreKey::Blended, &SelectionConfig::default());
        let scores: Vec<f64> = selected.iter().map(|c| c.score(ScoreKey::Blended)).collect();
        assert_eq!(scores, vec![10.0, 9.0, 8.0]);
        assert!(selected.iter().all(|c| !c.low_confidence));
    }

    #[test]
    fn backfills_to_minimum_with_low_confidence() {
        let candidates = with_blended(&[1.0, 3.0, 2.0]);
        let selected = select_clips(&candidates, ScoreKey::Blended, &SelectionConfig::default());
        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0].score(ScoreKey::Blended), 3.0);
        assert!(selected.iter().all(|c| c.low_confidence));
    }

    #[test]
    fn caps_at_maximum() {
        let candidates = with_blended(&[9.0; 12]);
        let selected = select_clips(&candidates, ScoreKey::Blended, &SelectionConfig::default());
        assert_eq!(selected.len(), 5);
    }

    #[test]
    fn final_scores_use_the_hundred_point_floor() {
        let mut candidates = with_blended(&[]);
        for (i, score) in [40.0, 44.0, 80.0].into_iter().enumerate() {
            let mut c = Candidate::new(format!("win-{i}"), CandidateKind::SlidingWindow, 0.0, 30.0, "");
            c.final_score = Some(score);
            candidates.push(c);
        }
        let selected = select_clips(&candidates, ScoreKey::Final, &SelectionConfig::default());
        assert_eq!(selected.len(), 2);
        assert!(!selected[0].low_confidence);
        assert!(selected[1].low_confidence);
    }
}
