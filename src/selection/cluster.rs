//! Grouping of temporally adjacent micro candidates into macro clips.

const ENABLE_LOGS: bool = true;

use crate::models::{Candidate, CandidateKind, ScoreKey, Word};
use crate::selection::config::ClusterConfig;
use crate::utils::text::round_to;
use crate::{log_debug, log_info};

/// Forward scan over members sorted by start.
///
/// Only a strong member seeds a cluster. The cluster then grows while the
/// next member touches the previous one (within `gap_secs`), keeps the span
/// within `max_duration_secs`, and is strong. With `allow_one_weak`, a
/// member at or above `weak_threshold` is admitted when the member after it
/// is strong and also fits. The next cluster starts where the last one
/// stopped, so a long run becomes consecutive capped clusters.
fn scan_clusters<'a>(
    candidates: &'a [Candidate],
    score_key: ScoreKey,
    config: &ClusterConfig,
) -> Vec<Vec<&'a Candidate>> {
    let mut sorted: Vec<&Candidate> = candidates.iter().collect();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));
    let strong = |c: &Candidate| c.score(score_key) >= config.strong_threshold;
    let touches = |prev: &Candidate, next: &Candidate| next.start <= prev.end + config.gap_secs;

    let mut clusters: Vec<Vec<&Candidate>> = Vec::new();
    let mut i = 0;
    while i < sorted.len() {
        let seed = sorted[i];
        if !strong(seed) {
            i += 1;
            continue;
        }

        let cluster_start = seed.start;
        let fits = |c: &Candidate| c.end - cluster_start <= config.max_duration_secs;
        let mut cluster = vec![seed];
        let mut j = i + 1;
        while j < sorted.len() {
            let (prev, next) = (cluster[cluster.len() - 1], sorted[j]);
            if !fits(next) || !touches(prev, next) {
                break;
            }
            if strong(next) {
                cluster.push(next);
                j += 1;
                continue;
            }
            let bridged = config.allow_one_weak
                && next.score(score_key) >= config.weak_threshold
                && sorted
                    .get(j + 1)
                    .is_some_and(|&after| strong(after) && fits(after) && touches(next, after));
            if !bridged {
                break;
            }
            cluster.push(next);
            j += 1;
        }

        clusters.push(cluster);
        i = j;
    }
    clusters
}

fn span(members: &[&Candidate]) -> (f64, f64) {
    let start = members.iter().map(|m| m.start).fold(f64::INFINITY, f64::min);
    let end = members.iter().map(|m| m.end).fold(f64::NEG_INFINITY, f64::max);
    (start, end)
}

/// Union of member words, deduplicated across overlapping windows.
fn merged_words(members: &[&Candidate], start: f64, end: f64) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();
    for member in members {
        for word in &member.words {
            if word.start < start || word.end > end {
                continue;
            }
            if !words.iter().any(|w| w.start == word.start && w.text == word.text) {
                words.push(word.clone());
            }
        }
    }
    words.sort_by(|a, b| a.start.total_cmp(&b.start));
    words
}

/// Merge micro candidates into macro candidates.
///
/// Each macro spans its members' earliest start to latest end, keeps the
/// members in `micro_segments`, and carries the best and mean member score
/// read through `score_key`. A lone member longer than `max_duration_secs`
/// keeps its end and moves its start forward. Clusters shorter than
/// `min_duration_secs` are dropped. Output is sorted by best member score.
pub fn merge_clusters(
    candidates: &[Candidate],
    score_key: ScoreKey,
    config: &ClusterConfig,
) -> Vec<Candidate> {
    let mut macros = Vec::new();

    for (idx, members) in scan_clusters(candidates, score_key, config).into_iter().enumerate() {
        let (mut start, end) = span(&members);
        if end - start > config.max_duration_secs {
            start = end - config.max_duration_secs;
        }
        let duration = round_to(end - start, 4);
        if duration < config.min_duration_secs {
            log_debug!(
                "merge_clusters: cluster {} too short ({:.1}s < {:.1}s), dropped",
                idx + 1,
                duration,
                config.min_duration_secs
            );
            continue;
        }

        let words = merged_words(&members, start, end);
        let text = if words.is_empty() {
            members
                .iter()
                .map(|m| m.text.trim())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            words
                .iter()
                .map(|w| w.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        };

        let scores: Vec<f64> = members.iter().map(|m| m.score(score_key)).collect();
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let average = scores.iter().sum::<f64>() / scores.len() as f64;

        let mut macro_clip = Candidate::new(
            format!("macro-{}", idx + 1),
            CandidateKind::Macro,
            start,
            end,
            text,
        );
        macro_clip.duration = duration;
        macro_clip.words = words;
        macro_clip.segment_count = Some(members.len());
        macro_clip.best_micro_score = Some(best);
        macro_clip.avg_micro_score = Some(round_to(average, 4));
        macro_clip.micro_segments = members.into_iter().cloned().collect();
        macros.push(macro_clip);
    }

    macros.sort_by(|a, b| {
        b.best_micro_score
            .unwrap_or(0.0)
            .total_cmp(&a.best_micro_score.unwrap_or(0.0))
    });

    log_info!(
        "merge_clusters: {} micro candidates → {} macro candidates",
        candidates.len(),
        macros.len()
    );
    macros
}

#[cfg(test)]
mod tests {
    use super::*;

    fn micro(id: usize, start: f64, end: f64, score: f64) -> Candidate {
        let mut candidate = Candidate::new(
            format!("micro-{id}"),
            CandidateKind::Micro,
            start,
            end,
            format!("part {id}"),
        );
        candidate.segment_id = Some(id);
        candidate.composite_score = Some(score);
        candidate
    }

    #[test]
    fn adjacent_micros_become_one_macro() {
        let micros = vec![
            micro(2, 5.0, 10.0, 7.0),
            micro(1, 0.0, 5.0, 6.5),
            micro(3, 10.02, 15.0, 6.0),
            micro(4, 40.0, 45.0, 9.0),
        ];
        let macros = merge_clusters(&micros, ScoreKey::Composite, &ClusterConfig::default());
        assert_eq!(macros.len(), 1);
        let clip = &macros[0];
        assert_eq!((clip.start, clip.end), (0.0, 15.0));
        assert_eq!(clip.text, "part 1 part 2 part 3");
        assert_eq!(clip.best_micro_score, Some(7.0));
        assert_eq!(clip.avg_micro_score, Some(6.5));
        assert_eq!(clip.micro_segments.len(), 3);
    }

    #[test]
    fn long_run_splits_into_capped_macros() {
        // 5 s windows every 2.5 s across five minutes
        let micros: Vec<Candidate> = (0..119)
            .map(|i| micro(i + 1, i as f64 * 2.5, i as f64 * 2.5 + 5.0, 7.0))
            .collect();
        let mut macros = merge_clusters(&micros, ScoreKey::Composite, &ClusterConfig::default());
        macros.sort_by(|a, b| a.start.total_cmp(&b.start));

        assert_eq!(macros.len(), 6);
        assert_eq!((macros[0].start, macros[0].end), (0.0, 60.0));
        assert_eq!(macros[1].start, 57.5);
        for clip in &macros {
            assert!(clip.duration <= 60.0);
            assert!(clip.duration >= 10.0);
        }
        assert_eq!(macros[5].end, 300.0);
    }

    #[test]
    fn one_weak_member_bridges_two_strong_ones() {
        let micros = vec![
            micro(1, 0.0, 5.0, 7.0),
            micro(2, 5.0, 10.0, 5.5),
            micro(3, 10.0, 15.0, 7.0),
        ];
        let macros = merge_clusters(&micros, ScoreKey::Composite, &ClusterConfig::default());
        assert_eq!(macros.len(), 1);
        assert_eq!(macros[0].micro_segments.len(), 3);

        let strict = ClusterConfig {
            allow_one_weak: false,
            ..ClusterConfig::default()
        };
        // the strong halves are 5 s each, below the 10 s minimum
        assert!(merge_clusters(&micros, ScoreKey::Composite, &strict).is_empty());
    }

    #[test]
    fn trailing_weak_member_is_left_out() {
        let micros = vec![
            micro(1, 0.0, 5.0, 7.0),
            micro(2, 5.0, 10.0, 7.0),
            micro(3, 10.0, 15.0, 5.5),
            micro(4, 15.0, 20.0, 5.5),
        ];
        let macros = merge_clusters(&micros, ScoreKey::Composite, &ClusterConfig::default());
        assert_eq!(macros.len(), 1);
        assert_eq!((macros[0].start, macros[0].end), (0.0, 10.0));
    }

    #[test]
    fn weak_only_run_builds_nothing() {
        let micros: Vec<Candidate> = (0..6)
            .map(|i| micro(i + 1, i as f64 * 5.0, i as f64 * 5.0 + 5.0, 4.6))
            .collect();
        assert!(merge_clusters(&micros, ScoreKey::Composite, &ClusterConfig::default()).is_empty());
    }

    #[test]
    fn lone_oversized_member_keeps_its_end() {
        let macros = merge_clusters(
            &[micro(1, 0.0, 90.0, 6.0)],
            ScoreKey::Composite,
            &ClusterConfig::default(),
        );
        assert_eq!((macros[0].start, macros[0].end), (30.0, 90.0));
    }

    #[test]
    fn overlapping_windows_do_not_repeat_words() {
        let mut a = micro(1, 0.0, 6.0, 6.0);
        a.words = vec![Word::new("one", 0.0, 3.0), Word::new("two", 3.0, 6.0)];
        let mut b = micro(2, 3.0, 12.0, 6.0);
        b.words = vec![Word::new("two", 3.0, 6.0), Word::new("three", 6.0, 12.0)];
        let macros = merge_clusters(&[a, b], ScoreKey::Composite, &ClusterConfig::default());
        assert_eq!(macros[0].text, "one two three");
    }
}
