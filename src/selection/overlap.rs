const ENABLE_LOGS: bool = true;

use crate::models::{Candidate, ScoreKey};
use crate::selection::config::OverlapConfig;
use crate::utils::text::jaccard;
use crate::{log_debug, log_info};

/// Drop clips that repeat a better clip, by time or by content.
///
/// Clips are visited by score descending. A clip is dropped when it shares
/// more than `max_overlap_secs` with a kept clip, or when the token-set
/// Jaccard similarity of their texts reaches `content_similarity`. Kept
/// clips come back in start order.
pub fn remove_overlapping_clips(
    clips: &[Candidate],
    score_key: ScoreKey,
    config: &OverlapConfig,
) -> Vec<Candidate> {
    let mut ordered: Vec<&Candidate> = clips.iter().collect();
    ordered.sort_by(|a, b| b.score(score_key).total_cmp(&a.score(score_key)));

    let mut kept: Vec<Candidate> = Vec::new();
    for clip in ordered {
        let duplicate_of = kept.iter().find(|k| {
            if clip.overlap_secs(k) > config.max_overlap_secs {
                return true;
            }
            !clip.text.is_empty()
                && !k.text.is_empty()
                && jaccard(&clip.text, &k.text) >= config.content_similarity
        });
        match duplicate_of {
            Some(k) => log_debug!(
                "remove_overlapping_clips: {} ({:.1}-{:.1}s) duplicates {}",
                clip.id,
                clip.start,
                clip.end,
                k.id
            ),
            None => kept.push(clip.clone()),
        }
    }

    kept.sort_by(|a, b| a.start.total_cmp(&b.start));
    log_info!(
        "remove_overlapping_clips: {} → {} non-overlapping clips",
        clips.len(),
        kept.len()
    );
    kept
}
