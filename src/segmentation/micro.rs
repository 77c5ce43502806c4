const ENABLE_LOGS: bool = true;

use crate::log_info;
use crate::models::{Candidate, CandidateKind, Word};
use crate::segmentation::config::SegmentationConfig;
use crate::utils::text::round_to;

/// Overlapping fixed-length windows over the word stream.
///
/// Windows start at t=0 and advance by `micro_hop_secs`; a window takes
/// every word whose start lies in `[window_start, window_start + window)`.
/// Windows with fewer than `micro_min_words` words are skipped. Bounds are
/// the first word's start and last word's end, not the requested window.
pub fn micro_segment(words: &[Word], config: &SegmentationConfig) -> Vec<Candidate> {
    let Some(last) = words.last() else {
        return Vec::new();
    };
    let total = last.end;
    if total <= 0.0 || config.micro_hop_secs <= 0.0 {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut step = 0usize;
    loop {
        let window_start = step as f64 * config.micro_hop_secs;
        if window_start >= total {
            break;
        }
        let window_end = window_start + config.micro_window_secs;
        step += 1;

        let inside: Vec<Word> = words
            .iter()
            .filter(|w| w.start >= window_start && w.start < window_end)
            .cloned()
            .collect();
        if inside.len() < config.micro_min_words {
            continue;
        }

        let segment_id = segments.len() + 1;
        let start = inside[0].start;
        let end = inside[inside.len() - 1].end;
        let text = inside
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let mut candidate = Candidate::new(
            format!("micro-{segment_id}"),
            CandidateKind::Micro,
            start,
            end,
            text,
        );
        candidate.duration = round_to(end - start, 4);
        candidate.segment_id = Some(segment_id);
        candidate.words = inside;
        segments.push(candidate);
    }

    log_info!("micro_segment: {} words → {} micro-segments", words.len(), segments.len());
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steady_words(count: usize, spacing: f64) -> Vec<Word> {
        (0..count)
            .map(|i| {
                let start = i as f64 * spacing;
                Word::new(format!("w{i}"), start, start + spacing * 0.8)
            })
            .collect()
    }

    #[test]
    fn windows_overlap_and_number_from_one() {
        let words = steady_words(20, 1.0);
        let segments = micro_segment(&words, &SegmentationConfig::default());
        assert!(!segments.is_empty());
        assert_eq!(segments[0].segment_id, Some(1));
        assert_eq!(segments[0].id, "micro-1");
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].words.len(), 5);
        assert_eq!(segments[1].start, 3.0);
        for pair in segments.windows(2) {
            assert_eq!(pair[1].segment_id.unwrap(), pair[0].segment_id.unwrap() + 1);
        }
    }

    #[test]
    fn sparse_windows_are_skipped() {
        let words = vec![
            Word::new("one", 0.0, 0.5),
            Word::new("two", 0.6, 1.0),
            Word::new("three", 30.0, 30.5),
        ];
        let segments = micro_segment(&words, &SegmentationConfig::default());
        assert!(segments.is_empty());
    }

    #[test]
    fn empty_words_yield_nothing() {
        assert!(micro_segment(&[], &SegmentationConfig::default()).is_empty());
    }
}
