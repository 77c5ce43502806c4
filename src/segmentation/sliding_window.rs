const ENABLE_LOGS: bool = true;

use crate::models::{Candidate, CandidateKind, Transcript, TranscriptSegment, Word, WindowMetrics};
use crate::segmentation::config::SegmentationConfig;
use crate::segmentation::open_loop::close_open_loops;
use crate::utils::text::{is_terminal, word_count};
use crate::{log_info, log_warn};

/// Length of the opening stretch used for `opening_pace_wps`.
const OPENING_SECS: f64 = 5.0;

/// Openings slower than this many words per second are flagged `slow_start`.
const SLOW_START_WPS: f64 = 2.0;

/// Fraction of `min_duration_secs` a snapped window must keep.
const MIN_SNAPPED_FRACTION: f64 = 0.8;

fn pace(text: &str, start: f64, end: f64) -> f64 {
    let duration = end - start;
    if duration <= 0.0 {
        return 0.0;
    }
    word_count(text) as f64 / duration
}

/// Start of the last word that begins at or before `t`, else the first word.
fn snap_backward(words: &[Word], t: f64) -> f64 {
    words
        .iter()
        .rev()
        .find(|w| w.start <= t)
        .or_else(|| words.first())
        .map_or(t, |w| w.start)
}

/// End of the first word that ends at or after `t`, else the last word.
fn snap_forward(words: &[Word], t: f64) -> f64 {
    words
        .iter()
        .find(|w| w.end >= t)
        .or_else(|| words.last())
        .map_or(t, |w| w.end)
}

/// Trim leading text up to the first sentence-initial capital and trailing
/// text past the last terminal mark when that mark sits in the second half.
fn snap_text_boundaries(text: &str) -> String {
    let mut snapped = text;

    let mut prev: [Option<char>; 2] = [None, None];
    for (i, c) in text.char_indices() {
        let sentence_start = match prev {
            [None, None] => true,
            [Some(p), Some(ws)] => is_terminal(p) && ws.is_whitespace(),
            _ => false,
        };
        if c.is_ascii_uppercase() && sentence_start {
            snapped = &text[i..];
            break;
        }
        prev = [prev[1], Some(c)];
    }

    if let Some(last_terminal) = snapped.rfind(is_terminal) {
        // midpoint in characters, not bytes
        let terminal_char = snapped[..last_terminal].chars().count();
        if terminal_char > snapped.chars().count() / 2 {
            snapped = &snapped[..=last_terminal];
        }
    }
    snapped.trim().to_string()
}

/// 1.0 when the text opens with a capital and closes with `.`, `!` or `?`.
pub fn boundary_quality(text: &str) -> f64 {
    let stripped = text.trim();
    let starts_ok = stripped.chars().next().is_some_and(|c| c.is_uppercase());
    let ends_ok = stripped.chars().last().is_some_and(is_terminal);
    if starts_ok && ends_ok {
        1.0
    } else {
        0.5
    }
}

fn build_window(
    segments: &[TranscriptSegment],
    words: &[Word],
    window_start: f64,
    window_end: f64,
    config: &SegmentationConfig,
) -> Option<Candidate> {
    let covered: Vec<&TranscriptSegment> = segments
        .iter()
        .filter(|s| s.start < window_end && s.end > window_start)
        .collect();
    let (first, last) = (covered.first()?, covered.last()?);

    let mut start = window_start.max(first.start);
    let mut end = window_end.min(last.end);
    if !words.is_empty() {
        start = snap_backward(words, start);
        end = snap_forward(words, end);
    }
    if end - start < config.min_duration_secs * MIN_SNAPPED_FRACTION {
        return None;
    }

    let text = covered
        .iter()
        .map(|s| s.text.trim())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();
    if text.is_empty() {
        return None;
    }
    let snapped_text = snap_text_boundaries(&text);

    let overall_pace = pace(&text, start, end);
    let opening_words = words
        .iter()
        .filter(|w| start <= w.start && w.start < start + OPENING_SECS)
        .count();
    let opening_pace = if opening_words > 0 {
        opening_words as f64 / OPENING_SECS
    } else {
        overall_pace
    };

    let mut candidate = Candidate::new(
        String::new(),
        CandidateKind::SlidingWindow,
        start,
        end,
        snapped_text,
    );
    candidate.segment_count = Some(covered.len());
    candidate.words = words
        .iter()
        .filter(|w| w.start >= start && w.end <= end)
        .cloned()
        .collect();
    candidate.window = Some(WindowMetrics {
        boundary_quality: boundary_quality(&candidate.text),
        pace_wps: overall_pace,
        opening_pace_wps: opening_pace,
        slow_start: opening_pace < SLOW_START_WPS,
    });
    Some(candidate)
}

/// Slide variable-length windows across the whole transcript.
///
/// Segments are first merged across open loops. At each start position
/// (every `step_secs`) every length from `min_duration_secs` to
/// `max_duration_secs` (also in `step_secs` increments) is tried, clamped
/// to the covered segments and snapped outward to word boundaries when
/// word timestamps exist.
pub fn build_sliding_windows(transcript: &Transcript, config: &SegmentationConfig) -> Vec<Candidate> {
    if transcript.is_empty() {
        log_warn!("build_sliding_windows: no segments in transcript");
        return Vec::new();
    }
    if config.step_secs <= 0.0 {
        log_warn!("build_sliding_windows: non-positive step {}", config.step_secs);
        return Vec::new();
    }

    let segments = close_open_loops(&transcript.segments, config.max_merged_duration_secs);
    let words: Vec<Word> = segments.iter().flat_map(|s| s.words.iter().cloned()).collect();
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return Vec::new();
    };
    let (total_start, total_end) = (first.start, last.end);

    let mut candidates = Vec::new();
    let mut position = 0usize;
    loop {
        let window_start = total_start + position as f64 * config.step_secs;
        if window_start >= total_end - config.min_duration_secs {
            break;
        }
        position += 1;

        let mut length = 0usize;
        loop {
            let window_end =
                window_start + config.min_duration_secs + length as f64 * config.step_secs;
            if window_end > window_start + config.max_duration_secs || window_end > total_end {
                break;
            }
            length += 1;

            if let Some(mut candidate) =
                build_window(&segments, &words, window_start, window_end, config)
            {
                candidate.id = format!("win-{}", candidates.len());
                candidates.push(candidate);
            }
        }
    }

    log_info!("build_sliding_windows: generated {} raw candidates", candidates.len());
    candidates
}

/// Collapse windows that overlap more than `dedup_overlap_threshold` of the
/// shorter one, keeping the better `boundary_quality` (then the longer).
pub fn deduplicate_windows(candidates: &[Candidate], config: &SegmentationConfig) -> Vec<Candidate> {
    let quality = |c: &Candidate| c.window.map_or(0.0, |w| w.boundary_quality);

    let mut ordered: Vec<&Candidate> = candidates.iter().collect();
    ordered.sort_by(|a, b| {
        quality(b)
            .total_cmp(&quality(a))
            .then(b.duration.total_cmp(&a.duration))
    });

    let mut kept: Vec<Candidate> = Vec::new();
    for candidate in ordered {
        let duplicate = kept.iter().any(|k| {
            let shorter = candidate.duration.min(k.duration);
            let shorter = if shorter > 0.0 { shorter } else { 1.0 };
            candidate.overlap_secs(k) / shorter > config.dedup_overlap_threshold
        });
        if !duplicate {
            kept.push(candidate.clone());
        }
    }

    log_info!(
        "deduplicate_windows: {} → {} after deduplication",
        candidates.len(),
        kept.len()
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_segment_transcript() -> Transcript {
        let segments = (0..10)
            .map(|i| {
                let start = i as f64 * 10.0;
                TranscriptSegment::new(
                    start,
                    start + 10.0,
                    format!("Sentence number {i} says something useful."),
                )
            })
            .collect();
        Transcript::new(segments)
    }

    #[test]
    fn text_snapping_trims_partial_sentences() {
        assert_eq!(
            snap_text_boundaries("of the deal. Then it broke. And we lost it all. but"),
            "Then it broke. And we lost it all."
        );
        assert_eq!(snap_text_boundaries("Clean sentence."), "Clean sentence.");
    }

    #[test]
    fn accented_text_keeps_a_tail_past_the_midpoint() {
        // the full stop sits past the byte midpoint but before the character one
        let text = "Crème brûlée à côté, déjà été. and then we all went home together";
        assert_eq!(snap_text_boundaries(text), text);
        assert_eq!(
            snap_text_boundaries("Déjà vu again. and so on"),
            "Déjà vu again."
        );
    }

    #[test]
    fn boundary_quality_is_binary() {
        assert_eq!(boundary_quality("Then it broke."), 1.0);
        assert_eq!(boundary_quality("then it broke."), 0.5);
        assert_eq!(boundary_quality("Then it broke"), 0.5);
        assert_eq!(boundary_quality(""), 0.5);
    }

    #[test]
    fn windows_stay_within_length_bounds() {
        let config = SegmentationConfig {
            step_secs: 5.0,
            ..SegmentationConfig::default()
        };
        let windows = build_sliding_windows(&ten_segment_transcript(), &config);
        assert!(!windows.is_empty());
        for window in &windows {
            assert!(window.duration >= 20.0 && window.duration <= 55.0);
            assert_eq!(window.kind, CandidateKind::SlidingWindow);
        }
    }

    #[test]
    fn word_timestamps_snap_outward() {
        let mut segment = TranscriptSegment::new(0.0, 30.0, "Everything changed that day.");
        segment.words = vec![
            Word::new("Everything", 0.4, 1.0),
            Word::new("changed", 1.1, 1.5),
            Word::new("that", 12.0, 12.3),
            Word::new("day.", 29.0, 29.6),
        ];
        let config = SegmentationConfig {
            min_duration_secs: 20.0,
            max_duration_secs: 20.0,
            ..SegmentationConfig::default()
        };
        let windows = build_sliding_windows(&Transcript::new(vec![segment]), &config);
        let first = &windows[0];
        assert_eq!(first.start, 0.4);
        assert_eq!(first.end, 29.6);
        let metrics = first.window.unwrap();
        assert_eq!(metrics.opening_pace_wps, 2.0 / 5.0);
        assert!(metrics.slow_start);
    }

    #[test]
    fn dedup_prefers_clean_boundaries() {
        let mut rough = Candidate::new("a", CandidateKind::SlidingWindow, 0.0, 30.0, "rough");
        rough.window = Some(WindowMetrics {
            boundary_quality: 0.5,
            pace_wps: 2.0,
            opening_pace_wps: 2.0,
            slow_start: false,
        });
        let mut clean = rough.clone();
        clean.id = "b".into();
        clean.start = 2.0;
        clean.duration = 28.0;
        clean.window = Some(WindowMetrics {
            boundary_quality: 1.0,
            ..rough.window.unwrap()
        });
        let distinct = Candidate::new("c", CandidateKind::SlidingWindow, 40.0, 60.0, "far");

        let kept = deduplicate_windows(&[rough, clean, distinct], &SegmentationConfig::default());
        let ids: Vec<&str> = kept.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }
}
