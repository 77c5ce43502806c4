//! Sentence-level units with timestamps.

const ENABLE_LOGS: bool = true;

use crate::models::{AtomicUnit, Transcript, Word};
use crate::utils::text::{clean_token, round_to, split_sentences, word_count};
use crate::{log_info, log_warn};

const TIME_PRECISION: i32 = 3;

/// A unit before its transcript-wide index is known.
struct PendingUnit {
    text: String,
    start: f64,
    end: f64,
}

impl PendingUnit {
    fn new(text: &str, start: f64, end: f64) -> Self {
        Self {
            text: text.to_string(),
            start: round_to(start, TIME_PRECISION),
            end: round_to(end, TIME_PRECISION),
        }
    }
}

fn tokens_match(token: &str, sentence_word: &str) -> bool {
    token == sentence_word || token.contains(sentence_word) || sentence_word.contains(token)
}

/// Best-effort alignment of sentences against the segment's timed words.
///
/// A cursor walks the words; each sentence claims the words that match its
/// own in order and moves the cursor past its last word only when every
/// sentence word was found. Sentences with no match take the segment
/// bounds.
fn timestamps_from_words(
    sentences: &[String],
    words: &[Word],
    seg_start: f64,
    seg_end: f64,
) -> Vec<PendingUnit> {
    let tokens: Vec<(String, f64, f64)> = words
        .iter()
        .map(|w| (clean_token(w.text.trim()), w.start, w.end))
        .filter(|(clean, _, _)| !clean.is_empty())
        .collect();
    if tokens.is_empty() {
        return timestamps_proportional(sentences, seg_start, seg_end);
    }

    let mut units = Vec::new();
    let mut cursor = 0;

    for sentence in sentences {
        let sentence_words: Vec<String> = sentence
            .split_whitespace()
            .map(clean_token)
            .filter(|w| !w.is_empty())
            .collect();
        if sentence_words.is_empty() {
            continue;
        }

        let mut start = None;
        let mut end = None;
        let mut matched = 0;
        for (i, (token, word_start, word_end)) in tokens.iter().enumerate().skip(cursor) {
            if !tokens_match(token, &sentence_words[matched]) {
                continue;
            }
            start.get_or_insert(*word_start);
            end = Some(*word_end);
            matched += 1;
            if matched == sentence_words.len() {
                cursor = i + 1;
                break;
            }
        }

        units.push(PendingUnit::new(
            sentence,
            start.unwrap_or(seg_start),
            end.unwrap_or(seg_end),
        ));
    }
    units
}

/// Split the segment span across sentences in proportion to word count.
fn timestamps_proportional(sentences: &[String], seg_start: f64, seg_end: f64) -> Vec<PendingUnit> {
    let seg_duration = (seg_end - seg_start).max(0.0);
    let counts: Vec<usize> = sentences.iter().map(|s| word_count(s)).collect();
    let total = counts.iter().sum::<usize>().max(1) as f64;

    let mut current = seg_start;
    sentences
        .iter()
        .zip(counts)
        .map(|(sentence, count)| {
            let duration = seg_duration * count as f64 / total;
            let unit = PendingUnit::new(sentence, current, current + duration);
            current += duration;
            unit
        })
        .collect()
}

/// Split every segment into sentences and give each one a time span and a
/// dense transcript-wide index.
///
/// Segments without text are skipped. Word timestamps are used when the
/// segment has them; otherwise timing is interpolated by word count.
pub fn build_atomic_units(transcript: &Transcript, default_speaker: &str) -> Vec<AtomicUnit> {
    if transcript.is_empty() {
        log_warn!("build_atomic_units: transcript has no segments");
        return Vec::new();
    }

    let mut units = Vec::new();
    for segment in &transcript.segments {
        let text = segment.text.trim();
        if text.is_empty() {
            continue;
        }

        let mut sentences = split_sentences(text);
        if sentences.is_empty() {
            sentences.push(text.to_string());
        }

        let pending = if segment.words.is_empty() {
            timestamps_proportional(&sentences, segment.start, segment.end)
        } else {
            timestamps_from_words(&sentences, &segment.words, segment.start, segment.end)
        };

        let speaker = segment.speaker.as_deref().unwrap_or(default_speaker);
        for unit in pending {
            units.push(AtomicUnit {
                index: units.len(),
                word_count: word_count(&unit.text),
                text: unit.text,
                start: unit.start,
                end: unit.end,
                speaker: speaker.to_string(),
            });
        }
    }

    log_info!(
        "build_atomic_units: {} segments → {} sentence units",
        transcript.segments.len(),
        units.len()
    );
    units
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TranscriptSegment;

    #[test]
    fn interpolates_without_word_timestamps() {
        let transcript = Transcript::new(vec![TranscriptSegment::new(
            0.0,
            10.0,
            "One two three. Four five six seven eight nine ten.",
        )]);
        let units = build_atomic_units(&transcript, "speaker_0");
        assert_eq!(units.len(), 2);
        assert_eq!((units[0].start, units[0].end), (0.0, 3.0));
        assert_eq!((units[1].start, units[1].end), (3.0, 10.0));
        assert_eq!(units[1].word_count, 7);
        assert_eq!(units[0].speaker, "speaker_0");
    }

    #[test]
    fn aligns_sentences_to_word_timestamps() {
        let mut segment = TranscriptSegment::new(0.0, 6.0, "Stop now. Listen, friend!");
        segment.words = vec![
            Word::new("Stop", 0.5, 1.0),
            Word::new("now.", 1.0, 1.8),
            Word::new("Listen,", 3.0, 3.6),
            Word::new("friend!", 3.6, 4.2),
        ];
        segment.speaker = Some("host".into());
        let units = build_atomic_units(&Transcript::new(vec![segment]), "speaker_0");
        assert_eq!((units[0].start, units[0].end), (0.5, 1.8));
        assert_eq!((units[1].start, units[1].end), (3.0, 4.2));
        assert_eq!(units[1].speaker, "host");
    }

    #[test]
    fn unmatched_sentence_falls_back_to_segment_bounds() {
        let mut segment = TranscriptSegment::new(2.0, 8.0, "Zebra quokka.");
        segment.words = vec![Word::new("hello", 2.0, 3.0)];
        let units = build_atomic_units(&Transcript::new(vec![segment]), "speaker_0");
        assert_eq!((units[0].start, units[0].end), (2.0, 8.0));
    }

    #[test]
    fn indices_are_dense_across_segments() {
        let transcript = Transcript::new(vec![
            TranscriptSegment::new(0.0, 4.0, "A first. A second."),
            TranscriptSegment::new(4.0, 5.0, "   "),
            TranscriptSegment::new(5.0, 9.0, "A third."),
        ]);
        let indices: Vec<usize> = build_atomic_units(&transcript, "s")
            .iter()
            .map(|u| u.index)
            .collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
