//! Open-loop detection at segment boundaries.
//!
//! An open loop is a segment that ends mid-thought: a trailing connector,
//! a setup phrase whose payoff lives in the next segment, an unfinished
//! list or a question left hanging. Cutting a clip there leaves the setup
//! without its payoff, so such segments are merged forward.

const ENABLE_LOGS: bool = true;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::log_debug;
use crate::models::TranscriptSegment;
use crate::utils::text::{alpha_tokens, ends_with_terminal, first_word, is_terminal, last_word};

const TRAILING_CONNECTORS: [&str; 15] = [
    "and", "but", "so", "because", "which", "that", "however", "or", "then", "when", "while",
    "if", "before", "after", "although",
];

const SETUP_PHRASES: [&str; 11] = [
    "i was about to",
    "here's what happened",
    "the thing is",
    "you won't believe",
    "and then",
    "here's the deal",
    "what happened was",
    "let me tell you",
    "guess what",
    "the reason is",
    "what i found was",
];

const COMPLETION_MARKERS: [&str; 4] = ["right", "okay", "exactly", "anyway"];

const CONTINUATION_OPENERS: [&str; 13] = [
    "and", "but", "so", "because", "which", "that", "however", "or", "also", "plus",
    "furthermore", "additionally", "moreover",
];

/// A question answered within this many words is not a real curiosity gap.
const IMMEDIATE_ANSWER_WORDS: usize = 5;

static LIST_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(first|number one)\b").unwrap());
static LIST_CONTINUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(second|third|number two|number three|also|additionally)\b").unwrap()
});

/// Whether `text` ends with an unresolved thought.
pub fn has_open_loop(text: &str) -> bool {
    let stripped = text.trim();
    if stripped.is_empty() {
        return false;
    }

    // No terminal punctuation at all reads as an unfinished sentence
    if !ends_with_terminal(stripped) {
        return true;
    }

    let lower = stripped.to_lowercase();

    if let Some(last) = alpha_tokens(&lower).last() {
        if TRAILING_CONNECTORS.contains(&last.as_str()) {
            return true;
        }
    }

    let without_terminal = lower.trim_end_matches(is_terminal);
    if SETUP_PHRASES
        .iter()
        .any(|phrase| without_terminal.ends_with(phrase))
    {
        return true;
    }

    if LIST_START.is_match(&lower) && !LIST_CONTINUATION.is_match(&lower) {
        return true;
    }

    // The final run of terminal punctuation decides whether we end on a question
    let trailing: String = stripped
        .chars()
        .rev()
        .take_while(|c| is_terminal(*c))
        .collect();
    trailing.contains('?')
}

/// Whether `text` opens with a word that continues an earlier thought.
pub fn has_bad_opening(text: &str) -> bool {
    first_word(text)
        .map(|word| CONTINUATION_OPENERS.contains(&word.as_str()))
        .unwrap_or(false)
}

fn ends_with_completion(text: &str) -> bool {
    let stripped = text.trim();
    if stripped.is_empty() || ends_with_terminal(stripped) {
        return true;
    }
    last_word(stripped)
        .map(|word| COMPLETION_MARKERS.contains(&word.as_str()))
        .unwrap_or(false)
}

fn merge_pair(current: &TranscriptSegment, next: &TranscriptSegment) -> TranscriptSegment {
    let mut words = current.words.clone();
    words.extend(next.words.iter().cloned());
    TranscriptSegment {
        start: current.start,
        end: next.end,
        text: format!("{} {}", current.text.trim_end(), next.text.trim_start()),
        words,
        speaker: current.speaker.clone().or_else(|| next.speaker.clone()),
    }
}

/// Merge segments forward while they end in an open loop.
///
/// Merging stops once the merged text closes (terminal punctuation or a
/// completion marker) or the merged span reaches `max_merged_secs`.
pub fn close_open_loops(
    segments: &[TranscriptSegment],
    max_merged_secs: f64,
) -> Vec<TranscriptSegment> {
    let mut merged = Vec::with_capacity(segments.len());
    let mut i = 0;

    while i < segments.len() {
        let mut current = segments[i].clone();

        while i + 1 < segments.len() {
            if current.duration() >= max_merged_secs || !has_open_loop(&current.text) {
                break;
            }
            current = merge_pair(&current, &segments[i + 1]);
            i += 1;
            if ends_with_completion(&current.text) {
                break;
            }
        }

        merged.push(current);
        i += 1;
    }

    log_debug!(
        "close_open_loops: {} → {} segments after merging",
        segments.len(),
        merged.len()
    );
    merged
}

/// Walk back from `start_idx` past segments that open mid-thought.
pub fn snap_start_boundary(segments: &[TranscriptSegment], start_idx: usize) -> usize {
    let mut idx = start_idx.min(segments.len().saturating_sub(1));
    while idx > 0 && has_bad_opening(&segments[idx].text) {
        idx -= 1;
    }
    idx
}

/// Walk forward from `end_idx` until the thought closes or the span
/// from `end_idx`'s start would exceed `max_merged_secs`.
pub fn snap_end_boundary(
    segments: &[TranscriptSegment],
    end_idx: usize,
    max_merged_secs: f64,
) -> usize {
    if segments.is_empty() {
        return 0;
    }
    let end_idx = end_idx.min(segments.len() - 1);
    let origin = segments[end_idx].start;
    let mut idx = end_idx;
    while idx + 1 < segments.len() && has_open_loop(&segments[idx].text) {
        if segments[idx + 1].end - origin > max_merged_secs {
            break;
        }
        idx += 1;
    }
    idx
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuriosityGap {
    pub has_question: bool,
    /// Words after the last question mark; `None` when the question closes the text.
    pub answer_distance_words: Option<usize>,
}

impl CuriosityGap {
    /// A question left unanswered, or answered only after a real pause.
    pub fn is_open(&self) -> bool {
        self.has_question
            && self
                .answer_distance_words
                .map_or(true, |distance| distance > IMMEDIATE_ANSWER_WORDS)
    }
}

pub fn check_curiosity_gap(text: &str) -> CuriosityGap {
    let Some(q_pos) = text.rfind('?') else {
        return CuriosityGap {
            has_question: false,
            answer_distance_words: None,
        };
    };
    let after = text[q_pos + 1..].split_whitespace().count();
    CuriosityGap {
        has_question: true,
        answer_distance_words: (after > 0).then_some(after),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start: f64, end: f64, text: &str) -> TranscriptSegment {
        TranscriptSegment::new(start, end, text)
    }

    #[test]
    fn detects_open_loop_signals() {
        assert!(has_open_loop("I went to the store and"));
        assert!(has_open_loop("So I was walking and."));
        assert!(has_open_loop("Here's the deal."));
        assert!(has_open_loop("First, you need a plan."));
        assert!(has_open_loop("Do you know why?"));
        assert!(has_open_loop("Wait. Really?!"));
        assert!(!has_open_loop("First, plan. Second, execute."));
        assert!(!has_open_loop("That was the whole story."));
        assert!(!has_open_loop("   "));
    }

    #[test]
    fn merges_trailing_connector_with_next_segment() {
        let segments = vec![
            seg(0.0, 4.0, "I opened the letter and"),
            seg(4.0, 8.0, "it said I was fired."),
            seg(8.0, 12.0, "That hurt."),
        ];
        let merged = close_open_loops(&segments, 90.0);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].text, "I opened the letter and it said I was fired.");
        assert_eq!(merged[0].start, 0.0);
        assert_eq!(merged[0].end, 8.0);
        assert_eq!(segments[0].text, "I opened the letter and");
    }

    #[test]
    fn merge_stops_at_duration_budget() {
        let segments = vec![
            seg(0.0, 50.0, "this keeps going and"),
            seg(50.0, 100.0, "going and"),
            seg(100.0, 110.0, "going."),
        ];
        let merged = close_open_loops(&segments, 90.0);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].end, 100.0);
    }

    #[test]
    fn completion_marker_closes_merge() {
        let segments = vec![
            seg(0.0, 3.0, "we tried it and"),
            seg(3.0, 6.0, "it worked, right"),
            seg(6.0, 9.0, "next topic"),
        ];
        let merged = close_open_loops(&segments, 90.0);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].text, "next topic");
    }

    #[test]
    fn start_snap_walks_back_over_continuations() {
        let segments = vec![
            seg(0.0, 3.0, "I quit my job."),
            seg(3.0, 6.0, "And then I moved."),
            seg(6.0, 9.0, "But nobody knew."),
        ];
        assert_eq!(snap_start_boundary(&segments, 2), 0);
        assert_eq!(snap_start_boundary(&segments, 0), 0);
    }

    #[test]
    fn end_snap_walks_forward_until_closed() {
        let segments = vec![
            seg(0.0, 3.0, "The reason is"),
            seg(3.0, 6.0, "nobody checked"),
            seg(6.0, 9.0, "the numbers."),
            seg(9.0, 12.0, "Next."),
        ];
        assert_eq!(snap_end_boundary(&segments, 0, 90.0), 2);
        assert_eq!(snap_end_boundary(&segments, 0, 5.0), 0);
    }

    #[test]
    fn curiosity_gap_counts_words_after_question() {
        let gap = check_curiosity_gap("Why did it fail?");
        assert!(gap.has_question);
        assert_eq!(gap.answer_distance_words, None);
        assert!(gap.is_open());

        let answered = check_curiosity_gap("Why? Because money.");
        assert_eq!(answered.answer_distance_words, Some(2));
        assert!(!answered.is_open());

        assert!(!check_curiosity_gap("No questions here.").has_question);
    }
}
