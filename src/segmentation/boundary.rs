//! Word-level boundary alignment: move a clip's start to the first word of
//! its sentence and its end to the close of the sentence it stops in.

const ENABLE_LOGS: bool = true;

use crate::log_debug;
use crate::models::{Candidate, Word};
use crate::utils::text::{clean_token, ends_with_terminal, round_to};

const CONTINUATION_WORDS: [&str; 17] = [
    "and", "but", "so", "because", "which", "that", "however", "although", "yet", "nor", "or",
    "if", "when", "while", "since", "though", "even",
];

/// Tolerance on word ends when collecting words inside a snapped range.
const TIME_TOLERANCE: f64 = 0.01;

/// Index of the word spoken at `time`, else the next word after it, else the last word.
fn word_index_at(words: &[Word], time: f64) -> usize {
    if let Some(i) = words.iter().position(|w| w.start <= time && time <= w.end) {
        return i;
    }
    words
        .iter()
        .position(|w| w.start > time)
        .unwrap_or(words.len().saturating_sub(1))
}

fn is_continuation_word(word: &str) -> bool {
    let token: String = clean_token(word)
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect();
    CONTINUATION_WORDS.contains(&token.as_str())
}

pub fn snap_to_sentence_start(words: &[Word], target: f64) -> f64 {
    if words.is_empty() {
        return target;
    }
    let mut idx = word_index_at(words, target);

    while idx > 0 && !ends_with_terminal(&words[idx - 1].text) {
        idx -= 1;
    }
    while idx + 1 < words.len() && is_continuation_word(&words[idx].text) {
        idx += 1;
    }
    words[idx].start
}

pub fn snap_to_sentence_end(words: &[Word], target: f64) -> f64 {
    let Some(last) = words.last() else {
        return target;
    };
    let idx = word_index_at(words, target);
    words[idx..]
        .iter()
        .find(|w| ends_with_terminal(&w.text))
        .map(|w| w.end)
        .unwrap_or(last.end)
}

/// Snap a candidate to sentence boundaries, rebuilding its words and text
/// from the snapped range. Returns the candidate unchanged when there are
/// no words or the snap would invert the range.
pub fn snap_candidate(candidate: &Candidate, words: &[Word]) -> Candidate {
    if words.is_empty() {
        return candidate.clone();
    }
    let start = snap_to_sentence_start(words, candidate.start);
    let end = snap_to_sentence_end(words, candidate.end);
    if start >= end {
        return candidate.clone();
    }

    let mut snapped = candidate.clone();
    snapped.start = start;
    snapped.end = end;
    snapped.duration = round_to(end - start, 4);

    let inside: Vec<Word> = words
        .iter()
        .filter(|w| w.start >= start && w.end <= end + TIME_TOLERANCE)
        .cloned()
        .collect();
    if !inside.is_empty() {
        snapped.text = inside
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        snapped.words = inside;
    }

    log_debug!(
        "snap_candidate {}: {:.2}-{:.2} → {:.2}-{:.2}",
        candidate.id,
        candidate.start,
        candidate.end,
        start,
        end
    );
    snapped
}
