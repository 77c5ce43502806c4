//! Small text helpers shared by the segmentation, reconstruction and
//! packaging stages.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static ALPHA_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z']+").unwrap());

/// Characters that terminate a sentence.
pub const TERMINAL_PUNCTUATION: [char; 3] = ['.', '!', '?'];

pub fn is_terminal(c: char) -> bool {
    TERMINAL_PUNCTUATION.contains(&c)
}

/// True when the trimmed text ends with `.`, `!` or `?`.
pub fn ends_with_terminal(text: &str) -> bool {
    text.trim_end().chars().last().map(is_terminal).unwrap_or(false)
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lowercased runs of letters and apostrophes.
pub fn alpha_tokens(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    ALPHA_TOKEN
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Lowercase the token and drop everything that is not ASCII alphanumeric.
pub fn clean_token(token: &str) -> String {
    token
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Last whitespace-separated word, lowercased, with trailing `,:;` removed.
pub fn last_word(text: &str) -> Option<String> {
    text.split_whitespace()
        .last()
        .map(|w| w.to_lowercase().trim_end_matches([',', ':', ';']).to_string())
}

/// First whitespace-separated word, lowercased, with trailing `,:;` removed.
pub fn first_word(text: &str) -> Option<String> {
    text.split_whitespace()
        .next()
        .map(|w| w.to_lowercase().trim_end_matches([',', ':', ';']).to_string())
}

/// Split on whitespace that directly follows terminal punctuation.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut prev_terminal = false;
    let mut in_break = false;

    for c in text.trim().chars() {
        if c.is_whitespace() && (prev_terminal || in_break) {
            in_break = true;
            continue;
        }
        if in_break {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
            in_break = false;
        }
        current.push(c);
        prev_terminal = is_terminal(c);
    }

    let tail = current.trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

/// Lowercased whitespace token set.
pub fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Jaccard similarity of the lowercased whitespace token sets.
pub fn jaccard(a: &str, b: &str) -> f64 {
    let left = token_set(a);
    let right = token_set(b);
    let union = left.union(&right).count();
    if union == 0 {
        return 0.0;
    }
    left.intersection(&right).count() as f64 / union as f64
}

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_only_after_terminal_punctuation() {
        let parts = split_sentences("Stop scrolling. This is wild!  Why?  ok then");
        assert_eq!(parts, vec!["Stop scrolling.", "This is wild!", "Why?", "ok then"]);
    }

    #[test]
    fn decimal_points_do_not_split() {
        assert_eq!(split_sentences("It grew 2.5 times."), vec!["It grew 2.5 times."]);
    }

    #[test]
    fn jaccard_of_identical_and_disjoint_text() {
        assert_eq!(jaccard("a b c", "c b a"), 1.0);
        assert_eq!(jaccard("a b", "c d"), 0.0);
        assert_eq!(jaccard("", ""), 0.0);
    }

    #[test]
    fn edge_words_are_normalised() {
        assert_eq!(last_word("I went there and,").as_deref(), Some("and"));
        assert_eq!(first_word("But, then").as_deref(), Some("but"));
        assert!(ends_with_terminal("Done!  "));
        assert!(!ends_with_terminal("not done"));
    }
}
