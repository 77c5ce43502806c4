//! Pattern-bank scoring of single sentences.
//!
//! Each bank counts how many of its patterns occur at least once; the count
//! maps linearly onto 0–10 and saturates at the bank's `saturation`.

const ENABLE_LOGS: bool = true;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use crate::log_info;
use crate::models::{AtomicUnit, ScoredUnit, SentenceScores};
use crate::utils::text::round_to;

fn bank(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| RegexBuilder::new(p).case_insensitive(true).build().unwrap())
        .collect()
}

static HOOK_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    bank(&[
        r"^\s*(?:wait|stop|listen|look|imagine|picture this|here(?:'s)?|this is)",
        r"\b(?:you won'?t believe|you need to know|you have to|you must)\b",
        r"\b(?:nobody tells you|nobody talks about|the secret|the truth)\b",
        r"\b(?:this is why|here(?:'s)? why|the reason)\b",
        r"\?$",
    ])
});

static EMOTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    bank(&[
        r"\b(?:shocked|stunned|insane|crazy|unbelievable|wild|amazing|incredible)\b",
        r"\b(?:angry|furious|devastated|heartbroken|terrified|scared|thrilled)\b",
        r"\b(?:love|hate|fear|joy|disgust|surprise|sad|happy|excited)\b",
        r"!",
    ])
});

static CLAIM_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    bank(&[
        r"\b(?:always|never|every|all|none|nobody|everybody|everyone)\b",
        r"\b(?:fact|proven|study shows|research says|data shows)\b",
        r"\b(?:guarantee|promise|swear|certain|absolutely|definitely)\b",
        // percentages; `%\b` needs a word character right after the sign
        r"\b\d+\s*%\b",
        // money
        r"\$\d[\d,]*",
        // multipliers
        r"\b\d+x\b",
        r"\b\d+\s*(?:days?|weeks?|months?|hours?|years?)\b",
    ])
});

static IDENTITY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    bank(&[
        r"\b(?:you|your|you'?re|you'?ve|you'?ll|yourself)\b",
        r"\b(?:we all|anyone who|if you'?ve|people like)\b",
        r"\b(?:as a|being a|when you'?re|for you)\b",
    ])
});

static ENERGY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    bank(&[
        r"!",
        r"\b(?:now|right now|immediately|instantly|quickly|fast)\b",
        r"\b(?:massive|huge|giant|enormous|tiny|zero|every single)\b",
        // shouted words; under case-insensitive matching any 3-letter run counts
        r"[A-Z]{3,}",
    ])
});

fn count_matches(text: &str, patterns: &[Regex]) -> usize {
    patterns.iter().filter(|p| p.is_match(text)).count()
}

fn normalise(count: usize, saturation: usize) -> f64 {
    (count as f64 / saturation.max(1) as f64 * 10.0).min(10.0)
}

pub fn score_sentence(text: &str) -> SentenceScores {
    let hook = normalise(count_matches(text, &HOOK_PATTERNS), 2);
    let emotion = normalise(count_matches(text, &EMOTION_PATTERNS), 3);
    let claim = normalise(count_matches(text, &CLAIM_PATTERNS), 3);
    let identity = normalise(count_matches(text, &IDENTITY_PATTERNS), 3);
    let energy = normalise(count_matches(text, &ENERGY_PATTERNS), 2);

    SentenceScores {
        hook_score: round_to(hook, 2),
        emotional_charge: round_to(emotion, 2),
        claim_strength: round_to(claim, 2),
        identity_trigger: round_to(identity, 2),
        energy_score: round_to(energy, 2),
        delivery_intensity: round_to(emotion * 0.6 + energy * 0.4, 2),
    }
}

pub fn score_units(units: &[AtomicUnit]) -> Vec<ScoredUnit> {
    let scored: Vec<ScoredUnit> = units
        .iter()
        .map(|unit| ScoredUnit {
            unit: unit.clone(),
            scores: score_sentence(&unit.text),
        })
        .collect();
    log_info!("score_units: scored {} sentence units", scored.len());
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_sentence_scores_zero() {
        assert_eq!(score_sentence("it is ok."), SentenceScores::default());
    }

    #[test]
    fn hook_bank_saturates_at_two() {
        let scores = score_sentence("Wait, here's why nobody talks about the secret?");
        assert_eq!(scores.hook_score, 10.0);
    }

    #[test]
    fn claims_count_each_pattern_once() {
        let scores = score_sentence("Studies aside, it is a fact that 90% of people never save $1,000.");
        // always/never, fact, money
        assert_eq!(scores.claim_strength, 10.0);
        let scores = score_sentence("It took 3 years.");
        assert_eq!(scores.claim_strength, 3.33);
    }

    #[test]
    fn percent_sign_followed_by_space_is_not_a_claim() {
        assert_eq!(score_sentence("90% of them").claim_strength, 0.0);
        assert_eq!(score_sentence("90%off").claim_strength, 3.33);
    }

    #[test]
    fn letter_runs_count_as_energy_in_any_case() {
        assert_eq!(score_sentence("it is ok!").energy_score, 5.0);
        assert_eq!(score_sentence("this was massive").energy_score, 10.0);
        assert_eq!(score_sentence("this was MASSIVE").energy_score, 10.0);
    }

    #[test]
    fn delivery_blends_emotion_and_energy() {
        let scores = score_sentence("I was shocked!");
        // emotion: keyword + "!" = 2/3; energy: "!" + letter run = 2/2
        assert_eq!(scores.emotional_charge, 6.67);
        assert_eq!(scores.energy_score, 10.0);
        assert_eq!(scores.delivery_intensity, 8.0);
    }
}
