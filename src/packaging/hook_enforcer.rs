//! Two-second hook check with a mid-clip recut when the opening is flat.

const ENABLE_LOGS: bool = true;

use crate::models::{Candidate, HookMetadata, RecutSource, Word};
use crate::packaging::config::HookConfig;
use crate::utils::text::{alpha_tokens, round_to};
use crate::{log_debug, log_info};

/// Tokens that never count as an opening hook on their own.
pub const FILLER_TOKENS: [&str; 10] = [
    "um", "uh", "so", "hey", "like", "well", "and", "but", "ok", "okay",
];

/// Interrupt words, grouped by the reaction they provoke.
pub const EMOTION_KEYWORDS: [(&str, &[&str]); 4] = [
    ("shock", &["bankrupt", "died", "fired", "shocked", "insane", "crazy", "unbelievable"]),
    ("anger", &["wrong", "lied", "scam", "fraud", "terrible", "worst", "hate"]),
    ("vulnerability", &["failed", "broke", "cried", "lost", "alone", "scared", "afraid"]),
    ("curiosity", &["secret", "truth", "nobody", "never", "myth", "hidden", "actually"]),
];

const EMOTION_WORD_WEIGHT: f64 = 2.0;
const QUESTION_WEIGHT: f64 = 1.5;

pub fn is_emotion_word(word: &str) -> bool {
    EMOTION_KEYWORDS
        .iter()
        .any(|(_, words)| words.contains(&word))
}

fn is_filler(word: &str) -> bool {
    FILLER_TOKENS.contains(&word)
}

/// True when a question, an emotion word, or an early non-filler word
/// lands inside the hook window. Offsets are relative to the clip start.
fn has_interrupt_signal(tokens: &[&Word], clip_start: f64, config: &HookConfig) -> bool {
    for token in tokens {
        let offset = token.start - clip_start;
        if offset >= config.hook_window_secs {
            break;
        }
        if token.text.contains('?') {
            return true;
        }
        let words = alpha_tokens(&token.text);
        if words.iter().any(|w| is_emotion_word(w)) {
            return true;
        }
        if offset < config.first_word_secs && words.iter().any(|w| !is_filler(w)) {
            return true;
        }
    }
    false
}

fn window_score(tokens: &[&Word], clip_start: f64, center: f64, half_width: f64) -> f64 {
    tokens
        .iter()
        .filter(|t| (t.start - clip_start - center).abs() <= half_width)
        .map(|t| {
            let emotional = alpha_tokens(&t.text).iter().filter(|w| is_emotion_word(w)).count();
            let question = if t.text.contains('?') { QUESTION_WEIGHT } else { 0.0 };
            emotional as f64 * EMOTION_WORD_WEIGHT + question
        })
        .sum()
}

/// Offset of the strongest emotion/curiosity peak, probing every
/// `peak_step_secs` from the clip start. The earliest of equal peaks wins;
/// `None` when nothing scores.
fn find_best_peak(tokens: &[&Word], clip_start: f64, duration: f64, config: &HookConfig) -> Option<f64> {
    if tokens.is_empty() || config.peak_step_secs <= 0.0 {
        return None;
    }
    let mut best: Option<(f64, f64)> = None;
    let mut i = 0;
    loop {
        let sample = i as f64 * config.peak_step_secs;
        if sample > duration {
            break;
        }
        let score = window_score(tokens, clip_start, sample, config.peak_window_secs);
        if score > best.map(|(_, s)| s).unwrap_or(0.0) {
            best = Some((sample, score));
        }
        i += 1;
    }
    best.map(|(sample, _)| sample)
}

/// Check the opening of a clip and recut it around its strongest peak when
/// no hook fires.
///
/// Clips shorter than `min_recut_source_secs` are only flagged. A recut
/// starts `pre_hook_buffer_secs` ahead of the peak, runs at most
/// `max_clip_secs`, and never leaves the original bounds. A clip with no
/// peak is flagged `recut_failed` and otherwise left as it was.
pub fn enforce_hook(candidate: &Candidate, words: &[Word], config: &HookConfig) -> Candidate {
    let (start, end) = (candidate.start, candidate.end);
    let duration = end - start;
    let source: &[Word] = if words.is_empty() { &candidate.words } else { words };
    let mut tokens: Vec<&Word> = source
        .iter()
        .filter(|w| w.start >= start && w.start < end)
        .collect();
    tokens.sort_by(|a, b| a.start.total_cmp(&b.start));

    let mut result = candidate.clone();
    let mut hook = HookMetadata {
        hook_found: false,
        hook_timestamp: 0.0,
        recut_applied: false,
        recut_source: None,
    };

    if has_interrupt_signal(&tokens, start, config) {
        hook.hook_found = true;
        hook.hook_timestamp = start;
        result.hook = Some(hook);
        return result;
    }

    if duration < config.min_recut_source_secs {
        log_debug!("enforce_hook: {} too short to recut ({:.1}s)", candidate.id, duration);
        result.hook = Some(hook);
        return result;
    }

    let Some(peak) = find_best_peak(&tokens, start, duration, config) else {
        log_debug!("enforce_hook: {} has no hook and no peak", candidate.id);
        result.recut_failed = true;
        result.hook = Some(hook);
        return result;
    };

    let mut new_start = (start + peak - config.pre_hook_buffer_secs).max(start);
    let new_end = (new_start + config.max_clip_secs).min(end);
    if new_end - new_start < config.min_clip_secs {
        new_start = (new_end - config.preferred_min_secs).max(start);
    }

    hook.hook_found = true;
    hook.hook_timestamp = start + peak;
    hook.recut_applied = true;
    hook.recut_source = Some(RecutSource::MidSegment);

    result.start = new_start;
    result.end = new_end;
    result.duration = round_to(new_end - new_start, 4);
    let kept: Vec<Word> = tokens
        .iter()
        .filter(|w| w.start >= new_start && w.start < new_end)
        .map(|w| (*w).clone())
        .collect();
    if !kept.is_empty() {
        result.text = kept.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" ");
        result.words = kept;
    }
    result.hook = Some(hook);

    log_info!(
        "enforce_hook: recut {} to {:.1}-{:.1}s (peak at {:.1}s)",
        candidate.id,
        new_start,
        new_end,
        start + peak
    );
    result
}

/// Apply `enforce_hook` to every clip.
pub fn enforce_hooks(candidates: &[Candidate], words: &[Word], config: &HookConfig) -> Vec<Candidate> {
    let enforced: Vec<Candidate> = candidates
        .iter()
        .map(|c| enforce_hook(c, words, config))
        .collect();
    let recut = enforced
        .iter()
        .filter(|c| c.hook.map(|h| h.recut_applied).unwrap_or(false))
        .count();
    let failed = enforced.iter().filter(|c| c.recut_failed).count();
    log_info!(
        "enforce_hooks: {} clips, {} recut, {} without a usable hook",
        enforced.len(),
        recut,
        failed
    );
    enforced
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CandidateKind;

    fn clip(start: f64, end: f64) -> Candidate {
        Candidate::new("macro-1", CandidateKind::Macro, start, end, "")
    }

    /// One filler word per second from `start` to `end`, with overrides.
    fn words(start: f64, end: f64, overrides: &[(f64, &str)]) -> Vec<Word> {
        let mut out = Vec::new();
        let mut t = start;
        while t < end {
            let text = overrides
                .iter()
                .find(|(at, _)| *at == t)
                .map(|(_, w)| *w)
                .unwrap_or("um");
            out.push(Word::new(text, t, t + 0.8));
            t += 1.0;
        }
        out
    }

    #[test]
    fn strong_opening_is_kept() {
        let result = enforce_hook(
            &clip(100.0, 130.0),
            &words(100.0, 130.0, &[(101.0, "Bankrupt")]),
            &HookConfig::default(),
        );
        let hook = result.hook.unwrap();
        assert!(hook.hook_found);
        assert!(!hook.recut_applied);
        assert_eq!(hook.hook_timestamp, 100.0);
        assert_eq!((result.start, result.end), (100.0, 130.0));
    }

    #[test]
    fn early_plain_word_counts_as_a_hook() {
        let result = enforce_hook(
            &clip(0.0, 30.0),
            &words(0.0, 30.0, &[(1.0, "Listen")]),
            &HookConfig::default(),
        );
        assert!(result.hook.unwrap().hook_found);
    }

    #[test]
    fn flat_opening_is_recut_before_the_peak() {
        let result = enforce_hook(
            &clip(100.0, 140.0),
            &words(100.0, 140.0, &[(110.0, "secret"), (111.0, "why?")]),
            &HookConfig::default(),
        );
        let hook = result.hook.unwrap();
        assert!(hook.recut_applied);
        assert_eq!(hook.recut_source, Some(RecutSource::MidSegment));
        // samples at 10 and 11 both see 3.5; the earlier wins
        assert_eq!(hook.hook_timestamp, 110.0);
        assert!((result.start - 108.4).abs() < 1e-9);
        assert!((result.end - 134.4).abs() < 1e-9);
        assert!(result.text.starts_with("um secret why?"));
    }

    #[test]
    fn late_peak_keeps_minimum_length() {
        let result = enforce_hook(
            &clip(0.0, 30.0),
            &words(0.0, 30.0, &[(28.0, "lost")]),
            &HookConfig::default(),
        );
        // the peak sample is 27, and 25.4 → 30 is too short, so start moves back to 30 − 18
        assert_eq!((result.start, result.end), (12.0, 30.0));
    }

    #[test]
    fn no_peak_flags_recut_failure() {
        let original = clip(0.0, 30.0);
        let result = enforce_hook(&original, &words(0.0, 30.0, &[]), &HookConfig::default());
        assert!(result.recut_failed);
        assert!(!result.hook.unwrap().hook_found);
        assert_eq!((result.start, result.end), (0.0, 30.0));
    }

    #[test]
    fn short_clips_are_not_recut() {
        let result = enforce_hook(&clip(0.0, 8.0), &words(0.0, 8.0, &[]), &HookConfig::default());
        assert!(!result.recut_failed);
        assert!(!result.hook.unwrap().hook_found);
    }
}
