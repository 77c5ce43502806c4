//! Head-to-head evaluation of reconstructed clips.
//!
//! The judge scores every clip on five dimensions in one prompt. Clips the
//! judge could not score (no judge, failed call, missing entry) are scored
//! by regex heuristics instead, so the stage always produces a ranking.

const ENABLE_LOGS: bool = true;

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::models::{Candidate, CompetitiveScores, CompetitiveSource};
use crate::reconstruction::config::{CompetitiveWeights, ReconstructionConfig};
use crate::scoring::judge::{ask_json, Judge};
use crate::scoring::parser::{align_batch, batch_entries, extract_score};
use crate::scoring::prompt::build_competitive_prompt;
use crate::utils::text::{round_to, split_sentences, word_count};
use crate::{log_info, log_warn};

const MAX_SCORE: f64 = 10.0;
/// Dimension value for a judged clip whose entry lacks that field.
const JUDGE_DEFAULT: f64 = 5.0;

fn bank(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| RegexBuilder::new(p).case_insensitive(true).build().unwrap())
        .collect()
}

static SCROLL_STOP: Lazy<Vec<Regex>> = Lazy::new(|| {
    bank(&[
        r"\b(?:nobody|never|always|shocking|secret|truth|exposed)\b",
        r"\b(?:you won'?t believe|can'?t believe|incredible)\b",
        r"\?$",
        r"!",
    ])
});

static SHARE_TRIGGER: Lazy<Vec<Regex>> = Lazy::new(|| {
    bank(&[
        r"\b(?:share|tell|show|pass|forward|repost)\b",
        r"\b(?:everyone needs to|you need to know|important)\b",
        r"\b(?:save this|bookmark|screenshot)\b",
    ])
});

static DEBATE: Lazy<Vec<Regex>> = Lazy::new(|| {
    bank(&[
        r"\b(?:wrong|disagree|controversial|unpopular opinion|fight me)\b",
        r"\b(?:actually|in fact|contrary|opposite|myth|lie)\b",
        r"\b(?:change my mind|prove me wrong|hot take)\b",
    ])
});

static ENDING: Lazy<Vec<Regex>> = Lazy::new(|| {
    bank(&[
        r"!+$",
        r"\?$",
        r"\b(?:remember|think about|that'?s the truth|that'?s it)\b",
        r"\b(?:and that'?s why|this is what|bottom line|the point is)\b",
    ])
});

fn hit_ratio(text: &str, patterns: &[Regex]) -> f64 {
    let hits = patterns.iter().filter(|p| p.is_match(text)).count();
    (hits as f64 / patterns.len().max(1) as f64 * MAX_SCORE).min(MAX_SCORE)
}

/// 30–100 words reads best; very short clips are unclear, very long ones
/// get a flat middling score.
fn clarity(text: &str) -> f64 {
    let words = word_count(text);
    if words < 10 {
        return 2.0;
    }
    if words > 200 {
        return 5.0;
    }
    (words as f64 / 100.0 * MAX_SCORE).min(MAX_SCORE)
}

pub fn heuristic_scores(text: &str) -> CompetitiveScores {
    let text = text.trim();
    let closing = split_sentences(text).pop().unwrap_or_else(|| text.to_string());
    CompetitiveScores {
        scroll_stop_probability: hit_ratio(text, &SCROLL_STOP),
        share_trigger: hit_ratio(text, &SHARE_TRIGGER),
        debate_potential: hit_ratio(text, &DEBATE),
        clarity: clarity(text),
        ending_strength: hit_ratio(&closing, &ENDING),
        source: CompetitiveSource::Heuristic,
    }
}

fn judged_scores(entry: &Value) -> CompetitiveScores {
    let score = |field: &str| extract_score(entry, field, JUDGE_DEFAULT);
    CompetitiveScores {
        scroll_stop_probability: score("scroll_stop_probability"),
        share_trigger: score("share_trigger"),
        debate_potential: score("debate_potential"),
        clarity: score("clarity"),
        ending_strength: score("ending_strength"),
        source: CompetitiveSource::Judge,
    }
}

pub fn weighted_score(scores: &CompetitiveScores, weights: &CompetitiveWeights) -> f64 {
    round_to(
        scores.scroll_stop_probability * weights.scroll_stop_probability
            + scores.share_trigger * weights.share_trigger
            + scores.debate_potential * weights.debate_potential
            + scores.clarity * weights.clarity
            + scores.ending_strength * weights.ending_strength,
        3,
    )
}

/// Score every clip, sort by `competitive_score` and keep the top `top_n`.
pub fn competitive_evaluate(
    candidates: &[Candidate],
    judge: Option<&dyn Judge>,
    config: &ReconstructionConfig,
) -> Vec<Candidate> {
    if candidates.is_empty() {
        log_warn!("competitive_evaluate: no candidates");
        return Vec::new();
    }

    let numbered: Vec<(usize, &Candidate)> =
        candidates.iter().enumerate().map(|(i, c)| (i + 1, c)).collect();
    let ids: Vec<usize> = numbered.iter().map(|(id, _)| *id).collect();

    let entries = ask_json(judge, &build_competitive_prompt(&numbered), "competitive_evaluate")
        .map(|reply| batch_entries(&reply))
        .unwrap_or_default();
    let aligned = align_batch(&entries, &ids);

    let mut evaluated: Vec<Candidate> = candidates
        .iter()
        .zip(aligned)
        .map(|(candidate, entry)| {
            let scores = match entry {
                Some(entry) => judged_scores(entry),
                None => heuristic_scores(&candidate.text),
            };
            let mut result = candidate.clone();
            result.competitive_score = Some(weighted_score(&scores, &config.competitive_weights));
            result.competitive = Some(scores);
            result
        })
        .collect();

    let heuristic = evaluated
        .iter()
        .filter(|c| matches!(c.competitive, Some(s) if s.source == CompetitiveSource::Heuristic))
        .count();
    if heuristic > 0 {
        log_info!(
            "competitive_evaluate: heuristic scoring for {}/{} candidates",
            heuristic,
            evaluated.len()
        );
    }

    evaluated.sort_by(|a, b| {
        b.competitive_score
            .unwrap_or(0.0)
            .total_cmp(&a.competitive_score.unwrap_or(0.0))
    });
    let total = evaluated.len();
    evaluated.truncate(config.top_n);

    log_info!("competitive_evaluate: keeping top {}/{}", evaluated.len(), total);
    evaluated
}
