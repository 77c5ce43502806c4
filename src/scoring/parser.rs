//! Extraction of component scores from untrusted judge output.

const ENABLE_LOGS: bool = true;

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::log_warn;
use crate::models::{ComponentScores, JudgeNotes};

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"```(?:json)?\s*").unwrap());

/// Which component fields a response is expected to carry, and the value
/// a missing or unusable field falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreMode {
    /// Six core fields, default 0.0
    Base,
    /// Six core fields plus controversy and novelty, default 5.0
    Extended,
}

impl ScoreMode {
    pub fn default_score(&self) -> f64 {
        match self {
            ScoreMode::Base => 0.0,
            ScoreMode::Extended => 5.0,
        }
    }
}

/// Byte range of the first balanced `{...}` block, ignoring braces inside
/// JSON strings.
fn first_object_span(text: &str) -> Option<(usize, usize)> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((start, start + offset + 1));
                }
            }
            _ => {}
        }
    }
    None
}

/// Parse the first JSON object found in a judge response.
///
/// Accepts clean JSON, markdown-fenced JSON, or JSON embedded in prose.
pub fn parse_json_object(raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        bail!("Empty judge response");
    }
    let cleaned = CODE_FENCE.replace_all(raw, "");
    let Some((start, end)) = first_object_span(&cleaned) else {
        let preview: String = cleaned.chars().take(200).collect();
        bail!("No balanced JSON object in judge response: {preview}");
    };
    let json = &cleaned[start..end];
    serde_json::from_str(json).with_context(|| {
        let preview: String = json.chars().take(200).collect();
        format!("Invalid JSON in judge response: {preview}")
    })
}

/// A 0–10 score from a number or numeric string; anything else is `default`.
pub fn extract_score(data: &Value, field: &str, default: f64) -> f64 {
    let parsed = match data.get(field) {
        None | Some(Value::Null) => return default,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(value) if value.is_finite() => value.clamp(0.0, 10.0),
        _ => {
            log_warn!("Invalid score for '{}', using default {}", field, default);
            default
        }
    }
}

pub fn extract_component_scores(data: &Value, mode: ScoreMode) -> ComponentScores {
    let default = mode.default_score();
    let score = |field: &str| extract_score(data, field, default);
    let mut scores = ComponentScores {
        hook_score: score("hook_score"),
        retention_score: score("retention_score"),
        emotion_score: score("emotion_score"),
        completion_score: score("completion_score"),
        relatability_score: score("relatability_score"),
        platform_fit_score: score("platform_fit_score"),
        controversy_score: None,
        novelty_score: None,
    };
    if mode == ScoreMode::Extended {
        scores.controversy_score = Some(score("controversy_score"));
        scores.novelty_score = Some(score("novelty_score"));
    }
    scores
}

/// Every field's default, used when a response is missing or unusable.
pub fn default_component_scores(mode: ScoreMode) -> ComponentScores {
    extract_component_scores(&Value::Null, mode)
}

fn string_list(data: &Value, field: &str) -> Vec<String> {
    data.get(field)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn string_field(data: &Value, field: &str) -> Option<String> {
    data.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

pub fn extract_judge_notes(data: &Value) -> JudgeNotes {
    JudgeNotes {
        key_strengths: string_list(data, "key_strengths"),
        key_weaknesses: string_list(data, "key_weaknesses"),
        first_3_seconds: string_field(data, "first_3_seconds").unwrap_or_default(),
        primary_emotion: string_field(data, "primary_emotion")
            .unwrap_or_else(|| "neutral".to_string()),
        optimal_platform: string_field(data, "optimal_platform")
            .unwrap_or_else(|| "none".to_string()),
        suggested_title: string_field(data, "suggested_title"),
    }
}

/// Notes attached when a candidate could not be judged.
pub fn fallback_judge_notes() -> JudgeNotes {
    JudgeNotes {
        key_weaknesses: vec!["AI scoring failed".to_string()],
        primary_emotion: "neutral".to_string(),
        optimal_platform: "none".to_string(),
        ..JudgeNotes::default()
    }
}

/// The `segments` array of a batch response; a missing or non-array field is empty.
pub fn batch_entries(data: &Value) -> Vec<Value> {
    match data.get("segments") {
        Some(Value::Array(items)) => items.iter().filter(|v| v.is_object()).cloned().collect(),
        Some(_) => {
            log_warn!("Batch response 'segments' is not a list");
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Pair each requested segment id with its response entry.
///
/// Entries carrying a `segment_id` are matched by id; otherwise entries are
/// matched by position.
pub fn align_batch<'a>(entries: &'a [Value], segment_ids: &[usize]) -> Vec<Option<&'a Value>> {
    let by_id = entries.iter().any(|e| e.get("segment_id").is_some());
    if entries.len() != segment_ids.len() {
        log_warn!(
            "Batch response count mismatch: expected {}, got {}",
            segment_ids.len(),
            entries.len()
        );
    }

    segment_ids
        .iter()
        .enumerate()
        .map(|(position, id)| {
            if by_id {
                entries.iter().find(|e| entry_id(e) == Some(*id))
            } else {
                entries.get(position)
            }
        })
        .collect()
}

fn entry_id(entry: &Value) -> Option<usize> {
    match entry.get("segment_id")? {
        Value::Number(n) => n.as_u64().map(|v| v as usize),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_fenced_and_embedded_json() {
        let fenced = "```json\n{\"segments\": []}\n```";
        assert!(parse_json_object(fenced).unwrap()["segments"].is_array());

        let embedded = "Sure! Here you go: {\"a\": {\"b\": 1}} and more {\"c\": 2}";
        assert_eq!(parse_json_object(embedded).unwrap(), json!({"a": {"b": 1}}));
    }

    #[test]
    fn braces_inside_strings_do_not_count() {
        let raw = r#"{"note": "a } brace", "hook_score": 7}"#;
        assert_eq!(parse_json_object(raw).unwrap()["hook_score"], 7);
    }

    #[test]
    fn unusable_responses_are_errors() {
        assert!(parse_json_object("").is_err());
        assert!(parse_json_object("no json here").is_err());
        assert!(parse_json_object("{\"open\": 1").is_err());
    }

    #[test]
    fn scores_clamp_and_default() {
        let data = json!({"hook_score": 15, "retention_score": -3, "emotion_score": "7.5",
                          "completion_score": "high", "relatability_score": [1]});
        assert_eq!(extract_score(&data, "hook_score", 0.0), 10.0);
        assert_eq!(extract_score(&data, "retention_score", 0.0), 0.0);
        assert_eq!(extract_score(&data, "emotion_score", 0.0), 7.5);
        assert_eq!(extract_score(&data, "completion_score", 5.0), 5.0);
        assert_eq!(extract_score(&data, "relatability_score", 5.0), 5.0);
        assert_eq!(extract_score(&data, "missing", 5.0), 5.0);
    }

    #[test]
    fn clamp_is_idempotent_at_the_ceiling() {
        let over = extract_score(&json!({"x": 15}), "x", 0.0);
        let at = extract_score(&json!({"x": 10}), "x", 0.0);
        assert_eq!(over, at);
    }

    #[test]
    fn extended_mode_fills_missing_fields_with_five() {
        let scores = extract_component_scores(&json!({"hook_score": 9}), ScoreMode::Extended);
        assert_eq!(scores.hook_score, 9.0);
        assert_eq!(scores.retention_score, 5.0);
        assert_eq!(scores.novelty_score, Some(5.0));

        let base = default_component_scores(ScoreMode::Base);
        assert_eq!(base, ComponentScores::uniform(0.0));
    }

    #[test]
    fn aligns_by_id_then_position() {
        let by_id = vec![json!({"segment_id": 2, "hook_score": 2}), json!({"segment_id": 1})];
        let aligned = align_batch(&by_id, &[1, 2, 3]);
        assert_eq!(aligned[0], Some(&by_id[1]));
        assert_eq!(aligned[1], Some(&by_id[0]));
        assert_eq!(aligned[2], None);

        let positional = vec![json!({"hook_score": 1})];
        let aligned = align_batch(&positional, &[7, 8]);
        assert_eq!(aligned[0], Some(&positional[0]));
        assert_eq!(aligned[1], None);
    }

    #[test]
    fn notes_fall_back_to_neutral() {
        let notes = extract_judge_notes(&json!({"key_strengths": ["fast", 3], "suggested_title": " "}));
        assert_eq!(notes.key_strengths, vec!["fast"]);
        assert_eq!(notes.primary_emotion, "neutral");
        assert_eq!(notes.suggested_title, None);
    }
}
