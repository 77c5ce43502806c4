//! The external judge boundary and batch scoring against it.
//!
//! The judge is an injected strategy: anything that maps a prompt to raw
//! text. Its output is untrusted. A failing call or an unusable response
//! degrades to per-field defaults for the affected batch and never escapes
//! this module as an error.

const ENABLE_LOGS: bool = true;

use anyhow::Result;
use serde_json::Value;

use crate::models::{Candidate, ScoreKey, Verdict};
use crate::scoring::calibrator::compute_final_score;
use crate::scoring::config::ScoringConfig;
use crate::scoring::parser::{
    align_batch, batch_entries, default_component_scores, extract_component_scores,
    extract_judge_notes, fallback_judge_notes, parse_json_object, ScoreMode,
};
use crate::scoring::prompt::build_batch_prompt;
use crate::{log_error, log_info, log_warn};

/// External scorer: prompt in, raw text out.
pub trait Judge: Send + Sync {
    fn judge(&self, prompt: &str) -> Result<String>;
}

impl<F> Judge for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn judge(&self, prompt: &str) -> Result<String> {
        self(prompt)
    }
}

/// Ask the judge and parse the first JSON object of its reply.
///
/// `None` when there is no judge, the call fails, or nothing parses.
pub fn ask_json(judge: Option<&dyn Judge>, prompt: &str, stage: &str) -> Option<Value> {
    let judge = judge?;
    let raw = match judge.judge(prompt) {
        Ok(raw) => raw,
        Err(err) => {
            log_error!("{}: judge call failed: {:#}", stage, err);
            return None;
        }
    };
    match parse_json_object(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            log_warn!("{}: unusable judge response: {:#}", stage, err);
            None
        }
    }
}

/// Id used to align a candidate with its entry in a batch response.
fn batch_id(candidate: &Candidate, position: usize) -> usize {
    candidate.segment_id.unwrap_or(position + 1)
}

/// Score candidates in fixed-size batches.
///
/// `Base` mode attaches six component scores, judge notes and the integer
/// `final_score`. `Extended` mode attaches eight component scores and, when
/// the judge proposes one, a suggested title. Missing entries and failed
/// batches take the mode's default scores.
pub fn score_batch(
    candidates: &[Candidate],
    judge: Option<&dyn Judge>,
    mode: ScoreMode,
    batch_size: usize,
    config: &ScoringConfig,
) -> Vec<Candidate> {
    if candidates.is_empty() {
        return Vec::new();
    }
    if judge.is_none() {
        log_warn!(
            "score_batch: no judge configured, assigning default scores to {} candidates",
            candidates.len()
        );
    }

    let mut scored = Vec::with_capacity(candidates.len());
    for chunk in candidates.chunks(batch_size.max(1)) {
        let offset = scored.len();
        let ids: Vec<usize> = chunk
            .iter()
            .enumerate()
            .map(|(i, c)| batch_id(c, offset + i))
            .collect();
        let batch: Vec<(usize, &Candidate)> = ids.iter().copied().zip(chunk.iter()).collect();

        let prompt = build_batch_prompt(&batch, mode);
        let entries = ask_json(judge, &prompt, "score_batch")
            .map(|data| batch_entries(&data))
            .unwrap_or_default();
        let aligned = align_batch(&entries, &ids);

        for (candidate, entry) in chunk.iter().zip(aligned) {
            scored.push(apply_entry(candidate, entry, mode, config));
        }
    }

    log_info!("score_batch: scored {} candidates", scored.len());
    scored
}

fn apply_entry(
    candidate: &Candidate,
    entry: Option<&Value>,
    mode: ScoreMode,
    config: &ScoringConfig,
) -> Candidate {
    let mut result = candidate.clone();
    let scores = match entry {
        Some(data) => extract_component_scores(data, mode),
        None => default_component_scores(mode),
    };
    result.scores = Some(scores);

    match mode {
        ScoreMode::Base => {
            result.judge_notes = Some(entry.map_or_else(fallback_judge_notes, extract_judge_notes));
            result.final_score = Some(match entry {
                Some(_) => {
                    compute_final_score(&scores, candidate.duration, &config.calibration) as f64
                }
                None => 0.0,
            });
        }
        ScoreMode::Extended => {
            if let Some(data) = entry {
                let notes = extract_judge_notes(data);
                if notes.suggested_title.is_some() {
                    result.judge_notes = Some(notes);
                }
            }
        }
    }
    result
}

/// Sort by `final_score` and assign verdicts by rank fraction `i / n`.
pub fn rank_verdicts(candidates: &[Candidate], config: &ScoringConfig) -> Vec<Candidate> {
    let mut ranked = candidates.to_vec();
    ranked.sort_by(|a, b| b.score(ScoreKey::Final).total_cmp(&a.score(ScoreKey::Final)));

    let total = ranked.len() as f64;
    for (i, candidate) in ranked.iter_mut().enumerate() {
        let fraction = i as f64 / total;
        candidate.verdict = Some(if fraction <= config.viral_fraction {
            Verdict::Viral
        } else if fraction <= config.maybe_fraction {
            Verdict::Maybe
        } else {
            Verdict::Skip
        });
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateKind, ComponentScores};
    use anyhow::anyhow;

    fn windows(n: usize) -> Vec<Candidate> {
        (0..n)
            .map(|i| {
                Candidate::new(
                    format!("win-{i}"),
                    CandidateKind::SlidingWindow,
                    i as f64 * 10.0,
                    i as f64 * 10.0 + 30.0,
                    format!("Window {i}."),
                )
            })
            .collect()
    }

    #[test]
    fn base_mode_attaches_final_score_and_notes() {
        let judge = |_: &str| -> Result<String> {
            Ok(r#"```json
{"segments": [{"segment_id": 1, "hook_score": 8, "retention_score": 7, "emotion_score": 7,
  "completion_score": 7, "relatability_score": 6, "platform_fit_score": 6,
  "primary_emotion": "shock"}]}
```"#
                .to_string())
        };
        let scored = score_batch(&windows(1), Some(&judge), ScoreMode::Base, 5, &ScoringConfig::default());
        assert_eq!(scored[0].final_score, Some(95.0));
        assert_eq!(scored[0].judge_notes.as_ref().unwrap().primary_emotion, "shock");
    }

    #[test]
    fn failing_judge_degrades_to_defaults() {
        let judge = |_: &str| -> Result<String> { Err(anyhow!("timeout")) };
        let scored = score_batch(&windows(3), Some(&judge), ScoreMode::Extended, 2, &ScoringConfig::default());
        assert_eq!(scored.len(), 3);
        for candidate in &scored {
            let scores = candidate.scores.unwrap();
            assert_eq!(scores.hook_score, 5.0);
            assert_eq!(scores.controversy_score, Some(5.0));
        }
    }

    #[test]
    fn missing_entries_in_base_mode_score_zero() {
        let judge = |_: &str| -> Result<String> { Ok(r#"{"segments": []}"#.to_string()) };
        let scored = score_batch(&windows(2), Some(&judge), ScoreMode::Base, 5, &ScoringConfig::default());
        assert_eq!(scored[1].final_score, Some(0.0));
        assert_eq!(scored[1].scores, Some(ComponentScores::uniform(0.0)));
        assert_eq!(
            scored[1].judge_notes.as_ref().unwrap().key_weaknesses,
            vec!["AI scoring failed"]
        );
    }

    #[test]
    fn verdicts_follow_rank_fraction() {
        let mut candidates = windows(10);
        for (i, c) in candidates.iter_mut().enumerate() {
            c.final_score = Some(i as f64 * 10.0);
        }
        let ranked = rank_verdicts(&candidates, &ScoringConfig::default());
        assert_eq!(ranked[0].final_score, Some(90.0));
        let verdicts: Vec<Verdict> = ranked.iter().map(|c| c.verdict.unwrap()).collect();
        assert_eq!(verdicts[..2], [Verdict::Viral, Verdict::Viral]);
        assert_eq!(verdicts[2..5], [Verdict::Maybe, Verdict::Maybe, Verdict::Maybe]);
        assert!(verdicts[5..].iter().all(|v| *v == Verdict::Skip));
    }
}
