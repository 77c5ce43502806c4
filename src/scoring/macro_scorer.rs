const ENABLE_LOGS: bool = true;

use crate::log_info;
use crate::models::{Candidate, Platform};
use crate::scoring::calibrator::compute_platform_score;
use crate::scoring::config::ScoringConfig;
use crate::scoring::judge::{ask_json, Judge};
use crate::scoring::parser::{
    default_component_scores, extract_component_scores, extract_judge_notes, ScoreMode,
};
use crate::scoring::prompt::build_macro_prompt;
use crate::utils::text::round_to;

/// Judge each clustered clip as a whole and blend that view with its best
/// constituent micro score.
///
/// `blended_score = macro_weight · macro_text_score + micro_weight · best_micro_score`.
/// A failed or unusable judge reply scores every component 5.0.
pub fn score_macros(
    macros: &[Candidate],
    platform: Platform,
    judge: Option<&dyn Judge>,
    config: &ScoringConfig,
) -> Vec<Candidate> {
    let mut scored: Vec<Candidate> = macros
        .iter()
        .map(|macro_clip| {
            let reply = ask_json(judge, &build_macro_prompt(macro_clip), "score_macros");
            let scores = match &reply {
                Some(data) => extract_component_scores(data, ScoreMode::Extended),
                None => default_component_scores(ScoreMode::Extended),
            };
            let text_score = compute_platform_score(&scores, platform, &config.platform);
            let best_micro = macro_clip.best_micro_score.unwrap_or(0.0);

            let mut result = macro_clip.clone();
            result.scores = Some(scores);
            if let Some(notes) = reply.as_ref().map(extract_judge_notes) {
                if notes.suggested_title.is_some() {
                    result.judge_notes = Some(notes);
                }
            }
            result.macro_text_score = Some(text_score);
            result.blended_score = Some(round_to(
                text_score * config.macro_weight + best_micro * config.micro_weight,
                4,
            ));
            result
        })
        .collect();

    scored.sort_by(|a, b| {
        b.blended_score
            .unwrap_or(0.0)
            .total_cmp(&a.blended_score.unwrap_or(0.0))
    });

    log_info!("score_macros: scored {} macro candidates", scored.len());
    scored
}
