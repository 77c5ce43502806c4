//! Prompt builders for the external judge. Prompts ask only for component
//! scores; every final number is computed locally.

use std::fmt::Write;

use crate::models::Candidate;
use crate::scoring::parser::ScoreMode;

/// Greeting and housekeeping openings that must score hook 0–2.
pub const DEATH_SIGNALS: [&str; 10] = [
    "today we're going to",
    "in this video",
    "welcome back",
    "hey guys",
    "what's up everyone",
    "hello and welcome",
    "thanks for watching",
    "before we start",
    "let me introduce",
    "so basically what we're doing",
];

const CRITERIA: &str = "\
Rate each segment as a standalone short-form vertical video (0-10 per component):
- hook_score: does the first sentence stop the scroll?
- retention_score: does the middle keep attention without filler?
- emotion_score: how strongly does it make the viewer feel something?
- completion_score: does it land a complete thought or payoff?
- relatability_score: will viewers see themselves in it?
- platform_fit_score: pacing, length and tone for short-form feeds.
";

const EXTENDED_CRITERIA: &str = "\
- controversy_score: absolute language, challenges to common beliefs, moral framing.
- novelty_score: counter-intuitive or rarely heard angles.
- suggested_title: a punchy overlay headline of at most 6 words.
";

fn death_signal_instruction() -> String {
    let mut out = String::from(
        "DEATH SIGNALS: if the clip's first sentence matches any of these \
         greeting or informational openings, hook_score MUST be 0-2:\n",
    );
    for signal in DEATH_SIGNALS {
        let _ = writeln!(out, "  - \"{signal}\"");
    }
    out
}

/// Batch prompt listing each candidate by its `segment_id`.
pub fn build_batch_prompt(batch: &[(usize, &Candidate)], mode: ScoreMode) -> String {
    let mut prompt = format!(
        "Score the following {} video segment(s) for virality.\n\n{CRITERIA}",
        batch.len()
    );
    if mode == ScoreMode::Extended {
        prompt.push_str(EXTENDED_CRITERIA);
    }
    prompt.push('\n');
    prompt.push_str(&death_signal_instruction());

    for (segment_id, candidate) in batch {
        let _ = write!(
            prompt,
            "\n--- SEGMENT {segment_id} ---\nText: {}\nDuration: {:.1}s\n",
            candidate.text.trim(),
            candidate.duration
        );
    }

    prompt.push_str(
        "\nReturn ONLY valid JSON. No markdown. No explanation.\n\
         {\"segments\": [{\n  \"segment_id\": <int>,\n  \"hook_score\": <0-10>,\n  \
         \"retention_score\": <0-10>,\n  \"emotion_score\": <0-10>,\n  \
         \"completion_score\": <0-10>,\n  \"relatability_score\": <0-10>,\n  \
         \"platform_fit_score\": <0-10>,\n",
    );
    match mode {
        ScoreMode::Base => prompt.push_str(
            "  \"key_strengths\": [\"...\"],\n  \"key_weaknesses\": [\"...\"],\n  \
             \"first_3_seconds\": \"exact quote\",\n  \"primary_emotion\": \"neutral\",\n  \
             \"optimal_platform\": \"tiktok\"\n",
        ),
        ScoreMode::Extended => prompt.push_str(
            "  \"controversy_score\": <0-10>,\n  \"novelty_score\": <0-10>,\n  \
             \"suggested_title\": \"max 6 words\"\n",
        ),
    }
    prompt.push_str("}]}\nDo NOT compute a final score or verdict.\n");
    prompt
}

/// Single-object prompt for one clustered clip.
pub fn build_macro_prompt(candidate: &Candidate) -> String {
    format!(
        "Score this {:.1}s video clip for virality.\n\n{CRITERIA}{EXTENDED_CRITERIA}\n\
         Transcript:\n{}\n\n\
         Return ONLY valid JSON. No markdown. No explanation.\n\
         {{\"hook_score\": <0-10>, \"retention_score\": <0-10>, \"emotion_score\": <0-10>, \
         \"completion_score\": <0-10>, \"relatability_score\": <0-10>, \
         \"platform_fit_score\": <0-10>, \"controversy_score\": <0-10>, \
         \"novelty_score\": <0-10>, \"suggested_title\": \"max 6 words\"}}\n\
         Do NOT compute a final score.\n",
        candidate.duration,
        candidate.text.trim()
    )
}

/// Head-to-head prompt over reconstructed clips, one `--- CLIP n ---` block
/// per clip.
pub fn build_competitive_prompt(batch: &[(usize, &Candidate)]) -> String {
    let mut prompt = format!(
        "These {} short clips compete for the same feed slot. Score each one 0-10 on:\n\
         - scroll_stop_probability: would a viewer stop scrolling?\n\
         - share_trigger: how likely is it to be shared?\n\
         - debate_potential: will it spark comments or disagreement?\n\
         - clarity: is the message clear and punchy?\n\
         - ending_strength: does it end on a memorable line?\n",
        batch.len()
    );
    for (clip_id, candidate) in batch {
        let _ = write!(
            prompt,
            "\n--- CLIP {clip_id} ---\nText: {}\nDuration: {:.1}s\n",
            candidate.text.trim(),
            candidate.duration
        );
    }
    prompt.push_str(
        "\nReturn ONLY valid JSON. No markdown. No explanation.\n\
         {\"segments\": [{\"segment_id\": <clip number>, \"scroll_stop_probability\": <0-10>, \
         \"share_trigger\": <0-10>, \"debate_potential\": <0-10>, \"clarity\": <0-10>, \
         \"ending_strength\": <0-10>}]}\n",
    );
    prompt
}
