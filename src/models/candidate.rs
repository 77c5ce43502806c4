use serde::{Deserialize, Serialize};

use super::packaging::Packaging;
use super::scores::{AudioFeatures, CompetitiveScores, ComponentScores, JudgeNotes, Verdict};
use super::transcript::Word;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    SlidingWindow,
    Micro,
    Macro,
    Reconstructed,
}

impl CandidateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateKind::SlidingWindow => "sliding_window",
            CandidateKind::Micro => "micro",
            CandidateKind::Macro => "macro",
            CandidateKind::Reconstructed => "reconstructed",
        }
    }
}

/// Boundary and pacing measurements taken when a sliding window is cut.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WindowMetrics {
    /// 1.0 for a clean sentence-to-sentence window, otherwise 0.5.
    pub boundary_quality: f64,
    pub pace_wps: f64,
    pub opening_pace_wps: f64,
    pub slow_start: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum NarrativePattern {
    HookContextPunchline,
    ClaimDataStronger,
    PunchlineExplanationReinforcement,
}

impl NarrativePattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            NarrativePattern::HookContextPunchline => "hook_context_punchline",
            NarrativePattern::ClaimDataStronger => "claim_data_stronger",
            NarrativePattern::PunchlineExplanationReinforcement => {
                "punchline_explanation_reinforcement"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReconstructionMeta {
    pub pattern: NarrativePattern,
    pub pattern_score: f64,
    pub is_contiguous: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook_score_first: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_score_last: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coherence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint_score: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecutSource {
    MidSegment,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HookMetadata {
    pub hook_found: bool,
    pub hook_timestamp: f64,
    pub recut_applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recut_source: Option<RecutSource>,
}

/// Which score field a ranking or selection step reads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKey {
    Final,
    Composite,
    Blended,
    Competitive,
}

impl ScoreKey {
    /// Multiplier from the 0–10 scale used by selection floors to this
    /// key's native scale.
    pub fn floor_scale(&self) -> f64 {
        match self {
            ScoreKey::Final => 10.0,
            _ => 1.0,
        }
    }
}

/// A scored, time-bounded transcript slice considered for publication.
///
/// Stages never mutate a candidate they receive; each returns a new value
/// derived from its input, carrying `segment_id`, `unit_indices` and
/// `micro_segments` back to the source material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub kind: CandidateKind,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<Word>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<ComponentScores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub judge_notes: Option<JudgeNotes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_features: Option<AudioFeatures>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composite_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macro_text_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blended_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub micro_segments: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_micro_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_micro_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unit_indices: Vec<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconstruction: Option<ReconstructionMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitive: Option<CompetitiveScores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitive_score: Option<f64>,
    #[serde(default)]
    pub low_confidence: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hook: Option<HookMetadata>,
    #[serde(default)]
    pub recut_failed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub packaging: Option<Packaging>,
}

impl Candidate {
    pub fn new(
        id: impl Into<String>,
        kind: CandidateKind,
        start: f64,
        end: f64,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            start,
            end,
            duration: end - start,
            text: text.into(),
            words: Vec::new(),
            segment_id: None,
            segment_count: None,
            window: None,
            scores: None,
            judge_notes: None,
            audio_features: None,
            final_score: None,
            composite_score: None,
            macro_text_score: None,
            blended_score: None,
            verdict: None,
            micro_segments: Vec::new(),
            best_micro_score: None,
            avg_micro_score: None,
            unit_indices: Vec::new(),
            reconstruction: None,
            competitive: None,
            competitive_score: None,
            low_confidence: false,
            hook: None,
            recut_failed: false,
            packaging: None,
        }
    }

    /// The value of `key`, or 0.0 when that stage has not run.
    pub fn score(&self, key: ScoreKey) -> f64 {
        let value = match key {
            ScoreKey::Final => self.final_score,
            ScoreKey::Composite => self.composite_score,
            ScoreKey::Blended => self.blended_score,
            ScoreKey::Competitive => self.competitive_score,
        };
        value.unwrap_or(0.0)
    }

    pub fn overlap_secs(&self, other: &Candidate) -> f64 {
        (self.end.min(other.end) - self.start.max(other.start)).max(0.0)
    }

    pub fn is_contiguous(&self) -> bool {
        self.reconstruction
            .map(|meta| meta.is_contiguous)
            .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_stage_scores_read_as_zero() {
        let mut candidate = Candidate::new("micro-1", CandidateKind::Micro, 0.0, 5.0, "x y z");
        assert_eq!(candidate.score(ScoreKey::Composite), 0.0);
        candidate.composite_score = Some(6.2);
        assert_eq!(candidate.score(ScoreKey::Composite), 6.2);
        assert_eq!(candidate.duration, 5.0);
    }

    #[test]
    fn overlap_is_never_negative() {
        let a = Candidate::new("a", CandidateKind::Micro, 0.0, 5.0, "");
        let b = Candidate::new("b", CandidateKind::Micro, 3.0, 9.0, "");
        let c = Candidate::new("c", CandidateKind::Micro, 10.0, 12.0, "");
        assert_eq!(a.overlap_secs(&b), 2.0);
        assert_eq!(a.overlap_secs(&c), 0.0);
    }

    #[test]
    fn serialises_kind_in_snake_case() {
        let candidate = Candidate::new("win-0", CandidateKind::SlidingWindow, 0.0, 1.0, "");
        let json = serde_json::to_value(&candidate).unwrap();
        assert_eq!(json["kind"], "sliding_window");
        assert!(json.get("scores").is_none());
    }
}
