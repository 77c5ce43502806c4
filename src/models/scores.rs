use serde::{Deserialize, Serialize};

/// Target publishing platform; drives the controversy weighting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Tiktok,
    Reels,
    Shorts,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Tiktok => "tiktok",
            Platform::Reels => "reels",
            Platform::Shorts => "shorts",
        }
    }
}

/// Externally judged 0–10 virality dimensions.
///
/// Values are clamped when extracted from judge output, so every field
/// held here is already in `[0, 10]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct ComponentScores {
    pub hook_score: f64,
    pub retention_score: f64,
    pub emotion_score: f64,
    pub completion_score: f64,
    pub relatability_score: f64,
    pub platform_fit_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub controversy_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub novelty_score: Option<f64>,
}

impl ComponentScores {
    pub const CORE_FIELDS: [&'static str; 6] = [
        "hook_score",
        "retention_score",
        "emotion_score",
        "completion_score",
        "relatability_score",
        "platform_fit_score",
    ];

    pub const EXTENDED_FIELDS: [&'static str; 2] = ["controversy_score", "novelty_score"];

    /// Uniform score across the six core fields, no extended fields.
    pub fn uniform(value: f64) -> Self {
        Self {
            hook_score: value,
            retention_score: value,
            emotion_score: value,
            completion_score: value,
            relatability_score: value,
            platform_fit_score: value,
            controversy_score: None,
            novelty_score: None,
        }
    }

    /// The six core scores in `CORE_FIELDS` order.
    pub fn core(&self) -> [f64; 6] {
        [
            self.hook_score,
            self.retention_score,
            self.emotion_score,
            self.completion_score,
            self.relatability_score,
            self.platform_fit_score,
        ]
    }

    pub fn controversy(&self) -> f64 {
        self.controversy_score.unwrap_or(0.0)
    }

    pub fn novelty(&self) -> f64 {
        self.novelty_score.unwrap_or(0.0)
    }
}

/// Free-form judge commentary carried through next to the scores.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct JudgeNotes {
    #[serde(default)]
    pub key_strengths: Vec<String>,
    #[serde(default)]
    pub key_weaknesses: Vec<String>,
    #[serde(default)]
    pub first_3_seconds: String,
    #[serde(default)]
    pub primary_emotion: String,
    #[serde(default)]
    pub optimal_platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_title: Option<String>,
}

/// Measured audio features for one candidate span.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AudioFeatures {
    pub mean_rms: f64,
    pub silence_ratio: f64,
    pub speech_rate: f64,
    pub viable: bool,
}

impl Default for AudioFeatures {
    /// Neutral features assumed when audio is unavailable.
    fn default() -> Self {
        Self {
            mean_rms: 0.0,
            silence_ratio: 0.5,
            speech_rate: 2.0,
            viable: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Viral,
    Maybe,
    Skip,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Viral => "viral",
            Verdict::Maybe => "maybe",
            Verdict::Skip => "skip",
        }
    }
}

/// Where a set of competitive scores came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CompetitiveSource {
    Judge,
    Heuristic,
}

/// Five-dimension head-to-head evaluation of a reconstructed clip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CompetitiveScores {
    pub scroll_stop_probability: f64,
    pub share_trigger: f64,
    pub debate_potential: f64,
    pub clarity: f64,
    pub ending_strength: f64,
    pub source: CompetitiveSource,
}
