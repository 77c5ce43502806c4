use serde::{Deserialize, Serialize};

use crate::models::{ComponentScores, Platform};

/// Per-component weights for a weighted sum over the six core scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ComponentWeights {
    pub hook: f64,
    pub retention: f64,
    pub emotion: f64,
    pub completion: f64,
    pub relatability: f64,
    pub platform_fit: f64,
}

impl ComponentWeights {
    pub fn weighted_sum(&self, scores: &ComponentScores) -> f64 {
        scores.hook_score * self.hook
            + scores.retention_score * self.retention
            + scores.emotion_score * self.emotion
            + scores.completion_score * self.completion
            + scores.relatability_score * self.relatability
            + scores.platform_fit_score * self.platform_fit
    }

    /// Weights used by the platform-aware score (relatability ahead of completion).
    pub fn platform_defaults() -> Self {
        Self {
            relatability: 0.10,
            completion: 0.05,
            ..Self::default()
        }
    }
}

impl Default for ComponentWeights {
    fn default() -> Self {
        Self {
            hook: 0.35,
            retention: 0.25,
            emotion: 0.20,
            completion: 0.10,
            relatability: 0.05,
            platform_fit: 0.05,
        }
    }
}

/// Tunables for the integer 0–100 final score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalibrationConfig {
    pub weights: ComponentWeights,

    /// Early-funnel overweighting; the other components use 1.0
    pub hook_multiplier: f64,
    pub retention_multiplier: f64,

    /// Below these floors the score is capped
    pub hook_floor: f64,
    pub emotion_floor: f64,
    pub hook_cap: f64,
    pub emotion_cap: f64,

    /// Flat penalty for clips longer than `max_duration_secs`
    pub max_duration_secs: f64,
    pub duration_penalty: f64,

    /// A component at or above this counts toward the peak-density bonus
    pub peak_threshold: f64,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            weights: ComponentWeights::default(),
            hook_multiplier: 1.5,
            retention_multiplier: 1.2,
            hook_floor: 4.0,
            emotion_floor: 3.0,
            hook_cap: 45.0,
            emotion_cap: 45.0,
            max_duration_secs: 60.0,
            duration_penalty: 20.0,
            peak_threshold: 7.0,
        }
    }
}

/// Tunables for the platform-aware float score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlatformScoringConfig {
    pub weights: ComponentWeights,
    pub tiktok_controversy_weight: f64,
    pub reels_controversy_weight: f64,
    pub shorts_controversy_weight: f64,
}

impl PlatformScoringConfig {
    pub fn controversy_weight(&self, platform: Platform) -> f64 {
        match platform {
            Platform::Tiktok => self.tiktok_controversy_weight,
            Platform::Reels => self.reels_controversy_weight,
            Platform::Shorts => self.shorts_controversy_weight,
        }
    }
}

impl Default for PlatformScoringConfig {
    fn default() -> Self {
        Self {
            weights: ComponentWeights::platform_defaults(),
            tiktok_controversy_weight: 0.3,
            reels_controversy_weight: 0.2,
            shorts_controversy_weight: 0.1,
        }
    }
}

/// Audio bonus normalisation and the text/audio composite split.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioBonusConfig {
    pub text_weight: f64,
    pub audio_weight: f64,

    /// Sub-weights of the audio bonus; they sum to 1.0
    pub energy_weight: f64,
    pub silence_weight: f64,
    pub rate_weight: f64,

    /// RMS treated as full energy
    pub high_energy_rms: f64,
    /// Words per second treated as full pace
    pub high_speech_rate_wps: f64,
}

impl Default for AudioBonusConfig {
    fn default() -> Self {
        Self {
            text_weight: 0.7,
            audio_weight: 0.3,
            energy_weight: 0.5,
            silence_weight: 0.3,
            rate_weight: 0.2,
            high_energy_rms: 0.1,
            high_speech_rate_wps: 4.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub calibration: CalibrationConfig,
    pub platform: PlatformScoringConfig,
    pub audio: AudioBonusConfig,

    /// Composite scores below this are dropped by `rank`
    pub composite_threshold: f64,

    /// Blend of the macro text score and the best constituent micro score
    pub macro_weight: f64,
    pub micro_weight: f64,

    /// Rank fractions for the viral / maybe verdicts
    pub viral_fraction: f64,
    pub maybe_fraction: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            calibration: CalibrationConfig::default(),
            platform: PlatformScoringConfig::default(),
            audio: AudioBonusConfig::default(),
            composite_threshold: 4.5,
            macro_weight: 0.6,
            micro_weight: 0.4,
            viral_fraction: 0.15,
            maybe_fraction: 0.40,
        }
    }
}
