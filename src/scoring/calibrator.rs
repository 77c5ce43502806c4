//! Deterministic conversion of judged component scores into one number.
//!
//! The judge only ever supplies 0–10 components. Every formula here is a
//! pure function of those components, the clip duration and the config,
//! so identical inputs always produce identical scores.

use crate::models::{AudioFeatures, ComponentScores, Platform};
use crate::scoring::config::{AudioBonusConfig, CalibrationConfig, PlatformScoringConfig};
use crate::utils::text::round_to;

/// Bonus for how many of the six core components reach `threshold`.
pub fn peak_bonus(scores: &ComponentScores, threshold: f64) -> f64 {
    let peaks = scores.core().iter().filter(|&&s| s >= threshold).count();
    match peaks {
        0..=1 => 0.0,
        2 => 1.0,
        3 => 3.0,
        _ => 5.0,
    }
}

/// Integer 0–100 score.
///
/// Weighted sum with hook and retention overweighted, scaled by 10, plus the
/// peak-density bonus. Low hook or low emotion caps the result, long clips
/// pay a flat penalty, and the result is clamped and rounded.
pub fn compute_final_score(
    scores: &ComponentScores,
    duration_secs: f64,
    config: &CalibrationConfig,
) -> u32 {
    let w = &config.weights;
    let base = scores.hook_score * w.hook * config.hook_multiplier
        + scores.retention_score * w.retention * config.retention_multiplier
        + scores.emotion_score * w.emotion
        + scores.completion_score * w.completion
        + scores.relatability_score * w.relatability
        + scores.platform_fit_score * w.platform_fit;

    let mut score = base * 10.0 + peak_bonus(scores, config.peak_threshold);

    if scores.hook_score < config.hook_floor {
        score = score.min(config.hook_cap);
    }
    if scores.emotion_score < config.emotion_floor {
        score = score.min(config.emotion_cap);
    }
    if duration_secs > config.max_duration_secs {
        score -= config.duration_penalty;
    }

    score.clamp(0.0, 100.0).round() as u32
}

/// Platform-aware float score: weighted average plus a controversy boost,
/// scaled by `1 + novelty / 100`. Rounded to 4 decimals, not clamped.
pub fn compute_platform_score(
    scores: &ComponentScores,
    platform: Platform,
    config: &PlatformScoringConfig,
) -> f64 {
    let base = config.weights.weighted_sum(scores);
    let boost = scores.controversy() * config.controversy_weight(platform);
    let novelty_multiplier = 1.0 + scores.novelty() / 100.0;
    round_to((base + boost) * novelty_multiplier, 4)
}

/// Normalised audio bonus in `[0, 1]`.
pub fn audio_bonus(features: &AudioFeatures, config: &AudioBonusConfig) -> f64 {
    let energy = (features.mean_rms / config.high_energy_rms).min(1.0);
    let silence = (1.0 - features.silence_ratio).max(0.0);
    let rate = (features.speech_rate / config.high_speech_rate_wps).min(1.0);
    energy * config.energy_weight + silence * config.silence_weight + rate * config.rate_weight
}

/// Text score blended with the audio bonus on the same 0–10 scale.
pub fn compute_composite_score(
    scores: &ComponentScores,
    features: &AudioFeatures,
    platform: Platform,
    platform_config: &PlatformScoringConfig,
    audio_config: &AudioBonusConfig,
) -> f64 {
    let text = compute_platform_score(scores, platform, platform_config);
    let bonus = audio_bonus(features, audio_config);
    round_to(
        text * audio_config.text_weight + bonus * 10.0 * audio_config.audio_weight,
        4,
    )
}
