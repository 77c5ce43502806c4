use serde::{Deserialize, Serialize};

use crate::models::SubtitleSpec;

/// Timing rules for the opening-hook check and the mid-clip recut.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HookConfig {
    /// An interrupt must fire within this many seconds of the clip start
    pub hook_window_secs: f64,
    /// A plain non-filler word counts only before this offset
    pub first_word_secs: f64,
    /// Recut starts this far ahead of the peak
    pub pre_hook_buffer_secs: f64,
    /// Shorter clips are never recut
    pub min_recut_source_secs: f64,
    pub min_clip_secs: f64,
    pub max_clip_secs: f64,
    /// Recut length used when the first attempt comes out too short
    pub preferred_min_secs: f64,
    /// Half-width of the window scored around each sample point
    pub peak_window_secs: f64,
    pub peak_step_secs: f64,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            hook_window_secs: 2.0,
            first_word_secs: 1.5,
            pre_hook_buffer_secs: 1.6,
            min_recut_source_secs: 10.0,
            min_clip_secs: 15.0,
            max_clip_secs: 26.0,
            preferred_min_secs: 18.0,
            peak_window_secs: 1.0,
            peak_step_secs: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PackagingConfig {
    pub hook: HookConfig,
    pub subtitle: SubtitleSpec,
    pub cta_frame_duration: f64,
    /// Judge titles longer than this fall back to a headline from the clip
    pub max_title_words: usize,
    pub headline_words: usize,
    /// Controversy above this makes Contrarian primary
    pub contrarian_threshold: f64,
    pub relatable_emotion_threshold: f64,
    pub relatable_relatability_threshold: f64,
    /// Novelty above this turns the fallback headline into a question
    pub question_threshold: f64,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            hook: HookConfig::default(),
            subtitle: SubtitleSpec::default(),
            cta_frame_duration: 1.5,
            max_title_words: 8,
            headline_words: 6,
            contrarian_threshold: 7.0,
            relatable_emotion_threshold: 7.0,
            relatable_relatability_threshold: 6.0,
            question_threshold: 6.0,
        }
    }
}
