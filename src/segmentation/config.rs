use serde::{Deserialize, Serialize};

/// Tunable thresholds for candidate window generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Shortest sliding window tried at each position
    pub min_duration_secs: f64,

    /// Longest sliding window tried at each position
    pub max_duration_secs: f64,

    /// Increment between window start positions and between tried lengths
    pub step_secs: f64,

    /// Two windows sharing more than this fraction of the shorter one are duplicates
    pub dedup_overlap_threshold: f64,

    /// Open-loop merging never grows a segment past this
    pub max_merged_duration_secs: f64,

    /// Micro-segmenter window and hop
    pub micro_window_secs: f64,
    pub micro_hop_secs: f64,

    /// Micro windows with fewer words are skipped
    pub micro_min_words: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_duration_secs: 20.0,
            max_duration_secs: 55.0,
            step_secs: 3.0,
            dedup_overlap_threshold: 0.7,
            max_merged_duration_secs: 90.0,
            micro_window_secs: 5.0,
            micro_hop_secs: 2.5,
            micro_min_words: 3,
        }
    }
}
