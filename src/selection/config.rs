use serde::{Deserialize, Serialize};

/// Tunables for grouping micro candidates into playable clips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClusterConfig {
    /// Only members scoring at least this seed or extend a cluster
    pub strong_threshold: f64,
    /// Floor for a single weak member bridging two strong ones
    pub weak_threshold: f64,
    pub allow_one_weak: bool,
    /// Members closer than this (seconds) join the same cluster
    pub gap_secs: f64,
    pub min_duration_secs: f64,
    pub max_duration_secs: f64,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            strong_threshold: 6.0,
            weak_threshold: 5.2,
            allow_one_weak: true,
            gap_secs: 0.05,
            min_duration_secs: 10.0,
            max_duration_secs: 60.0,
        }
    }
}

/// Percentile, floor and count bounds for the final pick per source video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SelectionConfig {
    /// 0.85 keeps roughly the top 15%
    pub percentile: f64,
    /// Absolute floor on the 0–10 scale
    pub floor: f64,
    pub min_clips: usize,
    pub max_clips: usize,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            percentile: 0.85,
            floor: 4.5,
            min_clips: 2,
            max_clips: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OverlapConfig {
    /// Clips sharing more than this many seconds are duplicates
    pub max_overlap_secs: f64,
    /// Clips whose token-set Jaccard similarity reaches this are duplicates
    pub content_similarity: f64,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            max_overlap_secs: 5.0,
            content_similarity: 0.7,
        }
    }
}
