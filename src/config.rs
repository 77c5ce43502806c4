use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::models::Platform;
use crate::packaging::PackagingConfig;
use crate::reconstruction::ReconstructionConfig;
use crate::scoring::ScoringConfig;
use crate::segmentation::SegmentationConfig;
use crate::selection::{ClusterConfig, OverlapConfig, SelectionConfig};

/// Which candidate source feeds selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// Fixed micro windows, clustered into macro clips
    #[default]
    Micro,
    /// Overlapping sentence-snapped windows
    Sliding,
    /// Clips assembled from non-adjacent sentences
    Reconstruct,
}

impl PipelineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineMode::Micro => "micro",
            PipelineMode::Sliding => "sliding",
            PipelineMode::Reconstruct => "reconstruct",
        }
    }
}

/// Every stage's tunables in one value, passed down by reference.
///
/// Any field missing from a config file keeps its default, so a file only
/// needs to name what it changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub mode: PipelineMode,
    pub platform: Platform,
    /// Candidates per judge prompt
    pub judge_batch_size: usize,
    pub segmentation: SegmentationConfig,
    pub scoring: ScoringConfig,
    pub cluster: ClusterConfig,
    pub selection: SelectionConfig,
    pub overlap: OverlapConfig,
    pub reconstruction: ReconstructionConfig,
    pub packaging: PackagingConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: PipelineMode::default(),
            platform: Platform::default(),
            judge_batch_size: 5,
            segmentation: SegmentationConfig::default(),
            scoring: ScoringConfig::default(),
            cluster: ClusterConfig::default(),
            selection: SelectionConfig::default(),
            overlap: OverlapConfig::default(),
            reconstruction: ReconstructionConfig::default(),
            packaging: PackagingConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse pipeline config JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize pipeline config")
    }
}
