use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A single timed token from a word-level transcript.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Word {
    #[serde(alias = "word")]
    pub text: String,
    pub start: f64,
    pub end: f64,
}

impl Word {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub words: Vec<Word>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
}

impl TranscriptSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            text: text.into(),
            words: Vec::new(),
            speaker: None,
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Whisper-style transcript: segments in non-decreasing start order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Transcript {
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self { segments }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse transcript JSON")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read transcript from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse transcript {}", path.display()))
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Word stream across all segments, in transcript order.
    pub fn words(&self) -> Vec<Word> {
        self.segments
            .iter()
            .flat_map(|seg| seg.words.iter().cloned())
            .collect()
    }

    pub fn has_word_timestamps(&self) -> bool {
        self.segments.iter().any(|seg| !seg.words.is_empty())
    }
}
