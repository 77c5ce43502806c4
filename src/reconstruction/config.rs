use serde::{Deserialize, Serialize};

/// Competitive dimension weights; they sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompetitiveWeights {
    pub scroll_stop_probability: f64,
    pub share_trigger: f64,
    pub debate_potential: f64,
    pub clarity: f64,
    pub ending_strength: f64,
}

impl Default for CompetitiveWeights {
    fn default() -> Self {
        Self {
            scroll_stop_probability: 0.30,
            share_trigger: 0.20,
            debate_potential: 0.15,
            clarity: 0.20,
            ending_strength: 0.15,
        }
    }
}

/// Tunables for the sentence-recombination engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReconstructionConfig {
    /// Label for segments that carry no speaker
    pub default_speaker: String,
    /// Units considered per narrative role
    pub reorder_k: usize,
    pub min_duration_secs: f64,
    pub max_duration_secs: f64,
    pub coherence_threshold: f64,
    /// Share of units whose hook score sets the opening cutoff
    pub hook_top_fraction: f64,
    /// Cap on constraint survivors
    pub target_max_candidates: usize,
    /// Clips kept after competitive evaluation
    pub top_n: usize,
    pub competitive_weights: CompetitiveWeights,
}

impl Default for ReconstructionConfig {
    fn default() -> Self {
        Self {
            default_speaker: "speaker_0".to_string(),
            reorder_k: 5,
            min_duration_secs: 15.0,
            max_duration_secs: 60.0,
            coherence_threshold: 0.15,
            hook_top_fraction: 0.20,
            target_max_candidates: 50,
            top_n: 15,
            competitive_weights: CompetitiveWeights::default(),
        }
    }
}
