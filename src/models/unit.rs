use serde::{Deserialize, Serialize};

/// One sentence-level slice of the transcript.
///
/// `index` is dense and 0-based across the whole transcript; it is the only
/// identity later phases rely on for ordering and deduplication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AtomicUnit {
    pub index: usize,
    pub text: String,
    pub start: f64,
    pub end: f64,
    pub speaker: String,
    pub word_count: usize,
}

impl AtomicUnit {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Pattern-bank scores for one sentence, each in `[0, 10]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct SentenceScores {
    pub hook_score: f64,
    pub emotional_charge: f64,
    pub claim_strength: f64,
    pub identity_trigger: f64,
    pub energy_score: f64,
    pub delivery_intensity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredUnit {
    #[serde(flatten)]
    pub unit: AtomicUnit,
    #[serde(flatten)]
    pub scores: SentenceScores,
}

impl ScoredUnit {
    pub fn index(&self) -> usize {
        self.unit.index
    }
}
