mod candidate;
mod packaging;
mod scores;
mod transcript;
mod unit;

pub use candidate::{
    Candidate, CandidateKind, HookMetadata, NarrativePattern, ReconstructionMeta, RecutSource,
    ScoreKey, WindowMetrics,
};
pub use packaging::{CtaType, Packaging, SubtitleSpec, Variant, VariantType};
pub use scores::{
    AudioFeatures, CompetitiveScores, CompetitiveSource, ComponentScores, JudgeNotes, Platform,
    Verdict,
};
pub use transcript::{Transcript, TranscriptSegment, Word};
pub use unit::{AtomicUnit, ScoredUnit, SentenceScores};
