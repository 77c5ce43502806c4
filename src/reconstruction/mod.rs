//! Sentence-level reconstruction: clips assembled from the strongest,
//! possibly non-adjacent sentences of a transcript.
//!
//! Phases run in a fixed order: atomic units, sentence scoring, pattern
//! reordering, constraints, competitive evaluation. Any phase that comes
//! back empty ends the run with no clips.

const ENABLE_LOGS: bool = true;

pub mod atomic_units;
pub mod competitive;
pub mod config;
pub mod constraints;
pub mod reorder;
pub mod sentence_scorer;

pub use atomic_units::build_atomic_units;
pub use competitive::{competitive_evaluate, heuristic_scores};
pub use config::{CompetitiveWeights, ReconstructionConfig};
pub use constraints::{apply_constraints, coherence_score, hook_cutoff};
pub use reorder::generate_candidates;
pub use sentence_scorer::{score_sentence, score_units};

use crate::models::{Candidate, Transcript};
use crate::scoring::judge::Judge;
use crate::{log_info, log_warn};

/// Clips from one reconstruction run plus how many items each phase produced.
#[derive(Debug, Clone, Default)]
pub struct Reconstruction {
    pub units: usize,
    pub assembled: usize,
    pub constrained: usize,
    pub clips: Vec<Candidate>,
}

pub fn reconstruct_clips(
    transcript: &Transcript,
    judge: Option<&dyn Judge>,
    config: &ReconstructionConfig,
) -> Reconstruction {
    let mut outcome = Reconstruction::default();

    let units = build_atomic_units(transcript, &config.default_speaker);
    outcome.units = units.len();
    if units.is_empty() {
        log_warn!("reconstruct_clips: no sentence units");
        return outcome;
    }

    let scored = score_units(&units);
    let assembled = generate_candidates(&scored, config.reorder_k);
    outcome.assembled = assembled.len();
    if assembled.is_empty() {
        return outcome;
    }

    let constrained = apply_constraints(&assembled, &scored, config);
    outcome.constrained = constrained.len();
    if constrained.is_empty() {
        log_warn!("reconstruct_clips: nothing survived the clip constraints");
        return outcome;
    }

    outcome.clips = competitive_evaluate(&constrained, judge, config);
    for (rank, clip) in outcome.clips.iter().enumerate() {
        log_info!(
            "  {}. [{}] {:.1}-{:.1}s ({:.1}s) score={:.3}",
            rank + 1,
            clip.reconstruction
                .map(|meta| meta.pattern.as_str())
                .unwrap_or("?"),
            clip.start,
            clip.end,
            clip.duration,
            clip.competitive_score.unwrap_or(0.0)
        );
    }
    log_info!(
        "reconstruct_clips: {} units → {} assembled → {} constrained → {} clips",
        outcome.units,
        outcome.assembled,
        outcome.constrained,
        outcome.clips.len()
    );
    outcome
}
