pub mod audio;
pub mod calibrator;
pub mod config;
pub mod judge;
pub mod macro_scorer;
pub mod parser;
pub mod prompt;
pub mod ranker;

pub use audio::{attach_audio_features, extract_features, AudioTrack};
pub use calibrator::{
    audio_bonus, compute_composite_score, compute_final_score, compute_platform_score, peak_bonus,
};
pub use config::{
    AudioBonusConfig, CalibrationConfig, ComponentWeights, PlatformScoringConfig, ScoringConfig,
};
pub use judge::{rank_verdicts, score_batch, Judge};
pub use macro_scorer::score_macros;
pub use parser::{extract_score, parse_json_object, ScoreMode};
pub use ranker::rank;
