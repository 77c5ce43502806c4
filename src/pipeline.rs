//! End-to-end orchestration: one transcript in, one report of packaged
//! clips out.

const ENABLE_LOGS: bool = true;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{PipelineConfig, PipelineMode};
use crate::models::{Candidate, Platform, ScoreKey, Transcript};
use crate::packaging::{enforce_hook, enforce_hooks, package_clips};
use crate::reconstruction::reconstruct_clips;
use crate::scoring::{
    attach_audio_features, rank, rank_verdicts, score_batch, score_macros, AudioTrack, Judge,
    ScoreMode,
};
use crate::segmentation::{build_sliding_windows, deduplicate_windows, micro_segment, snap_candidate};
use crate::selection::{merge_clusters, remove_overlapping_clips, select_clips};
use crate::{log_info, log_warn};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StageCount {
    pub stage: String,
    pub count: usize,
}

/// Everything one run produced. `run_id` and `generated_at` identify the
/// run and never feed a score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub mode: PipelineMode,
    pub platform: Platform,
    pub stages: Vec<StageCount>,
    pub clips: Vec<Candidate>,
}

impl PipelineReport {
    /// Item count recorded for a stage, if that stage ran.
    pub fn stage(&self, name: &str) -> Option<usize> {
        self.stages.iter().find(|s| s.stage == name).map(|s| s.count)
    }
}

#[derive(Default)]
struct StageLog(Vec<StageCount>);

impl StageLog {
    fn record(&mut self, stage: &str, items: &[Candidate]) {
        self.record_count(stage, items.len());
    }

    fn record_count(&mut self, stage: &str, count: usize) {
        self.0.push(StageCount {
            stage: stage.to_string(),
            count,
        });
    }
}

pub struct ClipPipeline {
    config: PipelineConfig,
    judge: Option<Box<dyn Judge>>,
}

impl ClipPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            judge: None,
        }
    }

    pub fn with_judge(mut self, judge: impl Judge + 'static) -> Self {
        self.judge = Some(Box::new(judge));
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn judge(&self) -> Option<&dyn Judge> {
        self.judge.as_deref()
    }

    /// Run every stage of the configured mode in order.
    ///
    /// An empty transcript, or a stage that produces nothing, yields a
    /// report with no clips rather than an error.
    pub fn run(&self, transcript: &Transcript, audio: Option<&AudioTrack>) -> PipelineReport {
        let mut stages = StageLog::default();
        let clips = if transcript.is_empty() {
            log_warn!("ClipPipeline: empty transcript");
            Vec::new()
        } else {
            match self.config.mode {
                PipelineMode::Micro => self.run_micro(transcript, audio, &mut stages),
                PipelineMode::Sliding => self.run_sliding(transcript, &mut stages),
                PipelineMode::Reconstruct => self.run_reconstruct(transcript, &mut stages),
            }
        };

        log_info!(
            "ClipPipeline: {} mode on {} produced {} clips",
            self.config.mode.as_str(),
            self.config.platform.as_str(),
            clips.len()
        );
        PipelineReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            mode: self.config.mode,
            platform: self.config.platform,
            stages: stages.0,
            clips,
        }
    }

    fn run_micro(
        &self,
        transcript: &Transcript,
        audio: Option<&AudioTrack>,
        stages: &mut StageLog,
    ) -> Vec<Candidate> {
        let cfg = &self.config;
        let words = transcript.words();
        if words.is_empty() {
            log_warn!("ClipPipeline: micro mode needs word timestamps; none found");
        }

        let micros = micro_segment(&words, &cfg.segmentation);
        stages.record("micro_segments", &micros);
        let micros = match audio {
            Some(track) => attach_audio_features(&micros, track),
            None => micros,
        };

        let scored = score_batch(
            &micros,
            self.judge(),
            ScoreMode::Extended,
            cfg.judge_batch_size,
            &cfg.scoring,
        );
        let ranked = rank(&scored, cfg.platform, cfg.scoring.composite_threshold, &cfg.scoring);
        stages.record("ranked", &ranked);

        let macros = merge_clusters(&ranked, ScoreKey::Composite, &cfg.cluster);
        stages.record("clusters", &macros);
        let macros = score_macros(&macros, cfg.platform, self.judge(), &cfg.scoring);

        let selected = select_clips(&macros, ScoreKey::Blended, &cfg.selection);
        stages.record("selected", &selected);
        let distinct = remove_overlapping_clips(&selected, ScoreKey::Blended, &cfg.overlap);
        stages.record("distinct", &distinct);

        let snapped: Vec<Candidate> = distinct.iter().map(|c| snap_candidate(c, &words)).collect();
        let hooked = enforce_hooks(&snapped, &words, &cfg.packaging.hook);
        package_clips(&hooked, &cfg.packaging)
    }

    fn run_sliding(&self, transcript: &Transcript, stages: &mut StageLog) -> Vec<Candidate> {
        let cfg = &self.config;
        let windows = build_sliding_windows(transcript, &cfg.segmentation);
        stages.record("windows", &windows);
        let windows = deduplicate_windows(&windows, &cfg.segmentation);
        stages.record("deduplicated", &windows);

        let scored = score_batch(
            &windows,
            self.judge(),
            ScoreMode::Base,
            cfg.judge_batch_size,
            &cfg.scoring,
        );
        let ranked = rank_verdicts(&scored, &cfg.scoring);

        let selected = select_clips(&ranked, ScoreKey::Final, &cfg.selection);
        stages.record("selected", &selected);
        let distinct = remove_overlapping_clips(&selected, ScoreKey::Final, &cfg.overlap);
        stages.record("distinct", &distinct);

        let hooked = enforce_hooks(&distinct, &transcript.words(), &cfg.packaging.hook);
        package_clips(&hooked, &cfg.packaging)
    }

    fn run_reconstruct(&self, transcript: &Transcript, stages: &mut StageLog) -> Vec<Candidate> {
        let cfg = &self.config;
        let outcome = reconstruct_clips(transcript, self.judge(), &cfg.reconstruction);
        stages.record_count("units", outcome.units);
        stages.record_count("assembled", outcome.assembled);
        stages.record_count("constrained", outcome.constrained);
        stages.record("evaluated", &outcome.clips);

        let selected = select_clips(&outcome.clips, ScoreKey::Competitive, &cfg.selection);
        stages.record("selected", &selected);

        // A recut would cut across the gaps of a non-contiguous clip.
        let words = transcript.words();
        let hooked: Vec<Candidate> = selected
            .iter()
            .map(|clip| {
                if clip.is_contiguous() {
                    enforce_hook(clip, &words, &cfg.packaging.hook)
                } else {
                    clip.clone()
                }
            })
            .collect();
        package_clips(&hooked, &cfg.packaging)
    }
}
