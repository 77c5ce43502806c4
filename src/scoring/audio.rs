//! Audio energy, silence and pace features over mono PCM.
//!
//! Decoding is left to the caller; everything here works on `f32` samples
//! already in memory.

const ENABLE_LOGS: bool = true;

use crate::log_debug;
use crate::models::{AudioFeatures, Candidate};
use crate::utils::text::{round_to, word_count};

const FRAME_SECS: f64 = 0.025;
const HOP_RATIO: f64 = 0.5;
/// Frames quieter than this RMS count as silence.
const SILENCE_RMS: f64 = 0.01;
const FEATURE_PRECISION: i32 = 4;

/// Per-frame RMS with 25 ms frames and a 50% hop.
///
/// Input shorter than one frame yields a single zero frame.
pub fn rms_frames(samples: &[f32], sample_rate: u32) -> Vec<f64> {
    let frame_len = ((FRAME_SECS * sample_rate as f64) as usize).max(1);
    let hop_len = ((frame_len as f64 * HOP_RATIO) as usize).max(1);

    let mut frames = Vec::new();
    let mut i = 0;
    while i + frame_len <= samples.len() {
        let frame = &samples[i..i + frame_len];
        let mean_sq = frame.iter().map(|&x| (x as f64) * (x as f64)).sum::<f64>() / frame_len as f64;
        frames.push(mean_sq.sqrt());
        i += hop_len;
    }
    if frames.is_empty() {
        frames.push(0.0);
    }
    frames
}

/// Fraction of frames below the silence threshold; 1.0 for no frames.
pub fn silence_ratio(frames: &[f64]) -> f64 {
    if frames.is_empty() {
        return 1.0;
    }
    let silent = frames.iter().filter(|&&rms| rms < SILENCE_RMS).count();
    round_to(silent as f64 / frames.len() as f64, FEATURE_PRECISION)
}

pub fn speech_rate(words: usize, duration_secs: f64) -> f64 {
    if duration_secs <= 0.0 || words == 0 {
        return 0.0;
    }
    round_to(words as f64 / duration_secs, FEATURE_PRECISION)
}

pub fn extract_features(samples: &[f32], sample_rate: u32, words: usize) -> AudioFeatures {
    if samples.is_empty() || sample_rate == 0 {
        return AudioFeatures {
            mean_rms: 0.0,
            silence_ratio: 1.0,
            speech_rate: 0.0,
            viable: false,
        };
    }

    let frames = rms_frames(samples, sample_rate);
    let mean_rms = frames.iter().sum::<f64>() / frames.len() as f64;
    let duration = samples.len() as f64 / sample_rate as f64;

    AudioFeatures {
        mean_rms: round_to(mean_rms, FEATURE_PRECISION),
        silence_ratio: silence_ratio(&frames),
        speech_rate: speech_rate(words, duration),
        viable: true,
    }
}

/// A full mono recording that candidate spans are cut from.
#[derive(Debug, Clone)]
pub struct AudioTrack {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioTrack {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Samples between `start` and `end` seconds, clamped to the recording.
    pub fn slice(&self, start: f64, end: f64) -> &[f32] {
        let to_index = |t: f64| {
            ((t.max(0.0) * self.sample_rate as f64) as usize).min(self.samples.len())
        };
        let (from, to) = (to_index(start), to_index(end));
        if from >= to {
            return &[];
        }
        &self.samples[from..to]
    }

    pub fn features_for(&self, candidate: &Candidate) -> AudioFeatures {
        let words = if candidate.words.is_empty() {
            word_count(&candidate.text)
        } else {
            candidate.words.len()
        };
        extract_features(
            self.slice(candidate.start, candidate.end),
            self.sample_rate,
            words,
        )
    }
}

/// Attach measured features to every candidate.
pub fn attach_audio_features(candidates: &[Candidate], track: &AudioTrack) -> Vec<Candidate> {
    let attached: Vec<Candidate> = candidates
        .iter()
        .map(|candidate| {
            let mut with_audio = candidate.clone();
            with_audio.audio_features = Some(track.features_for(candidate));
            with_audio
        })
        .collect();
    log_debug!(
        "attach_audio_features: {} candidates over {:.1}s of audio",
        attached.len(),
        track.duration_secs()
    );
    attached
}
