pub mod config;
pub mod models;
pub mod packaging;
pub mod pipeline;
pub mod reconstruction;
pub mod scoring;
pub mod segmentation;
pub mod selection;
mod utils;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

pub use config::{PipelineConfig, PipelineMode};
pub use models::{Candidate, Platform, Transcript};
pub use pipeline::{ClipPipeline, PipelineReport};
pub use scoring::Judge;

#[derive(Debug, Parser)]
#[command(name = "clipscout")]
#[command(about = "Find, score and package short-form clips from a timestamped transcript")]
struct Cli {
    /// Transcript JSON with segments and optional word timestamps
    transcript: PathBuf,
    /// Pipeline config JSON; missing fields keep their defaults
    #[arg(long, env = "CLIPSCOUT_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    mode: Option<PipelineMode>,
    #[arg(long, value_enum)]
    platform: Option<Platform>,
    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    execute(Cli::parse())
}

fn execute(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(platform) = cli.platform {
        config.platform = platform;
    }

    let transcript = Transcript::load(&cli.transcript)?;
    log::info!(
        "clipscout: {} segments from {}",
        transcript.segments.len(),
        cli.transcript.display()
    );

    // Without a configured judge every stage falls back to its defaults.
    let report = ClipPipeline::new(config).run(&transcript, None);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;

    match &cli.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            log::info!("clipscout: wrote {} clips to {}", report.clips.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TranscriptSegment;

    fn transcript_file() -> tempfile::NamedTempFile {
        let lines = [
            "Nobody tells you the truth about rent.",
            "I paid double for three years straight.",
            "Then I read the lease one more time.",
            "The clause said I could leave at any point.",
            "So I moved out and saved a fortune.",
            "Read your lease before you sign it.",
        ];
        let segments = lines
            .iter()
            .enumerate()
            .map(|(i, line)| TranscriptSegment::new(i as f64 * 6.0, (i + 1) as f64 * 6.0, *line))
            .collect();
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), serde_json::to_string(&Transcript::new(segments)).unwrap()).unwrap();
        file
    }

    #[test]
    fn cli_writes_a_report_for_the_chosen_mode() {
        let transcript = transcript_file();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("report.json");

        let args: Vec<std::ffi::OsString> = vec![
            "clipscout".into(),
            transcript.path().into(),
            "--mode".into(),
            "reconstruct".into(),
            "--platform".into(),
            "reels".into(),
            "--output".into(),
            output.as_os_str().into(),
        ];
        let cli = Cli::try_parse_from(args)
        .unwrap();
        assert_eq!(cli.mode, Some(PipelineMode::Reconstruct));
        execute(cli).unwrap();

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(report["mode"], "reconstruct");
        assert_eq!(report["platform"], "reels");
        assert!(report["clips"].as_array().is_some());
    }

    #[test]
    fn cli_rejects_unknown_mode_and_missing_transcript() {
        assert!(Cli::try_parse_from(["clipscout", "talk.json", "--mode", "shuffle"]).is_err());

        let cli = Cli::try_parse_from(["clipscout", "/nonexistent/talk.json"]).unwrap();
        let err = execute(cli).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read transcript"));
    }
}
