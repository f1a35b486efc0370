use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::services::{fun_fact_candidates, pick_fun_fact, DataLoaderService, TimeRange};
use crate::types::{format_duration, format_number, ListeningMetrics};

mod label;

/// Nutrition-facts style summary of a streaming-history export
#[derive(Parser, Debug)]
#[command(name = "tunefacts")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Export files: the downloaded zip and/or loose JSON files
    #[arg(required = true, value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Time range: all, year, 6mo, 3mo, month, week
    #[arg(long, default_value = "all")]
    range: TimeRange,

    /// Reference instant for the range cutoff (RFC 3339), defaults to now
    #[arg(long)]
    now: Option<DateTime<Utc>>,

    /// Output metrics as JSON
    #[arg(long)]
    json: bool,

    /// Seed for picking the fun fact
    #[arg(long)]
    seed: Option<u64>,
}

/// Everything the label shows, as printed with `--json`
#[derive(Debug, Serialize)]
pub struct LabelReport {
    pub range: TimeRange,
    pub metrics: ListeningMetrics,
    pub fun_facts: Vec<String>,
    pub fun_fact: String,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let report = self.report()?;
        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!("{}", label::render(&report));
        }
        Ok(())
    }

    /// Load the inputs and compute everything the label shows
    pub fn report(&self) -> anyhow::Result<LabelReport> {
        // Read errors are logged by the extractor
        let loaded = DataLoaderService::from_paths(&self.files)?;

        let now = self.now.unwrap_or_else(Utc::now);
        let metrics = loaded.service.metrics(self.range, now);
        let fun_facts = fun_fact_candidates(&metrics);
        let fun_fact = match self.seed {
            Some(seed) => pick_fun_fact(&fun_facts, &mut StdRng::seed_from_u64(seed)),
            None => pick_fun_fact(&fun_facts, &mut rand::thread_rng()),
        };

        Ok(LabelReport {
            range: self.range,
            metrics,
            fun_facts,
            fun_fact,
        })
    }
}

/// `"12h 5m"` style total for a metrics block
fn total_listening(m: &ListeningMetrics) -> String {
    format!(
        "{} ({} min)",
        format_duration(m.total_hours, m.remaining_minutes),
        format_number(m.total_minutes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_requires_files() {
        assert!(Cli::try_parse_from(["tunefacts"]).is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["tunefacts", "my_spotify_data.zip"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("my_spotify_data.zip")]);
        assert_eq!(cli.range, TimeRange::All);
        assert!(cli.now.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_range_and_now() {
        let cli = Cli::try_parse_from([
            "tunefacts",
            "a.json",
            "b.json",
            "--range",
            "6mo",
            "--now",
            "2026-02-15T07:38:00Z",
            "--json",
            "--seed",
            "4",
        ])
        .unwrap();

        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.range, TimeRange::SixMonths);
        assert_eq!(cli.now.unwrap().to_rfc3339(), "2026-02-15T07:38:00+00:00");
        assert!(cli.json);
        assert_eq!(cli.seed, Some(4));
    }

    #[test]
    fn test_cli_unknown_range_is_all() {
        let cli = Cli::try_parse_from(["tunefacts", "a.json", "--range", "forever"]).unwrap();
        assert_eq!(cli.range, TimeRange::All);
    }

    #[test]
    fn test_report_skips_unreadable_inputs() {
        let dir = tempfile::TempDir::new().unwrap();
        let history = dir.path().join("StreamingHistory_music_0.json");
        std::fs::write(
            &history,
            r#"[{"endTime":"2024-01-01 10:00","msPlayed":180000,"artistName":"A","trackName":"X"}]"#,
        )
        .unwrap();
        let missing = dir.path().join("Follow.json");

        let cli = Cli::try_parse_from([
            "tunefacts",
            history.to_str().unwrap(),
            missing.to_str().unwrap(),
            "--seed",
            "1",
        ])
        .unwrap();
        let report = cli.report().unwrap();

        assert_eq!(report.metrics.total_streams, 1);
        assert_eq!(report.metrics.social.following, 0);
        assert!(report.fun_facts.contains(&report.fun_fact));
    }

    #[test]
    fn test_cli_rejects_bad_now() {
        assert!(Cli::try_parse_from(["tunefacts", "a.json", "--now", "last tuesday"]).is_err());
    }
}
