#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for computing chart views from a track dataset.
//!
//! Loads a CSV export, normalizes it, runs the aggregation pipeline with the
//! filters given on the command line, and writes the resulting views as
//! JSON for the chart layer.

mod config;

use std::io::Write as _;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use track_charts_analytics::compute_dashboard;
use track_charts_analytics_models::{Dashboard, DurationFilter, Filters, YearRange};
use track_charts_cli_utils::{IndicatifProgress, MultiProgress};
use track_charts_normalize::{Dataset, LoadError, load_csv, load_or_empty};
use track_charts_track_models::{AlbumType, RejectReason};

use crate::config::{CliConfig, ConfigError};

/// Errors that abort a CLI run.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser)]
#[command(name = "track_charts", about = "Chart views over a music track dataset")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a dataset and report how many rows were accepted or rejected
    Summary(SummaryArgs),
    /// Genre-by-year weighted counts over the top genres
    Genres(ViewArgs),
    /// Top tracks by popularity with duration colors
    Scatter(ViewArgs),
    /// Popularity box-plot statistics per album type
    Distribution(ViewArgs),
    /// All views plus the active filters
    Dashboard(ViewArgs),
}

#[derive(Args)]
struct DatasetArgs {
    /// Path to the CSV dataset
    csv: PathBuf,
    /// TOML config overriding column names or pipeline settings
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct SummaryArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    /// Print the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ViewArgs {
    #[command(flatten)]
    dataset: DatasetArgs,
    #[command(flatten)]
    filters: FilterArgs,
    /// Write JSON to this file instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Args, Default)]
struct FilterArgs {
    /// First release year to include
    #[arg(long)]
    from: Option<i32>,
    /// Last release year to include
    #[arg(long)]
    to: Option<i32>,
    /// Keep tracks at least this many minutes long
    #[arg(long, conflicts_with = "max_duration")]
    min_duration: Option<f64>,
    /// Keep tracks at most this many minutes long
    #[arg(long)]
    max_duration: Option<f64>,
    /// Album type selected in the distribution view (album, single, compilation, other)
    #[arg(long, value_parser = parse_album_type)]
    album_type: Option<AlbumType>,
    /// Omit the point overlay sample from distributions
    #[arg(long)]
    hide_sample: bool,
}

fn parse_album_type(s: &str) -> Result<AlbumType, String> {
    s.trim()
        .to_lowercase()
        .parse()
        .map_err(|_| format!("unknown album type '{s}'"))
}

impl FilterArgs {
    fn to_filters(&self) -> Filters {
        let duration = match (self.min_duration, self.max_duration) {
            (Some(min), _) => DurationFilter::AtLeast(min),
            (None, Some(max)) => DurationFilter::AtMost(max),
            (None, None) => DurationFilter::None,
        };
        Filters {
            year_range: YearRange {
                from: self.from,
                to: self.to,
            },
            duration,
            album_type: self.album_type,
            show_sample: !self.hide_sample,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = track_charts_cli_utils::init_logger();
    let cli = Cli::parse();

    match cli.command {
        Commands::Summary(args) => summary(&multi, &args)?,
        Commands::Genres(args) => view(&multi, &args, |d| to_json(&d.genres))?,
        Commands::Scatter(args) => view(&multi, &args, |d| to_json(&d.scatter))?,
        Commands::Distribution(args) => view(&multi, &args, |d| to_json(&d.distributions))?,
        Commands::Dashboard(args) => view(&multi, &args, to_json::<Dashboard>)?,
    }

    Ok(())
}

fn summary(multi: &MultiProgress, args: &SummaryArgs) -> Result<(), CliError> {
    let config = CliConfig::load(args.dataset.config.as_deref())?;
    let progress = IndicatifProgress::records_bar(multi, "Loading dataset");
    let loaded = load_csv(&args.dataset.csv, &config.columns, &progress)?;
    let report = &loaded.report;

    if args.json {
        return write_output(None, &to_json(report)?);
    }

    println!("{:<20} COUNT", "ROWS");
    println!("{}", "-".repeat(30));
    println!("{:<20} {}", "total", report.total);
    println!("{:<20} {}", "accepted", report.accepted);
    for reason in RejectReason::all() {
        let count = report.rejected.get(reason).copied().unwrap_or(0);
        println!("{:<20} {count}", reason.as_ref());
    }

    Ok(())
}

fn view(
    multi: &MultiProgress,
    args: &ViewArgs,
    render: impl Fn(&Dashboard) -> Result<String, CliError>,
) -> Result<(), CliError> {
    let config = CliConfig::load(args.dataset.config.as_deref())?;
    let progress = IndicatifProgress::records_bar(multi, "Loading dataset");
    let dataset = Dataset::from(load_or_empty(&args.dataset.csv, &config.columns, &progress));

    let filters = args.filters.to_filters();
    let Some(dashboard) = compute_dashboard(&dataset, &filters, &config.pipeline) else {
        log::warn!("Dataset not loaded, nothing to render");
        return Ok(());
    };

    let json = render(&dashboard)?;
    write_output(args.output.as_deref(), &json)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn write_output(path: Option<&Path>, json: &str) -> Result<(), CliError> {
    if let Some(path) = path {
        std::fs::write(path, json)?;
        log::info!("Wrote {} bytes to {}", json.len(), path.display());
    } else {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{json}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn filter_flags_map_to_filters() {
        let Commands::Dashboard(args) = parse(&[
            "track_charts",
            "dashboard",
            "tracks.csv",
            "--from",
            "2000",
            "--to",
            "2010",
            "--max-duration",
            "4.5",
            "--album-type",
            "Single",
            "--hide-sample",
        ])
        .command
        else {
            panic!("expected dashboard command");
        };

        let filters = args.filters.to_filters();
        assert_eq!(filters.year_range, YearRange::new(2000, 2010));
        assert_eq!(filters.duration, DurationFilter::AtMost(4.5));
        assert_eq!(filters.album_type, Some(AlbumType::Single));
        assert!(!filters.show_sample);
        assert_eq!(args.dataset.csv, PathBuf::from("tracks.csv"));
    }

    #[test]
    fn summary_accepts_json_flag() {
        let Commands::Summary(args) = parse(&["track_charts", "summary", "tracks.csv", "--json"])
            .command
        else {
            panic!("expected summary command");
        };
        assert!(args.json);
        assert_eq!(args.dataset.csv, PathBuf::from("tracks.csv"));
    }

    #[test]
    fn dashboard_is_written_to_output_file() {
        let dir = std::env::temp_dir().join("track_charts_cli_view");
        std::fs::create_dir_all(&dir).unwrap();
        let csv = dir.join("tracks.csv");
        let out = dir.join("dashboard.json");
        std::fs::write(
            &csv,
            "\
track_name,track_popularity,artist_followers,artist_genres,album_type,release_date,duration_ms
One,80,100,\"pop,rock\",album,2020-01-01,180000
Two,60,50,pop,single,2021-06-01,240000
",
        )
        .unwrap();

        let Commands::Dashboard(args) = parse(&[
            "track_charts",
            "dashboard",
            csv.to_str().unwrap(),
            "--album-type",
            "single",
            "--output",
            out.to_str().unwrap(),
        ])
        .command
        else {
            panic!("expected dashboard command");
        };

        view(&MultiProgress::new(), &args, to_json::<Dashboard>).unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        let raw: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(raw["filters"]["albumType"], "single");

        let dashboard: Dashboard = serde_json::from_str(&written).unwrap();
        assert_eq!(dashboard.filters.album_type, Some(AlbumType::Single));
        assert_eq!(dashboard.scatter.points.len(), 1);
        assert_eq!(dashboard.scatter.points[0].name, "Two");
        assert_eq!(dashboard.genres.years, vec![2021]);
        assert_eq!(dashboard.distributions.len(), 2);
    }

    #[test]
    fn default_filters_are_open() {
        assert_eq!(FilterArgs::default().to_filters(), Filters::default());
    }

    #[test]
    fn duration_bounds_are_mutually_exclusive() {
        let result = Cli::try_parse_from([
            "track_charts",
            "scatter",
            "tracks.csv",
            "--min-duration",
            "2",
            "--max-duration",
            "5",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_album_type() {
        let result = Cli::try_parse_from([
            "track_charts",
            "genres",
            "tracks.csv",
            "--album-type",
            "mixtape",
        ]);
        assert!(result.is_err());
    }
}
