//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    describe::{DEFAULT_DASHBOARD_START, DEFAULT_DATASET_START, DEFAULT_ORG_URL},
    download::{DEFAULT_COUNTY, DEFAULT_SERIES_BASE},
    portal::DEFAULT_PORTAL_URL,
    publish::{DEFAULT_DASHBOARD_ITEM, DEFAULT_DATASET_ITEM},
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the NOAA series, write the table and publish it
    Update(UpdateArgs),
    /// Print the item text that would be published
    Describe(DescribeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Run as if today were this date (YYYY-MM-DD)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,

    /// Base URL of the county time-series downloads
    #[arg(long, default_value = DEFAULT_SERIES_BASE)]
    pub series_url: String,

    /// Climate division county code
    #[arg(long, default_value = DEFAULT_COUNTY)]
    pub county: String,
}

#[derive(Args, Debug, Clone)]
pub struct TextArgs {
    /// Dataset item ID
    #[arg(long, default_value = DEFAULT_DATASET_ITEM)]
    pub dataset_item: String,

    /// Organisation site linked from the dashboard description
    #[arg(long, default_value = DEFAULT_ORG_URL)]
    pub org_url: String,

    /// First month named in the dataset snippet
    #[arg(long, default_value = DEFAULT_DATASET_START)]
    pub dataset_start: String,

    /// First month named in the dashboard description
    #[arg(long, default_value = DEFAULT_DASHBOARD_START)]
    pub dashboard_start: String,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub text: TextArgs,

    /// CSV output path [default: Wake_Monthly_Weather.csv next to the executable]
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Also save a Parquet snapshot, optionally at the given path
    #[arg(long, num_args = 0..=1)]
    pub parquet: Option<Option<PathBuf>>,

    /// Stop after writing the CSV
    #[arg(long)]
    pub dry_run: bool,

    /// ArcGIS portal URL
    #[arg(long, default_value = DEFAULT_PORTAL_URL)]
    pub portal_url: String,

    /// ArcGIS Online user name
    #[arg(long, env = "AGOL_USER")]
    pub user: Option<String>,

    /// ArcGIS Online password
    #[arg(long, env = "AGOL_PASS", hide_env_values = true)]
    pub password: Option<String>,

    /// Dashboard item ID
    #[arg(long, default_value = DEFAULT_DASHBOARD_ITEM)]
    pub dashboard_item: String,

    /// Seconds between publish job status checks
    #[arg(long, default_value_t = 5)]
    pub poll_seconds: u64,
}

#[derive(Args, Debug, Clone)]
pub struct DescribeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub text: TextArgs,
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let style = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    ProgressBar::new(size).with_message(message).with_style(style)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn should_verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn should_parse_update_defaults() {
        let cli = Cli::try_parse_from(["wake-weather", "update", "--dry-run"]).unwrap();
        let Commands::Update(args) = cli.command else {
            panic!("expected update");
        };

        assert!(args.dry_run);
        assert_eq!(args.source.county, "NC-183");
        assert_eq!(args.text.dataset_item, DEFAULT_DATASET_ITEM);
        assert_eq!(args.dashboard_item, DEFAULT_DASHBOARD_ITEM);
        assert!(args.parquet.is_none());
    }

    #[test]
    fn should_parse_as_of_and_parquet_flag() {
        let cli = Cli::try_parse_from([
            "wake-weather",
            "update",
            "--as-of",
            "2024-03-15",
            "--parquet",
        ])
        .unwrap();
        let Commands::Update(args) = cli.command else {
            panic!("expected update");
        };

        assert_eq!(args.source.as_of, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(args.parquet, Some(None));
    }
}
