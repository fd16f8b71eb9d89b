pub mod describe;
pub mod update;

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
pub use describe::describe;
pub use update::update;

use super::{SourceArgs, TextArgs};
use crate::{describe::DescriptionSettings, download::SeriesSource};

pub const CSV_FILE_NAME: &str = "Wake_Monthly_Weather.csv";

/// Default CSV location: alongside the running executable.
pub fn default_output_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CSV_FILE_NAME)))
        .unwrap_or_else(|| PathBuf::from(CSV_FILE_NAME))
}

pub fn make_parquet_file_name(run_date: NaiveDate) -> PathBuf {
    let file_name = format!(
        "wake-weather-monthly-{}-{:02}-{:02}.parquet",
        run_date.year(),
        run_date.month(),
        run_date.day()
    );

    dirs::home_dir().unwrap_or_default().join(file_name)
}

impl From<&SourceArgs> for SeriesSource {
    fn from(args: &SourceArgs) -> Self {
        SeriesSource {
            base_url: args.series_url.clone(),
            county: args.county.clone(),
        }
    }
}

impl From<&TextArgs> for DescriptionSettings {
    fn from(args: &TextArgs) -> Self {
        DescriptionSettings {
            org_url: args.org_url.clone(),
            dataset_item_id: args.dataset_item.clone(),
            dataset_start: args.dataset_start.clone(),
            dashboard_start: args.dashboard_start.clone(),
        }
    }
}
