//! Values fixed for the duration of a single run.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};

/// Years of history requested before the latest complete month.
pub const HISTORY_YEARS: i32 = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    pub run_date: NaiveDate,
    /// First day of the most recent complete month.
    pub latest_month: NaiveDate,
    pub start_year: i32,
    pub output_path: PathBuf,
}

impl RunContext {
    pub fn new(run_date: NaiveDate, output_path: PathBuf) -> Self {
        let latest_month = previous_month(run_date);
        let start_year = latest_month.year() - HISTORY_YEARS;

        RunContext {
            run_date,
            latest_month,
            start_year,
            output_path,
        }
    }

    pub fn end_year(&self) -> i32 {
        self.latest_month.year()
    }

    /// Path tail shared by every series download, e.g. `-all-2-1974-2024.csv`.
    pub fn url_suffix(&self) -> String {
        format!(
            "-all-{}-{}-{}.csv",
            self.latest_month.month(),
            self.start_year,
            self.end_year()
        )
    }

    /// Latest complete month as written in item descriptions, e.g. `February, 2024`.
    pub fn latest_label(&self) -> String {
        self.latest_month.format("%B, %Y").to_string()
    }
}

fn previous_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = match date.month() {
        1 => (date.year() - 1, 12),
        m => (date.year(), m - 1),
    };

    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {

    use super::*;

    fn context(y: i32, m: u32, d: u32) -> RunContext {
        RunContext::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            PathBuf::from("Wake_Monthly_Weather.csv"),
        )
    }

    #[test]
    fn should_use_previous_month() {
        let ctx = context(2024, 3, 15);

        assert_eq!(ctx.latest_month, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(ctx.start_year, 1974);
        assert_eq!(ctx.latest_label(), "February, 2024");
        assert_eq!(ctx.url_suffix(), "-all-2-1974-2024.csv");
    }

    #[test]
    fn should_roll_back_year_in_january() {
        let ctx = context(2025, 1, 3);

        assert_eq!(ctx.latest_month, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(ctx.end_year(), 2024);
        assert_eq!(ctx.start_year, 1974);
        assert_eq!(ctx.latest_label(), "December, 2024");
        assert_eq!(ctx.url_suffix(), "-all-12-1974-2024.csv");
    }

    #[test]
    fn should_be_stable_within_a_month() {
        assert_eq!(context(2024, 7, 1).url_suffix(), context(2024, 7, 31).url_suffix());
        assert_eq!(context(2024, 7, 1).latest_label(), context(2024, 7, 31).latest_label());
    }
}
