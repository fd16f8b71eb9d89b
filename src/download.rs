//! Downloads the county time series from the NOAA portal.

use reqwest::Client;
use tracing::debug;

use crate::{
    context::RunContext,
    error::PipelineError,
    reading::{ClimateSeries, ClimateVariable},
};

pub const DEFAULT_SERIES_BASE: &str = "https://www.ncdc.noaa.gov/cag/county/time-series";
pub const DEFAULT_COUNTY: &str = "NC-183";

/// Where the county series live.
#[derive(Debug, Clone)]
pub struct SeriesSource {
    pub base_url: String,
    pub county: String,
}

impl Default for SeriesSource {
    fn default() -> Self {
        SeriesSource {
            base_url: DEFAULT_SERIES_BASE.to_string(),
            county: DEFAULT_COUNTY.to_string(),
        }
    }
}

impl SeriesSource {
    pub fn series_url(&self, variable: ClimateVariable, ctx: &RunContext) -> String {
        format!(
            "{}/{}-{}{}",
            self.base_url.trim_end_matches('/'),
            self.county,
            variable.code(),
            ctx.url_suffix()
        )
    }
}

/// Downloads one variable's series for the run window.
pub async fn download_series(
    client: &Client,
    source: &SeriesSource,
    variable: ClimateVariable,
    ctx: &RunContext,
) -> Result<ClimateSeries, PipelineError> {
    let url = source.series_url(variable, ctx);
    debug!(%url, "requesting series");

    let fetch_error = |message: String| PipelineError::Fetch { variable, message };

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| fetch_error(e.to_string()))?;

    if !response.status().is_success() {
        return Err(fetch_error(format!("HTTP status {}", response.status())));
    }

    let body = response.text().await.map_err(|e| fetch_error(e.to_string()))?;

    Ok(ClimateSeries::new(variable, &body))
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::*;

    fn ctx() -> RunContext {
        RunContext::new(
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            PathBuf::from("Wake_Monthly_Weather.csv"),
        )
    }

    #[test]
    fn should_generate_series_url() {
        let url = SeriesSource::default().series_url(ClimateVariable::Precipitation, &ctx());

        assert_eq!(
            url,
            "https://www.ncdc.noaa.gov/cag/county/time-series/NC-183-pcp-all-2-1974-2024.csv"
        );
    }

    #[tokio::test]
    async fn should_download_series_lines() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/NC-183-tavg-all-2-1974-2024.csv")
            .with_status(200)
            .with_body("a\nb\nc\nDate,Value,Anomaly\n197402,44.1,0.3\n")
            .create_async()
            .await;

        let source = SeriesSource {
            base_url: server.url(),
            county: DEFAULT_COUNTY.to_string(),
        };
        let series = download_series(
            &Client::new(),
            &source,
            ClimateVariable::AverageTemperature,
            &ctx(),
        )
        .await
        .unwrap();

        mock.assert_async().await;
        assert_eq!(series.variable, ClimateVariable::AverageTemperature);
        assert_eq!(series.lines.len(), 5);
        assert_eq!(series.lines[4], "197402,44.1,0.3");
    }

    #[tokio::test]
    async fn should_report_http_failure_as_fetch_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/NC-183-tmax-all-2-1974-2024.csv")
            .with_status(503)
            .create_async()
            .await;

        let source = SeriesSource {
            base_url: server.url(),
            county: DEFAULT_COUNTY.to_string(),
        };
        let err = download_series(
            &Client::new(),
            &source,
            ClimateVariable::MaxTemperature,
            &ctx(),
        )
        .await
        .unwrap_err();

        match err {
            PipelineError::Fetch { variable, message } => {
                assert_eq!(variable, ClimateVariable::MaxTemperature);
                assert!(message.contains("503"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
