//! Raw series text as returned by the portal and line-level parsing.
//!
//! A portal response looks like:
//!
//! ```text
//! Wake County, North Carolina, Precipitation
//! Units: Inches
//! Base Period: 1901-2000
//! Date,Value,Anomaly
//! 197402,2.95,-0.62
//! ```

use thiserror::Error;

use super::ClimateVariable;

/// Number of header lines preceding the data in every series.
pub const HEADER_LINES: usize = 4;

#[derive(Debug, Clone)]
pub struct ClimateSeries {
    pub variable: ClimateVariable,
    pub lines: Vec<String>,
}

impl ClimateSeries {
    pub fn new(variable: ClimateVariable, body: &str) -> Self {
        let lines = body.lines().map(str::to_string).collect();
        ClimateSeries { variable, lines }
    }

    /// Data lines with their 1-based line numbers, skipping the header and blanks.
    pub fn data_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .skip(HEADER_LINES)
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineError {
    #[error("missing value field")]
    MissingValue,
    #[error("invalid date token `{0}`")]
    InvalidDate(String),
    #[error("invalid value `{0}`")]
    InvalidValue(String),
}

/// One dated observation from the series that establishes the table rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesReading {
    pub date: String,
    pub year: i32,
    pub month: u32,
    pub value: f64,
}

impl SeriesReading {
    pub fn from_line(line: &str) -> Result<Self, LineError> {
        let mut fields = line.split(',');
        let date = fields.next().unwrap_or_default().trim();

        if date.len() != 6 || !date.chars().all(|c| c.is_ascii_digit()) {
            return Err(LineError::InvalidDate(date.to_string()));
        }
        let year = date[..4]
            .parse()
            .map_err(|_| LineError::InvalidDate(date.to_string()))?;
        let month = date[4..]
            .parse()
            .map_err(|_| LineError::InvalidDate(date.to_string()))?;
        let value = parse_value_field(fields.next())?;

        Ok(SeriesReading {
            date: date.to_string(),
            year,
            month,
            value,
        })
    }
}

/// Extracts only the value field of a line, ignoring the date token.
pub fn parse_value(line: &str) -> Result<f64, LineError> {
    parse_value_field(line.split(',').nth(1))
}

fn parse_value_field(field: Option<&str>) -> Result<f64, LineError> {
    let field = field.ok_or(LineError::MissingValue)?.trim();
    field
        .parse::<f64>()
        .map_err(|_| LineError::InvalidValue(field.to_string()))
}
