//! Merges the per-variable series into one wide monthly table.
//!
//! Rows come from the first series. Later series are attached by position and
//! only when their length matches; there is no alignment on the date token.

use tracing::{info, warn};

use crate::{
    error::PipelineError,
    reading::{parse_value, ClimateSeries, ClimateVariable, SeriesReading},
};

/// A valid table must hold more than this many monthly rows (about 50 years).
pub const MIN_ROWS: usize = 600;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthRow {
    pub date: String,
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClimateColumn {
    pub variable: ClimateVariable,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedTable {
    pub rows: Vec<MonthRow>,
    pub columns: Vec<ClimateColumn>,
}

impl MergedTable {
    /// Builds the row identity and first column from the leading series.
    pub fn from_first(series: &ClimateSeries) -> Result<Self, PipelineError> {
        let mut rows = Vec::new();
        let mut values = Vec::new();

        for (line_no, line) in series.data_lines() {
            let reading =
                SeriesReading::from_line(line).map_err(|source| PipelineError::Merge {
                    variable: series.variable,
                    line: line_no,
                    text: line.to_string(),
                    source,
                })?;
            values.push(reading.value);
            rows.push(MonthRow {
                date: reading.date,
                year: reading.year,
                month: reading.month,
            });
        }

        Ok(MergedTable {
            rows,
            columns: vec![ClimateColumn {
                variable: series.variable,
                values,
            }],
        })
    }

    /// Appends a later series' values. Returns `false` when the row count differs
    /// and the column was dropped.
    pub fn attach(&mut self, series: &ClimateSeries) -> Result<bool, PipelineError> {
        let values = series
            .data_lines()
            .map(|(line_no, line)| {
                parse_value(line).map_err(|source| PipelineError::Merge {
                    variable: series.variable,
                    line: line_no,
                    text: line.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if values.len() != self.len() {
            warn!(
                variable = %series.variable,
                expected = self.len(),
                actual = values.len(),
                "row count mismatch, dropping column {}",
                series.variable.column_name()
            );
            return Ok(false);
        }

        self.columns.push(ClimateColumn {
            variable: series.variable,
            values,
        });

        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[cfg(test)]
    pub fn column(&self, variable: ClimateVariable) -> Option<&ClimateColumn> {
        self.columns.iter().find(|c| c.variable == variable)
    }

    /// Header in output order: `Date,Year,Month` then each present variable.
    pub fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec!["Date", "Year", "Month"];
        headers.extend(self.columns.iter().map(|c| c.variable.column_name()));
        headers
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.len() > MIN_ROWS {
            Ok(())
        } else {
            Err(PipelineError::Validate {
                rows: self.len(),
                minimum: MIN_ROWS,
            })
        }
    }
}

/// Merges series in the order given; the first establishes the rows.
pub fn merge(series: &[ClimateSeries]) -> Result<MergedTable, PipelineError> {
    let Some((first, rest)) = series.split_first() else {
        return Ok(MergedTable::default());
    };

    let mut table = MergedTable::from_first(first)?;
    for s in rest {
        table.attach(s)?;
    }

    info!(
        rows = table.len(),
        columns = table.columns.len(),
        "merged series"
    );

    Ok(table)
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {

    use super::*;

    /// Portal-shaped body with `months` consecutive months starting January 1974.
    pub(crate) fn series_body(months: usize, base: f64) -> String {
        let mut body = String::from("Wake County, North Carolina\nUnits\nBase Period: 1901-2000\nDate,Value,Anomaly\n");
        for i in 0..months {
            let year = 1974 + (i / 12) as i32;
            let month = (i % 12) + 1;
            body.push_str(&format!("{}{:02},{},0.0\n", year, month, base + (i % 10) as f64 / 4.0));
        }
        body
    }

    pub(crate) fn all_series(months: [usize; 4]) -> Vec<ClimateSeries> {
        ClimateVariable::ALL
            .iter()
            .zip(months)
            .zip([3.5, 70.0, 48.0, 59.0])
            .map(|((v, m), base)| ClimateSeries::new(*v, &series_body(m, base)))
            .collect()
    }

    #[test]
    fn should_merge_matching_series() {
        let table = merge(&all_series([660; 4])).unwrap();

        assert_eq!(table.len(), 660);
        assert_eq!(table.columns.len(), 4);
        assert_eq!(
            table.headers(),
            vec![
                "Date",
                "Year",
                "Month",
                "Precip_Inches",
                "TempMax_DegF",
                "TempMin_DegF",
                "TempAvg_DegF"
            ]
        );
        assert_eq!(table.rows[0].date, "197401");
        assert_eq!(table.rows[13].year, 1975);
        assert_eq!(table.rows[13].month, 2);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn should_drop_mismatched_column() {
        let table = merge(&all_series([660, 659, 660, 660])).unwrap();

        assert_eq!(table.len(), 660);
        assert!(table.column(ClimateVariable::MaxTemperature).is_none());
        assert!(table.column(ClimateVariable::Precipitation).is_some());
        assert!(table.column(ClimateVariable::MinTemperature).is_some());
        assert!(table.column(ClimateVariable::AverageTemperature).is_some());
        assert!(table.validate().is_ok());
    }

    #[test]
    fn should_align_by_position_not_date() {
        let first = ClimateSeries::new(
            ClimateVariable::Precipitation,
            "h\nh\nh\nh\n197401,1.0\n197402,2.0\n",
        );
        let shifted = ClimateSeries::new(
            ClimateVariable::MaxTemperature,
            "h\nh\nh\nh\n197402,60.0\n197403,61.0\n",
        );
        let table = merge(&[first, shifted]).unwrap();

        let tmax = table.column(ClimateVariable::MaxTemperature).unwrap();
        assert_eq!(table.rows[0].date, "197401");
        assert_eq!(tmax.values, vec![60.0, 61.0]);
    }

    #[test]
    fn should_reject_small_table() {
        let table = merge(&all_series([600; 4])).unwrap();

        match table.validate() {
            Err(PipelineError::Validate { rows, minimum }) => {
                assert_eq!(rows, 600);
                assert_eq!(minimum, 600);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(merge(&all_series([601; 4])).unwrap().validate().is_ok());
    }

    #[test]
    fn should_report_malformed_line() {
        let series = vec![ClimateSeries::new(
            ClimateVariable::Precipitation,
            "h\nh\nh\nh\n197401,1.0\n<html>oops</html>\n",
        )];
        let err = merge(&series).unwrap_err();

        match err {
            PipelineError::Merge { variable, line, .. } => {
                assert_eq!(variable, ClimateVariable::Precipitation);
                assert_eq!(line, 6);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn should_produce_empty_table_for_no_series() {
        let table = merge(&[]).unwrap();
        assert_eq!(table.len(), 0);
        assert!(table.validate().is_err());
    }
}
