//! Climate variables published by the county time-series portal.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Represents the measured quantity. See the [Climate at a Glance](https://www.ncdc.noaa.gov/cag/county/time-series)
/// documentation for the portal codes.
pub enum ClimateVariable {
    Precipitation,
    MaxTemperature,
    MinTemperature,
    AverageTemperature,
}

impl ClimateVariable {
    /// Fetch order. The first entry establishes the table's rows.
    pub const ALL: [ClimateVariable; 4] = [
        ClimateVariable::Precipitation,
        ClimateVariable::MaxTemperature,
        ClimateVariable::MinTemperature,
        ClimateVariable::AverageTemperature,
    ];

    /// Code used in the portal's download URL.
    pub fn code(&self) -> &'static str {
        match self {
            ClimateVariable::Precipitation => "pcp",
            ClimateVariable::MaxTemperature => "tmax",
            ClimateVariable::MinTemperature => "tmin",
            ClimateVariable::AverageTemperature => "tavg",
        }
    }

    /// Header of this variable's column in the output table.
    pub fn column_name(&self) -> &'static str {
        match self {
            ClimateVariable::Precipitation => "Precip_Inches",
            ClimateVariable::MaxTemperature => "TempMax_DegF",
            ClimateVariable::MinTemperature => "TempMin_DegF",
            ClimateVariable::AverageTemperature => "TempAvg_DegF",
        }
    }
}

impl fmt::Display for ClimateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn should_keep_fetch_order() {
        let codes: Vec<&str> = ClimateVariable::ALL.iter().map(|v| v.code()).collect();
        assert_eq!(codes, vec!["pcp", "tmax", "tmin", "tavg"]);
    }

    #[test]
    fn should_map_column_names() {
        let columns: Vec<&str> = ClimateVariable::ALL
            .iter()
            .map(|v| v.column_name())
            .collect();
        assert_eq!(
            columns,
            vec!["Precip_Inches", "TempMax_DegF", "TempMin_DegF", "TempAvg_DegF"]
        );
    }

    #[test]
    fn should_display_code() {
        assert_eq!(ClimateVariable::MinTemperature.to_string(), "tmin");
    }
}
