pub mod series;
pub mod variable;

pub use series::{parse_value, ClimateSeries, LineError, SeriesReading};
pub use variable::ClimateVariable;
