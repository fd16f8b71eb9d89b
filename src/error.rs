//! Stage-tagged pipeline errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::{
    portal::PortalError,
    reading::{ClimateVariable, LineError},
};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to fetch {variable} series: {message}")]
    Fetch {
        variable: ClimateVariable,
        message: String,
    },

    #[error("failed to parse {variable} series at line {line} (`{text}`): {source}")]
    Merge {
        variable: ClimateVariable,
        line: usize,
        text: String,
        #[source]
        source: LineError,
    },

    #[error("merged table has {rows} rows, expected more than {minimum}")]
    Validate { rows: usize, minimum: usize },

    #[error("failed to write {}: {message}", .path.display())]
    Write { path: PathBuf, message: String },

    #[error("failed to publish to ArcGIS Online: {0}")]
    Publish(#[from] PortalError),
}

impl PipelineError {
    /// Process exit code for the failing stage.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Fetch { .. } => 2,
            PipelineError::Merge { .. } => 3,
            PipelineError::Validate { .. } => 4,
            PipelineError::Write { .. } => 5,
            PipelineError::Publish(_) => 6,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn should_map_stage_to_exit_code() {
        let fetch = PipelineError::Fetch {
            variable: ClimateVariable::MaxTemperature,
            message: "HTTP status 404 Not Found".to_string(),
        };
        let validate = PipelineError::Validate {
            rows: 12,
            minimum: 600,
        };
        let publish = PipelineError::from(PortalError::Auth("Invalid username or password.".to_string()));

        assert_eq!(fetch.exit_code(), 2);
        assert_eq!(validate.exit_code(), 4);
        assert_eq!(publish.exit_code(), 6);
    }

    #[test]
    fn should_describe_merge_error() {
        let e = PipelineError::Merge {
            variable: ClimateVariable::Precipitation,
            line: 5,
            text: "<html>".to_string(),
            source: LineError::InvalidDate("<html>".to_string()),
        };

        assert_eq!(
            e.to_string(),
            "failed to parse pcp series at line 5 (`<html>`): invalid date token `<html>`"
        );
    }
}
