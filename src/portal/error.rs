use thiserror::Error;

/// Failures talking to the ArcGIS sharing REST API.
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("item {0} not found or inaccessible")]
    ItemNotFound(String),

    #[error("overwrite of {item} failed: {message}")]
    Overwrite { item: String, message: String },

    #[error("update of {item} failed: {message}")]
    Update { item: String, message: String },

    #[error("portal error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
