use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ForwarderError {
    // Config errors
    #[error("unable to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not set up logging: {0}")]
    Logging(String),

    // Mapping errors
    #[error("conversion to alert API format failed: {0}")]
    PayloadMarshal(#[from] serde_json::Error),

    // Delivery errors
    #[error("failed to create HTTP request: {0}")]
    RequestBuild(String),

    #[error("failed to post data to OpsGenie: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, ForwarderError>;
