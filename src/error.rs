use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while substituting values into a display template
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("template expects {expected} placeholder(s) but contains {found}: {template:?}")]
    PlaceholderCount {
        template: String,
        expected: usize,
        found: usize,
    },

    #[error("unbalanced brace at byte {position} in template {template:?}")]
    UnbalancedBrace { template: String, position: usize },
}

/// Errors raised by the screenshot capture procedure
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("external storage is not mounted")]
    StorageUnavailable,

    #[error("unable to create directory {path}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to render view: {0}")]
    Snapshot(String),

    #[error("unable to decode frame {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("unable to encode PNG")]
    Encode(#[from] image::ImageError),

    #[error("unable to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("background capture task failed: {0}")]
    Task(String),
}

/// Errors raised while loading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}
