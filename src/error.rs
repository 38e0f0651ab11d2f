//! Error types for layered configuration loading.

use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;
use thiserror::Error;

/// Failure to coerce an environment value into a scalar field
#[derive(Debug, Error)]
pub enum ScalarError {
    #[error("invalid integer: {0}")]
    Int(#[from] ParseIntError),

    #[error("invalid float: {0}")]
    Float(#[from] ParseFloatError),

    #[error("float {0:?} out of range for f32")]
    FloatRange(String),

    #[error("invalid boolean literal {0:?}")]
    Bool(String),
}

/// Environment override errors
#[derive(Debug, Error)]
pub enum OverrideError {
    #[error("set field {field} from env {variable} (value {value:?}): {source}")]
    Parse {
        field: &'static str,
        variable: String,
        value: String,
        #[source]
        source: ScalarError,
    },

    #[error("set field {field} from env {variable}: unsupported field kind {kind}")]
    UnsupportedKind {
        field: &'static str,
        variable: String,
        kind: &'static str,
    },
}

impl OverrideError {
    /// Name of the field the failing override targeted
    pub fn field(&self) -> &'static str {
        match self {
            OverrideError::Parse { field, .. } => field,
            OverrideError::UnsupportedKind { field, .. } => field,
        }
    }

    /// Computed environment variable name that carried the bad value
    pub fn variable(&self) -> &str {
        match self {
            OverrideError::Parse { variable, .. } => variable,
            OverrideError::UnsupportedKind { variable, .. } => variable,
        }
    }
}

/// Failure to lay a decoded file over a record
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("serialize record: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("{0}")]
    Deserialize(#[source] serde_yaml::Error),
}

/// Top-level load errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid config: {0}")]
    Validation(String),

    #[error("unread file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unparse {format} {path}: {message}")]
    Decode {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("merge config file into record: {0}")]
    Merge(#[source] MergeError),

    #[error("load env: {0}")]
    Override(#[from] OverrideError),
}

/// Logging setup errors
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log format: {0} (must be 'json' or 'text')")]
    InvalidFormat(String),

    #[error("Invalid log directive: {0}")]
    InvalidDirective(String),

    #[error("Failed to install log subscriber: {0}")]
    Init(String),
}
