//! Resolution parameters: where to look for the config file and how to name variables.

use crate::error::LoadError;
use crate::sources::FileFormat;
use std::path::PathBuf;

/// Default directories searched for the config file, in order
pub const DEFAULT_SEARCH_PATHS: &[&str] = &[".", "./config"];

/// Default config file base name (no extension)
pub const DEFAULT_NAME: &str = "config";

/// Default environment variable prefix
pub const DEFAULT_ENV_PREFIX: &str = "APP";

/// Options for a single load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    paths: Vec<PathBuf>,
    name: String,
    env_prefix: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            paths: DEFAULT_SEARCH_PATHS.iter().map(|p| PathBuf::from(*p)).collect(),
            name: DEFAULT_NAME.to_string(),
            env_prefix: normalize_prefix(DEFAULT_ENV_PREFIX),
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the directories searched for the config file.
    pub fn with_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Set the config file base name, without extension.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the environment variable prefix; normalized on the way in.
    pub fn with_env_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.env_prefix = normalize_prefix(prefix.as_ref());
        self
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn env_prefix(&self) -> &str {
        &self.env_prefix
    }

    /// Check the options before any filesystem or environment access.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.paths.is_empty() {
            return Err(LoadError::Validation(
                "at least one search path is required".to_string(),
            ));
        }
        if self.name.is_empty() {
            return Err(LoadError::Validation(
                "config name must not be empty".to_string(),
            ));
        }
        if self.name.contains('/') || self.name.contains(std::path::MAIN_SEPARATOR) {
            return Err(LoadError::Validation(format!(
                "config name {:?} must not contain a path separator",
                self.name
            )));
        }
        if let Some((_, ext)) = self.name.rsplit_once('.') {
            if FileFormat::from_extension(ext).is_some() {
                return Err(LoadError::Validation(format!(
                    "config name {:?} must not include the file extension",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// Uppercase the prefix and strip trailing separators.
pub fn normalize_prefix(prefix: &str) -> String {
    prefix.to_uppercase().trim_end_matches('_').to_string()
}
