//! Config file sources: search-path iteration and format decoding.
//!
//! For each search path in order, candidates `<path>/<name>.<ext>` are tried with the
//! extensions of [`FileFormat::ALL`] in order. The first existing file wins; later paths
//! are never read.

use crate::error::LoadError;
use crate::options::LoadOptions;
use serde_yaml::Value;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Supported config file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Toml,
    Json,
}

impl FileFormat {
    /// Extensions tried for each search path, in order
    pub const ALL: &'static [(&'static str, FileFormat)] = &[
        ("yaml", FileFormat::Yaml),
        ("yml", FileFormat::Yaml),
        ("toml", FileFormat::Toml),
        ("json", FileFormat::Json),
    ];

    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(candidate, _)| candidate.eq_ignore_ascii_case(ext))
            .map(|(_, format)| *format)
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Yaml => "yaml",
            FileFormat::Toml => "toml",
            FileFormat::Json => "json",
        }
    }

    /// Decode file contents into a format-neutral tree.
    ///
    /// An empty or comment-only YAML document decodes to null.
    pub fn decode(&self, content: &str) -> Result<Value, String> {
        match self {
            FileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            FileFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            FileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

/// A config file found on the search path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: FileFormat,
}

/// Locate the first existing config file for `options`.
///
/// Only a not-found candidate is skipped. A candidate that cannot be inspected, or that
/// exists but is not a regular file, stops the search with [`LoadError::Read`].
pub fn find_config_file(options: &LoadOptions) -> Result<Option<ConfigFile>, LoadError> {
    for dir in options.paths() {
        for (ext, format) in FileFormat::ALL {
            let path = dir.join(format!("{}.{}", options.name(), ext));
            match std::fs::metadata(&path) {
                Ok(metadata) if metadata.is_file() => {
                    return Ok(Some(ConfigFile {
                        path,
                        format: *format,
                    }));
                }
                Ok(_) => {
                    return Err(LoadError::Read {
                        path,
                        source: io::Error::new(io::ErrorKind::Other, "not a regular file"),
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(source) => return Err(LoadError::Read { path, source }),
            }
        }
    }
    Ok(None)
}

/// Read and decode a config file.
///
/// A file that vanished between discovery and read counts as absent (`Ok(None)`).
pub fn read_config_file(file: &ConfigFile) -> Result<Option<Value>, LoadError> {
    let content = match std::fs::read_to_string(&file.path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(LoadError::Read {
                path: file.path.clone(),
                source,
            })
        }
    };

    let value = file
        .format
        .decode(&content)
        .map_err(|message| LoadError::Decode {
            path: file.path.clone(),
            format: file.format.name(),
            message,
        })?;
    Ok(Some(value))
}

/// Find, read and decode the config file, if any.
pub fn load_config_file(options: &LoadOptions) -> Result<Option<(ConfigFile, Value)>, LoadError> {
    let Some(file) = find_config_file(options)? else {
        debug!(
            candidates = ?candidate_paths(options),
            "No config file found, using record defaults"
        );
        return Ok(None);
    };

    info!(config_path = %file.path.display(), format = file.format.name(), "Loading config file");
    Ok(read_config_file(&file)?.map(|value| (file, value)))
}

/// Candidate paths in search order, for diagnostics.
pub fn candidate_paths(options: &LoadOptions) -> Vec<PathBuf> {
    options
        .paths()
        .iter()
        .flat_map(|dir| candidates_in(dir, options.name()))
        .collect()
}

fn candidates_in<'a>(dir: &'a Path, name: &'a str) -> impl Iterator<Item = PathBuf> + 'a {
    FileFormat::ALL
        .iter()
        .map(move |(ext, _)| dir.join(format!("{}.{}", name, ext)))
}
