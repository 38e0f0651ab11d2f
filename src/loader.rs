//! Load orchestration
//!
//! Settings are resolved with the following priority (highest to lowest):
//! 1. Environment variables (`<PREFIX>_<KEY>`, only for fields that declare a key)
//! 2. The first config file found on the search path
//! 3. Whatever the record held before the call (usually `Default`)

use crate::env::{EnvSource, ProcessEnv};
use crate::error::{LoadError, MergeError};
use crate::merge::merge_into;
use crate::options::LoadOptions;
use crate::overrides::apply_overrides;
use crate::record::Record;
use crate::sources::load_config_file;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Load `record` from the config file and the process environment.
pub fn load<T>(record: &mut T, options: &LoadOptions) -> Result<(), LoadError>
where
    T: Record + Serialize + DeserializeOwned,
{
    load_with_env(record, options, &ProcessEnv)
}

/// Load `record` from the config file and the given environment.
///
/// Options are validated before any file or environment access. A missing file is not an
/// error; a malformed one aborts before the environment pass.
pub fn load_with_env<T, E>(record: &mut T, options: &LoadOptions, env: &E) -> Result<(), LoadError>
where
    T: Record + Serialize + DeserializeOwned,
    E: EnvSource + ?Sized,
{
    options.validate()?;

    if let Some((file, value)) = load_config_file(options)? {
        merge_into(record, value).map_err(|e| match e {
            MergeError::Deserialize(e) => LoadError::Decode {
                path: file.path.clone(),
                format: file.format.name(),
                message: e.to_string(),
            },
            other => LoadError::Merge(other),
        })?;
    }

    apply_overrides(record, options.env_prefix(), env)?;
    Ok(())
}

/// Like [`load`], but panics on failure.
///
/// Intended for process startup where a bad configuration should stop the program.
pub fn must_load<T>(record: &mut T, options: &LoadOptions)
where
    T: Record + Serialize + DeserializeOwned,
{
    if let Err(e) = load(record, options) {
        panic!("tiercfg: failed to load config: {}", e);
    }
}
