//! Environment lookup capability and variable naming

use std::collections::HashMap;
use std::env::VarError;
use tracing::debug;

/// Read-only key/value view of an environment.
pub trait EnvSource {
    /// Value of `key`, or `None` when the variable is not set.
    fn lookup(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, key: &str) -> Option<String> {
        match std::env::var(key) {
            Ok(value) => Some(value),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(_)) => {
                debug!(variable = key, "Ignoring environment variable with non-unicode value");
                None
            }
        }
    }
}

impl EnvSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// Compute the environment variable name for an override key.
///
/// `PREFIX_KEY` when the prefix is non-empty, else `KEY`; both parts uppercased.
pub fn env_key(prefix: &str, key: &str) -> String {
    let key = key.to_uppercase();
    if prefix.is_empty() {
        key
    } else {
        format!("{}_{}", prefix.to_uppercase(), key)
    }
}
