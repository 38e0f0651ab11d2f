//! Shared test utilities for integration tests
//!
//! Tests that touch the real process environment go through [`with_env`], which serializes
//! access and restores every variable it touched.

use std::path::Path;
use std::sync::Mutex;

/// Global mutex to serialize process environment access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    saved: Vec<(String, Option<String>)>,
}

impl EnvState {
    fn capture(keys: &[&str]) -> Self {
        Self {
            saved: keys
                .iter()
                .map(|key| (key.to_string(), std::env::var(key).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (key, value) in self.saved {
            match value {
                Some(value) => std::env::set_var(&key, value),
                None => std::env::remove_var(&key),
            }
        }
    }
}

/// Run `f` with the given process environment variables set, then restore them.
pub fn with_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let keys: Vec<&str> = vars.iter().map(|(key, _)| *key).collect();
    let env_state = EnvState::capture(&keys);

    for (key, value) in vars {
        std::env::set_var(key, value);
    }

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));

    env_state.restore();

    match result {
        Ok(result) => result,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Write `contents` to `dir/name`, creating `dir` if needed.
pub fn write_file(dir: &Path, name: &str, contents: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(name), contents).unwrap();
}
