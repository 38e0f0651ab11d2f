//! Tiercfg: Layered Configuration Loading
//!
//! Populates a caller-owned configuration struct from the first config file found on a
//! search path (YAML, TOML or JSON), then lets environment variables override individual
//! fields. Only fields that declare an override key can be overridden; the variable name
//! is `<PREFIX>_<KEY>`, uppercased, regardless of how deeply the field is nested.
//!
//! ```no_run
//! use serde::{Deserialize, Serialize};
//! use tiercfg::{env_record, load, LoadOptions};
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Server {
//!     host: String,
//!     port: u16,
//! }
//!
//! #[derive(Debug, Default, Serialize, Deserialize)]
//! struct Config {
//!     server: Server,
//! }
//!
//! env_record!(Server { host = "SERVER_HOST", port = "SERVER_PORT" });
//! env_record!(Config { nested server });
//!
//! let mut config = Config::default();
//! load(&mut config, &LoadOptions::new().with_env_prefix("myapp")).unwrap();
//! // MYAPP_SERVER_PORT=8080 now wins over `server.port` in ./config.yaml
//! ```

pub mod env;
pub mod error;
pub mod loader;
pub mod logging;
pub mod merge;
pub mod options;
pub mod overrides;
pub mod record;
pub mod sources;

pub use env::{env_key, EnvSource, ProcessEnv};
pub use error::{LoadError, OverrideError, ScalarError};
pub use loader::{load, load_with_env, must_load};
pub use options::LoadOptions;
pub use overrides::{apply_overrides, override_bindings, OverrideBinding};
pub use record::{Field, FieldVisitor, IntoSlot, Record, Slot};
