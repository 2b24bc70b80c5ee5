pub mod error;
pub mod loader;

pub use error::{ConfigError, Result};
pub use loader::{CONFIG_ENV_VAR, ConfigSource, LoadedConfig, default_config_path, load, parse};
