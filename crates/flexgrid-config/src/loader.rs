use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{env, fs};

use flexgrid_core::{GridConfig, MAX_FREQUENCY_PRECISION};
use rust_decimal::Decimal;

use crate::error::{ConfigError, Result};

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "FLEXGRID_CONFIG";

/// Where the effective configuration came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Env(PathBuf),
    Home(PathBuf),
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Env(p) | Self::Home(p) => Some(p),
            Self::Defaults => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct LoadedConfig {
    pub config: GridConfig,
    pub source: ConfigSource,
}

/// `$HOME/.flexgrid/config.toml`.
pub fn default_config_path() -> PathBuf {
    home_dir().join(".flexgrid").join("config.toml")
}

fn home_dir() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Load the grid configuration.
///
/// Resolution order: `explicit`, then `FLEXGRID_CONFIG`, then the home config
/// file if it exists, then built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let home = default_config_path();
    let home = home.is_file().then_some(home);
    let source = resolve_source(explicit, env::var_os(CONFIG_ENV_VAR), home);
    tracing::debug!("config source: {source:?}");

    let config = match source.path() {
        Some(path) => {
            let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            let config = parse(&content)?;
            tracing::info!("loaded grid config from {}", path.display());
            config
        }
        None => GridConfig::default(),
    };
    Ok(LoadedConfig { config, source })
}

/// Parse and validate TOML config content.
pub fn parse(content: &str) -> Result<GridConfig> {
    let config: GridConfig = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

// ---------------------------------------------------------------------------
// Pure helpers (no I/O, fully unit-testable)
// ---------------------------------------------------------------------------

fn resolve_source(
    explicit: Option<&Path>,
    env_value: Option<OsString>,
    home: Option<PathBuf>,
) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        return ConfigSource::Env(PathBuf::from(value));
    }
    match home {
        Some(path) => ConfigSource::Home(path),
        None => ConfigSource::Defaults,
    }
}

fn validate(config: &GridConfig) -> Result<()> {
    ensure_positive("default_width", config.default_width)?;
    for (name, precision) in [
        ("fixed_grid_precision", config.fixed_grid_precision),
        ("flex_grid_precision", config.flex_grid_precision),
    ] {
        if precision > MAX_FREQUENCY_PRECISION {
            return Err(ConfigError::InvalidData(format!(
                "{name} = {precision} exceeds {MAX_FREQUENCY_PRECISION}"
            )));
        }
    }

    let mut seen = HashSet::new();
    for entry in &config.widths {
        ensure_positive(
            &format!("width for rate {} {}", entry.rate, entry.modulation),
            entry.width,
        )?;
        if !seen.insert((entry.rate, entry.modulation)) {
            return Err(ConfigError::InvalidData(format!(
                "duplicate width entry for rate {} and modulation format {}",
                entry.rate, entry.modulation
            )));
        }
    }
    Ok(())
}

fn ensure_positive(name: &str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        return Err(ConfigError::InvalidData(format!(
            "{name} must be positive, got {value}"
        )));
    }
    Ok(())
}
