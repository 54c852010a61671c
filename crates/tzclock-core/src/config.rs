use std::{
    env::VarError,
    fs, io,
    path::{Path, PathBuf},
};

pub use tzclock_proto::config::*;

use log::{info, warn};
use masterror::AppError;
use shellexpand::{LookupError, full};
use thiserror::Error;

use crate::{
    modules::clock::{FormatError, ReadingFormats},
    zone::{ZoneError, ZoneId},
};

/// Failures while locating, reading or validating the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to expand config path '{path}': {source}")]
    Expand {
        path:   String,
        source: LookupError<VarError>,
    },

    #[error("config file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path:   PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Validation(#[from] ConfigValidationError),

    #[error("invalid configuration: {0}")]
    Zone(#[from] ZoneError),

    #[error("invalid configuration: {0}")]
    Format(#[from] FormatError),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::internal(err.to_string())
    }
}

/// Loads and validates the configuration.
///
/// An explicitly provided path must exist. When no path is given the default
/// location is used, and a missing file there yields the defaults.
///
/// # Errors
///
/// Returns [`ConfigError`] when the path cannot be expanded, the file cannot
/// be read or parsed, or the configuration fails validation.
pub fn get_config(path: Option<PathBuf>) -> Result<(Config, PathBuf), ConfigError> {
    let config = match path {
        Some(path) => {
            info!("Config path provided {path:?}");
            let expanded = expand_path(&path)?;

            if !expanded.exists() {
                return Err(ConfigError::NotFound { path: expanded });
            }

            (read_config(&expanded)?, expanded)
        }
        None => {
            let expanded = expand_path(Path::new(DEFAULT_CONFIG_FILE_PATH))?;

            if expanded.exists() {
                (read_config(&expanded)?, expanded)
            } else {
                info!("No config file at {expanded:?}, using defaults");
                (Config::default(), expanded)
            }
        }
    };

    validate_config(&config.0)?;

    Ok(config)
}

/// Checks structure, that every zone id is in the tz database, and that the
/// readout formats are usable.
///
/// # Errors
///
/// Returns the first [`ConfigError`] found.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    config.validate()?;

    for id in &config.zones {
        ZoneId::parse(id)?;
    }

    for clock in &config.clocks {
        if let ClockBinding::Fixed(id) = &clock.zone {
            ZoneId::parse(id)?;
        }
    }

    for id in config.labels.keys() {
        if ZoneId::parse(id).is_err() {
            warn!("Ignoring label for unknown zone '{id}'");
        }
    }

    ReadingFormats::from_config(&config.format)?;

    Ok(())
}

fn expand_path(path: &Path) -> Result<PathBuf, ConfigError> {
    let str_path = path.to_string_lossy();
    let expanded = full(&str_path).map_err(|source| ConfigError::Expand {
        path: str_path.to_string(),
        source,
    })?;

    Ok(PathBuf::from(expanded.as_ref()))
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| {
        warn!("Failed to read config file: {source}");
        ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!("Decoding config file {path:?}");

    let config = toml::from_str(&content).map_err(|source| {
        warn!("Failed to parse config file: {source}");
        ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!("Config file loaded successfully");
    Ok(config)
}
