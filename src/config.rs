//! Configuration file support.
//!
//! Settings are read from `pocketcalc/config.toml` under the platform config
//! directory (or a path given on the command line). A missing default file means defaults.
//!
//! # Example TOML
//! ```toml
//! [display]
//! history_rows = 8
//! show_timestamps = false
//!
//! [keys]
//! o = "cos"
//! ```
//!
//! Validation reports every problem at once instead of stopping at the first.

use crate::input::{Action, Keymap};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;
use tracing::{debug, info};

/// Upper bound for `display.history_rows`.
pub const MAX_HISTORY_ROWS: usize = 500;

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,

    /// Extra key bindings, key character to action name
    #[serde(default)]
    pub keys: BTreeMap<String, String>,
}

/// Trace list settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Rows of the trace list shown at once
    #[serde(default = "default_history_rows")]
    pub history_rows: usize,

    /// Prefix trace rows with local wall-clock time
    #[serde(default)]
    pub show_timestamps: bool,
}

fn default_history_rows() -> usize {
    8
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            history_rows: default_history_rows(),
            show_timestamps: false,
        }
    }
}

/// One problem found while validating a config.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("display.history_rows must be between 1 and {max} (got {rows})")]
    HistoryRows { rows: usize, max: usize },

    #[error("key '{0}' must be a single character")]
    KeyNotSingleChar(String),

    #[error("key '{0}' has a fixed meaning and cannot be rebound")]
    FixedKey(char),

    #[error("key '{key}' is bound to unknown action '{action}'")]
    UnknownAction { key: String, action: String },
}

/// Errors loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {}", join_violations(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn join_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

type Checked<T> = Validation<T, NonEmptyVec<ConfigViolation>>;

fn check_binding(key: &str, action: &str) -> Checked<(char, Action)> {
    let mut chars = key.chars();
    let key_char = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Validation::fail(ConfigViolation::KeyNotSingleChar(key.to_string())),
    };
    if Keymap::is_fixed(key_char) {
        return Validation::fail(ConfigViolation::FixedKey(key_char));
    }
    match action.parse::<Action>() {
        Ok(action) => Validation::success((key_char, action)),
        Err(_) => Validation::fail(ConfigViolation::UnknownAction {
            key: key.to_string(),
            action: action.to_string(),
        }),
    }
}

impl Config {
    /// Default config file location: `pocketcalc/config.toml` under the
    /// platform config directory, such as `~/.config` on Linux.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("pocketcalc").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// tried and defaults are used if nothing is there.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    debug!("no config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse configuration text without validating it.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn check_rows(&self) -> Checked<()> {
        let rows = self.display.history_rows;
        if (1..=MAX_HISTORY_ROWS).contains(&rows) {
            Validation::success(())
        } else {
            Validation::fail(ConfigViolation::HistoryRows {
                rows,
                max: MAX_HISTORY_ROWS,
            })
        }
    }

    /// Validate every setting, accumulating all violations.
    ///
    /// On success yields the extra key bindings.
    pub fn validate(&self) -> Checked<Vec<(char, Action)>> {
        let bindings: Vec<Checked<(char, Action)>> = self
            .keys
            .iter()
            .map(|(key, action)| check_binding(key, action))
            .collect();

        let checks = vec![
            self.check_rows().map(|_| Vec::new()),
            Validation::all_vec(bindings),
        ];

        Validation::all_vec(checks).map(|parts| parts.into_iter().flatten().collect())
    }

    /// Key table with this config's bindings applied.
    pub fn keymap(&self) -> Result<Keymap, ConfigError> {
        match self.validate() {
            Validation::Success(bindings) => Ok(Keymap::new().with_bindings(bindings)),
            Validation::Failure(violations) => Err(ConfigError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }
}
