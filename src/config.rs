//! User-facing configuration for the REPL: history location and whether to
//! colorize diagnostics. Has no effect on language semantics; malformed or
//! missing configuration degrades to defaults with a warning, never a
//! hard failure.

use std::path::PathBuf;

use log::warn;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = ".rocks.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Colorize REPL prompts and error diagnostics.
    #[serde(default = "default_true")]
    pub color: bool,

    /// Where REPL history is persisted. Relative to `$HOME` unless absolute.
    #[serde(default = "default_history_file")]
    pub history_file: String,
}

fn default_true() -> bool {
    true
}

fn default_history_file() -> String {
    ".rocks_history".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config { color: default_true(), history_file: default_history_file() }
    }
}

impl Config {
    /// Loads `$HOME/.rocks.toml`, falling back to defaults (with a warning)
    /// if the file is absent or malformed.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            warn!("could not determine home directory, using default configuration");
            return Config::default();
        };

        if !path.exists() {
            return Config::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|error| {
                warn!("malformed config at {}: {error}, using defaults", path.display());
                Config::default()
            }),
            Err(error) => {
                warn!("could not read config at {}: {error}, using defaults", path.display());
                Config::default()
            },
        }
    }

    /// Resolves `history_file` against `$HOME` if it isn't already absolute.
    pub fn history_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.history_file);
        if path.is_absolute() {
            return path;
        }

        home::home_dir().map(|home| home.join(&path)).unwrap_or(path)
    }
}

fn config_path() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}
