//! # Configuration
//!
//! The configuration file is TOML, and is read from `ry/config.toml` in the user's configuration
//! directory unless another file is given on the command line:
//!
//! ```toml
//! unmapped = "discard"
//!
//! [styles]
//! default = "250,"
//! statusbar = "0,214,bold"
//!
//! [keys.normal]
//! "g g" = "goto top"
//! "C-x C-n" = "buffer-next"
//!
//! [keys.insert]
//! "C-c" = "enter-mode normal"
//! ```
//!
//! Bindings are added after the default ones, in the order they appear in the file.
use std::path::{Path, PathBuf};

use serde::Deserialize;

use ry::action::Action;
use ry::editor::{Editor, PendingPolicy};

use crate::errors::{TermError, TermResult};

/// What to do with keys that can't match any binding.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Unmapped {
    /// Keep them until Escape is pressed.
    #[default]
    Retain,
    /// Forget them.
    Discard,
}

impl From<Unmapped> for PendingPolicy {
    fn from(unmapped: Unmapped) -> Self {
        match unmapped {
            Unmapped::Retain => PendingPolicy::Retain,
            Unmapped::Discard => PendingPolicy::Discard,
        }
    }
}

/// The contents of a configuration file.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// What to do with unmapped keys.
    pub unmapped: Unmapped,

    /// Style descriptions, by name.
    pub styles: toml::Table,

    /// Key bindings, by mode name and then key sequence.
    pub keys: toml::Table,
}

impl Config {
    /// Where the configuration file is read from by default.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ry").join("config.toml"))
    }

    /// Parse a configuration.
    pub fn parse(text: &str) -> TermResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read a configuration file.
    pub fn load(path: &Path) -> TermResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| TermError::ConfigRead { path: path.to_path_buf(), source })?;

        tracing::info!(path = %path.display(), "loading configuration");

        Config::parse(&text)
    }

    /// Read the given configuration file, or else the default one if it exists.
    pub fn find(path: Option<&Path>) -> TermResult<Self> {
        if let Some(path) = path {
            return Config::load(path);
        }

        match Config::default_path() {
            Some(path) if path.is_file() => Config::load(&path),
            _ => Ok(Config::default()),
        }
    }

    /// Add this configuration's styles and bindings to an editor.
    pub fn apply(&self, editor: &mut Editor) -> TermResult<()> {
        editor.set_pending_policy(self.unmapped.into());

        for (name, desc) in self.styles.iter() {
            let desc = desc.as_str().ok_or_else(|| invalid(format!("styles.{}", name)))?;

            editor.styles.set(name, desc)?;
        }

        for (mode, keys) in self.keys.iter() {
            let keys = keys.as_table().ok_or_else(|| invalid(format!("keys.{}", mode)))?;
            let bindings = editor.modes.create(mode);

            for (key, action) in keys.iter() {
                let action = action
                    .as_str()
                    .ok_or_else(|| invalid(format!("keys.{}.{:?}", mode, key)))?
                    .parse::<Action>()
                    .map_err(|source| {
                        TermError::Action { mode: mode.clone(), key: key.clone(), source }
                    })?;

                bindings.bind_str(key, action).map_err(|source| {
                    TermError::Binding { mode: mode.clone(), key: key.clone(), source }
                })?;
            }

            tracing::debug!(mode = %mode, bindings = keys.len(), "configured mode");
        }

        Ok(())
    }
}

fn invalid(field: String) -> TermError {
    let msg = format!("expected a string for {}", field);

    TermError::Config(serde::de::Error::custom(msg))
}
