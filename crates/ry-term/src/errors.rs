//! # Frontend errors
//!
//! Errors that stop the terminal frontend, either while starting up or while drawing.
use std::path::PathBuf;

use ry::errors::{EditorError, KeyError, StyleError};

/// Errors that end the program.
#[derive(thiserror::Error, Debug)]
pub enum TermError {
    /// Failure while talking to the terminal.
    #[error("Terminal error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file that couldn't be read.
    #[error("Unable to read configuration file {}: {source}", path.display())]
    ConfigRead {
        /// Where the configuration was expected.
        path: PathBuf,
        /// Why it couldn't be read.
        source: std::io::Error,
    },

    /// A configuration file that isn't valid TOML, or has the wrong shape.
    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A default binding that couldn't be parsed.
    #[error("Invalid key: {0}")]
    Key(#[from] KeyError),

    /// A key binding whose key sequence couldn't be parsed.
    #[error("Invalid key {key:?} in mode {mode:?}: {source}")]
    Binding {
        /// The mode being configured.
        mode: String,
        /// The key sequence as written.
        key: String,
        /// What was wrong with it.
        source: KeyError,
    },

    /// A key binding whose action couldn't be parsed.
    #[error("Invalid action for key {key:?} in mode {mode:?}: {source}")]
    Action {
        /// The mode being configured.
        mode: String,
        /// The key sequence as written.
        key: String,
        /// What was wrong with the action.
        source: EditorError,
    },

    /// A style that couldn't be parsed.
    #[error("Invalid style: {0}")]
    Style(#[from] StyleError),

    /// Failure while setting up the editor.
    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// Result type for the terminal frontend.
pub type TermResult<T> = Result<T, TermError>;
