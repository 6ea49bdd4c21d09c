//! # Error Types
//!
//! ## Overview
//!
//! This module contains the error types returned while registering keybindings, parsing styles,
//! and running the actions bound to keys.
//!
//! The dispatch loop itself never fails: an unknown mode is treated as having no bindings, and a
//! missing buffer causes the key to be rejected. Errors only come out of [Editor::handle] when
//! the action it invokes fails.
//!
//! [Editor::handle]: crate::editor::Editor::handle

/// Errors that occur while parsing keys.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum KeyError {
    /// A key specification that doesn't describe a keystroke once its modifiers are removed.
    #[error("Malformed key specification: {0:?}")]
    MalformedKeySpec(String),

    /// A key sequence without any keystrokes in it.
    #[error("Empty key sequence")]
    EmptyKey,
}

/// Errors that occur while parsing styles.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum StyleError {
    /// A colour field that isn't a terminal colour index.
    #[error("Invalid colour {0:?} in style {1:?}")]
    InvalidColor(String, String),

    /// A weight field that isn't recognized.
    #[error("Invalid weight {0:?} in style {1:?}")]
    InvalidWeight(String, String),
}

/// Errors returned while running an [Action](crate::action::Action).
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EditorError {
    /// Failure due to a mode name that hasn't been created.
    #[error("No such mode: {0:?}")]
    UnknownMode(String),

    /// Failure due to a buffer name that isn't in the registry.
    #[error("No such buffer: {0:?}")]
    UnknownBuffer(String),

    /// Failure due to an action description that couldn't be understood.
    #[error("Invalid action: {0:?}")]
    InvalidAction(String),

    /// Failure while parsing a key.
    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    /// Failure while parsing a style.
    #[error("Style error: {0}")]
    Style(#[from] StyleError),

    /// Generic failure.
    #[error("Error: {0}")]
    Failure(String),
}

/// Common result type for editor operations.
pub type EditResult<V> = Result<V, EditorError>;
