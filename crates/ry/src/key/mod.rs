//! # Input keys
//!
//! ## Overview
//!
//! This module contains code for representing and matching keys.
//!
//! A [KeyStroke] is a single key press, and a [Key] is an ordered sequence of them, used both for
//! describing bindings and for accumulating the keys typed so far.
//!
//! Strokes can be written in a compact textual form, where the modifier prefixes `C-` (Control),
//! `A-` (Alt) and `S-` (Shift) are followed by the key itself. The key is either a single
//! character, one of the special keys `ESC`, `RET`, `BAK`, `TAB` and `DEL`, one of the wildcards
//! `$any` and `$alpha`, or the name of some other key (like `UP` or `F1`).
//!
//! ## Example
//!
//! ```
//! use ry::key::{Key, KeyStroke};
//!
//! let key: Key = "C-x C-s".parse().unwrap();
//! assert_eq!(key.len(), 2);
//!
//! let any: KeyStroke = "$any".parse().unwrap();
//! assert!(any.matches(&KeyStroke::from_raw_event("CTRL_ALT_X")));
//! ```
use std::fmt;
use std::str::FromStr;

use self::parse::{parse_compact_mods, parse_compact_token, parse_raw_mods, parse_raw_token};
use crate::errors::KeyError;

mod parse;

bitflags::bitflags! {
    /// Modifier keys held down during a key press.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct Modifiers: u8 {
        /// The Control key.
        const CTRL  = 0b001;
        /// The Alt key.
        const ALT   = 0b010;
        /// The Shift key.
        const SHIFT = 0b100;
    }
}

/// Keys that have a special meaning to the editor.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SpecialKey {
    /// The Escape key (`ESC`).
    Escape,
    /// The Enter key (`RET`).
    Enter,
    /// The Backspace key (`BAK`).
    Backspace,
    /// The Tab key (`TAB`).
    Tab,
    /// The Delete key (`DEL`).
    Delete,
}

impl SpecialKey {
    fn token(&self) -> &'static str {
        match self {
            SpecialKey::Escape => "ESC",
            SpecialKey::Enter => "RET",
            SpecialKey::Backspace => "BAK",
            SpecialKey::Tab => "TAB",
            SpecialKey::Delete => "DEL",
        }
    }
}

/// Classes of keys that a binding can match on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Wildcard {
    /// Matches any key (`$any`).
    Any,
    /// Matches any ASCII alphabetic character, whatever modifiers are held (`$alpha`).
    Alpha,
}

/// What was pressed, apart from the modifiers.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum KeyCode {
    /// A single character.
    Char(char),
    /// A key with special meaning to the editor.
    Special(SpecialKey),
    /// A wildcard that matches a class of keys.
    Wildcard(Wildcard),
    /// Any other key, identified by a multi-character name.
    Name(String),
}

/// A single key press.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct KeyStroke {
    mods: Modifiers,
    code: KeyCode,
}

impl KeyStroke {
    /// Create a new keystroke.
    pub fn new(code: KeyCode, mods: Modifiers) -> Self {
        KeyStroke { mods, code }
    }

    /// Create a new keystroke for a character without any modifiers.
    pub fn char(c: char) -> Self {
        KeyStroke::new(KeyCode::Char(c), Modifiers::empty())
    }

    /// Create a new keystroke for a special key without any modifiers.
    pub fn special(key: SpecialKey) -> Self {
        KeyStroke::new(KeyCode::Special(key), Modifiers::empty())
    }

    /// Create a keystroke from the name of a terminal key event.
    ///
    /// Single-character names are taken literally. Otherwise, the prefixes `CTRL_`, `ALT_` and
    /// `SHIFT_` are removed (in that order), and the rest is either a special key (`ESCAPE`,
    /// `ENTER`, `BACKSPACE`, `TAB` or `DELETE`) or the key itself. Single characters left after
    /// removing a modifier are lowercased, so `CTRL_Q` is the same as `C-q`. This never fails.
    pub fn from_raw_event(name: &str) -> Self {
        let mut chars = name.chars();

        if let (Some(c), None) = (chars.next(), chars.next()) {
            return KeyStroke::char(c);
        }

        let (rest, mods) = parse_raw_mods(name).unwrap_or((name, Modifiers::empty()));
        let code = parse_raw_token(rest, mods);

        return KeyStroke::new(code, mods);
    }

    /// The modifiers held down for this keystroke.
    pub fn modifiers(&self) -> Modifiers {
        self.mods
    }

    /// What was pressed.
    pub fn code(&self) -> &KeyCode {
        &self.code
    }

    /// Whether the Control key was held.
    pub fn ctrl(&self) -> bool {
        self.mods.contains(Modifiers::CTRL)
    }

    /// Whether the Alt key was held.
    pub fn alt(&self) -> bool {
        self.mods.contains(Modifiers::ALT)
    }

    /// Whether the Shift key was held.
    pub fn shift(&self) -> bool {
        self.mods.contains(Modifiers::SHIFT)
    }

    /// Return this keystroke's character, if it is one.
    pub fn get_char(&self) -> Option<char> {
        if let KeyCode::Char(c) = self.code {
            return Some(c);
        }

        None
    }

    /// Whether this keystroke is the given special key.
    pub fn is_special(&self, key: SpecialKey) -> bool {
        self.code == KeyCode::Special(key)
    }

    fn is_wildcard(&self, wc: Wildcard) -> bool {
        self.code == KeyCode::Wildcard(wc)
    }

    fn is_alpha(&self) -> bool {
        self.get_char().map(|c| c.is_ascii_alphabetic()).unwrap_or(false)
    }

    /// Check whether two keystrokes match each other.
    ///
    /// `$any` matches every keystroke, and `$alpha` matches any alphabetic character regardless
    /// of modifiers. Otherwise, the modifiers and keys must be the same. Matching is commutative.
    pub fn matches(&self, other: &KeyStroke) -> bool {
        if self.is_wildcard(Wildcard::Any) || other.is_wildcard(Wildcard::Any) {
            return true;
        }

        if self.is_wildcard(Wildcard::Alpha) && other.is_alpha() {
            return true;
        }

        if other.is_wildcard(Wildcard::Alpha) && self.is_alpha() {
            return true;
        }

        return self == other;
    }
}

impl FromStr for KeyStroke {
    type Err = KeyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let malformed = || KeyError::MalformedKeySpec(input.to_string());
        let (rest, mods) = parse_compact_mods(input).map_err(|_| malformed())?;
        let code = parse_compact_token(rest).ok_or_else(malformed)?;

        Ok(KeyStroke::new(code, mods))
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl() {
            write!(f, "C-")?;
        }

        if self.alt() {
            write!(f, "A-")?;
        }

        if self.shift() {
            write!(f, "S-")?;
        }

        match &self.code {
            KeyCode::Char(c) => write!(f, "{}", c),
            KeyCode::Special(sk) => write!(f, "{}", sk.token()),
            KeyCode::Wildcard(Wildcard::Any) => write!(f, "$any"),
            KeyCode::Wildcard(Wildcard::Alpha) => write!(f, "$alpha"),
            KeyCode::Name(name) => write!(f, "{}", name),
        }
    }
}

/// An ordered sequence of [KeyStrokes](KeyStroke).
///
/// Keys used in bindings are never empty. The empty key is used as the starting point for
/// accumulating typed keystrokes.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Key {
    strokes: Vec<KeyStroke>,
}

impl Key {
    /// Create an empty key sequence.
    pub fn new() -> Self {
        Key::default()
    }

    /// Parse a whitespace-separated sequence of compact keystrokes.
    pub fn parse(input: &str) -> Result<Self, KeyError> {
        let strokes = input
            .split_whitespace()
            .map(KeyStroke::from_str)
            .collect::<Result<Vec<_>, _>>()?;

        if strokes.is_empty() {
            return Err(KeyError::EmptyKey);
        }

        Ok(Key { strokes })
    }

    /// Add a keystroke to the end of this sequence.
    pub fn append(&mut self, stroke: KeyStroke) {
        self.strokes.push(stroke);
    }

    /// Remove all keystrokes from this sequence.
    pub fn clear(&mut self) {
        self.strokes.clear();
    }

    /// The number of keystrokes in this sequence.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Whether this sequence contains no keystrokes.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// The keystrokes in this sequence.
    pub fn strokes(&self) -> &[KeyStroke] {
        self.strokes.as_slice()
    }

    /// Whether this sequence matches another one stroke-for-stroke over their full length.
    pub fn matches(&self, other: &Key) -> bool {
        self.len() == other.len() && self.matches_prefix(other)
    }

    /// Whether this sequence is strictly longer than `prefix`, and begins with keystrokes that
    /// match it.
    pub fn continues(&self, prefix: &Key) -> bool {
        self.len() > prefix.len() && self.matches_prefix(prefix)
    }

    fn matches_prefix(&self, prefix: &Key) -> bool {
        self.strokes.iter().zip(prefix.strokes.iter()).all(|(a, b)| a.matches(b))
    }
}

impl FromStr for Key {
    type Err = KeyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Key::parse(input)
    }
}

impl From<Vec<KeyStroke>> for Key {
    fn from(strokes: Vec<KeyStroke>) -> Self {
        Key { strokes }
    }
}

impl From<KeyStroke> for Key {
    fn from(stroke: KeyStroke) -> Self {
        Key { strokes: vec![stroke] }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, stroke) in self.strokes.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }

            write!(f, "{}", stroke)?;
        }

        Ok(())
    }
}
