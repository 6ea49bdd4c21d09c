//! # Styles
//!
//! ## Overview
//!
//! [Styles] maps names to the colours and weight used when drawing. The `default` and
//! `statusbar` styles always exist, and looking up any other unknown name falls back to
//! `default`.
//!
//! Styles are written as `fg,bg[,weight]`, where the colours are terminal colour indexes (an
//! empty field means the terminal's own colour) and the weight is `bold` or `normal`.
//!
//! ```
//! use ry::style::{Style, Styles};
//!
//! let mut styles = Styles::default();
//! styles.set("comment", "8,").unwrap();
//!
//! assert_eq!(styles.get("comment"), Style { fg: Some(8), bg: None, bold: false });
//! assert_eq!(styles.get("keyword"), styles.get("default"));
//! ```
use std::collections::HashMap;
use std::str::FromStr;

use crate::errors::StyleError;

/// The style used for anything without a style of its own.
pub const DEFAULT_STYLE: &str = "default";

/// The style used for the status line.
pub const STATUSBAR_STYLE: &str = "statusbar";

/// Colours and weight for drawing text.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Style {
    /// Foreground colour index, or the terminal's default.
    pub fg: Option<u8>,

    /// Background colour index, or the terminal's default.
    pub bg: Option<u8>,

    /// Whether to draw in bold.
    pub bold: bool,
}

impl Style {
    fn parse(name: &str, desc: &str) -> Result<Self, StyleError> {
        let mut fields = desc.split(',').map(str::trim);

        let color = |field: Option<&str>| -> Result<Option<u8>, StyleError> {
            match field {
                None | Some("") => Ok(None),
                Some(s) => {
                    u8::from_str(s)
                        .map(Some)
                        .map_err(|_| StyleError::InvalidColor(s.to_string(), name.to_string()))
                },
            }
        };

        let fg = color(fields.next())?;
        let bg = color(fields.next())?;
        let bold = match fields.next() {
            None | Some("") | Some("normal") => false,
            Some("bold") => true,
            Some(s) => return Err(StyleError::InvalidWeight(s.to_string(), name.to_string())),
        };

        if let Some(extra) = fields.next() {
            return Err(StyleError::InvalidWeight(extra.to_string(), name.to_string()));
        }

        Ok(Style { fg, bg, bold })
    }
}

/// A registry of named styles.
#[derive(Clone, Debug)]
pub struct Styles {
    styles: HashMap<String, Style>,
}

impl Styles {
    /// Look up a style, falling back to the default style.
    pub fn get(&self, name: &str) -> Style {
        self.styles
            .get(name)
            .or_else(|| self.styles.get(DEFAULT_STYLE))
            .copied()
            .unwrap_or_default()
    }

    /// Parse a `fg,bg[,weight]` description and store it under a name.
    pub fn set(&mut self, name: &str, desc: &str) -> Result<(), StyleError> {
        let style = Style::parse(name, desc)?;

        self.insert(name, style);

        Ok(())
    }

    /// Store a style under a name.
    pub fn insert(&mut self, name: &str, style: Style) {
        self.styles.insert(name.to_string(), style);
    }
}

impl Default for Styles {
    fn default() -> Self {
        let mut styles = HashMap::new();

        styles.insert(DEFAULT_STYLE.to_string(), Style { fg: Some(15), bg: None, bold: false });
        styles.insert(STATUSBAR_STYLE.to_string(), Style { fg: Some(0), bg: Some(15), bold: false });

        Styles { styles }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! style {
        ($fg: expr, $bg: expr) => {
            Style { fg: $fg, bg: $bg, bold: false }
        };
        ($fg: expr, $bg: expr, bold) => {
            Style { fg: $fg, bg: $bg, bold: true }
        };
    }

    #[test]
    fn test_defaults() {
        let styles = Styles::default();

        assert_eq!(styles.get("default"), style!(Some(15), None));
        assert_eq!(styles.get("statusbar"), style!(Some(0), Some(15)));
        assert_eq!(styles.get("missing"), style!(Some(15), None));
    }

    #[test]
    fn test_set() {
        let mut styles = Styles::default();

        styles.set("a", "1,2").unwrap();
        styles.set("b", ",4").unwrap();
        styles.set("c", "").unwrap();
        styles.set("d", " 9 , 10 , bold").unwrap();
        styles.set("e", "3,,normal").unwrap();

        assert_eq!(styles.get("a"), style!(Some(1), Some(2)));
        assert_eq!(styles.get("b"), style!(None, Some(4)));
        assert_eq!(styles.get("c"), style!(None, None));
        assert_eq!(styles.get("d"), style!(Some(9), Some(10), bold));
        assert_eq!(styles.get("e"), style!(Some(3), None));
    }

    #[test]
    fn test_set_default_changes_fallback() {
        let mut styles = Styles::default();
        styles.set("default", "7,0").unwrap();

        assert_eq!(styles.get("unknown"), style!(Some(7), Some(0)));
    }

    #[test]
    fn test_set_invalid() {
        let mut styles = Styles::default();

        assert_eq!(
            styles.set("a", "red,"),
            Err(StyleError::InvalidColor("red".into(), "a".into()))
        );
        assert_eq!(
            styles.set("a", "1,256"),
            Err(StyleError::InvalidColor("256".into(), "a".into()))
        );
        assert_eq!(
            styles.set("a", "1,2,heavy"),
            Err(StyleError::InvalidWeight("heavy".into(), "a".into()))
        );
        assert_eq!(
            styles.set("a", "1,2,bold,x"),
            Err(StyleError::InvalidWeight("x".into(), "a".into()))
        );
        assert_eq!(styles.get("a"), styles.get("default"));
    }
}
