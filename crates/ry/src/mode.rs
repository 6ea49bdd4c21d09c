//! # Modes
//!
//! ## Overview
//!
//! A [Mode] is a named, ordered list of [Bindings](Binding) from a [Key] to an [Action], and
//! [Modes] is the registry that the [Editor](crate::editor::Editor) looks modes up in by name.
//!
//! When several bindings match the keys typed so far, the binding with the most keystrokes
//! wins. Bindings with the same number of keystrokes are resolved in the order they were
//! registered, so the first one bound is the one that fires.
//!
//! ## Example
//!
//! ```
//! use ry::action::Action;
//! use ry::key::Key;
//! use ry::mode::Modes;
//!
//! let mut modes = Modes::default();
//! let normal = modes.create("normal");
//! normal.bind_str("i", Action::EnterMode("insert".into())).unwrap();
//! normal.bind_str("g g", Action::Message("top".into())).unwrap();
//!
//! let normal = modes.find("normal").unwrap();
//! let typed = Key::parse("g g").unwrap();
//! let binding = normal.handle(&typed).unwrap();
//!
//! assert_eq!(binding.action, Action::Message("top".into()));
//! assert!(modes.find("visual").is_none());
//! ```
use std::collections::HashMap;

use crate::action::Action;
use crate::errors::KeyError;
use crate::key::Key;

/// A key sequence and the action it runs.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    /// The keys that need to be typed.
    pub key: Key,

    /// What to do once they have been typed.
    pub action: Action,
}

/// A named collection of keybindings.
#[derive(Clone, Debug, Default)]
pub struct Mode {
    name: String,
    bindings: Vec<Binding>,
}

impl Mode {
    /// Create a new mode without any bindings.
    pub fn new(name: impl Into<String>) -> Self {
        Mode { name: name.into(), bindings: vec![] }
    }

    /// The name of this mode.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The bindings in this mode, in the order they were registered.
    pub fn bindings(&self) -> &[Binding] {
        self.bindings.as_slice()
    }

    /// Add a new binding.
    ///
    /// Earlier bindings for the same key are kept, and take priority over this one.
    pub fn bind(&mut self, key: Key, action: Action) -> &mut Self {
        self.bindings.push(Binding { key, action });

        self
    }

    /// Parse a key sequence, and add a new binding for it.
    pub fn bind_str(&mut self, key: &str, action: Action) -> Result<&mut Self, KeyError> {
        let key = Key::parse(key)?;

        Ok(self.bind(key, action))
    }

    /// Find the binding for a sequence of typed keys.
    ///
    /// Only bindings matching every keystroke of `keys` are candidates. The candidate with the
    /// most keystrokes is returned, and ties go to whichever was registered first.
    pub fn handle(&self, keys: &Key) -> Option<&Binding> {
        let mut found: Option<&Binding> = None;

        for binding in self.bindings.iter() {
            if !binding.key.matches(keys) {
                continue;
            }

            match found {
                Some(prev) if prev.key.len() >= binding.key.len() => {},
                _ => found = Some(binding),
            }
        }

        return found;
    }

    /// Whether a sequence of typed keys could still become one of this mode's bindings, if more
    /// keys are typed.
    pub fn continues(&self, keys: &Key) -> bool {
        self.bindings.iter().any(|b| b.key.continues(keys))
    }
}

/// A registry of [Modes](Mode), looked up by name.
#[derive(Clone, Debug, Default)]
pub struct Modes {
    modes: HashMap<String, Mode>,
}

impl Modes {
    /// Create a new mode, and return it so that bindings can be added.
    ///
    /// If a mode with this name already exists, then it is returned instead.
    pub fn create(&mut self, name: &str) -> &mut Mode {
        self.modes.entry(name.to_string()).or_insert_with(|| Mode::new(name))
    }

    /// Look up a mode by name.
    pub fn find(&self, name: &str) -> Option<&Mode> {
        self.modes.get(name)
    }

    /// Look up a mode by name for modification.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Mode> {
        self.modes.get_mut(name)
    }

    /// Whether a mode with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.modes.contains_key(name)
    }

    /// The number of modes.
    pub fn len(&self) -> usize {
        self.modes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::KeyStroke;

    macro_rules! key {
        ($s: expr) => {
            Key::parse($s).unwrap()
        };
    }

    macro_rules! msg {
        ($s: expr) => {
            Action::Message($s.to_string())
        };
    }

    macro_rules! assert_handle {
        ($mode: expr, $keys: expr, $act: expr) => {
            assert_eq!($mode.handle(&key!($keys)).map(|b| &b.action), Some(&$act));
        };
    }

    fn mode(bindings: &[(&str, Action)]) -> Mode {
        let mut mode = Mode::new("test");

        for (key, act) in bindings {
            mode.bind_str(key, act.clone()).unwrap();
        }

        mode
    }

    #[test]
    fn test_handle_exact() {
        let m = mode(&[("i", msg!("insert")), ("C-x C-s", msg!("save"))]);

        assert_handle!(m, "i", msg!("insert"));
        assert_handle!(m, "C-x C-s", msg!("save"));
        assert!(m.handle(&key!("x")).is_none());
        assert!(m.handle(&key!("C-x")).is_none());
        assert!(m.handle(&key!("C-x C-s C-s")).is_none());
    }

    #[test]
    fn test_handle_full_length() {
        let m = mode(&[("g", msg!("g")), ("g g", msg!("gg"))]);

        assert_handle!(m, "g", msg!("g"));
        assert_handle!(m, "g g", msg!("gg"));
        assert!(m.continues(&key!("g")));
        assert!(!m.continues(&key!("g g")));
    }

    #[test]
    fn test_handle_wildcards() {
        let m = mode(&[("r $any", msg!("replace")), ("f $alpha", msg!("find"))]);

        assert_handle!(m, "r 1", msg!("replace"));
        assert_handle!(m, "r C-A-x", msg!("replace"));
        assert_handle!(m, "f q", msg!("find"));
        assert!(m.handle(&key!("f 1")).is_none());
        assert!(m.continues(&key!("r")));
    }

    #[test]
    fn test_handle_tie_first_registered() {
        let m = mode(&[("$any", msg!("any")), ("x", msg!("x")), ("x", msg!("x2"))]);
        assert_handle!(m, "x", msg!("any"));

        let m = mode(&[("x", msg!("x")), ("$any", msg!("any")), ("x", msg!("x2"))]);
        assert_handle!(m, "x", msg!("x"));
        assert_handle!(m, "y", msg!("any"));
    }

    #[test]
    fn test_handle_empty() {
        let m = mode(&[("x", msg!("x"))]);

        assert!(m.handle(&Key::new()).is_none());
        assert!(m.continues(&Key::new()));
        assert!(Mode::new("empty").handle(&key!("x")).is_none());
    }

    #[test]
    fn test_bind_malformed() {
        let mut m = Mode::new("test");

        assert_eq!(
            m.bind_str("g C-", Action::NoOp).unwrap_err(),
            KeyError::MalformedKeySpec("C-".into())
        );
        assert!(m.bindings().is_empty());
    }

    #[test]
    fn test_bind_does_not_touch_typed_keys() {
        let mut m = Mode::new("test");
        m.bind_str("a", msg!("a")).unwrap();

        let mut typed = key!("a");
        assert_handle!(m, "a", msg!("a"));

        typed.append(KeyStroke::char('b'));
        assert!(m.handle(&typed).is_none());
        assert_eq!(m.bindings()[0].key, key!("a"));
    }

    #[test]
    fn test_modes_registry() {
        let mut modes = Modes::default();
        assert_eq!(modes.len(), 0);

        modes.create("normal").bind_str("i", msg!("insert")).unwrap();
        modes.create("insert");
        assert_eq!(modes.len(), 2);
        assert!(modes.contains("insert"));

        // Creating an existing mode keeps its bindings.
        modes.create("normal").bind_str("a", msg!("append")).unwrap();
        assert_eq!(modes.find("normal").unwrap().bindings().len(), 2);
        assert_eq!(modes.len(), 2);

        assert_eq!(modes.find("normal").unwrap().name(), "normal");
        assert!(modes.find("visual").is_none());
        assert!(modes.find_mut("visual").is_none());
    }
}
