//! # Editor stores
//!
//! ## Overview
//!
//! These components hold state shared across buffers: the [Clipboards] that commands copy text
//! into, the [Messenger] holding the message to show on the status line, and the [Hooks] that
//! get run when the editor changes state.
use std::collections::HashMap;
use std::fmt;

/// The clipboard used when no other is named.
pub const DEFAULT_CLIPBOARD: &str = "_";

/// Named clipboards holding text.
#[derive(Clone, Debug, Default)]
pub struct Clipboards {
    clipboards: HashMap<String, String>,
}

impl Clipboards {
    /// Get the contents of a clipboard, or an empty string if nothing has been stored there.
    pub fn get(&self, name: &str) -> &str {
        self.clipboards.get(name).map(String::as_str).unwrap_or_default()
    }

    /// Replace the contents of a clipboard.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.clipboards.insert(name.to_string(), value.into());
    }
}

/// What kind of message is being shown.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MessageKind {
    /// Something the user might want to know.
    Info,
    /// Something that went wrong.
    Error,
}

/// The most recent message to show to the user.
#[derive(Clone, Debug, Default)]
pub struct Messenger {
    message: Option<(MessageKind, String)>,
}

impl Messenger {
    /// Show an informational message.
    pub fn info(&mut self, msg: impl Into<String>) {
        self.message = Some((MessageKind::Info, msg.into()));
    }

    /// Show an error message.
    pub fn error(&mut self, msg: impl Into<String>) {
        self.message = Some((MessageKind::Error, msg.into()));
    }

    /// Remove the current message.
    pub fn clear(&mut self) {
        self.message = None;
    }

    /// The current message, if there is one.
    pub fn message(&self) -> Option<(MessageKind, &str)> {
        self.message.as_ref().map(|(kind, msg)| (*kind, msg.as_str()))
    }
}

/// A callback run when a hook is triggered.
pub type HookFn = Box<dyn Fn(&[&str])>;

/// Callbacks to run when named events happen.
///
/// The [Editor](crate::editor::Editor) triggers:
///
/// * `enter-mode` with the new mode's name
/// * `switch-buffer` with the new buffer's name
/// * `key` with the key sequence that was just matched
#[derive(Default)]
pub struct Hooks {
    hooks: HashMap<String, Vec<HookFn>>,
}

impl Hooks {
    /// Register a callback for a hook.
    pub fn hook(&mut self, name: &str, cb: impl Fn(&[&str]) + 'static) {
        self.hooks.entry(name.to_string()).or_default().push(Box::new(cb));
    }

    /// Run the callbacks for a hook, in the order they were registered.
    pub fn trigger(&self, name: &str, args: &[&str]) {
        for cb in self.hooks.get(name).into_iter().flatten() {
            cb(args);
        }
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = self.hooks.keys().collect::<Vec<_>>();
        names.sort();

        f.debug_struct("Hooks").field("names", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_clipboards() {
        let mut cbs = Clipboards::default();
        assert_eq!(cbs.get(DEFAULT_CLIPBOARD), "");

        cbs.set(DEFAULT_CLIPBOARD, "hello");
        cbs.set("a", "world");
        assert_eq!(cbs.get(DEFAULT_CLIPBOARD), "hello");
        assert_eq!(cbs.get("a"), "world");

        cbs.set("a", "again");
        assert_eq!(cbs.get("a"), "again");
        assert_eq!(cbs.get("b"), "");
    }

    #[test]
    fn test_messenger() {
        let mut msgs = Messenger::default();
        assert_eq!(msgs.message(), None);

        msgs.info("saved");
        assert_eq!(msgs.message(), Some((MessageKind::Info, "saved")));

        msgs.error("failed");
        assert_eq!(msgs.message(), Some((MessageKind::Error, "failed")));

        msgs.clear();
        assert_eq!(msgs.message(), None);
    }

    #[test]
    fn test_hooks() {
        let seen = Rc::new(RefCell::new(Vec::<String>::new()));
        let mut hooks = Hooks::default();

        let s1 = seen.clone();
        hooks.hook("enter-mode", move |args| s1.borrow_mut().push(format!("1:{}", args.join(","))));

        let s2 = seen.clone();
        hooks.hook("enter-mode", move |args| s2.borrow_mut().push(format!("2:{}", args.join(","))));

        hooks.trigger("enter-mode", &["insert"]);
        hooks.trigger("switch-buffer", &["foo"]);

        assert_eq!(*seen.borrow(), vec!["1:insert".to_string(), "2:insert".to_string()]);
    }
}
