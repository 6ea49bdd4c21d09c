//! # Dispatching keys
//!
//! ## Overview
//!
//! The [Editor] consumes one [KeyStroke] at a time, and decides which bound [Action], if any, the
//! keys typed so far should run.
//!
//! Two keys are handled before any bindings are looked at:
//!
//! * Control-q ends the session. It can't be rebound.
//! * Escape returns to the default mode ([DEFAULT_MODE]), and forgets any partially typed key
//!   sequence.
//!
//! Every other keystroke is added to the pending key sequence, which is then looked up in each of
//! the current buffer's local modes (in the order they were added), followed by the global mode.
//! The first mode that recognizes the sequence decides what happens:
//!
//! * If the mode has a longer binding that the sequence could still turn into, the editor waits
//!   for more keys. This is what lets `g g` be typed when `g` is bound on its own.
//! * Otherwise, if the mode has a binding for the sequence, the sequence is cleared and the
//!   binding's action runs.
//!
//! If no mode recognizes the sequence, but some shorter part of it was bound (like `g` above,
//! followed by a key that doesn't continue `g g`), then that binding runs and the remaining keys
//! are dispatched again. Anything left over is handled according to the [PendingPolicy].
//!
//! ## Example
//!
//! ```
//! use ry::action::Action;
//! use ry::buffer::Buffer;
//! use ry::editor::{Editor, Status};
//! use ry::key::{Key, KeyStroke};
//!
//! let mut editor = Editor::default();
//! editor.modes.create("normal").bind_str("i", Action::EnterMode("insert".into())).unwrap();
//! editor.modes.create("insert");
//! editor.buffers.add(Buffer::new("foo", "/tmp/foo", vec![String::new()]));
//! editor.set_buffer("foo").unwrap();
//!
//! let status = editor.handle(KeyStroke::char('i')).unwrap();
//! assert_eq!(status, Status::Matched(Key::parse("i").unwrap()));
//! assert_eq!(editor.mode(), "insert");
//!
//! let status = editor.handle(KeyStroke::from_raw_event("CTRL_Q")).unwrap();
//! assert_eq!(status, Status::Quit);
//! assert!(!editor.is_running());
//! ```
use std::collections::VecDeque;
use std::ops::Range as LineRange;
use std::path::Path;

use crate::action::{Action, LineEdge, MoveDir, Outcome};
use crate::buffer::{Buffer, BufferLoader, Buffers};
use crate::errors::{EditResult, EditorError};
use crate::key::{Key, KeyStroke, SpecialKey};
use crate::location::Location;
use crate::mode::{Mode, Modes};
use crate::store::{Clipboards, Hooks, MessageKind, Messenger};
use crate::style::Styles;

/// The global mode that Escape returns to.
pub const DEFAULT_MODE: &str = "normal";

/// What to do with a pending key sequence that no binding can match.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum PendingPolicy {
    /// Keep the sequence until Escape is pressed.
    #[default]
    Retain,
    /// Forget the sequence right away.
    Discard,
}

/// The result of handling a keystroke.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Status {
    /// The session should end.
    Quit,
    /// Escape was pressed, and the editor returned to the default mode.
    Reset,
    /// A binding ran. This is the last key sequence that matched.
    Matched(Key),
    /// The pending sequence might still become a binding, so more keys are needed.
    Pending,
    /// The pending sequence can't become any binding.
    Unmapped,
    /// There is no current buffer to dispatch keys for, so the keystroke was ignored.
    Rejected,
}

enum Lookup {
    Wait,
    Found(Key, Action),
    Dead,
}

/// The editor state, and the machinery for turning keystrokes into actions.
#[derive(Debug)]
pub struct Editor {
    /// All of the modes that can be entered or activated for buffers.
    pub modes: Modes,

    /// All open buffers.
    pub buffers: Buffers,

    /// Styles to draw with.
    pub styles: Styles,

    /// Named clipboards.
    pub clipboards: Clipboards,

    /// The message to show on the status line.
    pub messenger: Messenger,

    /// Callbacks for state changes.
    pub hooks: Hooks,

    mode: String,
    cursor: Location,
    line_offset: usize,
    current: Option<String>,
    pending: Key,
    last_key: Key,
    policy: PendingPolicy,
    running: bool,

    /// Set while `pending` is a retained sequence that no binding or bound prefix can match.
    dead: bool,
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new(Modes::default())
    }
}

impl Editor {
    /// Create a new editor with some modes, starting in [DEFAULT_MODE] without any buffers.
    pub fn new(modes: Modes) -> Self {
        Editor {
            modes,
            buffers: Buffers::default(),
            styles: Styles::default(),
            clipboards: Clipboards::default(),
            messenger: Messenger::default(),
            hooks: Hooks::default(),

            mode: DEFAULT_MODE.to_string(),
            cursor: Location::default(),
            line_offset: 0,
            current: None,
            pending: Key::new(),
            last_key: Key::new(),
            policy: PendingPolicy::default(),
            running: true,
            dead: false,
        }
    }

    /// Change what happens to key sequences that can't match any binding.
    pub fn set_pending_policy(&mut self, policy: PendingPolicy) {
        self.policy = policy;
    }

    /// The name of the current global mode.
    pub fn mode(&self) -> &str {
        self.mode.as_str()
    }

    /// The cursor position within the current buffer.
    pub fn cursor(&self) -> Location {
        self.cursor
    }

    /// The keys typed so far that haven't matched a binding yet.
    pub fn pending(&self) -> &Key {
        &self.pending
    }

    /// The most recent key sequence that matched a binding.
    pub fn last_key(&self) -> &Key {
        &self.last_key
    }

    /// Whether the session is still going.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// End the session.
    pub fn stop(&mut self) {
        tracing::debug!("stopping editor");
        self.running = false;
    }

    /// The current buffer, if there is one.
    pub fn current_buffer(&self) -> Option<&Buffer> {
        self.buffers.find(self.current.as_deref()?)
    }

    /// The current buffer for modification, if there is one.
    pub fn current_buffer_mut(&mut self) -> Option<&mut Buffer> {
        self.buffers.find_mut(self.current.as_deref()?)
    }

    /// Switch the global mode.
    pub fn enter_mode(&mut self, name: &str) -> EditResult<()> {
        if !self.modes.contains(name) {
            return Err(EditorError::UnknownMode(name.to_string()));
        }

        self.set_mode(name);

        Ok(())
    }

    fn set_mode(&mut self, name: &str) {
        if self.mode != name {
            tracing::debug!(from = %self.mode, to = %name, "entering mode");
        }

        self.mode = name.to_string();
        self.dead = false;
        self.hooks.trigger("enter-mode", &[name]);
    }

    /// Make a buffer in the registry the current buffer.
    pub fn set_buffer(&mut self, name: &str) -> EditResult<()> {
        if self.buffers.find(name).is_none() {
            return Err(EditorError::UnknownBuffer(name.to_string()));
        }

        self.switch_to(Some(name.to_string()));

        Ok(())
    }

    fn switch_to(&mut self, name: Option<String>) {
        tracing::debug!(buffer = ?name, "switching buffer");

        self.current = name;
        self.cursor = Location::default();
        self.line_offset = 0;
        self.dead = false;

        if let Some(name) = self.current.as_deref() {
            self.hooks.trigger("switch-buffer", &[name]);
        }
    }

    /// Load a buffer, add it to the registry, and make it the current buffer.
    ///
    /// Buffers are switched to by name, so if another buffer already has the same name, that
    /// earlier buffer becomes the current one instead.
    pub fn open_buffer(&mut self, loader: &dyn BufferLoader, path: &Path) -> String {
        let name = self.buffers.open(loader, path).name().to_string();

        self.switch_to(Some(name.clone()));

        return name;
    }

    /// Remove a buffer from the registry.
    ///
    /// If it was the current buffer, the most recently added remaining buffer becomes current
    /// instead. If there are none left, there is no current buffer and keystrokes are rejected
    /// until one is set.
    pub fn remove_buffer(&mut self, name: &str) -> Option<Buffer> {
        let removed = self.buffers.remove(name)?;

        if self.current.is_some() && self.current_buffer().is_none() {
            let fallback = self.buffers.iter().last().map(|b| b.name().to_string());

            self.switch_to(fallback);
        }

        Some(removed)
    }

    /// Handle a keystroke from the terminal, identified by its event name.
    pub fn handle_raw(&mut self, name: &str) -> EditResult<Status> {
        self.handle(KeyStroke::from_raw_event(name))
    }

    /// Handle a single keystroke.
    ///
    /// Errors returned by the action that the keystroke runs are passed on to the caller.
    pub fn handle(&mut self, stroke: KeyStroke) -> EditResult<Status> {
        if stroke.ctrl() && stroke.get_char() == Some('q') {
            self.stop();

            return Ok(Status::Quit);
        }

        if stroke.is_special(SpecialKey::Escape) {
            self.set_mode(DEFAULT_MODE);
            self.clear_pending();
            self.last_key.clear();

            return Ok(Status::Reset);
        }

        if self.current_buffer().is_none() {
            tracing::warn!(key = %stroke, "no current buffer, ignoring key");

            return Ok(Status::Rejected);
        }

        self.pending.append(stroke);

        return self.dispatch();
    }

    fn dispatch(&mut self) -> EditResult<Status> {
        let mut queue = VecDeque::new();
        let mut fired = None;
        let mut status;

        loop {
            tracing::trace!(pending = %self.pending, "dispatching");

            match self.lookup(&self.pending) {
                Lookup::Wait => {
                    status = Status::Pending;
                },
                Lookup::Found(key, action) => {
                    self.clear_pending();
                    status = self.fire_queued(key, &action, &mut queue)?;
                    fired = Some(status.clone());
                },
                Lookup::Dead => {
                    // Extending a dead sequence can't create a bound prefix, since the only new
                    // prefix is the old sequence, which already failed to match.
                    let prefix = if self.dead { None } else { self.lookup_prefix() };

                    if let Some((len, key, action)) = prefix {
                        let rest = self.pending.strokes()[len..].to_vec();

                        for stroke in rest.into_iter().rev() {
                            queue.push_front(stroke);
                        }

                        self.clear_pending();
                        status = self.fire_queued(key, &action, &mut queue)?;
                        fired = Some(status.clone());
                    } else {
                        tracing::debug!(pending = %self.pending, policy = ?self.policy, "unmapped keys");

                        match self.policy {
                            PendingPolicy::Retain => self.dead = true,
                            PendingPolicy::Discard => self.clear_pending(),
                        }

                        status = Status::Unmapped;
                    }
                },
            }

            if status == Status::Quit {
                return Ok(status);
            }

            match queue.pop_front() {
                Some(stroke) => self.pending.append(stroke),
                None => break,
            }
        }

        if let (Some(matched), Status::Pending | Status::Unmapped) = (fired, &status) {
            return Ok(matched);
        }

        return Ok(status);
    }

    fn active_modes(&self) -> impl Iterator<Item = &Mode> + '_ {
        let locals = self.current_buffer().map(Buffer::modes).unwrap_or_default();

        locals
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.mode.as_str()))
            .filter_map(move |name| {
                let mode = self.modes.find(name);

                if mode.is_none() {
                    tracing::debug!(mode = %name, "skipping unknown mode");
                }

                mode
            })
    }

    fn lookup(&self, keys: &Key) -> Lookup {
        for mode in self.active_modes() {
            if mode.continues(keys) {
                return Lookup::Wait;
            }

            if let Some(binding) = mode.handle(keys) {
                return Lookup::Found(binding.key.clone(), binding.action.clone());
            }
        }

        return Lookup::Dead;
    }

    fn lookup_prefix(&self) -> Option<(usize, Key, Action)> {
        let strokes = self.pending.strokes();

        for len in (1..strokes.len()).rev() {
            let prefix = Key::from(strokes[..len].to_vec());

            for mode in self.active_modes() {
                if let Some(binding) = mode.handle(&prefix) {
                    return Some((len, binding.key.clone(), binding.action.clone()));
                }
            }
        }

        return None;
    }

    fn clear_pending(&mut self) {
        self.pending.clear();
        self.dead = false;
    }

    /// Fire a binding while other keystrokes wait to be replayed.
    ///
    /// If the action fails, the waiting keystrokes become the pending sequence again.
    fn fire_queued(
        &mut self,
        key: Key,
        action: &Action,
        queue: &mut VecDeque<KeyStroke>,
    ) -> EditResult<Status> {
        match self.fire(key, action) {
            Ok(status) => Ok(status),
            Err(e) => {
                for stroke in queue.drain(..) {
                    self.pending.append(stroke);
                }

                Err(e)
            },
        }
    }

    fn fire(&mut self, key: Key, action: &Action) -> EditResult<Status> {
        tracing::debug!(key = %key, mode = %self.mode, action = ?action, "matched binding");

        self.hooks.trigger("key", &[key.to_string().as_str()]);
        self.last_key = key.clone();

        match self.run_action(action)? {
            Outcome::Continue => Ok(Status::Matched(key)),
            Outcome::Quit => {
                self.stop();
                Ok(Status::Quit)
            },
        }
    }

    /// Run an action against this editor.
    pub fn run_action(&mut self, action: &Action) -> EditResult<Outcome> {
        match action {
            Action::NoOp => {},
            Action::Quit => return Ok(Outcome::Quit),
            Action::EnterMode(name) => self.enter_mode(name)?,
            Action::Move(dir, count) => self.move_cursor(*dir, *count),
            Action::Goto(edge) => self.goto(*edge),
            Action::SwitchBuffer(name) => self.set_buffer(name)?,
            Action::NextBuffer => self.next_buffer()?,
            Action::Message(msg) => self.messenger.info(msg.as_str()),
            Action::Command(cmd) => return cmd.invoke(self),
        }

        Ok(Outcome::Continue)
    }

    fn next_buffer(&mut self) -> EditResult<()> {
        let idx = match self.current.as_deref() {
            Some(name) => self.buffers.position(name).map(|i| i + 1).unwrap_or(0),
            None => 0,
        };

        let name = self
            .buffers
            .get(idx)
            .or_else(|| self.buffers.get(0))
            .map(|b| b.name().to_string())
            .ok_or_else(|| EditorError::Failure("No buffers open".into()))?;

        return self.set_buffer(name.as_str());
    }

    fn move_cursor(&mut self, dir: MoveDir, count: usize) {
        let Some(buffer) = self.current_buffer() else {
            return;
        };

        let last = buffer.len_lines().saturating_sub(1);
        let (col, line) = (self.cursor.column(), self.cursor.line());

        let (col, line) = match dir {
            MoveDir::Left => (col.saturating_sub(count), line),
            MoveDir::Right => (col.saturating_add(count), line),
            MoveDir::Up => (col, line.saturating_sub(count)),
            MoveDir::Down => (col, line.saturating_add(count).min(last)),
        };

        let col = col.min(buffer.line_len(line));

        self.cursor.move_to(col, line);
    }

    fn goto(&mut self, edge: LineEdge) {
        let line = match edge {
            LineEdge::Top => 0,
            LineEdge::Bottom => {
                self.current_buffer().map(|b| b.len_lines().saturating_sub(1)).unwrap_or(0)
            },
        };

        self.cursor.move_to(0, line);
    }

    /// Scroll so that the cursor is within a view that is `height` lines tall.
    pub fn scroll(&mut self, height: usize) {
        let line = self.cursor.line();

        if line < self.line_offset {
            self.line_offset = line;
        } else if height > 0 && line >= self.line_offset + height {
            self.line_offset = line + 1 - height;
        }
    }

    /// The lines of the current buffer that fit in a view that is `height` lines tall.
    pub fn visible_lines(&self, height: usize) -> LineRange<usize> {
        let len = self.current_buffer().map(Buffer::len_lines).unwrap_or(0);
        let start = self.line_offset.min(len);
        let end = start.saturating_add(height).min(len);

        start..end
    }

    /// The text to show in the status line.
    pub fn status_line(&self) -> String {
        let name = self.current_buffer().map(Buffer::name).unwrap_or("*none*");
        let mut status = format!(" {} [{}]", name, self.mode);

        if !self.pending.is_empty() {
            status.push_str(&format!(" {}", self.pending));
        }

        match self.messenger.message() {
            Some((MessageKind::Info, msg)) => status.push_str(&format!("  {}", msg)),
            Some((MessageKind::Error, msg)) => status.push_str(&format!("  Error: {}", msg)),
            None => {},
        }

        return status;
    }
}
