//! # ry
//!
//! ## Overview
//!
//! This crate is the input dispatch core of a small modal text editor. It decides which bound
//! [action](action::Action) a sequence of keystrokes should run, based on the modes that are
//! active for the current buffer and the editor's global mode.
//!
//! * [key] describes keystrokes and key sequences, and how they are written down.
//! * [mode] maps key sequences to actions.
//! * [buffer] holds the open buffers and the modes active for each of them.
//! * [editor] contains the [Editor](editor::Editor) state machine that ties them together.
//!
//! Rendering, terminal input and file access live outside of this crate, and talk to it through
//! [Editor::handle](editor::Editor::handle), the [BufferLoader](buffer::BufferLoader) trait, and
//! the editor's accessors.
//!
//! ## Example
//!
//! ```
//! use ry::action::{Action, MoveDir};
//! use ry::buffer::Buffer;
//! use ry::editor::Editor;
//!
//! let mut editor = Editor::default();
//! editor.modes.create("normal").bind_str("j", Action::Move(MoveDir::Down, 1)).unwrap();
//! editor.buffers.add(Buffer::new("notes", "/tmp/notes", vec!["a".into(), "b".into()]));
//! editor.set_buffer("notes").unwrap();
//!
//! editor.handle_raw("j").unwrap();
//! assert_eq!(editor.cursor().line(), 1);
//! ```

// Require docs for public APIs, and disable the more annoying clippy lints.
#![deny(missing_docs)]
#![allow(clippy::bool_to_int_with_if)]
#![allow(clippy::field_reassign_with_default)]
#![allow(clippy::len_without_is_empty)]
#![allow(clippy::match_like_matches_macro)]
#![allow(clippy::needless_return)]

pub mod action;
pub mod buffer;
pub mod editor;
pub mod errors;
pub mod key;
pub mod location;
pub mod mode;
pub mod store;
pub mod style;
