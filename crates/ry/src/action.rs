//! # Bound actions
//!
//! ## Overview
//!
//! An [Action] is what a binding in a [Mode](crate::mode::Mode) does once its key sequence has
//! been typed. Most actions are plain values describing a change to the [Editor] state, which
//! makes them easy to compare, print, and load from configuration:
//!
//! ```
//! use ry::action::{Action, MoveDir};
//!
//! let act: Action = "move down 3".parse().unwrap();
//! assert_eq!(act, Action::Move(MoveDir::Down, 3));
//!
//! let act: Action = "enter-mode insert".parse().unwrap();
//! assert_eq!(act, Action::EnterMode("insert".into()));
//! ```
//!
//! Application-specific behaviour can be bound through [Action::Command], which wraps a
//! [Command] object that receives the editor when invoked.
use std::fmt::Debug;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::sync::Arc;

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{digit1, space0, space1},
    combinator::{all_consuming, map, map_res, opt, rest, value},
    sequence::{delimited, preceded},
    IResult,
};

use crate::editor::Editor;
use crate::errors::{EditResult, EditorError};

/// What the caller should do once an action has run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Outcome {
    /// Keep processing input.
    #[default]
    Continue,
    /// End the editing session.
    Quit,
}

/// Directions for moving the cursor.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MoveDir {
    /// Towards the start of the line.
    Left,
    /// Towards the end of the line.
    Right,
    /// Towards the start of the buffer.
    Up,
    /// Towards the end of the buffer.
    Down,
}

/// The first or last line of a buffer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LineEdge {
    /// The first line.
    Top,
    /// The last line.
    Bottom,
}

/// Application-defined behaviour that can be bound to a key.
pub trait Command: Debug {
    /// Run this command against the editor.
    fn invoke(&self, editor: &mut Editor) -> EditResult<Outcome>;
}

/// Behaviour bound to a key sequence.
#[derive(Clone, Debug, Default)]
#[non_exhaustive]
pub enum Action {
    /// Do nothing.
    #[default]
    NoOp,

    /// End the editing session.
    Quit,

    /// Switch the global mode.
    EnterMode(String),

    /// Move the cursor a number of times, staying within the buffer.
    Move(MoveDir, usize),

    /// Move the cursor to the start of the first or last line.
    Goto(LineEdge),

    /// Make the named buffer the current one.
    SwitchBuffer(String),

    /// Make the buffer after the current one (wrapping around) the current one.
    NextBuffer,

    /// Show an informational message.
    Message(String),

    /// Run an application-defined command.
    Command(Arc<dyn Command>),
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Action::NoOp, Action::NoOp) => true,
            (Action::Quit, Action::Quit) => true,
            (Action::EnterMode(a), Action::EnterMode(b)) => a == b,
            (Action::Move(d1, c1), Action::Move(d2, c2)) => d1 == d2 && c1 == c2,
            (Action::Goto(a), Action::Goto(b)) => a == b,
            (Action::SwitchBuffer(a), Action::SwitchBuffer(b)) => a == b,
            (Action::NextBuffer, Action::NextBuffer) => true,
            (Action::Message(a), Action::Message(b)) => a == b,
            (Action::Command(a), Action::Command(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<C: Command + 'static> From<C> for Action {
    fn from(cmd: C) -> Self {
        Action::Command(Arc::new(cmd))
    }
}

fn parse_word(input: &str) -> IResult<&str, &str> {
    preceded(space1, take_till1(char::is_whitespace))(input)
}

fn parse_count(input: &str) -> IResult<&str, usize> {
    let (input, n) = map_res(preceded(space1, digit1), str::parse::<NonZeroUsize>)(input)?;

    Ok((input, n.get()))
}

fn parse_dir(input: &str) -> IResult<&str, MoveDir> {
    alt((
        value(MoveDir::Left, tag("left")),
        value(MoveDir::Right, tag("right")),
        value(MoveDir::Up, tag("up")),
        value(MoveDir::Down, tag("down")),
    ))(input)
}

fn parse_move(input: &str) -> IResult<&str, Action> {
    let (input, _) = tag("move")(input)?;
    let (input, dir) = preceded(space1, parse_dir)(input)?;
    let (input, count) = opt(parse_count)(input)?;

    Ok((input, Action::Move(dir, count.unwrap_or(1))))
}

fn parse_goto(input: &str) -> IResult<&str, Action> {
    let (input, _) = tag("goto")(input)?;
    let (input, edge) = preceded(
        space1,
        alt((value(LineEdge::Top, tag("top")), value(LineEdge::Bottom, tag("bottom")))),
    )(input)?;

    Ok((input, Action::Goto(edge)))
}

fn parse_enter_mode(input: &str) -> IResult<&str, Action> {
    let (input, _) = tag("enter-mode")(input)?;
    let (input, name) = parse_word(input)?;

    Ok((input, Action::EnterMode(name.to_string())))
}

fn parse_switch_buffer(input: &str) -> IResult<&str, Action> {
    let (input, _) = tag("buffer")(input)?;
    let (input, name) = parse_word(input)?;

    Ok((input, Action::SwitchBuffer(name.to_string())))
}

fn parse_message(input: &str) -> IResult<&str, Action> {
    let (input, _) = tag("message")(input)?;
    let (input, text) = preceded(space1, rest)(input)?;

    Ok((input, Action::Message(text.trim_end().to_string())))
}

fn parse_action(input: &str) -> IResult<&str, Action> {
    all_consuming(delimited(
        space0,
        alt((
            value(Action::NoOp, tag("noop")),
            value(Action::Quit, tag("quit")),
            value(Action::NextBuffer, tag("buffer-next")),
            parse_switch_buffer,
            parse_enter_mode,
            parse_move,
            parse_goto,
            parse_message,
            map(tag("message"), |_| Action::Message(String::new())),
        )),
        space0,
    ))(input)
}

impl FromStr for Action {
    type Err = EditorError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match parse_action(input) {
            Ok((_, act)) => Ok(act),
            Err(_) => Err(EditorError::InvalidAction(input.to_string())),
        }
    }
}
