//! # Rendering
//!
//! Draws the [Editor] onto a [Surface] after each keystroke. The current buffer's visible lines
//! fill every row but the last, which holds the status line.
use std::io;

use unicode_width::UnicodeWidthChar;

use ry::editor::Editor;
use ry::style::{Style, DEFAULT_STYLE, STATUSBAR_STYLE};

use crate::terminal::Surface;

/// Cut `text` down to fit within `width` columns, and pad it with spaces to fill them.
fn fit(text: &str, width: usize) -> String {
    let mut res = String::with_capacity(width);
    let mut used = 0;

    for c in text.chars() {
        let w = c.width().unwrap_or(0);

        if used + w > width {
            break;
        }

        res.push(c);
        used += w;
    }

    res.extend(std::iter::repeat(' ').take(width - used));

    return res;
}

/// How many columns the first `column` characters of `text` take up.
fn display_width(text: &str, column: usize) -> usize {
    text.chars().take(column).map(|c| c.width().unwrap_or(0)).sum()
}

fn set_style<S: Surface>(surface: &mut S, style: Style) -> io::Result<()> {
    surface.set_foreground(style.fg)?;
    surface.set_background(style.bg)?;
    surface.set_bold(style.bold)
}

/// The number of buffer lines that fit on a surface with `rows` rows.
pub fn text_rows(rows: u16) -> usize {
    rows.saturating_sub(1) as usize
}

/// Draw the editor.
pub fn render<S: Surface>(editor: &Editor, surface: &mut S) -> io::Result<()> {
    let (columns, rows) = surface.size();
    let width = columns as usize;

    surface.hide_cursor()?;
    surface.clear()?;

    if rows == 0 {
        return surface.flush();
    }

    let visible = editor.visible_lines(text_rows(rows));
    let first = visible.start;

    if let Some(buffer) = editor.current_buffer() {
        set_style(surface, editor.styles.get(DEFAULT_STYLE))?;

        for (row, idx) in visible.enumerate() {
            let line = buffer.line(idx).unwrap_or_default();

            surface.move_to(0, row as u16)?;
            surface.write_text(&fit(line, width))?;
        }
    }

    set_style(surface, editor.styles.get(STATUSBAR_STYLE))?;
    surface.move_to(0, rows - 1)?;
    surface.write_text(&fit(&editor.status_line(), width))?;

    if let Some(buffer) = editor.current_buffer() {
        let cursor = editor.cursor();
        let line = buffer.line(cursor.line()).unwrap_or_default();
        let column = display_width(line, cursor.column()).min(width.saturating_sub(1));
        let row = cursor.line().saturating_sub(first);

        if row < text_rows(rows) {
            surface.move_to(column as u16, row as u16)?;
            surface.show_cursor()?;
        }
    }

    surface.flush()
}
