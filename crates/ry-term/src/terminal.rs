//! # Drawing surfaces
//!
//! The renderer draws through the [Surface] trait, so that it can be pointed at the real
//! terminal ([CrosstermSurface]) or at something that records what was drawn.
use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

/// Somewhere text can be drawn.
pub trait Surface {
    /// The number of columns and rows available.
    fn size(&self) -> (u16, u16);

    /// Blank the whole surface.
    fn clear(&mut self) -> io::Result<()>;

    /// Move to where the next text will be written.
    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()>;

    /// Set the colour index for text, or `None` for the default colour.
    fn set_foreground(&mut self, color: Option<u8>) -> io::Result<()>;

    /// Set the colour index for the background, or `None` for the default colour.
    fn set_background(&mut self, color: Option<u8>) -> io::Result<()>;

    /// Set whether text is bold.
    fn set_bold(&mut self, bold: bool) -> io::Result<()>;

    /// Write text at the current position.
    fn write_text(&mut self, text: &str) -> io::Result<()>;

    /// Hide the cursor.
    fn hide_cursor(&mut self) -> io::Result<()>;

    /// Show the cursor at the current position.
    fn show_cursor(&mut self) -> io::Result<()>;

    /// Make everything drawn so far visible.
    fn flush(&mut self) -> io::Result<()>;
}

fn color(index: Option<u8>) -> Color {
    index.map(Color::AnsiValue).unwrap_or(Color::Reset)
}

/// A [Surface] that draws on a terminal using crossterm.
///
/// Creating one puts the terminal in raw mode and switches to the alternate screen. Both are
/// undone when it's dropped.
pub struct CrosstermSurface {
    out: Stdout,
    size: (u16, u16),
    enhanced: bool,
}

impl CrosstermSurface {
    /// Take over the terminal.
    pub fn new() -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;

        let mut out = io::stdout();

        execute!(out, EnterAlternateScreen, Hide)?;

        let enhanced = crossterm::terminal::supports_keyboard_enhancement()?;

        if enhanced {
            execute!(
                out,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
            )?;
        }

        let size = crossterm::terminal::size()?;

        Ok(CrosstermSurface { out, size, enhanced })
    }

    /// Update the size after the terminal has been resized.
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.size = (columns, rows);
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.enhanced {
            execute!(self.out, PopKeyboardEnhancementFlags)?;
        }

        execute!(self.out, SetAttribute(Attribute::Reset), Show, LeaveAlternateScreen)?;
        crossterm::terminal::disable_raw_mode()?;

        Ok(())
    }
}

impl Drop for CrosstermSurface {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            tracing::error!(err = %e, "failed to restore terminal");
        }
    }
}

impl Surface for CrosstermSurface {
    fn size(&self) -> (u16, u16) {
        self.size
    }

    fn clear(&mut self) -> io::Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset), Clear(ClearType::All))
    }

    fn move_to(&mut self, column: u16, row: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(column, row))
    }

    fn set_foreground(&mut self, index: Option<u8>) -> io::Result<()> {
        queue!(self.out, SetForegroundColor(color(index)))
    }

    fn set_background(&mut self, index: Option<u8>) -> io::Result<()> {
        queue!(self.out, SetBackgroundColor(color(index)))
    }

    fn set_bold(&mut self, bold: bool) -> io::Result<()> {
        let attr = if bold { Attribute::Bold } else { Attribute::NormalIntensity };

        queue!(self.out, SetAttribute(attr))
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Show)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
