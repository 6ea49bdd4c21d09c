//! Turning terminal key events into the key names understood by
//! [KeyStroke::from_raw_event](ry::key::KeyStroke::from_raw_event).
//!
//! Plain characters are passed through as themselves (Shift is already reflected in the
//! character). Everything else is named in upper case, with `CTRL_`, `ALT_` and `SHIFT_`
//! prefixes for the modifiers held down, like `CTRL_Q`, `ESCAPE` or `SHIFT_UP`.
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

fn prefix(mods: KeyModifiers, shift: bool) -> String {
    let mut res = String::new();

    if mods.contains(KeyModifiers::CONTROL) {
        res.push_str("CTRL_");
    }

    if mods.contains(KeyModifiers::ALT) {
        res.push_str("ALT_");
    }

    if shift && mods.contains(KeyModifiers::SHIFT) {
        res.push_str("SHIFT_");
    }

    res
}

/// Get the name for a key event, or `None` for releases and keys that have no name.
pub fn raw_name(event: &KeyEvent) -> Option<String> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    let mods = event.modifiers;

    let name = match event.code {
        KeyCode::Char(c) => {
            if (mods - KeyModifiers::SHIFT).is_empty() {
                return Some(c.to_string());
            }

            let mut res = prefix(mods, false);
            res.extend(c.to_uppercase());

            return Some(res);
        },
        KeyCode::BackTab => return Some(format!("{}TAB", prefix(mods | KeyModifiers::SHIFT, true))),
        KeyCode::Esc => "ESCAPE".to_string(),
        KeyCode::Enter => "ENTER".to_string(),
        KeyCode::Backspace => "BACKSPACE".to_string(),
        KeyCode::Tab => "TAB".to_string(),
        KeyCode::Delete => "DELETE".to_string(),
        KeyCode::Insert => "INSERT".to_string(),
        KeyCode::Up => "UP".to_string(),
        KeyCode::Down => "DOWN".to_string(),
        KeyCode::Left => "LEFT".to_string(),
        KeyCode::Right => "RIGHT".to_string(),
        KeyCode::Home => "HOME".to_string(),
        KeyCode::End => "END".to_string(),
        KeyCode::PageUp => "PAGE_UP".to_string(),
        KeyCode::PageDown => "PAGE_DOWN".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => return None,
    };

    Some(prefix(mods, true) + name.as_str())
}
