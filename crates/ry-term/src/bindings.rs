//! The modes and bindings available before any configuration is loaded.
use ry::action::{Action, LineEdge, MoveDir};
use ry::errors::KeyError;
use ry::mode::Modes;

/// Build the default `normal` and `insert` modes.
pub fn default_modes() -> Result<Modes, KeyError> {
    let mut modes = Modes::default();

    let normal = modes.create("normal");

    for (keys, dir) in [
        ("h LEFT", MoveDir::Left),
        ("l RIGHT", MoveDir::Right),
        ("k UP", MoveDir::Up),
        ("j DOWN", MoveDir::Down),
    ] {
        for key in keys.split(' ') {
            normal.bind_str(key, Action::Move(dir, 1))?;
        }
    }

    normal
        .bind_str("g g", Action::Goto(LineEdge::Top))?
        .bind_str("G", Action::Goto(LineEdge::Bottom))?
        .bind_str("i", Action::EnterMode("insert".into()))?
        .bind_str("C-n", Action::NextBuffer)?;

    let insert = modes.create("insert");

    for (key, dir) in [
        ("LEFT", MoveDir::Left),
        ("RIGHT", MoveDir::Right),
        ("UP", MoveDir::Up),
        ("DOWN", MoveDir::Down),
    ] {
        insert.bind_str(key, Action::Move(dir, 1))?;
    }

    Ok(modes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ry::buffer::Buffer;
    use ry::editor::{Editor, Status};

    #[test]
    fn test_defaults() {
        let mut ed = Editor::new(default_modes().unwrap());
        let lines = (0..5).map(|i| i.to_string()).collect();
        ed.buffers.add(Buffer::new("a", "/a", lines));
        ed.set_buffer("a").unwrap();

        for name in ["j", "DOWN", "G", "k"] {
            ed.handle_raw(name).unwrap();
        }
        assert_eq!(ed.cursor().line(), 3);

        ed.handle_raw("g").unwrap();
        ed.handle_raw("g").unwrap();
        assert_eq!(ed.cursor().line(), 0);

        ed.handle_raw("i").unwrap();
        assert_eq!(ed.mode(), "insert");
        assert_eq!(ed.handle_raw("x").unwrap(), Status::Unmapped);

        assert_eq!(ed.handle_raw("ESCAPE").unwrap(), Status::Reset);
        assert_eq!(ed.mode(), "normal");
        assert_eq!(ed.handle_raw("CTRL_Q").unwrap(), Status::Quit);
    }
}
