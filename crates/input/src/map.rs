//! Mapping from terminal events to game input events.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

/// Frontend-level input, still in terminal cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Mouse moved (or dragged/clicked) over this cell.
    Pointer { col: u16, row: u16 },
    /// Keyboard step of the pointer, in cells.
    Nudge { dx: i8, dy: i8 },
    Resize { width: u16, height: u16 },
    Quit,
}

/// Map any terminal event.
pub fn map_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) => handle_key_event(*key),
        Event::Mouse(mouse) => handle_mouse_event(*mouse),
        Event::Resize(width, height) => Some(InputEvent::Resize {
            width: *width,
            height: *height,
        }),
        _ => None,
    }
}

/// Map keyboard input. Key releases are ignored.
pub fn handle_key_event(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(InputEvent::Quit);
    }

    let (dx, dy) = match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => (-1, 0),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => (1, 0),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => (0, -1),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => (0, 1),
        KeyCode::Char('H') | KeyCode::Char('A') => (-4, 0),
        KeyCode::Char('L') | KeyCode::Char('D') => (4, 0),
        KeyCode::Char('K') | KeyCode::Char('W') => (0, -2),
        KeyCode::Char('J') | KeyCode::Char('S') => (0, 2),
        _ => return None,
    };
    Some(InputEvent::Nudge { dx, dy })
}

pub fn handle_mouse_event(mouse: MouseEvent) -> Option<InputEvent> {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
            Some(InputEvent::Pointer {
                col: mouse.column,
                row: mouse.row,
            })
        }
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
