//! Input handling.
//!
//! Translates terminal events into game commands so the loop in `main.rs`
//! never looks at key codes.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::game::Command;

/// Result of handling one terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Nothing to do.
    Continue,
    /// Forward a command to the game loop.
    Command(Command),
    /// Leave the game.
    Quit,
}

/// Map any terminal event.
pub fn handle_event(event: &Event) -> InputResult {
    match event {
        Event::Key(key) => handle_key(key),
        Event::Mouse(mouse) => handle_mouse(mouse),
        _ => InputResult::Continue,
    }
}

/// Key presses. Repeats and releases are ignored where the terminal reports them.
pub fn handle_key(key: &KeyEvent) -> InputResult {
    if key.kind != KeyEventKind::Press {
        return InputResult::Continue;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => InputResult::Quit,
            _ => InputResult::Continue,
        };
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => InputResult::Quit,
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => {
            InputResult::Command(Command::Jump)
        }
        KeyCode::Enter => InputResult::Command(Command::Start),
        KeyCode::Char('m') | KeyCode::Char('M') => InputResult::Command(Command::ToggleSound),
        _ => InputResult::Continue,
    }
}

/// A left click anywhere is a jump.
pub fn handle_mouse(mouse: &MouseEvent) -> InputResult {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => InputResult::Command(Command::Jump),
        _ => InputResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_jump_keys() {
        for code in [KeyCode::Char(' '), KeyCode::Up, KeyCode::Char('k')] {
            assert_eq!(
                handle_event(&press(code)),
                InputResult::Command(Command::Jump)
            );
        }
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(
            handle_event(&press(KeyCode::Enter)),
            InputResult::Command(Command::Start)
        );
        assert_eq!(
            handle_event(&press(KeyCode::Char('m'))),
            InputResult::Command(Command::ToggleSound)
        );
        assert_eq!(handle_event(&press(KeyCode::Char('x'))), InputResult::Continue);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_event(&press(KeyCode::Esc)), InputResult::Quit);
        assert_eq!(handle_event(&press(KeyCode::Char('q'))), InputResult::Quit);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&ctrl_c), InputResult::Quit);
        // Ctrl with another key does not fall through to the plain mapping.
        let ctrl_k = Event::Key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&ctrl_k), InputResult::Continue);
    }

    #[test]
    fn test_release_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(handle_event(&release), InputResult::Continue);
    }

    #[test]
    fn test_mouse_left_down_jumps() {
        assert_eq!(
            handle_event(&mouse(MouseEventKind::Down(MouseButton::Left))),
            InputResult::Command(Command::Jump)
        );
        assert_eq!(
            handle_event(&mouse(MouseEventKind::Down(MouseButton::Right))),
            InputResult::Continue
        );
        assert_eq!(
            handle_event(&mouse(MouseEventKind::Moved)),
            InputResult::Continue
        );
    }
}
