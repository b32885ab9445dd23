//! Input handling - event translation

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

/// Something the viewer should do in response to input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Scroll by a number of lines (negative = up)
    ScrollLines(i32),
    /// Scroll by a number of pages (negative = up)
    ScrollPages(i32),
    /// Scroll by mouse wheel notches (negative = up)
    Wheel(i32),
    Top,
    Bottom,
    /// Terminal was resized
    Resize,
}

/// Translate a terminal event into an action
pub fn translate_event(event: &Event) -> Option<Action> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        Event::Resize(_, _) => Some(Action::Resize),
        _ => None,
    }
}

fn translate_key(key: &KeyEvent) -> Option<Action> {
    // Only handle key press events (not release or repeat on some platforms)
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('n') => Some(Action::ScrollLines(1)),
            KeyCode::Char('p') => Some(Action::ScrollLines(-1)),
            KeyCode::Char('v') => Some(Action::ScrollPages(1)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Enter => Some(Action::ScrollLines(1)),
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollLines(-1)),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::ScrollPages(1)),
        KeyCode::PageUp | KeyCode::Char('b') => Some(Action::ScrollPages(-1)),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::Top),
        KeyCode::End | KeyCode::Char('G') => Some(Action::Bottom),
        _ => None,
    }
}

fn translate_mouse(mouse: &MouseEvent) -> Option<Action> {
    match mouse.kind {
        MouseEventKind::ScrollDown => Some(Action::Wheel(1)),
        MouseEventKind::ScrollUp => Some(Action::Wheel(-1)),
        _ => None,
    }
}
