use inarow::{Event, Key, Screen};
use ratatui::crossterm::event::{
    Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEventKind,
};

/// Turns a raw terminal event into an input event for the game, if it is one.
///
/// `q` quits from the menu, and Ctrl-C quits from anywhere. Mouse positions
/// are passed through as terminal cell coordinates.
pub fn translate(event: &TermEvent, screen: Screen) -> Option<Event> {
    match event {
        TermEvent::Key(key) if key.kind == KeyEventKind::Press => Some(translate_key(key, screen)),
        TermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Event::PointerClicked {
                x: i32::from(mouse.column),
                y: i32::from(mouse.row),
            }),
            _ => None,
        },
        _ => None,
    }
}

fn translate_key(key: &KeyEvent, screen: Screen) -> Event {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Event::Closed;
    }
    let key = match key.code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Char('q') if screen == Screen::Menu => return Event::Closed,
        _ => Key::Other,
    };
    Event::KeyPressed(key)
}
