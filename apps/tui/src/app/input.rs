use crossterm::event::KeyCode;
use senate_trades_core::Command;

use crate::app::{App, OutgoingRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    ToggleHelp,
    SwitchPage,
    Page(Command),
}

/// Maps a key to an action. While a text box has focus, printable keys are
/// typed rather than treated as shortcuts.
pub fn map_key(key: KeyCode, accepts_text: bool) -> Option<KeyAction> {
    let command = match key {
        KeyCode::F(1) => return Some(KeyAction::ToggleHelp),
        KeyCode::F(2) => return Some(KeyAction::SwitchPage),
        KeyCode::F(5) => Command::Reload,
        KeyCode::Tab => Command::FocusNext,
        KeyCode::BackTab => Command::FocusPrev,
        KeyCode::Left => Command::OptionPrev,
        KeyCode::Right => Command::OptionNext,
        KeyCode::Up => Command::ScrollUp,
        KeyCode::Down => Command::ScrollDown,
        KeyCode::PageUp => Command::PrevPage,
        KeyCode::PageDown => Command::NextPage,
        KeyCode::Enter => Command::Submit,
        KeyCode::Backspace => Command::Backspace,
        KeyCode::Esc | KeyCode::Delete => Command::Clear,
        KeyCode::Char(ch) if accepts_text && !ch.is_control() => Command::Input(ch),
        KeyCode::Char('q') => return Some(KeyAction::Quit),
        KeyCode::Char('?') => return Some(KeyAction::ToggleHelp),
        KeyCode::Char('n') => Command::NextPage,
        KeyCode::Char('p') => Command::PrevPage,
        KeyCode::Char('r') => Command::Reload,
        KeyCode::Char('s') => Command::CycleSort,
        KeyCode::Char('o') => Command::FlipOrder,
        KeyCode::Char('j') => Command::ScrollDown,
        KeyCode::Char('k') => Command::ScrollUp,
        _ => return None,
    };
    Some(KeyAction::Page(command))
}

pub fn handle_input(app: &mut App, key: KeyCode) -> Vec<OutgoingRequest> {
    if app.show_help {
        if matches!(key, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?' | 'q')) {
            app.show_help = false;
        }
        return Vec::new();
    }

    match map_key(key, app.current().accepts_text()) {
        Some(KeyAction::Quit) => {
            app.running = false;
            Vec::new()
        }
        Some(KeyAction::ToggleHelp) => {
            app.show_help = true;
            Vec::new()
        }
        Some(KeyAction::SwitchPage) => app.switch_page(),
        Some(KeyAction::Page(command)) => app.apply(command),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PageKind;
    use senate_trades_core::ApiBase;

    #[test]
    fn shortcuts_yield_to_typing() {
        assert_eq!(map_key(KeyCode::Char('q'), false), Some(KeyAction::Quit));
        assert_eq!(
            map_key(KeyCode::Char('q'), true),
            Some(KeyAction::Page(Command::Input('q')))
        );
        assert_eq!(
            map_key(KeyCode::Char('n'), false),
            Some(KeyAction::Page(Command::NextPage))
        );
        assert_eq!(map_key(KeyCode::F(2), true), Some(KeyAction::SwitchPage));
        assert_eq!(map_key(KeyCode::Insert, false), None);
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let mut app = App::new(ApiBase::parse("http://localhost").expect("valid"), PageKind::Index);
        app.start("");
        handle_input(&mut app, KeyCode::F(1));
        assert!(app.show_help);

        assert!(handle_input(&mut app, KeyCode::Char('n')).is_empty());
        assert_eq!(app.pages.index.filters().offset, 0);

        handle_input(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(app.running);

        assert_eq!(handle_input(&mut app, KeyCode::Char('n')).len(), 1);
        handle_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }
}
