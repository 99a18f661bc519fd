use crate::ui::message::AppMessage;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key(key: KeyEvent) -> Option<AppMessage> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(AppMessage::Quit),
            (KeyCode::Char('q'), _) => Some(AppMessage::Quit),
            (KeyCode::Char(' '), _) => Some(AppMessage::TogglePlayPause),
            (KeyCode::Char('n'), _) => Some(AppMessage::NextEpisode),
            (KeyCode::Char('p'), _) => Some(AppMessage::PreviousEpisode),
            (KeyCode::Char('l'), _) => Some(AppMessage::ToggleLoop),
            (KeyCode::Char('s'), _) => Some(AppMessage::ToggleShuffle),
            (KeyCode::Char('c'), _) => Some(AppMessage::ClearQueue),
            (KeyCode::Char('a'), _) => Some(AppMessage::PlayAllFromSelected),
            (KeyCode::Enter, _) => Some(AppMessage::PlaySelected),
            (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Some(AppMessage::SelectNext),
            (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Some(AppMessage::SelectPrevious),
            _ => None,
        }
    }
}
