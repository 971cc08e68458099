/// Centralized keybindings and help text for the Kanasu TUI

use crossterm::event::{KeyCode, KeyModifiers};
use kanasu_core::voice::Route;

pub struct KeyMap;

impl KeyMap {
    /// Get help text for all keybindings; the voice key only when speech
    /// input is available
    pub fn help_text(voice: bool) -> Vec<(&'static str, &'static str)> {
        let mut lines = vec![
            ("j/↓", "Move down"),
            ("k/↑", "Move up"),
            ("Tab", "Next field"),
            ("Enter", "Edit field / submit"),
            ("Space", "Toggle interest"),
            ("1-7", "Home, Careers, Roadmap, Scholarships, Profile, Settings, Chat"),
            ("L", "Switch language"),
            ("e", "Export results to CSV"),
            ("t", "Toggle high-contrast"),
            ("?", "Show help"),
            ("q/Esc", "Back/Quit"),
        ];
        if voice {
            lines.insert(6, ("v", "Voice command"));
        }
        lines
    }

    /// Check if key is quit
    pub fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
        matches!(code, KeyCode::Char('q') | KeyCode::Esc) || Self::is_force_quit(code, modifiers)
    }

    /// Ctrl-C quits from anywhere, including text fields
    pub fn is_force_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
        matches!(code, KeyCode::Char('c')) && modifiers.contains(KeyModifiers::CONTROL)
    }

    pub fn is_help(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('?'))
    }

    pub fn is_down(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('j') | KeyCode::Down)
    }

    pub fn is_up(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('k') | KeyCode::Up)
    }

    pub fn is_next_field(code: KeyCode) -> bool {
        matches!(code, KeyCode::Tab)
    }

    pub fn is_prev_field(code: KeyCode) -> bool {
        matches!(code, KeyCode::BackTab)
    }

    /// Check if key opens the voice prompt
    pub fn is_voice(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('v'))
    }

    pub fn is_toggle_language(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('L'))
    }

    pub fn is_toggle_theme(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('t'))
    }

    pub fn is_export(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char('e'))
    }

    /// Check if key is confirm (Enter)
    pub fn is_confirm(code: KeyCode) -> bool {
        matches!(code, KeyCode::Enter)
    }

    /// Check if key is space (for toggling checkboxes)
    pub fn is_space(code: KeyCode) -> bool {
        matches!(code, KeyCode::Char(' '))
    }

    /// Number-key shortcut to a signed-in screen
    pub fn route_shortcut(code: KeyCode) -> Option<Route> {
        match code {
            KeyCode::Char('1') => Some(Route::Home),
            KeyCode::Char('2') => Some(Route::Recommender),
            KeyCode::Char('3') => Some(Route::Roadmap),
            KeyCode::Char('4') => Some(Route::Scholarships),
            KeyCode::Char('5') => Some(Route::Profile),
            KeyCode::Char('6') => Some(Route::Settings),
            KeyCode::Char('7') => Some(Route::Chat),
            _ => None,
        }
    }
}
