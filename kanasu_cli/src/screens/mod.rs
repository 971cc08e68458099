/// Screen module exports

pub mod auth;
pub mod chat;
pub mod home;
pub mod profile;
pub mod recommender;
pub mod roadmap;
pub mod scholarships;
pub mod settings;

pub use auth::{AuthForm, AuthMode, AuthScreen};
pub use chat::{ChatScreen, ChatView};
pub use home::{HomeScreen, HomeState};
pub use profile::{ProfileFocus, ProfileScreen, ProfileState};
pub use recommender::{RecommenderFocus, RecommenderScreen, RecommenderState};
pub use roadmap::{RoadmapScreen, RoadmapState};
pub use scholarships::{ScholarshipsScreen, ScholarshipsState};
pub use settings::{SettingsItem, SettingsScreen, SettingsState};

use kanasu_core::i18n::{translate, TranslationKey};
use kanasu_core::Locale;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::components::{accent, dim};

/// What every screen needs to know to draw itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewContext {
    pub locale: Locale,
    pub high_contrast: bool,
}

impl ViewContext {
    pub fn t(&self, key: TranslationKey) -> &'static str {
        translate(self.locale, key)
    }

    pub fn accent(&self) -> Color {
        accent(self.high_contrast)
    }
}

/// A labeled single-line text input.
#[derive(Debug, Clone)]
pub struct TextField {
    pub key: TranslationKey,
    pub value: String,
    pub secret: bool,
}

impl TextField {
    pub fn new(key: TranslationKey) -> Self {
        Self {
            key,
            value: String::new(),
            secret: false,
        }
    }

    pub fn secret(key: TranslationKey) -> Self {
        Self {
            secret: true,
            ..Self::new(key)
        }
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn shown(&self) -> String {
        if self.secret {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// Applies a typed key to a text buffer. Returns false for keys it ignores.
pub fn edit_text(buffer: &mut String, code: crossterm::event::KeyCode) -> bool {
    use crossterm::event::KeyCode;
    match code {
        KeyCode::Char(c) => {
            buffer.push(c);
            true
        }
        KeyCode::Backspace => {
            buffer.pop();
            true
        }
        _ => false,
    }
}

/// One `Label: value` line, highlighted when focused; a cursor is drawn
/// while editing.
pub fn field_line(
    ctx: &ViewContext,
    label: &str,
    value: &str,
    focused: bool,
    editing: bool,
) -> Line<'static> {
    let label_style = if focused {
        Style::default()
            .fg(ctx.accent())
            .add_modifier(Modifier::BOLD)
    } else {
        dim()
    };
    let marker = if focused { "▶ " } else { "  " };
    let cursor = if editing { "█" } else { "" };
    let shown = if value.is_empty() && !editing {
        "—".to_string()
    } else {
        format!("{}{}", value, cursor)
    };

    Line::from(vec![
        Span::styled(format!("{}{}: ", marker, label), label_style),
        Span::raw(shown),
    ])
}

/// A focusable action line such as a submit button.
pub fn button_line(ctx: &ViewContext, label: &str, focused: bool) -> Line<'static> {
    let style = if focused {
        Style::default()
            .bg(ctx.accent())
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(ctx.accent())
    };
    Line::from(Span::styled(format!("[ {} ]", label), style))
}
