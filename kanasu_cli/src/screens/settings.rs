/// Settings screen - interface language and voice guidance
use kanasu_core::i18n::TranslationKey;
use kanasu_core::Locale;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::ViewContext;
use crate::components::{dim, titled_block};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Language(Locale),
    VoiceGuidance,
}

pub const ITEMS: &[SettingsItem] = &[
    SettingsItem::Language(Locale::En),
    SettingsItem::Language(Locale::Kn),
    SettingsItem::VoiceGuidance,
];

#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    pub selected: usize,
}

impl SettingsState {
    pub fn move_down(&mut self) {
        if self.selected + 1 < ITEMS.len() {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn current(&self) -> SettingsItem {
        ITEMS[self.selected.min(ITEMS.len() - 1)]
    }
}

pub struct SettingsScreen<'a> {
    state: &'a SettingsState,
    voice_guidance: bool,
    ctx: ViewContext,
}

impl<'a> SettingsScreen<'a> {
    pub fn new(state: &'a SettingsState, voice_guidance: bool, ctx: ViewContext) -> Self {
        Self {
            state,
            voice_guidance,
            ctx,
        }
    }
}

impl<'a> Widget for SettingsScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(20),
                Constraint::Percentage(60),
                Constraint::Percentage(20),
            ])
            .split(area);

        let block = titled_block(ctx.t(TranslationKey::Settings), ctx.high_contrast);
        let inner = block.inner(columns[1]);
        block.render(columns[1], buf);

        let heading = Style::default().fg(ctx.accent()).add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::from(Span::styled(
            ctx.t(TranslationKey::PreferredLanguage),
            heading,
        ))];

        for (i, item) in ITEMS.iter().enumerate() {
            let (text, active) = match item {
                SettingsItem::Language(locale) => {
                    (locale.native_name().to_string(), *locale == ctx.locale)
                }
                SettingsItem::VoiceGuidance => {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        ctx.t(TranslationKey::VoiceGuidance),
                        heading,
                    )));
                    let state = if self.voice_guidance { "ON" } else { "OFF" };
                    (state.to_string(), self.voice_guidance)
                }
            };

            let marker = if active { "(•)" } else { "( )" };
            let style = if i == self.state.selected {
                Style::default()
                    .bg(ctx.accent())
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("  {} {}", marker, text),
                style,
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "{} {}",
                ctx.t(TranslationKey::Version),
                env!("CARGO_PKG_VERSION")
            ),
            dim(),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn items_in_display_order() {
        let mut state = SettingsState::default();
        assert_eq!(state.current(), SettingsItem::Language(Locale::En));
        state.move_down();
        assert_eq!(state.current(), SettingsItem::Language(Locale::Kn));
        state.move_down();
        state.move_down();
        assert_eq!(state.current(), SettingsItem::VoiceGuidance);
    }
}
