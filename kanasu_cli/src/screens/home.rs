/// Home screen - greeting and the main menu
use kanasu_core::i18n::TranslationKey;
use kanasu_core::types::{CareerRecommendation, User};
use kanasu_core::voice::Route;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::ViewContext;
use crate::components::{dim, titled_block};

pub const MENU: &[Route] = &[
    Route::Recommender,
    Route::Roadmap,
    Route::Scholarships,
    Route::Profile,
    Route::Settings,
    Route::Chat,
];

#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub selected: usize,
}

impl HomeState {
    pub fn move_down(&mut self) {
        if self.selected + 1 < MENU.len() {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_route(&self) -> Route {
        MENU[self.selected.min(MENU.len() - 1)]
    }
}

pub struct HomeScreen<'a> {
    state: &'a HomeState,
    user: Option<&'a User>,
    last_match: Option<&'a CareerRecommendation>,
    voice: bool,
    ctx: ViewContext,
}

impl<'a> HomeScreen<'a> {
    pub fn new(state: &'a HomeState, ctx: ViewContext) -> Self {
        Self {
            state,
            user: None,
            last_match: None,
            voice: true,
            ctx,
        }
    }

    pub fn user(mut self, user: Option<&'a User>) -> Self {
        self.user = user;
        self
    }

    pub fn last_match(mut self, career: Option<&'a CareerRecommendation>) -> Self {
        self.last_match = career;
        self
    }

    /// Hides the mic hint when voice input is unsupported.
    pub fn voice(mut self, supported: bool) -> Self {
        self.voice = supported;
        self
    }
}

impl<'a> Widget for HomeScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let block = titled_block(ctx.t(TranslationKey::Home), ctx.high_contrast);
        let inner = block.inner(chunks[0]);
        block.render(chunks[0], buf);

        let name = self
            .user
            .map(|u| u.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("KANASU");
        let mut lines = vec![
            Line::from(Span::styled(
                format!("ನಮಸ್ಕಾರ / Hello, {}", name),
                Style::default().fg(ctx.accent()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (i, route) in MENU.iter().enumerate() {
            let style = if i == self.state.selected {
                Style::default()
                    .bg(ctx.accent())
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            lines.push(Line::from(Span::styled(
                format!("  {}  {}", i + 2, ctx.t(route.title_key())),
                style,
            )));
        }

        if self.voice {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("[v] {}", ctx.t(TranslationKey::TapToSpeak)),
                dim(),
            )));
        }
        Paragraph::new(lines).render(inner, buf);

        let side = titled_block(ctx.t(TranslationKey::TopCareerMatches), ctx.high_contrast);
        let side_inner = side.inner(chunks[1]);
        side.render(chunks[1], buf);

        let summary = match self.last_match {
            Some(career) => vec![
                Line::from(Span::styled(
                    career.title_label.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!(
                    "{}: {}%",
                    ctx.t(TranslationKey::Confidence),
                    career.percent()
                )),
                Line::from(Span::styled(career.cluster_label.clone(), dim())),
                Line::from(""),
                Line::from(Span::styled(
                    format!("[3] {}", ctx.t(TranslationKey::ViewRoadmap)),
                    dim(),
                )),
            ],
            None => vec![Line::from(Span::styled(
                format!("[2] {}", ctx.t(TranslationKey::GetRecommendations)),
                dim(),
            ))],
        };
        Paragraph::new(summary)
            .wrap(Wrap { trim: true })
            .render(side_inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_selection_is_bounded() {
        let mut state = HomeState::default();
        state.move_up();
        assert_eq!(state.selected_route(), Route::Recommender);
        for _ in 0..20 {
            state.move_down();
        }
        assert_eq!(state.selected_route(), Route::Chat);
    }
}
