/// Scholarships screen - searchable list with a detail pane
use kanasu_core::i18n::TranslationKey;
use kanasu_core::scholarships::{self, Scholarship};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::ViewContext;
use crate::components::{create_row, dim, titled_block, TableWidget};

#[derive(Debug, Clone, Default)]
pub struct ScholarshipsState {
    pub query: String,
    pub searching: bool,
    pub selected: usize,
}

impl ScholarshipsState {
    pub fn results(&self) -> Vec<&'static Scholarship> {
        scholarships::search(&self.query)
    }

    pub fn selected_scholarship(&self) -> Option<&'static Scholarship> {
        self.results().get(self.selected).copied()
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.results().len() {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Replaces the query and resets the selection to the first match.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.selected = 0;
    }
}

pub struct ScholarshipsScreen<'a> {
    state: &'a ScholarshipsState,
    ctx: ViewContext,
}

impl<'a> ScholarshipsScreen<'a> {
    pub fn new(state: &'a ScholarshipsState, ctx: ViewContext) -> Self {
        Self { state, ctx }
    }
}

impl<'a> Widget for ScholarshipsScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(8),
            ])
            .split(area);

        // search box
        let search = titled_block(ctx.t(TranslationKey::SearchScholarships), ctx.high_contrast);
        let search_inner = search.inner(chunks[0]);
        search.render(chunks[0], buf);
        let cursor = if self.state.searching { "█" } else { "" };
        let hint = if self.state.searching || !self.state.query.is_empty() {
            Span::raw(format!("/{}{}", self.state.query, cursor))
        } else {
            Span::styled("/ to search", dim())
        };
        Paragraph::new(Line::from(hint)).render(search_inner, buf);

        let results = self.state.results();
        if results.is_empty() {
            let block = titled_block(ctx.t(TranslationKey::Scholarships), ctx.high_contrast);
            let inner = block.inner(chunks[1]);
            block.render(chunks[1], buf);
            Paragraph::new(Span::styled(
                ctx.t(TranslationKey::NoScholarships),
                Style::default().fg(Color::Yellow),
            ))
            .render(inner, buf);
            return;
        }

        let rows = results
            .iter()
            .map(|s| {
                create_row(
                    vec![
                        s.title.to_string(),
                        s.category.to_string(),
                        s.amount.to_string(),
                    ],
                    Color::White,
                )
            })
            .collect();
        TableWidget::new(
            ctx.t(TranslationKey::Scholarships),
            vec!["Title", "Category", ctx.t(TranslationKey::Amount)],
            vec![
                Constraint::Percentage(45),
                Constraint::Percentage(25),
                Constraint::Percentage(30),
            ],
        )
        .rows(rows)
        .selected(self.state.selected)
        .high_contrast(ctx.high_contrast)
        .render(chunks[1], buf);

        if let Some(s) = results.get(self.state.selected) {
            let detail = titled_block(s.title, ctx.high_contrast);
            let inner = detail.inner(chunks[2]);
            detail.render(chunks[2], buf);

            let label = Style::default().fg(ctx.accent()).add_modifier(Modifier::BOLD);
            let lines = vec![
                Line::from(s.description),
                Line::from(vec![
                    Span::styled(format!("{}: ", ctx.t(TranslationKey::Eligibility)), label),
                    Span::raw(s.eligibility),
                ]),
                Line::from(vec![
                    Span::styled(format!("{}: ", ctx.t(TranslationKey::Amount)), label),
                    Span::raw(s.amount),
                ]),
                Line::from(Span::styled(s.link, dim())),
            ];
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .render(inner, buf);
        }
    }
}
