/// Chat assistant screen
use crossterm::event::KeyCode;
use kanasu_core::i18n::TranslationKey;
use kanasu_core::types::{ChatMessage, ChatRole};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::{edit_text, ViewContext};
use crate::components::{dim, titled_block};

#[derive(Debug, Clone, Default)]
pub struct ChatView {
    pub input: String,
    pub editing: bool,
    /// Lines scrolled up from the bottom of the log.
    pub scroll: u16,
}

impl ChatView {
    pub fn edit(&mut self, code: KeyCode) {
        edit_text(&mut self.input, code);
    }

    /// Takes the typed message, leaving the input empty.
    pub fn take_input(&mut self) -> String {
        self.scroll = 0;
        std::mem::take(&mut self.input)
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

pub struct ChatScreen<'a> {
    view: &'a ChatView,
    messages: &'a [ChatMessage],
    waiting: bool,
    ctx: ViewContext,
}

impl<'a> ChatScreen<'a> {
    pub fn new(view: &'a ChatView, messages: &'a [ChatMessage], ctx: ViewContext) -> Self {
        Self {
            view,
            messages,
            waiting: false,
            ctx,
        }
    }

    pub fn waiting(mut self, waiting: bool) -> Self {
        self.waiting = waiting;
        self
    }

    fn message_lines(&self) -> Vec<Line<'static>> {
        let user = Style::default()
            .fg(self.ctx.accent())
            .add_modifier(Modifier::BOLD);
        let bot = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);

        let mut lines = Vec::new();
        for message in self.messages {
            let (who, style) = match message.role {
                ChatRole::User => ("You", user),
                ChatRole::Assistant => ("Kanasu", bot),
            };
            lines.push(Line::from(Span::styled(format!("{}:", who), style)));
            lines.extend(
                message
                    .content
                    .lines()
                    .map(|l| Line::from(format!("  {}", l))),
            );
            lines.push(Line::from(""));
        }

        if self.waiting {
            lines.push(Line::from(Span::styled(
                self.ctx.t(TranslationKey::Loading),
                dim(),
            )));
        }
        lines
    }
}

impl<'a> Widget for ChatScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(3)])
            .split(area);

        let log_block = titled_block(ctx.t(TranslationKey::Chat), ctx.high_contrast);
        let log_inner = log_block.inner(chunks[0]);
        log_block.render(chunks[0], buf);

        let lines = self.message_lines();
        // keep the newest message in view
        let overflow = (lines.len() as u16).saturating_sub(log_inner.height);
        let offset = overflow.saturating_sub(self.view.scroll);
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((offset, 0))
            .render(log_inner, buf);

        let input_block = titled_block("", ctx.high_contrast);
        let input_inner = input_block.inner(chunks[1]);
        input_block.render(chunks[1], buf);

        let input = if self.view.input.is_empty() && !self.view.editing {
            Line::from(vec![
                Span::styled(ctx.t(TranslationKey::AskSomething), dim()),
                Span::styled("  [Enter] type  [x] clear", dim()),
            ])
        } else {
            let cursor = if self.view.editing { "█" } else { "" };
            Line::from(format!("> {}{}", self.view.input, cursor))
        };
        Paragraph::new(input).render(input_inner, buf);
    }
}
