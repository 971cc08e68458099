/// Interest multi-select grouped by domain, capped by the career form
use kanasu_core::catalog::{interest_label, INTEREST_DOMAINS};
use kanasu_core::form::{CareerFormSession, InterestToggle, MAX_INTERESTS};
use kanasu_core::Result;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{accent, dim, titled_block};

/// Cursor over every interest tag, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct InterestPickerState {
    pub cursor: usize,
    pub focused: bool,
}

impl InterestPickerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `(domain name, tag)` for every interest.
    pub fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
        INTEREST_DOMAINS
            .iter()
            .flat_map(|d| d.interests.iter().map(move |tag| (d.name, *tag)))
    }

    pub fn len() -> usize {
        INTEREST_DOMAINS.iter().map(|d| d.interests.len()).sum()
    }

    pub fn current_tag(&self) -> Option<&'static str> {
        Self::entries().nth(self.cursor).map(|(_, tag)| tag)
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < Self::len() {
            self.cursor += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Toggles the tag under the cursor on `form`.
    pub fn toggle(&self, form: &mut CareerFormSession) -> Result<Option<InterestToggle>> {
        match self.current_tag() {
            Some(tag) => form.toggle_interest(tag).map(Some),
            None => Ok(None),
        }
    }
}

pub struct InterestPicker<'a> {
    state: &'a InterestPickerState,
    form: &'a CareerFormSession,
    title: &'a str,
    high_contrast: bool,
}

impl<'a> InterestPicker<'a> {
    pub fn new(state: &'a InterestPickerState, form: &'a CareerFormSession, title: &'a str) -> Self {
        Self {
            state,
            form,
            title,
            high_contrast: false,
        }
    }

    pub fn high_contrast(mut self, enabled: bool) -> Self {
        self.high_contrast = enabled;
        self
    }
}

impl<'a> Widget for InterestPicker<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let accent = accent(self.high_contrast);
        let title = format!(
            "{} ({}/{})",
            self.title,
            self.form.interests().len(),
            MAX_INTERESTS
        );
        let block = titled_block(&title, self.high_contrast);
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = Vec::new();
        let mut cursor_line = 0;
        let mut last_domain = "";
        for (i, (domain, tag)) in InterestPickerState::entries().enumerate() {
            if domain != last_domain {
                lines.push(Line::from(Span::styled(
                    domain,
                    Style::default().fg(accent).add_modifier(Modifier::BOLD),
                )));
                last_domain = domain;
            }

            let selected = self.form.is_selected(tag);
            let checkbox = if selected { "[x]" } else { "[ ]" };
            let style = if i == self.state.cursor && self.state.focused {
                Style::default()
                    .bg(accent)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else if !self.form.can_select(tag) {
                dim()
            } else if selected {
                Style::default().fg(accent)
            } else {
                Style::default()
            };

            if i == self.state.cursor {
                cursor_line = lines.len();
            }
            lines.push(Line::from(Span::styled(
                format!("  {} {}", checkbox, interest_label(tag)),
                style,
            )));
        }

        // keep the cursor on screen
        let height = inner.height as usize;
        let scroll = cursor_line.saturating_sub(height.saturating_sub(1));
        Paragraph::new(lines)
            .scroll((scroll as u16, 0))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanasu_core::KanasuError;

    #[test]
    fn cursor_stays_in_bounds() {
        let mut state = InterestPickerState::new();
        state.move_up();
        assert_eq!(state.cursor, 0);

        for _ in 0..InterestPickerState::len() + 5 {
            state.move_down();
        }
        assert_eq!(state.cursor, InterestPickerState::len() - 1);
        assert!(state.current_tag().is_some());
    }

    #[test]
    fn toggling_respects_the_cap() {
        let mut form = CareerFormSession::new();
        let mut state = InterestPickerState::new();

        for _ in 0..MAX_INTERESTS {
            assert_eq!(state.toggle(&mut form).unwrap(), Some(InterestToggle::Added));
            state.move_down();
        }
        assert!(matches!(
            state.toggle(&mut form),
            Err(KanasuError::InterestLimit { max: 4 })
        ));

        state.move_up();
        assert_eq!(state.toggle(&mut form).unwrap(), Some(InterestToggle::Removed));
        assert_eq!(form.interests().len(), MAX_INTERESTS - 1);
    }

    #[test]
    fn first_entry_is_first_catalog_tag() {
        let state = InterestPickerState::new();
        assert_eq!(state.current_tag(), Some(INTEREST_DOMAINS[0].interests[0]));
    }
}
