/// Career recommender - profile form, interest picker and top matches
use crossterm::event::KeyCode;
use kanasu_core::catalog::{
    all_stream_codes, education_level, interest_label, stream_label, EDUCATION_LEVELS, GENDERS,
};
use kanasu_core::form::CareerFormSession;
use kanasu_core::i18n::TranslationKey;
use kanasu_core::types::CareerRecommendation;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{button_line, edit_text, field_line, ViewContext};
use crate::components::{create_row, dim, titled_block, InterestPicker, InterestPickerState, TableWidget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommenderFocus {
    Age,
    Gender,
    Education,
    Stream,
    Interests,
    Skills,
    Submit,
    Results,
}

const FOCUS_ORDER: &[RecommenderFocus] = &[
    RecommenderFocus::Age,
    RecommenderFocus::Gender,
    RecommenderFocus::Education,
    RecommenderFocus::Stream,
    RecommenderFocus::Interests,
    RecommenderFocus::Skills,
    RecommenderFocus::Submit,
    RecommenderFocus::Results,
];

impl RecommenderFocus {
    /// Fields edited as free text rather than by cycling options.
    pub fn is_text(&self) -> bool {
        matches!(self, RecommenderFocus::Age | RecommenderFocus::Skills)
    }
}

/// Next entry after `current` in `options`, wrapping; an unset value picks
/// the first option.
fn cycle<'a>(options: impl Iterator<Item = &'a str> + Clone, current: &str) -> Option<&'a str> {
    let mut all = options.clone();
    let first = options.clone().next();
    match all.position(|o| o == current) {
        Some(_) => all.next().or(first),
        None => first,
    }
}

#[derive(Debug)]
pub struct RecommenderState {
    pub form: CareerFormSession,
    pub focus: RecommenderFocus,
    pub editing: bool,
    pub picker: InterestPickerState,
    pub results: Vec<CareerRecommendation>,
    pub result_cursor: usize,
}

impl Default for RecommenderState {
    fn default() -> Self {
        Self {
            form: CareerFormSession::new(),
            focus: RecommenderFocus::Age,
            editing: false,
            picker: InterestPickerState::new(),
            results: Vec::new(),
            result_cursor: 0,
        }
    }
}

impl RecommenderState {
    pub fn new() -> Self {
        Self::default()
    }

    fn focus_index(&self) -> usize {
        FOCUS_ORDER
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0)
    }

    fn set_focus(&mut self, focus: RecommenderFocus) {
        self.focus = focus;
        self.picker.focused = focus == RecommenderFocus::Interests;
    }

    /// Results only take focus once there are some.
    fn focusable(&self) -> usize {
        if self.results.is_empty() {
            FOCUS_ORDER.len() - 1
        } else {
            FOCUS_ORDER.len()
        }
    }

    pub fn focus_next(&mut self) {
        let next = (self.focus_index() + 1) % self.focusable();
        self.set_focus(FOCUS_ORDER[next]);
    }

    pub fn focus_prev(&mut self) {
        let count = self.focusable();
        let prev = (self.focus_index() + count - 1) % count;
        self.set_focus(FOCUS_ORDER[prev]);
    }

    pub fn move_down(&mut self) {
        match self.focus {
            RecommenderFocus::Interests => self.picker.move_down(),
            RecommenderFocus::Results => {
                if self.result_cursor + 1 < self.results.len() {
                    self.result_cursor += 1;
                }
            }
            _ => self.focus_next(),
        }
    }

    pub fn move_up(&mut self) {
        match self.focus {
            RecommenderFocus::Interests => self.picker.move_up(),
            RecommenderFocus::Results => self.result_cursor = self.result_cursor.saturating_sub(1),
            _ => self.focus_prev(),
        }
    }

    /// Steps the focused option field to its next value.
    pub fn cycle_option(&mut self) {
        let data = self.form.data().clone();
        match self.focus {
            RecommenderFocus::Gender => {
                if let Some(next) = cycle(GENDERS.iter().copied(), &data.gender) {
                    self.form.update_gender(next);
                }
            }
            RecommenderFocus::Education => {
                if let Some(next) = cycle(EDUCATION_LEVELS.iter().map(|l| l.code), &data.education) {
                    self.form.update_education(next);
                }
            }
            RecommenderFocus::Stream => {
                let codes: Vec<&str> = all_stream_codes().collect();
                if let Some(next) = cycle(codes.iter().copied(), &data.stream_code) {
                    self.form.update_stream(next);
                }
            }
            _ => {}
        }
    }

    /// Feeds a typed key into the focused text field.
    pub fn edit(&mut self, code: KeyCode) {
        match self.focus {
            RecommenderFocus::Age => {
                let mut age = self.form.data().age.clone();
                if edit_text(&mut age, code) {
                    self.form.update_age(&age);
                }
            }
            RecommenderFocus::Skills => {
                let mut skills = self.form.data().skills.clone();
                if edit_text(&mut skills, code) {
                    self.form.update_skills(&skills);
                }
            }
            _ => {}
        }
    }

    pub fn set_results(&mut self, results: Vec<CareerRecommendation>) {
        self.results = results;
        self.result_cursor = 0;
        if !self.results.is_empty() {
            self.set_focus(RecommenderFocus::Results);
        }
    }

    pub fn selected_result(&self) -> Option<&CareerRecommendation> {
        self.results.get(self.result_cursor)
    }
}

pub struct RecommenderScreen<'a> {
    state: &'a RecommenderState,
    loading: bool,
    ctx: ViewContext,
}

impl<'a> RecommenderScreen<'a> {
    pub fn new(state: &'a RecommenderState, ctx: ViewContext) -> Self {
        Self {
            state,
            loading: false,
            ctx,
        }
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let state = self.state;
        let data = state.form.data();

        let block = titled_block(ctx.t(TranslationKey::Recommender), ctx.high_contrast);
        let inner = block.inner(area);
        block.render(area, buf);

        let focused = |f: RecommenderFocus| state.focus == f;
        let editing = |f: RecommenderFocus| state.focus == f && state.editing;

        let gender = interest_label(&data.gender);
        let education = education_level(&data.education)
            .map(|l| l.label)
            .unwrap_or("");
        let stream = stream_label(&data.stream_code).unwrap_or("");
        let interests = data
            .interests
            .iter()
            .map(|tag| interest_label(tag))
            .collect::<Vec<_>>()
            .join(", ");

        let submit = if self.loading {
            ctx.t(TranslationKey::Loading)
        } else {
            ctx.t(TranslationKey::GetRecommendations)
        };

        let lines = vec![
            field_line(&ctx, ctx.t(TranslationKey::Age), &data.age, focused(RecommenderFocus::Age), editing(RecommenderFocus::Age)),
            field_line(&ctx, ctx.t(TranslationKey::Gender), &gender, focused(RecommenderFocus::Gender), false),
            field_line(&ctx, ctx.t(TranslationKey::Education), education, focused(RecommenderFocus::Education), false),
            field_line(&ctx, ctx.t(TranslationKey::Stream), stream, focused(RecommenderFocus::Stream), false),
            field_line(&ctx, ctx.t(TranslationKey::Interests), &interests, focused(RecommenderFocus::Interests), false),
            field_line(&ctx, ctx.t(TranslationKey::Skills), &data.skills, focused(RecommenderFocus::Skills), editing(RecommenderFocus::Skills)),
            Line::from(""),
            button_line(&ctx, submit, focused(RecommenderFocus::Submit)),
            Line::from(""),
            Line::from(Span::styled(
                "Tab: next  Enter: edit/cycle  Space: toggle interest",
                dim(),
            )),
        ];

        Paragraph::new(lines).render(inner, buf);
    }

    fn render_results(&self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let rows = self
            .state
            .results
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                create_row(
                    vec![
                        format!("{}", i + 1),
                        rec.title_label.clone(),
                        rec.cluster_label.clone(),
                        format!("{}%", rec.percent()),
                    ],
                    if rec.percent() >= 80 { Color::Green } else { Color::Yellow },
                )
            })
            .collect();

        let mut table = TableWidget::new(
            ctx.t(TranslationKey::TopCareerMatches),
            vec!["#", "Career", "Cluster", ctx.t(TranslationKey::Confidence)],
            vec![
                Constraint::Length(3),
                Constraint::Percentage(40),
                Constraint::Percentage(35),
                Constraint::Length(12),
            ],
        )
        .rows(rows)
        .high_contrast(ctx.high_contrast);
        if self.state.focus == RecommenderFocus::Results {
            table = table.selected(self.state.result_cursor);
        }

        Widget::render(table, area, buf);
    }
}

impl<'a> Widget for RecommenderScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(12), Constraint::Length(7)])
            .split(area);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);

        self.render_form(top[0], buf);
        InterestPicker::new(
            &self.state.picker,
            &self.state.form,
            self.ctx.t(TranslationKey::Interests),
        )
        .high_contrast(self.ctx.high_contrast)
        .render(top[1], buf);
        self.render_results(rows[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanasu_core::recommender::MockRecommender;

    #[test]
    fn cycle_wraps_and_starts_at_first() {
        let options = ["a", "b", "c"];
        assert_eq!(cycle(options.iter().copied(), ""), Some("a"));
        assert_eq!(cycle(options.iter().copied(), "a"), Some("b"));
        assert_eq!(cycle(options.iter().copied(), "c"), Some("a"));
    }

    #[test]
    fn option_fields_cycle_through_catalog() {
        let mut state = RecommenderState::new();
        state.focus = RecommenderFocus::Education;
        state.cycle_option();
        assert_eq!(state.form.data().education, "sslc");
        state.cycle_option();
        assert_eq!(state.form.data().education, "puc");

        state.focus = RecommenderFocus::Stream;
        state.cycle_option();
        assert_eq!(state.form.data().stream_code, "pcm");
    }

    #[test]
    fn typing_updates_text_fields() {
        let mut state = RecommenderState::new();
        state.focus = RecommenderFocus::Skills;
        for c in "python, sql".chars() {
            state.edit(KeyCode::Char(c));
        }
        assert_eq!(state.form.parsed_skills(), vec!["python", "sql"]);
    }

    #[test]
    fn results_join_the_focus_ring() {
        let mut state = RecommenderState::new();
        state.focus = RecommenderFocus::Submit;
        state.focus_next();
        assert_eq!(state.focus, RecommenderFocus::Age);

        state.set_results(MockRecommender::recommendations());
        assert_eq!(state.focus, RecommenderFocus::Results);
        state.move_down();
        assert_eq!(state.selected_result().unwrap().title_code, "data_scientist");
    }
}
