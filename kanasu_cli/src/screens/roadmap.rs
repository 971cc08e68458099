/// Roadmap screen - three-term plan and nearby institutions
use kanasu_core::i18n::TranslationKey;
use kanasu_core::roadmap::Roadmap;
use kanasu_core::types::CareerRecommendation;
use kanasu_core::Locale;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::ViewContext;
use crate::components::{dim, titled_block};

#[derive(Debug, Clone, Default)]
pub struct RoadmapState {
    pub career: Option<CareerRecommendation>,
    pub roadmap: Option<Roadmap>,
    pub scroll: u16,
}

impl RoadmapState {
    /// Whether the loaded roadmap was generated for `career` in `locale`.
    pub fn is_for(&self, career: &CareerRecommendation, locale: Locale) -> bool {
        self.roadmap.as_ref().is_some_and(|r| r.locale == locale)
            && self
                .career
                .as_ref()
                .is_some_and(|c| c.title_code == career.title_code)
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}

pub struct RoadmapScreen<'a> {
    state: &'a RoadmapState,
    ctx: ViewContext,
}

impl<'a> RoadmapScreen<'a> {
    pub fn new(state: &'a RoadmapState, ctx: ViewContext) -> Self {
        Self { state, ctx }
    }

    fn plan_lines(&self, roadmap: &Roadmap) -> Vec<Line<'static>> {
        let ctx = self.ctx;
        let heading = Style::default().fg(ctx.accent()).add_modifier(Modifier::BOLD);

        let mut lines = vec![
            Line::from(Span::styled(
                roadmap.career.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(roadmap.roadmap_text.clone()),
            Line::from(""),
        ];

        for step in &roadmap.steps {
            lines.push(Line::from(Span::styled(step.term_label.clone(), heading)));
            lines.extend(step.tasks.iter().map(|t| Line::from(format!("  • {}", t))));
            if !step.courses.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  Courses: {}", step.courses.join(", ")),
                    dim(),
                )));
            }
            if !step.colleges.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("  Colleges: {}", step.colleges.join(", ")),
                    dim(),
                )));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            format!("[q] {}  j/k scroll", ctx.t(TranslationKey::Back)),
            dim(),
        )));
        lines
    }

    fn institution_lines(&self, roadmap: &Roadmap) -> Vec<Line<'static>> {
        roadmap
            .nearby_institutions
            .iter()
            .flat_map(|inst| {
                let distance = inst
                    .distance_km
                    .map(|d| format!(" ({:.1} km)", d))
                    .unwrap_or_default();
                [
                    Line::from(Span::styled(
                        format!("{}{}", inst.name, distance),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!("  {}", inst.address)),
                    Line::from(Span::styled(format!("  {}", inst.maps_url), dim())),
                    Line::from(""),
                ]
            })
            .collect()
    }
}

impl<'a> Widget for RoadmapScreen<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ctx = self.ctx;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let plan_block = titled_block(ctx.t(TranslationKey::Roadmap), ctx.high_contrast);
        let plan_inner = plan_block.inner(chunks[0]);
        plan_block.render(chunks[0], buf);

        let inst_block = titled_block(ctx.t(TranslationKey::NearbyInstitutions), ctx.high_contrast);
        let inst_inner = inst_block.inner(chunks[1]);
        inst_block.render(chunks[1], buf);

        match &self.state.roadmap {
            Some(roadmap) => {
                Paragraph::new(self.plan_lines(roadmap))
                    .wrap(Wrap { trim: false })
                    .scroll((self.state.scroll, 0))
                    .render(plan_inner, buf);
                Paragraph::new(self.institution_lines(roadmap))
                    .wrap(Wrap { trim: false })
                    .render(inst_inner, buf);
            }
            None => {
                Paragraph::new(ctx.t(TranslationKey::Loading)).render(plan_inner, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanasu_core::recommender::MockRecommender;
    use kanasu_core::roadmap::{MockRoadmapGenerator, RoadmapGenerator, RoadmapRequest};

    #[test]
    fn roadmap_belongs_to_its_career() {
        let recs = MockRecommender::recommendations();
        let roadmap = MockRoadmapGenerator
            .generate(&RoadmapRequest::for_career(&recs[0].title_code, Locale::En))
            .unwrap();

        let state = RoadmapState {
            career: Some(recs[0].clone()),
            roadmap: Some(roadmap),
            scroll: 0,
        };
        assert!(state.is_for(&recs[0], Locale::En));
        assert!(!state.is_for(&recs[0], Locale::Kn));
        assert!(!state.is_for(&recs[1], Locale::En));
        assert!(!RoadmapState::default().is_for(&recs[0], Locale::En));
    }
}
