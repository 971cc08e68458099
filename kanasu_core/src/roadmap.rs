//! Multi-term career roadmaps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::career_label;
use crate::error::{KanasuError, Result};
use crate::form::CareerFormData;
use crate::i18n::{translate, TranslationKey};
use crate::institutions::Institution;
use crate::locale::Locale;
use crate::types::GeoLocation;

// ============================================================
// ROADMAP TYPES
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Term {
    Short,
    Medium,
    Long,
}

impl Term {
    pub fn key(&self) -> TranslationKey {
        match self {
            Term::Short => TranslationKey::ShortTerm,
            Term::Medium => TranslationKey::MediumTerm,
            Term::Long => TranslationKey::LongTerm,
        }
    }

    pub fn label(&self, locale: Locale) -> &'static str {
        translate(locale, self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub term: Term,
    pub term_label: String,
    pub tasks: Vec<String>,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(default)]
    pub colleges: Vec<String>,
}

impl RoadmapStep {
    fn new(term: Term, locale: Locale, tasks: &[&str], courses: &[&str], colleges: &[&str]) -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        Self {
            term,
            term_label: term.label(locale).to_string(),
            tasks: owned(tasks),
            courses: owned(courses),
            colleges: owned(colleges),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub career: String,
    pub roadmap_text: String,
    pub steps: Vec<RoadmapStep>,
    #[serde(default)]
    pub nearby_institutions: Vec<Institution>,
    pub locale: Locale,
    pub generated_at: DateTime<Utc>,
}

/// Body of `POST /api/gemini/roadmap`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoadmapRequest {
    /// Title codes or labels; the first one is planned for.
    pub careers: Vec<String>,
    #[serde(default)]
    pub form_data: Option<CareerFormData>,
    #[serde(default)]
    pub locale: Option<Locale>,
    /// Where distances to institutions are measured from.
    #[serde(default)]
    pub origin: Option<GeoLocation>,
}

impl RoadmapRequest {
    pub fn for_career(career: &str, locale: Locale) -> Self {
        Self {
            careers: vec![career.to_string()],
            locale: Some(locale),
            ..Default::default()
        }
    }

    fn primary_career(&self) -> Result<&str> {
        self.careers
            .iter()
            .map(|c| c.trim())
            .find(|c| !c.is_empty())
            .ok_or_else(|| KanasuError::InvalidInput("At least one career is required".to_string()))
    }
}

pub trait RoadmapGenerator: Send + Sync {
    fn generate(&self, request: &RoadmapRequest) -> Result<Roadmap>;
}

// ============================================================
// MOCK GENERATOR
// ============================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct MockRoadmapGenerator;

impl MockRoadmapGenerator {
    pub const ROADMAP_TEXT: &'static str =
        "This is a complete mock career roadmap generated for demo purposes.";

    pub fn steps(locale: Locale) -> Vec<RoadmapStep> {
        vec![
            RoadmapStep::new(
                Term::Short,
                locale,
                &["Learn basics", "Build small projects"],
                &["Course A", "Course B"],
                &["College 1", "College 2"],
            ),
            RoadmapStep::new(
                Term::Medium,
                locale,
                &["Work on real-world projects", "Get internships"],
                &["Course C"],
                &["College 3"],
            ),
            RoadmapStep::new(
                Term::Long,
                locale,
                &["Join full-time", "Specialize in skills"],
                &[],
                &[],
            ),
        ]
    }

    pub fn institutions() -> Vec<Institution> {
        vec![
            Institution::at("ABC Institute", "MG Road", 12.97, 77.59),
            Institution::at("Tech Academy", "BTM Layout", 12.91, 77.60),
        ]
    }
}

impl RoadmapGenerator for MockRoadmapGenerator {
    fn generate(&self, request: &RoadmapRequest) -> Result<Roadmap> {
        let career = request.primary_career()?;
        let locale = request.locale.unwrap_or_default();
        let origin = request.origin.as_ref().map(|o| (o.lat, o.lng));

        log::info!("[ROADMAP] Generating mock roadmap for '{}' ({})", career, locale);

        Ok(Roadmap {
            career: career_label(career),
            roadmap_text: Self::ROADMAP_TEXT.to_string(),
            steps: Self::steps(locale),
            nearby_institutions: Self::institutions()
                .into_iter()
                .map(|inst| inst.with_distance_from(origin))
                .collect(),
            locale,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_plan_has_three_terms() {
        let roadmap = MockRoadmapGenerator
            .generate(&RoadmapRequest::for_career("software_engineer", Locale::En))
            .unwrap();

        assert_eq!(roadmap.career, "Software Engineer");
        let terms: Vec<_> = roadmap.steps.iter().map(|s| s.term).collect();
        assert_eq!(terms, [Term::Short, Term::Medium, Term::Long]);
        assert_eq!(roadmap.steps[1].courses, vec!["Course C"]);
        assert!(roadmap.steps[2].colleges.is_empty());
        assert_eq!(roadmap.nearby_institutions.len(), 2);
        assert!(roadmap.nearby_institutions[0].distance_km.is_none());
    }

    #[test]
    fn term_labels_follow_locale() {
        let roadmap = MockRoadmapGenerator
            .generate(&RoadmapRequest::for_career("Data Scientist", Locale::Kn))
            .unwrap();
        assert_eq!(roadmap.career, "Data Scientist");
        assert_eq!(roadmap.steps[0].term_label, "ಅಲ್ಪಾವಧಿ (0-1 ವರ್ಷಗಳು)");
    }

    #[test]
    fn origin_fills_distances() {
        let mut request = RoadmapRequest::for_career("lawyer", Locale::En);
        request.origin = Some(GeoLocation::new("MG Road", 12.97, 77.59));
        let roadmap = MockRoadmapGenerator.generate(&request).unwrap();
        assert_eq!(roadmap.nearby_institutions[0].distance_km, Some(0.0));
        assert!(roadmap.nearby_institutions[1].distance_km.unwrap() > 6.0);
    }

    #[test]
    fn empty_careers_rejected() {
        let err = MockRoadmapGenerator.generate(&RoadmapRequest::default()).unwrap_err();
        assert!(matches!(err, KanasuError::InvalidInput(_)));
    }
}
