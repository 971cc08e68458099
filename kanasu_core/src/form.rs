//! Career form state for one recommender session.

use serde::{Deserialize, Serialize};

use crate::error::{KanasuError, Result};
use crate::types::{GeoLocation, PredictRequest};

/// Maximum number of interests selectable at once.
pub const MAX_INTERESTS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerFormData {
    /// As typed; parsed only when building a request.
    pub age: String,
    pub gender: String,
    pub education: String,
    pub stream_code: String,
    pub interests: Vec<String>,
    /// Comma separated free text.
    pub skills: String,
}

/// Outcome of toggling one interest tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterestToggle {
    Added,
    Removed,
}

#[derive(Debug, Default)]
pub struct CareerFormSession {
    data: CareerFormData,
}

impl CareerFormSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> &CareerFormData {
        &self.data
    }

    pub fn update_age(&mut self, age: &str) {
        self.data.age = age.to_string();
    }

    pub fn update_gender(&mut self, gender: &str) {
        self.data.gender = gender.to_string();
    }

    pub fn update_education(&mut self, education: &str) {
        self.data.education = education.to_string();
    }

    pub fn update_stream(&mut self, stream_code: &str) {
        self.data.stream_code = stream_code.to_string();
    }

    pub fn update_skills(&mut self, skills: &str) {
        self.data.skills = skills.to_string();
    }

    pub fn interests(&self) -> &[String] {
        &self.data.interests
    }

    /// Whether `tag` could be toggled on right now.
    pub fn can_select(&self, tag: &str) -> bool {
        self.is_selected(tag) || self.data.interests.len() < MAX_INTERESTS
    }

    pub fn is_selected(&self, tag: &str) -> bool {
        self.data.interests.iter().any(|i| i == tag)
    }

    /// Removes `tag` if selected, otherwise appends it unless the cap is hit.
    pub fn toggle_interest(&mut self, tag: &str) -> Result<InterestToggle> {
        if let Some(pos) = self.data.interests.iter().position(|i| i == tag) {
            self.data.interests.remove(pos);
            return Ok(InterestToggle::Removed);
        }
        if self.data.interests.len() >= MAX_INTERESTS {
            return Err(KanasuError::InterestLimit { max: MAX_INTERESTS });
        }
        self.data.interests.push(tag.to_string());
        Ok(InterestToggle::Added)
    }

    /// Selects `tag` unless it already is. Unlike [`toggle_interest`], a
    /// repeated tag never deselects.
    ///
    /// [`toggle_interest`]: Self::toggle_interest
    pub fn select_interest(&mut self, tag: &str) -> Result<()> {
        if !self.is_selected(tag) {
            self.toggle_interest(tag)?;
        }
        Ok(())
    }

    pub fn parsed_skills(&self) -> Vec<String> {
        self.data
            .skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn parsed_age(&self) -> Option<u32> {
        self.data.age.trim().parse().ok()
    }

    pub fn reset(&mut self) {
        self.data = CareerFormData::default();
    }

    pub fn to_predict_request(&self, location: Option<GeoLocation>) -> PredictRequest {
        fn non_empty(s: &str) -> Option<String> {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }

        PredictRequest {
            text: None,
            interests: self.data.interests.clone(),
            skills: self.parsed_skills(),
            education: non_empty(&self.data.education),
            stream_code: non_empty(&self.data.stream_code),
            gender: non_empty(&self.data.gender),
            age: self.parsed_age(),
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifth_interest_is_rejected() {
        let mut form = CareerFormSession::new();
        for tag in ["coding", "robotics", "drawing", "finance"] {
            assert_eq!(form.toggle_interest(tag).unwrap(), InterestToggle::Added);
        }
        assert!(!form.can_select("sports"));
        assert!(matches!(
            form.toggle_interest("sports"),
            Err(KanasuError::InterestLimit { max: 4 })
        ));
        assert_eq!(form.interests().len(), 4);

        assert_eq!(form.toggle_interest("robotics").unwrap(), InterestToggle::Removed);
        assert_eq!(form.toggle_interest("sports").unwrap(), InterestToggle::Added);
        assert_eq!(form.interests(), ["coding", "drawing", "finance", "sports"]);
    }

    #[test]
    fn repeated_tags_select_once() {
        let mut form = CareerFormSession::new();
        for tag in ["coding", "coding", "drawing", "coding"] {
            form.select_interest(tag).unwrap();
        }
        assert_eq!(form.interests(), ["coding", "drawing"]);
        assert!(form.to_predict_request(None).has_signal());
    }

    #[test]
    fn select_interest_still_enforces_cap() {
        let mut form = CareerFormSession::new();
        for tag in ["coding", "robotics", "drawing", "finance"] {
            form.select_interest(tag).unwrap();
        }
        form.select_interest("finance").unwrap();
        assert!(matches!(
            form.select_interest("sports"),
            Err(KanasuError::InterestLimit { max: 4 })
        ));
    }

    #[test]
    fn skills_split_on_commas() {
        let mut form = CareerFormSession::new();
        form.update_skills(" python, ,  sql ,excel");
        assert_eq!(form.parsed_skills(), vec!["python", "sql", "excel"]);
    }

    #[test]
    fn predict_request_drops_blank_fields() {
        let mut form = CareerFormSession::new();
        form.update_age("17");
        form.update_education("puc");
        form.update_gender("  ");
        form.toggle_interest("coding").unwrap();

        let req = form.to_predict_request(None);
        assert_eq!(req.age, Some(17));
        assert_eq!(req.education.as_deref(), Some("puc"));
        assert!(req.gender.is_none());
        assert!(req.stream_code.is_none());
        assert!(req.has_signal());

        form.update_age("seventeen");
        assert!(form.to_predict_request(None).age.is_none());
    }
}
