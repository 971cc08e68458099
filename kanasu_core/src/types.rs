//! Shared data types exchanged between the client, the store and the API.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Default coordinates used when a user has not supplied any (Bengaluru).
pub const DEFAULT_LAT: f64 = 12.9716;
pub const DEFAULT_LNG: f64 = 77.5946;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoLocation {
    pub city: String,
    pub lat: f64,
    pub lng: f64,
}

impl GeoLocation {
    pub fn new(city: &str, lat: f64, lng: f64) -> Self {
        Self {
            city: city.to_string(),
            lat,
            lng,
        }
    }

    /// A city name pinned to the default coordinates, as sign-up does.
    pub fn city_only(city: &str) -> Self {
        Self::new(city, DEFAULT_LAT, DEFAULT_LNG)
    }
}

impl Default for GeoLocation {
    fn default() -> Self {
        Self::new("", 0.0, 0.0)
    }
}

/// A signed-in user, persisted verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub age: u32,
    pub location: GeoLocation,
    pub preferred_language: String,
}

impl User {
    /// Preferred language as a [`Locale`], English when unrecognized.
    pub fn locale(&self) -> Locale {
        Locale::from_code(&self.preferred_language).unwrap_or_default()
    }
}

/// Partial update applied to the current user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub location: Option<GeoLocation>,
    pub preferred_language: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: ChatRole::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.to_string(),
        }
    }
}

/// A labeled, probability-scored candidate occupation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub title_code: String,
    pub title_label: String,
    pub cluster_code: String,
    pub cluster_label: String,
    /// In `[0, 1]`
    pub probability: f64,
}

impl CareerRecommendation {
    pub fn new(
        title_code: &str,
        title_label: &str,
        cluster_code: &str,
        cluster_label: &str,
        probability: f64,
    ) -> Self {
        Self {
            title_code: title_code.to_string(),
            title_label: title_label.to_string(),
            cluster_code: cluster_code.to_string(),
            cluster_label: cluster_label.to_string(),
            probability: probability.clamp(0.0, 1.0),
        }
    }

    /// Probability as a whole percentage, for display and speech.
    pub fn percent(&self) -> u32 {
        (self.probability * 100.0).round() as u32
    }
}

/// Body of `POST /predict`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoLocation>,
}

impl PredictRequest {
    /// At least one of text, interests or skills must carry content.
    pub fn has_signal(&self) -> bool {
        self.text.as_deref().map_or(false, |t| !t.trim().is_empty())
            || self.interests.iter().any(|i| !i.trim().is_empty())
            || self.skills.iter().any(|s| !s.trim().is_empty())
    }

    /// Single free-text string built the way the prediction pipeline expects:
    /// explicit text wins, otherwise interests followed by skills.
    pub fn model_text(&self) -> String {
        if let Some(text) = self.text.as_deref().filter(|t| !t.trim().is_empty()) {
            return text.trim().to_string();
        }
        self.interests
            .iter()
            .chain(self.skills.iter())
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Backend-shaped prediction entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionItem {
    pub label: String,
    #[serde(default)]
    pub label_kn: Option<String>,
    pub probability: f64,
    #[serde(default)]
    pub cluster: Option<String>,
}

impl From<&CareerRecommendation> for PredictionItem {
    fn from(rec: &CareerRecommendation) -> Self {
        Self {
            label: rec.title_label.clone(),
            label_kn: None,
            probability: (rec.probability * 10_000.0).round() / 10_000.0,
            cluster: Some(rec.cluster_label.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub top_3: Vec<PredictionItem>,
    #[serde(default)]
    pub recommendations: Vec<CareerRecommendation>,
}

impl PredictResponse {
    pub fn from_recommendations(recommendations: Vec<CareerRecommendation>) -> Self {
        Self {
            top_3: recommendations.iter().take(3).map(PredictionItem::from).collect(),
            recommendations,
        }
    }
}
