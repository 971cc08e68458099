//! Career recommendation providers.
//!
//! Two in-process implementations ship: a fixed three-entry mock, and a
//! deterministic keyword scorer over the career catalog. Both answer the
//! same contract the REST service exposes under `/predict`.

use std::collections::HashSet;

use crate::catalog::{CareerEntry, CAREERS};
use crate::error::{KanasuError, Result};
use crate::types::{CareerRecommendation, PredictRequest};

/// Number of careers returned by a prediction.
pub const TOP_K: usize = 3;

pub trait Recommender: Send + Sync {
    fn predict(&self, request: &PredictRequest) -> Result<Vec<CareerRecommendation>>;
}

fn validate(request: &PredictRequest) -> Result<()> {
    if request.has_signal() {
        Ok(())
    } else {
        Err(KanasuError::InvalidInput(
            "Provide at least one of: text, interests, skills".to_string(),
        ))
    }
}

// ============================================================
// MOCK
// ============================================================

#[derive(Debug, Default, Clone, Copy)]
pub struct MockRecommender;

impl MockRecommender {
    pub fn recommendations() -> Vec<CareerRecommendation> {
        vec![
            CareerRecommendation::new("software_engineer", "Software Engineer", "tech", "Technology", 0.92),
            CareerRecommendation::new("data_scientist", "Data Scientist", "data", "AI & Data", 0.88),
            CareerRecommendation::new("ux_designer", "UX Designer", "creative", "Creative", 0.74),
        ]
    }
}

impl Recommender for MockRecommender {
    fn predict(&self, request: &PredictRequest) -> Result<Vec<CareerRecommendation>> {
        validate(request)?;
        log::info!("[PREDICT] Returning mock recommendations");
        Ok(Self::recommendations())
    }
}

// ============================================================
// CATALOG SCORING
// ============================================================

/// Ranks catalog careers by keyword overlap with the request.
#[derive(Debug, Clone)]
pub struct CatalogRecommender {
    careers: &'static [CareerEntry],
    top_k: usize,
}

impl Default for CatalogRecommender {
    fn default() -> Self {
        Self {
            careers: CAREERS,
            top_k: TOP_K,
        }
    }
}

impl CatalogRecommender {
    /// Lowercased tokens from text, interests and skills. Interest tags are
    /// kept whole as well as split, so `machine_learning` matches both ways.
    fn tokens(request: &PredictRequest) -> HashSet<String> {
        let mut tokens = HashSet::new();
        let sources = request
            .text
            .iter()
            .chain(request.interests.iter())
            .chain(request.skills.iter());

        for source in sources {
            let lowered = source.trim().to_lowercase();
            if lowered.is_empty() {
                continue;
            }
            tokens.insert(lowered.replace(' ', "_"));
            for word in lowered.split(|c: char| !c.is_alphanumeric() && c != '_') {
                if word.is_empty() {
                    continue;
                }
                tokens.insert(word.to_string());
                tokens.extend(word.split('_').filter(|w| !w.is_empty()).map(str::to_string));
            }
        }
        tokens
    }

    fn score(entry: &CareerEntry, tokens: &HashSet<String>) -> usize {
        entry
            .keywords
            .iter()
            .filter(|keyword| tokens.contains(**keyword))
            .count()
    }
}

impl Recommender for CatalogRecommender {
    fn predict(&self, request: &PredictRequest) -> Result<Vec<CareerRecommendation>> {
        validate(request)?;
        let tokens = Self::tokens(request);

        let mut scored: Vec<(&CareerEntry, usize)> = self
            .careers
            .iter()
            .map(|entry| (entry, Self::score(entry, &tokens)))
            .filter(|(_, score)| *score > 0)
            .collect();

        // Stable: equal scores keep catalog order
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let total: f64 = scored.iter().map(|(_, s)| (*s as f64).exp()).sum();
        let recommendations: Vec<CareerRecommendation> = scored
            .into_iter()
            .take(self.top_k)
            .map(|(entry, score)| {
                let share = (score as f64).exp() / total;
                CareerRecommendation::new(
                    entry.title_code,
                    entry.title_label,
                    entry.cluster_code,
                    entry.cluster_label,
                    (share * 10_000.0).round() / 10_000.0,
                )
            })
            .collect();

        log::info!(
            "[PREDICT] Catalog scoring over {} tokens -> {} matches",
            tokens.len(),
            recommendations.len()
        );
        Ok(recommendations)
    }
}
