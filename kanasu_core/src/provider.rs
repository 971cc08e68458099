//! Fixed-latency wrapper and the provider bundle shared by the service and
//! the client.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::chat::{ChatResponder, MockChatResponder};
use crate::config::{RecommenderKind, Settings};
use crate::error::Result;
use crate::locale::Locale;
use crate::recommender::{CatalogRecommender, MockRecommender, Recommender};
use crate::roadmap::{MockRoadmapGenerator, Roadmap, RoadmapGenerator, RoadmapRequest};
use crate::types::{CareerRecommendation, ChatMessage, PredictRequest};

/// Sleeps for a fixed delay before delegating, standing in for network
/// latency. Calls block; there is no cancellation.
#[derive(Debug, Clone)]
pub struct Delayed<P> {
    inner: P,
    delay: Duration,
}

impl<P> Delayed<P> {
    pub fn new(inner: P, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn wait(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

impl<P: Recommender> Recommender for Delayed<P> {
    fn predict(&self, request: &PredictRequest) -> Result<Vec<CareerRecommendation>> {
        self.wait();
        self.inner.predict(request)
    }
}

impl<P: RoadmapGenerator> RoadmapGenerator for Delayed<P> {
    fn generate(&self, request: &RoadmapRequest) -> Result<Roadmap> {
        self.wait();
        self.inner.generate(request)
    }
}

impl<P: ChatResponder> ChatResponder for Delayed<P> {
    fn reply(&self, message: &str, history: &[ChatMessage], locale: Locale) -> Result<String> {
        self.wait();
        self.inner.reply(message, history, locale)
    }
}

/// The three provider seams, ready to share across threads.
#[derive(Clone)]
pub struct Providers {
    pub recommender: Arc<dyn Recommender>,
    pub roadmap: Arc<dyn RoadmapGenerator>,
    pub chat: Arc<dyn ChatResponder>,
}

impl Providers {
    /// In-process providers with the delays from `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        let recommender: Arc<dyn Recommender> = match settings.recommender {
            RecommenderKind::Mock => Arc::new(Delayed::new(MockRecommender, settings.predict_delay)),
            RecommenderKind::Catalog => Arc::new(Delayed::new(
                CatalogRecommender::default(),
                settings.predict_delay,
            )),
        };

        Self {
            recommender,
            roadmap: Arc::new(Delayed::new(MockRoadmapGenerator, settings.roadmap_delay)),
            chat: Arc::new(Delayed::new(MockChatResponder, settings.chat_delay)),
        }
    }

    /// Mock providers with no latency.
    pub fn instant() -> Self {
        Self {
            recommender: Arc::new(MockRecommender),
            roadmap: Arc::new(MockRoadmapGenerator),
            chat: Arc::new(MockChatResponder),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn delayed_waits_before_answering() {
        let slow = Delayed::new(MockChatResponder, Duration::from_millis(30));
        let started = Instant::now();
        let reply = slow.reply("hi", &[], Locale::En).unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
        assert!(reply.contains("You said: \"hi\""));
    }

    #[test]
    fn settings_pick_the_recommender() {
        let mut settings = Settings::default();
        settings.predict_delay = Duration::ZERO;
        settings.recommender = RecommenderKind::Catalog;

        let providers = Providers::from_settings(&settings);
        let request = PredictRequest {
            interests: vec!["farming".to_string()],
            ..Default::default()
        };
        let recs = providers.recommender.predict(&request).unwrap();
        assert_ne!(recs[0].title_code, "software_engineer");
    }
}
