//! HTTP-backed providers for when `KANASU_API_URL` points at a running
//! `kanasu-api`. Each implements the same trait as its in-process mock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use kanasu_core::chat::{ChatRequest, ChatResponder, ChatResponse};
use kanasu_core::config::Settings;
use kanasu_core::provider::Providers;
use kanasu_core::recommender::Recommender;
use kanasu_core::roadmap::{Roadmap, RoadmapGenerator, RoadmapRequest};
use kanasu_core::types::{CareerRecommendation, ChatMessage, PredictRequest, PredictResponse};
use kanasu_core::{KanasuError, Locale, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Thin JSON client shared by the three providers.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| KanasuError::Provider(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        log::debug!("[API] POST {}", path);
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .map_err(|e| KanasuError::Provider(format!("POST {} failed: {}", path, e)))?;
        Self::decode(path, response)
    }

    fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .map_err(|e| KanasuError::Provider(format!("{}: bad response body: {}", path, e)));
        }

        let detail = response
            .json::<ErrorBody>()
            .map(|body| body.detail)
            .unwrap_or_else(|_| status.to_string());
        if status == StatusCode::BAD_REQUEST {
            Err(KanasuError::InvalidInput(detail))
        } else {
            Err(KanasuError::Provider(format!("{} returned {}: {}", path, status, detail)))
        }
    }
}

// ============================================================
// PROVIDERS
// ============================================================

pub struct HttpRecommender {
    api: ApiClient,
}

impl HttpRecommender {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl Recommender for HttpRecommender {
    fn predict(&self, request: &PredictRequest) -> Result<Vec<CareerRecommendation>> {
        let response: PredictResponse = self.api.post("/predict", request)?;
        Ok(recommendations_from(response))
    }
}

/// Full recommendations when the service sends them, otherwise rebuilt
/// from the `top_3` summary.
pub fn recommendations_from(response: PredictResponse) -> Vec<CareerRecommendation> {
    if !response.recommendations.is_empty() {
        return response.recommendations;
    }
    response
        .top_3
        .iter()
        .map(|item| {
            let cluster = item.cluster.clone().unwrap_or_default();
            CareerRecommendation::new(
                &snake_case(&item.label),
                &item.label,
                &snake_case(&cluster),
                &cluster,
                item.probability,
            )
        })
        .collect()
}

fn snake_case(label: &str) -> String {
    label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

pub struct HttpRoadmapGenerator {
    api: ApiClient,
}

impl HttpRoadmapGenerator {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

impl RoadmapGenerator for HttpRoadmapGenerator {
    fn generate(&self, request: &RoadmapRequest) -> Result<Roadmap> {
        self.api.post("/api/gemini/roadmap", request)
    }
}

/// Chat over `/chat`, keeping the server-issued session id between calls.
pub struct HttpChatResponder {
    api: ApiClient,
    session_id: Mutex<Option<String>>,
}

impl HttpChatResponder {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            session_id: Mutex::new(None),
        }
    }

    pub fn session_id(&self) -> Option<String> {
        self.session_id
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn request_for(&self, message: &str, locale: Locale) -> ChatRequest {
        ChatRequest {
            session_id: self.session_id(),
            message: message.to_string(),
            language: locale,
        }
    }
}

impl ChatResponder for HttpChatResponder {
    fn reply(&self, message: &str, _history: &[ChatMessage], locale: Locale) -> Result<String> {
        // the service keeps its own history per session
        let request = self.request_for(message, locale);
        let response: ChatResponse = self.api.post("/chat", &request)?;

        *self
            .session_id
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(response.session_id);
        Ok(response.reply)
    }
}

/// Remote providers when an API URL is configured, in-process ones otherwise.
pub fn providers_for(settings: &Settings) -> Result<Providers> {
    match settings.api_url.as_deref() {
        Some(url) => {
            log::info!("[API] Using remote providers at {}", url);
            let api = ApiClient::new(url)?;
            Ok(Providers {
                recommender: Arc::new(HttpRecommender::new(api.clone())),
                roadmap: Arc::new(HttpRoadmapGenerator::new(api.clone())),
                chat: Arc::new(HttpChatResponder::new(api)),
            })
        }
        None => Ok(Providers::from_settings(settings)),
    }
}
