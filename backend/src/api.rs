//! Web API Module
//!
//! JSON endpoints for the Kanasu client. Provider calls block (they carry a
//! fixed latency), so handlers run them on the blocking pool.

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use kanasu_core::catalog::{
    EducationLevel, InterestDomain, StreamGroup, EDUCATION_LEVELS, GENDERS, INTEREST_DOMAINS,
    STREAM_GROUPS,
};
use kanasu_core::chat::{ChatRequest, ChatResponse, ChatSessionRegistry};
use kanasu_core::config::Settings;
use kanasu_core::institutions::{search_institutes, InstitutionsRequest, InstitutionsResponse};
use kanasu_core::provider::Providers;
use kanasu_core::roadmap::{Roadmap, RoadmapRequest};
use kanasu_core::scholarships::{self, Scholarship};
use kanasu_core::types::{PredictRequest, PredictResponse};
use kanasu_core::voice::{VoiceCommandInterpreter, VoiceOutcome};

use crate::error::ApiError;

// ============================================================
// APPLICATION STATE
// ============================================================

/// Shared application state
pub struct AppState {
    pub providers: Providers,
    pub chat_sessions: ChatSessionRegistry,
    pub interpreter: VoiceCommandInterpreter,
}

impl AppState {
    pub fn new(providers: Providers) -> Self {
        Self {
            providers,
            chat_sessions: ChatSessionRegistry::new(),
            interpreter: VoiceCommandInterpreter::default(),
        }
    }
}

// ============================================================
// REQUEST/RESPONSE TYPES
// ============================================================

#[derive(Debug, Deserialize)]
pub struct ScholarshipQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VoiceCommandRequest {
    pub transcript: String,
}

#[derive(Serialize)]
pub struct CatalogResponse {
    pub education_levels: &'static [EducationLevel],
    pub genders: &'static [&'static str],
    pub stream_groups: &'static [StreamGroup],
    pub interest_domains: &'static [InterestDomain],
}

// ============================================================
// API HANDLERS
// ============================================================

async fn root() -> impl Responder {
    HttpResponse::Ok().json(json!({ "msg": "Kanasu API running" }))
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

async fn predict(
    data: web::Data<Arc<AppState>>,
    req: web::Json<PredictRequest>,
) -> Result<web::Json<PredictResponse>, ApiError> {
    let request = req.into_inner();
    if !request.has_signal() {
        return Err(ApiError::BadRequest(
            "Provide at least one of: text, interests, skills".to_string(),
        ));
    }

    log::info!("[PREDICT] '{}'", request.model_text());
    let recommender = data.providers.recommender.clone();
    let recommendations =
        tokio::task::spawn_blocking(move || recommender.predict(&request)).await??;

    Ok(web::Json(PredictResponse::from_recommendations(recommendations)))
}

async fn roadmap(
    data: web::Data<Arc<AppState>>,
    req: web::Json<RoadmapRequest>,
) -> Result<web::Json<Roadmap>, ApiError> {
    let request = req.into_inner();
    let generator = data.providers.roadmap.clone();
    let roadmap = tokio::task::spawn_blocking(move || generator.generate(&request)).await??;
    Ok(web::Json(roadmap))
}

async fn institutions(
    req: web::Json<InstitutionsRequest>,
) -> Result<web::Json<InstitutionsResponse>, ApiError> {
    if req.location.trim().is_empty() {
        return Err(ApiError::BadRequest("location is required".to_string()));
    }
    Ok(web::Json(search_institutes(&req.location, &req.careers)))
}

async fn chat(
    data: web::Data<Arc<AppState>>,
    req: web::Json<ChatRequest>,
) -> Result<web::Json<ChatResponse>, ApiError> {
    let request = req.into_inner();
    if request.message.trim().is_empty() {
        return Err(ApiError::BadRequest("message must not be empty".to_string()));
    }

    let state = data.get_ref().clone();
    let response = tokio::task::spawn_blocking(move || {
        state
            .chat_sessions
            .chat(&request, state.providers.chat.as_ref())
    })
    .await??;

    Ok(web::Json(response))
}

async fn list_scholarships(query: web::Query<ScholarshipQuery>) -> web::Json<Vec<Scholarship>> {
    let q = query.q.as_deref().unwrap_or("");
    web::Json(scholarships::search(q).into_iter().copied().collect())
}

async fn catalog() -> web::Json<CatalogResponse> {
    web::Json(CatalogResponse {
        education_levels: EDUCATION_LEVELS,
        genders: GENDERS,
        stream_groups: STREAM_GROUPS,
        interest_domains: INTEREST_DOMAINS,
    })
}

async fn voice_command(
    data: web::Data<Arc<AppState>>,
    req: web::Json<VoiceCommandRequest>,
) -> web::Json<VoiceOutcome> {
    web::Json(data.interpreter.interpret(&req.transcript))
}

// ============================================================
// SERVER CONFIGURATION
// ============================================================

/// Registers every route; shared by the server and the tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/predict", web::post().to(predict))
        .route("/api/predict", web::post().to(predict))
        .route("/roadmap", web::post().to(roadmap))
        .route("/api/gemini/roadmap", web::post().to(roadmap))
        .route("/institutions", web::post().to(institutions))
        .route("/chat", web::post().to(chat))
        .route("/api/scholarships", web::get().to(list_scholarships))
        .route("/api/catalog", web::get().to(catalog))
        .route("/api/voice/command", web::post().to(voice_command));
}

/// Malformed JSON bodies answer 400 with a `detail` message.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// Configure and run the API server
pub async fn run_server(settings: Settings) -> std::io::Result<()> {
    let state = Arc::new(AppState::new(Providers::from_settings(&settings)));

    log::info!("Kanasu API starting at http://{}", settings.bind_addr());
    println!("📚 API Endpoints:");
    println!("   GET  /health               - Health check");
    println!("   POST /predict              - Career recommendations");
    println!("   POST /api/gemini/roadmap   - Career roadmap");
    println!("   POST /institutions         - Nearby institutes");
    println!("   POST /chat                 - Chat assistant");
    println!("   GET  /api/scholarships?q=  - Scholarships");
    println!("   GET  /api/catalog          - Form catalog");
    println!("   POST /api/voice/command    - Voice command");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config())
            .configure(configure)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
