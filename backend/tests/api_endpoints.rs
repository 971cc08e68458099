use actix_web::{test, web, App};
use kanasu_api::{configure, json_config, AppState};
use kanasu_core::provider::Providers;
use serde_json::{json, Value};
use std::sync::Arc;

fn state() -> web::Data<Arc<AppState>> {
    web::Data::new(Arc::new(AppState::new(Providers::instant())))
}

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(state())
                .app_data(json_config())
                .configure(configure),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_root_and_health() {
    let app = app!();

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "msg": "Kanasu API running" }));

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({ "status": "ok" }));
}

#[actix_rt::test]
async fn test_predict_returns_top_three() {
    let app = app!();

    for uri in ["/predict", "/api/predict"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .set_json(json!({ "interests": ["coding"], "skills": ["python"] }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let top = body["top_3"].as_array().unwrap();
        assert_eq!(top.len(), 3);
        assert_eq!(top[0]["label"], "Software Engineer");
        assert_eq!(top[0]["probability"], 0.92);
        assert_eq!(top[0]["cluster"], "Technology");
        assert_eq!(body["recommendations"][1]["title_code"], "data_scientist");
    }
}

#[actix_rt::test]
async fn test_predict_without_signal_is_400() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/predict")
        .set_json(json!({ "education": "puc", "text": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Provide at least one of: text, interests, skills");
}

#[actix_rt::test]
async fn test_malformed_json_is_400_with_detail() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/chat")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["detail"].is_string());
}

#[actix_rt::test]
async fn test_roadmap_endpoints() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/gemini/roadmap")
        .set_json(json!({ "careers": ["ux_designer"], "locale": "kn" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    // not in the catalog, so the code is title-cased
    assert_eq!(body["career"], "Ux Designer");
    assert_eq!(body["steps"].as_array().unwrap().len(), 3);
    assert_eq!(body["steps"][0]["term"], "short");
    assert_eq!(body["nearby_institutions"][1]["name"], "Tech Academy");

    let req = test::TestRequest::post()
        .uri("/roadmap")
        .set_json(json!({ "careers": [] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_institutions_fallback() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/institutions")
        .set_json(json!({ "location": "Udupi", "careers": ["lawyer"] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["location_resolved"], "Udupi");
    assert_eq!(body["institutes"][0]["name"], "Lawyer / Advocate Center - Udupi");
    assert!(body["lat"].is_null());
}

#[actix_rt::test]
async fn test_chat_session_flow() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(json!({ "message": "hello", "language": "kn" }))
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;
    let session_id = first["session_id"].as_str().unwrap().to_string();
    assert_eq!(first["history_length"], 1);
    assert_eq!(first["language"], "kn");
    assert!(first["reply"].as_str().unwrap().contains("You said: \"hello\""));

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(json!({ "session_id": session_id, "message": "again" }))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(second["session_id"], first["session_id"]);
    assert_eq!(second["history_length"], 2);
    assert_eq!(second["language"], "en");

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(json!({ "message": "   " }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_rt::test]
async fn test_scholarship_search() {
    let app = app!();

    let req = test::TestRequest::get().uri("/api/scholarships").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let req = test::TestRequest::get()
        .uri("/api/scholarships?q=MERIT")
        .to_request();
    let merit: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(merit.as_array().unwrap().len(), 1);
    assert_eq!(merit[0]["amount"], "₹20,000 per year");
}

#[actix_rt::test]
async fn test_voice_command_endpoint() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/voice/command")
        .set_json(json!({ "transcript": "ಮುಖಪುಟ" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["kind"], "navigate");
    assert_eq!(body["route"], "home");
    assert_eq!(body["locale"], "kn");
    assert_eq!(body["confirmation"], "ಮುಖಪುಟ ತೆರೆಯಲಾಗುತ್ತಿದೆ");

    let req = test::TestRequest::post()
        .uri("/api/voice/command")
        .set_json(json!({ "transcript": "xyz" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["kind"], "unrecognized");
    assert_eq!(body["notification"]["severity"], "destructive");
}

#[actix_rt::test]
async fn test_catalog_lists_form_options() {
    let app = app!();

    let req = test::TestRequest::get().uri("/api/catalog").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["education_levels"][0]["code"], "sslc");
    assert_eq!(body["interest_domains"].as_array().unwrap().len(), 10);
    assert_eq!(body["stream_groups"][0]["streams"][0][0], "pcm");
}
