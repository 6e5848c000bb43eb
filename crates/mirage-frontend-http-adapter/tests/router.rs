//! Router tests driven through `tower::ServiceExt::oneshot`

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use inference::{InferenceGateway, ScriptedBackend, ScriptedReply};
use mirage_frontend_http_adapter::{router, AppState};
use mirage_workflow_service::{DesignRequester, NullEventSink, PromptSynthesizer, WorkflowController};
use serde_json::{json, Value};
use tower::ServiceExt;

const MAX_SIZE: usize = 1024 * 1024;

const DESIGN: &str = r##"{
    "name": "Orbit",
    "layoutType": "Dashboard",
    "colors": [{"hex": "#000000", "name": "Base"}],
    "fonts": [{"name": "Geist", "weight": "400"}],
    "sections": [
        {"id": "a", "title": "Sidebar", "type": "header", "description": "Nav", "visualDetail": "Fixed left"},
        {"id": "b", "title": "Stats", "type": "content", "description": "KPIs", "visualDetail": "Four tiles"}
    ]
}"##;

fn app(backend: &ScriptedBackend) -> Router {
    let gateway = Arc::new(InferenceGateway::with_backend(
        Box::new(backend.clone()),
        "scripted",
    ));
    let controller = WorkflowController::new(
        DesignRequester::new(Arc::clone(&gateway)),
        PromptSynthesizer::new(Arc::clone(&gateway)),
        Arc::new(NullEventSink),
    );
    router(AppState::new(Arc::new(controller), gateway))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), MAX_SIZE).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn index_serves_the_page() {
    let app = app(&ScriptedBackend::new());
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), MAX_SIZE).await.unwrap();
    let page = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(page.contains("navigator.clipboard.writeText"));
}

#[tokio::test]
async fn initial_state() {
    let app = app(&ScriptedBackend::new());
    let (status, body) = send(&app, "GET", "/api/state", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "input");
    assert_eq!(body["design"], Value::Null);
    assert_eq!(body["canGenerate"], false);
}

#[tokio::test]
async fn full_round_trip() {
    let backend = ScriptedBackend::new();
    backend.push(ScriptedReply::Text(DESIGN.to_string()));
    backend.push(ScriptedReply::Text("# Orbit\n\n<b>raw</b>".to_string()));
    let app = app(&backend);

    let (status, body) = send(&app, "POST", "/api/analyze", Some(json!({ "url": "orbit.io" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "preview");
    assert_eq!(body["design"]["url"], "orbit.io");
    assert_eq!(body["design"]["origin"]["kind"], "model");
    assert_eq!(body["selectedIds"], json!(["a", "b"]));

    let (_, body) = send(&app, "POST", "/api/sections/a/toggle", None).await;
    assert_eq!(body["selectedIds"], json!(["b"]));

    let (status, body) = send(&app, "POST", "/api/generate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isResultOpen"], true);
    assert_eq!(body["generatedText"], "# Orbit\n\n<b>raw</b>");
    let html = body["generatedHtml"].as_str().unwrap();
    assert!(html.contains("<h1>Orbit</h1>"));
    assert!(!html.contains("<b>"));

    let (_, body) = send(&app, "POST", "/api/result/close", None).await;
    assert_eq!(body["isResultOpen"], false);

    let (_, body) = send(&app, "POST", "/api/reset", None).await;
    assert_eq!(body["step"], "input");
    assert_eq!(body["selectedIds"], json!([]));
    assert_eq!(body["generatedText"], "");
}

#[tokio::test]
async fn blank_url_is_bad_request() {
    let app = app(&ScriptedBackend::new());
    let (status, body) = send(&app, "POST", "/api/analyze", Some(json!({ "url": "   " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("url"));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = app(&ScriptedBackend::new());
    let (status, body) = send(&app, "POST", "/api/analyze", Some(json!({ "link": "x" }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn analyze_outside_input_is_conflict() {
    let backend = ScriptedBackend::new();
    backend.push(ScriptedReply::Text(DESIGN.to_string()));
    let app = app(&backend);

    send(&app, "POST", "/api/analyze", Some(json!({ "url": "orbit.io" }))).await;
    let (status, body) = send(&app, "POST", "/api/analyze", Some(json!({ "url": "orbit.io" }))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("preview"));
}

#[tokio::test]
async fn failed_generation_raises_alert_until_dismissed() {
    let backend = ScriptedBackend::new();
    backend.push(ScriptedReply::Text(DESIGN.to_string()));
    backend.push(ScriptedReply::Fail("quota exceeded".to_string()));
    let app = app(&backend);

    send(&app, "POST", "/api/analyze", Some(json!({ "url": "orbit.io" }))).await;
    let (_, body) = send(&app, "POST", "/api/generate", None).await;
    assert_eq!(body["alert"], "Failed to generate prompt.");
    assert_eq!(
        body["generatedText"],
        "Error generating prompt. Please check your API key."
    );

    let (_, body) = send(&app, "POST", "/api/alert/dismiss", None).await;
    assert_eq!(body["alert"], Value::Null);
}

#[tokio::test]
async fn backend_status() {
    let app = app(&ScriptedBackend::new());
    let (status, body) = send(&app, "GET", "/api/backend", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "scripted");
    assert_eq!(body["ready"], true);
    assert_eq!(body["capabilities"]["structured_output"], true);
}
