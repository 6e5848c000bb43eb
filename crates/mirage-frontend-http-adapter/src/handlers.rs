use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use mirage_workflow_service::WorkflowSnapshot;

use crate::dto::{AnalyzeRequest, BackendStatus};
use crate::error::AdapterError;
use crate::AppState;

const INDEX_HTML: &str = include_str!("../assets/index.html");

type ApiResult = Result<Json<WorkflowSnapshot>, AdapterError>;

pub(crate) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub(crate) async fn state(State(app): State<AppState>) -> Json<WorkflowSnapshot> {
    Json(app.controller.snapshot())
}

pub(crate) async fn backend(State(app): State<AppState>) -> Json<BackendStatus> {
    Json(BackendStatus {
        name: app.gateway.current_backend_name().await,
        ready: app.gateway.is_ready().await,
        capabilities: app.gateway.capabilities().await,
        available: app.gateway.available_backends(),
    })
}

pub(crate) async fn analyze(
    State(app): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult {
    let Json(request) = body.map_err(|e| AdapterError::BadRequest(e.body_text()))?;
    log::info!("Analyze requested for '{}'", request.url.trim());
    let snapshot = app.controller.analyze(&request.url).await?;
    Ok(Json(snapshot))
}

pub(crate) async fn toggle_section(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Json<WorkflowSnapshot> {
    Json(app.controller.toggle_selection(&id))
}

pub(crate) async fn generate(State(app): State<AppState>) -> ApiResult {
    let snapshot = app.controller.generate().await?;
    Ok(Json(snapshot))
}

pub(crate) async fn reset(State(app): State<AppState>) -> Json<WorkflowSnapshot> {
    Json(app.controller.reset())
}

pub(crate) async fn close_result(State(app): State<AppState>) -> Json<WorkflowSnapshot> {
    Json(app.controller.close_result())
}

pub(crate) async fn dismiss_alert(State(app): State<AppState>) -> Json<WorkflowSnapshot> {
    Json(app.controller.dismiss_alert())
}
