//! HTTP host adapter for the Mirage workflow
//!
//! Serves the single-page UI and a small JSON API over one shared
//! [`WorkflowController`]. Every mutating endpoint answers with the
//! resulting [`WorkflowSnapshot`](mirage_workflow_service::WorkflowSnapshot),
//! so the page re-renders from one payload.

pub mod dto;
pub mod error;
mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use inference::SharedGateway;
use mirage_workflow_service::WorkflowController;

pub use error::AdapterError;

/// Shared state for handlers
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<WorkflowController>,
    pub gateway: SharedGateway,
}

impl AppState {
    pub fn new(controller: Arc<WorkflowController>, gateway: SharedGateway) -> Self {
        Self {
            controller,
            gateway,
        }
    }
}

/// Build the router with all UI and API routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::state))
        .route("/api/backend", get(handlers::backend))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/sections/:id/toggle", post(handlers::toggle_section))
        .route("/api/generate", post(handlers::generate))
        .route("/api/reset", post(handlers::reset))
        .route("/api/result/close", post(handlers::close_result))
        .route("/api/alert/dismiss", post(handlers::dismiss_alert))
        .with_state(state)
}
