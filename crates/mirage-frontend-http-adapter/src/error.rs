//! Mapping of workflow errors onto HTTP responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use mirage_workflow_service::WorkflowError;

use crate::dto::ErrorBody;

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// The request body could not be read
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl AdapterError {
    pub fn status(&self) -> StatusCode {
        match self {
            AdapterError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AdapterError::Workflow(WorkflowError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            AdapterError::Workflow(WorkflowError::InvalidTransition(_)) => StatusCode::CONFLICT,
            AdapterError::Workflow(WorkflowError::Join(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AdapterError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        } else {
            log::debug!("Request rejected ({}): {}", status, self);
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AdapterError::from(WorkflowError::invalid_input("empty")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AdapterError::from(WorkflowError::invalid_transition("busy")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AdapterError::BadRequest("eof".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
