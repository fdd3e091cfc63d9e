use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Everything that can go wrong between the browser's submit and the model's answer.
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("Add a photo or describe your hair to get recommendations")]
    EmptyRequest,
    #[error("Description is longer than {max} characters")]
    DescriptionTooLong { max: usize },
    #[error("Photo is larger than {max} bytes")]
    ImageTooLarge { max: usize },
    #[error("Photo could not be used: {0}")]
    InvalidImage(String),
    #[error("Too many requests, try again later")]
    RateLimited,
    #[error("AI service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("AI service returned status {0}")]
    UpstreamStatus(u16),
    #[error("AI service returned no recommendations")]
    EmptyResponse,
    #[error("AI service response did not match the schema: {0}")]
    MalformedResponse(String),
    #[error("Style advisor is misconfigured: {0}")]
    Misconfigured(String),
}

/// What the browser sees when the upstream call fails. The cause only goes to the log.
pub const UPSTREAM_FAILURE_MESSAGE: &str = "The style advisor is unavailable right now";
pub const INTERNAL_FAILURE_MESSAGE: &str = "Internal server error";

impl AdvisorError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdvisorError::EmptyRequest
            | AdvisorError::DescriptionTooLong { .. }
            | AdvisorError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            AdvisorError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            AdvisorError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AdvisorError::Transport(_)
            | AdvisorError::UpstreamStatus(_)
            | AdvisorError::EmptyResponse
            | AdvisorError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
            AdvisorError::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_upstream(&self) -> bool {
        self.status_code() == StatusCode::BAD_GATEWAY
    }
}

impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        let message = if self.is_upstream() {
            tracing::error!("Style advisor upstream failure: {}", self);
            UPSTREAM_FAILURE_MESSAGE.to_string()
        } else if self.status_code().is_server_error() {
            tracing::error!("Style advisor failure: {}", self);
            INTERNAL_FAILURE_MESSAGE.to_string()
        } else {
            tracing::debug!("Rejected style advisor request: {}", self);
            self.to_string()
        };

        (self.status_code(), Json(json!({ "error": message }))).into_response()
    }
}
