//! Error types for the promotion hub

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};

use crate::entity::Violations;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Promotion is not ready to submit: {0}")]
  Validation(Violations),

  #[error("Failed to submit promotion details: {0}")]
  Transmission(#[from] Transmission),

  #[error("Session not found")]
  SessionNotFound,

  #[error("Internal error: {0}")]
  Internal(String),
}

/// Reasons a webhook call did not end in `200 OK`.
#[derive(Debug, thiserror::Error)]
pub enum Transmission {
  #[error("Status code: {0}")]
  Rejected(u16),

  #[error("Transport error: {0}")]
  Transport(#[from] reqwest::Error),
}

impl Transmission {
  /// Status code reported back to the operator, if the webhook answered.
  pub fn status(&self) -> Option<u16> {
    match self {
      Transmission::Rejected(status) => Some(*status),
      Transmission::Transport(err) => err.status().map(|s| s.as_u16()),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let message = self.to_string();

    let (status, body) = match &self {
      Error::Validation(violations) => (
        StatusCode::UNPROCESSABLE_ENTITY,
        json::json!({
          "success": false,
          "error": "Please fill out all required fields before submitting the form.",
          "violations": violations,
        }),
      ),
      Error::Transmission(err) => (
        StatusCode::BAD_GATEWAY,
        json::json!({
          "success": false,
          "error": message,
          "status": err.status(),
        }),
      ),
      Error::SessionNotFound => (
        StatusCode::NOT_FOUND,
        json::json!({ "success": false, "error": message }),
      ),
      Error::Internal(_) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        json::json!({ "success": false, "error": "Internal error" }),
      ),
    };

    (status, Json(body)).into_response()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
