//! Gate error taxonomy.
//!
//! Every variant is handled at the interception boundary; none propagate into
//! application handlers. Verifier unavailability is kept distinct from an
//! assertion rejection so operators can tell the two apart in logs and status
//! codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("missing assertion")]
    MissingAssertion,
    #[error("invalid assertion")]
    InvalidAssertion,
    #[error("verification service unavailable: {0}")]
    VerifierUnavailable(String),
    #[error("audience is derived from the Host header but the request has none")]
    MissingHostHeader,
    #[error("session store failure: {0}")]
    Session(String),
}

impl GateError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingAssertion | Self::InvalidAssertion | Self::MissingHostHeader => {
                StatusCode::BAD_REQUEST
            }
            Self::VerifierUnavailable(_) => StatusCode::BAD_GATEWAY,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            // Do not echo upstream error details to clients.
            Self::VerifierUnavailable(_) => "verification service unavailable".to_string(),
            Self::Session(_) => "session store failure".to_string(),
            other => other.to_string(),
        };
        (status, body).into_response()
    }
}
