//! Assertion verification client.
//!
//! One outbound call per login attempt: the assertion and the audience are
//! posted as form fields to the remote verification endpoint, which answers
//! with `{status, email?, reason?}`. A non-2xx response or a transport error
//! is an outage (`VerifierUnavailable`), never an assertion rejection.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

use super::error::GateError;

pub const DEFAULT_VERIFIER_URL: &str = "https://verifier.login.persona.org/verify";
pub const DEFAULT_VERIFIER_TIMEOUT_SECONDS: u64 = 10;

const STATUS_OKAY: &str = "okay";

/// Wire response from the verification service.
#[derive(Debug, Deserialize)]
pub struct VerificationResponse {
    pub status: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Exchange a client-supplied assertion for a verified email address.
///
/// Injectable so tests can substitute a fake without network access.
#[async_trait]
pub trait AssertionVerifier: Send + Sync {
    async fn verify(&self, assertion: &SecretString, audience: &str) -> Result<String, GateError>;
}

pub struct RemoteVerifier {
    url: String,
    client: Client,
}

impl RemoteVerifier {
    /// Build a verifier client with a bounded request timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(url: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { url, client })
    }
}

#[async_trait]
impl AssertionVerifier for RemoteVerifier {
    #[instrument(skip(self, assertion))]
    async fn verify(&self, assertion: &SecretString, audience: &str) -> Result<String, GateError> {
        let params = [
            ("assertion", assertion.expose_secret()),
            ("audience", audience),
        ];

        let response = self
            .client
            .post(&self.url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!("Error contacting verification service: {e}");
                GateError::VerifierUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Verification service returned {status}");
            return Err(GateError::VerifierUnavailable(format!("HTTP {status}")));
        }

        let validation: VerificationResponse = response.json().await.map_err(|e| {
            error!("Error decoding verification response: {e}");
            GateError::VerifierUnavailable(e.to_string())
        })?;

        if validation.status != STATUS_OKAY {
            warn!(
                status = %validation.status,
                reason = validation.reason.as_deref().unwrap_or("none"),
                "Assertion rejected by verification service"
            );
            return Err(GateError::InvalidAssertion);
        }

        // A partially-valid success payload must never become a session
        // identity.
        match validation.email {
            Some(email) if !email.is_empty() => {
                debug!("Assertion verified");
                Ok(email)
            }
            _ => {
                warn!("Verification response is okay but carries no email");
                Err(GateError::InvalidAssertion)
            }
        }
    }
}
