//! The authentication interception state machine.
//!
//! Runs as a pre-handler layer: every inbound request is classified before the
//! router's normal handler executes, and the handler is substituted for login,
//! logout, and challenge outcomes. Session state is only mutated by the login
//! and logout transitions.

use axum::{
    extract::{Request, State},
    http::header::{HOST, SET_COOKIE},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Form, RequestExt,
};
use secrecy::SecretString;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{
    challenge::{challenge_page, watcher_script},
    config::{Audience, GateConfig},
    error::GateError,
    session::{extract_session_id, mint_session_id, session_cookie, SessionStore},
    valid_email,
    verifier::AssertionVerifier,
};

/// Watcher script attached to request extensions on pass-through so
/// downstream handlers can embed it in their own pages.
#[derive(Clone)]
pub struct ChallengeScript(pub String);

/// Verified username attached to request extensions on pass-through.
#[derive(Clone)]
pub struct CurrentUser(pub String);

/// Classification of one inbound request, derived from the request path and
/// the presence of a session username. Never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestClass {
    LoginSubmission,
    LogoutSubmission,
    ChallengeNeeded,
    PassThrough,
}

/// Path equality checks are exact string matches against the configured
/// values; unknown paths always fall through to the session presence check.
#[must_use]
pub fn classify(path: &str, config: &GateConfig, username: Option<&str>) -> RequestClass {
    if path == config.login_path() {
        RequestClass::LoginSubmission
    } else if path == config.logout_path() {
        RequestClass::LogoutSubmission
    } else if username.is_none() {
        RequestClass::ChallengeNeeded
    } else {
        RequestClass::PassThrough
    }
}

/// Shared state for the interception layer: configuration plus the injected
/// session store and assertion verifier.
pub struct Gate {
    config: GateConfig,
    store: Arc<dyn SessionStore>,
    verifier: Arc<dyn AssertionVerifier>,
}

impl Gate {
    #[must_use]
    pub fn new(
        config: GateConfig,
        store: Arc<dyn SessionStore>,
        verifier: Arc<dyn AssertionVerifier>,
    ) -> Self {
        Self {
            config,
            store,
            verifier,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GateConfig {
        &self.config
    }
}

#[derive(Deserialize)]
struct LoginForm {
    #[serde(default)]
    assertion: Option<String>,
}

/// Pre-handler entry point, registered with
/// `axum::middleware::from_fn_with_state`.
pub async fn intercept(
    State(gate): State<Arc<Gate>>,
    request: Request,
    next: Next,
) -> Response {
    match run(&gate, request, next).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn run(gate: &Gate, mut request: Request, next: Next) -> Result<Response, GateError> {
    let audience = resolve_audience(gate.config.audience(), &request)?;

    // Bind the browser to a server-side record before any decision is made;
    // the cookie is only set on the way out when freshly minted.
    let (session_id, minted) = match extract_session_id(request.headers()) {
        Some(id) => (id, false),
        None => (mint_session_id(), true),
    };

    let username = gate.store.username(&session_id).await?;
    let class = classify(request.uri().path(), &gate.config, username.as_deref());
    debug!(?class, path = request.uri().path(), "Request classified");

    let mut response = match class {
        RequestClass::LoginSubmission => login(gate, &session_id, &audience, request).await?,
        RequestClass::LogoutSubmission => logout(gate, &session_id).await?,
        RequestClass::ChallengeNeeded | RequestClass::PassThrough => {
            let script = watcher_script(
                username.as_deref(),
                gate.config.login_path(),
                gate.config.logout_path(),
            );
            request.extensions_mut().insert(ChallengeScript(script.clone()));

            match username {
                None => Html(challenge_page(&script)).into_response(),
                Some(name) => {
                    request.extensions_mut().insert(CurrentUser(name));
                    next.run(request).await
                }
            }
        }
    };

    if minted {
        if let Ok(cookie) = session_cookie(&session_id) {
            response.headers_mut().append(SET_COOKIE, cookie);
        }
    }

    Ok(response)
}

/// The only place performing network I/O: the request is not handled until
/// verification completes or fails.
async fn login(
    gate: &Gate,
    session_id: &str,
    audience: &str,
    request: Request,
) -> Result<Response, GateError> {
    let Form(form) = request
        .extract::<Form<LoginForm>, _>()
        .await
        .map_err(|_| GateError::MissingAssertion)?;

    let assertion = form
        .assertion
        .filter(|a| !a.is_empty())
        .map(SecretString::from)
        .ok_or(GateError::MissingAssertion)?;

    let email = gate.verifier.verify(&assertion, audience).await?;

    // Stored exactly as returned; the sanity check is log-only.
    if !valid_email(&email) {
        warn!("Verified email has an unexpected shape");
    }

    gate.store
        .set_username(session_id, Some(email))
        .await?;

    info!("Session authenticated");

    Ok("You are signed in".into_response())
}

/// Idempotent: clearing an already-cleared session is not an error.
async fn logout(gate: &Gate, session_id: &str) -> Result<Response, GateError> {
    gate.store.set_username(session_id, None).await?;

    info!("Session cleared");

    Ok("Signed out".into_response())
}

fn resolve_audience(audience: &Audience, request: &Request) -> Result<String, GateError> {
    match audience {
        Audience::Fixed(value) => Ok(value.clone()),
        // Safe only when the Host header is set by a trusted reverse proxy,
        // never directly by clients.
        Audience::TrustedHostHeader => request
            .headers()
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or(GateError::MissingHostHeader),
    }
}
