//! Authentication interception and assertion exchange.
//!
//! The gate sits in front of the router as a pre-handler layer. Each request
//! is classified into one of four outcomes: a login submission (exchange the
//! posted assertion for a verified email via the remote verification
//! service), a logout submission (clear the session), a challenge (serve the
//! sign-in page instead of the normal handler), or a pass-through (the normal
//! handler runs untouched, with the watcher script attached for embedding).
//!
//! The session store and the verifier are injected behind traits so the state
//! machine is independently testable without a network or a real backend.

pub mod challenge;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod session;
pub mod verifier;

pub use config::{Audience, GateConfig};
pub use error::GateError;
pub use interceptor::{intercept, ChallengeScript, CurrentUser, Gate, RequestClass};
pub use session::{MemorySessionStore, SessionStore};
pub use verifier::{AssertionVerifier, RemoteVerifier};

use regex::Regex;

/// Lightweight email sanity check applied to verified addresses before they
/// are logged as suspicious. Never used to reject what the verifier accepted.
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}
