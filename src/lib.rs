//! # Atesti (Browser Assertion Authentication Gateway)
//!
//! `atesti` intercepts every request of a host HTTP application and enforces
//! browser-based, assertion-token authentication in front of it.
//!
//! ## Interception
//!
//! Each inbound request is classified before the normal handler runs:
//!
//! - **Login submission:** the configured login path exchanges the posted
//!   assertion for a verified email address via the remote verification
//!   service and stores it in the session.
//! - **Logout submission:** the configured logout path clears the session
//!   username unconditionally.
//! - **Challenge:** any other path without a session username is answered
//!   with the sign-in page; the normal handler never runs.
//! - **Pass-through:** any other path with a session username runs the normal
//!   handler untouched, with the watcher script attached to the request for
//!   embedding.
//!
//! ## Audience
//!
//! The audience sent to the verifier is fixed per deployment, or derived from
//! the `Host` header when configured with the `HOST` sentinel. The sentinel is
//! safe only behind a trusted reverse proxy.

pub mod api;
pub mod auth;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
