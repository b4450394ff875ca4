use crate::auth::{
    config::{DEFAULT_LOGIN_PATH, DEFAULT_LOGOUT_PATH},
    verifier::DEFAULT_VERIFIER_TIMEOUT_SECONDS,
};
use crate::cli::actions::Action;
use anyhow::Result;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        audience: matches
            .get_one("audience")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing required argument: --audience"))?,
        login_path: matches
            .get_one("login-path")
            .map_or_else(|| DEFAULT_LOGIN_PATH.to_string(), |s: &String| s.to_string()),
        logout_path: matches
            .get_one("logout-path")
            .map_or_else(|| DEFAULT_LOGOUT_PATH.to_string(), |s: &String| s.to_string()),
        verifier_url: matches
            .get_one("verifier-url")
            .map(|s: &String| s.to_string())
            .ok_or_else(|| anyhow::anyhow!("missing verifier URL"))?,
        verifier_timeout: matches
            .get_one::<u64>("verifier-timeout")
            .copied()
            .unwrap_or(DEFAULT_VERIFIER_TIMEOUT_SECONDS),
    })
}
