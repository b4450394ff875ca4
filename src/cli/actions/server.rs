use crate::api;
use crate::auth::{Audience, Gate, GateConfig, MemorySessionStore, RemoteVerifier};
use crate::cli::actions::Action;
use anyhow::{Context, Result};
use std::{sync::Arc, time::Duration};
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            audience,
            login_path,
            logout_path,
            verifier_url,
            verifier_timeout,
        } => {
            let verifier_url = Url::parse(&verifier_url)
                .with_context(|| format!("Invalid verifier URL: {verifier_url}"))?;

            let config = GateConfig::new(Audience::parse(&audience))
                .with_login_path(login_path)
                .with_logout_path(logout_path);

            let verifier = RemoteVerifier::new(
                verifier_url.to_string(),
                Duration::from_secs(verifier_timeout),
            )?;

            let gate = Arc::new(Gate::new(
                config,
                Arc::new(MemorySessionStore::new()),
                Arc::new(verifier),
            ));

            api::new(port, gate).await?;
        }
    }

    Ok(())
}
