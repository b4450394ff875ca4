//! Gate configuration: audience resolution and intercepted paths.

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_LOGOUT_PATH: &str = "/logout";

/// Sentinel accepted by `--audience` meaning "derive from the Host header".
pub const HOST_SENTINEL: &str = "HOST";

/// Audience passed to the verification service.
///
/// `TrustedHostHeader` resolves the audience from the request's `Host` header
/// and MUST ONLY BE USED when that header is set by a trusted party such as a
/// reverse proxy, never directly by clients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Audience {
    Fixed(String),
    TrustedHostHeader,
}

impl Audience {
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == HOST_SENTINEL {
            Self::TrustedHostHeader
        } else {
            Self::Fixed(value.to_string())
        }
    }
}

#[derive(Clone, Debug)]
pub struct GateConfig {
    audience: Audience,
    login_path: String,
    logout_path: String,
}

impl GateConfig {
    #[must_use]
    pub fn new(audience: Audience) -> Self {
        Self {
            audience,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            logout_path: DEFAULT_LOGOUT_PATH.to_string(),
        }
    }

    #[must_use]
    pub fn with_login_path(mut self, path: String) -> Self {
        self.login_path = path;
        self
    }

    #[must_use]
    pub fn with_logout_path(mut self, path: String) -> Self {
        self.logout_path = path;
        self
    }

    #[must_use]
    pub fn audience(&self) -> &Audience {
        &self.audience
    }

    #[must_use]
    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    #[must_use]
    pub fn logout_path(&self) -> &str {
        &self.logout_path
    }
}

#[cfg(test)]
mod tests {
    use super::{Audience, GateConfig, DEFAULT_LOGIN_PATH, DEFAULT_LOGOUT_PATH};

    #[test]
    fn audience_parse_sentinel() {
        assert_eq!(Audience::parse("HOST"), Audience::TrustedHostHeader);
        assert_eq!(
            Audience::parse("example.com:8080"),
            Audience::Fixed("example.com:8080".to_string())
        );
    }

    #[test]
    fn audience_sentinel_is_case_sensitive() {
        assert_eq!(Audience::parse("host"), Audience::Fixed("host".to_string()));
    }

    #[test]
    fn gate_config_defaults_and_overrides() {
        let config = GateConfig::new(Audience::Fixed("localhost:8080".to_string()));
        assert_eq!(config.login_path(), DEFAULT_LOGIN_PATH);
        assert_eq!(config.logout_path(), DEFAULT_LOGOUT_PATH);

        let config = config
            .with_login_path("/signin".to_string())
            .with_logout_path("/signout".to_string());
        assert_eq!(config.login_path(), "/signin");
        assert_eq!(config.logout_path(), "/signout");
    }
}
