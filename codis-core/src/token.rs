use std::fmt::Debug;

use anyhow::{Result, anyhow};

use crate::config::Config;

/// An opaque session credential for the CODiS service.
///
/// In practice this is the browser session cookie the site hands out. The
/// fetch pipeline never looks inside it; it is forwarded verbatim as the
/// `Cookie` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw header value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Supplies a currently valid session token, or fails.
///
/// Acquisition and refresh mechanics belong entirely to the implementation;
/// the fetch pipeline calls this once per attempt and neither caches nor
/// retries. Modeled as an injected capability so the pipeline can be tested
/// with canned tokens or simulated failures.
pub trait SessionTokenProvider: Debug {
    fn valid_token(&self) -> Result<SessionToken>;
}

/// Provider that always hands out one fixed token. Useful for scripting
/// (cookie passed on the command line or via the environment) and for tests.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: SessionToken,
}

impl StaticToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            token: SessionToken::new(value),
        }
    }
}

impl SessionTokenProvider for StaticToken {
    fn valid_token(&self) -> Result<SessionToken> {
        Ok(self.token.clone())
    }
}

/// Provider backed by the on-disk config file.
#[derive(Debug, Clone)]
pub struct ConfigToken {
    config: Config,
}

impl ConfigToken {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Load the config from its default location and wrap it.
    pub fn from_disk() -> Result<Self> {
        Ok(Self::new(Config::load()?))
    }
}

impl SessionTokenProvider for ConfigToken {
    fn valid_token(&self) -> Result<SessionToken> {
        let cookie = self.config.session_cookie().ok_or_else(|| {
            anyhow!(
                "no session cookie configured.\n\
                 Hint: run `codis configure` and paste a fresh cookie from the browser."
            )
        })?;

        Ok(SessionToken::new(cookie))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_provider_returns_its_token() {
        let provider = StaticToken::new("TWO_PAGES=abc123");
        let token = provider.valid_token().unwrap();
        assert_eq!(token.as_str(), "TWO_PAGES=abc123");
    }

    #[test]
    fn config_provider_errors_without_a_cookie() {
        let provider = ConfigToken::new(Config::default());
        let err = provider.valid_token().unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("no session cookie configured"));
        assert!(msg.contains("Hint: run `codis configure`"));
    }

    #[test]
    fn config_provider_returns_the_stored_cookie() {
        let mut cfg = Config::default();
        cfg.set_session_cookie("cwa_session=xyz".to_string());

        let token = ConfigToken::new(cfg).valid_token().unwrap();
        assert_eq!(token.as_str(), "cwa_session=xyz");
    }
}
