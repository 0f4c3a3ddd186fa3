use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const HOST_VAR: &str = "STRATO_HOST";
pub const ISSUER_ID_VAR: &str = "STRATO_ISSUER_ID";
pub const PRIVATE_KEY_FILE_VAR: &str = "STRATO_PRIVATE_KEY_FILE";
pub const AUTH_ENDPOINT_VAR: &str = "STRATO_AUTH_ENDPOINT";

pub const DEFAULT_AUTH_ENDPOINT: &str = "https://auth.strato.dev/oauth2/1.0/token";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no {name} specified; provide it in the client configuration \
         or with the {var} environment variable"
    )]
    Missing { name: &'static str, var: &'static str },
}

/// Connection parameters for one control plane.
///
/// Owned by the client instance it configures; there is no process-wide
/// configuration registry.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the control plane, e.g. `https://strato.example.com`.
    pub host: String,
    /// Issuer id the identity token is signed as.
    pub issuer_id: String,
    /// Path to the RSA private key (PEM) used to sign the identity token.
    pub private_key_file: PathBuf,
    /// OAuth2 token-exchange endpoint.
    pub auth_endpoint: String,
}

impl ClientConfig {
    pub fn new(
        host: impl Into<String>,
        issuer_id: impl Into<String>,
        private_key_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            host: host.into(),
            issuer_id: issuer_id.into(),
            private_key_file: private_key_file.into(),
            auth_endpoint: env::var(AUTH_ENDPOINT_VAR)
                .unwrap_or_else(|_| DEFAULT_AUTH_ENDPOINT.to_string()),
        }
    }

    /// Read the full configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self::new(
            env::var(HOST_VAR).unwrap_or_default(),
            env::var(ISSUER_ID_VAR).unwrap_or_default(),
            env::var(PRIVATE_KEY_FILE_VAR).unwrap_or_default(),
        );
        config.validate()?;
        Ok(config)
    }

    pub fn with_auth_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.auth_endpoint = endpoint.into();
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Missing {
                name: "control plane host",
                var: HOST_VAR,
            });
        }
        if self.issuer_id.is_empty() {
            return Err(ConfigError::Missing {
                name: "issuer ID",
                var: ISSUER_ID_VAR,
            });
        }
        if self.private_key_file.as_os_str().is_empty() {
            return Err(ConfigError::Missing {
                name: "private key file",
                var: PRIVATE_KEY_FILE_VAR,
            });
        }
        Ok(())
    }
}
