use std::path::Path;

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifetime of the self-signed identity token and, by contract with the auth
/// endpoint, of the exchanged access token.
pub const TOKEN_VALIDITY_SECS: i64 = 3600;

const TOKEN_EXCHANGE_GRANT: &str = "urn:ietf:params:oauth:grant-type:token-exchange";
const SUBJECT_TOKEN_TYPE: &str = "urn:ietf:params:oauth:token-type:jwt";

#[derive(Debug, Serialize)]
struct IdentityClaims {
    iss: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to read private key file {path}: {source}")]
    KeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse private key {path}: {source}")]
    KeyParse {
        path: String,
        #[source]
        source: jsonwebtoken::errors::Error,
    },

    #[error("failed to sign identity token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    /// The auth endpoint rejected the exchange.
    #[error("token exchange failed with status {status}: {body}")]
    Exchange { status: u16, body: String },

    #[error("token exchange request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl AuthError {
    /// Only 5xx rejections from the token endpoint are worth another attempt.
    /// Bad credentials, unreadable keys and the like never heal on retry.
    pub fn is_transient(&self) -> bool {
        match self {
            AuthError::Exchange { status, .. } => (500..600).contains(status),
            _ => false,
        }
    }
}

/// Sign an RS256 identity token as `issuer_id` and exchange it at `endpoint`
/// for a bearer access token good for one hour.
pub async fn get_access_token(
    http: &reqwest::Client,
    endpoint: &str,
    issuer_id: &str,
    private_key_file: &Path,
) -> Result<String, AuthError> {
    let pem = tokio::fs::read(private_key_file)
        .await
        .map_err(|source| AuthError::KeyFile {
            path: private_key_file.display().to_string(),
            source,
        })?;
    let key = EncodingKey::from_rsa_pem(&pem).map_err(|source| AuthError::KeyParse {
        path: private_key_file.display().to_string(),
        source,
    })?;

    let now = Utc::now().timestamp();
    let claims = IdentityClaims {
        iss: issuer_id.to_string(),
        iat: now,
        exp: now + TOKEN_VALIDITY_SECS,
    };
    let identity_token =
        encode(&Header::new(Algorithm::RS256), &claims, &key).map_err(AuthError::Sign)?;

    let response = http
        .post(endpoint)
        .form(&[
            ("grant_type", TOKEN_EXCHANGE_GRANT),
            ("subject_token", identity_token.as_str()),
            ("subject_token_type", SUBJECT_TOKEN_TYPE),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::Exchange {
            status: status.as_u16(),
            body,
        });
    }

    let exchanged: TokenResponse = response.json().await?;
    Ok(exchanged.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_5xx_is_transient() {
        let err = AuthError::Exchange {
            status: 503,
            body: "upstream down".into(),
        };
        assert!(err.is_transient());
    }

    #[test]
    fn exchange_4xx_is_fatal() {
        let err = AuthError::Exchange {
            status: 400,
            body: "bad credentials".into(),
        };
        assert!(!err.is_transient());
    }

    #[test]
    fn key_file_error_is_fatal() {
        let err = AuthError::KeyFile {
            path: "/nonexistent".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(!err.is_transient());
    }
}
