//! Typed REST transport for the control plane. Mutating calls return an
//! [`models::Operation`] handle; reads are synchronous.

pub mod models;

mod availability_zones;
mod host_access_policies;
mod operations;
mod placement_groups;
mod snapshots;
mod tenant_spaces;
mod volumes;

use std::time::Duration;

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::auth;
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::retry::{retry, RetryError};
use crate::trace::trace_error;
use models::{ErrorResponse, Operation};

/// Versioned API root, appended to the configured host.
pub const BASE_PATH: &str = "api/1.0";

const USER_AGENT: &str = concat!("strato-client/", env!("CARGO_PKG_VERSION"));

/// Authenticated client for one control plane.
///
/// Cheap to share by reference; holds no per-call state.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

// Hand-written so the bearer token never lands in logs or panic output.
impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ApiClient {
    /// Build a client around an already-issued access token.
    pub fn new(host: &str, token: &str) -> Result<Self, ClientError> {
        let joined = format!("{}/{}", host.trim_end_matches('/'), BASE_PATH);
        let base_url = Url::parse(&joined).map_err(|source| ClientError::InvalidHost {
            host: host.to_string(),
            source,
        })?;
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url,
            token: token.to_string(),
        })
    }

    /// Authenticate and build a ready-to-use client.
    ///
    /// The token exchange is retried with backoff while the auth endpoint
    /// reports 5xx; any other failure aborts the handshake immediately.
    pub async fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        tracing::debug!(host = %config.host, "connecting to control plane");

        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        let endpoint = &config.auth_endpoint;
        let issuer_id = &config.issuer_id;
        let private_key_file = config.private_key_file.as_path();

        let token = retry(
            Duration::from_millis(100),
            0.7,
            13,
            "access_token",
            || {
                let http = http.clone();
                async move {
                    auth::get_access_token(&http, endpoint, issuer_id, private_key_file)
                        .await
                        .map_err(|err| {
                            if err.is_transient() {
                                RetryError::Transient(err)
                            } else {
                                RetryError::Fatal(err)
                            }
                        })
                }
            },
        )
        .await
        .map_err(|err| {
            trace_error(&err);
            tracing::error!(error_message = %err, "error getting access token");
            ClientError::from(err)
        })?;

        tracing::debug!("access token retrieved");
        Self::new(&config.host, &token)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .http
            .get(self.endpoint(path))
            .bearer_auth(&self.token)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn submit<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Operation, ClientError> {
        let request_id = Uuid::new_v4();
        let mut request = self
            .http
            .request(method.clone(), self.endpoint(path))
            .bearer_auth(&self.token)
            .header("X-Request-ID", request_id.to_string());
        if let Some(body) = body {
            request = request.json(body);
        }
        tracing::debug!(method = %method, path, request_id = %request_id, "submitting request");
        let response = request.send().await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_op<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Operation, ClientError> {
        self.submit(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn patch_op<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Operation, ClientError> {
        self.submit(Method::PATCH, path, Some(body)).await
    }

    pub(crate) async fn delete_op(&self, path: &str) -> Result<Operation, ClientError> {
        self.submit::<()>(Method::DELETE, path, None).await
    }

    /// Decode a 2xx body as `T`; decode anything else as a control-plane
    /// error document, falling back to the raw body when that fails.
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await?;
        match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(decoded) => {
                tracing::error!(
                    http_status = status.as_u16(),
                    error_message = %decoded.error.message,
                    "control plane rejected request"
                );
                if status == StatusCode::NOT_FOUND {
                    Err(ClientError::NotFound(decoded.error.message))
                } else {
                    Err(ClientError::Api {
                        message: decoded.error.message,
                        code: decoded.error.code,
                        http_status: status.as_u16(),
                    })
                }
            }
            Err(convert_err) => {
                tracing::warn!(
                    http_status = status.as_u16(),
                    error_message = %convert_err,
                    "error while converting error response"
                );
                if status == StatusCode::NOT_FOUND {
                    Err(ClientError::NotFound(body))
                } else {
                    Err(ClientError::UnexpectedResponse {
                        status: status.as_u16(),
                        body,
                    })
                }
            }
        }
    }
}
