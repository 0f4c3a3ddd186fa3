use thiserror::Error;

use crate::auth::AuthError;
use crate::config::ConfigError;

/// Everything the client can fail with, split along the line that matters to
/// callers: transport-class failures are safe to retry wholesale, everything
/// else reflects a decision the control plane or a local policy already made.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response whose body did not decode as a control-plane error
    /// document. The raw body is surfaced unchanged.
    #[error("unexpected response from control plane (status {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    /// Decoded control-plane error document.
    #[error("{message}")]
    Api {
        message: String,
        code: Option<i64>,
        http_status: u16,
    },

    #[error("resource not found: {0}")]
    NotFound(String),

    /// The operation reached terminal status `Failed`.
    #[error("operation {id} failed: {message}")]
    OperationFailed { id: String, message: String },

    /// A patch sequence aborted partway through. Patches before `index` are
    /// applied and stay applied; the operator has to reconcile.
    #[error("operation failed message:{message} id:{operation_id} (patch {index})")]
    PatchFailed {
        index: usize,
        operation_id: String,
        message: String,
    },

    #[error("attempting to update an immutable field: {0}")]
    ImmutableField(&'static str),

    #[error("unsupported operation: {action} {kind}")]
    Unsupported {
        action: &'static str,
        kind: &'static str,
    },

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("wait_on_operation called with a null operation")]
    NullOperation,

    #[error("invalid host url {host}: {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// True for failures where the whole lifecycle call can be retried
    /// without first inspecting server state.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ClientError::Transport(_) | ClientError::UnexpectedResponse { .. }
        )
    }
}
