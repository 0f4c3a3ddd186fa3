//! Structured trace events for operations and error chains. Purely a side
//! channel: nothing here influences control flow or return values.

use crate::transport::models::Operation;

/// Emit one trace event per link of an error chain.
pub fn trace_error(err: &(dyn std::error::Error + 'static)) {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(err) = current {
        tracing::trace!(
            error_message = %err,
            error_dump = ?err,
            "trace_error"
        );
        current = err.source();
    }
}

/// Dump an operation snapshot at trace level.
pub fn trace_operation(op: &Operation, user_message: &str) {
    tracing::trace!(
        user_message,
        op_id = %op.id,
        op_request_type = %op.request_type,
        op_status = ?op.status,
        op_retry_in = op.retry_in,
        op_error_dump = ?op.error,
        "trace_operation"
    );
}
