use std::time::Duration;

use crate::error::ClientError;
use crate::trace::{trace_error, trace_operation};
use crate::transport::models::{Operation, OperationStatus};
use crate::transport::ApiClient;

/// Wait on an operation until its status reaches Succeeded (or Completed) or
/// Failed.
///
/// Returns `Ok(true)` when the status reaches Succeeded or Completed and
/// `Ok(false)` when it reaches Failed; a Failed operation is a normal
/// application-level outcome, not an `Err`. On `Err` the fetch itself failed
/// and `op` still holds the last successfully fetched snapshot, so the caller
/// can always inspect the last-known status and error.
pub async fn wait_on_operation(
    client: &ApiClient,
    op: &mut Operation,
) -> Result<bool, ClientError> {
    trace_operation(op, "wait_on_operation");
    if op.is_null() {
        tracing::error!("wait_on_operation called with a null operation");
        return Err(ClientError::NullOperation);
    }

    while !op.status.is_some_and(OperationStatus::is_terminal) {
        tracing::debug!(
            op_type = %op.request_type,
            op_id = %op.id,
            op_status = ?op.status,
            op_retry_in = op.retry_in,
            "waiting for operation"
        );
        // A zero retry hint means back-to-back polling; that is the server's
        // call to make.
        tokio::time::sleep(Duration::from_millis(op.retry_in)).await;
        match client.get_operation(&op.id).await {
            Ok(latest) => {
                trace_operation(&latest, "wait_on_operation");
                *op = latest;
            }
            Err(err) => {
                trace_error(&err);
                return Err(err);
            }
        }
    }

    if op.status == Some(OperationStatus::Failed) {
        tracing::error!(
            op_id = %op.id,
            error_message = %op.error_message(),
            "operation failed"
        );
        return Ok(false);
    }

    trace_operation(op, "wait_on_operation succeeded");
    Ok(true)
}
