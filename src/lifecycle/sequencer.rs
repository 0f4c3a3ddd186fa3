use crate::error::ClientError;
use crate::lifecycle::adapter::WriteRequest;
use crate::lifecycle::poller::wait_on_operation;
use crate::trace::{trace_error, trace_operation};
use crate::transport::ApiClient;

/// Apply `patches` in list order, waiting for each operation to reach a
/// terminal state before starting the next.
///
/// All operations complete serially because certain patches must land in
/// order (clearing an association before reassigning it, for instance).
/// The first failure aborts the sequence: later patches are never submitted,
/// earlier ones stay applied, and the returned error names the failing patch
/// index so an operator can reconcile.
pub async fn execute_patches(
    client: &ApiClient,
    patches: &[WriteRequest],
) -> Result<(), ClientError> {
    for (index, patch) in patches.iter().enumerate() {
        tracing::debug!(patch_idx = index, patch = ?patch, "start operation to apply update");
        let mut op = match patch.submit(client).await {
            Ok(op) => op,
            Err(err) => {
                trace_error(&err);
                return Err(err);
            }
        };
        trace_operation(&op, "execute_patches");

        let succeeded = match wait_on_operation(client, &mut op).await {
            Ok(succeeded) => succeeded,
            Err(err) => {
                trace_error(&err);
                return Err(err);
            }
        };
        if !succeeded {
            return Err(ClientError::PatchFailed {
                index,
                operation_id: op.id.clone(),
                message: op.error_message(),
            });
        }
    }
    Ok(())
}
