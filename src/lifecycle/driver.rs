use crate::error::ClientError;
use crate::lifecycle::adapter::{ResourceAdapter, ResourceRecord, WriteRequest};
use crate::lifecycle::poller::wait_on_operation;
use crate::lifecycle::sequencer::execute_patches;
use crate::trace::trace_error;
use crate::transport::models::Operation;
use crate::transport::ApiClient;

/// Resource-kind-agnostic controller for the declarative lifecycle.
///
/// Owns one client and one adapter; nothing is shared across concurrent
/// driver invocations, so callers mutating the same remote resource from
/// several tasks must serialize those calls themselves.
pub struct LifecycleDriver<A: ResourceAdapter> {
    client: ApiClient,
    adapter: A,
}

impl<A: ResourceAdapter> LifecycleDriver<A> {
    pub fn new(client: ApiClient, adapter: A) -> Self {
        Self { client, adapter }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Submit the create call, wait on its operation, assign the new
    /// resource's id from the result, then read back the full record.
    pub async fn create(&self, record: &mut A::Record) -> Result<(), ClientError> {
        tracing::debug!(resource_kind = self.adapter.kind(), action = "create", "resource");

        let request = self.adapter.prepare_create(record)?;
        let op = self.submit_and_wait(&request, "create").await?;

        tracing::debug!(operation_result = ?op.result, "created successfully");
        let resource_id = op
            .result
            .as_ref()
            .map(|result| result.resource.id.clone())
            .ok_or(ClientError::MissingField("operation result"))?;
        record.set_id(resource_id);

        self.read(record).await
    }

    /// Synchronous read; a `NotFound` error means the caller should treat the
    /// record as deleted.
    pub async fn read(&self, record: &mut A::Record) -> Result<(), ClientError> {
        tracing::debug!(resource_kind = self.adapter.kind(), action = "read", "resource");
        self.adapter.read_resource(&self.client, record).await
    }

    /// Compute the ordered patch list, apply it serially, then read back.
    /// Immutable-field changes are rejected before any network call.
    pub async fn update(
        &self,
        desired: &mut A::Record,
        prior: &A::Record,
    ) -> Result<(), ClientError> {
        tracing::debug!(resource_kind = self.adapter.kind(), action = "update", "resource");

        let patches = self.adapter.prepare_update(desired, prior)?;
        execute_patches(&self.client, &patches).await?;

        self.read(desired).await
    }

    /// Run the pre-delete cleanup operations in order, each waited to
    /// terminal state, then submit and wait on the final delete.
    pub async fn delete(&self, record: &A::Record) -> Result<(), ClientError> {
        tracing::debug!(resource_kind = self.adapter.kind(), action = "delete", "resource");

        let plan = self.adapter.prepare_delete(&self.client, record).await?;
        for step in &plan.cleanup {
            // A failed cleanup step is fatal; the delete is never attempted.
            self.submit_and_wait(step, "delete cleanup").await?;
        }
        self.submit_and_wait(&plan.delete, "delete").await?;
        Ok(())
    }

    /// Hydrate a record the caller has not tracked before.
    pub async fn import(&self, record: &mut A::Record) -> Result<(), ClientError> {
        tracing::debug!(resource_kind = self.adapter.kind(), action = "import", "resource");
        self.adapter.read_resource(&self.client, record).await
    }

    async fn submit_and_wait(
        &self,
        request: &WriteRequest,
        action: &'static str,
    ) -> Result<Operation, ClientError> {
        let mut op = match request.submit(&self.client).await {
            Ok(op) => op,
            Err(err) => {
                trace_error(&err);
                return Err(err);
            }
        };

        let succeeded = match wait_on_operation(&self.client, &mut op).await {
            Ok(succeeded) => succeeded,
            Err(err) => {
                trace_error(&err);
                return Err(err);
            }
        };
        if !succeeded {
            if let Some(detail) = &op.error {
                tracing::error!(
                    action,
                    error_message = %detail.message,
                    code = ?detail.code,
                    http_code = ?detail.http_code,
                    "rest call failed"
                );
            }
            return Err(ClientError::OperationFailed {
                message: op.error_message(),
                id: op.id,
            });
        }
        Ok(op)
    }
}
