use super::models::Operation;
use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// Fetch the latest snapshot of an operation. Shared by all resource
    /// kinds; the poller is the only intended caller.
    pub async fn get_operation(&self, id: &str) -> Result<Operation, ClientError> {
        self.get_json(&format!("operations/{id}")).await
    }
}
