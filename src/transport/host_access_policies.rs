use super::models::{HostAccessPolicy, HostAccessPolicyPost, Operation};
use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn create_host_access_policy(
        &self,
        body: &HostAccessPolicyPost,
    ) -> Result<Operation, ClientError> {
        self.post_op("host-access-policies", body).await
    }

    pub async fn get_host_access_policy_by_id(
        &self,
        id: &str,
    ) -> Result<HostAccessPolicy, ClientError> {
        self.get_json(&format!("host-access-policies/{id}")).await
    }

    pub async fn delete_host_access_policy(&self, policy: &str) -> Result<Operation, ClientError> {
        self.delete_op(&format!("host-access-policies/{policy}"))
            .await
    }
}
