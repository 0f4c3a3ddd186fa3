use async_trait::async_trait;

use crate::error::ClientError;
use crate::lifecycle::{DeletePlan, ResourceAdapter, ResourceRecord, WriteRequest};
use crate::transport::models::HostAccessPolicyPost;
use crate::transport::ApiClient;

#[derive(Debug, Clone, Default)]
pub struct HostAccessPolicyRecord {
    pub id: Option<String>,
    pub name: String,
    pub display_name: Option<String>,
    pub iqn: String,
    pub personality: String,
}

impl ResourceRecord for HostAccessPolicyRecord {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

/// Host access policies are replace-only: there is no update call, so
/// `prepare_update` stays at the trait's unsupported default.
pub struct HostAccessPolicyAdapter;

#[async_trait]
impl ResourceAdapter for HostAccessPolicyAdapter {
    type Record = HostAccessPolicyRecord;

    fn kind(&self) -> &'static str {
        "HostAccessPolicy"
    }

    fn prepare_create(
        &self,
        record: &HostAccessPolicyRecord,
    ) -> Result<WriteRequest, ClientError> {
        if record.name.is_empty() {
            return Err(ClientError::MissingField("name"));
        }
        if record.iqn.is_empty() {
            return Err(ClientError::MissingField("iqn"));
        }
        Ok(WriteRequest::CreateHostAccessPolicy {
            body: HostAccessPolicyPost {
                name: record.name.clone(),
                display_name: record.display_name.clone().unwrap_or_default(),
                iqn: record.iqn.clone(),
                personality: record.personality.clone(),
            },
        })
    }

    async fn read_resource(
        &self,
        client: &ApiClient,
        record: &mut HostAccessPolicyRecord,
    ) -> Result<(), ClientError> {
        let id = record.id.clone().ok_or(ClientError::MissingField("id"))?;
        let policy = client.get_host_access_policy_by_id(&id).await?;

        record.name = policy.name;
        record.display_name = Some(policy.display_name);
        record.iqn = policy.iqn;
        record.personality = policy.personality;
        Ok(())
    }

    async fn prepare_delete(
        &self,
        _client: &ApiClient,
        record: &HostAccessPolicyRecord,
    ) -> Result<DeletePlan, ClientError> {
        Ok(DeletePlan::new(WriteRequest::DeleteHostAccessPolicy {
            policy: record.name.clone(),
        }))
    }
}
