use async_trait::async_trait;

use crate::error::ClientError;
use crate::lifecycle::{DeletePlan, ResourceAdapter, ResourceRecord, WriteRequest};
use crate::transport::models::{Nullable, TenantSpacePatch, TenantSpacePost};
use crate::transport::ApiClient;

#[derive(Debug, Clone, Default)]
pub struct TenantSpaceRecord {
    pub id: Option<String>,
    pub tenant: String,
    pub name: String,
    pub display_name: Option<String>,
}

impl ResourceRecord for TenantSpaceRecord {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

pub struct TenantSpaceAdapter;

#[async_trait]
impl ResourceAdapter for TenantSpaceAdapter {
    type Record = TenantSpaceRecord;

    fn kind(&self) -> &'static str {
        "TenantSpace"
    }

    fn prepare_create(&self, record: &TenantSpaceRecord) -> Result<WriteRequest, ClientError> {
        if record.name.is_empty() {
            return Err(ClientError::MissingField("name"));
        }
        Ok(WriteRequest::CreateTenantSpace {
            tenant: record.tenant.clone(),
            body: TenantSpacePost {
                name: record.name.clone(),
                display_name: record.display_name.clone().unwrap_or_default(),
            },
        })
    }

    async fn read_resource(
        &self,
        client: &ApiClient,
        record: &mut TenantSpaceRecord,
    ) -> Result<(), ClientError> {
        let id = record.id.clone().ok_or(ClientError::MissingField("id"))?;
        let tenant_space = client.get_tenant_space_by_id(&id).await?;

        record.name = tenant_space.name;
        record.display_name = Some(tenant_space.display_name);
        record.tenant = tenant_space.tenant.name;
        Ok(())
    }

    fn prepare_update(
        &self,
        desired: &TenantSpaceRecord,
        prior: &TenantSpaceRecord,
    ) -> Result<Vec<WriteRequest>, ClientError> {
        // Only the display name may change after creation.
        if desired.name != prior.name {
            return Err(ClientError::ImmutableField("name"));
        }
        if desired.tenant != prior.tenant {
            return Err(ClientError::ImmutableField("tenant"));
        }

        let display_name = desired.display_name.clone().unwrap_or_default();
        tracing::info!(display_name = %display_name, "updating tenant space");
        Ok(vec![WriteRequest::PatchTenantSpace {
            tenant: desired.tenant.clone(),
            tenant_space: desired.name.clone(),
            patch: TenantSpacePatch {
                display_name: Some(Nullable::new(display_name)),
            },
        }])
    }

    async fn prepare_delete(
        &self,
        _client: &ApiClient,
        record: &TenantSpaceRecord,
    ) -> Result<DeletePlan, ClientError> {
        Ok(DeletePlan::new(WriteRequest::DeleteTenantSpace {
            tenant: record.tenant.clone(),
            tenant_space: record.name.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_record() -> TenantSpaceRecord {
        TenantSpaceRecord {
            id: Some("ts-1".into()),
            tenant: "acme".into(),
            name: "prod".into(),
            display_name: Some("Production".into()),
        }
    }

    #[test]
    fn update_allows_only_display_name() {
        let prior = base_record();
        let mut desired = base_record();
        desired.display_name = Some("Prod (US)".into());

        let patches = TenantSpaceAdapter.prepare_update(&desired, &prior).unwrap();
        assert_eq!(patches.len(), 1);
        match &patches[0] {
            WriteRequest::PatchTenantSpace { patch, .. } => assert_eq!(
                patch.display_name,
                Some(Nullable::new("Prod (US)".to_string()))
            ),
            other => panic!("expected PatchTenantSpace, got {:?}", other),
        }
    }

    #[test]
    fn update_rejects_rename() {
        let prior = base_record();
        let mut desired = base_record();
        desired.name = "prod2".into();

        let err = TenantSpaceAdapter
            .prepare_update(&desired, &prior)
            .unwrap_err();
        assert!(matches!(err, ClientError::ImmutableField("name")));
    }

    #[tokio::test]
    async fn delete_has_no_cleanup() {
        let client = ApiClient::new("http://localhost", "t").unwrap();
        let plan = TenantSpaceAdapter
            .prepare_delete(&client, &base_record())
            .await
            .unwrap();
        assert!(plan.cleanup.is_empty());
        assert!(matches!(
            plan.delete,
            WriteRequest::DeleteTenantSpace { .. }
        ));
    }
}
