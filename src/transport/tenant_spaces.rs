use super::models::{Operation, TenantSpace, TenantSpacePatch, TenantSpacePost};
use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn create_tenant_space(
        &self,
        body: &TenantSpacePost,
        tenant: &str,
    ) -> Result<Operation, ClientError> {
        self.post_op(&format!("tenants/{tenant}/tenant-spaces"), body)
            .await
    }

    pub async fn get_tenant_space_by_id(&self, id: &str) -> Result<TenantSpace, ClientError> {
        self.get_json(&format!("tenant-spaces/{id}")).await
    }

    pub async fn update_tenant_space(
        &self,
        patch: &TenantSpacePatch,
        tenant: &str,
        tenant_space: &str,
    ) -> Result<Operation, ClientError> {
        self.patch_op(
            &format!("tenants/{tenant}/tenant-spaces/{tenant_space}"),
            patch,
        )
        .await
    }

    pub async fn delete_tenant_space(
        &self,
        tenant: &str,
        tenant_space: &str,
    ) -> Result<Operation, ClientError> {
        self.delete_op(&format!("tenants/{tenant}/tenant-spaces/{tenant_space}"))
            .await
    }
}
