use super::models::{Operation, Volume, VolumePatch, VolumePost};
use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn create_volume(
        &self,
        body: &VolumePost,
        tenant: &str,
        tenant_space: &str,
    ) -> Result<Operation, ClientError> {
        self.post_op(
            &format!("tenants/{tenant}/tenant-spaces/{tenant_space}/volumes"),
            body,
        )
        .await
    }

    pub async fn get_volume_by_id(&self, id: &str) -> Result<Volume, ClientError> {
        self.get_json(&format!("volumes/{id}")).await
    }

    pub async fn update_volume(
        &self,
        patch: &VolumePatch,
        tenant: &str,
        tenant_space: &str,
        volume: &str,
    ) -> Result<Operation, ClientError> {
        self.patch_op(
            &format!("tenants/{tenant}/tenant-spaces/{tenant_space}/volumes/{volume}"),
            patch,
        )
        .await
    }

    pub async fn delete_volume(
        &self,
        tenant: &str,
        tenant_space: &str,
        volume: &str,
    ) -> Result<Operation, ClientError> {
        self.delete_op(&format!(
            "tenants/{tenant}/tenant-spaces/{tenant_space}/volumes/{volume}"
        ))
        .await
    }
}
