use super::models::{Operation, PlacementGroup, PlacementGroupPatch, PlacementGroupPost};
use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn create_placement_group(
        &self,
        body: &PlacementGroupPost,
        tenant: &str,
        tenant_space: &str,
    ) -> Result<Operation, ClientError> {
        self.post_op(
            &format!("tenants/{tenant}/tenant-spaces/{tenant_space}/placement-groups"),
            body,
        )
        .await
    }

    pub async fn get_placement_group_by_id(
        &self,
        id: &str,
    ) -> Result<PlacementGroup, ClientError> {
        self.get_json(&format!("placement-groups/{id}")).await
    }

    pub async fn update_placement_group(
        &self,
        patch: &PlacementGroupPatch,
        tenant: &str,
        tenant_space: &str,
        placement_group: &str,
    ) -> Result<Operation, ClientError> {
        self.patch_op(
            &format!(
                "tenants/{tenant}/tenant-spaces/{tenant_space}/placement-groups/{placement_group}"
            ),
            patch,
        )
        .await
    }

    pub async fn delete_placement_group(
        &self,
        tenant: &str,
        tenant_space: &str,
        placement_group: &str,
    ) -> Result<Operation, ClientError> {
        self.delete_op(&format!(
            "tenants/{tenant}/tenant-spaces/{tenant_space}/placement-groups/{placement_group}"
        ))
        .await
    }
}
