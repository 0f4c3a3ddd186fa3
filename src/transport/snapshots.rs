use super::models::{Operation, SnapshotList};
use super::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// List snapshots in a tenant space, optionally filtered to one placement
    /// group. Used by pre-delete cleanup; not a generic pagination layer.
    pub async fn list_snapshots(
        &self,
        tenant: &str,
        tenant_space: &str,
        placement_group: Option<&str>,
    ) -> Result<SnapshotList, ClientError> {
        let mut request = self
            .http
            .get(self.endpoint(&format!(
                "tenants/{tenant}/tenant-spaces/{tenant_space}/snapshots"
            )))
            .bearer_auth(&self.token);
        if let Some(placement_group) = placement_group {
            request = request.query(&[("placement_group", placement_group)]);
        }
        Self::decode(request.send().await?).await
    }

    pub async fn delete_snapshot(
        &self,
        tenant: &str,
        tenant_space: &str,
        snapshot: &str,
    ) -> Result<Operation, ClientError> {
        self.delete_op(&format!(
            "tenants/{tenant}/tenant-spaces/{tenant_space}/snapshots/{snapshot}"
        ))
        .await
    }
}
