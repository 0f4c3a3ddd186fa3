use async_trait::async_trait;

use crate::error::ClientError;
use crate::lifecycle::{DeletePlan, ResourceAdapter, ResourceRecord, WriteRequest};
use crate::transport::models::{
    Nullable, PlacementEngine, PlacementGroupPatch, PlacementGroupPost,
};
use crate::transport::ApiClient;

#[derive(Debug, Clone, Default)]
pub struct PlacementGroupRecord {
    pub id: Option<String>,
    pub name: String,
    pub display_name: Option<String>,
    pub tenant: String,
    pub tenant_space: String,
    pub region: String,
    pub availability_zone: String,
    pub storage_service: String,
    pub placement_engine: Option<PlacementEngine>,
    /// When true, snapshots within the placement group are deleted before the
    /// group itself. Otherwise any snapshots have to be removed as a separate
    /// step first.
    pub destroy_snapshots_on_delete: bool,
}

impl ResourceRecord for PlacementGroupRecord {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

pub struct PlacementGroupAdapter;

#[async_trait]
impl ResourceAdapter for PlacementGroupAdapter {
    type Record = PlacementGroupRecord;

    fn kind(&self) -> &'static str {
        "PlacementGroup"
    }

    fn prepare_create(&self, record: &PlacementGroupRecord) -> Result<WriteRequest, ClientError> {
        if record.name.is_empty() {
            return Err(ClientError::MissingField("name"));
        }
        let display_name = record
            .display_name
            .clone()
            .unwrap_or_else(|| record.name.clone());
        tracing::debug!(
            tenant_space = %record.tenant_space,
            name = %record.name,
            "preparing placement group create"
        );

        Ok(WriteRequest::CreatePlacementGroup {
            tenant: record.tenant.clone(),
            tenant_space: record.tenant_space.clone(),
            body: PlacementGroupPost {
                name: record.name.clone(),
                display_name,
                region: record.region.clone(),
                availability_zone: record.availability_zone.clone(),
                storage_service: record.storage_service.clone(),
                placement_engine: record.placement_engine,
            },
        })
    }

    async fn read_resource(
        &self,
        client: &ApiClient,
        record: &mut PlacementGroupRecord,
    ) -> Result<(), ClientError> {
        let id = record.id.clone().ok_or(ClientError::MissingField("id"))?;
        tracing::debug!(id = %id, "reading placement group");
        let group = client.get_placement_group_by_id(&id).await?;

        record.name = group.name;
        record.display_name = Some(group.display_name);
        record.tenant = group.tenant.name;
        record.tenant_space = group.tenant_space.name;
        record.storage_service = group.storage_service.name;
        record.placement_engine = group.placement_engine;

        // The group only references its availability zone; the region comes
        // from the zone itself.
        let zone = client
            .get_availability_zone_by_id(&group.availability_zone.id)
            .await?;
        record.availability_zone = zone.name;
        record.region = zone.region.name;
        Ok(())
    }

    fn prepare_update(
        &self,
        desired: &PlacementGroupRecord,
        prior: &PlacementGroupRecord,
    ) -> Result<Vec<WriteRequest>, ClientError> {
        // Only the display name may change after creation.
        if desired.name != prior.name
            || desired.tenant != prior.tenant
            || desired.tenant_space != prior.tenant_space
            || desired.region != prior.region
            || desired.availability_zone != prior.availability_zone
            || desired.storage_service != prior.storage_service
            || desired.placement_engine != prior.placement_engine
        {
            return Err(ClientError::ImmutableField(
                "placement group fields other than display_name",
            ));
        }

        let display_name = desired.display_name.clone().unwrap_or_default();
        tracing::info!(display_name = %display_name, "updating placement group");
        Ok(vec![WriteRequest::PatchPlacementGroup {
            tenant: desired.tenant.clone(),
            tenant_space: desired.tenant_space.clone(),
            placement_group: desired.name.clone(),
            patch: PlacementGroupPatch {
                display_name: Some(Nullable::new(display_name)),
            },
        }])
    }

    async fn prepare_delete(
        &self,
        client: &ApiClient,
        record: &PlacementGroupRecord,
    ) -> Result<DeletePlan, ClientError> {
        let mut cleanup = Vec::new();
        if record.destroy_snapshots_on_delete {
            tracing::debug!("listing snapshots to destroy before delete");
            let snapshots = client
                .list_snapshots(&record.tenant, &record.tenant_space, Some(&record.name))
                .await?;
            for snapshot in snapshots.items {
                tracing::info!(name = %snapshot.name, "scheduling snapshot delete");
                cleanup.push(WriteRequest::DeleteSnapshot {
                    tenant: record.tenant.clone(),
                    tenant_space: record.tenant_space.clone(),
                    snapshot: snapshot.name,
                });
            }
        }

        let delete = WriteRequest::DeletePlacementGroup {
            tenant: record.tenant.clone(),
            tenant_space: record.tenant_space.clone(),
            placement_group: record.name.clone(),
        };
        Ok(DeletePlan::with_cleanup(cleanup, delete))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_record() -> PlacementGroupRecord {
        PlacementGroupRecord {
            id: Some("pg-1".into()),
            name: "pg-east".into(),
            display_name: Some("pg-east".into()),
            tenant: "acme".into(),
            tenant_space: "prod".into(),
            region: "us-east".into(),
            availability_zone: "us-east-1a".into(),
            storage_service: "block-optimized".into(),
            placement_engine: Some(PlacementEngine::Heuristics),
            destroy_snapshots_on_delete: false,
        }
    }

    #[test]
    fn create_carries_region_and_engine() {
        let request = PlacementGroupAdapter.prepare_create(&base_record()).unwrap();
        match request {
            WriteRequest::CreatePlacementGroup { body, .. } => {
                assert_eq!(body.region, "us-east");
                assert_eq!(body.placement_engine, Some(PlacementEngine::Heuristics));
            }
            other => panic!("expected CreatePlacementGroup, got {:?}", other),
        }
    }

    #[test]
    fn update_rejects_storage_service_change() {
        let prior = base_record();
        let mut desired = base_record();
        desired.storage_service = "general".into();

        let err = PlacementGroupAdapter
            .prepare_update(&desired, &prior)
            .unwrap_err();
        assert!(matches!(err, ClientError::ImmutableField(_)));
    }

    #[test]
    fn update_display_name_is_one_patch() {
        let prior = base_record();
        let mut desired = base_record();
        desired.display_name = Some("East coast".into());

        let patches = PlacementGroupAdapter
            .prepare_update(&desired, &prior)
            .unwrap();
        assert_eq!(patches.len(), 1);
    }
}
