use async_trait::async_trait;

use crate::error::ClientError;
use crate::lifecycle::{DeletePlan, ResourceAdapter, ResourceRecord, WriteRequest};
use crate::transport::models::{Nullable, VolumePatch, VolumePost};
use crate::transport::ApiClient;

/// Declarative state of a volume. The trailing fields are computed by the
/// control plane and populated on read.
#[derive(Debug, Clone, Default)]
pub struct VolumeRecord {
    pub id: Option<String>,
    pub name: String,
    pub display_name: Option<String>,
    pub size: i64,
    pub tenant: String,
    pub tenant_space: String,
    pub storage_class: String,
    pub placement_group: String,
    pub protection_policy: Option<String>,
    pub host_names: Vec<String>,

    pub serial_number: Option<String>,
    pub created_at: Option<i64>,
    pub target_iscsi_iqn: Option<String>,
    pub target_iscsi_addresses: Vec<String>,
}

impl ResourceRecord for VolumeRecord {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

pub struct VolumeAdapter;

#[async_trait]
impl ResourceAdapter for VolumeAdapter {
    type Record = VolumeRecord;

    fn kind(&self) -> &'static str {
        "Volume"
    }

    fn prepare_create(&self, record: &VolumeRecord) -> Result<WriteRequest, ClientError> {
        if record.name.is_empty() {
            return Err(ClientError::MissingField("name"));
        }
        let display_name = record
            .display_name
            .clone()
            .unwrap_or_else(|| record.name.clone());

        Ok(WriteRequest::CreateVolume {
            tenant: record.tenant.clone(),
            tenant_space: record.tenant_space.clone(),
            body: VolumePost {
                name: record.name.clone(),
                display_name,
                size: record.size,
                storage_class: record.storage_class.clone(),
                placement_group: record.placement_group.clone(),
                protection_policy: record.protection_policy.clone(),
            },
        })
    }

    async fn read_resource(
        &self,
        client: &ApiClient,
        record: &mut VolumeRecord,
    ) -> Result<(), ClientError> {
        let id = record.id.clone().ok_or(ClientError::MissingField("id"))?;
        let volume = client.get_volume_by_id(&id).await?;

        record.host_names = volume
            .host_access_policies
            .iter()
            .map(|policy| policy.name.clone())
            .collect();
        record.tenant = volume.tenant.name;
        record.tenant_space = volume.tenant_space.name;
        record.storage_class = volume.storage_class.name;
        record.placement_group = volume.placement_group.name;
        record.name = volume.name;
        record.display_name = Some(volume.display_name);
        record.size = volume.size;
        record.serial_number = Some(volume.serial_number);
        record.created_at = Some(volume.created_at);
        record.protection_policy = volume.protection_policy.map(|policy| policy.name);
        if let Some(iscsi) = volume.target.and_then(|target| target.iscsi) {
            record.target_iscsi_iqn = Some(iscsi.iqn);
            record.target_iscsi_addresses = iscsi.addresses;
        }
        Ok(())
    }

    fn prepare_update(
        &self,
        desired: &VolumeRecord,
        prior: &VolumeRecord,
    ) -> Result<Vec<WriteRequest>, ClientError> {
        if desired.name != prior.name {
            return Err(ClientError::ImmutableField("name"));
        }
        if desired.tenant != prior.tenant {
            return Err(ClientError::ImmutableField("tenant"));
        }
        if desired.tenant_space != prior.tenant_space {
            return Err(ClientError::ImmutableField("tenant_space"));
        }

        let make = |patch: VolumePatch| WriteRequest::PatchVolume {
            tenant: desired.tenant.clone(),
            tenant_space: desired.tenant_space.clone(),
            volume: desired.name.clone(),
            patch,
        };
        let mut patches = Vec::new();

        if desired.display_name != prior.display_name {
            // A cleared display name patches to empty rather than being
            // silently skipped.
            let to = desired.display_name.clone().unwrap_or_default();
            tracing::trace!(
                resource = "volume",
                parameter = "display_name",
                to = %to,
                patch_idx = patches.len(),
                "update"
            );
            patches.push(make(VolumePatch {
                display_name: Some(Nullable::new(to)),
                ..Default::default()
            }));
        }

        if desired.protection_policy != prior.protection_policy {
            let to = desired.protection_policy.clone().unwrap_or_default();
            tracing::trace!(
                resource = "volume",
                parameter = "protection_policy",
                to = %to,
                patch_idx = patches.len(),
                "update"
            );
            patches.push(make(VolumePatch {
                protection_policy: Some(Nullable::new(to)),
                ..Default::default()
            }));
        }

        // Moving placement groups regenerates the target IQN, so host
        // assignments have to be dropped first and re-added afterwards.
        let placement_group_changed = desired.placement_group != prior.placement_group;
        if placement_group_changed {
            tracing::trace!(
                resource = "volume",
                parameter = "host_names",
                to = "",
                patch_idx = patches.len(),
                "temporary removal of hosts for placement group change"
            );
            patches.push(make(VolumePatch {
                host_access_policies: Some(Nullable::new(String::new())),
                ..Default::default()
            }));
        }

        if desired.storage_class != prior.storage_class || placement_group_changed {
            let mut combined = VolumePatch::default();
            if desired.storage_class != prior.storage_class {
                combined.storage_class = Some(Nullable::new(desired.storage_class.clone()));
            }
            if placement_group_changed {
                combined.placement_group = Some(Nullable::new(desired.placement_group.clone()));
            }
            patches.push(make(combined));
        }

        if desired.host_names != prior.host_names || placement_group_changed {
            let assigned = desired.host_names.join(",");
            tracing::trace!(
                resource = "volume",
                parameter = "host_names",
                to = %assigned,
                patch_idx = patches.len(),
                readded = placement_group_changed,
                "update"
            );
            patches.push(make(VolumePatch {
                host_access_policies: Some(Nullable::new(assigned)),
                ..Default::default()
            }));
        }

        if desired.size != prior.size {
            tracing::trace!(
                resource = "volume",
                parameter = "size",
                to = desired.size,
                patch_idx = patches.len(),
                "update"
            );
            patches.push(make(VolumePatch {
                size: Some(Nullable::new(desired.size)),
                ..Default::default()
            }));
        }

        Ok(patches)
    }

    async fn prepare_delete(
        &self,
        _client: &ApiClient,
        record: &VolumeRecord,
    ) -> Result<DeletePlan, ClientError> {
        // Host assignments must be cleared before the control plane accepts
        // the delete.
        let clear_hosts = WriteRequest::PatchVolume {
            tenant: record.tenant.clone(),
            tenant_space: record.tenant_space.clone(),
            volume: record.name.clone(),
            patch: VolumePatch {
                host_access_policies: Some(Nullable::new(String::new())),
                ..Default::default()
            },
        };
        let delete = WriteRequest::DeleteVolume {
            tenant: record.tenant.clone(),
            tenant_space: record.tenant_space.clone(),
            volume: record.name.clone(),
        };
        Ok(DeletePlan::with_cleanup(vec![clear_hosts], delete))
    }
}
