use async_trait::async_trait;

use crate::error::ClientError;
use crate::transport::models::{
    HostAccessPolicyPost, Operation, PlacementGroupPatch, PlacementGroupPost, TenantSpacePatch,
    TenantSpacePost, VolumePatch, VolumePost,
};
use crate::transport::ApiClient;

/// The slice of a declarative record the driver itself needs: the server id.
pub trait ResourceRecord {
    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);
}

/// One mutating control-plane call with every parameter captured up front.
///
/// Submitting is stateless, so descriptors can be built, inspected and logged
/// without touching the network, and a patch list is just `Vec<WriteRequest>`.
#[derive(Debug, Clone)]
pub enum WriteRequest {
    CreateVolume {
        tenant: String,
        tenant_space: String,
        body: VolumePost,
    },
    PatchVolume {
        tenant: String,
        tenant_space: String,
        volume: String,
        patch: VolumePatch,
    },
    DeleteVolume {
        tenant: String,
        tenant_space: String,
        volume: String,
    },
    CreateTenantSpace {
        tenant: String,
        body: TenantSpacePost,
    },
    PatchTenantSpace {
        tenant: String,
        tenant_space: String,
        patch: TenantSpacePatch,
    },
    DeleteTenantSpace {
        tenant: String,
        tenant_space: String,
    },
    CreatePlacementGroup {
        tenant: String,
        tenant_space: String,
        body: PlacementGroupPost,
    },
    PatchPlacementGroup {
        tenant: String,
        tenant_space: String,
        placement_group: String,
        patch: PlacementGroupPatch,
    },
    DeletePlacementGroup {
        tenant: String,
        tenant_space: String,
        placement_group: String,
    },
    CreateHostAccessPolicy {
        body: HostAccessPolicyPost,
    },
    DeleteHostAccessPolicy {
        policy: String,
    },
    DeleteSnapshot {
        tenant: String,
        tenant_space: String,
        snapshot: String,
    },
}

impl WriteRequest {
    /// Issue the described call and return its operation handle.
    pub async fn submit(&self, client: &ApiClient) -> Result<Operation, ClientError> {
        match self {
            WriteRequest::CreateVolume {
                tenant,
                tenant_space,
                body,
            } => client.create_volume(body, tenant, tenant_space).await,
            WriteRequest::PatchVolume {
                tenant,
                tenant_space,
                volume,
                patch,
            } => {
                client
                    .update_volume(patch, tenant, tenant_space, volume)
                    .await
            }
            WriteRequest::DeleteVolume {
                tenant,
                tenant_space,
                volume,
            } => client.delete_volume(tenant, tenant_space, volume).await,
            WriteRequest::CreateTenantSpace { tenant, body } => {
                client.create_tenant_space(body, tenant).await
            }
            WriteRequest::PatchTenantSpace {
                tenant,
                tenant_space,
                patch,
            } => client.update_tenant_space(patch, tenant, tenant_space).await,
            WriteRequest::DeleteTenantSpace {
                tenant,
                tenant_space,
            } => client.delete_tenant_space(tenant, tenant_space).await,
            WriteRequest::CreatePlacementGroup {
                tenant,
                tenant_space,
                body,
            } => {
                client
                    .create_placement_group(body, tenant, tenant_space)
                    .await
            }
            WriteRequest::PatchPlacementGroup {
                tenant,
                tenant_space,
                placement_group,
                patch,
            } => {
                client
                    .update_placement_group(patch, tenant, tenant_space, placement_group)
                    .await
            }
            WriteRequest::DeletePlacementGroup {
                tenant,
                tenant_space,
                placement_group,
            } => {
                client
                    .delete_placement_group(tenant, tenant_space, placement_group)
                    .await
            }
            WriteRequest::CreateHostAccessPolicy { body } => {
                client.create_host_access_policy(body).await
            }
            WriteRequest::DeleteHostAccessPolicy { policy } => {
                client.delete_host_access_policy(policy).await
            }
            WriteRequest::DeleteSnapshot {
                tenant,
                tenant_space,
                snapshot,
            } => client.delete_snapshot(tenant, tenant_space, snapshot).await,
        }
    }
}

/// Ordered pre-delete cleanup plus the final delete call. Every cleanup step
/// is waited to terminal state, in order, before the delete is submitted.
#[derive(Debug, Clone)]
pub struct DeletePlan {
    pub cleanup: Vec<WriteRequest>,
    pub delete: WriteRequest,
}

impl DeletePlan {
    pub fn new(delete: WriteRequest) -> Self {
        Self {
            cleanup: Vec::new(),
            delete,
        }
    }

    pub fn with_cleanup(cleanup: Vec<WriteRequest>, delete: WriteRequest) -> Self {
        Self { cleanup, delete }
    }
}

/// Per-kind translation between a declarative record and control-plane calls.
///
/// Implement the operations the resource kind supports; the default bodies
/// reject everything as unsupported.
#[async_trait]
pub trait ResourceAdapter: Send + Sync {
    type Record: ResourceRecord + Send + Sync;

    fn kind(&self) -> &'static str;

    fn prepare_create(&self, _record: &Self::Record) -> Result<WriteRequest, ClientError> {
        Err(ClientError::Unsupported {
            action: "create",
            kind: self.kind(),
        })
    }

    /// Synchronously read the resource and populate the record, including
    /// computed fields. No operation is involved.
    async fn read_resource(
        &self,
        _client: &ApiClient,
        _record: &mut Self::Record,
    ) -> Result<(), ClientError> {
        Err(ClientError::Unsupported {
            action: "read",
            kind: self.kind(),
        })
    }

    /// Ordered patches turning `prior` into `desired`. Must reject immutable
    /// field changes before anything touches the network.
    fn prepare_update(
        &self,
        _desired: &Self::Record,
        _prior: &Self::Record,
    ) -> Result<Vec<WriteRequest>, ClientError> {
        Err(ClientError::Unsupported {
            action: "update",
            kind: self.kind(),
        })
    }

    async fn prepare_delete(
        &self,
        _client: &ApiClient,
        _record: &Self::Record,
    ) -> Result<DeletePlan, ClientError> {
        Err(ClientError::Unsupported {
            action: "delete",
            kind: self.kind(),
        })
    }
}
