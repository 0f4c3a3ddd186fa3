//! Wire models for the control plane REST API.

use serde::{Deserialize, Serialize};

/// Status strings reported for asynchronous operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    Pending,
    Running,
    Succeeded,
    Completed,
    Failed,
}

impl OperationStatus {
    /// Terminal operations are never polled again.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OperationStatus::Succeeded | OperationStatus::Completed | OperationStatus::Failed
        )
    }

    pub fn is_success(self) -> bool {
        matches!(self, OperationStatus::Succeeded | OperationStatus::Completed)
    }
}

/// Server-tracked handle for an in-flight asynchronous mutation.
///
/// Each poll overwrites the whole value with the latest snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub request_type: String,
    #[serde(default)]
    pub status: Option<OperationStatus>,
    /// Server hint for how long to wait before the next poll, milliseconds.
    #[serde(default)]
    pub retry_in: u64,
    /// Present only once the operation succeeded.
    #[serde(default)]
    pub result: Option<OperationResult>,
    /// Present only once the operation failed.
    #[serde(default)]
    pub error: Option<ApiErrorDetail>,
}

impl Operation {
    /// A handle with no id, no status and no retry hint was never actually
    /// submitted; polling it would loop on an empty identifier.
    pub fn is_null(&self) -> bool {
        self.id.is_empty() && self.status.is_none() && self.retry_in == 0
    }

    pub(crate) fn error_message(&self) -> String {
        self.error
            .as_ref()
            .map(|e| e.message.clone())
            .unwrap_or_else(|| "unknown error".to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResult {
    pub resource: ResourceRef,
}

/// Reference to a resource by id, as embedded in read models and results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

/// Structured error document attached to failed operations and carried in the
/// body of non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub http_code: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ApiErrorDetail,
}

/// Patch field wrapper. `{"value": ""}` distinguishes "set to empty" from
/// "leave alone" (the field being absent entirely).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nullable<T> {
    pub value: T,
}

impl<T> Nullable<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

//
// Volumes
//

#[derive(Debug, Clone, Deserialize)]
pub struct Volume {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub size: i64,
    pub tenant: ResourceRef,
    pub tenant_space: ResourceRef,
    pub storage_class: ResourceRef,
    pub placement_group: ResourceRef,
    #[serde(default)]
    pub protection_policy: Option<ResourceRef>,
    #[serde(default)]
    pub host_access_policies: Vec<ResourceRef>,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub target: Option<Target>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Target {
    #[serde(default)]
    pub iscsi: Option<Iscsi>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Iscsi {
    #[serde(default)]
    pub iqn: String,
    #[serde(default)]
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VolumePost {
    pub name: String,
    pub display_name: String,
    pub size: i64,
    pub storage_class: String,
    pub placement_group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection_policy: Option<String>,
}

/// One atomic partial update. Exactly the changed fields are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VolumePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<Nullable<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protection_policy: Option<Nullable<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<Nullable<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement_group: Option<Nullable<String>>,
    /// Comma-separated policy names; empty string clears all assignments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_access_policies: Option<Nullable<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Nullable<i64>>,
}

//
// Tenant spaces
//

#[derive(Debug, Clone, Deserialize)]
pub struct TenantSpace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub tenant: ResourceRef,
}

#[derive(Debug, Clone, Serialize)]
pub struct TenantSpacePost {
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TenantSpacePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<Nullable<String>>,
}

//
// Placement groups
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementEngine {
    #[serde(rename = "pure1meta")]
    Pure1Meta,
    #[serde(rename = "heuristics")]
    Heuristics,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacementGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub tenant: ResourceRef,
    pub tenant_space: ResourceRef,
    pub availability_zone: ResourceRef,
    pub storage_service: ResourceRef,
    #[serde(default)]
    pub placement_engine: Option<PlacementEngine>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacementGroupPost {
    pub name: String,
    pub display_name: String,
    pub region: String,
    pub availability_zone: String,
    pub storage_service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placement_engine: Option<PlacementEngine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlacementGroupPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<Nullable<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityZone {
    pub id: String,
    pub name: String,
    pub region: ResourceRef,
}

//
// Host access policies
//

#[derive(Debug, Clone, Deserialize)]
pub struct HostAccessPolicy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    pub iqn: String,
    pub personality: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HostAccessPolicyPost {
    pub name: String,
    pub display_name: String,
    pub iqn: String,
    pub personality: String,
}

//
// Snapshots
//

#[derive(Debug, Clone, Deserialize)]
pub struct Snapshot {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotList {
    #[serde(default)]
    pub items: Vec<Snapshot>,
}
