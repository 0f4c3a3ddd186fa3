//! One lifecycle adapter per resource kind. Each adapter translates its
//! declarative record into the create/read/update/delete calls appropriate
//! for that kind; the generic driver in [`crate::lifecycle`] does the rest.

mod host_access_policy;
mod placement_group;
mod tenant_space;
mod volume;

pub use host_access_policy::{HostAccessPolicyAdapter, HostAccessPolicyRecord};
pub use placement_group::{PlacementGroupAdapter, PlacementGroupRecord};
pub use tenant_space::{TenantSpaceAdapter, TenantSpaceRecord};
pub use volume::{VolumeAdapter, VolumeRecord};
