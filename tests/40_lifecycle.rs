mod common;

use anyhow::Result;
use serde_json::{json, Value};
use strato_client::lifecycle::LifecycleDriver;
use strato_client::resources::{
    PlacementGroupAdapter, PlacementGroupRecord, TenantSpaceAdapter, TenantSpaceRecord,
    VolumeAdapter, VolumeRecord,
};
use strato_client::ClientError;

use common::{failed_op, pending_op, running_op, succeeded_op, succeeded_op_with_result};

fn volume_record() -> VolumeRecord {
    VolumeRecord {
        name: "db-data".into(),
        display_name: Some("db-data".into()),
        size: 1 << 30,
        tenant: "acme".into(),
        tenant_space: "prod".into(),
        storage_class: "performance".into(),
        placement_group: "pg-east".into(),
        host_names: vec!["host-a".into()],
        ..Default::default()
    }
}

fn volume_body(id: &str, size: i64) -> Value {
    json!({
        "id": id,
        "name": "db-data",
        "display_name": "db-data",
        "size": size,
        "tenant": {"id": "t-1", "name": "acme"},
        "tenant_space": {"id": "ts-1", "name": "prod"},
        "storage_class": {"id": "sc-1", "name": "performance"},
        "placement_group": {"id": "pg-1", "name": "pg-east"},
        "host_access_policies": [{"id": "hap-1", "name": "host-a"}],
        "serial_number": "SN-0001",
        "created_at": 1700000000,
        "target": {
            "iscsi": {
                "iqn": "iqn.2026-01.com.example:target-1",
                "addresses": ["10.0.0.1:3260"]
            }
        }
    })
}

#[tokio::test]
async fn create_waits_assigns_id_and_reads_back() -> Result<()> {
    let server = common::spawn().await;
    server.state.script_write(pending_op("op-1", 5));
    server.state.script_operation(
        "op-1",
        vec![
            running_op("op-1", 5),
            succeeded_op_with_result("op-1", "abc123"),
        ],
    );
    server
        .state
        .script_read("/api/1.0/volumes/abc123", volume_body("abc123", 1 << 30));

    let driver = LifecycleDriver::new(server.client(), VolumeAdapter);
    let mut record = volume_record();
    driver.create(&mut record).await?;

    assert_eq!(record.id.as_deref(), Some("abc123"));
    assert_eq!(record.serial_number.as_deref(), Some("SN-0001"));
    assert_eq!(record.host_names, vec!["host-a".to_string()]);
    assert_eq!(
        record.target_iscsi_iqn.as_deref(),
        Some("iqn.2026-01.com.example:target-1")
    );

    let submissions = server.state.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].method, "POST");
    assert_eq!(
        submissions[0].path,
        "/api/1.0/tenants/acme/tenant-spaces/prod/volumes"
    );
    assert_eq!(submissions[0].body["name"], "db-data");
    Ok(())
}

#[tokio::test]
async fn create_surfaces_a_failed_operation() {
    let server = common::spawn().await;
    server.state.script_write(failed_op("op-9", "quota exceeded"));

    let driver = LifecycleDriver::new(server.client(), VolumeAdapter);
    let mut record = volume_record();
    let err = driver.create(&mut record).await.unwrap_err();

    match err {
        ClientError::OperationFailed { id, message } => {
            assert_eq!(id, "op-9");
            assert_eq!(message, "quota exceeded");
        }
        other => panic!("expected OperationFailed, got {other:?}"),
    }
    assert!(record.id.is_none());
}

#[tokio::test]
async fn update_rejects_immutable_change_before_any_call() {
    let server = common::spawn().await;
    let driver = LifecycleDriver::new(server.client(), VolumeAdapter);

    let mut prior = volume_record();
    prior.id = Some("abc123".into());
    let mut desired = prior.clone();
    desired.tenant_space = "staging".into();

    let err = driver.update(&mut desired, &prior).await.unwrap_err();
    assert!(matches!(err, ClientError::ImmutableField("tenant_space")));
    assert!(server.state.submissions().is_empty());
}

#[tokio::test]
async fn update_applies_patches_then_reads_back() -> Result<()> {
    let server = common::spawn().await;
    server.state.script_write(succeeded_op("op-1"));
    server.state.script_write(succeeded_op("op-2"));
    server
        .state
        .script_read("/api/1.0/volumes/abc123", volume_body("abc123", 2 << 30));

    let driver = LifecycleDriver::new(server.client(), VolumeAdapter);
    let mut prior = volume_record();
    prior.id = Some("abc123".into());
    let mut desired = prior.clone();
    desired.display_name = Some("renamed".into());
    desired.size = 2 << 30;

    driver.update(&mut desired, &prior).await?;

    let submissions = server.state.submissions();
    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[0].method, "PATCH");
    assert_eq!(
        submissions[0].path,
        "/api/1.0/tenants/acme/tenant-spaces/prod/volumes/db-data"
    );
    assert_eq!(submissions[0].body["display_name"]["value"], "renamed");
    assert_eq!(submissions[1].body["size"]["value"], 2_i64 << 30);
    // Read-back wins over the desired state.
    assert_eq!(desired.size, 2 << 30);
    assert_eq!(desired.serial_number.as_deref(), Some("SN-0001"));
    Ok(())
}

#[tokio::test]
async fn volume_delete_clears_hosts_first() -> Result<()> {
    let server = common::spawn().await;
    server.state.script_write(succeeded_op("op-1"));
    server.state.script_write(succeeded_op("op-2"));

    let driver = LifecycleDriver::new(server.client(), VolumeAdapter);
    let mut record = volume_record();
    record.id = Some("abc123".into());
    driver.delete(&record).await?;

    let submissions = server.state.submissions();
    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[0].method, "PATCH");
    assert_eq!(submissions[0].body["host_access_policies"]["value"], "");
    assert_eq!(submissions[1].method, "DELETE");
    assert_eq!(
        submissions[1].path,
        "/api/1.0/tenants/acme/tenant-spaces/prod/volumes/db-data"
    );
    Ok(())
}

#[tokio::test]
async fn failed_cleanup_aborts_the_delete() {
    let server = common::spawn().await;
    server
        .state
        .script_write(failed_op("op-1", "volume is attached"));

    let driver = LifecycleDriver::new(server.client(), VolumeAdapter);
    let mut record = volume_record();
    record.id = Some("abc123".into());
    let err = driver.delete(&record).await.unwrap_err();

    assert!(matches!(err, ClientError::OperationFailed { .. }));
    // Only the host-clearing patch went out; the delete never did.
    let submissions = server.state.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].method, "PATCH");
}

#[tokio::test]
async fn placement_group_delete_destroys_snapshots_in_order() -> Result<()> {
    let server = common::spawn().await;
    server.state.script_read(
        "/api/1.0/tenants/acme/tenant-spaces/prod/snapshots",
        json!({"items": [
            {"id": "s-1", "name": "snap-1"},
            {"id": "s-2", "name": "snap-2"}
        ]}),
    );
    server.state.script_write(succeeded_op("op-1"));
    server.state.script_write(succeeded_op("op-2"));
    server.state.script_write(succeeded_op("op-3"));

    let driver = LifecycleDriver::new(server.client(), PlacementGroupAdapter);
    let record = PlacementGroupRecord {
        id: Some("pg-1".into()),
        name: "pg-east".into(),
        tenant: "acme".into(),
        tenant_space: "prod".into(),
        destroy_snapshots_on_delete: true,
        ..Default::default()
    };
    driver.delete(&record).await?;

    let submissions = server.state.submissions();
    assert_eq!(submissions.len(), 3);
    assert_eq!(
        submissions[0].path,
        "/api/1.0/tenants/acme/tenant-spaces/prod/snapshots/snap-1"
    );
    assert_eq!(
        submissions[1].path,
        "/api/1.0/tenants/acme/tenant-spaces/prod/snapshots/snap-2"
    );
    assert_eq!(submissions[2].method, "DELETE");
    assert_eq!(
        submissions[2].path,
        "/api/1.0/tenants/acme/tenant-spaces/prod/placement-groups/pg-east"
    );
    Ok(())
}

#[tokio::test]
async fn read_of_a_missing_resource_is_not_found() {
    let server = common::spawn().await;
    let driver = LifecycleDriver::new(server.client(), VolumeAdapter);

    let mut record = volume_record();
    record.id = Some("missing".into());
    let err = driver.read(&mut record).await.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
}

#[tokio::test]
async fn import_hydrates_an_untracked_record() -> Result<()> {
    let server = common::spawn().await;
    server.state.script_read(
        "/api/1.0/tenant-spaces/ts-1",
        json!({
            "id": "ts-1",
            "name": "prod",
            "display_name": "Production",
            "tenant": {"id": "t-1", "name": "acme"}
        }),
    );

    let driver = LifecycleDriver::new(server.client(), TenantSpaceAdapter);
    let mut record = TenantSpaceRecord {
        id: Some("ts-1".into()),
        ..Default::default()
    };
    driver.import(&mut record).await?;

    assert_eq!(record.name, "prod");
    assert_eq!(record.display_name.as_deref(), Some("Production"));
    assert_eq!(record.tenant, "acme");
    Ok(())
}
