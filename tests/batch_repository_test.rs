mod common;

use brewops_api::models::Target;
use brewops_api::repositories::{BatchStore, SeaOrmBatchStore};
use std::sync::Arc;
use uuid::Uuid;

async fn store() -> (SeaOrmBatchStore, common::Seeded) {
    let db = common::setup_db().await;
    let seeded = common::seed(&db).await;
    (SeaOrmBatchStore::new(Arc::new(db)), seeded)
}

#[tokio::test]
async fn get_batch_joins_recipe_and_style() {
    let (store, seeded) = store().await;

    let batch = store.get_batch(seeded.batch_uuid).await.unwrap().unwrap();
    assert_eq!(batch.short_name, "IPA-001");
    assert_eq!(batch.recipe_name.as_deref(), Some("Cascade Crush"));
    assert_eq!(batch.style_name.as_deref(), Some("American IPA"));

    let other = store.get_batch(seeded.other_batch_uuid).await.unwrap().unwrap();
    assert_eq!(other.recipe_name, None);
    assert_eq!(other.style_name, None);
}

#[tokio::test]
async fn unknown_and_deleted_batches_are_absent() {
    let (store, seeded) = store().await;

    assert!(store.get_batch(Uuid::new_v4()).await.unwrap().is_none());
    assert!(store
        .get_batch(seeded.deleted_batch_uuid)
        .await
        .unwrap()
        .is_none());
    assert!(store
        .get_batch_summary_raw(seeded.deleted_batch_uuid)
        .await
        .unwrap()
        .is_none());
    assert!(store
        .list_additions_by_batch(Uuid::new_v4())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn summary_raw_gathers_linked_records_in_time_order() {
    let (store, seeded) = store().await;

    let raw = store
        .get_batch_summary_raw(seeded.batch_uuid)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(raw.brew_sessions.len(), 2);
    assert_eq!(raw.brew_sessions[0].brewed_at, common::t0());

    let phases: Vec<&str> = raw
        .process_phases
        .iter()
        .map(|p| p.process_phase.as_str())
        .collect();
    assert_eq!(phases, ["fermenting", "conditioning"]);

    assert_eq!(raw.batch_volumes.len(), 2);
    assert_eq!(raw.batch_volumes[0].volume.amount_unit, "bbl");
    assert_eq!(raw.batch_volumes[1].volume.amount_unit, "ml");

    let vessels: Vec<&str> = raw
        .occupancies
        .iter()
        .map(|o| o.vessel.name.as_str())
        .collect();
    assert_eq!(vessels, ["FV-1", "BT-1"]);
    assert_eq!(raw.occupancies[1].status.as_deref(), Some("carbonating"));

    assert_eq!(raw.transfers.len(), 2);
    assert!(raw
        .transfers
        .iter()
        .all(|t| t.source_occupancy_id == raw.occupancies[0].id));
}

#[tokio::test]
async fn measurements_follow_batch_occupancy_and_volume_links() {
    let (store, seeded) = store().await;

    let raw = store
        .get_batch_summary_raw(seeded.batch_uuid)
        .await
        .unwrap()
        .unwrap();

    let kinds: Vec<&str> = raw.measurements.iter().map(|m| m.kind.as_str()).collect();
    assert_eq!(kinds, ["og", "gravity", "fg", "ibu"]);

    let targets: Vec<Option<Target>> = raw.measurements.iter().map(|m| m.target).collect();
    assert_eq!(
        targets,
        [
            Some(Target::Batch(1)),
            None,
            Some(Target::Occupancy(1)),
            Some(Target::Volume(2)),
        ]
    );
    assert_eq!(raw.measurements[1].uuid, seeded.ambiguous_measurement);
}

#[tokio::test]
async fn additions_cover_every_link_and_skip_deleted_rows() {
    let (store, seeded) = store().await;

    let additions = store
        .list_additions_by_batch(seeded.batch_uuid)
        .await
        .unwrap();

    let uuids: Vec<Uuid> = additions.iter().map(|a| a.uuid).collect();
    assert_eq!(
        uuids,
        [
            seeded.batch_addition,
            seeded.occupancy_addition,
            seeded.volume_addition
        ]
    );
    assert_eq!(additions[0].inventory_lot_uuid, Some(seeded.malt_lot));
    assert_eq!(additions[1].target, Some(Target::Occupancy(1)));
    assert_eq!(additions[2].inventory_lot_uuid, None);

    let other = store
        .list_additions_by_batch(seeded.other_batch_uuid)
        .await
        .unwrap();
    assert_eq!(other.len(), 1);
    assert_eq!(other[0].target, Some(Target::Batch(2)));
}

#[tokio::test]
async fn additions_from_loaded_summary_match_direct_listing() {
    let (store, seeded) = store().await;

    for batch_uuid in [seeded.batch_uuid, seeded.other_batch_uuid] {
        let raw = store
            .get_batch_summary_raw(batch_uuid)
            .await
            .unwrap()
            .unwrap();

        let from_summary = store.list_additions_for_summary(&raw).await.unwrap();
        let direct = store.list_additions_by_batch(batch_uuid).await.unwrap();

        assert!(!from_summary.is_empty());
        assert_eq!(from_summary, direct);
    }
}
