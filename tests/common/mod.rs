#![allow(dead_code)]

use brewops_api::entities::{
    addition, batch, batch_process_phase, batch_volume, brew_session, measurement, occupancy,
    recipe, style, transfer, vessel, volume,
};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use sea_orm::{
    ActiveValue::Set, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    Schema,
};
use uuid::Uuid;

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap()
}

pub fn at(offset: Duration) -> DateTime<Utc> {
    t0() + offset
}

/// In-memory SQLite database with every table created from the entities.
pub async fn setup_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:".to_string());
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("sqlite connects");

    create_table(&db, style::Entity).await;
    create_table(&db, recipe::Entity).await;
    create_table(&db, batch::Entity).await;
    create_table(&db, brew_session::Entity).await;
    create_table(&db, batch_process_phase::Entity).await;
    create_table(&db, volume::Entity).await;
    create_table(&db, batch_volume::Entity).await;
    create_table(&db, vessel::Entity).await;
    create_table(&db, occupancy::Entity).await;
    create_table(&db, transfer::Entity).await;
    create_table(&db, measurement::Entity).await;
    create_table(&db, addition::Entity).await;

    db
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    db.execute(backend.build(&schema.create_table_from_entity(entity)))
        .await
        .expect("table created");
}

/// Identifiers of the seeded fixture.
pub struct Seeded {
    pub batch_uuid: Uuid,
    pub other_batch_uuid: Uuid,
    pub deleted_batch_uuid: Uuid,
    pub malt_lot: Uuid,
    pub hops_lot: Uuid,
    pub batch_addition: Uuid,
    pub occupancy_addition: Uuid,
    pub volume_addition: Uuid,
    pub ambiguous_measurement: Uuid,
}

fn batch_row(
    id: i64,
    uuid: Uuid,
    name: &str,
    recipe_id: Option<i64>,
    deleted: bool,
) -> batch::ActiveModel {
    batch::ActiveModel {
        id: Set(id),
        uuid: Set(uuid),
        short_name: Set(name.to_string()),
        recipe_id: Set(recipe_id),
        brew_date: Set(NaiveDate::from_ymd_opt(2026, 1, 5)),
        notes: Set(None),
        created_at: Set(t0()),
        updated_at: Set(t0()),
        deleted_at: Set(deleted.then(t0)),
    }
}

fn volume_row(id: i64, amount: i64, unit: &str) -> volume::ActiveModel {
    volume::ActiveModel {
        id: Set(id),
        uuid: Set(Uuid::new_v4()),
        name: Set(None),
        amount: Set(amount),
        amount_unit: Set(unit.to_string()),
    }
}

fn batch_volume_row(
    id: i64,
    batch_id: i64,
    volume_id: i64,
    phase: &str,
    phase_at: DateTime<Utc>,
) -> batch_volume::ActiveModel {
    batch_volume::ActiveModel {
        id: Set(id),
        uuid: Set(Uuid::new_v4()),
        batch_id: Set(batch_id),
        volume_id: Set(volume_id),
        liquid_phase: Set(phase.to_string()),
        phase_at: Set(phase_at),
        deleted_at: Set(None),
    }
}

fn vessel_row(id: i64, vessel_type: &str, name: &str) -> vessel::ActiveModel {
    vessel::ActiveModel {
        id: Set(id),
        uuid: Set(Uuid::new_v4()),
        vessel_type: Set(vessel_type.to_string()),
        name: Set(name.to_string()),
    }
}

fn occupancy_row(
    id: i64,
    vessel_id: i64,
    volume_id: i64,
    in_at: DateTime<Utc>,
    out_at: Option<DateTime<Utc>>,
    status: Option<&str>,
) -> occupancy::ActiveModel {
    occupancy::ActiveModel {
        id: Set(id),
        uuid: Set(Uuid::new_v4()),
        vessel_id: Set(vessel_id),
        volume_id: Set(volume_id),
        in_at: Set(in_at),
        out_at: Set(out_at),
        status: Set(status.map(str::to_string)),
        deleted_at: Set(None),
    }
}

fn transfer_row(id: i64, source: i64, dest: i64, loss_bbl: Option<i64>) -> transfer::ActiveModel {
    transfer::ActiveModel {
        id: Set(id),
        uuid: Set(Uuid::new_v4()),
        source_occupancy_id: Set(source),
        dest_occupancy_id: Set(dest),
        amount: Set(9),
        amount_unit: Set("bbl".to_string()),
        loss_amount: Set(loss_bbl),
        loss_unit: Set(loss_bbl.map(|_| "bbl".to_string())),
        started_at: Set(at(Duration::days(14))),
        ended_at: Set(None),
        deleted_at: Set(None),
    }
}

#[allow(clippy::too_many_arguments)]
fn measurement_row(
    id: i64,
    uuid: Uuid,
    refs: (Option<i64>, Option<i64>, Option<i64>),
    kind: &str,
    value: f64,
    observed_at: DateTime<Utc>,
    deleted: bool,
) -> measurement::ActiveModel {
    measurement::ActiveModel {
        id: Set(id),
        uuid: Set(uuid),
        batch_id: Set(refs.0),
        occupancy_id: Set(refs.1),
        volume_id: Set(refs.2),
        kind: Set(kind.to_string()),
        value: Set(value),
        unit: Set(None),
        observed_at: Set(observed_at),
        notes: Set(None),
        deleted_at: Set(deleted.then(t0)),
    }
}

#[allow(clippy::too_many_arguments)]
fn addition_row(
    id: i64,
    uuid: Uuid,
    refs: (Option<i64>, Option<i64>, Option<i64>),
    addition_type: &str,
    lot: Option<Uuid>,
    amount: i64,
    unit: &str,
    added_at: DateTime<Utc>,
    deleted: bool,
) -> addition::ActiveModel {
    addition::ActiveModel {
        id: Set(id),
        uuid: Set(uuid),
        batch_id: Set(refs.0),
        occupancy_id: Set(refs.1),
        volume_id: Set(refs.2),
        addition_type: Set(addition_type.to_string()),
        stage: Set(None),
        inventory_lot_uuid: Set(lot),
        amount: Set(amount),
        amount_unit: Set(unit.to_string()),
        added_at: Set(added_at),
        notes: Set(None),
        deleted_at: Set(deleted.then(t0)),
    }
}

/// Seeds one fully recorded batch, a second unrelated batch and a soft-deleted batch.
///
/// Batch 1 is 10 bbl of wort that spends 14 days (less 4 hours) in fermenter FV-1,
/// loses 1 bbl on transfer and has been sitting in brite tank BT-1 since day 14
/// as 9 bbl of beer.
pub async fn seed(db: &DatabaseConnection) -> Seeded {
    style::Entity::insert(style::ActiveModel {
        id: Set(1),
        uuid: Set(Uuid::new_v4()),
        name: Set("American IPA".to_string()),
    })
    .exec(db)
    .await
    .unwrap();

    recipe::Entity::insert(recipe::ActiveModel {
        id: Set(1),
        uuid: Set(Uuid::new_v4()),
        name: Set("Cascade Crush".to_string()),
        style_id: Set(Some(1)),
        created_at: Set(t0()),
        deleted_at: Set(None),
    })
    .exec(db)
    .await
    .unwrap();

    let batch_uuid = Uuid::new_v4();
    let other_batch_uuid = Uuid::new_v4();
    let deleted_batch_uuid = Uuid::new_v4();
    batch::Entity::insert_many([
        batch_row(1, batch_uuid, "IPA-001", Some(1), false),
        batch_row(2, other_batch_uuid, "LAGER-002", None, false),
        batch_row(3, deleted_batch_uuid, "SOUR-003", None, true),
    ])
        .exec(db)
        .await
        .unwrap();

    brew_session::Entity::insert_many([
        brew_session::ActiveModel {
            id: Set(1),
            uuid: Set(Uuid::new_v4()),
            batch_id: Set(Some(1)),
            brewed_at: Set(at(Duration::days(1))),
            notes: Set(Some("second turn".to_string())),
            deleted_at: Set(None),
        },
        brew_session::ActiveModel {
            id: Set(2),
            uuid: Set(Uuid::new_v4()),
            batch_id: Set(Some(1)),
            brewed_at: Set(t0()),
            notes: Set(None),
            deleted_at: Set(None),
        },
        brew_session::ActiveModel {
            id: Set(3),
            uuid: Set(Uuid::new_v4()),
            batch_id: Set(Some(1)),
            brewed_at: Set(at(-Duration::days(3))),
            notes: Set(Some("aborted".to_string())),
            deleted_at: Set(Some(t0())),
        },
    ])
    .exec(db)
    .await
    .unwrap();

    batch_process_phase::Entity::insert_many([
        batch_process_phase::ActiveModel {
            id: Set(1),
            uuid: Set(Uuid::new_v4()),
            batch_id: Set(1),
            process_phase: Set("conditioning".to_string()),
            phase_at: Set(at(Duration::days(14))),
            deleted_at: Set(None),
        },
        batch_process_phase::ActiveModel {
            id: Set(2),
            uuid: Set(Uuid::new_v4()),
            batch_id: Set(1),
            process_phase: Set("fermenting".to_string()),
            phase_at: Set(at(Duration::hours(4))),
            deleted_at: Set(None),
        },
    ])
    .exec(db)
    .await
    .unwrap();

    volume::Entity::insert_many([
        volume_row(1, 10, "bbl"),
        volume_row(2, 1_056_130, "ml"),
        volume_row(3, 5, "bbl"),
    ])
    .exec(db)
    .await
    .unwrap();

    batch_volume::Entity::insert_many([
        batch_volume_row(1, 1, 1, "wort", at(Duration::hours(3))),
        batch_volume_row(2, 1, 2, "beer", at(Duration::days(14))),
        batch_volume_row(3, 2, 3, "wort", t0()),
    ])
    .exec(db)
    .await
    .unwrap();

    vessel::Entity::insert_many([
        vessel_row(1, "fermenter", "FV-1"),
        vessel_row(2, "brite_tank", "BT-1"),
        vessel_row(3, "fermenter", "FV-2"),
    ])
    .exec(db)
    .await
    .unwrap();

    occupancy::Entity::insert_many([
        occupancy_row(
            1,
            1,
            1,
            at(Duration::hours(4)),
            Some(at(Duration::days(14))),
            None,
        ),
        occupancy_row(2, 2, 2, at(Duration::days(14)), None, Some("carbonating")),
        occupancy_row(3, 3, 3, t0(), None, Some("fermenting")),
    ])
    .exec(db)
    .await
    .unwrap();

    transfer::Entity::insert_many([
        transfer_row(1, 1, 2, Some(1)),
        transfer_row(2, 3, 2, Some(2)),
        transfer_row(3, 1, 2, None),
    ])
    .exec(db)
    .await
    .unwrap();

    let ambiguous_measurement = Uuid::new_v4();
    measurement::Entity::insert_many([
        measurement_row(
            1,
            Uuid::new_v4(),
            (Some(1), None, None),
            "og",
            1.060,
            at(Duration::hours(3)),
            false,
        ),
        measurement_row(
            2,
            Uuid::new_v4(),
            (None, Some(1), None),
            "fg",
            1.012,
            at(Duration::days(10)),
            false,
        ),
        measurement_row(
            3,
            Uuid::new_v4(),
            (None, None, Some(2)),
            "ibu",
            60.0,
            at(Duration::days(14)),
            false,
        ),
        measurement_row(
            4,
            ambiguous_measurement,
            (Some(1), Some(1), None),
            "gravity",
            1.030,
            at(Duration::days(5)),
            false,
        ),
        measurement_row(
            5,
            Uuid::new_v4(),
            (Some(2), None, None),
            "og",
            1.048,
            t0(),
            false,
        ),
        measurement_row(
            6,
            Uuid::new_v4(),
            (Some(1), None, None),
            "abv",
            9.9,
            at(Duration::days(15)),
            true,
        ),
    ])
    .exec(db)
    .await
    .unwrap();

    let malt_lot = Uuid::new_v4();
    let hops_lot = Uuid::new_v4();
    let batch_addition = Uuid::new_v4();
    let occupancy_addition = Uuid::new_v4();
    let volume_addition = Uuid::new_v4();
    addition::Entity::insert_many([
        addition_row(
            1,
            batch_addition,
            (Some(1), None, None),
            "malt",
            Some(malt_lot),
            100,
            "kg",
            at(Duration::hours(1)),
            false,
        ),
        addition_row(
            2,
            occupancy_addition,
            (None, Some(1), None),
            "hops",
            Some(hops_lot),
            5,
            "kg",
            at(Duration::days(5)),
            false,
        ),
        addition_row(
            3,
            volume_addition,
            (None, None, Some(2)),
            "finings",
            None,
            2,
            "g",
            at(Duration::days(14)),
            false,
        ),
        addition_row(
            4,
            Uuid::new_v4(),
            (Some(2), None, None),
            "malt",
            Some(Uuid::new_v4()),
            80,
            "kg",
            t0(),
            false,
        ),
        addition_row(
            5,
            Uuid::new_v4(),
            (Some(1), None, None),
            "malt",
            Some(malt_lot),
            7,
            "kg",
            at(Duration::hours(2)),
            true,
        ),
    ])
    .exec(db)
    .await
    .unwrap();

    Seeded {
        batch_uuid,
        other_batch_uuid,
        deleted_batch_uuid,
        malt_lot,
        hops_lot,
        batch_addition,
        occupancy_addition,
        volume_addition,
        ambiguous_measurement,
    }
}

/// A live batch with no recorded activity at all.
pub async fn insert_empty_batch(db: &DatabaseConnection) -> Uuid {
    let uuid = Uuid::new_v4();
    batch::Entity::insert(batch_row(99, uuid, "EMPTY-099", None, false))
        .exec(db)
        .await
        .unwrap();
    uuid
}
