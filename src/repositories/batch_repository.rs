use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::entities::{
    addition, batch, batch_process_phase, batch_volume, brew_session, measurement, occupancy,
    recipe, style, transfer, vessel, volume,
};
use crate::errors::ServiceError;
use crate::models::{
    AdditionRecord, BatchRecord, BatchSummaryRaw, BatchVolumeRecord, BrewSessionRecord,
    MeasurementRecord, OccupancyRecord, ProcessPhaseRecord, Target, TransferRecord, VesselRecord,
    VolumeSnapshot,
};
use crate::repositories::{BatchStore, Repository};

use super::BaseRepository;

/// sea-orm backed `BatchStore`.
#[derive(Debug, Clone)]
pub struct SeaOrmBatchStore {
    base: BaseRepository,
}

impl SeaOrmBatchStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn find_batch(&self, batch_uuid: Uuid) -> Result<Option<batch::Model>, ServiceError> {
        Ok(batch::Entity::find()
            .filter(batch::Column::Uuid.eq(batch_uuid))
            .filter(batch::Column::DeletedAt.is_null())
            .one(self.base.get_db())
            .await?)
    }

    async fn batch_record(&self, model: batch::Model) -> Result<BatchRecord, ServiceError> {
        let db = self.base.get_db();

        let recipe = match model.recipe_id {
            Some(recipe_id) => recipe::Entity::find_by_id(recipe_id)
                .filter(recipe::Column::DeletedAt.is_null())
                .one(db)
                .await?,
            None => None,
        };

        let style = match recipe.as_ref().and_then(|r| r.style_id) {
            Some(style_id) => style::Entity::find_by_id(style_id).one(db).await?,
            None => None,
        };

        Ok(BatchRecord {
            id: model.id,
            uuid: model.uuid,
            short_name: model.short_name,
            brew_date: model.brew_date,
            notes: model.notes,
            recipe_uuid: recipe.as_ref().map(|r| r.uuid),
            recipe_name: recipe.map(|r| r.name),
            style_name: style.map(|s| s.name),
        })
    }

    async fn batch_volumes(
        &self,
        batch_id: i64,
    ) -> Result<Vec<(batch_volume::Model, Option<volume::Model>)>, ServiceError> {
        Ok(batch_volume::Entity::find()
            .filter(batch_volume::Column::BatchId.eq(batch_id))
            .filter(batch_volume::Column::DeletedAt.is_null())
            .find_also_related(volume::Entity)
            .order_by_asc(batch_volume::Column::PhaseAt)
            .order_by_asc(batch_volume::Column::Id)
            .all(self.base.get_db())
            .await?)
    }

    async fn occupancies_for_volumes(
        &self,
        volume_ids: &[i64],
    ) -> Result<Vec<(occupancy::Model, Option<vessel::Model>)>, ServiceError> {
        if volume_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(occupancy::Entity::find()
            .filter(occupancy::Column::VolumeId.is_in(volume_ids.iter().copied()))
            .filter(occupancy::Column::DeletedAt.is_null())
            .find_also_related(vessel::Entity)
            .order_by_asc(occupancy::Column::InAt)
            .order_by_asc(occupancy::Column::Id)
            .all(self.base.get_db())
            .await?)
    }

    async fn transfers_from(
        &self,
        occupancy_ids: &[i64],
    ) -> Result<Vec<transfer::Model>, ServiceError> {
        if occupancy_ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(transfer::Entity::find()
            .filter(transfer::Column::SourceOccupancyId.is_in(occupancy_ids.iter().copied()))
            .filter(transfer::Column::DeletedAt.is_null())
            .order_by_asc(transfer::Column::StartedAt)
            .order_by_asc(transfer::Column::Id)
            .all(self.base.get_db())
            .await?)
    }

    /// Volume and occupancy ids reachable from a batch.
    async fn linked_ids(&self, batch_id: i64) -> Result<(Vec<i64>, Vec<i64>), ServiceError> {
        let volume_ids = resolved_volume_ids(&self.batch_volumes(batch_id).await?);
        let occupancy_rows = self.occupancies_for_volumes(&volume_ids).await?;
        let occupancy_ids = resolved_occupancy_ids(&occupancy_rows);
        Ok((volume_ids, occupancy_ids))
    }

    async fn additions_linked(
        &self,
        batch_id: i64,
        occupancy_ids: &[i64],
        volume_ids: &[i64],
    ) -> Result<Vec<AdditionRecord>, ServiceError> {
        let additions = addition::Entity::find()
            .filter(linked_condition(
                addition::Column::BatchId,
                addition::Column::OccupancyId,
                addition::Column::VolumeId,
                batch_id,
                occupancy_ids,
                volume_ids,
            ))
            .filter(addition::Column::DeletedAt.is_null())
            .order_by_asc(addition::Column::AddedAt)
            .order_by_asc(addition::Column::Id)
            .all(self.base.get_db())
            .await?;

        Ok(additions.into_iter().map(Into::into).collect())
    }
}

// Links through a batch volume or occupancy only count when the joined row exists.
fn resolved_volume_ids(rows: &[(batch_volume::Model, Option<volume::Model>)]) -> Vec<i64> {
    rows.iter()
        .filter(|(_, vol)| vol.is_some())
        .map(|(bv, _)| bv.volume_id)
        .collect()
}

fn resolved_occupancy_ids(rows: &[(occupancy::Model, Option<vessel::Model>)]) -> Vec<i64> {
    rows.iter()
        .filter(|(_, vessel)| vessel.is_some())
        .map(|(o, _)| o.id)
        .collect()
}

/// Rows attached to the batch directly, or to one of its occupancies or volumes.
fn linked_condition<B, O, V>(
    batch_col: B,
    occupancy_col: O,
    volume_col: V,
    batch_id: i64,
    occupancy_ids: &[i64],
    volume_ids: &[i64],
) -> Condition
where
    B: ColumnTrait,
    O: ColumnTrait,
    V: ColumnTrait,
{
    let mut condition = Condition::any().add(batch_col.eq(batch_id));
    if !occupancy_ids.is_empty() {
        condition = condition.add(occupancy_col.is_in(occupancy_ids.iter().copied()));
    }
    if !volume_ids.is_empty() {
        condition = condition.add(volume_col.is_in(volume_ids.iter().copied()));
    }
    condition
}

fn target_or_warn(
    kind: &'static str,
    uuid: Uuid,
    batch_id: Option<i64>,
    occupancy_id: Option<i64>,
    volume_id: Option<i64>,
) -> Option<Target> {
    let target = Target::from_refs(batch_id, occupancy_id, volume_id);
    if target.is_none() {
        warn!(
            record = kind,
            uuid = %uuid,
            "record does not reference exactly one of batch, occupancy, volume"
        );
    }
    target
}

impl From<brew_session::Model> for BrewSessionRecord {
    fn from(m: brew_session::Model) -> Self {
        Self {
            uuid: m.uuid,
            brewed_at: m.brewed_at,
            notes: m.notes,
        }
    }
}

impl From<batch_process_phase::Model> for ProcessPhaseRecord {
    fn from(m: batch_process_phase::Model) -> Self {
        Self {
            uuid: m.uuid,
            process_phase: m.process_phase,
            phase_at: m.phase_at,
        }
    }
}

impl From<volume::Model> for VolumeSnapshot {
    fn from(m: volume::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            amount: m.amount,
            amount_unit: m.amount_unit,
        }
    }
}

impl From<vessel::Model> for VesselRecord {
    fn from(m: vessel::Model) -> Self {
        Self {
            id: m.id,
            uuid: m.uuid,
            name: m.name,
            vessel_type: m.vessel_type,
        }
    }
}

impl From<transfer::Model> for TransferRecord {
    fn from(m: transfer::Model) -> Self {
        Self {
            uuid: m.uuid,
            source_occupancy_id: m.source_occupancy_id,
            dest_occupancy_id: m.dest_occupancy_id,
            loss_amount: m.loss_amount,
            loss_unit: m.loss_unit,
        }
    }
}

impl From<measurement::Model> for MeasurementRecord {
    fn from(m: measurement::Model) -> Self {
        Self {
            target: target_or_warn("measurement", m.uuid, m.batch_id, m.occupancy_id, m.volume_id),
            uuid: m.uuid,
            kind: m.kind,
            value: m.value,
            unit: m.unit,
            observed_at: m.observed_at,
        }
    }
}

impl From<addition::Model> for AdditionRecord {
    fn from(m: addition::Model) -> Self {
        Self {
            target: target_or_warn("addition", m.uuid, m.batch_id, m.occupancy_id, m.volume_id),
            uuid: m.uuid,
            addition_type: m.addition_type,
            stage: m.stage,
            inventory_lot_uuid: m.inventory_lot_uuid,
            amount: m.amount,
            amount_unit: m.amount_unit,
            added_at: m.added_at,
        }
    }
}

#[async_trait]
impl BatchStore for SeaOrmBatchStore {
    #[instrument(skip(self), fields(batch_uuid = %batch_uuid))]
    async fn get_batch(&self, batch_uuid: Uuid) -> Result<Option<BatchRecord>, ServiceError> {
        match self.find_batch(batch_uuid).await? {
            Some(model) => Ok(Some(self.batch_record(model).await?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self), fields(batch_uuid = %batch_uuid))]
    async fn get_batch_summary_raw(
        &self,
        batch_uuid: Uuid,
    ) -> Result<Option<BatchSummaryRaw>, ServiceError> {
        let Some(model) = self.find_batch(batch_uuid).await? else {
            return Ok(None);
        };
        let batch = self.batch_record(model).await?;
        let db = self.base.get_db();

        let brew_sessions = brew_session::Entity::find()
            .filter(brew_session::Column::BatchId.eq(batch.id))
            .filter(brew_session::Column::DeletedAt.is_null())
            .order_by_asc(brew_session::Column::BrewedAt)
            .all(db)
            .await?;

        let process_phases = batch_process_phase::Entity::find()
            .filter(batch_process_phase::Column::BatchId.eq(batch.id))
            .filter(batch_process_phase::Column::DeletedAt.is_null())
            .order_by_asc(batch_process_phase::Column::PhaseAt)
            .order_by_asc(batch_process_phase::Column::Id)
            .all(db)
            .await?;

        let batch_volume_rows = self.batch_volumes(batch.id).await?;
        let volume_ids = resolved_volume_ids(&batch_volume_rows);

        let occupancy_rows = self.occupancies_for_volumes(&volume_ids).await?;
        let occupancy_ids = resolved_occupancy_ids(&occupancy_rows);

        let transfers = self.transfers_from(&occupancy_ids).await?;

        let measurements = measurement::Entity::find()
            .filter(linked_condition(
                measurement::Column::BatchId,
                measurement::Column::OccupancyId,
                measurement::Column::VolumeId,
                batch.id,
                &occupancy_ids,
                &volume_ids,
            ))
            .filter(measurement::Column::DeletedAt.is_null())
            .order_by_asc(measurement::Column::ObservedAt)
            .order_by_asc(measurement::Column::Id)
            .all(db)
            .await?;

        let batch_volumes = batch_volume_rows
            .into_iter()
            .filter_map(|(bv, vol)| match vol {
                Some(vol) => Some(BatchVolumeRecord {
                    uuid: bv.uuid,
                    liquid_phase: bv.liquid_phase,
                    phase_at: bv.phase_at,
                    volume: vol.into(),
                }),
                None => {
                    warn!(batch_volume = %bv.uuid, volume_id = bv.volume_id, "batch volume references a missing volume");
                    None
                }
            })
            .collect();

        let occupancies = occupancy_rows
            .into_iter()
            .filter_map(|(occ, vessel)| match vessel {
                Some(vessel) => Some(OccupancyRecord {
                    id: occ.id,
                    uuid: occ.uuid,
                    volume_id: occ.volume_id,
                    in_at: occ.in_at,
                    out_at: occ.out_at,
                    status: occ.status,
                    vessel: vessel.into(),
                }),
                None => {
                    warn!(occupancy = %occ.uuid, vessel_id = occ.vessel_id, "occupancy references a missing vessel");
                    None
                }
            })
            .collect();

        let raw = BatchSummaryRaw {
            batch,
            brew_sessions: brew_sessions.into_iter().map(Into::into).collect(),
            process_phases: process_phases.into_iter().map(Into::into).collect(),
            measurements: measurements.into_iter().map(Into::into).collect(),
            batch_volumes,
            occupancies,
            transfers: transfers.into_iter().map(Into::into).collect(),
        };

        debug!(
            sessions = raw.brew_sessions.len(),
            measurements = raw.measurements.len(),
            occupancies = raw.occupancies.len(),
            transfers = raw.transfers.len(),
            "loaded batch summary data"
        );

        Ok(Some(raw))
    }

    #[instrument(skip(self), fields(batch_uuid = %batch_uuid))]
    async fn list_additions_by_batch(
        &self,
        batch_uuid: Uuid,
    ) -> Result<Vec<AdditionRecord>, ServiceError> {
        let Some(model) = self.find_batch(batch_uuid).await? else {
            return Ok(Vec::new());
        };
        let (volume_ids, occupancy_ids) = self.linked_ids(model.id).await?;
        self.additions_linked(model.id, &occupancy_ids, &volume_ids).await
    }

    #[instrument(skip(self, raw), fields(batch_uuid = %raw.batch.uuid))]
    async fn list_additions_for_summary(
        &self,
        raw: &BatchSummaryRaw,
    ) -> Result<Vec<AdditionRecord>, ServiceError> {
        self.additions_linked(raw.batch.id, &raw.occupancy_ids(), &raw.volume_ids())
            .await
    }
}
