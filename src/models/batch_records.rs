use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::target::Target;

/// Process phase name that marks a batch as done.
pub const FINISHED_PHASE: &str = "finished";

/// Vessel types whose occupancy time is reported.
pub const FERMENTER_VESSEL: &str = "fermenter";
pub const BRITE_TANK_VESSEL: &str = "brite_tank";

/// Batch core record joined with its recipe and style names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRecord {
    pub id: i64,
    pub uuid: Uuid,
    pub short_name: String,
    pub brew_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub recipe_uuid: Option<Uuid>,
    pub recipe_name: Option<String>,
    pub style_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrewSessionRecord {
    pub uuid: Uuid,
    pub brewed_at: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessPhaseRecord {
    pub uuid: Uuid,
    pub process_phase: String,
    pub phase_at: DateTime<Utc>,
}

impl ProcessPhaseRecord {
    pub fn is_finished(&self) -> bool {
        self.process_phase == FINISHED_PHASE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    pub uuid: Uuid,
    /// `None` when the stored row violates the exactly-one-reference invariant
    pub target: Option<Target>,
    pub kind: String,
    pub value: f64,
    pub unit: Option<String>,
    pub observed_at: DateTime<Utc>,
}

/// Immutable liquid quantity in the unit's native granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeSnapshot {
    pub id: i64,
    pub uuid: Uuid,
    pub amount: i64,
    pub amount_unit: String,
}

/// Links a volume snapshot into a batch's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchVolumeRecord {
    pub uuid: Uuid,
    pub liquid_phase: String,
    pub phase_at: DateTime<Utc>,
    pub volume: VolumeSnapshot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VesselRecord {
    pub id: i64,
    pub uuid: Uuid,
    pub name: String,
    pub vessel_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyRecord {
    pub id: i64,
    pub uuid: Uuid,
    pub volume_id: i64,
    pub in_at: DateTime<Utc>,
    pub out_at: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub vessel: VesselRecord,
}

impl OccupancyRecord {
    pub fn is_active(&self) -> bool {
        self.out_at.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub uuid: Uuid,
    pub source_occupancy_id: i64,
    pub dest_occupancy_id: i64,
    pub loss_amount: Option<i64>,
    pub loss_unit: Option<String>,
}

/// Everything the summary needs about one batch, gathered in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummaryRaw {
    pub batch: BatchRecord,
    pub brew_sessions: Vec<BrewSessionRecord>,
    pub process_phases: Vec<ProcessPhaseRecord>,
    pub measurements: Vec<MeasurementRecord>,
    pub batch_volumes: Vec<BatchVolumeRecord>,
    pub occupancies: Vec<OccupancyRecord>,
    pub transfers: Vec<TransferRecord>,
}

impl BatchSummaryRaw {
    /// An otherwise empty aggregate for a batch with no recorded activity.
    pub fn empty(batch: BatchRecord) -> Self {
        Self {
            batch,
            brew_sessions: Vec::new(),
            process_phases: Vec::new(),
            measurements: Vec::new(),
            batch_volumes: Vec::new(),
            occupancies: Vec::new(),
            transfers: Vec::new(),
        }
    }

    pub fn volume_ids(&self) -> Vec<i64> {
        self.batch_volumes.iter().map(|bv| bv.volume.id).collect()
    }

    pub fn occupancy_ids(&self) -> Vec<i64> {
        self.occupancies.iter().map(|o| o.id).collect()
    }
}
