//! Batch summary report assembly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{BatchSummaryRaw, OccupancyRecord, ProcessPhaseRecord};

use super::durations::batch_durations;
use super::measurements::key_measurements;
use super::volumes::volume_metrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BrewSessionSummary {
    pub uuid: Uuid,
    pub brewed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrentVessel {
    pub uuid: Uuid,
    pub name: String,
    pub vessel_type: String,
}

/// Current state, headline measurements, durations and volume metrics of a batch.
///
/// Only the identity fields are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BatchSummaryReport {
    pub batch_uuid: Uuid,
    pub short_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brew_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_uuid: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_name: Option<String>,
    pub brew_sessions: Vec<BrewSessionSummary>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_phase_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_vessel: Option<CurrentVessel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_occupancy_status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_gravity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_gravity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abv: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abv_calculated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibu: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fermentation_days: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brite_days: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grain_to_glass_days: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_volume_bbl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_volume_bbl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_loss_bbl: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loss_percentage: Option<f64>,

    pub generated_at: DateTime<Utc>,
}

/// Chronologically last process phase; first listed wins a tie.
pub fn current_phase(phases: &[ProcessPhaseRecord]) -> Option<&ProcessPhaseRecord> {
    phases.iter().fold(None, |best: Option<&ProcessPhaseRecord>, p| match best {
        Some(b) if p.phase_at <= b.phase_at => Some(b),
        _ => Some(p),
    })
}

/// First occupancy without an `out_at`.
pub fn active_occupancy(occupancies: &[OccupancyRecord]) -> Option<&OccupancyRecord> {
    occupancies.iter().find(|o| o.is_active())
}

pub fn assemble_summary(raw: &BatchSummaryRaw, now: DateTime<Utc>) -> BatchSummaryReport {
    let batch = &raw.batch;
    let phase = current_phase(&raw.process_phases);
    let occupancy = active_occupancy(&raw.occupancies);
    let measurements = key_measurements(&raw.measurements);
    let durations = batch_durations(&raw.occupancies, &raw.brew_sessions, &raw.process_phases, now);
    let volumes = volume_metrics(&raw.batch_volumes, &raw.occupancies, &raw.transfers);

    BatchSummaryReport {
        batch_uuid: batch.uuid,
        short_name: batch.short_name.clone(),
        brew_date: batch.brew_date,
        notes: batch.notes.clone(),
        recipe_uuid: batch.recipe_uuid,
        recipe_name: batch.recipe_name.clone(),
        style_name: batch.style_name.clone(),
        brew_sessions: raw
            .brew_sessions
            .iter()
            .map(|s| BrewSessionSummary {
                uuid: s.uuid,
                brewed_at: s.brewed_at,
                notes: s.notes.clone(),
            })
            .collect(),
        current_phase: phase.map(|p| p.process_phase.clone()),
        current_phase_at: phase.map(|p| p.phase_at),
        current_vessel: occupancy.map(|o| CurrentVessel {
            uuid: o.vessel.uuid,
            name: o.vessel.name.clone(),
            vessel_type: o.vessel.vessel_type.clone(),
        }),
        current_occupancy_status: occupancy.and_then(|o| o.status.clone()),
        original_gravity: measurements.original_gravity,
        final_gravity: measurements.final_gravity,
        abv: measurements.abv,
        abv_calculated: measurements.abv_calculated,
        ibu: measurements.ibu,
        fermentation_days: durations.fermentation_days,
        brite_days: durations.brite_days,
        grain_to_glass_days: durations.grain_to_glass_days,
        starting_volume_bbl: volumes.starting_volume_bbl,
        current_volume_bbl: volumes.current_volume_bbl,
        total_loss_bbl: volumes.total_loss_bbl,
        loss_percentage: volumes.loss_percentage,
        generated_at: now,
    }
}
