//! Starting/current volume and cumulative transfer loss.

use std::collections::HashSet;

use crate::models::{BatchVolumeRecord, OccupancyRecord, TransferRecord};

use super::units::{round_to, to_bbl};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VolumeMetrics {
    pub starting_volume_bbl: Option<f64>,
    pub current_volume_bbl: Option<f64>,
    pub total_loss_bbl: Option<f64>,
    pub loss_percentage: Option<f64>,
}

/// Batch volume with the earliest `phase_at`; first listed wins a tie.
pub fn starting_batch_volume(volumes: &[BatchVolumeRecord]) -> Option<&BatchVolumeRecord> {
    volumes.iter().fold(None, |best: Option<&BatchVolumeRecord>, v| match best {
        Some(b) if v.phase_at >= b.phase_at => Some(b),
        _ => Some(v),
    })
}

/// Batch volume with the latest `phase_at`; first listed wins a tie.
pub fn current_batch_volume(volumes: &[BatchVolumeRecord]) -> Option<&BatchVolumeRecord> {
    volumes.iter().fold(None, |best: Option<&BatchVolumeRecord>, v| match best {
        Some(b) if v.phase_at <= b.phase_at => Some(b),
        _ => Some(v),
    })
}

fn volume_bbl(record: &BatchVolumeRecord) -> Option<f64> {
    let converted = to_bbl(record.volume.amount, &record.volume.amount_unit);
    if converted.is_none() {
        tracing::warn!(
            volume = %record.volume.uuid,
            unit = %record.volume.amount_unit,
            "volume recorded in an unsupported unit"
        );
    }
    converted
}

/// Sum of transfer losses, in barrels, for transfers leaving one of the
/// batch's occupancies.
///
/// Transfers without both loss fields, or with an unsupported loss unit,
/// contribute nothing.
pub fn total_transfer_loss_bbl(
    transfers: &[TransferRecord],
    occupancies: &[OccupancyRecord],
) -> f64 {
    let batch_occupancies: HashSet<i64> = occupancies.iter().map(|o| o.id).collect();

    transfers
        .iter()
        .filter(|t| batch_occupancies.contains(&t.source_occupancy_id))
        .filter_map(|t| match (t.loss_amount, t.loss_unit.as_deref()) {
            (Some(amount), Some(unit)) => to_bbl(amount, unit),
            _ => None,
        })
        .sum()
}

pub fn volume_metrics(
    batch_volumes: &[BatchVolumeRecord],
    occupancies: &[OccupancyRecord],
    transfers: &[TransferRecord],
) -> VolumeMetrics {
    let starting_volume_bbl = starting_batch_volume(batch_volumes).and_then(volume_bbl);
    let current_volume_bbl = current_batch_volume(batch_volumes).and_then(volume_bbl);

    let loss = total_transfer_loss_bbl(transfers, occupancies);
    let total_loss_bbl = (loss > 0.0).then(|| round_to(loss, 2));

    let loss_percentage = match (starting_volume_bbl, total_loss_bbl) {
        (Some(start), Some(loss)) if start > 0.0 => Some(round_to(loss / start * 100.0, 1)),
        _ => None,
    };

    VolumeMetrics {
        starting_volume_bbl,
        current_volume_bbl,
        total_loss_bbl,
        loss_percentage,
    }
}
