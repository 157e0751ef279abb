//! Vessel residence and grain-to-glass durations.

use chrono::{DateTime, Utc};

use crate::models::{
    BrewSessionRecord, OccupancyRecord, ProcessPhaseRecord, BRITE_TANK_VESSEL, FERMENTER_VESSEL,
};

use super::units::round_to;

const SECONDS_PER_HOUR: f64 = 3_600.0;
const HOURS_PER_DAY: f64 = 24.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchDurations {
    pub fermentation_days: Option<f64>,
    pub brite_days: Option<f64>,
    pub grain_to_glass_days: Option<f64>,
}

fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_seconds() as f64 / SECONDS_PER_HOUR
}

fn positive_days(hours: f64) -> Option<f64> {
    (hours > 0.0).then(|| round_to(hours / HOURS_PER_DAY, 1))
}

/// Earliest `brewed_at` across all brew sessions.
pub fn first_brew_date(sessions: &[BrewSessionRecord]) -> Option<DateTime<Utc>> {
    sessions.iter().map(|s| s.brewed_at).min()
}

/// Computes residence time in fermenters and brite tanks, and total elapsed
/// time since the first brew.
///
/// Open occupancies run until `now`. Once a `finished` phase exists the
/// grain-to-glass clock stops at the last occupancy activity instead of `now`.
pub fn batch_durations(
    occupancies: &[OccupancyRecord],
    brew_sessions: &[BrewSessionRecord],
    process_phases: &[ProcessPhaseRecord],
    now: DateTime<Utc>,
) -> BatchDurations {
    let mut fermenter_hours = 0.0;
    let mut brite_hours = 0.0;
    let mut last_activity: Option<DateTime<Utc>> = None;

    for occupancy in occupancies {
        let end = occupancy.out_at.unwrap_or(now);
        let hours = hours_between(occupancy.in_at, end);

        match occupancy.vessel.vessel_type.as_str() {
            FERMENTER_VESSEL => fermenter_hours += hours,
            BRITE_TANK_VESSEL => brite_hours += hours,
            _ => {}
        }

        last_activity = Some(last_activity.map_or(end, |seen| seen.max(end)));
    }

    let finished = process_phases.iter().any(ProcessPhaseRecord::is_finished);
    let grain_to_glass_days = first_brew_date(brew_sessions).map(|first_brew| {
        let end = if finished {
            last_activity.unwrap_or(now)
        } else {
            now
        };
        round_to(hours_between(first_brew, end) / HOURS_PER_DAY, 1)
    });

    BatchDurations {
        fermentation_days: positive_days(fermenter_hours),
        brite_days: positive_days(brite_hours),
        grain_to_glass_days,
    }
}
