//! Picks "the" value of a measurement kind out of a batch's time series.

use crate::models::MeasurementRecord;

use super::units::round_to;

pub const KIND_OG: &str = "og";
pub const KIND_FG: &str = "fg";
pub const KIND_ABV: &str = "abv";
pub const KIND_IBU: &str = "ibu";

/// Standard homebrew ABV coefficient applied to the gravity drop
const ABV_FACTOR: f64 = 131.25;

/// Measurement with the greatest `observed_at` for `kind`.
///
/// The first of several measurements sharing the latest timestamp wins.
pub fn most_recent_of_kind<'a>(
    measurements: &'a [MeasurementRecord],
    kind: &str,
) -> Option<&'a MeasurementRecord> {
    measurements
        .iter()
        .filter(|m| m.kind == kind)
        .fold(None, |best: Option<&MeasurementRecord>, m| match best {
            Some(b) if m.observed_at <= b.observed_at => Some(b),
            _ => Some(m),
        })
}

/// Measurement with the least `observed_at` for `kind`.
///
/// The first of several measurements sharing the earliest timestamp wins.
pub fn earliest_of_kind<'a>(
    measurements: &'a [MeasurementRecord],
    kind: &str,
) -> Option<&'a MeasurementRecord> {
    measurements
        .iter()
        .filter(|m| m.kind == kind)
        .fold(None, |best: Option<&MeasurementRecord>, m| match best {
            Some(b) if m.observed_at >= b.observed_at => Some(b),
            _ => Some(m),
        })
}

/// Headline measurements of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KeyMeasurements {
    pub original_gravity: Option<f64>,
    pub final_gravity: Option<f64>,
    pub abv: Option<f64>,
    /// `Some(true)` when ABV was derived from OG/FG, `Some(false)` when measured
    pub abv_calculated: Option<bool>,
    pub ibu: Option<f64>,
}

/// Resolves OG, FG, ABV and IBU.
///
/// Only the explicit `og`/`fg` kinds feed the gravity fields; a generic
/// `gravity` series is ignored. An explicit `abv` measurement always takes
/// precedence over a value derived from OG and FG.
pub fn key_measurements(measurements: &[MeasurementRecord]) -> KeyMeasurements {
    let original_gravity = earliest_of_kind(measurements, KIND_OG).map(|m| m.value);
    let final_gravity = most_recent_of_kind(measurements, KIND_FG).map(|m| m.value);
    let ibu = most_recent_of_kind(measurements, KIND_IBU).map(|m| m.value);

    let (abv, abv_calculated) = match most_recent_of_kind(measurements, KIND_ABV) {
        Some(measured) => (Some(measured.value), Some(false)),
        None => match (original_gravity, final_gravity) {
            (Some(og), Some(fg)) => (Some(calculate_abv(og, fg)), Some(true)),
            _ => (None, None),
        },
    };

    KeyMeasurements {
        original_gravity,
        final_gravity,
        abv,
        abv_calculated,
        ibu,
    }
}

/// `(OG - FG) * 131.25`, rounded to 2 decimals.
pub fn calculate_abv(original_gravity: f64, final_gravity: f64) -> f64 {
    round_to((original_gravity - final_gravity) * ABV_FACTOR, 2)
}
