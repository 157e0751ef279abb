//! Volume unit conversion to US beer barrels.

use std::fmt;
use std::str::FromStr;

/// Milliliters per US beer barrel
const ML_PER_BBL: f64 = 117_347.77;
/// US fluid ounces per US beer barrel
const US_FL_OZ_PER_BBL: f64 = 3_968.0;
/// Imperial fluid ounces per US beer barrel
const UK_FL_OZ_PER_BBL: f64 = 4_135.68;

/// Volume units a `Volume` or `Transfer` loss can be recorded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VolumeUnit {
    Milliliter,
    UsFluidOunce,
    UkFluidOunce,
    Barrel,
}

impl VolumeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeUnit::Milliliter => "ml",
            VolumeUnit::UsFluidOunce => "us_fl_oz",
            VolumeUnit::UkFluidOunce => "uk_fl_oz",
            VolumeUnit::Barrel => "bbl",
        }
    }

    fn per_barrel(&self) -> f64 {
        match self {
            VolumeUnit::Milliliter => ML_PER_BBL,
            VolumeUnit::UsFluidOunce => US_FL_OZ_PER_BBL,
            VolumeUnit::UkFluidOunce => UK_FL_OZ_PER_BBL,
            VolumeUnit::Barrel => 1.0,
        }
    }

    /// Converts an amount in this unit to barrels, rounded to 2 decimals.
    pub fn to_bbl(&self, amount: i64) -> f64 {
        round_to(amount as f64 / self.per_barrel(), 2)
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported volume unit: {0}")]
pub struct UnsupportedUnit(pub String);

impl FromStr for VolumeUnit {
    type Err = UnsupportedUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ml" => Ok(VolumeUnit::Milliliter),
            "us_fl_oz" => Ok(VolumeUnit::UsFluidOunce),
            "uk_fl_oz" => Ok(VolumeUnit::UkFluidOunce),
            "bbl" => Ok(VolumeUnit::Barrel),
            other => Err(UnsupportedUnit(other.to_string())),
        }
    }
}

/// Converts a stored amount and unit string to barrels.
///
/// Returns `None` for any unit outside the supported set; callers leave the
/// dependent report field absent rather than failing.
pub fn to_bbl(amount: i64, unit: &str) -> Option<f64> {
    unit.parse::<VolumeUnit>().ok().map(|u| u.to_bbl(amount))
}

/// Rounds half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
