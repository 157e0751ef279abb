use serde::{Deserialize, Serialize};

/// What a measurement or addition is attached to.
///
/// The store keeps three nullable reference columns; rows are only turned into a
/// `Target` when exactly one of them is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Target {
    Batch(i64),
    Occupancy(i64),
    Volume(i64),
}

impl Target {
    /// Builds a target from the three nullable reference columns.
    ///
    /// Returns `None` when zero or more than one reference is present.
    pub fn from_refs(
        batch_id: Option<i64>,
        occupancy_id: Option<i64>,
        volume_id: Option<i64>,
    ) -> Option<Self> {
        match (batch_id, occupancy_id, volume_id) {
            (Some(id), None, None) => Some(Target::Batch(id)),
            (None, Some(id), None) => Some(Target::Occupancy(id)),
            (None, None, Some(id)) => Some(Target::Volume(id)),
            _ => None,
        }
    }
}
