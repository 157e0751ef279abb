//! Engine input records.
//!
//! These are the resolved, joined forms the report engine works on. The
//! repository and the sibling service clients produce them; nothing downstream
//! touches sea-orm models or raw JSON.

pub mod batch_records;
pub mod ingredients;
pub mod target;

pub use batch_records::{
    BatchRecord, BatchSummaryRaw, BatchVolumeRecord, BrewSessionRecord, MeasurementRecord,
    OccupancyRecord, ProcessPhaseRecord, TransferRecord, VesselRecord, VolumeSnapshot,
    BRITE_TANK_VESSEL, FERMENTER_VESSEL, FINISHED_PHASE,
};
pub use ingredients::{AdditionRecord, IngredientLot, PurchaseOrderLineCost};
pub use target::Target;
