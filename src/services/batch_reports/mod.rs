//! Batch summary and cost reports.
//!
//! The calculators are pure functions over records gathered by the batch
//! store and the sibling service clients; `BatchReportService` does the
//! gathering.

pub mod costing;
pub mod durations;
pub mod measurements;
pub mod service;
pub mod summary;
pub mod units;
pub mod volumes;

pub use costing::{BatchCostReport, CostLineItem, CostSource, UncostedAddition};
pub use service::BatchReportService;
pub use summary::{BatchSummaryReport, BrewSessionSummary, CurrentVessel};
pub use units::{round_to, to_bbl, VolumeUnit};
