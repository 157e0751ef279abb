//! Read-only sea-orm entities for the brewing tables this service aggregates.
//!
//! Rows are owned by the CRUD layer; nothing here is ever inserted or updated by
//! this crate outside of tests, so primary keys are declared without auto increment.

pub mod addition;
pub mod batch;
pub mod batch_process_phase;
pub mod batch_volume;
pub mod brew_session;
pub mod measurement;
pub mod occupancy;
pub mod recipe;
pub mod style;
pub mod transfer;
pub mod vessel;
pub mod volume;
