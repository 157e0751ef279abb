pub mod batch_reports;
pub mod common;
pub mod health;
