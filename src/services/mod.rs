pub mod batch_reports;
pub mod remote;
