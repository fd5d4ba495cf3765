//! API server HTTP handlers.

mod analyze;
mod reports;

pub use analyze::analyze_handler;
pub use reports::{create_report, delete_report, get_report, list_reports};
