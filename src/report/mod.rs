//! Report model
//!
//! Client-side view of the records owned by the reporting backend.

mod types;

pub use types::{
    IssueType, NewReport, PhotoUpload, Report, ReportId, Status, WeeklyStats, DEFAULT_LOCATION,
};
