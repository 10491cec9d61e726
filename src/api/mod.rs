//! Report API
//!
//! The dashboard talks to the reporting backend through the [`ReportApi`]
//! port. Each call issues exactly one HTTP request; nothing is retried or
//! cancelled.
//!
//! # Endpoints
//!
//! - `GET /api/reports` - List all reports, newest first
//! - `POST /api/reports` - Create a report (multipart, optional `photo`)
//! - `PUT /api/reports/{id}/status` - Set status (`{"status": "Active"|"Resolved"}`)
//! - `DELETE /api/reports/{id}` - Delete a report
//! - `GET /api/stats` - Weekly report volume (`{"weekly_data": [..7]}`)

pub mod dto;
#[cfg(feature = "native")]
pub mod http;

pub use dto::{CreateReportResponse, ErrorBody, StatsResponse, StatusUpdate};
#[cfg(feature = "native")]
pub use http::HttpReportApi;

use async_trait::async_trait;

use crate::error::ClientResult;
use crate::report::{NewReport, PhotoUpload, Report, ReportId, Status, WeeklyStats};

/// Operations the dashboard needs from the backend
///
/// Futures are not required to be `Send`: the browser adapter runs on the
/// single-threaded UI event loop.
#[async_trait(?Send)]
pub trait ReportApi {
    /// Fetch every report, in backend order
    async fn list_reports(&self) -> ClientResult<Vec<Report>>;

    /// Submit a new report with an optional photo
    async fn create_report(
        &self,
        report: &NewReport,
        photo: Option<&PhotoUpload>,
    ) -> ClientResult<Report>;

    /// Move a report to `status`
    async fn set_status(&self, id: &ReportId, status: Status) -> ClientResult<()>;

    /// Remove a report
    async fn delete_report(&self, id: &ReportId) -> ClientResult<()>;

    /// Reports created per weekday of the current week
    async fn weekly_stats(&self) -> ClientResult<WeeklyStats>;
}

/// URL builder for the report API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn reports(&self) -> String {
        format!("{}/reports", self.base)
    }

    pub fn report(&self, id: &ReportId) -> String {
        format!("{}/reports/{}", self.base, urlencoding::encode(id.as_str()))
    }

    pub fn status(&self, id: &ReportId) -> String {
        format!("{}/status", self.report(id))
    }

    pub fn stats(&self) -> String {
        format!("{}/stats", self.base)
    }
}

/// Multipart field names expected by `POST /reports`
pub mod fields {
    pub const ISSUE_TYPE: &str = "issue_type";
    pub const DESCRIPTION: &str = "description";
    pub const LOCATION: &str = "location";
    pub const PHOTO: &str = "photo";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let endpoints = Endpoints::new("http://localhost:5000/api/");
        assert_eq!(endpoints.reports(), "http://localhost:5000/api/reports");
        assert_eq!(
            endpoints.status(&ReportId::from(12)),
            "http://localhost:5000/api/reports/12/status"
        );
        assert_eq!(endpoints.stats(), "http://localhost:5000/api/stats");
    }

    #[test]
    fn test_opaque_ids_are_encoded() {
        let endpoints = Endpoints::new("/api");
        assert_eq!(
            endpoints.report(&ReportId::new("a/b c")),
            "/api/reports/a%2Fb%20c"
        );
    }
}
