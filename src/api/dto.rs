//! Request/Response DTOs for the report API

use serde::{Deserialize, Serialize};

use crate::report::{Report, Status, WeeklyStats};

/// Body of `PUT /reports/{id}/status`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: Status,
}

/// Error payload returned with non-2xx responses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// Extract the server message from a raw response body
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .map(|b| b.error)
            .filter(|m| !m.trim().is_empty())
    }
}

/// Response of `GET /stats`
#[derive(Debug, Clone, Deserialize)]
pub struct StatsResponse {
    pub weekly_data: WeeklyStats,
    #[serde(default)]
    pub total: Option<u32>,
    #[serde(default)]
    pub active: Option<u32>,
    #[serde(default)]
    pub resolved: Option<u32>,
}

/// Response of `POST /reports`
///
/// Accepts both a bare report and the `{success, message, report}` envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CreateReportResponse {
    Envelope {
        report: Report,
        #[serde(default)]
        message: Option<String>,
    },
    Bare(Report),
}

impl CreateReportResponse {
    pub fn into_report(self) -> Report {
        match self {
            CreateReportResponse::Envelope { report, .. } => report,
            CreateReportResponse::Bare(report) => report,
        }
    }

    /// Confirmation text, when the backend sent one
    pub fn message(&self) -> Option<&str> {
        match self {
            CreateReportResponse::Envelope { message, .. } => message.as_deref(),
            CreateReportResponse::Bare(_) => None,
        }
    }
}
