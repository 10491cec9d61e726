//! Report list view-model
//!
//! Maps the snapshot to one row per report, in backend order. Text fields
//! are kept raw here; each rendering backend is responsible for escaping.

use crate::confirm::{ConfirmBoard, ConfirmState};
use crate::report::{Report, ReportId, Status};

/// Thumbnail area of a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Media {
    /// Uploaded photo, falling back to the glyph if it fails to load
    Photo {
        url: String,
        alt: String,
        fallback_glyph: &'static str,
    },
    Glyph(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub class: &'static str,
}

impl StatusBadge {
    fn for_status(status: Status) -> Self {
        match status {
            Status::Active => StatusBadge {
                label: "Active",
                class: "status-active",
            },
            Status::Resolved => StatusBadge {
                label: "Resolved",
                class: "status-resolved",
            },
        }
    }
}

/// The status action of a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Active report: request status=Resolved
    Resolve,
    /// Resolved report: request status=Active
    Reopen,
}

impl RowAction {
    pub fn for_status(status: Status) -> Self {
        match status {
            Status::Active => RowAction::Resolve,
            Status::Resolved => RowAction::Reopen,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Resolve => "✓ Resolve",
            RowAction::Reopen => "↺ Reopen",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RowAction::Resolve => "Mark as Resolved",
            RowAction::Reopen => "Reopen",
        }
    }

    /// Status requested when the control is activated
    pub fn target(&self) -> Status {
        match self {
            RowAction::Resolve => Status::Resolved,
            RowAction::Reopen => Status::Active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteControl {
    pub label: &'static str,
    pub armed: bool,
}

impl From<ConfirmState> for DeleteControl {
    fn from(state: ConfirmState) -> Self {
        DeleteControl {
            label: state.label(),
            armed: state.is_armed(),
        }
    }
}

/// One rendered report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub id: ReportId,
    pub media: Media,
    pub title: String,
    pub badge: StatusBadge,
    pub excerpt: String,
    pub location: String,
    pub time_ago: String,
    pub action: RowAction,
    pub delete: DeleteControl,
}

impl ReportRow {
    pub fn build(report: &Report, confirm: ConfirmState, preview_chars: usize) -> Self {
        let glyph = report.issue_type.glyph();
        let media = match report.image_url.as_deref().filter(|u| is_safe_image_url(u)) {
            Some(url) => Media::Photo {
                url: url.to_string(),
                alt: report.issue_type.label().to_string(),
                fallback_glyph: glyph,
            },
            None => Media::Glyph(glyph),
        };

        ReportRow {
            id: report.id.clone(),
            media,
            title: report.issue_type.label().to_string(),
            badge: StatusBadge::for_status(report.status),
            excerpt: truncate(&report.description, preview_chars),
            location: report.location.clone(),
            time_ago: report.time_ago.clone(),
            action: RowAction::for_status(report.status),
            delete: confirm.into(),
        }
    }
}

/// The whole list, plus whether the empty state should show instead
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<ReportRow>,
}

impl ListView {
    pub fn build(reports: &[Report], confirms: &ConfirmBoard, preview_chars: usize) -> Self {
        ListView {
            rows: reports
                .iter()
                .map(|r| ReportRow::build(r, confirms.state(&r.id), preview_chars))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Shorten `text` to at most `max_chars` characters, ending in "…"
pub fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Only http(s) and same-origin paths may become image sources
fn is_safe_image_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("https://")
        || lower.starts_with("http://")
        || (lower.starts_with('/') && !lower.starts_with("//"))
}
