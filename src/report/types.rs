//! Report data types
//!
//! Core types for civic issue reports as served by the backend.

use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Location shown when the reporter left the field blank
pub const DEFAULT_LOCATION: &str = "Not specified";

/// Opaque, stable report identifier
///
/// The backend currently issues integers, but the client never interprets
/// the value: it is only compared, displayed and placed in URL paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ReportId(String);

impl ReportId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ReportId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ReportId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ReportId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => ReportId(n.to_string()),
            RawId::Text(s) => ReportId(s),
        })
    }
}

/// Lifecycle state of a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Active,
    Resolved,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Resolved => "Resolved",
        }
    }

    /// The status the row action moves a report to
    pub fn toggled(&self) -> Status {
        match self {
            Status::Active => Status::Resolved,
            Status::Resolved => Status::Active,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue category
///
/// Unknown labels are kept verbatim so the list can still show them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IssueType {
    GarbageDumping,
    BrokenStreetlight,
    WrongParking,
    PublicSpitting,
    Other(String),
}

impl IssueType {
    /// Categories offered in the submission form
    pub const ALL: [IssueType; 4] = [
        IssueType::GarbageDumping,
        IssueType::BrokenStreetlight,
        IssueType::WrongParking,
        IssueType::PublicSpitting,
    ];

    pub fn from_label(label: &str) -> Self {
        match label {
            "Garbage Dumping" => IssueType::GarbageDumping,
            "Broken Streetlight" => IssueType::BrokenStreetlight,
            "Wrong Parking" => IssueType::WrongParking,
            "Public Spitting" => IssueType::PublicSpitting,
            other => IssueType::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            IssueType::GarbageDumping => "Garbage Dumping",
            IssueType::BrokenStreetlight => "Broken Streetlight",
            IssueType::WrongParking => "Wrong Parking",
            IssueType::PublicSpitting => "Public Spitting",
            IssueType::Other(label) => label,
        }
    }

    /// Glyph shown when a report has no photo
    pub fn glyph(&self) -> &'static str {
        match self {
            IssueType::GarbageDumping => "🗑️",
            IssueType::BrokenStreetlight => "💡",
            IssueType::WrongParking => "🚗",
            IssueType::PublicSpitting => "⚠️",
            IssueType::Other(_) => "📋",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for IssueType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for IssueType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(IssueType::from_label(&label))
    }
}

/// A citizen-submitted issue report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub issue_type: IssueType,
    pub description: String,
    #[serde(default = "default_location", deserialize_with = "location_or_default")]
    pub location: String,
    pub status: Status,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Relative timestamp computed by the backend ("5 min ago")
    #[serde(default)]
    pub time_ago: String,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn location_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let location = Option::<String>::deserialize(deserializer)?;
    Ok(match location {
        Some(l) if !l.trim().is_empty() => l,
        _ => default_location(),
    })
}

impl Report {
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

/// Reports created per day of the current week, Monday first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyStats(pub [u32; 7]);

impl WeeklyStats {
    pub fn counts(&self) -> &[u32; 7] {
        &self.0
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Short day labels, "Mon" through "Sun"
    pub fn labels() -> Vec<String> {
        let mut day = Weekday::Mon;
        let mut labels = Vec::with_capacity(7);
        for _ in 0..7 {
            labels.push(day.to_string());
            day = day.succ();
        }
        labels
    }
}

/// A validated report ready to be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    pub issue_type: String,
    pub description: String,
    pub location: String,
}

/// A photo attached to a new report
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for PhotoUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_deserialize_backend_payload() {
        let json = r#"{
            "id": 7,
            "issue_type": "Broken Streetlight",
            "description": "Lamp out on 5th",
            "location": "5th Ave",
            "status": "Active",
            "image_filename": null,
            "image_url": null,
            "created_at": "2024-03-01T10:15:00.123456",
            "time_ago": "2 hours ago"
        }"#;

        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.id, ReportId::from(7));
        assert_eq!(report.issue_type, IssueType::BrokenStreetlight);
        assert_eq!(report.status, Status::Active);
        assert_eq!(report.time_ago, "2 hours ago");
        assert!(report.created_at.is_some());
    }

    #[test]
    fn test_missing_location_defaults() {
        let json = r#"{"id":"a1","issue_type":"Pothole","description":"d","status":"Resolved","location":null}"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.location, DEFAULT_LOCATION);
        assert_eq!(report.issue_type, IssueType::Other("Pothole".to_string()));
        assert_eq!(report.issue_type.glyph(), "📋");
    }

    #[test]
    fn test_unknown_status_rejected() {
        let json = r#"{"id":1,"issue_type":"x","description":"d","status":"Pending"}"#;
        assert!(serde_json::from_str::<Report>(json).is_err());
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(Status::Active.toggled(), Status::Resolved);
        assert_eq!(Status::Resolved.toggled().toggled(), Status::Resolved);
    }

    #[test]
    fn test_weekly_labels() {
        assert_eq!(
            WeeklyStats::labels(),
            vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
    }

    #[test]
    fn test_weekly_stats_requires_seven_days() {
        assert!(serde_json::from_str::<WeeklyStats>("[1,2,3]").is_err());
        let stats: WeeklyStats = serde_json::from_str("[0,1,0,2,0,0,3]").unwrap();
        assert_eq!(stats.total(), 6);
    }
}
