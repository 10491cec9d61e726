//! Report form
//!
//! Validation of the submission form and the single-slot photo attachment.

use crate::config::UploadConfig;
use crate::error::{FileError, ValidationError};
use crate::report::{NewReport, PhotoUpload, DEFAULT_LOCATION};

/// Raw form input as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportDraft {
    pub issue_type: String,
    pub description: String,
    pub location: String,
}

impl ReportDraft {
    /// Check required fields and normalise the draft for submission
    pub fn validate(&self) -> Result<NewReport, ValidationError> {
        let issue_type = self.issue_type.trim();
        if issue_type.is_empty() {
            return Err(ValidationError::MissingIssueType);
        }

        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::MissingDescription);
        }

        let location = match self.location.trim() {
            "" => DEFAULT_LOCATION,
            l => l,
        };

        Ok(NewReport {
            issue_type: issue_type.to_string(),
            description: description.to_string(),
            location: location.to_string(),
        })
    }
}

/// Metadata of a file picked or dropped by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoCandidate {
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
}

/// Size and type limits for photos
#[derive(Debug, Clone)]
pub struct PhotoPolicy {
    max_bytes: u64,
    allowed_types: Vec<String>,
}

impl PhotoPolicy {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            max_bytes: config.max_photo_bytes,
            allowed_types: config
                .allowed_mime_types
                .iter()
                .map(|t| t.to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn check(&self, candidate: &PhotoCandidate) -> Result<(), FileError> {
        if candidate.size > self.max_bytes {
            return Err(FileError::TooLarge {
                size: candidate.size,
                limit: self.max_bytes,
            });
        }

        let mime = candidate.mime_type.to_ascii_lowercase();
        if !self.allowed_types.contains(&mime) {
            return Err(FileError::UnsupportedType(candidate.mime_type.clone()));
        }

        Ok(())
    }
}

impl Default for PhotoPolicy {
    fn default() -> Self {
        Self::new(&UploadConfig::default())
    }
}

/// Handle for one asynchronous preview read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadTicket(u64);

/// What the photo area shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PhotoState {
    /// Placeholder with the upload prompt
    #[default]
    Empty,
    /// A valid file is being read for preview
    Reading { file_name: String },
    /// Thumbnail and file name replace the placeholder
    Preview {
        file_name: String,
        preview_url: String,
    },
}

impl PhotoState {
    pub fn has_file(&self) -> bool {
        !matches!(self, PhotoState::Empty)
    }

    /// A file was chosen but its contents are not ready to upload yet
    pub fn is_reading(&self) -> bool {
        matches!(self, PhotoState::Reading { .. })
    }
}

/// Single-slot photo attachment
///
/// Picker and drag-and-drop both funnel through [`PhotoSlot::select`].
/// Only the read started by the latest selection may fill the slot, and
/// only a file that passed the policy is ever held for upload.
#[derive(Debug, Default)]
pub struct PhotoSlot {
    policy: PhotoPolicy,
    state: PhotoState,
    pending: Option<PhotoCandidate>,
    upload: Option<PhotoUpload>,
    ticket: u64,
}

impl PhotoSlot {
    pub fn new(policy: PhotoPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    /// Validate a newly chosen file; an invalid file clears the slot
    pub fn select(&mut self, candidate: &PhotoCandidate) -> Result<ReadTicket, FileError> {
        self.ticket += 1;
        self.upload = None;

        if let Err(e) = self.policy.check(candidate) {
            self.state = PhotoState::Empty;
            self.pending = None;
            return Err(e);
        }

        self.state = PhotoState::Reading {
            file_name: candidate.file_name.clone(),
        };
        self.pending = Some(candidate.clone());
        Ok(ReadTicket(self.ticket))
    }

    /// A read finished with the file contents and a displayable URL.
    /// Returns false if the result was stale.
    pub fn preview_ready(&mut self, ticket: ReadTicket, preview_url: String, bytes: Vec<u8>) -> bool {
        if ticket.0 != self.ticket {
            return false;
        }

        let Some(candidate) = self.pending.take() else {
            return false;
        };
        self.state = PhotoState::Preview {
            file_name: candidate.file_name.clone(),
            preview_url,
        };
        self.upload = Some(PhotoUpload {
            file_name: candidate.file_name,
            mime_type: candidate.mime_type,
            bytes,
        });
        true
    }

    /// A read failed; clears the slot unless the read was stale
    pub fn read_failed(&mut self, ticket: ReadTicket) -> bool {
        if ticket.0 != self.ticket {
            return false;
        }
        self.clear();
        true
    }

    /// Remove the photo and restore the placeholder
    pub fn clear(&mut self) {
        self.ticket += 1;
        self.state = PhotoState::Empty;
        self.pending = None;
        self.upload = None;
    }

    pub fn state(&self) -> &PhotoState {
        &self.state
    }

    /// The validated photo to send with the next submission
    pub fn upload(&self) -> Option<&PhotoUpload> {
        self.upload.as_ref()
    }
}

pub const SUBMIT_LABEL: &str = "Submit Report";
pub const SUBMITTING_LABEL: &str = "Submitting...";

/// Submit button presentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitButton {
    pub busy: bool,
}

impl SubmitButton {
    pub fn label(&self) -> &'static str {
        if self.busy {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn disabled(&self) -> bool {
        self.busy
    }
}

/// Everything the form needs to draw besides the user's own input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormView {
    pub submit: SubmitButton,
    pub photo: PhotoState,
}

impl FormView {
    /// Submitting waits for both the previous request and the photo read
    pub fn submit_disabled(&self) -> bool {
        self.submit.disabled() || self.photo.is_reading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIB: u64 = 1024 * 1024;

    fn candidate(size: u64, mime: &str) -> PhotoCandidate {
        PhotoCandidate {
            file_name: "pothole.jpg".to_string(),
            mime_type: mime.to_string(),
            size,
        }
    }

    #[test]
    fn test_validate_required_fields() {
        let draft = ReportDraft {
            issue_type: "".to_string(),
            description: "overflowing bins".to_string(),
            location: String::new(),
        };
        assert_eq!(draft.validate(), Err(ValidationError::MissingIssueType));

        let draft = ReportDraft {
            issue_type: "Garbage Dumping".to_string(),
            description: "   ".to_string(),
            location: String::new(),
        };
        assert_eq!(draft.validate(), Err(ValidationError::MissingDescription));
    }

    #[test]
    fn test_validate_defaults_location() {
        let draft = ReportDraft {
            issue_type: " Garbage Dumping ".to_string(),
            description: " bins overflowing ".to_string(),
            location: "  ".to_string(),
        };
        let report = draft.validate().unwrap();
        assert_eq!(report.issue_type, "Garbage Dumping");
        assert_eq!(report.description, "bins overflowing");
        assert_eq!(report.location, "Not specified");
    }

    #[test]
    fn test_policy_limits() {
        let policy = PhotoPolicy::default();
        assert!(policy.check(&candidate(4 * MIB, "image/jpeg")).is_ok());
        assert!(policy.check(&candidate(5 * MIB, "image/png")).is_ok());
        assert!(matches!(
            policy.check(&candidate(6 * MIB, "image/jpeg")),
            Err(FileError::TooLarge { .. })
        ));
        assert!(matches!(
            policy.check(&candidate(MIB, "image/gif")),
            Err(FileError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_invalid_selection_clears_slot() {
        let mut slot = PhotoSlot::default();
        let ticket = slot.select(&candidate(MIB, "image/png")).unwrap();
        assert!(slot.preview_ready(ticket, "blob:preview".to_string(), vec![1, 2, 3]));
        assert!(slot.state().has_file());
        assert_eq!(slot.upload().unwrap().mime_type, "image/png");

        let err = slot.select(&candidate(6 * MIB, "image/jpeg")).unwrap_err();
        assert_eq!(err.to_string(), "File size must be less than 5MB");
        assert_eq!(slot.state(), &PhotoState::Empty);
        assert!(slot.upload().is_none());
    }

    #[test]
    fn test_stale_preview_ignored() {
        let mut slot = PhotoSlot::default();
        let first = slot.select(&candidate(MIB, "image/jpeg")).unwrap();
        let mut second_file = candidate(MIB, "image/png");
        second_file.file_name = "streetlight.png".to_string();
        let second = slot.select(&second_file).unwrap();

        assert!(slot.preview_ready(second, "blob:second".to_string(), vec![2]));
        assert!(!slot.preview_ready(first, "blob:first".to_string(), vec![1]));
        assert_eq!(
            slot.state(),
            &PhotoState::Preview {
                file_name: "streetlight.png".to_string(),
                preview_url: "blob:second".to_string(),
            }
        );
        assert_eq!(slot.upload().unwrap().bytes, vec![2]);
    }

    #[test]
    fn test_clear_restores_placeholder() {
        let mut slot = PhotoSlot::default();
        let ticket = slot.select(&candidate(MIB, "image/jpeg")).unwrap();
        slot.clear();
        assert!(!slot.preview_ready(ticket, "blob:late".to_string(), vec![]));
        assert_eq!(slot.state(), &PhotoState::Empty);
    }

    #[test]
    fn test_submit_button() {
        assert_eq!(SubmitButton { busy: false }.label(), "Submit Report");
        let busy = SubmitButton { busy: true };
        assert_eq!(busy.label(), "Submitting...");
        assert!(busy.disabled());
    }

    #[test]
    fn test_submit_waits_for_photo_read() {
        let mut slot = PhotoSlot::new(PhotoPolicy::default());
        let ticket = slot.select(&candidate(1024, "image/png")).unwrap();

        let view = FormView {
            submit: SubmitButton::default(),
            photo: slot.state().clone(),
        };
        assert!(view.photo.is_reading());
        assert!(view.submit_disabled());

        slot.preview_ready(ticket, "blob:x".to_string(), vec![1, 2, 3]);
        let view = FormView {
            submit: SubmitButton::default(),
            photo: slot.state().clone(),
        };
        assert!(!view.submit_disabled());
    }
}
