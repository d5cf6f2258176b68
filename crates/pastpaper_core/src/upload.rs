//! Upload submission validation.
//!
//! # Responsibility
//! - Check the minimal required fields of an upload request.
//! - Normalize optional metadata before handing it to a transport.
//!
//! # Invariants
//! - Only `subject_id` and `title` are required; no cross-field rules.
//! - An optional year, when present, must parse as a `u16`.
//! - Validation never persists anything.

use crate::model::catalog::PaperType;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// User-facing message for a rejected minimal upload.
pub const MISSING_REQUIRED_MESSAGE: &str = "Please select a subject and add a title.";
/// User-facing message for a year that is not a number.
pub const INVALID_YEAR_MESSAGE: &str = "Year must be a number, for example 2023.";

/// Raw upload form values as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadRequest {
    pub subject_id: String,
    pub title: String,
    pub kind: PaperType,
    pub year: Option<String>,
    pub exam: Option<String>,
    /// File name or reference placeholder; nothing is transferred.
    pub file_ref: Option<String>,
}

/// Rejected upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    MissingRequired {
        subject_missing: bool,
        title_missing: bool,
    },
    /// Year text that does not fit `Paper::year`.
    InvalidYear(String),
}

impl SubmissionError {
    /// Message suitable for direct display.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingRequired { .. } => MISSING_REQUIRED_MESSAGE,
            Self::InvalidYear(_) => INVALID_YEAR_MESSAGE,
        }
    }
}

impl Display for SubmissionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl Error for SubmissionError {}

/// Accepted upload, ready for a transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDraft {
    /// Client-side id for tracking this submission.
    pub draft_id: Uuid,
    pub subject_id: String,
    pub title: String,
    pub kind: PaperType,
    pub year: Option<u16>,
    pub exam: Option<String>,
    pub file_ref: Option<String>,
}

/// Validates required fields, trims optional ones and parses the year.
///
/// # Errors
/// - `SubmissionError::MissingRequired` when subject or title is blank.
/// - `SubmissionError::InvalidYear` when a non-blank year is not a number.
pub fn validate_upload(request: &UploadRequest) -> Result<UploadDraft, SubmissionError> {
    let subject_id = request.subject_id.trim();
    let title = request.title.trim();
    if subject_id.is_empty() || title.is_empty() {
        debug!(
            "event=upload_validate module=upload status=rejected subject_missing={} title_missing={}",
            subject_id.is_empty(),
            title.is_empty()
        );
        return Err(SubmissionError::MissingRequired {
            subject_missing: subject_id.is_empty(),
            title_missing: title.is_empty(),
        });
    }

    let year = parse_year(request.year.as_deref())?;

    Ok(UploadDraft {
        draft_id: Uuid::new_v4(),
        subject_id: subject_id.to_string(),
        title: title.to_string(),
        kind: request.kind,
        year,
        exam: optional_text(request.exam.as_deref()),
        file_ref: optional_text(request.file_ref.as_deref()),
    })
}

fn parse_year(value: Option<&str>) -> Result<Option<u16>, SubmissionError> {
    let Some(text) = optional_text(value) else {
        return Ok(None);
    };
    match text.parse::<u16>() {
        Ok(year) => Ok(Some(year)),
        Err(_) => {
            debug!(
                "event=upload_validate module=upload status=rejected error_code=invalid_year"
            );
            Err(SubmissionError::InvalidYear(text))
        }
    }
}

fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
