//! Catalog reference records.
//!
//! # Responsibility
//! - Define the immutable value records of the university hierarchy.
//! - Keep wire naming (`camelCase`) stable for the bundled JSON fixture.
//!
//! # Invariants
//! - Records are never mutated after catalog construction.
//! - `Subject::stream_id == None` marks an unscoped subject.

use serde::{Deserialize, Serialize};

/// Root of the reference hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub id: String,
    pub name: String,
}

/// Study stream offered by exactly one university.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub id: String,
    pub university_id: String,
    pub name: String,
}

/// College affiliated with exactly one university.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct College {
    pub id: String,
    pub university_id: String,
    pub name: String,
}

/// Course subject, optionally scoped to one stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: String,
    /// `None` means visible regardless of stream scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,
    pub name: String,
    /// Course code, e.g. `CS301`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Free-form semester label, e.g. `Sem 5`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<String>,
}

impl Subject {
    /// Creates an unscoped subject with no code or semester.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            stream_id: None,
            name: name.into(),
            code: None,
            semester: None,
        }
    }

    /// Returns whether the subject is visible regardless of stream scope.
    pub fn is_unscoped(&self) -> bool {
        self.stream_id.is_none()
    }
}

/// Kind of uploaded material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaperType {
    /// Original exam question paper.
    #[default]
    #[serde(rename = "Question Paper")]
    QuestionPaper,
    /// Worked solutions for a paper.
    Solution,
    /// Study notes.
    Notes,
}

impl PaperType {
    /// Display label shared with the serialized catalog.
    pub fn label(self) -> &'static str {
        match self {
            Self::QuestionPaper => "Question Paper",
            Self::Solution => "Solution",
            Self::Notes => "Notes",
        }
    }

    /// Parses a display label back into a paper type.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim() {
            "Question Paper" => Some(Self::QuestionPaper),
            "Solution" => Some(Self::Solution),
            "Notes" => Some(Self::Notes),
            _ => None,
        }
    }
}

/// One paper attached to a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: String,
    pub subject_id: String,
    pub title: String,
    /// Serialized as `type` to match the fixture schema.
    #[serde(rename = "type")]
    pub kind: PaperType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_by: Option<String>,
    /// Opaque reference to the stored file (URL or path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_ref: Option<String>,
}
