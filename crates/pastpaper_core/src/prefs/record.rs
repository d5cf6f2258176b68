//! Serialized preference record.
//!
//! # Responsibility
//! - Encode the three context fields into one opaque storage value.
//! - Decode stored values, classifying malformed or foreign data.
//!
//! # Invariants
//! - `decode(encode(x)) == x` for every context value.
//! - Blank ids decode as unset.

use crate::model::preferences::Preferences;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Current record layout version.
pub const RECORD_SCHEMA_VERSION: u32 = 1;

/// Why a stored value could not be used.
#[derive(Debug)]
pub enum RecordDecodeError {
    /// Value is not a JSON record of the expected shape.
    Malformed(serde_json::Error),
    /// Record was written by a different layout version.
    SchemaMismatch { found: u32 },
}

impl Display for RecordDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed preference record: {err}"),
            Self::SchemaMismatch { found } => write!(
                f,
                "preference record schema {found} does not match expected {RECORD_SCHEMA_VERSION}"
            ),
        }
    }
}

impl Error for RecordDecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::SchemaMismatch { .. } => None,
        }
    }
}

/// Persisted study context, detached from session metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceRecord {
    pub schema: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_id: Option<String>,
}

impl PreferenceRecord {
    /// Captures the context fields of a snapshot.
    pub fn from_preferences(prefs: &Preferences) -> Self {
        Self {
            schema: RECORD_SCHEMA_VERSION,
            university_id: prefs.university_id.clone(),
            stream_id: prefs.stream_id.clone(),
            college_id: prefs.college_id.clone(),
        }
    }

    /// Serializes the record into its storage form.
    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parses a storage value into a record.
    pub fn decode(raw: &str) -> Result<Self, RecordDecodeError> {
        let record: Self = serde_json::from_str(raw).map_err(RecordDecodeError::Malformed)?;
        if record.schema != RECORD_SCHEMA_VERSION {
            return Err(RecordDecodeError::SchemaMismatch {
                found: record.schema,
            });
        }
        Ok(Self {
            schema: record.schema,
            university_id: non_blank(record.university_id),
            stream_id: non_blank(record.stream_id),
            college_id: non_blank(record.college_id),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|id| !id.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{PreferenceRecord, RecordDecodeError, RECORD_SCHEMA_VERSION};
    use crate::model::preferences::Preferences;

    #[test]
    fn encode_then_decode_preserves_context() {
        let prefs = Preferences {
            university_id: Some("U1".to_string()),
            stream_id: Some("ST1".to_string()),
            college_id: None,
            ready: true,
            revision: 7,
        };
        let record = PreferenceRecord::from_preferences(&prefs);
        let raw = record.encode().expect("record should encode");
        assert!(!raw.contains("ready"));
        assert_eq!(PreferenceRecord::decode(&raw).unwrap(), record);
    }

    #[test]
    fn decode_rejects_garbage() {
        let err = PreferenceRecord::decode("{{{").expect_err("garbage must fail");
        assert!(matches!(err, RecordDecodeError::Malformed(_)));
    }

    #[test]
    fn decode_rejects_wrong_field_types() {
        let err = PreferenceRecord::decode(r#"{"schema":1,"universityId":42}"#)
            .expect_err("numeric id must fail");
        assert!(matches!(err, RecordDecodeError::Malformed(_)));
    }

    #[test]
    fn decode_rejects_other_schema_versions() {
        let raw = format!(r#"{{"schema":{},"universityId":"U1"}}"#, RECORD_SCHEMA_VERSION + 1);
        let err = PreferenceRecord::decode(&raw).expect_err("future schema must fail");
        assert!(matches!(err, RecordDecodeError::SchemaMismatch { found: 2 }));
    }

    #[test]
    fn decode_treats_blank_ids_as_unset() {
        let record = PreferenceRecord::decode(r#"{"schema":1,"universityId":"  "}"#).unwrap();
        assert_eq!(record.university_id, None);
    }
}
