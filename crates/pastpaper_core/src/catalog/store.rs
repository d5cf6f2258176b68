//! Read-only catalog store and its lookup queries.
//!
//! # Responsibility
//! - Validate reference data once at construction.
//! - Answer id lookups and parent → child filter queries.
//!
//! # Invariants
//! - Every foreign key resolves to an existing entity.
//! - Ids are unique within their entity kind.
//! - Query results keep catalog insertion order.
//! - Unknown ids produce empty results, never errors.

use crate::model::catalog::{College, Paper, Stream, Subject, University};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static CATALOG_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("valid catalog id regex"));

const SAMPLE_CATALOG_JSON: &str = include_str!("sample_catalog.json");

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised while building a catalog from reference data.
#[derive(Debug)]
pub enum CatalogError {
    /// Id is blank or contains unsupported characters.
    InvalidId { kind: &'static str, id: String },
    /// Two entities of the same kind share one id.
    DuplicateId { kind: &'static str, id: String },
    /// Foreign key does not resolve to an existing parent.
    DanglingReference {
        kind: &'static str,
        id: String,
        field: &'static str,
        target: String,
    },
    /// Fixture document could not be decoded.
    Parse(serde_json::Error),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId { kind, id } => write!(f, "invalid {kind} id: `{id}`"),
            Self::DuplicateId { kind, id } => write!(f, "duplicate {kind} id: `{id}`"),
            Self::DanglingReference {
                kind,
                id,
                field,
                target,
            } => write!(f, "{kind} `{id}` references unknown {field} `{target}`"),
            Self::Parse(err) => write!(f, "invalid catalog document: {err}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Raw catalog document, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogData {
    #[serde(default)]
    pub universities: Vec<University>,
    #[serde(default)]
    pub streams: Vec<Stream>,
    #[serde(default)]
    pub colleges: Vec<College>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub papers: Vec<Paper>,
}

/// Validated, immutable reference data.
#[derive(Debug, Clone)]
pub struct Catalog {
    data: CatalogData,
    university_index: BTreeMap<String, usize>,
    stream_index: BTreeMap<String, usize>,
    college_index: BTreeMap<String, usize>,
    subject_index: BTreeMap<String, usize>,
    paper_index: BTreeMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog after validating ids and foreign keys.
    pub fn new(data: CatalogData) -> CatalogResult<Self> {
        let university_index = index_ids("university", data.universities.iter().map(|u| &u.id))?;
        let stream_index = index_ids("stream", data.streams.iter().map(|s| &s.id))?;
        let college_index = index_ids("college", data.colleges.iter().map(|c| &c.id))?;
        let subject_index = index_ids("subject", data.subjects.iter().map(|s| &s.id))?;
        let paper_index = index_ids("paper", data.papers.iter().map(|p| &p.id))?;

        for stream in &data.streams {
            require_ref(&university_index, "stream", &stream.id, "university", &stream.university_id)?;
        }
        for college in &data.colleges {
            require_ref(&university_index, "college", &college.id, "university", &college.university_id)?;
        }
        for subject in &data.subjects {
            if let Some(stream_id) = &subject.stream_id {
                require_ref(&stream_index, "subject", &subject.id, "stream", stream_id)?;
            }
        }
        for paper in &data.papers {
            require_ref(&subject_index, "paper", &paper.id, "subject", &paper.subject_id)?;
        }

        info!(
            "event=catalog_load module=catalog status=ok universities={} streams={} colleges={} subjects={} papers={}",
            data.universities.len(),
            data.streams.len(),
            data.colleges.len(),
            data.subjects.len(),
            data.papers.len()
        );

        Ok(Self {
            data,
            university_index,
            stream_index,
            college_index,
            subject_index,
            paper_index,
        })
    }

    /// Decodes and validates a JSON catalog document.
    pub fn from_json_str(json: &str) -> CatalogResult<Self> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data)
    }

    /// Builds the bundled sample catalog.
    ///
    /// # Errors
    /// - Same as [`Catalog::from_json_str`]; the fixture is covered by tests.
    pub fn sample() -> CatalogResult<Self> {
        Self::from_json_str(SAMPLE_CATALOG_JSON)
    }

    pub fn universities(&self) -> &[University] {
        &self.data.universities
    }

    pub fn streams(&self) -> &[Stream] {
        &self.data.streams
    }

    pub fn colleges(&self) -> &[College] {
        &self.data.colleges
    }

    /// Full subject list, unscoped subjects included.
    pub fn subjects(&self) -> &[Subject] {
        &self.data.subjects
    }

    pub fn papers(&self) -> &[Paper] {
        &self.data.papers
    }

    pub fn university(&self, id: &str) -> Option<&University> {
        lookup(&self.university_index, &self.data.universities, id)
    }

    pub fn stream(&self, id: &str) -> Option<&Stream> {
        lookup(&self.stream_index, &self.data.streams, id)
    }

    pub fn college(&self, id: &str) -> Option<&College> {
        lookup(&self.college_index, &self.data.colleges, id)
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        lookup(&self.subject_index, &self.data.subjects, id)
    }

    pub fn paper(&self, id: &str) -> Option<&Paper> {
        lookup(&self.paper_index, &self.data.papers, id)
    }

    /// Streams owned by `university_id`; empty when unset or unknown.
    pub fn streams_of(&self, university_id: Option<&str>) -> Vec<&Stream> {
        let Some(university_id) = university_id else {
            return Vec::new();
        };
        self.data
            .streams
            .iter()
            .filter(|stream| stream.university_id == university_id)
            .collect()
    }

    /// Colleges affiliated with `university_id`; empty when unset or unknown.
    pub fn colleges_of(&self, university_id: Option<&str>) -> Vec<&College> {
        let Some(university_id) = university_id else {
            return Vec::new();
        };
        self.data
            .colleges
            .iter()
            .filter(|college| college.university_id == university_id)
            .collect()
    }

    /// Subjects scoped to `stream_id`.
    ///
    /// Unscoped subjects are not included; callers wanting the "no stream"
    /// fallback ask for [`Catalog::subjects`] instead.
    pub fn subjects_of(&self, stream_id: &str) -> Vec<&Subject> {
        self.data
            .subjects
            .iter()
            .filter(|subject| subject.stream_id.as_deref() == Some(stream_id))
            .collect()
    }

    /// Papers attached to `subject_id`.
    pub fn papers_of(&self, subject_id: &str) -> Vec<&Paper> {
        self.data
            .papers
            .iter()
            .filter(|paper| paper.subject_id == subject_id)
            .collect()
    }

    /// Returns whether `stream_id` exists and belongs to `university_id`.
    pub fn stream_belongs_to(&self, stream_id: &str, university_id: &str) -> bool {
        self.stream(stream_id)
            .is_some_and(|stream| stream.university_id == university_id)
    }

    /// Returns whether `college_id` exists and belongs to `university_id`.
    pub fn college_belongs_to(&self, college_id: &str, university_id: &str) -> bool {
        self.college(college_id)
            .is_some_and(|college| college.university_id == university_id)
    }
}

fn index_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a String>,
) -> CatalogResult<BTreeMap<String, usize>> {
    let mut index = BTreeMap::new();
    for (position, id) in ids.enumerate() {
        if !CATALOG_ID_RE.is_match(id) {
            return Err(CatalogError::InvalidId {
                kind,
                id: id.clone(),
            });
        }
        if index.insert(id.clone(), position).is_some() {
            return Err(CatalogError::DuplicateId {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(index)
}

fn require_ref(
    index: &BTreeMap<String, usize>,
    kind: &'static str,
    id: &str,
    field: &'static str,
    target: &str,
) -> CatalogResult<()> {
    if index.contains_key(target) {
        return Ok(());
    }
    Err(CatalogError::DanglingReference {
        kind,
        id: id.to_string(),
        field,
        target: target.to_string(),
    })
}

fn lookup<'a, T>(index: &BTreeMap<String, usize>, items: &'a [T], id: &str) -> Option<&'a T> {
    index.get(id).and_then(|position| items.get(*position))
}
