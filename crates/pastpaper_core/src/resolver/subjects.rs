//! Stream scoping and free-text subject search.
//!
//! # Responsibility
//! - Derive the subject list visible for a study context.
//! - Filter subject lists by case-insensitive substring match.
//!
//! # Invariants
//! - Functions are pure; output order follows input/catalog order.
//! - An unset stream means "browse everything", not "empty scope".
//! - Unknown ids yield empty results.

use crate::catalog::Catalog;
use crate::model::catalog::{Paper, Subject};
use crate::model::preferences::Preferences;

const LABEL_SEPARATOR: &str = " • ";

/// Subjects visible for `prefs`.
///
/// With a stream selected only that stream's subjects are returned (unscoped
/// subjects are excluded); without one the full catalog is returned.
pub fn scoped_subjects<'a>(catalog: &'a Catalog, prefs: &Preferences) -> Vec<&'a Subject> {
    match prefs.stream_id.as_deref() {
        Some(stream_id) => catalog.subjects_of(stream_id),
        None => catalog.subjects().iter().collect(),
    }
}

/// Composes `"{code} • {name} • {semester}"`, skipping missing parts.
pub fn subject_label(subject: &Subject) -> String {
    let mut label = String::new();
    if let Some(code) = subject.code.as_deref() {
        label.push_str(code);
        label.push_str(LABEL_SEPARATOR);
    }
    label.push_str(&subject.name);
    if let Some(semester) = subject.semester.as_deref() {
        label.push_str(LABEL_SEPARATOR);
        label.push_str(semester);
    }
    label
}

/// Keeps subjects whose label contains `query`, ignoring case.
///
/// A blank query returns the input unchanged.
pub fn search_subjects<'a>(subjects: &[&'a Subject], query: &str) -> Vec<&'a Subject> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return subjects.to_vec();
    }
    subjects
        .iter()
        .copied()
        .filter(|subject| subject_label(subject).to_lowercase().contains(&needle))
        .collect()
}

/// Number of papers for `subject_id` across the whole catalog.
pub fn subject_paper_count(catalog: &Catalog, subject_id: &str) -> usize {
    catalog
        .papers()
        .iter()
        .filter(|paper| paper.subject_id == subject_id)
        .count()
}

/// Browse listing for one context and query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseResult<'a> {
    pub subjects: Vec<&'a Subject>,
    /// `true` when results are restricted to the selected stream.
    pub stream_scoped: bool,
    /// Trimmed query actually applied.
    pub query: String,
}

/// Scopes by context then filters by `query`.
pub fn browse<'a>(catalog: &'a Catalog, prefs: &Preferences, query: &str) -> BrowseResult<'a> {
    let scoped = scoped_subjects(catalog, prefs);
    BrowseResult {
        subjects: search_subjects(&scoped, query),
        stream_scoped: prefs.stream_id.is_some(),
        query: query.trim().to_string(),
    }
}

/// One subject with its papers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectDetail<'a> {
    pub subject: &'a Subject,
    pub papers: Vec<&'a Paper>,
}

impl SubjectDetail<'_> {
    pub fn paper_count(&self) -> usize {
        self.papers.len()
    }
}

/// Looks up a subject page; `None` for unknown ids.
pub fn subject_detail<'a>(catalog: &'a Catalog, subject_id: &str) -> Option<SubjectDetail<'a>> {
    let subject = catalog.subject(subject_id)?;
    Some(SubjectDetail {
        subject,
        papers: catalog.papers_of(subject_id),
    })
}
