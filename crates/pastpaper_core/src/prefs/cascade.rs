//! Ownership guards and cascade rules for study-context mutations.
//!
//! # Responsibility
//! - Compute the next context for one mutation without side effects.
//! - Repair loaded contexts that violate ownership invariants.
//!
//! # Invariants
//! - A stream/college survives only while it belongs to the university.
//! - Guarded setters reject ids owned by another (or no) university.

use crate::catalog::Catalog;
use crate::model::preferences::Preferences;

/// One requested change to the study context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    SetUniversity(Option<String>),
    SetStream(Option<String>),
    SetCollege(Option<String>),
    Reset,
}

impl Mutation {
    /// Field name used in diagnostics.
    pub fn field(&self) -> &'static str {
        match self {
            Self::SetUniversity(_) => "university",
            Self::SetStream(_) => "stream",
            Self::SetCollege(_) => "college",
            Self::Reset => "all",
        }
    }
}

/// Returns the context after `mutation`, or `None` when it is rejected.
///
/// Only context fields change; `ready` and `revision` are copied through.
pub fn apply_mutation(
    catalog: &Catalog,
    current: &Preferences,
    mutation: &Mutation,
) -> Option<Preferences> {
    let mut next = current.clone();
    match mutation {
        Mutation::SetUniversity(None) | Mutation::Reset => {
            next.university_id = None;
            next.stream_id = None;
            next.college_id = None;
        }
        Mutation::SetUniversity(Some(university_id)) => {
            next.university_id = Some(university_id.clone());
            retain_owned(catalog, &mut next);
        }
        Mutation::SetStream(stream_id) => {
            if let Some(stream_id) = stream_id {
                let university_id = current.university_id.as_deref()?;
                if !catalog.stream_belongs_to(stream_id, university_id) {
                    return None;
                }
            }
            next.stream_id = stream_id.clone();
        }
        Mutation::SetCollege(college_id) => {
            if let Some(college_id) = college_id {
                let university_id = current.university_id.as_deref()?;
                if !catalog.college_belongs_to(college_id, university_id) {
                    return None;
                }
            }
            next.college_id = college_id.clone();
        }
    }
    Some(next)
}

/// Drops stream/college ids that do not belong to the selected university.
pub fn sanitize(catalog: &Catalog, mut prefs: Preferences) -> Preferences {
    retain_owned(catalog, &mut prefs);
    prefs
}

fn retain_owned(catalog: &Catalog, prefs: &mut Preferences) {
    let Some(university_id) = prefs.university_id.as_deref() else {
        prefs.stream_id = None;
        prefs.college_id = None;
        return;
    };
    if prefs
        .stream_id
        .as_deref()
        .is_some_and(|stream_id| !catalog.stream_belongs_to(stream_id, university_id))
    {
        prefs.stream_id = None;
    }
    if prefs
        .college_id
        .as_deref()
        .is_some_and(|college_id| !catalog.college_belongs_to(college_id, university_id))
    {
        prefs.college_id = None;
    }
}
