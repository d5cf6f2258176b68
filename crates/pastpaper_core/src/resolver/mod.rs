//! Relevance resolver: pure derivations over catalog + context snapshot.
//!
//! # Responsibility
//! - Map a preferences snapshot to the subjects and papers worth showing.
//! - Stay callable outside any render cycle.
//!
//! # Invariants
//! - No function here has side effects or fails on unknown ids.

pub mod subjects;
pub mod summary;

pub use subjects::{
    browse, scoped_subjects, search_subjects, subject_detail, subject_label, subject_paper_count,
    BrowseResult, SubjectDetail,
};
pub use summary::{context_summary, ContextSummary};
