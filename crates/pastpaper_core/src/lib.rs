//! Core relevance engine for the past-paper browser.
//! This crate is the single source of truth for study-context invariants.

pub mod catalog;
pub mod db;
pub mod logging;
pub mod model;
pub mod prefs;
pub mod resolver;
pub mod storage;
pub mod upload;

pub use catalog::{Catalog, CatalogData, CatalogError};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{College, Paper, PaperType, Stream, Subject, University};
pub use model::preferences::Preferences;
pub use prefs::{
    LoadState, MutationOutcome, PreferenceStore, PreferenceStoreConfig, SubscriptionId,
};
pub use resolver::{
    browse, context_summary, scoped_subjects, search_subjects, subject_detail, subject_label,
    subject_paper_count,
};
pub use storage::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageError, StorageResult,
};
pub use upload::{validate_upload, SubmissionError, UploadDraft, UploadRequest};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
