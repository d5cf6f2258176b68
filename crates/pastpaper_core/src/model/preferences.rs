//! Study-context snapshot model.
//!
//! # Responsibility
//! - Define the immutable read view handed to subscribers and resolvers.
//!
//! # Invariants
//! - `stream_id`/`college_id` only reference entities owned by `university_id`.
//! - `ready` is `false` until the persisted value has been loaded.

/// Point-in-time read of the user's study context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Preferences {
    pub university_id: Option<String>,
    pub stream_id: Option<String>,
    pub college_id: Option<String>,
    /// Set once the initial load from durable storage has resolved.
    pub ready: bool,
    /// Monotonic count of applied mutations in this session.
    pub revision: u64,
}

impl Preferences {
    /// Returns whether no context field is set.
    pub fn is_unset(&self) -> bool {
        self.university_id.is_none() && self.stream_id.is_none() && self.college_id.is_none()
    }

    /// Compares only the persisted context fields, ignoring lifecycle metadata.
    pub fn same_context(&self, other: &Preferences) -> bool {
        self.university_id == other.university_id
            && self.stream_id == other.stream_id
            && self.college_id == other.college_id
    }
}
