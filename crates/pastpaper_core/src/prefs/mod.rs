//! Preference store: durable, observable study context.
//!
//! # Responsibility
//! - Own the single session copy of {university, stream, college}.
//! - Persist it through the storage port and notify subscribers.
//!
//! # Invariants
//! - Context fields change only through guarded mutators.
//! - Corrupt or missing persisted data degrades to the unset context.

pub mod cascade;
pub mod record;
pub mod store;

pub use cascade::Mutation;
pub use record::{PreferenceRecord, RecordDecodeError};
pub use store::{
    LoadState, MutationOutcome, PendingLoad, PreferenceStore, PreferenceStoreConfig,
    SubscriptionId, DEFAULT_STORAGE_KEY,
};
