//! Domain records for the past-paper catalog and the study context.
//!
//! # Responsibility
//! - Define canonical value types shared by catalog, preference and resolver
//!   layers.
//!
//! # Invariants
//! - Catalog records are immutable once loaded.
//! - `Preferences` is only produced by the preference store.

pub mod catalog;
pub mod preferences;
