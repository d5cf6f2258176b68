//! Catalog store: static reference data loaded once at startup.
//!
//! # Responsibility
//! - Own universities, streams, colleges, subjects and papers.
//! - Expose pure lookup/filter queries for resolvers and views.
//!
//! # Invariants
//! - Catalog data is never mutated after construction.

pub mod store;

pub use store::{Catalog, CatalogData, CatalogError, CatalogResult};
