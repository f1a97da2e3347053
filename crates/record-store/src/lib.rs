//! Record Store
//!
//! Generic create / count / delete-many access to named collections, with an
//! in-memory implementation and the sample data seed.

mod seed;
mod store;

pub use seed::{sample_vehicles, seed, SeedError, SeedReport, VEHICLES};
pub use store::{InMemoryStore, RecordStore, StoredRecord};

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Lock error: {0}")]
    LockPoisoned(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}
