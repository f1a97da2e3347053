//! Record Store Implementation

use crate::StoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// A record as held by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: i64,
    pub collection: String,
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

/// Minimal persistence surface used by the seed and by callers that only
/// need to write documents into named collections
pub trait RecordStore {
    /// Insert one record, returning it with its assigned id
    fn create(&self, collection: &str, data: Value) -> Result<StoredRecord, StoreError>;

    /// Number of records in a collection; unknown collections count zero
    fn count(&self, collection: &str) -> Result<usize, StoreError>;

    /// Remove every record of a collection, returning how many were removed
    fn delete_many(&self, collection: &str) -> Result<usize, StoreError>;
}

#[derive(Debug)]
struct Inner {
    collections: HashMap<String, Vec<StoredRecord>>,
    next_id: i64,
}

/// In-memory record store
#[derive(Debug)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        info!("Creating in-memory record store");
        Self {
            inner: Mutex::new(Inner {
                collections: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    /// All records of a collection, oldest first
    pub fn find_all(&self, collection: &str) -> Result<Vec<StoredRecord>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .collections
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    /// Insert any serializable value
    pub fn create_from<T: Serialize>(
        &self,
        collection: &str,
        value: &T,
    ) -> Result<StoredRecord, StoreError> {
        let data = serde_json::to_value(value)
            .map_err(|e| StoreError::SerializationError(e.to_string()))?;
        self.create(collection, data)
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore for InMemoryStore {
    fn create(&self, collection: &str, data: Value) -> Result<StoredRecord, StoreError> {
        let mut inner = self.lock()?;

        let record = StoredRecord {
            id: inner.next_id,
            collection: collection.to_string(),
            data,
            created_at: Utc::now(),
        };
        inner.next_id += 1;

        inner
            .collections
            .entry(collection.to_string())
            .or_default()
            .push(record.clone());
        debug!("Inserted record {} into {}", record.id, collection);

        Ok(record)
    }

    fn count(&self, collection: &str) -> Result<usize, StoreError> {
        let inner = self.lock()?;
        Ok(inner.collections.get(collection).map_or(0, Vec::len))
    }

    fn delete_many(&self, collection: &str) -> Result<usize, StoreError> {
        let mut inner = self.lock()?;
        let removed = inner
            .collections
            .remove(collection)
            .map_or(0, |records| records.len());
        debug!("Deleted {} records from {}", removed, collection);
        Ok(removed)
    }
}
