//! # In-Memory Store
//!
//! The reference storage adapter: a process-lifetime concurrent map.
//! Records survive until explicitly removed or the process restarts;
//! nothing is persisted.

use crate::domain::records::MfaRecord;
use crate::ports::outbound::MfaStore;
use dashmap::DashMap;

/// Concurrent in-memory record store.
///
/// Sharded locking gives safe concurrent access per identifier; concurrent
/// writers to the same identifier resolve last-write-wins.
#[derive(Debug, Default)]
pub struct InMemoryMfaStore {
    records: DashMap<String, MfaRecord>,
}

impl InMemoryMfaStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of identifiers with a record.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MfaStore for InMemoryMfaStore {
    fn get(&self, user_identifier: &str) -> Option<MfaRecord> {
        self.records.get(user_identifier).map(|r| r.clone())
    }

    fn put(&self, user_identifier: &str, record: MfaRecord) {
        self.records.insert(user_identifier.to_string(), record);
    }

    fn remove(&self, user_identifier: &str) -> bool {
        self.records.remove(user_identifier).is_some()
    }
}
