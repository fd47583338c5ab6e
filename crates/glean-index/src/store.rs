//! In-memory record store with inline search.
//!
//! [`MemoryStore`] keeps records of one type together with their token
//! sequences. Every write re-indexes the record before it is stored, and
//! searches evaluate compiled patterns against the stored tokens.

use std::{mem, sync::Arc};

use glean_query::{Pattern, compile, matches_all};
use serde_json::Value;
use tracing::debug;

use crate::{indexer::Indexer, registry::FieldRegistry};

/// A stored record and its tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    /// Position of the record in the store.
    pub id: usize,
    /// The record as written.
    pub record: Value,
    /// Tokens computed when the record was last written.
    pub tokens: Vec<String>,
}

/// Records of one type, indexed on write.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    /// Searchable fields of the stored type.
    registry: Arc<FieldRegistry>,
    /// Token producer used on every write.
    indexer: Indexer,
    /// Records in insertion order.
    records: Vec<StoredRecord>,
}

impl MemoryStore {
    /// Creates an empty store for records described by `registry`.
    pub fn new(registry: Arc<FieldRegistry>) -> Self {
        Self {
            registry,
            indexer: Indexer::new(),
            records: Vec::new(),
        }
    }

    /// Uses `indexer` for subsequent writes.
    pub fn with_indexer(mut self, indexer: Indexer) -> Self {
        self.indexer = indexer;
        self
    }

    /// Returns the registry records are indexed with.
    pub fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Indexes and stores `record`, returning its id.
    pub fn insert(&mut self, record: Value) -> usize {
        let id = self.records.len();
        let tokens = self.indexer.index(&record, &self.registry);
        self.records.push(StoredRecord { id, record, tokens });
        id
    }

    /// Re-indexes and replaces the record `id`, returning the previous record.
    ///
    /// Returns `None` and stores nothing if `id` is unknown.
    pub fn replace(&mut self, id: usize, record: Value) -> Option<Value> {
        let tokens = self.indexer.index(&record, &self.registry);
        let stored = self.records.get_mut(id)?;
        stored.tokens = tokens;
        Some(mem::replace(&mut stored.record, record))
    }

    /// Returns the record `id`.
    pub fn get(&self, id: usize) -> Option<&StoredRecord> {
        self.records.get(id)
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &StoredRecord> {
        self.records.iter()
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Compiles `query` against the store's fields and returns matching records.
    ///
    /// A blank query matches every record.
    pub fn search(&self, query: &str) -> Vec<&StoredRecord> {
        let patterns = compile(query, &*self.registry);
        debug!(query, patterns = patterns.len(), "compiled search query");
        self.search_patterns(&patterns)
    }

    /// Returns the records whose tokens satisfy every pattern.
    pub fn search_patterns(&self, patterns: &[Pattern]) -> Vec<&StoredRecord> {
        self.records
            .iter()
            .filter(|stored| matches_all(&stored.tokens, patterns))
            .collect()
    }
}
