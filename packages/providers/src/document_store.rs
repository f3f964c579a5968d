//! # Document Store
//!
//! Interface to the hosted document database. All persistence schemas
//! belong to the provider; this core reads and writes opaque JSON values.
//!
//! The in-memory implementation backs the test suites, the same way a mock
//! filesystem stands in for the real one.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::error::{ProviderError, ProviderResult};

/// Well-known collection names
pub mod collections {
    pub const COURSES: &str = "courses";
    pub const ENROLLMENTS: &str = "enrollments";
    pub const USERS: &str = "users";
}

/// Hosted document database, keyed by collection and document id
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch one document; `None` when it does not exist
    async fn get(&self, collection: &str, id: &str) -> ProviderResult<Option<Value>>;

    /// Create or fully replace one document
    async fn set(&self, collection: &str, id: &str, data: Value) -> ProviderResult<()>;

    /// Shallow-merge fields into an existing document; fails when the
    /// document does not exist
    async fn update(&self, collection: &str, id: &str, partial: Value) -> ProviderResult<()>;

    /// Delete one document (idempotent)
    async fn delete(&self, collection: &str, id: &str) -> ProviderResult<()>;

    /// List every document in a collection as `(id, value)` pairs
    async fn list(&self, collection: &str) -> ProviderResult<Vec<(String, Value)>>;
}

/// In-memory document store for tests
#[derive(Default)]
pub struct MemoryDocumentStore {
    // BTreeMap keeps listings in a stable order
    collections: RwLock<HashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> ProviderResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn set(&self, collection: &str, id: &str, data: Value) -> ProviderResult<()> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), data);
        Ok(())
    }

    async fn update(&self, collection: &str, id: &str, partial: Value) -> ProviderResult<()> {
        let mut collections = self.collections.write().await;
        let doc = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| ProviderError::not_found(collection, id))?;

        match (doc.as_object_mut(), partial.as_object()) {
            (Some(existing), Some(fields)) => {
                for (key, value) in fields {
                    existing.insert(key.clone(), value.clone());
                }
            }
            // Non-object payloads replace the document wholesale
            _ => *doc = partial,
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> ProviderResult<()> {
        let mut collections = self.collections.write().await;
        if let Some(docs) = collections.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> ProviderResult<Vec<(String, Value)>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, value)| (id.clone(), value.clone()))
                    .collect()
            })
            .unwrap_or_default())
    }
}
