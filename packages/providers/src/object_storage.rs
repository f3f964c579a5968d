//! # Object Storage
//!
//! Interface to the hosted blob store used for lesson assets (documents,
//! thumbnails, uploaded video). Uploads resolve to a download URL; this
//! core never inspects the stored bytes.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::ProviderResult;

/// Hosted blob storage
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store bytes at a path and return the public download URL
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> ProviderResult<String>;

    /// Remove the object at a path (idempotent)
    async fn delete(&self, path: &str) -> ProviderResult<()>;
}

/// In-memory blob store for tests
#[derive(Default)]
pub struct MemoryObjectStorage {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn contains(&self, path: &str) -> bool {
        self.objects.read().await.contains_key(path)
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> ProviderResult<String> {
        self.objects
            .write()
            .await
            .insert(path.to_string(), bytes);
        Ok(format!("memory://{}", path))
    }

    async fn delete(&self, path: &str) -> ProviderResult<()> {
        self.objects.write().await.remove(path);
        Ok(())
    }
}
