//! # Hosted Search
//!
//! Course discovery is delegated wholesale to a hosted search index behind
//! a single free-text endpoint. This core only forwards the query string
//! and renders the returned course summaries.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::ProviderResult;

/// One matched course summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseHit {
    pub course_id: String,
    pub title: String,
    pub description: String,
}

/// Hosted search index
#[async_trait]
pub trait CourseSearch: Send + Sync {
    /// Free-text search over the course catalog
    async fn search(&self, query: &str) -> ProviderResult<Vec<CourseHit>>;
}

/// Naive in-memory index for tests: case-insensitive substring matching
/// over titles and descriptions
#[derive(Default)]
pub struct MemoryCourseSearch {
    index: RwLock<Vec<CourseHit>>,
}

impl MemoryCourseSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace one course in the index
    pub async fn index_course(&self, hit: CourseHit) {
        let mut index = self.index.write().await;
        index.retain(|existing| existing.course_id != hit.course_id);
        index.push(hit);
    }
}

#[async_trait]
impl CourseSearch for MemoryCourseSearch {
    async fn search(&self, query: &str) -> ProviderResult<Vec<CourseHit>> {
        let index = self.index.read().await;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(index.clone());
        }
        Ok(index
            .iter()
            .filter(|hit| {
                hit.title.to_lowercase().contains(&needle)
                    || hit.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }
}
