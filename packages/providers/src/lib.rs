//! # Courseforge Providers
//!
//! Interfaces to the hosted collaborators this application delegates to:
//! identity, the document database, blob storage, and the search index.
//! Each trait has an in-memory implementation used by the test suites.
//!
//! Failure handling is deliberately thin: callers log provider errors and
//! continue. No retry, no backoff, no rollback of optimistic local state.

pub mod document_store;
pub mod error;
pub mod identity;
pub mod object_storage;
pub mod search;

pub use document_store::{collections, DocumentStore, MemoryDocumentStore};
pub use error::{ProviderError, ProviderResult};
pub use identity::{AuthCallback, AuthSubscription, AuthUser, IdentityProvider, StaticIdentity};
pub use object_storage::{MemoryObjectStorage, ObjectStorage};
pub use search::{CourseHit, CourseSearch, MemoryCourseSearch};
