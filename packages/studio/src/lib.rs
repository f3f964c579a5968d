//! # Courseforge Studio
//!
//! The application layer of the course marketplace: a cache of open course
//! drafts wired to the hosted providers, plus the read-side catalog
//! (browse, search delegation, enrollment lookups).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ studio: open sessions + persistence          │
//! │  - One EditSession per open course           │
//! │  - Load/save through the document store      │
//! │  - Fire-and-forget saves, failures logged    │
//! │  - Browse/search/enrollment queries          │
//! └─────────────────────────────────────────────┘
//!        ↓                    ↓
//! ┌───────────────┐  ┌─────────────────────────┐
//! │ editor        │  │ providers               │
//! │ (mutations,   │  │ (identity, documents,   │
//! │  sessions)    │  │  storage, search)       │
//! └───────────────┘  └─────────────────────────┘
//! ```

mod catalog;
mod error;
mod state;

pub use catalog::CourseSummary;
pub use error::StudioError;
pub use state::Studio;
