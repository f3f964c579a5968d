//! # Courseforge Editor
//!
//! Core editing engine for course content.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ presentation: gestures, forms, confirms     │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session + mutations                 │
//! │  - Modal lifecycle and pending deletes      │
//! │  - Apply mutations with validation          │
//! │  - Drag gestures resolved by identity       │
//! │  - Undo/redo over recorded inverses         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ content: the owned course tree              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The draft is the source of truth**: lesson counts and durations are
//!    derived views, recomputed on read
//! 2. **Identity over index**: operations address sections and lessons by
//!    id and resolve positions at apply time
//! 3. **Validate, then mutate**: a failed operation leaves no trace
//! 4. **Capability-gated**: one flag separates the instructor's editable
//!    tree from the student's static render
//!
//! ## Usage
//!
//! ```rust
//! use courseforge_content::model::Course;
//! use courseforge_editor::{EditSession, SectionFormData};
//!
//! let course = Course::new("algebra-101", "Algebra 101", "Linear equations");
//! let mut session = EditSession::new("session-1", course, true);
//!
//! session.open_section_form(None).unwrap();
//! session
//!     .submit_section_form(SectionFormData::new("Intro"))
//!     .unwrap();
//!
//! assert_eq!(session.course().sections.len(), 1);
//! ```

mod draft;
mod drag;
mod errors;
mod forms;
mod mutations;
mod session;
mod undo_stack;

pub use draft::CourseDraft;
pub use drag::{resolve_move, DragEnd, HasId};
pub use errors::EditorError;
pub use forms::{FormError, LessonFormData, SectionFormData};
pub use mutations::{Mutation, MutationError, MutationResult, QuestionField};
pub use session::{DeleteTarget, EditSession, ModalState};
pub use undo_stack::{MutationBatch, UndoStack};

// Re-export content types for convenience
pub use courseforge_content::model::{Course, Lesson, LessonContent, Question, Quiz, Section};
