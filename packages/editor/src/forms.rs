//! # Modal Forms
//!
//! Packaged user input for the add/edit modals, with the local validation
//! the modals run before delegating to a mutation. A modal never mutates
//! state itself; on submit it hands one of these to the session, which
//! validates, dispatches, and closes.

use courseforge_content::model::{LessonContent, Quiz};
use courseforge_content::normalized_title;
use thiserror::Error;

/// Local validation failures, surfaced as blocking alerts
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("A {0} lesson requires a URL")]
    MissingUrl(&'static str),
}

/// Input from the add/edit section modal
#[derive(Debug, Clone)]
pub struct SectionFormData {
    pub title: String,
}

impl SectionFormData {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Returns the trimmed title, or the alert to raise
    pub fn validate(&self) -> Result<String, FormError> {
        normalized_title(&self.title).ok_or(FormError::EmptyTitle)
    }
}

/// Input from the add/edit lesson modal, keyed by the selected lesson type.
///
/// Changing the type rebuilds the payload from this form alone; fields from
/// a previously selected type are discarded, not merged.
#[derive(Debug, Clone)]
pub enum LessonFormData {
    Document { title: String, url: String },
    Video { title: String, url: String, duration: u32 },
    Quiz { title: String },
}

impl LessonFormData {
    pub fn title(&self) -> &str {
        match self {
            LessonFormData::Document { title, .. }
            | LessonFormData::Video { title, .. }
            | LessonFormData::Quiz { title } => title,
        }
    }

    /// Local validation: non-empty title, and a URL for document/video
    pub fn validate(&self) -> Result<(), FormError> {
        if normalized_title(self.title()).is_none() {
            return Err(FormError::EmptyTitle);
        }
        match self {
            LessonFormData::Document { url, .. } => {
                if url.trim().is_empty() {
                    return Err(FormError::MissingUrl("document"));
                }
            }
            LessonFormData::Video { url, .. } => {
                if url.trim().is_empty() {
                    return Err(FormError::MissingUrl("video"));
                }
            }
            LessonFormData::Quiz { .. } => {}
        }
        Ok(())
    }

    /// Build the lesson payload this form describes. A quiz starts empty
    /// with an unassigned id; the add mutation issues one.
    pub fn into_content(self) -> LessonContent {
        match self {
            LessonFormData::Document { url, .. } => LessonContent::Document {
                url: url.trim().to_string(),
            },
            LessonFormData::Video { url, duration, .. } => LessonContent::Video {
                url: url.trim().to_string(),
                duration,
            },
            LessonFormData::Quiz { title } => LessonContent::Quiz {
                quiz: Quiz::new("", title.trim()),
            },
        }
    }

    /// True when this form and an existing payload share the same variant
    pub fn matches_kind(&self, content: &LessonContent) -> bool {
        matches!(
            (self, content),
            (LessonFormData::Document { .. }, LessonContent::Document { .. })
                | (LessonFormData::Video { .. }, LessonContent::Video { .. })
                | (LessonFormData::Quiz { .. }, LessonContent::Quiz { .. })
        )
    }
}
