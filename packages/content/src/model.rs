//! # Course Content Model
//!
//! Typed tree for course content. A course exclusively owns its sections,
//! each section its lessons, and each quiz lesson its quiz and questions.
//! Every relationship is a strict tree; no entity is shared by reference
//! across two owners.
//!
//! ## Ordering
//!
//! Display order for sections and lessons is array position. `Lesson::order`
//! is stamped at creation (sibling count + 1) and is not renumbered by later
//! removals or moves. Question order is the exception: it stays 1-based and
//! contiguous after every removal.
//!
//! ## Persisted schema
//!
//! Serde renames map the Rust fields onto the canonical document-store
//! schema (`section_id`, `section_title`, `lesson_id`, `lesson_title`,
//! `video_duration`, `question_options`, ...). Lesson payloads are a closed
//! tagged union keyed by `lesson_type`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root course node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub sections: Vec<Section>,
}

/// A named, ordered grouping of lessons within a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Immutable once created
    #[serde(rename = "section_id")]
    pub id: String,
    #[serde(rename = "section_title")]
    pub title: String,
    pub lessons: Vec<Lesson>,
}

/// A single content unit of type document, video, or quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(rename = "lesson_id")]
    pub id: String,
    #[serde(rename = "lesson_title")]
    pub title: String,
    /// Assigned at creation; array position governs display order
    #[serde(rename = "lesson_order")]
    pub order: usize,
    #[serde(flatten)]
    pub content: LessonContent,
}

/// Lesson payload (exactly one variant per lesson)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "lesson_type", rename_all = "snake_case")]
pub enum LessonContent {
    /// A document reference
    Document { url: String },

    /// A hosted video with its runtime in seconds
    Video {
        url: String,
        #[serde(rename = "video_duration")]
        duration: u32,
    },

    /// An embedded assessment
    Quiz { quiz: Quiz },
}

/// An embedded assessment attached to a quiz-type lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    #[serde(rename = "quiz_id")]
    pub id: String,
    #[serde(rename = "quiz_title")]
    pub title: String,
    pub questions: Vec<Question>,
    /// Denormalized; kept equal to `questions.len()` by every mutation
    pub question_count: usize,
}

/// One quiz question with exactly four answer options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question_id")]
    pub id: String,
    /// 1-based, contiguous; renumbered after any deletion
    #[serde(rename = "question_order")]
    pub order: usize,
    #[serde(rename = "question_text")]
    pub text: String,
    #[serde(rename = "question_options")]
    pub options: [String; 4],
    /// Index into `options`, always in 0..=3
    #[serde(rename = "question_correct_answer")]
    pub correct_answer: u8,
    #[serde(
        rename = "question_explanation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub explanation: Option<String>,
}

/// External enrollment record linking a user to a course.
///
/// Read-only input to this core: constructed only by deserialization from
/// the document store, never built or mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseEnrollment {
    pub user_id: String,
    pub course_id: String,
    pub enrolled_at: DateTime<Utc>,
    pub completed: bool,
    /// Fraction of lessons completed, 0.0..=1.0
    pub progress: f32,
    /// Quiz id to best score
    #[serde(default)]
    pub quiz_scores: HashMap<String, f32>,
}

impl Course {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            sections: Vec::new(),
        }
    }

    pub fn find_section(&self, section_id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    pub fn find_section_mut(&mut self, section_id: &str) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.id == section_id)
    }

    pub fn section_index(&self, section_id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == section_id)
    }

    /// Derived, recomputed on every read
    pub fn lesson_count(&self) -> usize {
        self.sections.iter().map(Section::lesson_count).sum()
    }

    /// Derived, recomputed on every read
    pub fn total_duration(&self) -> u32 {
        self.sections.iter().map(Section::total_duration).sum()
    }

    /// Every content entity id in the tree, in document order.
    ///
    /// Used to resume the id generator when a stored course is reopened.
    pub fn entity_ids(&self) -> Vec<&str> {
        let mut ids = Vec::new();
        for section in &self.sections {
            ids.push(section.id.as_str());
            for lesson in &section.lessons {
                ids.push(lesson.id.as_str());
                if let LessonContent::Quiz { quiz } = &lesson.content {
                    ids.push(quiz.id.as_str());
                    for question in &quiz.questions {
                        ids.push(question.id.as_str());
                    }
                }
            }
        }
        ids
    }
}

impl Section {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            lessons: Vec::new(),
        }
    }

    pub fn find_lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }

    pub fn find_lesson_mut(&mut self, lesson_id: &str) -> Option<&mut Lesson> {
        self.lessons.iter_mut().find(|l| l.id == lesson_id)
    }

    pub fn lesson_index(&self, lesson_id: &str) -> Option<usize> {
        self.lessons.iter().position(|l| l.id == lesson_id)
    }

    /// Derived, recomputed on every read
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    /// Derived sum of lesson durations in seconds; video lessons contribute
    /// their runtime, document and quiz lessons contribute zero.
    pub fn total_duration(&self) -> u32 {
        self.lessons.iter().map(|l| l.content.duration()).sum()
    }
}

impl LessonContent {
    /// Seconds this payload contributes to a section's total duration
    pub fn duration(&self) -> u32 {
        match self {
            LessonContent::Video { duration, .. } => *duration,
            LessonContent::Document { .. } | LessonContent::Quiz { .. } => 0,
        }
    }

    /// Stable tag name, matching the persisted `lesson_type` discriminator
    pub fn kind(&self) -> &'static str {
        match self {
            LessonContent::Document { .. } => "document",
            LessonContent::Video { .. } => "video",
            LessonContent::Quiz { .. } => "quiz",
        }
    }
}

impl Quiz {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            questions: Vec::new(),
            question_count: 0,
        }
    }

    /// Restore the question-order invariant: orders become `[1..=n]` in
    /// array order and `question_count` matches the list length.
    pub fn renumber(&mut self) {
        for (i, question) in self.questions.iter_mut().enumerate() {
            question.order = i + 1;
        }
        self.question_count = self.questions.len();
    }
}

impl Question {
    /// A blank question: four empty options, correct answer defaulted to 0
    pub fn blank(id: impl Into<String>, order: usize) -> Self {
        Self {
            id: id.into(),
            order,
            text: String::new(),
            options: Default::default(),
            correct_answer: 0,
            explanation: None,
        }
    }
}

/// Trim a user-supplied title; `None` when empty after trimming
pub fn normalized_title(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
