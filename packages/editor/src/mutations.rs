//! # Course Content Mutations
//!
//! High-level semantic operations on a course content tree.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation represents a semantic operation
//! 2. **Validated**: All mutations validate structural constraints first and
//!    leave the course untouched on failure
//! 3. **Identity-addressed**: Sections and lessons are located by id, never
//!    by a captured index, so reorder and delete stay correct when positions
//!    shift between gesture start and gesture end
//! 4. **Invertible**: Every mutation can produce its inverse before being
//!    applied, which powers the undo stack
//!
//! ## Mutation Semantics
//!
//! ### Move
//! - Atomic relocation within the owning list (section list or one
//!   section's lesson list)
//! - Permutation only: nothing created or destroyed, entity internals
//!   unchanged
//!
//! ### Remove
//! - Section/lesson removal leaves sibling order fields alone; array
//!   position governs display
//! - Question removal renumbers survivors to a contiguous 1-based order
//!
//! ### Insert
//! - Positional insert of a fully-built entity (rare - the undo/restore
//!   path; interactive creation goes through the Add operations)

use courseforge_content::model::{Course, Lesson, LessonContent, Question, Quiz, Section};
use courseforge_content::{normalized_title, IdGenerator};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Replace the course title and description
    UpdateCourseInfo { title: String, description: String },

    /// Append a new empty section with a fresh id
    AddSection { title: String },

    /// Replace a section's title, leaving its id and lessons untouched
    RenameSection { section_id: String, title: String },

    /// Remove a section and every lesson it owns
    RemoveSection { section_id: String },

    /// Move a section to a new position in the section list
    MoveSection { section_id: String, index: usize },

    /// Insert a fully-built section at a position (undo/restore path)
    InsertSection { index: usize, section: Section },

    /// Append a lesson to a section; order is stamped as sibling count + 1
    AddLesson {
        section_id: String,
        title: String,
        content: LessonContent,
    },

    /// Merge partial fields into a lesson. A present `content` replaces the
    /// payload wholesale, so a type change cannot leak prior-variant fields.
    EditLesson {
        section_id: String,
        lesson_id: String,
        title: Option<String>,
        content: Option<LessonContent>,
    },

    /// Remove a lesson from its owning section
    RemoveLesson {
        section_id: String,
        lesson_id: String,
    },

    /// Move a lesson within its owning section's list
    MoveLesson {
        section_id: String,
        lesson_id: String,
        index: usize,
    },

    /// Insert a fully-built lesson at a position (undo/restore path)
    InsertLesson {
        section_id: String,
        index: usize,
        lesson: Lesson,
    },

    /// Append a blank question (four empty options, correct answer 0)
    AddQuestion {
        section_id: String,
        lesson_id: String,
    },

    /// Field-scoped update of one question
    UpdateQuestion {
        section_id: String,
        lesson_id: String,
        index: usize,
        field: QuestionField,
    },

    /// Remove the question at a position and renumber the survivors
    RemoveQuestion {
        section_id: String,
        lesson_id: String,
        index: usize,
    },

    /// Insert a fully-built question at a position (undo path)
    InsertQuestion {
        section_id: String,
        lesson_id: String,
        index: usize,
        question: Question,
    },
}

/// One editable question field. Option edits always carry the full
/// 4-element array; there is no sub-index operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum QuestionField {
    Text(String),
    Options([String; 4]),
    CorrectAnswer(u8),
    Explanation(Option<String>),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Section not found: {0}")]
    SectionNotFound(String),

    #[error("Lesson not found: {0}")]
    LessonNotFound(String),

    #[error("Question index out of range: {0}")]
    QuestionOutOfRange(usize),

    #[error("Lesson {0} is not a quiz")]
    NotAQuiz(String),

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Correct answer index must be in 0..=3, got {0}")]
    InvalidCorrectAnswer(u8),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),
}

/// Result of applying a mutation
#[derive(Debug, Clone)]
pub struct MutationResult {
    /// New draft version number
    pub version: u64,

    /// Id of the entity an Add/Insert operation produced
    pub created_id: Option<String>,
}

impl Mutation {
    /// Apply mutation to the course with validation.
    ///
    /// Returns the id of the created entity for Add/Insert operations.
    pub fn apply(
        &self,
        course: &mut Course,
        ids: &mut IdGenerator,
    ) -> Result<Option<String>, MutationError> {
        // Validate first
        self.validate(course)?;

        match self {
            Mutation::UpdateCourseInfo { title, description } => {
                course.title = normalized_title(title).ok_or(MutationError::EmptyTitle)?;
                course.description = description.clone();
                Ok(None)
            }

            Mutation::AddSection { title } => {
                let id = ids.next_id();
                let title = normalized_title(title).ok_or(MutationError::EmptyTitle)?;
                course.sections.push(Section::new(id.clone(), title));
                Ok(Some(id))
            }

            Mutation::RenameSection { section_id, title } => {
                let title = normalized_title(title).ok_or(MutationError::EmptyTitle)?;
                let section = section_mut(course, section_id)?;
                section.title = title;
                Ok(None)
            }

            Mutation::RemoveSection { section_id } => {
                let index = course
                    .section_index(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                course.sections.remove(index);
                Ok(None)
            }

            Mutation::MoveSection { section_id, index } => {
                let from = course
                    .section_index(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                let section = course.sections.remove(from);
                let to = (*index).min(course.sections.len());
                course.sections.insert(to, section);
                Ok(None)
            }

            Mutation::InsertSection { index, section } => {
                let at = (*index).min(course.sections.len());
                course.sections.insert(at, section.clone());
                Ok(Some(section.id.clone()))
            }

            Mutation::AddLesson {
                section_id,
                title,
                content,
            } => {
                let title = normalized_title(title).ok_or(MutationError::EmptyTitle)?;
                let lesson_id = ids.next_id();
                let mut content = content.clone();
                // A quiz attached with an empty id receives a fresh one
                if let LessonContent::Quiz { quiz } = &mut content {
                    if quiz.id.is_empty() {
                        quiz.id = ids.next_id();
                    }
                }
                let section = section_mut(course, section_id)?;
                let order = section.lessons.len() + 1;
                section.lessons.push(Lesson {
                    id: lesson_id.clone(),
                    title,
                    order,
                    content,
                });
                Ok(Some(lesson_id))
            }

            Mutation::EditLesson {
                section_id,
                lesson_id,
                title,
                content,
            } => {
                let lesson = lesson_mut(course, section_id, lesson_id)?;
                if let Some(title) = title {
                    lesson.title = normalized_title(title).ok_or(MutationError::EmptyTitle)?;
                }
                if let Some(content) = content {
                    lesson.content = content.clone();
                }
                Ok(None)
            }

            Mutation::RemoveLesson {
                section_id,
                lesson_id,
            } => {
                let section = section_mut(course, section_id)?;
                let index = section
                    .lesson_index(lesson_id)
                    .ok_or_else(|| MutationError::LessonNotFound(lesson_id.clone()))?;
                section.lessons.remove(index);
                Ok(None)
            }

            Mutation::MoveLesson {
                section_id,
                lesson_id,
                index,
            } => {
                let section = section_mut(course, section_id)?;
                let from = section
                    .lesson_index(lesson_id)
                    .ok_or_else(|| MutationError::LessonNotFound(lesson_id.clone()))?;
                let lesson = section.lessons.remove(from);
                let to = (*index).min(section.lessons.len());
                section.lessons.insert(to, lesson);
                Ok(None)
            }

            Mutation::InsertLesson {
                section_id,
                index,
                lesson,
            } => {
                let section = section_mut(course, section_id)?;
                let at = (*index).min(section.lessons.len());
                section.lessons.insert(at, lesson.clone());
                Ok(Some(lesson.id.clone()))
            }

            Mutation::AddQuestion {
                section_id,
                lesson_id,
            } => {
                let id = ids.next_id();
                let quiz = quiz_mut(course, section_id, lesson_id)?;
                let order = quiz.questions.len() + 1;
                quiz.questions.push(Question::blank(id.clone(), order));
                quiz.question_count = quiz.questions.len();
                Ok(Some(id))
            }

            Mutation::UpdateQuestion {
                section_id,
                lesson_id,
                index,
                field,
            } => {
                let quiz = quiz_mut(course, section_id, lesson_id)?;
                let question = quiz
                    .questions
                    .get_mut(*index)
                    .ok_or(MutationError::QuestionOutOfRange(*index))?;
                match field {
                    QuestionField::Text(text) => question.text = text.clone(),
                    QuestionField::Options(options) => question.options = options.clone(),
                    QuestionField::CorrectAnswer(answer) => question.correct_answer = *answer,
                    QuestionField::Explanation(explanation) => {
                        question.explanation = explanation.clone()
                    }
                }
                Ok(None)
            }

            Mutation::RemoveQuestion {
                section_id,
                lesson_id,
                index,
            } => {
                let quiz = quiz_mut(course, section_id, lesson_id)?;
                quiz.questions.remove(*index);
                quiz.renumber();
                Ok(None)
            }

            Mutation::InsertQuestion {
                section_id,
                lesson_id,
                index,
                question,
            } => {
                let quiz = quiz_mut(course, section_id, lesson_id)?;
                let at = (*index).min(quiz.questions.len());
                quiz.questions.insert(at, question.clone());
                quiz.renumber();
                Ok(Some(question.id.clone()))
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, course: &Course) -> Result<(), MutationError> {
        match self {
            Mutation::UpdateCourseInfo { title, .. } | Mutation::AddSection { title } => {
                require_title(title)
            }

            Mutation::RenameSection { section_id, title } => {
                require_title(title)?;
                section_ref(course, section_id).map(|_| ())
            }

            Mutation::RemoveSection { section_id } | Mutation::MoveSection { section_id, .. } => {
                section_ref(course, section_id).map(|_| ())
            }

            Mutation::InsertSection { section, .. } => {
                if course.find_section(&section.id).is_some() {
                    return Err(MutationError::InvalidStructure(format!(
                        "duplicate section id: {}",
                        section.id
                    )));
                }
                Ok(())
            }

            Mutation::AddLesson {
                section_id, title, ..
            } => {
                require_title(title)?;
                section_ref(course, section_id).map(|_| ())
            }

            Mutation::EditLesson {
                section_id,
                lesson_id,
                title,
                ..
            } => {
                if let Some(title) = title {
                    require_title(title)?;
                }
                lesson_ref(course, section_id, lesson_id).map(|_| ())
            }

            Mutation::RemoveLesson {
                section_id,
                lesson_id,
            }
            | Mutation::MoveLesson {
                section_id,
                lesson_id,
                ..
            } => lesson_ref(course, section_id, lesson_id).map(|_| ()),

            Mutation::InsertLesson {
                section_id, lesson, ..
            } => {
                let section = section_ref(course, section_id)?;
                if section.find_lesson(&lesson.id).is_some() {
                    return Err(MutationError::InvalidStructure(format!(
                        "duplicate lesson id: {}",
                        lesson.id
                    )));
                }
                Ok(())
            }

            Mutation::AddQuestion {
                section_id,
                lesson_id,
            } => quiz_ref(course, section_id, lesson_id).map(|_| ()),

            Mutation::UpdateQuestion {
                section_id,
                lesson_id,
                index,
                field,
            } => {
                if let QuestionField::CorrectAnswer(answer) = field {
                    if *answer > 3 {
                        return Err(MutationError::InvalidCorrectAnswer(*answer));
                    }
                }
                let quiz = quiz_ref(course, section_id, lesson_id)?;
                if *index >= quiz.questions.len() {
                    return Err(MutationError::QuestionOutOfRange(*index));
                }
                Ok(())
            }

            Mutation::RemoveQuestion {
                section_id,
                lesson_id,
                index,
            } => {
                let quiz = quiz_ref(course, section_id, lesson_id)?;
                if *index >= quiz.questions.len() {
                    return Err(MutationError::QuestionOutOfRange(*index));
                }
                Ok(())
            }

            Mutation::InsertQuestion {
                section_id,
                lesson_id,
                ..
            } => quiz_ref(course, section_id, lesson_id).map(|_| ()),
        }
    }

    /// Compute the inverse of this mutation against the current course.
    ///
    /// Must be called before `apply`: Add inverses name the id the generator
    /// is about to assign, Remove inverses carry the doomed entity.
    pub fn to_inverse(
        &self,
        course: &Course,
        ids: &IdGenerator,
    ) -> Result<Mutation, MutationError> {
        match self {
            Mutation::UpdateCourseInfo { .. } => Ok(Mutation::UpdateCourseInfo {
                title: course.title.clone(),
                description: course.description.clone(),
            }),

            Mutation::AddSection { .. } => Ok(Mutation::RemoveSection {
                section_id: ids.peek_id(),
            }),

            Mutation::RenameSection { section_id, .. } => {
                let section = section_ref(course, section_id)?;
                Ok(Mutation::RenameSection {
                    section_id: section_id.clone(),
                    title: section.title.clone(),
                })
            }

            Mutation::RemoveSection { section_id } => {
                let index = course
                    .section_index(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                Ok(Mutation::InsertSection {
                    index,
                    section: course.sections[index].clone(),
                })
            }

            Mutation::MoveSection { section_id, .. } => {
                let index = course
                    .section_index(section_id)
                    .ok_or_else(|| MutationError::SectionNotFound(section_id.clone()))?;
                Ok(Mutation::MoveSection {
                    section_id: section_id.clone(),
                    index,
                })
            }

            Mutation::InsertSection { section, .. } => Ok(Mutation::RemoveSection {
                section_id: section.id.clone(),
            }),

            Mutation::AddLesson { section_id, .. } => Ok(Mutation::RemoveLesson {
                section_id: section_id.clone(),
                lesson_id: ids.peek_id(),
            }),

            Mutation::EditLesson {
                section_id,
                lesson_id,
                title,
                content,
            } => {
                let lesson = lesson_ref(course, section_id, lesson_id)?;
                Ok(Mutation::EditLesson {
                    section_id: section_id.clone(),
                    lesson_id: lesson_id.clone(),
                    title: title.as_ref().map(|_| lesson.title.clone()),
                    content: content.as_ref().map(|_| lesson.content.clone()),
                })
            }

            Mutation::RemoveLesson {
                section_id,
                lesson_id,
            } => {
                let section = section_ref(course, section_id)?;
                let index = section
                    .lesson_index(lesson_id)
                    .ok_or_else(|| MutationError::LessonNotFound(lesson_id.clone()))?;
                Ok(Mutation::InsertLesson {
                    section_id: section_id.clone(),
                    index,
                    lesson: section.lessons[index].clone(),
                })
            }

            Mutation::MoveLesson {
                section_id,
                lesson_id,
                ..
            } => {
                let section = section_ref(course, section_id)?;
                let index = section
                    .lesson_index(lesson_id)
                    .ok_or_else(|| MutationError::LessonNotFound(lesson_id.clone()))?;
                Ok(Mutation::MoveLesson {
                    section_id: section_id.clone(),
                    lesson_id: lesson_id.clone(),
                    index,
                })
            }

            Mutation::InsertLesson {
                section_id, lesson, ..
            } => Ok(Mutation::RemoveLesson {
                section_id: section_id.clone(),
                lesson_id: lesson.id.clone(),
            }),

            Mutation::AddQuestion {
                section_id,
                lesson_id,
            } => {
                let quiz = quiz_ref(course, section_id, lesson_id)?;
                Ok(Mutation::RemoveQuestion {
                    section_id: section_id.clone(),
                    lesson_id: lesson_id.clone(),
                    index: quiz.questions.len(),
                })
            }

            Mutation::UpdateQuestion {
                section_id,
                lesson_id,
                index,
                field,
            } => {
                let quiz = quiz_ref(course, section_id, lesson_id)?;
                let question = quiz
                    .questions
                    .get(*index)
                    .ok_or(MutationError::QuestionOutOfRange(*index))?;
                let old = match field {
                    QuestionField::Text(_) => QuestionField::Text(question.text.clone()),
                    QuestionField::Options(_) => QuestionField::Options(question.options.clone()),
                    QuestionField::CorrectAnswer(_) => {
                        QuestionField::CorrectAnswer(question.correct_answer)
                    }
                    QuestionField::Explanation(_) => {
                        QuestionField::Explanation(question.explanation.clone())
                    }
                };
                Ok(Mutation::UpdateQuestion {
                    section_id: section_id.clone(),
                    lesson_id: lesson_id.clone(),
                    index: *index,
                    field: old,
                })
            }

            Mutation::RemoveQuestion {
                section_id,
                lesson_id,
                index,
            } => {
                let quiz = quiz_ref(course, section_id, lesson_id)?;
                let question = quiz
                    .questions
                    .get(*index)
                    .ok_or(MutationError::QuestionOutOfRange(*index))?;
                Ok(Mutation::InsertQuestion {
                    section_id: section_id.clone(),
                    lesson_id: lesson_id.clone(),
                    index: *index,
                    question: question.clone(),
                })
            }

            Mutation::InsertQuestion {
                section_id,
                lesson_id,
                index,
                ..
            } => Ok(Mutation::RemoveQuestion {
                section_id: section_id.clone(),
                lesson_id: lesson_id.clone(),
                index: *index,
            }),
        }
    }

    /// Rewrite an applied Add operation into the positional Insert that
    /// reproduces it exactly on redo (same id, same position). Everything
    /// else replays as-is. Call after `apply`, against the mutated course.
    pub fn to_replay(&self, course: &Course, created_id: Option<&str>) -> Mutation {
        match (self, created_id) {
            (Mutation::AddSection { .. }, Some(id)) => {
                if let Some(index) = course.section_index(id) {
                    return Mutation::InsertSection {
                        index,
                        section: course.sections[index].clone(),
                    };
                }
                self.clone()
            }

            (Mutation::AddLesson { section_id, .. }, Some(id)) => {
                if let Some(section) = course.find_section(section_id) {
                    if let Some(index) = section.lesson_index(id) {
                        return Mutation::InsertLesson {
                            section_id: section_id.clone(),
                            index,
                            lesson: section.lessons[index].clone(),
                        };
                    }
                }
                self.clone()
            }

            (
                Mutation::AddQuestion {
                    section_id,
                    lesson_id,
                },
                Some(id),
            ) => {
                if let Ok(quiz) = quiz_ref(course, section_id, lesson_id) {
                    if let Some(index) = quiz.questions.iter().position(|q| q.id == id) {
                        return Mutation::InsertQuestion {
                            section_id: section_id.clone(),
                            lesson_id: lesson_id.clone(),
                            index,
                            question: quiz.questions[index].clone(),
                        };
                    }
                }
                self.clone()
            }

            _ => self.clone(),
        }
    }
}

fn require_title(title: &str) -> Result<(), MutationError> {
    if normalized_title(title).is_none() {
        return Err(MutationError::EmptyTitle);
    }
    Ok(())
}

fn section_ref<'a>(course: &'a Course, section_id: &str) -> Result<&'a Section, MutationError> {
    course
        .find_section(section_id)
        .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))
}

fn section_mut<'a>(
    course: &'a mut Course,
    section_id: &str,
) -> Result<&'a mut Section, MutationError> {
    course
        .find_section_mut(section_id)
        .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))
}

fn lesson_ref<'a>(
    course: &'a Course,
    section_id: &str,
    lesson_id: &str,
) -> Result<&'a Lesson, MutationError> {
    section_ref(course, section_id)?
        .find_lesson(lesson_id)
        .ok_or_else(|| MutationError::LessonNotFound(lesson_id.to_string()))
}

fn lesson_mut<'a>(
    course: &'a mut Course,
    section_id: &str,
    lesson_id: &str,
) -> Result<&'a mut Lesson, MutationError> {
    section_mut(course, section_id)?
        .find_lesson_mut(lesson_id)
        .ok_or_else(|| MutationError::LessonNotFound(lesson_id.to_string()))
}

fn quiz_ref<'a>(
    course: &'a Course,
    section_id: &str,
    lesson_id: &str,
) -> Result<&'a Quiz, MutationError> {
    match &lesson_ref(course, section_id, lesson_id)?.content {
        LessonContent::Quiz { quiz } => Ok(quiz),
        _ => Err(MutationError::NotAQuiz(lesson_id.to_string())),
    }
}

fn quiz_mut<'a>(
    course: &'a mut Course,
    section_id: &str,
    lesson_id: &str,
) -> Result<&'a mut Quiz, MutationError> {
    match &mut lesson_mut(course, section_id, lesson_id)?.content {
        LessonContent::Quiz { quiz } => Ok(quiz),
        _ => Err(MutationError::NotAQuiz(lesson_id.to_string())),
    }
}
