//! # Edit Session Management
//!
//! The top-level state owner for one course under edit: the draft, the
//! undo history, and the transient modal state, behind handlers shaped for
//! a presentation layer.
//!
//! Every mutating entry point is gated on the session's capability flag.
//! A read-only session (a student viewing the tree) rejects mutation,
//! drag initiation, and undo alike; the tree renders from the same state
//! either way.
//!
//! Deletion is two-phase: a request parks the target identity in the
//! confirm-delete modal (the pending-delete marker), and only an explicit
//! confirmation mutates. Cancel clears the marker without touching state.

use courseforge_content::model::Course;

use crate::drag::{resolve_move, DragEnd};
use crate::forms::{LessonFormData, SectionFormData};
use crate::mutations::{Mutation, MutationError, MutationResult, QuestionField};
use crate::{CourseDraft, EditorError, UndoStack};

/// Entity awaiting delete confirmation
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteTarget {
    Section {
        section_id: String,
    },
    Lesson {
        section_id: String,
        lesson_id: String,
    },
}

/// Modal lifecycle: `Closed -> open(context) -> [submit | cancel] -> Closed`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModalState {
    #[default]
    Closed,

    /// Add (`section_id: None`) or edit an existing section
    SectionForm { section_id: Option<String> },

    /// Add (`lesson_id: None`) or edit a lesson within one section
    LessonForm {
        section_id: String,
        lesson_id: Option<String>,
    },

    /// Shared confirm-delete modal; the target discriminates section/lesson
    ConfirmDelete { target: DeleteTarget },
}

/// Single edit session over one course
pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    can_edit: bool,
    draft: CourseDraft,
    undo: UndoStack,
    modal: ModalState,
}

impl EditSession {
    /// Create a new session. `can_edit` is a capability flag decided at the
    /// auth boundary, not a role string.
    pub fn new(id: impl Into<String>, course: Course, can_edit: bool) -> Self {
        Self {
            id: id.into(),
            can_edit,
            draft: CourseDraft::new(course),
            undo: UndoStack::new(),
            modal: ModalState::Closed,
        }
    }

    pub fn course(&self) -> &Course {
        self.draft.course()
    }

    pub fn draft(&self) -> &CourseDraft {
        &self.draft
    }

    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn version(&self) -> u64 {
        self.draft.version()
    }

    pub fn is_dirty(&self) -> bool {
        self.draft.is_dirty()
    }

    /// Mark the current draft version as persisted
    pub fn mark_saved(&mut self) {
        self.draft.mark_saved();
    }

    fn ensure_editable(&self) -> Result<(), EditorError> {
        if self.can_edit {
            Ok(())
        } else {
            Err(EditorError::ReadOnly)
        }
    }

    // ---- Modal lifecycle ----

    /// Open the section modal; `None` adds, `Some` edits
    pub fn open_section_form(&mut self, section_id: Option<&str>) -> Result<(), EditorError> {
        self.ensure_editable()?;
        if let Some(id) = section_id {
            if self.course().find_section(id).is_none() {
                return Err(MutationError::SectionNotFound(id.to_string()).into());
            }
        }
        self.modal = ModalState::SectionForm {
            section_id: section_id.map(String::from),
        };
        Ok(())
    }

    /// Open the lesson modal for one section; `None` adds, `Some` edits
    pub fn open_lesson_form(
        &mut self,
        section_id: &str,
        lesson_id: Option<&str>,
    ) -> Result<(), EditorError> {
        self.ensure_editable()?;
        let section = self
            .course()
            .find_section(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;
        if let Some(id) = lesson_id {
            if section.find_lesson(id).is_none() {
                return Err(MutationError::LessonNotFound(id.to_string()).into());
            }
        }
        self.modal = ModalState::LessonForm {
            section_id: section_id.to_string(),
            lesson_id: lesson_id.map(String::from),
        };
        Ok(())
    }

    /// Close whatever modal is open without mutating anything
    pub fn cancel_modal(&mut self) {
        self.modal = ModalState::Closed;
    }

    /// Submit the section modal.
    ///
    /// Validation failure returns exactly one alert, leaves the modal open,
    /// and mutates nothing.
    pub fn submit_section_form(
        &mut self,
        form: SectionFormData,
    ) -> Result<MutationResult, EditorError> {
        self.ensure_editable()?;
        let section_id = match &self.modal {
            ModalState::SectionForm { section_id } => section_id.clone(),
            _ => return Err(EditorError::NoOpenModal),
        };
        let title = form.validate()?;

        let mutation = match section_id {
            Some(section_id) => Mutation::RenameSection { section_id, title },
            None => Mutation::AddSection { title },
        };
        let result = self.undo.apply(&mutation, &mut self.draft)?;
        self.modal = ModalState::Closed;
        Ok(result)
    }

    /// Submit the lesson modal.
    ///
    /// An edit that keeps a quiz lesson's type preserves the embedded quiz
    /// and its questions; any type change rebuilds the payload from the
    /// form alone.
    pub fn submit_lesson_form(
        &mut self,
        form: LessonFormData,
    ) -> Result<MutationResult, EditorError> {
        self.ensure_editable()?;
        let (section_id, lesson_id) = match &self.modal {
            ModalState::LessonForm {
                section_id,
                lesson_id,
            } => (section_id.clone(), lesson_id.clone()),
            _ => return Err(EditorError::NoOpenModal),
        };
        form.validate()?;
        let title = form.title().to_string();

        let mutation = match lesson_id {
            None => Mutation::AddLesson {
                section_id,
                title,
                content: form.into_content(),
            },
            Some(lesson_id) => {
                let existing = self
                    .course()
                    .find_section(&section_id)
                    .and_then(|s| s.find_lesson(&lesson_id))
                    .ok_or_else(|| MutationError::LessonNotFound(lesson_id.clone()))?;
                let keep_embedded_quiz = matches!(&form, LessonFormData::Quiz { .. })
                    && form.matches_kind(&existing.content);
                let content = if keep_embedded_quiz {
                    None
                } else {
                    Some(form.into_content())
                };
                Mutation::EditLesson {
                    section_id,
                    lesson_id,
                    title: Some(title),
                    content,
                }
            }
        };
        let result = self.undo.apply(&mutation, &mut self.draft)?;
        self.modal = ModalState::Closed;
        Ok(result)
    }

    // ---- Two-phase deletion ----

    /// Park a section for deletion and open the confirmation prompt
    pub fn request_delete_section(&mut self, section_id: &str) -> Result<(), EditorError> {
        self.ensure_editable()?;
        if self.course().find_section(section_id).is_none() {
            return Err(MutationError::SectionNotFound(section_id.to_string()).into());
        }
        self.modal = ModalState::ConfirmDelete {
            target: DeleteTarget::Section {
                section_id: section_id.to_string(),
            },
        };
        Ok(())
    }

    /// Park a lesson for deletion and open the confirmation prompt
    pub fn request_delete_lesson(
        &mut self,
        section_id: &str,
        lesson_id: &str,
    ) -> Result<(), EditorError> {
        self.ensure_editable()?;
        let section = self
            .course()
            .find_section(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;
        if section.find_lesson(lesson_id).is_none() {
            return Err(MutationError::LessonNotFound(lesson_id.to_string()).into());
        }
        self.modal = ModalState::ConfirmDelete {
            target: DeleteTarget::Lesson {
                section_id: section_id.to_string(),
                lesson_id: lesson_id.to_string(),
            },
        };
        Ok(())
    }

    /// The entity currently awaiting confirmation, if any
    pub fn pending_delete(&self) -> Option<&DeleteTarget> {
        match &self.modal {
            ModalState::ConfirmDelete { target } => Some(target),
            _ => None,
        }
    }

    /// Perform the parked deletion. Nothing is ever removed without this.
    pub fn confirm_delete(&mut self) -> Result<MutationResult, EditorError> {
        self.ensure_editable()?;
        let target = match &self.modal {
            ModalState::ConfirmDelete { target } => target.clone(),
            _ => return Err(EditorError::NoOpenModal),
        };

        let mutation = match target {
            DeleteTarget::Section { section_id } => Mutation::RemoveSection { section_id },
            DeleteTarget::Lesson {
                section_id,
                lesson_id,
            } => Mutation::RemoveLesson {
                section_id,
                lesson_id,
            },
        };
        let result = self.undo.apply(&mutation, &mut self.draft)?;
        self.modal = ModalState::Closed;
        Ok(result)
    }

    // ---- Drag reordering ----

    /// Handle a finished drag over the section list.
    ///
    /// Returns `Ok(None)` for no-op gestures (no target, dropped on itself,
    /// or an identity that vanished mid-drag).
    pub fn handle_section_drag(
        &mut self,
        drag: &DragEnd,
    ) -> Result<Option<MutationResult>, EditorError> {
        self.ensure_editable()?;
        let (_, to) = match resolve_move(&self.course().sections, drag) {
            Some(indices) => indices,
            None => return Ok(None),
        };
        let mutation = Mutation::MoveSection {
            section_id: drag.active_id.clone(),
            index: to,
        };
        Ok(Some(self.undo.apply(&mutation, &mut self.draft)?))
    }

    /// Handle a finished drag within one section's lesson list
    pub fn handle_lesson_drag(
        &mut self,
        section_id: &str,
        drag: &DragEnd,
    ) -> Result<Option<MutationResult>, EditorError> {
        self.ensure_editable()?;
        let section = self
            .course()
            .find_section(section_id)
            .ok_or_else(|| MutationError::SectionNotFound(section_id.to_string()))?;
        let (_, to) = match resolve_move(&section.lessons, drag) {
            Some(indices) => indices,
            None => return Ok(None),
        };
        let mutation = Mutation::MoveLesson {
            section_id: section_id.to_string(),
            lesson_id: drag.active_id.clone(),
            index: to,
        };
        Ok(Some(self.undo.apply(&mutation, &mut self.draft)?))
    }

    /// Update the course title and description (course settings form)
    pub fn update_course_info(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<MutationResult, EditorError> {
        self.ensure_editable()?;
        let mutation = Mutation::UpdateCourseInfo {
            title: title.to_string(),
            description: description.to_string(),
        };
        Ok(self.undo.apply(&mutation, &mut self.draft)?)
    }

    // ---- Quiz question editing (inline, no modal) ----

    pub fn add_question(
        &mut self,
        section_id: &str,
        lesson_id: &str,
    ) -> Result<MutationResult, EditorError> {
        self.ensure_editable()?;
        let mutation = Mutation::AddQuestion {
            section_id: section_id.to_string(),
            lesson_id: lesson_id.to_string(),
        };
        Ok(self.undo.apply(&mutation, &mut self.draft)?)
    }

    pub fn update_question(
        &mut self,
        section_id: &str,
        lesson_id: &str,
        index: usize,
        field: QuestionField,
    ) -> Result<MutationResult, EditorError> {
        self.ensure_editable()?;
        let mutation = Mutation::UpdateQuestion {
            section_id: section_id.to_string(),
            lesson_id: lesson_id.to_string(),
            index,
            field,
        };
        Ok(self.undo.apply(&mutation, &mut self.draft)?)
    }

    pub fn remove_question(
        &mut self,
        section_id: &str,
        lesson_id: &str,
        index: usize,
    ) -> Result<MutationResult, EditorError> {
        self.ensure_editable()?;
        let mutation = Mutation::RemoveQuestion {
            section_id: section_id.to_string(),
            lesson_id: lesson_id.to_string(),
            index,
        };
        Ok(self.undo.apply(&mutation, &mut self.draft)?)
    }

    // ---- History ----

    pub fn undo(&mut self) -> Result<bool, EditorError> {
        self.ensure_editable()?;
        Ok(self.undo.undo(&mut self.draft)?)
    }

    pub fn redo(&mut self) -> Result<bool, EditorError> {
        self.ensure_editable()?;
        Ok(self.undo.redo(&mut self.draft)?)
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }
}
