//! # Studio State
//!
//! Workspace-level cache of open courses, keyed by course id. Each open
//! course is an [`EditSession`] owning its draft; the studio wires sessions
//! to the hosted providers for load and save.
//!
//! Saving is asynchronous and uncoordinated by design: writes are not
//! retried, two in-flight saves resolve last-callback-wins at the store,
//! and a save completion only marks the draft clean if the draft has not
//! moved on in the meantime.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use courseforge_content::model::Course;
use courseforge_editor::EditSession;
use courseforge_providers::{collections, CourseSearch, DocumentStore, ObjectStorage};

use crate::error::StudioError;

/// Top-level application state owner
pub struct Studio {
    pub(crate) store: Arc<dyn DocumentStore>,
    pub(crate) search: Arc<dyn CourseSearch>,
    pub(crate) storage: Arc<dyn ObjectStorage>,

    /// Open edit sessions keyed by course id
    sessions: HashMap<String, EditSession>,
}

impl Studio {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        search: Arc<dyn CourseSearch>,
        storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            store,
            search,
            storage,
            sessions: HashMap::new(),
        }
    }

    /// Open a stored course for viewing or editing. Reopening an already
    /// open course returns the existing session unchanged.
    ///
    /// `can_edit` is the capability flag decided at the auth boundary; a
    /// student gets a read-only session over the same tree.
    pub async fn open_course(
        &mut self,
        course_id: &str,
        can_edit: bool,
    ) -> Result<&mut EditSession, StudioError> {
        let store = Arc::clone(&self.store);
        match self.sessions.entry(course_id.to_string()) {
            Entry::Occupied(open) => Ok(open.into_mut()),
            Entry::Vacant(slot) => {
                let value = store
                    .get(collections::COURSES, course_id)
                    .await?
                    .ok_or_else(|| StudioError::CourseNotFound(course_id.to_string()))?;
                let course: Course = serde_json::from_value(value)?;
                tracing::debug!(course_id, "opened course from store");
                Ok(slot.insert(EditSession::new(
                    format!("{}-editor", course_id),
                    course,
                    can_edit,
                )))
            }
        }
    }

    /// Create a brand-new course locally. Nothing is persisted until the
    /// first save.
    pub fn create_course(
        &mut self,
        course_id: &str,
        title: &str,
        description: &str,
    ) -> &mut EditSession {
        let session = EditSession::new(
            format!("{}-editor", course_id),
            Course::new(course_id, title, description),
            true,
        );
        match self.sessions.entry(course_id.to_string()) {
            Entry::Occupied(mut open) => {
                open.insert(session);
                open.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(session),
        }
    }

    pub fn session(&self, course_id: &str) -> Option<&EditSession> {
        self.sessions.get(course_id)
    }

    pub fn session_mut(&mut self, course_id: &str) -> Option<&mut EditSession> {
        self.sessions.get_mut(course_id)
    }

    /// Drop an open session. Unsaved changes are abandoned; any in-flight
    /// background save still completes against the store.
    pub fn close_course(&mut self, course_id: &str) {
        self.sessions.remove(course_id);
    }

    /// Persist one open course and wait for the write.
    ///
    /// The draft is marked clean only if its version is unchanged when the
    /// write resolves; a draft that moved on stays dirty for the next save.
    pub async fn save_course(&mut self, course_id: &str) -> Result<(), StudioError> {
        let (payload, version) = {
            let session = self
                .sessions
                .get(course_id)
                .ok_or_else(|| StudioError::CourseNotOpen(course_id.to_string()))?;
            (serde_json::to_value(session.course())?, session.version())
        };

        self.store
            .set(collections::COURSES, course_id, payload)
            .await?;

        if let Some(session) = self.sessions.get_mut(course_id) {
            if session.version() == version {
                session.mark_saved();
            } else {
                tracing::debug!(course_id, "draft changed during save, leaving dirty");
            }
        }
        Ok(())
    }

    /// Fire-and-forget save. The write happens on a background task; a
    /// failure is logged and swallowed, never retried, and the local draft
    /// is not rolled back.
    pub fn save_course_detached(
        &self,
        course_id: &str,
    ) -> Result<tokio::task::JoinHandle<()>, StudioError> {
        let session = self
            .sessions
            .get(course_id)
            .ok_or_else(|| StudioError::CourseNotOpen(course_id.to_string()))?;
        let payload = serde_json::to_value(session.course())?;

        let store = Arc::clone(&self.store);
        let course_id = course_id.to_string();
        Ok(tokio::spawn(async move {
            if let Err(error) = store.set(collections::COURSES, &course_id, payload).await {
                tracing::warn!(%course_id, %error, "background course save failed");
            }
        }))
    }

    /// Upload a lesson asset (document, thumbnail, video) and return its
    /// download URL for use in a lesson payload.
    pub async fn upload_asset(&self, path: &str, bytes: Vec<u8>) -> Result<String, StudioError> {
        Ok(self.storage.upload(path, bytes).await?)
    }

    /// Remove a stored lesson asset. Idempotent, like the provider.
    pub async fn delete_asset(&self, path: &str) -> Result<(), StudioError> {
        Ok(self.storage.delete(path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courseforge_providers::{MemoryCourseSearch, MemoryDocumentStore, MemoryObjectStorage};

    fn studio() -> Studio {
        Studio::new(
            Arc::new(MemoryDocumentStore::new()),
            Arc::new(MemoryCourseSearch::new()),
            Arc::new(MemoryObjectStorage::new()),
        )
    }

    #[tokio::test]
    async fn test_open_missing_course_fails() {
        let mut studio = studio();
        let result = studio.open_course("ghost", true).await;
        assert!(matches!(result, Err(StudioError::CourseNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_then_save_then_reopen() {
        let mut studio = studio();
        studio.create_course("algebra-101", "Algebra 101", "Linear equations");
        studio.save_course("algebra-101").await.unwrap();

        studio.close_course("algebra-101");
        assert!(studio.session("algebra-101").is_none());

        let session = studio.open_course("algebra-101", false).await.unwrap();
        assert_eq!(session.course().title, "Algebra 101");
        assert!(!session.can_edit());
    }

    #[tokio::test]
    async fn test_save_marks_draft_clean() {
        let mut studio = studio();
        let session = studio.create_course("algebra-101", "Algebra 101", "");
        session.open_section_form(None).unwrap();
        session
            .submit_section_form(courseforge_editor::SectionFormData::new("Intro"))
            .unwrap();
        assert!(studio.session("algebra-101").unwrap().is_dirty());

        studio.save_course("algebra-101").await.unwrap();
        assert!(!studio.session("algebra-101").unwrap().is_dirty());
    }

    #[tokio::test]
    async fn test_reopen_returns_existing_session() {
        let mut studio = studio();
        studio.create_course("algebra-101", "Algebra 101", "");
        studio.save_course("algebra-101").await.unwrap();

        let session = studio.session_mut("algebra-101").unwrap();
        session.open_section_form(None).unwrap();
        session
            .submit_section_form(courseforge_editor::SectionFormData::new("Intro"))
            .unwrap();

        // Opening again must not clobber the live draft with stored state
        let session = studio.open_course("algebra-101", true).await.unwrap();
        assert_eq!(session.course().sections.len(), 1);
    }
}
