//! # Course Draft
//!
//! The single owned state container for one course under edit.
//!
//! Every mutation rebuilds the affected list inside an exclusively owned
//! tree and the result is observable only through this handle, so partial
//! or interleaved mutation of a list can never be seen by a reader.
//! Persistence belongs to the document-store collaborator; the draft only
//! tracks whether it has diverged from the last saved state.

use courseforge_content::model::Course;
use courseforge_content::{content_seed, IdGenerator};

use crate::{Mutation, MutationError, MutationResult};

/// Editable course state
#[derive(Debug, Clone)]
pub struct CourseDraft {
    course: Course,

    /// Increments on each successful mutation
    version: u64,

    /// Diverged from the last saved state
    dirty: bool,

    ids: IdGenerator,
}

impl CourseDraft {
    /// Wrap a course for editing.
    ///
    /// The id generator resumes past the highest id already present in the
    /// tree, so reopening a stored course never reissues an existing id.
    pub fn new(course: Course) -> Self {
        let seed = content_seed(&course.id);
        let count = highest_issued(&course, &seed);
        Self {
            course,
            version: 0,
            dirty: false,
            ids: IdGenerator::resume(seed, count),
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the current version as persisted
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Apply a mutation. The version increments and the draft is marked
    /// dirty only on success; a failed mutation leaves everything as it was.
    pub fn apply(&mut self, mutation: &Mutation) -> Result<MutationResult, MutationError> {
        let created_id = mutation.apply(&mut self.course, &mut self.ids)?;
        self.version += 1;
        self.dirty = true;
        tracing::debug!(version = self.version, "applied course mutation");
        Ok(MutationResult {
            version: self.version,
            created_id,
        })
    }
}

fn highest_issued(course: &Course, seed: &str) -> u32 {
    let prefix = format!("{}-", seed);
    course
        .entity_ids()
        .into_iter()
        .filter_map(|id| id.strip_prefix(&prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}
