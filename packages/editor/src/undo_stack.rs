//! # Undo/Redo Stack
//!
//! Tracks mutation history and enables undo/redo operations.
//!
//! ## Design
//!
//! - Each mutation records its inverse before being applied
//! - Add operations are recorded in their positional Insert form so a redo
//!   recreates the same entity with the same id at the same position
//! - Undo applies the inverse and moves the batch to the redo stack
//! - Redo reapplies the recorded mutations
//! - New mutations clear the redo stack
//! - Supports batched operations (group multiple mutations as one undo step)

use crate::{CourseDraft, Mutation, MutationError, MutationResult};

/// A group of mutations that should be undone/redone together
#[derive(Debug, Clone)]
pub struct MutationBatch {
    /// The mutations in this batch (in application order)
    pub mutations: Vec<Mutation>,

    /// The inverse mutations (in reverse order for undo)
    pub inverses: Vec<Mutation>,

    /// Optional description of this batch
    pub description: Option<String>,
}

impl MutationBatch {
    /// Create a single-mutation batch
    pub fn single(mutation: Mutation, inverse: Mutation) -> Self {
        Self {
            mutations: vec![mutation],
            inverses: vec![inverse],
            description: None,
        }
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Undo/redo stack for course editing
#[derive(Debug)]
pub struct UndoStack {
    /// Stack of applied batches (most recent last)
    undo_stack: Vec<MutationBatch>,

    /// Stack of undone batches (most recent last)
    redo_stack: Vec<MutationBatch>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Currently building a batch
    current_batch: Option<MutationBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    /// Create an undo stack with custom max levels
    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Apply a mutation to the draft and record it for undo
    pub fn apply(
        &mut self,
        mutation: &Mutation,
        draft: &mut CourseDraft,
    ) -> Result<MutationResult, MutationError> {
        // Generate inverse before applying
        let inverse = mutation.to_inverse(draft.course(), draft.ids())?;

        let result = draft.apply(mutation)?;

        // Record the replayable form (Add becomes positional Insert)
        let replay = mutation.to_replay(draft.course(), result.created_id.as_deref());

        if let Some(batch) = &mut self.current_batch {
            batch.mutations.push(replay);
            batch.inverses.insert(0, inverse); // Inverses go in reverse order
        } else {
            self.push_batch(MutationBatch::single(replay, inverse));
        }

        Ok(result)
    }

    /// Start a batch of mutations (will be undone/redone together)
    pub fn begin_batch(&mut self) {
        self.current_batch = Some(MutationBatch {
            mutations: Vec::new(),
            inverses: Vec::new(),
            description: None,
        });
    }

    /// End the current batch and push to undo stack
    pub fn end_batch(&mut self) {
        if let Some(batch) = self.current_batch.take() {
            if !batch.mutations.is_empty() {
                self.push_batch(batch);
            }
        }
    }

    /// Set description for current batch (if batching)
    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    fn push_batch(&mut self, batch: MutationBatch) {
        self.undo_stack.push(batch);

        // Trim if exceeded max levels
        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // Clear redo stack (new action invalidates future)
        self.redo_stack.clear();
    }

    /// Undo the most recent mutation/batch
    pub fn undo(&mut self, draft: &mut CourseDraft) -> Result<bool, MutationError> {
        if let Some(batch) = self.undo_stack.pop() {
            // Apply inverses in order
            for inverse in &batch.inverses {
                draft.apply(inverse)?;
            }

            self.redo_stack.push(batch);
            Ok(true)
        } else {
            Ok(false) // Nothing to undo
        }
    }

    /// Redo the most recently undone mutation/batch
    pub fn redo(&mut self, draft: &mut CourseDraft) -> Result<bool, MutationError> {
        if let Some(batch) = self.redo_stack.pop() {
            // Reapply recorded mutations
            for mutation in &batch.mutations {
                draft.apply(mutation)?;
            }

            self.undo_stack.push(batch);
            Ok(true)
        } else {
            Ok(false) // Nothing to redo
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Get description of the next undo operation
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }

    /// Get description of the next redo operation
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|batch| batch.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use courseforge_content::model::Course;

    fn draft() -> CourseDraft {
        CourseDraft::new(Course::new("algebra-101", "Algebra 101", ""))
    }

    #[test]
    fn test_undo_stack_creation() {
        let stack = UndoStack::new();
        assert_eq!(stack.undo_levels(), 0);
        assert_eq!(stack.redo_levels(), 0);
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_apply_undo_redo_round_trip() {
        let mut draft = draft();
        let mut stack = UndoStack::new();

        let empty = draft.course().clone();

        stack
            .apply(
                &Mutation::AddSection {
                    title: "Intro".to_string(),
                },
                &mut draft,
            )
            .unwrap();
        let with_section = draft.course().clone();

        assert_eq!(stack.undo_levels(), 1);
        assert!(stack.can_undo());

        // Undo restores the empty course
        assert!(stack.undo(&mut draft).unwrap());
        assert_eq!(draft.course(), &empty);
        assert_eq!(stack.redo_levels(), 1);

        // Redo recreates the same section, same id
        assert!(stack.redo(&mut draft).unwrap());
        assert_eq!(draft.course(), &with_section);
    }

    #[test]
    fn test_batched_mutations_undo_together() {
        let mut draft = draft();
        let mut stack = UndoStack::new();

        let empty = draft.course().clone();

        stack.begin_batch();
        stack.set_batch_description("Scaffold course");
        stack
            .apply(
                &Mutation::AddSection {
                    title: "Intro".to_string(),
                },
                &mut draft,
            )
            .unwrap();
        stack
            .apply(
                &Mutation::AddSection {
                    title: "Basics".to_string(),
                },
                &mut draft,
            )
            .unwrap();
        stack.end_batch();

        assert_eq!(stack.undo_levels(), 1);
        assert_eq!(stack.undo_description(), Some("Scaffold course"));

        stack.undo(&mut draft).unwrap();
        assert_eq!(draft.course(), &empty);
    }

    #[test]
    fn test_new_mutation_clears_redo() {
        let mut draft = draft();
        let mut stack = UndoStack::new();

        stack
            .apply(
                &Mutation::AddSection {
                    title: "Intro".to_string(),
                },
                &mut draft,
            )
            .unwrap();
        stack.undo(&mut draft).unwrap();
        assert_eq!(stack.redo_levels(), 1);

        stack
            .apply(
                &Mutation::AddSection {
                    title: "Basics".to_string(),
                },
                &mut draft,
            )
            .unwrap();
        assert_eq!(stack.redo_levels(), 0);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut draft = draft();
        let mut stack = UndoStack::with_max_levels(2);

        for title in ["A", "B", "C"] {
            stack
                .apply(
                    &Mutation::AddSection {
                        title: title.to_string(),
                    },
                    &mut draft,
                )
                .unwrap();
        }

        assert_eq!(stack.undo_levels(), 2);
    }
}
