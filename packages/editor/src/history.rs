//! # Undo/Redo History
//!
//! Snapshot-based edit history for one document.
//!
//! ## Design
//!
//! - Each edit stores the whole dataset as it was *before* the edit
//! - Undo swaps the live state with the top undo snapshot and moves the
//!   displaced live state onto the redo stack (keeping the edit's label)
//! - Redo is the mirror image
//! - New edits clear the redo stack (no branching history)
//! - Undo/redo on an empty stack is a no-op returning `None`
//!
//! Snapshots are owned datasets moved between the live slot and the stacks,
//! so nothing outside the history can reach a stored snapshot.
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = EditHistory::new(dataset);
//!
//! history.apply(edited, "Rename dataset");
//! assert!(history.can_undo());
//!
//! let previous = history.undo();
//! let again = history.redo();
//! ```

use chrono::{DateTime, Utc};
use lipd_model::Dataset;

/// State before one edit
#[derive(Debug, Clone)]
pub struct Edit {
    snapshot: Dataset,
    label: String,
    timestamp: DateTime<Utc>,
    revision: u64,
}

impl Edit {
    pub fn snapshot(&self) -> &Dataset {
        &self.snapshot
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Revision of the snapshot
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[derive(Debug)]
pub struct EditHistory {
    /// Most recent last
    undo_stack: Vec<Edit>,

    /// Most recently undone last
    redo_stack: Vec<Edit>,

    current: Dataset,

    /// Identifies the live state; restored together with snapshots
    revision: u64,

    next_revision: u64,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,
}

impl EditHistory {
    /// Unbounded history starting at `initial`
    pub fn new(initial: Dataset) -> Self {
        Self::with_max_levels(initial, 0)
    }

    pub fn with_max_levels(initial: Dataset, max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            current: initial,
            revision: 0,
            next_revision: 1,
            max_levels,
        }
    }

    pub fn current(&self) -> &Dataset {
        &self.current
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Commit `new_state` as one undoable edit
    pub fn apply(&mut self, new_state: Dataset, label: impl Into<String>) {
        let revision = self.bump();
        let snapshot = std::mem::replace(&mut self.current, new_state);

        self.undo_stack.push(Edit {
            snapshot,
            label: label.into(),
            timestamp: Utc::now(),
            revision: std::mem::replace(&mut self.revision, revision),
        });

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Step back one edit. `None` if there is nothing to undo.
    pub fn undo(&mut self) -> Option<&Dataset> {
        let edit = self.undo_stack.pop()?;
        let displaced = self.restore(edit.snapshot, edit.revision);

        self.redo_stack.push(Edit {
            snapshot: displaced.0,
            label: edit.label,
            timestamp: Utc::now(),
            revision: displaced.1,
        });

        Some(&self.current)
    }

    /// Step forward one undone edit. `None` if there is nothing to redo.
    pub fn redo(&mut self) -> Option<&Dataset> {
        let edit = self.redo_stack.pop()?;
        let displaced = self.restore(edit.snapshot, edit.revision);

        self.undo_stack.push(Edit {
            snapshot: displaced.0,
            label: edit.label,
            timestamp: Utc::now(),
            revision: displaced.1,
        });

        Some(&self.current)
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

    /// Label of the edit the next undo would revert
    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.last().map(Edit::label)
    }

    /// Label of the edit the next redo would reapply
    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.last().map(Edit::label)
    }

    /// Replace the live state and forget all history
    pub fn reset(&mut self, state: Dataset) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current = state;
        self.revision = self.bump();
    }

    fn restore(&mut self, snapshot: Dataset, revision: u64) -> (Dataset, u64) {
        let previous = std::mem::replace(&mut self.current, snapshot);
        let previous_revision = std::mem::replace(&mut self.revision, revision);
        (previous, previous_revision)
    }

    fn bump(&mut self) -> u64 {
        let revision = self.next_revision;
        self.next_revision += 1;
        revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipd_model::SchemaRegistry;

    fn named(name: &str) -> Dataset {
        Dataset::empty(&SchemaRegistry::lipd(), name)
    }

    #[test]
    fn test_history_creation() {
        let history = EditHistory::new(named("s0"));
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.current().name(), Some("s0"));
    }

    #[test]
    fn test_apply_and_undo() {
        let mut history = EditHistory::new(named("s0"));

        history.apply(named("s1"), "edit1");
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.undo_label(), Some("edit1"));

        let undone = history.undo().map(|d| d.name().map(str::to_string));
        assert_eq!(undone, Some(Some("s0".to_string())));
        assert_eq!(history.undo_levels(), 0);
        assert_eq!(history.redo_levels(), 1);
        assert_eq!(history.redo_label(), Some("edit1"));

        let redone = history.redo().map(|d| d.name().map(str::to_string));
        assert_eq!(redone, Some(Some("s1".to_string())));
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut history = EditHistory::new(named("s0"));
        history.apply(named("s1"), "edit1");
        history.apply(named("s2"), "edit2");

        assert_eq!(history.undo().and_then(Dataset::name), Some("s1"));
        assert!(history.can_redo());

        history.apply(named("s3"), "edit3");
        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.current().name(), Some("s3"));

        assert_eq!(history.undo().and_then(Dataset::name), Some("s1"));
        assert_eq!(history.undo().and_then(Dataset::name), Some("s0"));
    }

    #[test]
    fn test_empty_stacks_are_no_ops() {
        let mut history = EditHistory::new(named("s0"));
        let revision = history.revision();

        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert_eq!(history.current().name(), Some("s0"));
        assert_eq!(history.revision(), revision);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_revisions_follow_snapshots() {
        let mut history = EditHistory::new(named("s0"));
        let r0 = history.revision();

        history.apply(named("s1"), "edit1");
        let r1 = history.revision();
        assert_ne!(r0, r1);

        history.undo();
        assert_eq!(history.revision(), r0);
        history.redo();
        assert_eq!(history.revision(), r1);
    }

    #[test]
    fn test_max_levels_enforced() {
        let mut history = EditHistory::with_max_levels(named("s0"), 2);
        for i in 1..=3 {
            history.apply(named(&format!("s{}", i)), format!("edit{}", i));
        }

        assert_eq!(history.undo_levels(), 2);
        history.undo();
        history.undo();
        assert!(history.undo().is_none());
        assert_eq!(history.current().name(), Some("s1"));
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut history = EditHistory::new(named("s0"));
        history.apply(named("s1"), "edit1");
        history.apply(named("s2"), "edit2");
        history.undo();

        history.reset(named("disk"));
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert_eq!(history.current().name(), Some("disk"));
    }
}
