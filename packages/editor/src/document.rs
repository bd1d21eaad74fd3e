//! # Document Handle
//!
//! A [`LipdDocument`] is one open dataset file: its identity, its edit
//! history, and whether the live state differs from what was last saved.
//!
//! ## Lifecycle
//!
//! ```text
//! Open → Edit / Undo / Redo → Save ─┐
//!   ↑                               │
//!   └──────────── Revert ←──────────┘
//! ```
//!
//! Dirty tracking compares revisions rather than counting edits, so undoing
//! back to the saved state makes the document clean again.

use crate::history::EditHistory;
use crate::path::{Mutator, Path};
use crate::EditorError;
use lipd_model::{Dataset, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path as FsPath, PathBuf};

/// Identity of an open document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_path(path: &FsPath) -> Self {
        Self(path.to_string_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
pub struct LipdDocument {
    id: DocumentId,

    /// File the document was opened from and saves to
    path: PathBuf,

    history: EditHistory,

    /// Revision last written to (or read from) `path`
    saved_revision: u64,
}

impl LipdDocument {
    pub fn new(path: PathBuf, dataset: Dataset) -> Self {
        Self::with_history(path, EditHistory::new(dataset))
    }

    pub fn with_history(path: PathBuf, history: EditHistory) -> Self {
        Self {
            id: DocumentId::from_path(&path),
            saved_revision: history.revision(),
            path,
            history,
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn path(&self) -> &FsPath {
        &self.path
    }

    pub fn dataset(&self) -> &Dataset {
        self.history.current()
    }

    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Commit a whole-dataset replacement as one edit
    pub fn apply_edit(&mut self, dataset: Dataset, label: impl Into<String>) {
        let label = label.into();
        tracing::debug!("[{}] apply '{}'", self.id, label);
        self.history.apply(dataset, label);
    }

    /// Write `value` at `path` and commit the result as one edit.
    ///
    /// The write happens on a copy; if it fails the live state is untouched.
    pub fn update_path(
        &mut self,
        mutator: &Mutator<'_>,
        path: &Path,
        value: Option<Value>,
        label: impl Into<String>,
    ) -> Result<(), EditorError> {
        let mut next = self.dataset().clone();
        mutator.set(next.root_mut(), path, value)?;
        self.apply_edit(next, label);
        Ok(())
    }

    pub fn undo(&mut self) -> Option<&Dataset> {
        self.history.undo()
    }

    pub fn redo(&mut self) -> Option<&Dataset> {
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Check if the live state differs from the last saved state
    pub fn is_dirty(&self) -> bool {
        self.history.revision() != self.saved_revision
    }

    /// Record that the live state now matches the file on disk
    pub fn mark_saved(&mut self) {
        self.saved_revision = self.history.revision();
    }

    /// Replace the live state with `dataset` read from disk, dropping history
    pub fn revert_to(&mut self, dataset: Dataset) {
        self.history.reset(dataset);
        self.mark_saved();
    }
}
