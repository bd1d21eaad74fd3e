//! # LiPD Editor
//!
//! Core editing engine for LiPD datasets.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: dataset tree, schemas, file I/O      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document lifecycle + edits          │
//! │  - Resolve and write values by dot-path     │
//! │  - Snapshot undo/redo history               │
//! │  - Dirty tracking against the saved state   │
//! │  - Breadcrumbs for navigation               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ workspace: sessions, views, save/revert     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Editor state is the source of truth**: the file on disk is a projection
//! 2. **Whole-state snapshots**: every edit is undone by restoring a snapshot
//! 3. **Paths are transient**: addresses live only as long as one update
//! 4. **Absence is not an error**: resolving a missing path yields `None`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use lipd_editor::{LipdDocument, Mutator, Path};
//! use lipd_model::{Dataset, SchemaRegistry, Value};
//!
//! let registry = SchemaRegistry::lipd();
//! let mut doc = LipdDocument::new(path, Dataset::empty(&registry, "core"));
//!
//! let mutator = Mutator::new(&registry);
//! doc.update_path(&mutator, &Path::parse("dataset.location.latitude"), Some(Value::from(-41.0)), "Set latitude")?;
//!
//! doc.undo();
//! doc.redo();
//! ```

mod document;
mod errors;
mod history;
mod navigation;
mod path;

pub use document::{DocumentId, LipdDocument};
pub use errors::EditorError;
pub use history::{Edit, EditHistory};
pub use navigation::{breadcrumbs, humanize, kind_at, Breadcrumb};
pub use path::{resolve, MutationError, Mutator, Path, Segment, ROOT_LABEL};
