//! # Document Provider
//!
//! Moves documents between disk and memory: opening (with the empty-dataset
//! fallback), saving, save-as, revert and backups.

use crate::config::WorkspaceConfig;
use crate::error::{WorkspaceError, WorkspaceResult};
use crate::writer::FallbackWriter;
use lipd_editor::{EditHistory, LipdDocument};
use lipd_model::{Dataset, DatasetIo, JsonDatasetIo, ReadError, SchemaRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub struct DocumentProvider {
    schemas: Arc<SchemaRegistry>,
    io: Arc<dyn DatasetIo>,
    writer: FallbackWriter,

    /// Undo depth for newly opened documents (0 = unlimited)
    history_limit: usize,
}

impl DocumentProvider {
    pub fn new(schemas: Arc<SchemaRegistry>, io: Arc<dyn DatasetIo>, writer: FallbackWriter) -> Self {
        Self {
            schemas,
            io,
            writer,
            history_limit: 0,
        }
    }

    pub fn from_config(config: &WorkspaceConfig, schemas: Arc<SchemaRegistry>) -> Self {
        let io = JsonDatasetIo::new(schemas.clone()).with_pretty(config.pretty_json);
        Self::new(
            schemas,
            Arc::new(io),
            FallbackWriter::staged(config.scratch_dir()),
        )
        .with_history_limit(config.history_limit)
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// Read the dataset at `path`.
    ///
    /// Missing, empty and unparseable files yield an empty dataset named
    /// after the file.
    pub fn load(&self, path: &Path) -> WorkspaceResult<Dataset> {
        match self.io.read(path) {
            Ok(dataset) => Ok(dataset),
            Err(e) if e.is_recoverable() => {
                tracing::warn!("{}; starting from an empty dataset", e);
                Ok(Dataset::empty(&self.schemas, &base_name(path)))
            }
            Err(source) => Err(WorkspaceError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Read the dataset at `path` for a write that goes straight back to
    /// disk. Only a missing or blank file starts empty; anything that exists
    /// but cannot be read is an error, so it is never overwritten.
    pub fn load_existing(&self, path: &Path) -> WorkspaceResult<Dataset> {
        match self.io.read(path) {
            Ok(dataset) => Ok(dataset),
            Err(ReadError::NotFound(_) | ReadError::Empty(_)) => {
                Ok(Dataset::empty(&self.schemas, &base_name(path)))
            }
            Err(source) => Err(WorkspaceError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn open_document(&self, path: &Path) -> WorkspaceResult<LipdDocument> {
        let dataset = self.load(path)?;
        tracing::info!("Opened {}", path.display());
        Ok(self.document(path, dataset))
    }

    /// Open without the parse-failure fallback. See [`Self::load_existing`].
    pub fn open_existing(&self, path: &Path) -> WorkspaceResult<LipdDocument> {
        let dataset = self.load_existing(path)?;
        Ok(self.document(path, dataset))
    }

    fn document(&self, path: &Path, dataset: Dataset) -> LipdDocument {
        let history = EditHistory::with_max_levels(dataset, self.history_limit);
        LipdDocument::with_history(path.to_path_buf(), history)
    }

    /// Write the live state to the document's own file and mark it clean
    pub fn save(&self, document: &mut LipdDocument) -> WorkspaceResult<()> {
        self.write(document.path(), document.dataset())?;
        document.mark_saved();
        Ok(())
    }

    /// Write the live state elsewhere. The document keeps its path and
    /// dirty state.
    pub fn save_as(&self, document: &LipdDocument, destination: &Path) -> WorkspaceResult<()> {
        self.write(destination, document.dataset())
    }

    /// Reload from disk, dropping all history
    pub fn revert(&self, document: &mut LipdDocument) -> WorkspaceResult<()> {
        let dataset = self.load(document.path())?;
        document.revert_to(dataset);
        tracing::info!("Reverted {}", document.path().display());
        Ok(())
    }

    pub fn backup(&self, document: &LipdDocument, destination: &Path) -> WorkspaceResult<Backup> {
        self.write(destination, document.dataset())?;
        Ok(Backup {
            path: destination.to_path_buf(),
        })
    }

    fn write(&self, path: &Path, dataset: &Dataset) -> WorkspaceResult<()> {
        let bytes = self.io.encode(dataset).map_err(|e| WorkspaceError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        self.writer.write(path, &bytes)?;
        tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

/// Copy of a document kept for crash recovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backup {
    path: PathBuf,
}

impl Backup {
    pub fn id(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the backup file. Already-deleted backups are not an error.
    pub fn delete(self) -> WorkspaceResult<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// File name without its extension
fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
