//! # Editor Sessions
//!
//! An [`EditorSession`] binds one open document to the view editing it.
//! It turns [`ViewMessage`]s into document operations and reports the
//! results back as [`HostMessage`]s and [`HostEvent`]s.
//!
//! ## Flow
//!
//! ```text
//! View → ViewMessage → EditorSession → LipdDocument
//!                            ↓
//!              HostMessage (to the view)
//!              HostEvent   (to the host)
//! ```
//!
//! Messages are never answered synchronously; everything goes out through
//! the session's [`ViewHandle`] in the order it was produced.

use crate::error::{WorkspaceError, WorkspaceResult};
use crate::proto::{ChangeSource, HostEvent, HostMessage, Outbound, Theme, ViewMessage};
use crate::provider::{Backup, DocumentProvider};
use lipd_editor::{DocumentId, LipdDocument, Mutator, Path};
use lipd_model::{Dataset, Value};
use std::path::{Path as FsPath, PathBuf};
use tokio::sync::mpsc;

pub const SAVE_COMMAND: &str = "lipd.save";
pub const SAVE_AS_COMMAND: &str = "lipd.saveAs";
pub const REVERT_COMMAND: &str = "lipd.revert";
pub const UNDO_COMMAND: &str = "lipd.undo";
pub const REDO_COMMAND: &str = "lipd.redo";

/// Shared services every session works against
pub struct SessionContext {
    pub provider: DocumentProvider,
    pub root_label: String,
    pub theme: Theme,
}

/// Outbound channel bound to one document
#[derive(Debug, Clone)]
pub struct ViewHandle {
    document: DocumentId,
    tx: mpsc::UnboundedSender<Outbound>,
}

impl ViewHandle {
    pub fn new(document: DocumentId, tx: mpsc::UnboundedSender<Outbound>) -> Self {
        Self { document, tx }
    }

    /// Send a message to the view
    pub fn post(&self, message: HostMessage) {
        self.send(Outbound::View {
            document: self.document.clone(),
            message,
        });
    }

    /// Send an event to the host
    pub fn emit(&self, event: HostEvent) {
        self.send(Outbound::Event { event });
    }

    fn send(&self, outbound: Outbound) {
        if self.tx.send(outbound).is_err() {
            tracing::debug!("[{}] outbound channel closed", self.document);
        }
    }
}

#[derive(Debug)]
pub struct EditorSession {
    document: LipdDocument,
    view: ViewHandle,
}

impl EditorSession {
    pub fn new(document: LipdDocument, tx: mpsc::UnboundedSender<Outbound>) -> Self {
        let view = ViewHandle::new(document.id().clone(), tx);
        Self { document, view }
    }

    pub fn id(&self) -> &DocumentId {
        self.document.id()
    }

    pub fn document(&self) -> &LipdDocument {
        &self.document
    }

    pub fn view(&self) -> &ViewHandle {
        &self.view
    }

    /// Handle one message from the view. Failures are reported to the view.
    pub fn handle(&mut self, context: &SessionContext, message: ViewMessage) {
        let result = match message {
            ViewMessage::Ready => {
                self.ready(context.theme);
                Ok(())
            }
            ViewMessage::DatasetUpdated { data, label } => {
                self.replace(context, data, label.unwrap_or_else(|| "Edit dataset".to_string()))
            }
            ViewMessage::UpdatePath {
                path,
                path_prefix,
                value,
                label,
            } => self.update_path(context, &path, path_prefix.as_deref(), value, label),
            ViewMessage::Undo => {
                self.undo();
                Ok(())
            }
            ViewMessage::Redo => {
                self.redo();
                Ok(())
            }
            ViewMessage::ExecuteCommand { command, arguments } => {
                self.execute_command(&context.provider, &command, &arguments)
            }
        };

        if let Err(e) = result {
            tracing::error!("[{}] {}", self.id(), e);
            self.view.post(HostMessage::Error {
                error: e.to_string(),
            });
        }
    }

    fn ready(&self, theme: Theme) {
        self.view.post(HostMessage::DatasetLoaded {
            id: self.id().clone(),
            data: self.document.dataset().to_json(),
        });
        self.view.post(HostMessage::ThemeChanged { theme });
        self.notify_undo_redo();
    }

    /// Commit `dataset` as one edit
    pub fn apply_edit(&mut self, dataset: Dataset, label: String) {
        self.document.apply_edit(dataset, label.clone());
        self.view.emit(HostEvent::DocumentEdited {
            document: self.id().clone(),
            label,
        });
        self.notify_state();
    }

    fn replace(&mut self, context: &SessionContext, data: serde_json::Value, label: String) -> WorkspaceResult<()> {
        let dataset = Dataset::from_json(context.provider.schemas(), data)
            .map_err(lipd_editor::EditorError::from)?;
        self.apply_edit(dataset, label);
        Ok(())
    }

    fn update_path(
        &mut self,
        context: &SessionContext,
        path: &str,
        prefix: Option<&str>,
        value: Option<serde_json::Value>,
        label: Option<String>,
    ) -> WorkspaceResult<()> {
        let path = match prefix {
            Some(prefix) => Path::with_prefix(prefix, path, &context.root_label),
            None => Path::parse_with_root(path, &context.root_label),
        };
        let label = label.unwrap_or_else(|| format!("Edit {}", path));

        let mutator = Mutator::new(context.provider.schemas());
        self.document
            .update_path(&mutator, &path, value.map(Value::from), label.clone())?;

        self.view.post(HostMessage::DatasetChanged {
            data: self.document.dataset().to_json(),
            source: ChangeSource::Edit,
        });
        self.view.emit(HostEvent::DocumentEdited {
            document: self.id().clone(),
            label,
        });
        self.notify_state();
        Ok(())
    }

    /// Step back one edit and push the restored state to the view
    pub fn undo(&mut self) {
        if self.document.undo().is_some() {
            self.push_change(ChangeSource::Undo);
        }
    }

    /// Step forward one edit and push the restored state to the view
    pub fn redo(&mut self) {
        if self.document.redo().is_some() {
            self.push_change(ChangeSource::Redo);
        }
    }

    pub fn save(&mut self, provider: &DocumentProvider) -> WorkspaceResult<()> {
        let result = provider.save(&mut self.document);
        self.report_save(&result);
        if result.is_ok() {
            self.notify_state();
        }
        result
    }

    pub fn save_as(&mut self, provider: &DocumentProvider, destination: &FsPath) -> WorkspaceResult<()> {
        let result = provider.save_as(&self.document, destination);
        self.report_save(&result);
        result
    }

    pub fn revert(&mut self, provider: &DocumentProvider) -> WorkspaceResult<()> {
        provider.revert(&mut self.document)?;
        self.push_change(ChangeSource::Revert);
        Ok(())
    }

    pub fn backup(&self, provider: &DocumentProvider, destination: &FsPath) -> WorkspaceResult<Backup> {
        let backup = provider.backup(&self.document, destination)?;
        self.view.emit(HostEvent::BackupCreated {
            document: self.id().clone(),
            id: backup.id(),
        });
        Ok(backup)
    }

    pub fn set_theme(&self, theme: Theme) {
        self.view.post(HostMessage::ThemeChanged { theme });
    }

    fn execute_command(
        &mut self,
        provider: &DocumentProvider,
        command: &str,
        arguments: &[serde_json::Value],
    ) -> WorkspaceResult<()> {
        tracing::debug!("[{}] command {}", self.id(), command);
        match command {
            SAVE_COMMAND => self.save(provider),
            SAVE_AS_COMMAND => match destination(arguments) {
                Some(destination) => self.save_as(provider, &destination),
                None => {
                    let result = Err(WorkspaceError::MissingDestination(command.to_string()));
                    self.report_save(&result);
                    result
                }
            },
            REVERT_COMMAND => self.revert(provider),
            UNDO_COMMAND => {
                self.undo();
                Ok(())
            }
            REDO_COMMAND => {
                self.redo();
                Ok(())
            }
            other => Err(WorkspaceError::UnknownCommand(other.to_string())),
        }
    }

    fn push_change(&self, source: ChangeSource) {
        self.view.post(HostMessage::DatasetChanged {
            data: self.document.dataset().to_json(),
            source,
        });
        self.notify_state();
    }

    fn report_save(&self, result: &WorkspaceResult<()>) {
        self.view.post(HostMessage::SaveComplete {
            success: result.is_ok(),
            error: result.as_ref().err().map(ToString::to_string),
        });
    }

    fn notify_undo_redo(&self) {
        self.view.post(HostMessage::UndoRedoStateChanged {
            can_undo: self.document.can_undo(),
            can_redo: self.document.can_redo(),
        });
    }

    fn notify_state(&self) {
        self.notify_undo_redo();
        self.view.emit(HostEvent::DocumentStateChanged {
            document: self.id().clone(),
            dirty: self.document.is_dirty(),
            can_undo: self.document.can_undo(),
            can_redo: self.document.can_redo(),
        });
    }
}

/// First command argument, as a path
fn destination(arguments: &[serde_json::Value]) -> Option<PathBuf> {
    arguments
        .first()
        .and_then(serde_json::Value::as_str)
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from)
}
