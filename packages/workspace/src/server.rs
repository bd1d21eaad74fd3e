//! # Workspace Server
//!
//! Newline-delimited JSON over any async reader/writer pair (stdio in the
//! `lipd-server` binary). One loop owns every session: each inbound line is
//! handled to completion, then everything it produced is written out in
//! order before the next line is read.

use crate::config::WorkspaceConfig;
use crate::error::WorkspaceResult;
use crate::proto::{HostEvent, HostRequest, Inbound, Outbound};
use crate::provider::DocumentProvider;
use crate::registry::SessionRegistry;
use crate::session::{EditorSession, SessionContext};
use lipd_editor::DocumentId;
use lipd_model::SchemaRegistry;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

pub struct WorkspaceServer {
    context: SessionContext,
    sessions: SessionRegistry,
    tx: mpsc::UnboundedSender<Outbound>,
    rx: mpsc::UnboundedReceiver<Outbound>,
}

impl WorkspaceServer {
    pub fn new(context: SessionContext) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            context,
            sessions: SessionRegistry::new(),
            tx,
            rx,
        }
    }

    pub fn from_config(config: &WorkspaceConfig) -> Self {
        let schemas = Arc::new(SchemaRegistry::lipd());
        Self::new(SessionContext {
            provider: DocumentProvider::from_config(config, schemas),
            root_label: config.root_label.clone(),
            theme: config.theme,
        })
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Serve until shutdown or end of input
    pub async fn run<R, W>(mut self, input: R, mut output: W) -> WorkspaceResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        tracing::info!("Workspace server ready");

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let keep_going = self.handle_line(&line);

            for outbound in self.drain() {
                let mut encoded = serde_json::to_vec(&outbound)?;
                encoded.push(b'\n');
                output.write_all(&encoded).await?;
            }
            output.flush().await?;

            if !keep_going {
                tracing::info!("Shutdown requested");
                break;
            }
        }

        Ok(())
    }

    /// Handle one raw inbound line. Returns `false` once shutdown is requested.
    pub fn handle_line(&mut self, line: &str) -> bool {
        match serde_json::from_str::<Inbound>(line) {
            Ok(inbound) => self.handle(inbound),
            Err(e) => {
                tracing::warn!("Malformed message: {}", e);
                self.emit(HostEvent::Error {
                    message: format!("Malformed message: {}", e),
                });
                true
            }
        }
    }

    /// Returns `false` once shutdown is requested.
    pub fn handle(&mut self, inbound: Inbound) -> bool {
        let result = match inbound {
            Inbound::View { document, message } => self
                .sessions
                .get_mut(&document)
                .map(|session| session.handle(&self.context, message)),
            Inbound::Host {
                request: HostRequest::Shutdown,
            } => return false,
            Inbound::Host { request } => self.handle_request(request),
        };

        if let Err(e) = result {
            tracing::error!("{}", e);
            self.emit(HostEvent::Error {
                message: e.to_string(),
            });
        }
        true
    }

    /// Everything produced since the last drain, in order
    pub fn drain(&mut self) -> Vec<Outbound> {
        let mut drained = Vec::new();
        while let Ok(outbound) = self.rx.try_recv() {
            drained.push(outbound);
        }
        drained
    }

    fn handle_request(&mut self, request: HostRequest) -> WorkspaceResult<()> {
        let provider = &self.context.provider;

        match request {
            HostRequest::Open { path } => {
                let id = DocumentId::from_path(&path);
                if !self.sessions.contains(&id) {
                    let document = provider.open_document(&path)?;
                    self.sessions
                        .insert(EditorSession::new(document, self.tx.clone()));
                }

                let name = self
                    .sessions
                    .get(&id)
                    .and_then(|session| session.document().dataset().name())
                    .unwrap_or_default()
                    .to_string();
                self.sessions.set_active(&id, true);
                self.emit(HostEvent::DocumentOpened { document: id, name });
            }
            HostRequest::Focus { document, focused } => {
                self.sessions.set_active(&document, focused);
            }
            HostRequest::Save { document } => {
                self.sessions.get_mut(&document)?.save(provider)?;
            }
            HostRequest::SaveAs {
                document,
                destination,
            } => {
                self.sessions
                    .get_mut(&document)?
                    .save_as(provider, &destination)?;
            }
            HostRequest::Revert { document } => {
                self.sessions.get_mut(&document)?.revert(provider)?;
            }
            HostRequest::Backup {
                document,
                destination,
            } => {
                self.sessions
                    .get_mut(&document)?
                    .backup(provider, &destination)?;
            }
            HostRequest::Close { document } => {
                if self.sessions.remove(&document).is_some() {
                    tracing::info!("Closed {}", document);
                    self.emit(HostEvent::DocumentClosed { document });
                }
            }
            HostRequest::Undo => self.sessions.active_mut()?.undo(),
            HostRequest::Redo => self.sessions.active_mut()?.redo(),
            HostRequest::SetTheme { theme } => {
                self.context.theme = theme;
                for session in self.sessions.sessions() {
                    session.set_theme(theme);
                }
            }
            HostRequest::Shutdown => {}
        }

        Ok(())
    }

    fn emit(&self, event: HostEvent) {
        let _ = self.tx.send(Outbound::Event { event });
    }
}
