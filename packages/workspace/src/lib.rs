//! # LiPD Workspace
//!
//! Hosts editor sessions for open dataset files: routes view and host
//! messages, saves and reverts documents, and serves the whole thing over a
//! line-based JSON protocol.
//!
//! ```text
//! host ⇄ WorkspaceServer ─┬─ SessionRegistry ─ EditorSession ─ LipdDocument
//!                         └─ DocumentProvider ─ DatasetIo + FallbackWriter
//! ```

pub mod config;
pub mod error;
pub mod proto;
pub mod provider;
pub mod registry;
pub mod server;
pub mod session;
pub mod writer;

pub use config::{WorkspaceConfig, DEFAULT_CONFIG_NAME};
pub use error::{WorkspaceError, WorkspaceResult};
pub use proto::{ChangeSource, HostEvent, HostMessage, HostRequest, Inbound, Outbound, Theme, ViewMessage};
pub use provider::{Backup, DocumentProvider};
pub use registry::SessionRegistry;
pub use server::WorkspaceServer;
pub use session::{EditorSession, SessionContext, ViewHandle};
pub use writer::{DirectWrite, FallbackWriter, StagedWrite, WriteStrategy};
