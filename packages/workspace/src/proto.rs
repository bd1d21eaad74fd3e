//! # Wire Protocol
//!
//! Messages exchanged between the host, the workspace server and the
//! editor views. Everything is JSON; every message carries a tag.
//!
//! ```text
//!            Inbound (kind = view | host)
//! host ───────────────────────────────────→ server
//!      ←───────────────────────────────────
//!            Outbound (kind = view | event)
//! ```
//!
//! View traffic is wrapped with the id of the document the view edits;
//! the payload is a [`ViewMessage`] (view → host) or [`HostMessage`]
//! (host → view), tagged by `type`.

use lipd_editor::DocumentId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// View → host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ViewMessage {
    /// View finished loading and wants the current dataset
    Ready,

    /// Whole-dataset replacement
    DatasetUpdated {
        data: serde_json::Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    /// Single value written at a path
    UpdatePath {
        path: String,
        #[serde(rename = "pathPrefix", default, skip_serializing_if = "Option::is_none")]
        path_prefix: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<serde_json::Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    Undo,
    Redo,

    ExecuteCommand {
        command: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        arguments: Vec<serde_json::Value>,
    },
}

/// Host → view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    DatasetLoaded {
        id: DocumentId,
        data: serde_json::Value,
    },

    DatasetChanged {
        data: serde_json::Value,
        source: ChangeSource,
    },

    UndoRedoStateChanged {
        #[serde(rename = "canUndo")]
        can_undo: bool,
        #[serde(rename = "canRedo")]
        can_redo: bool,
    },

    SaveComplete {
        success: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },

    ThemeChanged {
        theme: Theme,
    },

    Error {
        error: String,
    },
}

/// Why the host replaced the view's dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeSource {
    Undo,
    Redo,
    Revert,
    /// Path edit committed by the host
    Edit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    HighContrast,
}

/// One line read by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Inbound {
    View {
        document: DocumentId,
        message: ViewMessage,
    },
    Host {
        request: HostRequest,
    },
}

/// Document lifecycle requests from the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostRequest {
    Open { path: PathBuf },
    Focus { document: DocumentId, focused: bool },
    Save { document: DocumentId },
    SaveAs { document: DocumentId, destination: PathBuf },
    Revert { document: DocumentId },
    Backup { document: DocumentId, destination: PathBuf },
    Close { document: DocumentId },
    /// Routed to the active document
    Undo,
    /// Routed to the active document
    Redo,
    SetTheme { theme: Theme },
    Shutdown,
}

/// One line written by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Outbound {
    View {
        document: DocumentId,
        message: HostMessage,
    },
    Event {
        event: HostEvent,
    },
}

/// Notifications for the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEvent {
    DocumentOpened {
        document: DocumentId,
        name: String,
    },
    DocumentEdited {
        document: DocumentId,
        label: String,
    },
    DocumentStateChanged {
        document: DocumentId,
        dirty: bool,
        #[serde(rename = "canUndo")]
        can_undo: bool,
        #[serde(rename = "canRedo")]
        can_redo: bool,
    },
    BackupCreated {
        document: DocumentId,
        id: String,
    },
    DocumentClosed {
        document: DocumentId,
    },
    Error {
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_view_messages_parse() {
        let message: ViewMessage = serde_json::from_value(json!({
            "type": "updatePath",
            "path": "units",
            "pathPrefix": "dataset.paleoData.0.measurementTables.0.variables.2",
            "value": null
        }))
        .unwrap();

        assert_eq!(
            message,
            ViewMessage::UpdatePath {
                path: "units".into(),
                path_prefix: Some("dataset.paleoData.0.measurementTables.0.variables.2".into()),
                value: None,
                label: None,
            }
        );

        let ready: ViewMessage = serde_json::from_str(r#"{"type":"ready"}"#).unwrap();
        assert_eq!(ready, ViewMessage::Ready);

        let command: ViewMessage =
            serde_json::from_str(r#"{"type":"executeCommand","command":"lipd.save"}"#).unwrap();
        assert_eq!(
            command,
            ViewMessage::ExecuteCommand {
                command: "lipd.save".into(),
                arguments: vec![],
            }
        );
    }

    #[test]
    fn test_host_messages_serialize_camel_case() {
        let message = HostMessage::UndoRedoStateChanged {
            can_undo: true,
            can_redo: false,
        };
        assert_eq!(
            serde_json::to_value(&message).unwrap(),
            json!({ "type": "undoRedoStateChanged", "canUndo": true, "canRedo": false })
        );

        let saved = HostMessage::SaveComplete {
            success: true,
            error: None,
        };
        assert_eq!(
            serde_json::to_value(&saved).unwrap(),
            json!({ "type": "saveComplete", "success": true })
        );

        let theme = HostMessage::ThemeChanged {
            theme: Theme::HighContrast,
        };
        assert_eq!(
            serde_json::to_value(&theme).unwrap(),
            json!({ "type": "themeChanged", "theme": "high-contrast" })
        );
    }

    #[test]
    fn test_envelopes() {
        let inbound: Inbound = serde_json::from_str(
            r#"{"kind":"host","request":{"type":"saveAs","document":"a.lipd","destination":"/tmp/b.lipd"}}"#,
        )
        .unwrap();
        assert_eq!(
            inbound,
            Inbound::Host {
                request: HostRequest::SaveAs {
                    document: DocumentId::new("a.lipd"),
                    destination: PathBuf::from("/tmp/b.lipd"),
                }
            }
        );

        let outbound = Outbound::View {
            document: DocumentId::new("a.lipd"),
            message: HostMessage::DatasetChanged {
                data: json!({}),
                source: ChangeSource::Undo,
            },
        };
        assert_eq!(
            serde_json::to_value(&outbound).unwrap(),
            json!({
                "kind": "view",
                "document": "a.lipd",
                "message": { "type": "datasetChanged", "data": {}, "source": "undo" }
            })
        );
    }
}
