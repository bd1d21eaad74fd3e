//! End-to-end tests for the workspace server over in-memory streams

use lipd_model::{JsonDatasetIo, SchemaRegistry};
use lipd_workspace::{
    ChangeSource, DirectWrite, DocumentProvider, FallbackWriter, HostEvent, HostMessage, Outbound,
    SessionContext, Theme, WorkspaceConfig, WorkspaceServer, WriteStrategy,
};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

struct ReadOnlyScratch;

impl WriteStrategy for ReadOnlyScratch {
    fn name(&self) -> &'static str {
        "read-only"
    }

    fn write(&self, _path: &Path, _bytes: &[u8]) -> std::io::Result<()> {
        Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "scratch directory is read-only",
        ))
    }
}

fn script(lines: &[serde_json::Value]) -> Vec<u8> {
    let mut input = Vec::new();
    for line in lines {
        input.extend_from_slice(line.to_string().as_bytes());
        input.push(b'\n');
    }
    input
}

async fn run(server: WorkspaceServer, lines: &[serde_json::Value]) -> Vec<Outbound> {
    let input = script(lines);
    let mut output = Vec::new();
    server.run(input.as_slice(), &mut output).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn view_messages(outbound: &[Outbound]) -> Vec<&HostMessage> {
    outbound
        .iter()
        .filter_map(|o| match o {
            Outbound::View { message, .. } => Some(message),
            Outbound::Event { .. } => None,
        })
        .collect()
}

fn server(dir: &Path) -> WorkspaceServer {
    WorkspaceServer::from_config(&WorkspaceConfig {
        scratch_dir: Some(dir.join("scratch")),
        ..WorkspaceConfig::default()
    })
}

#[tokio::test]
async fn test_edit_undo_save_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ODP1098B.lipd");
    let id = path.to_string_lossy().into_owned();

    let outbound = run(
        server(dir.path()),
        &[
            json!({ "kind": "host", "request": { "type": "open", "path": path } }),
            json!({ "kind": "view", "document": id, "message": { "type": "ready" } }),
            json!({ "kind": "view", "document": id, "message": {
                "type": "updatePath", "path": "dataset.location.latitude", "value": -41.0, "label": "Set latitude"
            }}),
            json!({ "kind": "view", "document": id, "message": {
                "type": "updatePath", "path": "dataset.archiveType", "value": "MarineSediment"
            }}),
            json!({ "kind": "host", "request": { "type": "undo" } }),
            json!({ "kind": "view", "document": id, "message": { "type": "executeCommand", "command": "lipd.save" } }),
            json!({ "kind": "host", "request": { "type": "shutdown" } }),
        ],
    )
    .await;

    assert!(matches!(
        &outbound[0],
        Outbound::Event { event: HostEvent::DocumentOpened { name, .. } } if name == "ODP1098B"
    ));

    let messages = view_messages(&outbound);
    assert!(matches!(messages[0], HostMessage::DatasetLoaded { .. }));
    assert!(messages.iter().any(|m| matches!(
        m,
        HostMessage::DatasetChanged { source: ChangeSource::Undo, .. }
    )));
    assert_eq!(
        messages.last(),
        Some(&&HostMessage::UndoRedoStateChanged {
            can_undo: true,
            can_redo: true
        })
    );
    assert!(messages.contains(&&HostMessage::SaveComplete {
        success: true,
        error: None
    }));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["location"]["latitude"], json!(-41));
    assert_eq!(saved["name"], "ODP1098B");
    assert_ne!(saved["archiveType"], "MarineSediment");

    let last_state = outbound.iter().rev().find_map(|o| match o {
        Outbound::Event {
            event: HostEvent::DocumentStateChanged { dirty, .. },
        } => Some(*dirty),
        _ => None,
    });
    assert_eq!(last_state, Some(false));
}

#[tokio::test]
async fn test_fallback_write_reports_success() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("core.lipd");
    let id = path.to_string_lossy().into_owned();

    let schemas = Arc::new(SchemaRegistry::lipd());
    let provider = DocumentProvider::new(
        schemas.clone(),
        Arc::new(JsonDatasetIo::new(schemas)),
        FallbackWriter::new(Box::new(ReadOnlyScratch), Box::new(DirectWrite)),
    );
    let server = WorkspaceServer::new(SessionContext {
        provider,
        root_label: "dataset".into(),
        theme: Theme::Light,
    });

    let outbound = run(
        server,
        &[
            json!({ "kind": "host", "request": { "type": "open", "path": path } }),
            json!({ "kind": "view", "document": id, "message": { "type": "executeCommand", "command": "lipd.save" } }),
        ],
    )
    .await;

    assert_eq!(
        view_messages(&outbound),
        vec![
            &HostMessage::SaveComplete {
                success: true,
                error: None
            },
            &HostMessage::UndoRedoStateChanged {
                can_undo: false,
                can_redo: false
            },
        ]
    );
    assert!(path.exists());
}

#[tokio::test]
async fn test_revert_and_close() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("core.lipd");
    std::fs::write(&path, r#"{ "name": "core", "archiveType": "Coral" }"#).unwrap();
    let id = path.to_string_lossy().into_owned();

    let outbound = run(
        server(dir.path()),
        &[
            json!({ "kind": "host", "request": { "type": "open", "path": path } }),
            json!({ "kind": "view", "document": id, "message": {
                "type": "datasetUpdated", "data": { "name": "core", "archiveType": "Wood" }
            }}),
            json!({ "kind": "host", "request": { "type": "revert", "document": id } }),
            json!({ "kind": "host", "request": { "type": "close", "document": id } }),
            json!({ "kind": "host", "request": { "type": "undo" } }),
        ],
    )
    .await;

    let changed = view_messages(&outbound)
        .into_iter()
        .find_map(|m| match m {
            HostMessage::DatasetChanged {
                data,
                source: ChangeSource::Revert,
            } => Some(data.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(changed["archiveType"], "Coral");

    let events: Vec<_> = outbound
        .iter()
        .filter_map(|o| match o {
            Outbound::Event { event } => Some(event),
            Outbound::View { .. } => None,
        })
        .collect();
    assert!(events
        .iter()
        .any(|e| matches!(e, HostEvent::DocumentEdited { label, .. } if label == "Edit dataset")));
    assert!(events
        .iter()
        .any(|e| matches!(e, HostEvent::DocumentClosed { .. })));
    assert!(matches!(
        events.last(),
        Some(HostEvent::Error { message }) if message == "No active document"
    ));
}
