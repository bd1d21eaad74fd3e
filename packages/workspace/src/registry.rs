use crate::error::{WorkspaceError, WorkspaceResult};
use crate::session::EditorSession;
use lipd_editor::DocumentId;
use std::collections::HashMap;

/// Open sessions by document id, plus the one that has focus
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<DocumentId, EditorSession>,
    active: Option<DocumentId>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session: EditorSession) {
        self.sessions.insert(session.id().clone(), session);
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn get(&self, id: &DocumentId) -> Option<&EditorSession> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &DocumentId) -> WorkspaceResult<&mut EditorSession> {
        self.sessions
            .get_mut(id)
            .ok_or_else(|| WorkspaceError::UnknownDocument(id.clone()))
    }

    pub fn remove(&mut self, id: &DocumentId) -> Option<EditorSession> {
        if self.active.as_ref() == Some(id) {
            self.active = None;
        }
        self.sessions.remove(id)
    }

    /// Track host focus. Losing focus only clears the active session if it
    /// was the one that lost it.
    pub fn set_active(&mut self, id: &DocumentId, focused: bool) {
        if focused {
            if self.sessions.contains_key(id) {
                self.active = Some(id.clone());
            }
        } else if self.active.as_ref() == Some(id) {
            self.active = None;
        }
    }

    pub fn active_id(&self) -> Option<&DocumentId> {
        self.active.as_ref()
    }

    /// Session that receives global undo/redo
    pub fn active_mut(&mut self) -> WorkspaceResult<&mut EditorSession> {
        let id = self.active.as_ref().ok_or(WorkspaceError::NoActiveDocument)?;
        self.sessions
            .get_mut(id)
            .ok_or_else(|| WorkspaceError::UnknownDocument(id.clone()))
    }

    pub fn sessions(&self) -> impl Iterator<Item = &EditorSession> {
        self.sessions.values()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lipd_editor::LipdDocument;
    use lipd_model::{Dataset, SchemaRegistry};
    use std::path::PathBuf;
    use tokio::sync::mpsc;

    fn session(name: &str) -> EditorSession {
        let (tx, _rx) = mpsc::unbounded_channel();
        let document = LipdDocument::new(
            PathBuf::from(format!("{}.lipd", name)),
            Dataset::empty(&SchemaRegistry::lipd(), name),
        );
        EditorSession::new(document, tx)
    }

    #[test]
    fn test_focus_tracking() {
        let mut registry = SessionRegistry::new();
        registry.insert(session("a"));
        registry.insert(session("b"));
        let a = DocumentId::new("a.lipd");
        let b = DocumentId::new("b.lipd");

        assert!(matches!(registry.active_mut(), Err(WorkspaceError::NoActiveDocument)));

        registry.set_active(&a, true);
        registry.set_active(&b, true);
        assert_eq!(registry.active_id(), Some(&b));

        registry.set_active(&a, false);
        assert_eq!(registry.active_id(), Some(&b));

        registry.set_active(&b, false);
        assert_eq!(registry.active_id(), None);
    }

    #[test]
    fn test_focus_on_unknown_document_is_ignored() {
        let mut registry = SessionRegistry::new();
        registry.set_active(&DocumentId::new("ghost.lipd"), true);
        assert_eq!(registry.active_id(), None);
    }

    #[test]
    fn test_remove_clears_active() {
        let mut registry = SessionRegistry::new();
        registry.insert(session("a"));
        let a = DocumentId::new("a.lipd");
        registry.set_active(&a, true);

        assert!(registry.remove(&a).is_some());
        assert_eq!(registry.active_id(), None);
        assert!(registry.is_empty());
        assert!(matches!(registry.get_mut(&a), Err(WorkspaceError::UnknownDocument(_))));
    }
}
