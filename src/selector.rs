//! Project switching and registration.

use crate::board::project_key_for;
use crate::error::BoardError;
use crate::session::{PaneMode, Session};
use crate::storage::KeyValueStore;

impl Session {
    /// Make the project behind a list key (`pN`) active and show its task
    /// list. Returns `false` for keys that do not resolve.
    pub fn select_project(&mut self, list_key: &str) -> bool {
        let Some(project_key) = project_key_for(list_key) else {
            return false;
        };
        if !self.board.project_mapping.contains_key(&project_key) {
            tracing::debug!(list_key, "select of unmapped project ignored");
            return false;
        }
        tracing::debug!(list_key, project = %project_key, "project selected");
        self.active = project_key;
        self.mode = PaneMode::ListOnly;
        true
    }

    /// Append a project with the given name and save both collections.
    ///
    /// Returns the new list key, or `None` if the name is blank.
    pub fn register_project<S: KeyValueStore + ?Sized>(
        &mut self,
        name: &str,
        store: &mut S,
    ) -> Result<Option<String>, BoardError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }
        let list_key = self.board.push_project(name, &self.list_attributes);
        tracing::info!(list_key = %list_key, name, "project registered");
        self.board.save(store)?;
        Ok(Some(list_key))
    }
}

#[cfg(test)]
mod tests {
    use crate::lifecycle::tests::{session, FakeForm};
    use crate::session::PaneMode;
    use crate::storage::{MemoryStore, PROJECTS_LIST_TEXT_KEY, PROJECT_MAPPING_KEY};
    use serde_json::json;

    #[test]
    fn register_appends_to_both_collections() {
        let mut s = session();
        let mut store = MemoryStore::new();
        s.register_project("Work", &mut store).unwrap();

        let key = s.register_project("  Launch Plan ", &mut store).unwrap();
        assert_eq!(key.as_deref(), Some("p3"));
        assert_eq!(
            s.board.projects_list.get_index(2),
            Some((&"p3".to_string(), &"Launch Plan".to_string()))
        );
        let project = s.board.project("Project3").unwrap();
        assert_eq!(project.name(), "Launch Plan");
        assert!(project.tasks.is_empty());

        let list = store.raw(PROJECTS_LIST_TEXT_KEY).unwrap();
        assert_eq!(list["p3"], json!("Launch Plan"));
        let mapping = store.raw(PROJECT_MAPPING_KEY).unwrap();
        assert_eq!(mapping["Project3"]["Project"]["text"], json!("Launch Plan"));
        assert_eq!(mapping["Project3"].as_object().unwrap().len(), 1);
    }

    #[test]
    fn register_keeps_unlisted_project_data() {
        use crate::board::Board;
        use crate::config::ListAttributes;
        use crate::session::Session;
        use crate::storage::KeyValueStore;

        let mut store = MemoryStore::new();
        store.put(PROJECTS_LIST_TEXT_KEY, &json!({"p1": "Home"})).unwrap();
        store
            .put(
                PROJECT_MAPPING_KEY,
                &json!({
                    "Project1": {"Project": {"text": "Home"}},
                    "Project2": {
                        "Project": {"text": "Garden"},
                        "1": {
                            "task-title": "Plant",
                            "task-description": "Tomatoes",
                            "task-duedate": "05/01/2025",
                            "priority-level": "low",
                            "status": "not-started"
                        }
                    }
                }),
            )
            .unwrap();
        let attrs = ListAttributes::default();
        let board = Board::load(&store, &attrs).unwrap();
        let mut s = Session::new(board, attrs).unwrap();

        let key = s.register_project("Launch Plan", &mut store).unwrap();
        assert_eq!(key.as_deref(), Some("p3"));
        let garden = s.board.project("Project2").unwrap();
        assert_eq!(garden.name(), "Garden");
        assert_eq!(garden.tasks.len(), 1);
        let mapping = store.raw(PROJECT_MAPPING_KEY).unwrap();
        assert_eq!(mapping["Project2"]["1"]["task-title"], json!("Plant"));
        assert_eq!(mapping["Project3"]["Project"]["text"], json!("Launch Plan"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut s = session();
        let mut store = MemoryStore::new();
        assert_eq!(s.register_project("   ", &mut store).unwrap(), None);
        assert_eq!(s.board.projects_list.len(), 1);
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn select_switches_project_and_closes_form() {
        let mut s = session();
        let mut store = MemoryStore::new();
        s.register_project("Work", &mut store).unwrap();
        let mut form = FakeForm::default();
        s.begin_create(&mut form);

        assert!(s.select_project("p2"));
        assert_eq!(s.active, "Project2");
        assert_eq!(s.mode, PaneMode::ListOnly);
        assert_eq!(s.active_project().unwrap().name(), "Work");
    }

    #[test]
    fn select_of_unknown_key_is_ignored() {
        let mut s = session();
        assert!(!s.select_project("p7"));
        assert!(!s.select_project("bogus"));
        assert_eq!(s.active, "Project1");
    }
}
