//! The board: the ordered project list and the project mapping.
//!
//! List key `pN` and mapping key `ProjectN` always refer to the same project.
//! Both collections are loaded once at start and written back after every
//! structural change.

use indexmap::IndexMap;

use crate::config::ListAttributes;
use crate::error::BoardError;
use crate::project::{Project, TitleMeta};
use crate::storage::{self, KeyValueStore, PROJECTS_LIST_TEXT_KEY, PROJECT_MAPPING_KEY};

/// Name of the project created for an empty store.
pub const SEED_PROJECT_NAME: &str = "Personal";

/// In-memory board state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Board {
    /// `p1 -> display name`, in display order.
    pub projects_list: IndexMap<String, String>,
    /// `Project1 -> project`.
    pub project_mapping: IndexMap<String, Project>,
}

/// Map a list key (`p3`) to its mapping key (`Project3`).
pub fn project_key_for(list_key: &str) -> Option<String> {
    let index: u32 = list_key.strip_prefix('p')?.parse().ok()?;
    (index > 0).then(|| format!("Project{index}"))
}

/// Map a mapping key (`Project3`) back to its list key (`p3`).
pub fn list_key_for(project_key: &str) -> Option<String> {
    let index: u32 = project_key.strip_prefix("Project")?.parse().ok()?;
    (index > 0).then(|| format!("p{index}"))
}

impl Board {
    /// A board holding a single empty project.
    pub fn seeded(attrs: &ListAttributes) -> Self {
        let mut board = Board::default();
        board.push_project(SEED_PROJECT_NAME, attrs);
        board
    }

    /// Load both collections from the store.
    ///
    /// An empty store yields [`Board::seeded`]. Otherwise the two
    /// collections are reconciled so every `pN` has a `ProjectN` and the
    /// other way round.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S, attrs: &ListAttributes) -> Result<Self, BoardError> {
        let projects_list: IndexMap<String, String> = storage::load(store, PROJECTS_LIST_TEXT_KEY)?;
        let project_mapping: IndexMap<String, Project> = storage::load(store, PROJECT_MAPPING_KEY)?;

        if projects_list.is_empty() && project_mapping.is_empty() {
            tracing::info!("no stored board, starting with a seed project");
            return Ok(Board::seeded(attrs));
        }

        let mut board = Board {
            projects_list,
            project_mapping,
        };
        board.reconcile(attrs);
        Ok(board)
    }

    /// Write both collections to the store.
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<(), BoardError> {
        storage::save(store, PROJECTS_LIST_TEXT_KEY, &self.projects_list)?;
        storage::save(store, PROJECT_MAPPING_KEY, &self.project_mapping)?;
        Ok(())
    }

    /// Restore the `pN <-> ProjectN` correspondence in both directions.
    ///
    /// A list entry without project data gets a title-only project. A
    /// project without a list entry is listed under its title text.
    fn reconcile(&mut self, attrs: &ListAttributes) {
        let missing_projects: Vec<(String, String)> = self
            .projects_list
            .iter()
            .filter_map(|(list_key, name)| {
                let project_key = project_key_for(list_key)?;
                (!self.project_mapping.contains_key(&project_key)).then(|| (project_key, name.clone()))
            })
            .collect();
        for (project_key, name) in missing_projects {
            tracing::warn!(project = %project_key, "list entry had no project data, creating an empty one");
            self.project_mapping.insert(
                project_key,
                Project::titled(TitleMeta::new(name, &attrs.image, &attrs.alt)),
            );
        }

        let missing_entries: Vec<(String, String)> = self
            .project_mapping
            .iter()
            .filter_map(|(project_key, project)| {
                let Some(list_key) = list_key_for(project_key) else {
                    tracing::warn!(project = %project_key, "project key has no list form, not listed");
                    return None;
                };
                (!self.projects_list.contains_key(&list_key)).then(|| (list_key, project.name().to_string()))
            })
            .collect();
        for (list_key, name) in missing_entries {
            tracing::warn!(list_key = %list_key, name = %name, "project had no list entry, listing it");
            self.projects_list.insert(list_key, name);
        }
    }

    /// Append a project to both collections and return its list key.
    ///
    /// The index starts at the list length plus one and skips any index
    /// already taken in either collection, so existing project data is never
    /// replaced. The caller is responsible for validating the name and
    /// persisting.
    pub fn push_project(&mut self, name: &str, attrs: &ListAttributes) -> String {
        let mut index = self.projects_list.len() + 1;
        while self.projects_list.contains_key(&format!("p{index}"))
            || self.project_mapping.contains_key(&format!("Project{index}"))
        {
            index += 1;
        }
        let list_key = format!("p{index}");
        self.projects_list.insert(list_key.clone(), name.to_string());
        self.project_mapping.insert(
            format!("Project{index}"),
            Project::titled(TitleMeta::new(name, &attrs.image, &attrs.alt)),
        );
        list_key
    }

    pub fn project(&self, project_key: &str) -> Result<&Project, BoardError> {
        self.project_mapping
            .get(project_key)
            .ok_or_else(|| BoardError::UnknownProject(project_key.to_string()))
    }

    pub fn project_mut(&mut self, project_key: &str) -> Result<&mut Project, BoardError> {
        self.project_mapping
            .get_mut(project_key)
            .ok_or_else(|| BoardError::UnknownProject(project_key.to_string()))
    }

    /// Resolve a list key to the project it names.
    pub fn project_for_list_key(&self, list_key: &str) -> Option<&Project> {
        project_key_for(list_key).and_then(|k| self.project_mapping.get(&k))
    }

    /// The mapping key a session should start on: `Project1` when present,
    /// otherwise the first mapped project.
    pub fn initial_project_key(&self) -> Result<String, BoardError> {
        if self.project_mapping.contains_key("Project1") {
            return Ok("Project1".to_string());
        }
        self.project_mapping
            .keys()
            .next()
            .cloned()
            .ok_or(BoardError::NoProjects)
    }
}
