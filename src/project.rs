//! Project records.
//!
//! In memory a project is its title metadata plus a keyed collection of tasks.
//! On disk it is a single JSON object: the `"Project"` key holds the title
//! metadata and every other key is a task identifier. That sentinel only
//! exists inside the serde impls below.

use std::collections::BTreeMap;

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::BoardError;
use crate::task::Task;

/// Key reserved for title metadata in the stored project object.
pub const TITLE_KEY: &str = "Project";

/// Display metadata for a project's title row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleMeta {
    #[serde(default = "default_position")]
    pub position: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub alt: String,
    pub text: String,
}

fn default_position() -> String {
    "middle".to_string()
}

impl TitleMeta {
    pub fn new(text: impl Into<String>, image: impl Into<String>, alt: impl Into<String>) -> Self {
        TitleMeta {
            position: default_position(),
            image: image.into(),
            alt: alt.into(),
            text: text.into(),
        }
    }
}

/// A named collection of tasks.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub meta: TitleMeta,
    pub tasks: BTreeMap<u64, Task>,
}

impl Project {
    /// A project with title metadata and no tasks.
    pub fn titled(meta: TitleMeta) -> Self {
        Project {
            meta,
            tasks: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.meta.text
    }

    /// Generate the next task identifier: one past the largest in use.
    pub fn next_task_id(&self) -> Result<u64, BoardError> {
        let max = self.tasks.keys().next_back().copied().unwrap_or(0);
        max.checked_add(1)
            .ok_or_else(|| BoardError::Corrupt(format!("task ids exhausted in project {}", self.meta.text)))
    }

    pub fn task(&self, id: u64) -> Option<&Task> {
        self.tasks.get(&id)
    }
}

impl Serialize for Project {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.tasks.len() + 1))?;
        map.serialize_entry(TITLE_KEY, &self.meta)?;
        for (id, task) in &self.tasks {
            map.serialize_entry(&id.to_string(), task)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Project {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let mut raw = Map::<String, Value>::deserialize(deserializer)?;
        let meta = raw
            .remove(TITLE_KEY)
            .ok_or_else(|| D::Error::custom("project is missing its \"Project\" title entry"))?;
        let meta: TitleMeta = serde_json::from_value(meta).map_err(D::Error::custom)?;

        let mut tasks = BTreeMap::new();
        for (key, value) in raw {
            match key.parse::<u64>() {
                Ok(id) if id > 0 => {
                    let task: Task = serde_json::from_value(value)
                        .map_err(|e| D::Error::custom(format!("task {key}: {e}")))?;
                    tasks.insert(id, task);
                }
                _ => {
                    tracing::warn!(project = %meta.text, key = %key, "skipping non-task key in project");
                }
            }
        }
        Ok(Project { meta, tasks })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::DueDate;
    use crate::fields::Priority;
    use serde_json::json;

    fn task(title: &str) -> Task {
        Task::new(
            title,
            "desc",
            DueDate::parse_display("01/15/2025").unwrap(),
            Priority::Medium,
            "not-started",
        )
    }

    #[test]
    fn next_id_is_one_past_max() {
        let mut project = Project::titled(TitleMeta::new("Work", "", ""));
        assert_eq!(project.next_task_id().unwrap(), 1);
        for id in [1, 2, 5] {
            project.tasks.insert(id, task("t"));
        }
        assert_eq!(project.next_task_id().unwrap(), 6);
    }

    #[test]
    fn largest_stored_id_cannot_be_followed() {
        let raw = json!({
            "Project": {"text": "Work"},
            "18446744073709551615": {
                "task-title": "Last",
                "task-description": "d",
                "task-duedate": "01/15/2025",
                "priority-level": "high",
                "status": "completed"
            }
        });
        let project: Project = serde_json::from_value(raw).unwrap();
        assert!(matches!(project.next_task_id(), Err(BoardError::Corrupt(_))));
    }

    #[test]
    fn stored_layout_round_trip() {
        let raw = json!({
            "Project": {"position": "middle", "image": "img/p.svg", "alt": "icon", "text": "Work"},
            "2": {
                "task-title": "Plan",
                "task-description": "Sprint plan",
                "task-duedate": "02/01/2025",
                "priority-level": "low",
                "status": "not-started",
                "task-edit": "Edit"
            }
        });
        let project: Project = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(project.name(), "Work");
        assert_eq!(project.tasks.keys().copied().collect::<Vec<_>>(), vec![2]);
        assert_eq!(serde_json::to_value(&project).unwrap(), raw);
    }

    #[test]
    fn title_entry_is_required() {
        let raw = json!({ "1": {} });
        assert!(serde_json::from_value::<Project>(raw).is_err());
    }

    #[test]
    fn non_numeric_keys_are_skipped() {
        let raw = json!({
            "Project": {"text": "Home"},
            "notes": "stray"
        });
        let project: Project = serde_json::from_value(raw).unwrap();
        assert!(project.tasks.is_empty());
        assert_eq!(project.meta.position, "middle");
    }
}
