//! Runtime configuration: where the board lives and how new projects look.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "TASKBOARD_DIR";
/// Environment variable holding the tracing filter.
pub const LOG_FILTER_ENV: &str = "TASKBOARD_LOG";
/// Log file name inside the data directory.
pub const LOG_FILE: &str = "taskboard.log";

/// Image attributes attached to every project entry and title row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListAttributes {
    pub image: String,
    pub alt: String,
}

impl Default for ListAttributes {
    fn default() -> Self {
        ListAttributes {
            image: "images/project.svg".to_string(),
            alt: "project icon".to_string(),
        }
    }
}

/// Resolved configuration for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub list_attributes: ListAttributes,
}

impl Config {
    /// Resolve from the CLI flag (which clap already fills from
    /// `TASKBOARD_DIR`), falling back to `$HOME/.taskboard`.
    pub fn resolve(data_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        Config {
            data_dir,
            list_attributes: ListAttributes::default(),
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

fn default_data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".taskboard")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_dir_wins() {
        let config = Config::resolve(Some(PathBuf::from("/tmp/board")));
        assert_eq!(config.data_dir, PathBuf::from("/tmp/board"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/board/taskboard.log"));
    }

    #[test]
    fn default_dir_ends_with_taskboard() {
        let config = Config::resolve(None);
        assert!(config.data_dir.ends_with(".taskboard"));
    }
}
