use crate::repository::{RepositoryError, TaskRepository};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_TASK_FILE: &str = "tasks.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot read task file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("task file {path} is not a valid task list")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("task file {path} breaks the task id rules")]
    Invalid {
        path: PathBuf,
        #[source]
        source: RepositoryError,
    },
    #[error("cannot serialize tasks")]
    Serialize(#[from] serde_json::Error),
    #[error("cannot write task file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Whole-collection persistence for tasks.
#[cfg_attr(test, mockall::automock)]
pub trait Store {
    /// Reads the full collection. A missing backing file yields an empty one.
    fn load(&self) -> Result<TaskRepository, StoreError>;
    /// Replaces the persisted collection with `tasks`.
    fn save(&self, tasks: &TaskRepository) -> Result<(), StoreError>;
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| DEFAULT_TASK_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn write_err(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }

    fn write_contents(&self, contents: &str) -> Result<(), StoreError> {
        let temp_path = self.temp_path();
        fs::write(&temp_path, contents).map_err(|e| self.write_err(e))?;
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(self.write_err(e));
        }
        Ok(())
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(DEFAULT_TASK_FILE)
    }
}

impl Store for JsonFileStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<TaskRepository, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!("Task file missing, creating an empty one");
                let empty = TaskRepository::new();
                self.save(&empty)?;
                return Ok(empty);
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let tasks: TaskRepository =
            serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        tasks.check_ids().map_err(|source| StoreError::Invalid {
            path: self.path.clone(),
            source,
        })?;
        debug!("Loaded {} tasks", tasks.len());
        Ok(tasks)
    }

    #[tracing::instrument(skip(self, tasks), fields(path = %self.path.display()))]
    fn save(&self, tasks: &TaskRepository) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(tasks)?;
        self.write_contents(&contents)?;
        debug!("Saved {} tasks", tasks.len());
        Ok(())
    }
}
