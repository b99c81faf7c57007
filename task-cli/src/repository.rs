use crate::task::{Status, Task};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RepositoryError {
    #[error("no task id left above {0}")]
    IdsExhausted(u32),
    #[error("task id 0 is not allowed")]
    ZeroId,
    #[error("task id {0} appears more than once")]
    DuplicateId(u32),
}

/// The ordered task collection that is loaded and saved as a whole.
///
/// Insertion order is preserved; ids are unique within the collection.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(transparent)]
pub struct TaskRepository {
    tasks: Vec<Task>,
}

impl TaskRepository {
    pub fn new() -> Self {
        Self { tasks: vec![] }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// One past the highest id in the collection, or 1 when empty.
    pub fn next_id(&self) -> Result<u32, RepositoryError> {
        match self.tasks.iter().map(Task::id).max() {
            None => Ok(1),
            Some(max) => max
                .checked_add(1)
                .ok_or(RepositoryError::IdsExhausted(max)),
        }
    }

    /// Appends a new `todo` task and returns it.
    pub fn add(&mut self, description: String) -> Result<&Task, RepositoryError> {
        let task = Task::new(self.next_id()?, description, Utc::now());
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Checks that every id is positive and unique.
    pub fn check_ids(&self) -> Result<(), RepositoryError> {
        let mut seen = HashSet::with_capacity(self.tasks.len());
        for task in &self.tasks {
            if task.id() == 0 {
                return Err(RepositoryError::ZeroId);
            }
            if !seen.insert(task.id()) {
                return Err(RepositoryError::DuplicateId(task.id()));
            }
        }
        Ok(())
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == id)
    }

    fn find_by_id_mut(&mut self, id: u32) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id() == id)
    }

    /// Replaces the description of task `id`. Returns `false` if there is no such task.
    pub fn update_description(&mut self, id: u32, description: String) -> bool {
        match self.find_by_id_mut(id) {
            Some(task) => {
                task.set_description(description, Utc::now());
                true
            }
            None => false,
        }
    }

    /// Moves task `id` to `status`. Returns `false` if there is no such task.
    pub fn set_status(&mut self, id: u32, status: Status) -> bool {
        match self.find_by_id_mut(id) {
            Some(task) => {
                task.set_status(status, Utc::now());
                true
            }
            None => false,
        }
    }

    /// Removes task `id`, keeping the relative order of the rest.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id() != id);
        self.tasks.len() != before
    }

    pub fn filter_by_status(&self, status: Status) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.status() == status)
            .collect()
    }
}
