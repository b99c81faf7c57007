pub mod cli;
pub mod commands;
pub mod config;
pub mod repository;
pub mod store;
pub mod task;

pub use repository::{RepositoryError, TaskRepository};
pub use store::{JsonFileStore, Store, StoreError};
pub use task::{Status, Task};
