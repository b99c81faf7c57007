use crate::cli::Commands;
use crate::repository::{RepositoryError, TaskRepository};
use crate::store::{Store, StoreError};
use crate::task::{Status, Task};
use std::io::Write;
use thiserror::Error;
use tracing::{debug, info};

pub const USAGE: &str = "Usage: task-cli <command> [arguments]";
pub const UNKNOWN_COMMAND: &str = "Unknown command.";
pub const TASK_UPDATED: &str = "Task updated.";
pub const TASK_DELETED: &str = "Task deleted.";
pub const TASK_NOT_FOUND: &str = "Task not found.";
pub const NO_TASKS_FOUND: &str = "No tasks found.";

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("cannot write output")]
    Output(#[from] std::io::Error),
}

/// A command whose arguments have been checked, ready to run against a store.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Add { description: String },
    Update { id: u32, description: String },
    Delete { id: u32 },
    SetStatus { id: u32, status: Status },
    List { filter: Option<String> },
}

/// Why a command was rejected before touching the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    NoCommand,
    Unknown,
    Usage(&'static str),
    InvalidId(String),
}

impl Rejection {
    pub fn message(&self) -> String {
        match self {
            Rejection::NoCommand => USAGE.to_string(),
            Rejection::Unknown => UNKNOWN_COMMAND.to_string(),
            Rejection::Usage(usage) => usage.to_string(),
            Rejection::InvalidId(raw) => format!("Invalid task ID: {raw}"),
        }
    }
}

fn parse_id(raw: String) -> Result<u32, Rejection> {
    raw.parse().map_err(|_| Rejection::InvalidId(raw))
}

fn required(value: Option<String>, usage: &'static str) -> Result<String, Rejection> {
    value.ok_or(Rejection::Usage(usage))
}

/// Checks arguments and turns the parsed command line into an [`Action`].
pub fn validate(command: Option<Commands>) -> Result<Action, Rejection> {
    let command = command.ok_or(Rejection::NoCommand)?;
    match command {
        Commands::Add { description } => Ok(Action::Add {
            description: required(description, r#"Usage: task-cli add "task description""#)?,
        }),
        Commands::Update { id, description } => {
            const UPDATE_USAGE: &str = r#"Usage: task-cli update <id> "new description""#;
            let id = required(id, UPDATE_USAGE)?;
            let description = required(description, UPDATE_USAGE)?;
            Ok(Action::Update {
                id: parse_id(id)?,
                description,
            })
        }
        Commands::Delete { id } => Ok(Action::Delete {
            id: parse_id(required(id, "Usage: task-cli delete <id>")?)?,
        }),
        Commands::MarkInProgress { id } => Ok(Action::SetStatus {
            id: parse_id(required(id, "Usage: task-cli mark-in-progress <id>")?)?,
            status: Status::InProgress,
        }),
        Commands::MarkDone { id } => Ok(Action::SetStatus {
            id: parse_id(required(id, "Usage: task-cli mark-done <id>")?)?,
            status: Status::Done,
        }),
        Commands::List { status } => Ok(Action::List { filter: status }),
        Commands::Unknown(_) => Err(Rejection::Unknown),
    }
}

fn found_or_not(found: bool, message: &'static str) -> &'static str {
    if found { message } else { TASK_NOT_FOUND }
}

fn write_tasks<'a>(
    out: &mut impl Write,
    tasks: impl IntoIterator<Item = &'a Task>,
) -> std::io::Result<()> {
    let mut any = false;
    for task in tasks {
        any = true;
        writeln!(out, "{}", task.to_list_line())?;
    }
    if !any {
        writeln!(out, "{NO_TASKS_FOUND}")?;
    }
    Ok(())
}

/// Loads the collection, applies `action`, saves if something changed and reports to `out`.
#[tracing::instrument(skip(store, out))]
pub fn execute<S: Store>(action: Action, store: &S, out: &mut impl Write) -> Result<(), Error> {
    let mut tasks: TaskRepository = store.load()?;

    let (changed, message) = match action {
        Action::Add { description } => {
            let id = tasks.add(description)?.id();
            info!(id, "Added task");
            (true, format!("Task added successfully (ID: {id})"))
        }
        Action::Update { id, description } => {
            let found = tasks.update_description(id, description);
            (found, found_or_not(found, TASK_UPDATED).to_string())
        }
        Action::Delete { id } => {
            let found = tasks.remove(id);
            (found, found_or_not(found, TASK_DELETED).to_string())
        }
        Action::SetStatus { id, status } => {
            let found = tasks.set_status(id, status);
            (found, found_or_not(found, TASK_UPDATED).to_string())
        }
        Action::List { filter } => {
            match filter {
                None => write_tasks(out, tasks.tasks())?,
                Some(filter) => match filter.parse::<Status>() {
                    Ok(status) => write_tasks(out, tasks.filter_by_status(status))?,
                    Err(e) => {
                        debug!("{e}, nothing matches");
                        write_tasks(out, std::iter::empty())?
                    }
                },
            }
            return Ok(());
        }
    };

    if changed {
        store.save(&tasks)?;
    } else {
        debug!("Nothing changed, skipping save");
    }
    writeln!(out, "{message}")?;
    Ok(())
}

/// Runs one command line invocation: validate, execute, report.
pub fn dispatch<S: Store>(
    command: Option<Commands>,
    store: &S,
    out: &mut impl Write,
) -> Result<(), Error> {
    match validate(command) {
        Ok(action) => execute(action, store, out),
        Err(rejection) => {
            debug!(?rejection, "Rejected before touching the store");
            writeln!(out, "{}", rejection.message())?;
            Ok(())
        }
    }
}
