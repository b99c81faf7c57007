use clap::{Parser, Subcommand};

/// Track short text tasks in a local JSON file.
#[derive(Parser, Debug)]
#[command(name = "task-cli", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// Positionals are optional so missing arguments get the command's own usage line,
// and accept leading hyphens since descriptions are free-form text.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Commands {
    /// Add a new task
    Add {
        #[arg(allow_hyphen_values = true)]
        description: Option<String>,
    },
    /// Change the description of a task
    Update {
        #[arg(allow_hyphen_values = true)]
        id: Option<String>,
        #[arg(allow_hyphen_values = true)]
        description: Option<String>,
    },
    /// Delete a task
    Delete {
        #[arg(allow_hyphen_values = true)]
        id: Option<String>,
    },
    /// Mark a task as in progress
    MarkInProgress {
        #[arg(allow_hyphen_values = true)]
        id: Option<String>,
    },
    /// Mark a task as done
    MarkDone {
        #[arg(allow_hyphen_values = true)]
        id: Option<String>,
    },
    /// List tasks, optionally only those with the given status
    List {
        #[arg(allow_hyphen_values = true)]
        status: Option<String>,
    },
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Option<Commands> {
        Cli::try_parse_from(std::iter::once("task-cli").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn parses_kebab_case_subcommands() {
        assert_eq!(
            parse(&["mark-in-progress", "3"]),
            Some(Commands::MarkInProgress {
                id: Some("3".to_string())
            })
        );
        assert_eq!(
            parse(&["mark-done", "4"]),
            Some(Commands::MarkDone {
                id: Some("4".to_string())
            })
        );
    }

    #[test]
    fn missing_arguments_are_not_a_parse_error() {
        assert_eq!(parse(&["add"]), Some(Commands::Add { description: None }));
        assert_eq!(
            parse(&["update", "1"]),
            Some(Commands::Update {
                id: Some("1".to_string()),
                description: None
            })
        );
    }

    #[test]
    fn hyphen_leading_values_are_positionals() {
        assert_eq!(
            parse(&["add", "-5 pushups"]),
            Some(Commands::Add {
                description: Some("-5 pushups".to_string())
            })
        );
        assert_eq!(
            parse(&["update", "1", "--draft"]),
            Some(Commands::Update {
                id: Some("1".to_string()),
                description: Some("--draft".to_string())
            })
        );
        assert_eq!(
            parse(&["delete", "-1"]),
            Some(Commands::Delete {
                id: Some("-1".to_string())
            })
        );
    }

    #[test]
    fn extra_positionals_are_rejected() {
        let result = Cli::try_parse_from(["task-cli", "add", "Buy", "milk"]);

        assert!(result.is_err());
    }

    #[test]
    fn unknown_commands_are_captured() {
        assert_eq!(
            parse(&["frobnicate", "1"]),
            Some(Commands::Unknown(vec![
                "frobnicate".to_string(),
                "1".to_string()
            ]))
        );
    }

    #[test]
    fn no_command_is_allowed() {
        assert_eq!(parse(&[]), None);
    }
}
