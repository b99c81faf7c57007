//! Runtime settings. Everything here is optional: with no `TASK_CLI_*`
//! variables set, the tracker reads and writes `tasks.json` in the working
//! directory and takes no other input besides its command line.

use crate::store::DEFAULT_TASK_FILE;
use serde::Deserialize;
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "TASK_CLI";

#[derive(Deserialize, Debug, PartialEq)]
pub struct Config {
    /// Backing task file, relative to the working directory unless absolute.
    #[serde(default = "default_file")]
    pub file: PathBuf,
}

impl Config {
    /// Loads configuration from `TASK_CLI_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_source(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_source(source: config::Environment) -> anyhow::Result<Self> {
        let settings = config::Config::builder().add_source(source).build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: default_file(),
        }
    }
}

fn default_file() -> PathBuf {
    PathBuf::from(DEFAULT_TASK_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(vars: &[(&str, &str)]) -> config::Environment {
        let source: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(source))
    }

    #[test]
    fn defaults_to_tasks_json() {
        let config = Config::from_source(environment(&[])).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.file, PathBuf::from("tasks.json"));
    }

    #[test]
    fn file_can_be_overridden() {
        let config =
            Config::from_source(environment(&[("TASK_CLI_FILE", "/tmp/my-tasks.json")])).unwrap();

        assert_eq!(config.file, PathBuf::from("/tmp/my-tasks.json"));
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        let config = Config::from_source(environment(&[("OTHER_FILE", "x.json")])).unwrap();

        assert_eq!(config.file, PathBuf::from("tasks.json"));
    }
}
