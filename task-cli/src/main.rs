use clap::Parser;
use task_cli::cli::Cli;
use task_cli::commands;
use task_cli::config::Config;
use task_cli::JsonFileStore;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // stdout carries the command output, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Cli::parse();
    let config = Config::from_env()?;
    let store = JsonFileStore::new(config.file);

    let stdout = std::io::stdout();
    commands::dispatch(args.command, &store, &mut stdout.lock())?;

    Ok(())
}
