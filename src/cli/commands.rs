use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::TaskId;

#[derive(Parser)]
#[command(name = "tectask", about = concat!("tectask v", env!("CARGO_PKG_VERSION"), " - current and completed tasks, from the terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task service base URL (overrides TECTASK_BASE_URL and the config file)
    #[arg(long = "base-url", global = true)]
    pub base_url: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List current tasks, or completed ones with --completed
    List(ListArgs),
    /// Add a new (uncompleted) task
    Add(AddArgs),
    /// Flip a task between current and completed
    Toggle(IdArgs),
    /// Permanently delete a task
    Delete(IdArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Show completed tasks instead of current ones
    #[arg(long)]
    pub completed: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Task ID
    pub id: TaskId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn globals_work_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tectask",
            "list",
            "--completed",
            "--json",
            "--base-url",
            "http://localhost:4000",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:4000"));
        match cli.command {
            Some(Commands::List(args)) => assert!(args.completed),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn add_collects_words() {
        let cli = Cli::try_parse_from(["tectask", "add", "buy", "oat", "milk"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => assert_eq!(args.text, vec!["buy", "oat", "milk"]),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn toggle_requires_numeric_id() {
        assert!(Cli::try_parse_from(["tectask", "toggle", "abc"]).is_err());
        let cli = Cli::try_parse_from(["tectask", "toggle", "42"]).unwrap();
        match cli.command {
            Some(Commands::Toggle(args)) => assert_eq!(args.id, 42),
            _ => panic!("expected toggle"),
        }
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["tectask"]).unwrap();
        assert!(cli.command.is_none());
    }
}
