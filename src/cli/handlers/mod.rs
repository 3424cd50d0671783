use std::path::Path;
use std::time::Duration;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::client::{HttpTaskApi, TaskApi};
use crate::io::config_io;
use crate::logging::{self, LogTarget};
use crate::model::{ClientConfig, Tab};
use crate::tui::{self, TuiOptions};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run a subcommand, or the TUI when none is given
pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_io::config_path(cli.config.as_deref());
    let config = config_io::read_config(&config_path)?;
    let mut api = connect(&cli, &config);

    let Some(cmd) = cli.command else {
        return run_tui(api, config, &config_path);
    };

    logging::init(&LogTarget::Stderr, &config.log)?;
    let json = cli.json;
    match cmd {
        Commands::List(args) => cmd_list(&mut api, args, json),
        Commands::Add(args) => cmd_add(&mut api, args, json),
        Commands::Toggle(args) => cmd_toggle(&mut api, args, json),
        Commands::Delete(args) => cmd_delete(&mut api, args, json),
    }
}

/// Launch the TUI with file logging and state kept next to the config file.
fn run_tui(
    api: HttpTaskApi,
    config: ClientConfig,
    config_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let state_dir = config_io::state_dir(config_path);
    logging::init(&LogTarget::file_from_config(&config.log, &state_dir), &config.log)?;

    let server_label = api.base_url().to_string();
    tui::run(TuiOptions {
        api: Box::new(api),
        config,
        server_label,
        state_dir,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn connect(cli: &Cli, config: &ClientConfig) -> HttpTaskApi {
    let env_url = std::env::var(config_io::BASE_URL_ENV).ok();
    let base_url = config_io::resolve_base_url(cli.base_url.as_deref(), env_url.as_deref(), config);
    HttpTaskApi::new(base_url, Duration::from_secs(config.server.timeout_secs))
}

fn print_mutation(
    json: bool,
    action: &'static str,
    id: Option<u64>,
    text: Option<String>,
    message: String,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        let out = MutationJson {
            ok: true,
            action,
            id,
            text,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", message);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_list(
    api: &mut impl TaskApi,
    args: ListArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let tab = Tab::for_completed(args.completed);
    let tasks = api.list(tab)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&task_list_json(tab, &tasks))?);
    } else {
        for line in format_task_listing(tab, &tasks) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_add(
    api: &mut impl TaskApi,
    args: AddArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let joined = args.text.join(" ");
    let text = joined.trim();
    if text.is_empty() {
        return Err("task text is empty".into());
    }

    api.create(text)?;
    print_mutation(json, "add", None, Some(text.to_string()), format!("added: {}", text))
}

fn cmd_toggle(
    api: &mut impl TaskApi,
    args: IdArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    api.toggle(args.id)?;
    print_mutation(json, "toggle", Some(args.id), None, format!("toggled: {}", args.id))
}

fn cmd_delete(
    api: &mut impl TaskApi,
    args: IdArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    api.delete(args.id)?;
    print_mutation(json, "delete", Some(args.id), None, format!("deleted: {}", args.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Call, MemoryTaskApi};
    use crate::model::Task;

    #[test]
    fn add_trims_and_creates() {
        let mut api = MemoryTaskApi::new();
        let args = AddArgs {
            text: vec!["  buy".into(), "milk  ".into()],
        };
        cmd_add(&mut api, args, false).unwrap();
        assert_eq!(api.calls(), vec![Call::Create("buy milk".into())]);
        assert_eq!(api.tasks(), vec![Task::new(1, "buy milk", false)]);
    }

    #[test]
    fn blank_add_never_reaches_the_server() {
        let mut api = MemoryTaskApi::new();
        let args = AddArgs {
            text: vec!["   ".into(), "".into()],
        };
        let err = cmd_add(&mut api, args, false).unwrap_err();
        assert_eq!(err.to_string(), "task text is empty");
        assert!(api.calls().is_empty());
    }

    #[test]
    fn list_uses_the_requested_tab() {
        let mut api = MemoryTaskApi::with_tasks(vec![
            Task::new(1, "a", false),
            Task::new(2, "b", true),
        ]);
        cmd_list(&mut api, ListArgs { completed: true }, true).unwrap();
        assert_eq!(api.calls(), vec![Call::List(Tab::Completed)]);
    }

    #[test]
    fn failures_propagate() {
        let mut api = MemoryTaskApi::new();
        api.set_offline(true);
        assert!(cmd_toggle(&mut api, IdArgs { id: 1 }, false).is_err());
        api.set_offline(false);
        assert!(cmd_delete(&mut api, IdArgs { id: 99 }, false).is_err());
    }
}
