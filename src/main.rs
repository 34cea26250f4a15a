use std::process;

use anyhow::{bail, Context};
use clap::Parser;

use launcher::activity::{Activity, Registry};
use launcher::color;
use launcher::config::{CliArgs, Command, Config};
use launcher::logging::{self, Sink};
use launcher::relay::relay;
use launcher::runner::{Executor, Runner};
use launcher::shutdown;
use launcher::tui;

/// Filter for stderr diagnostics in the plain-terminal commands.
const HEADLESS_LOG_LEVEL: &str = "warn";

fn main() {
    let cli = CliArgs::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: CliArgs) -> anyhow::Result<()> {
    let config = Config::load(&cli)?;
    let command = cli.command.clone().unwrap_or(Command::Ui);

    match (&config.log_file, &command) {
        (Some(path), _) => logging::init(Sink::File(path), &config.log_level)
            .with_context(|| format!("failed to open log file {}", path.display()))?,
        (None, Command::Ui) => logging::init(Sink::Off, &config.log_level)?,
        (None, _) => logging::init(Sink::Stderr, HEADLESS_LOG_LEVEL)?,
    }

    if let Err(e) = shutdown::register_handler() {
        tracing::warn!("{}", e);
    }

    let registry = Registry::builtin(&config.scripts_dir);
    tracing::debug!(runtime = %config.runtime, scripts_dir = %config.scripts_dir.display(), "configuration loaded");

    let result = match command {
        Command::Ui => cmd_ui(&config, registry),
        Command::List => cmd_list(&registry),
        Command::Run { activity } => cmd_run(&config, &registry, &activity),
        Command::InitConfig => {
            print!("{}", Config::default_toml());
            Ok(())
        }
    };

    logging::shutdown();
    result
}

/// Open the launcher window.
fn cmd_ui(config: &Config, registry: Registry) -> anyhow::Result<()> {
    let executor = Executor::start().context("failed to start background runtime")?;
    let (tx, rx) = relay();
    let runner = Runner::new(executor.handle().clone(), config.runtime.clone(), tx);

    tui::run_ui(registry, rx, runner, config.poll_interval()).context("terminal UI failed")?;
    Ok(())
}

/// Print the activity table.
fn cmd_list(registry: &Registry) -> anyhow::Result<()> {
    for (i, activity) in registry.iter().enumerate() {
        println!(
            "{:>2}. {}  {}",
            i + 1,
            color::label(&activity.name),
            activity.description
        );
        println!("    {}", color::dim(&activity.path.display().to_string()));
    }
    Ok(())
}

/// Run one activity in the foreground, streaming its log entries to stdout.
///
/// The child's exit code is only reported as text.
fn cmd_run(config: &Config, registry: &Registry, query: &str) -> anyhow::Result<()> {
    let activity: &Activity = match registry.find(query) {
        Some(a) => a,
        None => bail!(
            "unknown activity '{}' (use an index 1-{} or a name from `launcher list`)",
            query,
            registry.len()
        ),
    };

    let executor = Executor::start().context("failed to start background runtime")?;
    let (tx, rx) = relay();
    let runner = Runner::new(executor.handle().clone(), config.runtime.clone(), tx);
    let handle = runner.run(activity);

    loop {
        let done = handle.wait_timeout(config.poll_interval());
        for entry in rx.drain_all() {
            println!("{}", color::entry(&entry));
        }
        if done {
            break;
        }
        if shutdown::requested() {
            eprintln!(
                "interrupted; {} is left running with its output detached",
                activity.name
            );
            break;
        }
    }

    Ok(())
}
