mod cli;
mod config;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xd_core::command::CommandTree;
use xd_core::navigator::Navigator;
use xd_core::navigator::Outcome;
use xd_exec::executor::ShellExecutor;
use xd_exec::picker::DmenuPicker;

use crate::cli::Args;

/// Breadcrumb shown at the top-level menu.
const ROOT_LABEL: &str = "xd";
const LOG_ENV: &str = "XD_LOG";

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> anyhow::Result<()> {
    let commands = config::load_config(args.config.as_deref(), args.command.as_deref())
        .context("could not read configuration")?;
    let tree = CommandTree::new(commands).context("invalid configuration")?;
    if tree.is_empty() {
        info!("no commands configured");
        return Ok(());
    }

    let picker = DmenuPicker::new(args.picker, args.picker_args);
    let executor = ShellExecutor::new(args.shell);
    let mut navigator = Navigator::new(picker, executor);

    match navigator.run(&tree, ROOT_LABEL)? {
        Outcome::Executed { command, output } => {
            debug!(%command, %output, "command finished");
        }
        outcome => debug!(?outcome, "navigation ended"),
    }
    Ok(())
}
