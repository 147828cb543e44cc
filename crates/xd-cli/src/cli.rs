//! CLI argument parsing via clap.

use std::path::PathBuf;

use clap::Parser;
use xd_exec::DEFAULT_PICKER;
use xd_exec::DEFAULT_SHELL;

/// Browse a tree of shell commands with dmenu and run the one you pick.
#[derive(Debug, Parser)]
#[command(name = "xd", version)]
pub struct Args {
    /// Path to the configuration file (default: every *.yaml in $XDG_CONFIG_HOME/xd).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,

    /// Execute a specific command from the config, opening its submenu directly.
    #[arg(long = "command")]
    pub command: Option<String>,

    /// dmenu-compatible program used for every prompt.
    #[arg(long = "picker", default_value = DEFAULT_PICKER)]
    pub picker: String,

    /// Shell that runs the configured commands.
    #[arg(long = "shell", default_value = DEFAULT_SHELL)]
    pub shell: String,

    /// Log debug details to stderr.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Extra arguments passed to the picker, e.g. `xd -- -fn monospace-12`.
    #[arg(last = true, value_name = "PICKER_ARGS")]
    pub picker_args: Vec<String>,
}
