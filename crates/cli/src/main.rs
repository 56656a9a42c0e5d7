//! flag-editor CLI entry point.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod commands;
mod config;
mod identity;
mod logging;
mod prompts;

use config::EditorConfig;

#[derive(Parser)]
#[command(name = "flag-editor")]
#[command(about = "Edit the feature-flag registry and regenerate its typedefs", long_about = None)]
struct Cli {
    /// Directory to start searching for the registry from (default: current dir)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Name of the directory holding flags.json
    #[arg(short, long, global = true, default_value = flagreg_storage::CONFIG_DIRECTORY)]
    config_dir: String,

    /// Editing user (default: git config user.name)
    #[arg(short, long, global = true, env = "FLAG_EDITOR_USER")]
    user: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "FLAG_EDITOR_DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Option<commands::Commands>,
}

fn run(cli: Cli) -> Result<()> {
    let config = EditorConfig::new(cli.dir, cli.config_dir, cli.user, cli.debug)?;
    logging::init(config.debug);
    commands::run(cli.command, &config)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
