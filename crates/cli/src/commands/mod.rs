//! CLI commands module.

use crate::config::EditorConfig;
use crate::prompts::ConsolePrompts;
use anyhow::Result;
use clap::{Args, Subcommand};
use flagreg_core::Action;

mod edit;
mod list;
mod typedefs;

use edit::EditInput;

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new flag
    Add(FlagArgs),
    /// Change the environments a flag is enabled in
    Edit(FlagArgs),
    /// Delete a flag
    Remove {
        /// Flag to delete (prompted when omitted)
        name: Option<String>,
    },
    /// List flags and where they are enabled
    List,
    /// Regenerate features.d.ts without editing
    Typedefs,
}

#[derive(Args)]
pub struct FlagArgs {
    /// Flag name (prompted when omitted)
    name: Option<String>,

    /// Environments to enable the flag in; pass with no value to disable
    /// everywhere (prompted when omitted)
    #[arg(short, long, value_delimiter = ',', num_args = 0..)]
    enable: Option<Vec<String>>,
}

impl FlagArgs {
    fn into_input(self, action: Action) -> EditInput {
        EditInput {
            action: Some(action),
            flag: self.name,
            enabled_in: self.enable,
        }
    }
}

/// Run a command. With no command, every input is prompted for.
pub fn run(cmd: Option<Commands>, config: &EditorConfig) -> Result<()> {
    let mut prompts = ConsolePrompts::stdio();

    match cmd {
        None => edit::run(config, EditInput::default(), &mut prompts),
        Some(Commands::Add(args)) => edit::run(config, args.into_input(Action::Add), &mut prompts),
        Some(Commands::Edit(args)) => {
            edit::run(config, args.into_input(Action::Edit), &mut prompts)
        }
        Some(Commands::Remove { name }) => edit::run(
            config,
            EditInput {
                action: Some(Action::Remove),
                flag: name,
                enabled_in: None,
            },
            &mut prompts,
        ),
        Some(Commands::List) => list::run(config),
        Some(Commands::Typedefs) => typedefs::run(config),
    }
}
