//! Add, edit and remove flags.

use crate::config::EditorConfig;
use crate::identity::resolve_user;
use crate::prompts::Prompts;
use anyhow::{Context, Result};
use colored::Colorize;
use flagreg_core::{Action, EditOutcome, EditRequest, EditStamp};
use flagreg_storage::FlagContext;
use tracing::debug;

/// Inputs already known from the command line. Anything `None` is prompted.
#[derive(Debug, Default)]
pub struct EditInput {
    pub action: Option<Action>,
    pub flag: Option<String>,
    pub enabled_in: Option<Vec<String>>,
}

pub fn run(config: &EditorConfig, input: EditInput, prompts: &mut dyn Prompts) -> Result<()> {
    let user = resolve_user(config.user.as_deref(), &config.start_dir)?;
    debug!(user = %user, "resolved editing user");

    let mut ctx = FlagContext::open(&config.start_dir, &config.config_dir)?;
    let request = resolve_request(&ctx, input, prompts)?;
    let outcome = ctx.apply(&request, &EditStamp::now(user))?;

    ctx.save().context("Failed to save flag registry")?;
    print_outcome(&ctx, &outcome);

    Ok(())
}

/// Fill in whatever the command line left out by asking.
fn resolve_request(
    ctx: &FlagContext,
    input: EditInput,
    prompts: &mut dyn Prompts,
) -> Result<EditRequest> {
    let names = ctx.registry.names();

    let action = match input.action {
        Some(action) => action,
        None => prompts.action(!names.is_empty())?,
    };

    let flag = match (input.flag, action) {
        (Some(flag), _) => flag,
        (None, Action::Add) => prompts.enter_new_flag_name(&names)?,
        (None, _) => prompts.select_existing_flag(&names)?,
    };
    debug!(%action, %flag, "resolved target flag");

    if action == Action::Remove {
        return Ok(EditRequest::remove(flag));
    }

    let enabled_in = match input.enabled_in {
        Some(envs) => envs.into_iter().filter(|e| !e.is_empty()).collect(),
        None => prompts.environment_states(&ctx.environments, ctx.registry.get(&flag))?,
    };

    Ok(EditRequest {
        action,
        flag,
        enabled_in,
    })
}

fn print_outcome(ctx: &FlagContext, outcome: &EditOutcome) {
    println!();
    match outcome {
        EditOutcome::Created { flag } => {
            println!("{}  Created flag {}", "✓".green().bold(), flag.bright_yellow());
            print_states(ctx, flag);
        }
        EditOutcome::Updated { flag, changed } if changed.is_empty() => {
            println!(
                "{}  No changes to {}",
                "•".bright_black(),
                flag.bright_yellow()
            );
        }
        EditOutcome::Updated { flag, changed } => {
            println!(
                "{}  Updated flag {} in {}",
                "✓".green().bold(),
                flag.bright_yellow(),
                changed.join(", ").bright_cyan()
            );
            print_states(ctx, flag);
        }
        EditOutcome::Removed { flag, .. } => {
            println!("{}  Removed flag {}", "✓".green().bold(), flag.bright_yellow());
        }
    }

    println!(
        "{}  Saved {}",
        "✓".green().bold(),
        ctx.location.flags_path().display().to_string().bright_black()
    );
    println!(
        "{}  Regenerated {}",
        "✓".green().bold(),
        ctx.location.typedef_path().display().to_string().bright_black()
    );
    println!();
}

fn print_states(ctx: &FlagContext, flag: &str) {
    let Some(entry) = ctx.registry.get(flag) else {
        return;
    };
    for env in ctx.environments.iter() {
        let state = if entry.is_enabled_in(env) {
            "on".green()
        } else {
            "off".bright_black()
        };
        println!("    {:<12} {}", env, state);
    }
}
