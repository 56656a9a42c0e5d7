//! Print the registry.

use crate::config::EditorConfig;
use anyhow::Result;
use colored::Colorize;
use flagreg_storage::FlagContext;

pub fn run(config: &EditorConfig) -> Result<()> {
    let ctx = FlagContext::open(&config.start_dir, &config.config_dir)?;

    println!(
        "{} {}",
        "Flags in".bold().cyan(),
        ctx.location.flags_path().display().to_string().bright_black()
    );
    println!();

    if ctx.registry.is_empty() {
        println!("  {}", "No flags found.".yellow());
        println!("Use {} to create one.", "flag-editor add".bright_cyan());
        println!();
        return Ok(());
    }

    for (name, entry) in ctx.registry.iter() {
        println!("  {}", name.bright_yellow());
        println!(
            "    {}",
            format!("created by {} at {}", entry.created_by, entry.created_at).bright_black()
        );
        for env in ctx.environments.iter() {
            match entry.environment(env) {
                Some(state) => println!(
                    "    {:<12} {:<4} {}",
                    env,
                    if state.enabled {
                        "on".green()
                    } else {
                        "off".bright_black()
                    },
                    format!(
                        "{} @ {}",
                        state.last_edited_by.as_deref().unwrap_or("?"),
                        state.last_edited_at.as_deref().unwrap_or("?")
                    )
                    .bright_black()
                ),
                None => println!("    {:<12} {}", env, "unset".yellow()),
            }
        }
        println!();
    }

    println!(
        "{} flag(s), {} environment(s)",
        ctx.registry.len().to_string().bright_cyan(),
        ctx.environments.len().to_string().bright_cyan()
    );

    Ok(())
}
