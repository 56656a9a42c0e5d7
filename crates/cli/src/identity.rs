//! Who is editing: an explicit override or the git user name.

use std::path::Path;
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("could not determine the editing user: {0}")]
    Unavailable(String),
}

/// Resolve the editing user. A non-blank override wins; otherwise the
/// `user.name` git sees from `dir` is used.
pub fn resolve_user(override_user: Option<&str>, dir: &Path) -> Result<String, IdentityError> {
    match override_user.map(str::trim).filter(|u| !u.is_empty()) {
        Some(user) => Ok(user.to_string()),
        None => git_user_name(dir),
    }
}

/// Read `git config user.name`.
pub fn git_user_name(dir: &Path) -> Result<String, IdentityError> {
    let output = Command::new("git")
        .args(["config", "user.name"])
        .current_dir(dir)
        .output()
        .map_err(|e| IdentityError::Unavailable(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        return Err(IdentityError::Unavailable(
            "git user.name is not configured (set it or pass --user)".into(),
        ));
    }

    let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if name.is_empty() {
        return Err(IdentityError::Unavailable("git user.name is empty".into()));
    }

    Ok(name)
}
