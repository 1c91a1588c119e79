//! Stored session handling.
//!
//! The session lives as a JSON file in the user's config directory between
//! invocations and is deleted on sign-out.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tannen_client::Session;

fn session_path() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .context("No config directory on this platform")?
        .join("tannen");
    Ok(dir.join("session.json"))
}

pub fn save(session: &Session) -> Result<()> {
    let path = session_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&path, serde_json::to_vec_pretty(session)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

pub fn load() -> Result<Option<Session>> {
    let path = session_path()?;
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let session = serde_json::from_slice(&bytes)
        .context("Stored session is corrupt; run `tannen login` again")?;
    Ok(Some(session))
}

pub fn clear() -> Result<()> {
    let path = session_path()?;
    if path.exists() {
        fs::remove_file(&path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Load the stored session, failing with a login hint when there is none
/// or it has expired.
pub fn require() -> Result<Session> {
    let session = load()?.context("Not signed in; run `tannen login <email>` first")?;
    if session.is_expired() {
        anyhow::bail!("Session expired; run `tannen login <email>` again");
    }
    Ok(session)
}
