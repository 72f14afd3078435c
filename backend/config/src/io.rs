//! Settings file read/bootstrap.
//!
//! `load` is fail-soft by contract: whatever happens on disk, the caller
//! gets a complete [`Settings`] record and the host keeps running.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::{debug, info, warn};

use crate::schema::Settings;

/// Fixed settings file name within the storage root.
pub const SETTINGS_FILE_NAME: &str = "snaptext-config.json";

/// Resolve the snaptext storage root.
/// Priority: `SNAPTEXT_CONFIG_DIR` env > `~/.snaptext/`
pub fn storage_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SNAPTEXT_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".snaptext");
    }
    PathBuf::from(".snaptext")
}

/// Full path to the settings document under the given root.
pub fn settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILE_NAME)
}

/// Load the settings record, never failing outward.
///
/// Missing file: write a pretty-printed default record so the user has
/// something to edit, and return the defaults. Malformed file: warn and
/// return the defaults. There is no save path; the file is human-edited.
pub async fn load(root: &Path) -> Settings {
    let path = settings_path(root);
    match fs::read_to_string(&path).await {
        Ok(raw) => match serde_json::from_str::<Settings>(&raw) {
            Ok(settings) => {
                debug!(path = %path.display(), model = %settings.model, "Loaded settings");
                settings
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Malformed settings file; using defaults");
                Settings::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let defaults = Settings::default();
            if let Err(err) = bootstrap(&path, &defaults).await {
                warn!(path = %path.display(), error = %format!("{err:#}"), "Could not create default settings file");
            }
            defaults
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Could not read settings file; using defaults");
            Settings::default()
        }
    }
}

async fn bootstrap(path: &Path, defaults: &Settings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create settings directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(defaults).context("Failed to serialize default settings")?;
    fs::write(path, json.as_bytes())
        .await
        .with_context(|| format!("Failed to write settings file: {}", path.display()))?;
    info!(path = %path.display(), "Created default settings file");
    Ok(())
}
