//! Inspect or create the config file.

use std::path::PathBuf;

use handsign_common::config::{config_file_path, AppConfig};
use handsign_gesture_core::table::GestureTable;

/// Print the effective configuration, with the gesture table spelled out.
pub fn show(config: &AppConfig) -> anyhow::Result<()> {
    let mut effective = config.clone();
    if effective.gestures.is_none() {
        effective.gestures = Some(GestureTable::standard().to_settings());
    }

    println!("# {}", config_file_path().display());
    println!("{}", serde_json::to_string_pretty(&effective)?);
    Ok(())
}

/// Write defaults plus the built-in gesture table.
pub fn init(path: Option<PathBuf>, force: bool) -> anyhow::Result<()> {
    let path = path.unwrap_or_else(config_file_path);
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let config = AppConfig {
        gestures: Some(GestureTable::standard().to_settings()),
        ..Default::default()
    };
    config
        .save_to(&path)
        .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;

    println!("Config written to: {}", path.display());
    Ok(())
}
