use crate::core::config::AppConfig;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;
use tracing::info;

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// Writes the example configuration to the platform config directory.
pub fn setup(force: bool) -> Result<()> {
    let path = AppConfig::default_config_path()?;
    write_example_config(&path, force)?;
    println!("Configuration written to {}", path.display());
    Ok(())
}

/// Writes the example configuration to `path`, creating parent directories.
/// An existing file is only replaced when `force` is set.
pub fn write_example_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {} (use --force to replace it)",
            path.display()
        );
    }

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    fs::write(path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    info!(path = %path.display(), force, "Wrote example configuration");
    Ok(())
}
