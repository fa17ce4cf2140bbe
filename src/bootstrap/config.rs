//! # Configuration loader
//!
//! Reads the TOML file and overlays it on defaults derived from the app data
//! directory. Pure data loading: values are accepted as they are.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tc_core::config::AppConfig;
use tc_core::ports::AppDirsPort;
use tc_infra::DirsAppDirsAdapter;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load `config_path` on top of `base`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: &Path, base: AppConfig) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value, base)
}

/// Resolve the effective configuration.
///
/// An explicit path must exist. Without one, `config.toml` in the app data
/// directory is used when present and system defaults otherwise.
pub fn resolve_config(
    explicit: Option<PathBuf>,
    app_dirs: &dyn AppDirsPort,
) -> anyhow::Result<AppConfig> {
    let dirs = app_dirs
        .get_app_dirs()
        .context("Failed to resolve app data directory")?;
    let base = AppConfig::with_system_defaults(dirs.app_data_root.clone());

    match explicit {
        Some(path) => load_config(&path, base),
        None => {
            let default_path = dirs.app_data_root.join(CONFIG_FILE_NAME);
            if default_path.exists() {
                load_config(&default_path, base)
            } else {
                Ok(base)
            }
        }
    }
}

/// Config resolution against the platform directories.
pub fn resolve_system_config(explicit: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    resolve_config(explicit, &DirsAppDirsAdapter::new())
}
