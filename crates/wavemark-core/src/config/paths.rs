//! Standard locations for wavemark configuration files

use std::path::PathBuf;

/// Get the default configuration directory
///
/// Returns: `{config_dir}/wavemark`, falling back to the home directory and
/// then the current directory when no config directory is known.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("wavemark")
}

/// Get the default path for a config file
///
/// Returns: `{config_dir}/wavemark/{filename}`
pub fn default_config_path(filename: &str) -> PathBuf {
    default_config_dir().join(filename)
}
