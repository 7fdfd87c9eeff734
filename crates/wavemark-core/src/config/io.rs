//! Reading and writing segment settings as YAML

use super::SegmentsConfig;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;

/// Load any YAML-backed settings type
///
/// Never fails: a missing file is the normal first-run case and yields
/// defaults quietly, an unreadable or malformed file logs a warning and
/// yields defaults too.
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("load_config: No config at {:?}, using defaults", path);
            return T::default();
        }
        Err(e) => {
            log::warn!("load_config: Can't read {:?}: {}, using defaults", path, e);
            return T::default();
        }
    };

    serde_yaml::from_str(&contents).unwrap_or_else(|e| {
        log::warn!("load_config: Invalid YAML in {:?}: {}, using defaults", path, e);
        T::default()
    })
}

/// Load segment settings and repair values that can't be rendered
pub fn load_segments_config(path: &Path) -> SegmentsConfig {
    let mut config: SegmentsConfig = load_config(path);
    if config.sanitize() {
        log::warn!("load_segments_config: Repaired invalid values from {:?}", path);
    }
    log::info!(
        "load_segments_config: style {:?}, precision {}",
        config.segment_options.style.unwrap_or_default(),
        config.time_label_precision
    );
    config
}

/// Write settings as YAML, creating the parent directory if needed
pub fn save_config<T>(config: &T, path: &Path) -> Result<()>
where
    T: Serialize,
{
    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {:?}", dir))?;
    }

    std::fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("save_config: Wrote {:?}", path);
    Ok(())
}
