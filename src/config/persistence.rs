//! Config file load, save, and migration logic.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::types::{ConfigOptions, DEFAULTS_SECTION};

/// Fields that older configs stored as flat `hpilo.<field>` keys.
const LEGACY_FIELDS: &[&str] = &["login", "password", "hostname", "cli_path", "timeout"];

/// Default config location: `config.json` next to the executable.
pub fn default_config_path() -> Result<PathBuf> {
    let exe_dir = std::env::current_exe()?
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Cannot determine executable directory"))?
        .to_path_buf();
    Ok(exe_dir.join("config.json"))
}

pub fn resolve_config_path(path: Option<&str>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(PathBuf::from(p)),
        None => default_config_path(),
    }
}

/// Rewrite flat `hpilo.<field>` keys into their nested form.
///
/// Top level: `"hpilo.login": x` becomes `"hpilo": {"login": x}`.
/// Inside a profile: `"hpilo.login": x` becomes `"login": x`.
/// Nested values that already exist are left alone.
pub(crate) fn migrate_options(root: &mut Map<String, Value>) -> bool {
    let mut migrated = false;

    for field in LEGACY_FIELDS {
        let flat_key = format!("{}.{}", DEFAULTS_SECTION, field);
        if let Some(value) = root.remove(&flat_key) {
            let section = root
                .entry(DEFAULTS_SECTION.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Some(section) = section.as_object_mut() {
                if !section.contains_key(*field) {
                    section.insert(field.to_string(), value);
                }
            }
            info!("Migrated: moved '{}' into '{}' section", flat_key, DEFAULTS_SECTION);
            migrated = true;
        }
    }

    for (name, profile) in root.iter_mut() {
        if name == DEFAULTS_SECTION {
            continue;
        }
        let Some(profile) = profile.as_object_mut() else {
            continue;
        };
        for field in LEGACY_FIELDS {
            let flat_key = format!("{}.{}", DEFAULTS_SECTION, field);
            if let Some(value) = profile.remove(&flat_key) {
                if !profile.contains_key(*field) {
                    profile.insert(field.to_string(), value);
                }
                info!("Migrated: renamed '{}' to '{}' in profile '{}'", flat_key, field, name);
                migrated = true;
            }
        }
    }

    migrated
}

/// Migrate config file to current layout, saving it back if anything changed.
pub(crate) fn migrate_config(config_path: &Path) -> Result<bool> {
    if !config_path.exists() {
        return Ok(false);
    }

    let content = std::fs::read_to_string(config_path)?;
    let mut json: Value = serde_json::from_str(&content)?;

    let migrated = match json.as_object_mut() {
        Some(root) => migrate_options(root),
        None => false,
    };

    if migrated {
        std::fs::write(config_path, serde_json::to_string_pretty(&json)?)?;
        info!("Config migrated to latest version: {:?}", config_path);
    }

    Ok(migrated)
}

pub async fn load_config(path: Option<&str>) -> Result<ConfigOptions> {
    let config_path = resolve_config_path(path)?;

    // Migrate config first (handles old configs automatically)
    if let Err(e) = migrate_config(&config_path) {
        warn!("Config migration check failed: {}", e);
    }

    if config_path.exists() {
        let content = tokio::fs::read_to_string(&config_path)
            .await
            .with_context(|| format!("Failed to read config: {:?}", config_path))?;
        let options: ConfigOptions = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config JSON: {:?}", config_path))?;

        if options.option(DEFAULTS_SECTION).is_none() && options.profile_names().is_empty() {
            warn!("No '{}' defaults or host profiles in {:?}. Only explicit credentials will work.", DEFAULTS_SECTION, config_path);
        }

        info!("Loaded configuration from: {:?}", config_path);
        Ok(options)
    } else {
        info!("Config file not found. Run the setup wizard ('--setup') to generate one.");
        Ok(ConfigOptions::default())
    }
}

pub async fn save_config(options: &ConfigOptions, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(options)?;
    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write config: {:?}", path))?;
    info!("Configuration saved to: {:?}", path);
    Ok(())
}
