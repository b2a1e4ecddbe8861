use crate::error::{Result, ShaftError};
use crate::types::config::ShaftConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "shaft.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/shaft/config.toml";

/// Loads `shaft.toml` from the history directory layered over the user's
/// global config. Missing files fall back to defaults.
pub fn load_config(dir: &Path) -> Result<ShaftConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(dir, global.as_deref())
}

pub(crate) fn load_config_with_global(
    dir: &Path,
    global_path: Option<&Path>,
) -> Result<ShaftConfig> {
    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &dir.join(DEFAULT_CONFIG_FILE))?;

    let cfg: ShaftConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| ShaftError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    Ok(cfg)
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.is_file() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ShaftError::ConfigParse(format!("{}: {}", path.display(), e)))
}

// Tables merge key by key; anything else, arrays included, is replaced.
fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
