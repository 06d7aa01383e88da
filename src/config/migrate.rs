//! Config file upkeep: detect and fill keys added by newer releases.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    let yaml: Value =
        serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))?;
    match yaml {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} is not a YAML mapping",
            path.display()
        ))),
    }
}

fn default_mapping() -> AppResult<Mapping> {
    match serde_yaml::to_value(Config::default()).map_err(|e| AppError::Config(e.to_string()))? {
        Value::Mapping(map) => Ok(map),
        _ => Err(AppError::Config("default config is not a mapping".into())),
    }
}

/// Keys known to this version but absent from the file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping()?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add missing keys with their default values, keeping everything else.
/// Returns `true` when the file was rewritten.
pub fn migrate_config_file(path: &Path) -> AppResult<bool> {
    let mut current = read_mapping(path)?;
    let defaults = default_mapping()?;

    let mut changed = false;
    for (k, v) in defaults {
        if !current.contains_key(&k) {
            info(format!("Adding missing key '{}'", k.as_str().unwrap_or("?")));
            current.insert(k, v);
            changed = true;
        }
    }

    if changed {
        let yaml = serde_yaml::to_string(&Value::Mapping(current))
            .map_err(|e| AppError::Config(e.to_string()))?;
        fs::write(path, yaml)?;
        success(format!("Configuration migrated: {}", path.display()));
    }

    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_conf(name: &str, body: &str) -> std::path::PathBuf {
        let path = env::temp_dir().join(format!("{name}_fieldlogger.conf"));
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reports_and_fills_missing_keys() {
        let path = temp_conf("cfg_migrate", "database: /tmp/f.sqlite\n");

        let missing = missing_fields(&path).unwrap();
        assert!(missing.contains(&"coordinate_precision".to_string()));
        assert!(!missing.contains(&"database".to_string()));

        assert!(migrate_config_file(&path).unwrap());
        assert!(missing_fields(&path).unwrap().is_empty());
        assert!(!migrate_config_file(&path).unwrap());

        let cfg: Config = serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(cfg.database, "/tmp/f.sqlite");
        fs::remove_file(&path).ok();
    }
}
