//! Config file loading: `config.json` next to the executable.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use webpane_common::ConfigError;

use crate::schema::AppConfig;

const CONFIG_FILE: &str = "config.json";

/// The config file path inside `base_dir`.
pub fn config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(CONFIG_FILE)
}

/// Directory the config is resolved against: the executable's directory,
/// falling back to the current directory when that cannot be determined.
pub fn default_base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load config from a specific JSON file path.
///
/// A missing file is not an error and yields defaults; the demo runs fine
/// without one. Unreadable or malformed files are errors; the caller decides
/// whether to fall back.
pub fn load_from_path(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        info!(path = %path.display(), "no config file, using defaults");
        return Ok(AppConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let config: AppConfig =
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    info!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Load config from the default location, or from `override_path` when given.
pub fn load(override_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match override_path {
        Some(path) => load_from_path(path),
        None => {
            let path = config_path(&default_base_dir());
            load_from_path(&path)
        }
    }
}

/// Convenience used by the binary: load, falling back to defaults on error.
pub fn load_or_default(override_path: Option<&Path>) -> AppConfig {
    load(override_path).unwrap_or_else(|e| {
        warn!("config load failed, using defaults: {e}");
        AppConfig::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = config_path(dir);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_from_path(&config_path(dir.path())).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn valid_port_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), r#"{"remoteDebugPort": 9000}"#);
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.remote_debug_port, Some(9000));
        assert_eq!(crate::debug_port::validated_port(&config), Some(9000));
    }

    #[test]
    fn out_of_range_port_loads_but_stays_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), r#"{"remoteDebugPort": 70000}"#);
        let config = load_from_path(&path).unwrap();
        assert_eq!(config.remote_debug_port, Some(70000));
        assert_eq!(crate::debug_port::validated_port(&config), None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "{not json");
        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn load_or_default_swallows_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[1, 2, 3]");
        let config = load_or_default(Some(&path));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn empty_object_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "{}");
        let config = load_from_path(&path).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
