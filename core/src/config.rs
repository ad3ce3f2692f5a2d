//! User configuration persistence (confy, TOML)

use std::path::{Path, PathBuf};

use barracuda_types::TrialsConfig;

use crate::error::ConfigError;

pub const APP_NAME: &str = "barracuda-trials";
const CONFIG_NAME: &str = "config";
pub const OBJECTS_FILE: &str = "objects.toml";

/// Location confy uses when no explicit path is given
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    confy::get_configuration_file_path(APP_NAME, CONFIG_NAME).map_err(ConfigError::Path)
}

/// Load config from `path`, or from the default location.
///
/// A missing file is created with defaults.
pub fn load_config(path: Option<&Path>) -> Result<TrialsConfig, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    let config: TrialsConfig = confy::load_path(&path).map_err(|source| ConfigError::Load {
        path: path.clone(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Loaded config");
    Ok(config)
}

pub fn store_config(path: Option<&Path>, config: &TrialsConfig) -> Result<(), ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    confy::store_path(&path, config).map_err(|source| ConfigError::Store { path, source })
}

/// Root of the route catalog: the configured directory, else the platform
/// data directory
pub fn resolve_data_dir(config: &TrialsConfig) -> PathBuf {
    if let Some(dir) = &config.data_dir {
        return dir.clone();
    }
    dirs::data_dir()
        .map(|p| p.join(APP_NAME).join("routes"))
        .unwrap_or_else(|| PathBuf::from("routes"))
}

/// Object table path inside a catalog root
pub fn objects_path(data_dir: &Path) -> PathBuf {
    data_dir.join(OBJECTS_FILE)
}
