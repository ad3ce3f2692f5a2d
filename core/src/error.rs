use std::path::PathBuf;

use thiserror::Error;

/// Failure loading static data (route catalog, object table) at startup
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parse error in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("TOML parse error in {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Failure loading or storing the user configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config from {path:?}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },

    #[error("failed to store config to {path:?}: {source}")]
    Store {
        path: PathBuf,
        #[source]
        source: confy::ConfyError,
    },

    #[error("could not resolve a config path: {0}")]
    Path(#[source] confy::ConfyError),
}
