use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading or writing the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors while loading page content from an override directory
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read page {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors while setting up the content directory watcher
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Content directory does not exist: {0}")]
    MissingDir(PathBuf),

    #[error("File watcher error: {0}")]
    Notify(#[from] notify::Error),
}
