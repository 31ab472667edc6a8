//! This module contains all the errors thrown by the chopping application

use lib::errors::ConfigError;
use thiserror::Error;

/// Errors occurring at the application/config level.
#[derive(Debug, Error)]
pub enum AppError {
    /// I/O error during application execution.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a YAML configuration.
    #[error("Failed with config parsing: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("Need root privileges.")]
    NotRoot,

    /// Neither the command line nor the config file named an interface.
    #[error("No interface given; pass -i <interface> or set `interface` in the config file")]
    MissingInterface,
}
