use std::path::PathBuf;
use std::time::Duration;

use lib::channels::ChannelList;
use lib::hopper::{DEFAULT_HOP, DEFAULT_TIMEOUT_MS};
use lib::preflight::HopRequest;
use log::LevelFilter;
use serde::Deserialize;

use crate::errors::AppError;

/// A trait for parsing a YAML file into a struct using Serde.
///
/// # Errors
/// [`AppError::Io`] if the file cannot be read, [`AppError::YamlError`] if
/// deserialization fails.
///
/// # Example
/// ```rust,ignore
/// let config = HopConfig::from_yaml(PathBuf::from("hop.yaml"))?;
/// ```
pub trait FromYaml: Sized + for<'de> Deserialize<'de> {
    /// Loads an instance of the implementing type from a YAML file.
    fn from_yaml(file: PathBuf) -> Result<Self, AppError> {
        let yaml = std::fs::read_to_string(&file)?;
        Ok(serde_yaml::from_str(&yaml)?)
    }
}

/// Settings for the `hop` service, as read from a config file.
///
/// ```yaml
/// interface: wlan0
/// channels: [1, 6, 11]
/// hop: 1
/// timeout_ms: 250
/// ```
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct HopConfig {
    pub interface: Option<String>,
    /// Hopping order; missing means "ask the driver".
    pub channels: Option<Vec<u8>>,
    pub hop: usize,
    pub timeout_ms: u64,
}

impl Default for HopConfig {
    fn default() -> Self {
        Self {
            interface: None,
            channels: None,
            hop: DEFAULT_HOP,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl FromYaml for HopConfig {}

impl HopConfig {
    /// Checks the pieces that need no system access and builds the request
    /// for preflight.
    pub fn into_request(self) -> Result<HopRequest, AppError> {
        let interface = self.interface.ok_or(AppError::MissingInterface)?;
        let channels = match self.channels {
            Some(channels) => Some(ChannelList::new(channels)?),
            None => None,
        };

        Ok(HopRequest {
            interface,
            channels,
            hop: self.hop,
            delay: Duration::from_millis(self.timeout_ms),
        })
    }
}

pub struct GlobalConfig {
    pub log_level: LevelFilter,
}

pub trait Run<Config> {
    // Initialize standalone state which does not depend on any config
    fn new(global_config: GlobalConfig, config: Config) -> Self;

    // Actually applies given config and runs the service
    async fn run(&mut self) -> Result<(), Box<dyn std::error::Error>>;
}

#[cfg(test)]
mod tests {
    use std::fs::File;
    use std::io::Write;

    use lib::errors::ConfigError;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_hop_config_from_yaml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("hop.yaml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "interface: wlan0\nchannels: [1, 6, 11]\nhop: 2\ntimeout_ms: 250").unwrap();

        let config = HopConfig::from_yaml(file_path).unwrap();
        assert_eq!(
            config,
            HopConfig {
                interface: Some("wlan0".to_string()),
                channels: Some(vec![1, 6, 11]),
                hop: 2,
                timeout_ms: 250,
            }
        );
    }

    #[test]
    fn test_hop_config_defaults() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("hop.yaml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "interface: wlan1").unwrap();

        let config = HopConfig::from_yaml(file_path).unwrap();
        assert_eq!(config.interface.as_deref(), Some("wlan1"));
        assert_eq!(config.channels, None);
        assert_eq!(config.hop, 1);
        assert_eq!(config.timeout_ms, 1000);
    }

    #[test]
    fn test_from_yaml_file_not_found() {
        let result = HopConfig::from_yaml(PathBuf::from("non_existent_file.yaml"));
        assert!(matches!(result.unwrap_err(), AppError::Io(_)));
    }

    #[test]
    fn test_from_yaml_malformed_content() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("malformed.yaml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(file, "interface: wlan0\nhop: not_an_integer").unwrap();

        assert!(matches!(HopConfig::from_yaml(file_path).unwrap_err(), AppError::YamlError(_)));
    }

    #[test]
    fn test_into_request() {
        let config = HopConfig {
            interface: Some("wlan0".to_string()),
            channels: Some(vec![1, 6, 11]),
            hop: 2,
            timeout_ms: 100,
        };

        let request = config.into_request().unwrap();
        assert_eq!(request.interface, "wlan0");
        assert_eq!(request.channels.unwrap().as_slice(), &[1, 6, 11]);
        assert_eq!(request.hop, 2);
        assert_eq!(request.delay, Duration::from_millis(100));
    }

    #[test]
    fn test_into_request_without_channels_discovers() {
        let config = HopConfig {
            interface: Some("wlan0".to_string()),
            ..HopConfig::default()
        };
        assert!(config.into_request().unwrap().channels.is_none());
    }

    #[test]
    fn test_into_request_requires_interface() {
        assert!(matches!(HopConfig::default().into_request().unwrap_err(), AppError::MissingInterface));
    }

    #[test]
    fn test_into_request_rejects_empty_list() {
        let config = HopConfig {
            interface: Some("wlan0".to_string()),
            channels: Some(vec![]),
            ..HopConfig::default()
        };
        assert!(matches!(
            config.into_request().unwrap_err(),
            AppError::Config(ConfigError::EmptyChannelList)
        ));
    }
}
