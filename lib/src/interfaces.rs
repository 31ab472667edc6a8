//! Network interface discovery through sysfs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::trace;

/// Where the kernel lists network devices.
pub const SYS_CLASS_NET: &str = "/sys/class/net";

/// View of a `class/net` directory; one entry per network device.
#[derive(Debug, Clone)]
pub struct NetClass {
    root: PathBuf,
}

impl Default for NetClass {
    fn default() -> Self {
        Self::new(SYS_CLASS_NET)
    }
}

impl NetClass {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether a device called `name` exists. An unreadable directory counts
    /// as no devices at all.
    pub fn exists(&self, name: &str) -> bool {
        match self.list() {
            Ok(names) => names.iter().any(|n| n == name),
            Err(e) => {
                trace!("Unable to read {}: {e}", self.root.display());
                false
            }
        }
    }

    /// Names of all devices, sorted.
    pub fn list(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    fn fake_class_net(names: &[&str]) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        for name in names {
            fs::create_dir(dir.path().join(name)).unwrap();
        }
        dir
    }

    #[test]
    fn test_exists() {
        let dir = fake_class_net(&["lo", "eth0", "wlan0"]);
        let net = NetClass::new(dir.path());

        assert!(net.exists("wlan0"));
        assert!(net.exists("lo"));
        assert!(!net.exists("wlan1"));
        assert!(!net.exists("wlan"));
    }

    #[test]
    fn test_list_is_sorted() {
        let dir = fake_class_net(&["wlan0", "eth0", "lo"]);
        let net = NetClass::new(dir.path());

        assert_eq!(net.list().unwrap(), vec!["eth0", "lo", "wlan0"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let net = NetClass::new(dir.path().join("missing"));

        assert!(net.list().is_err());
        assert!(!net.exists("wlan0"));
    }

    #[test]
    fn test_default_root() {
        assert_eq!(NetClass::default().root(), Path::new(SYS_CLASS_NET));
    }
}
