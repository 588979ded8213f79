//! Path management for addrbook
//!
//! ## Path Resolution Order
//!
//! 1. `ADDRBOOK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory (`$XDG_CONFIG_HOME` or `~/.config` on
//!    Linux, `~/Library/Application Support` on macOS, `%APPDATA%` on
//!    Windows) joined with `addrbook`

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::AddrBookError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "ADDRBOOK_DATA_DIR";

/// Manages all paths used by addrbook
#[derive(Debug, Clone)]
pub struct AddrBookPaths {
    /// Base directory for all addrbook data
    base_dir: PathBuf,
}

impl AddrBookPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, AddrBookError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to address_book.json
    pub fn book_file(&self) -> PathBuf {
        self.data_dir().join("address_book.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), AddrBookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AddrBookError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| AddrBookError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, AddrBookError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| AddrBookError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("addrbook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AddrBookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        std::env::set_var(DATA_DIR_ENV, custom_path);
        let paths = AddrBookPaths::new().unwrap();
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AddrBookPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AddrBookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
        assert_eq!(
            paths.book_file(),
            temp_dir.path().join("data").join("address_book.json")
        );
    }
}
