//! User settings for addrbook
//!
//! Manages user preferences: page size for listings, how leap-day birthdays
//! are observed and whether changes are recorded in the audit log.

use serde::{Deserialize, Serialize};

use super::paths::AddrBookPaths;
use crate::book::DEFAULT_PAGE_SIZE;
use crate::error::AddrBookError;
use crate::models::LeapDayPolicy;

/// User settings for addrbook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Records shown per page when listing
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Observed date of Feb 29 birthdays in common years
    #[serde(default)]
    pub leap_day_policy: LeapDayPolicy,

    /// Whether create/update/delete operations are written to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            page_size: default_page_size(),
            leap_day_policy: LeapDayPolicy::default(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &AddrBookPaths) -> Result<Self, AddrBookError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                AddrBookError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AddrBookError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AddrBookPaths) -> Result<(), AddrBookError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AddrBookError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            AddrBookError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    fn validate(&self) -> Result<(), AddrBookError> {
        if self.page_size == 0 {
            return Err(AddrBookError::Config(
                "page_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
