//! Path management for usercat
//!
//! ## Path Resolution Order
//!
//! 1. `USERCAT_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/usercat` or `~/.config/usercat`
//! 3. Windows: `%APPDATA%\usercat`

use std::path::PathBuf;

use crate::error::CatalogError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "USERCAT_DATA_DIR";

/// Manages all paths used by usercat
#[derive(Debug, Clone)]
pub struct CatalogPaths {
    base_dir: PathBuf,
}

impl CatalogPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home or application data directory can be
    /// determined.
    pub fn new() -> Result<Self, CatalogError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create CatalogPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Default target for `usercat export`
    pub fn default_export_file(&self) -> PathBuf {
        self.base_dir.join("exports").join("catalog.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), CatalogError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CatalogError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Resolve the default base directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CatalogError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                CatalogError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("usercat"))
}

/// Resolve the default base directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CatalogError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CatalogError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("usercat"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CatalogPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.default_export_file(),
            temp_dir.path().join("exports").join("catalog.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested");
        let paths = CatalogPaths::with_base_dir(base.clone());

        paths.ensure_directories().unwrap();
        assert!(base.exists());
    }
}
