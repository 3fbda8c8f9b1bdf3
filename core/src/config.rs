//! Configuration persistence
//!
//! The serializable [`AppConfig`] struct lives in cragscout-types; this
//! module provides loading, saving, and platform-default path resolution.

use std::path::PathBuf;

use cragscout_types::AppConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}

/// Extension trait for AppConfig persistence.
pub trait AppConfigExt {
    fn load() -> Self;
    fn save(&self) -> Result<(), ConfigError>;
    /// Configured data directory, or the platform default
    fn resolved_data_dir(&self) -> PathBuf;
    /// Configured image directory, or `<data dir>/images`
    fn resolved_image_dir(&self) -> PathBuf;
}

impl AppConfigExt for AppConfig {
    fn load() -> Self {
        confy::load("cragscout", "config").unwrap_or_else(|err| {
            tracing::warn!(%err, "failed to load configuration; using defaults");
            AppConfig::default()
        })
    }

    fn save(&self) -> Result<(), ConfigError> {
        confy::store("cragscout", "config", self).map_err(ConfigError::Save)
    }

    fn resolved_data_dir(&self) -> PathBuf {
        if !self.data_directory.is_empty() {
            return PathBuf::from(&self.data_directory);
        }
        dirs::data_dir()
            .map(|dir| dir.join("cragscout"))
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn resolved_image_dir(&self) -> PathBuf {
        if !self.image_directory.is_empty() {
            return PathBuf::from(&self.image_directory);
        }
        self.resolved_data_dir().join("images")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_directories_win_over_defaults() {
        let config = AppConfig {
            data_directory: "/srv/cragscout".into(),
            image_directory: String::new(),
            ..AppConfig::default()
        };
        assert_eq!(config.resolved_data_dir(), PathBuf::from("/srv/cragscout"));
        assert_eq!(
            config.resolved_image_dir(),
            PathBuf::from("/srv/cragscout/images")
        );
    }
}
