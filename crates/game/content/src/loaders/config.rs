//! Tactics configuration loader.

use std::path::Path;

use squad_core::TacticsConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`TacticsConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a configuration file.
    ///
    /// Keys missing from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<TacticsConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse and validate configuration text.
    pub fn parse(content: &str) -> LoadResult<TacticsConfig> {
        let config: TacticsConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> LoadResult<TacticsConfig> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(TacticsConfig::default()),
        }
    }
}
