//! Content factory for loading tactics data from a data directory.

use std::path::{Path, PathBuf};

use squad_core::TacticsConfig;

use crate::loaders::{ConfigLoader, LoadResult, Scenario, ScenarioLoader};

/// Content factory that loads configuration and scenarios from a data
/// directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── scenarios/
///     ├── ambush.ron
///     └── cornered.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load tactics configuration from `config.toml`; defaults when the file
    /// does not exist.
    pub fn load_config(&self) -> LoadResult<TacticsConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!("{} not found, using default config", path.display());
            return Ok(TacticsConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load a scenario from `scenarios/{name}.ron`.
    pub fn load_scenario(&self, name: &str) -> LoadResult<Scenario> {
        ScenarioLoader::load(&self.scenario_path(name))
    }

    /// Names of every scenario in `scenarios/`, sorted.
    pub fn scenario_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("scenarios");
        let entries = std::fs::read_dir(&dir)
            .map_err(|e| anyhow::anyhow!("Failed to list {}: {}", dir.display(), e))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "ron") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn scenario_path(&self, name: &str) -> PathBuf {
        self.data_dir.join("scenarios").join(format!("{}.ron", name))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert_eq!(
            factory.scenario_path("ambush"),
            Path::new("/tmp/data/scenarios/ambush.ron")
        );
    }

    #[test]
    fn bundled_content_loads() {
        let factory = ContentFactory::bundled();
        assert_eq!(factory.load_config().unwrap(), TacticsConfig::default());

        let names = factory.scenario_names().unwrap();
        assert_eq!(names, vec!["ambush".to_string(), "cornered".to_string()]);
        for name in names {
            let scenario = factory.load_scenario(&name).unwrap();
            assert_eq!(scenario.name, name);
        }
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let factory = ContentFactory::new(temp.path());
        assert_eq!(factory.load_config().unwrap(), TacticsConfig::default());
        assert!(factory.load_scenario("nowhere").is_err());
    }
}
