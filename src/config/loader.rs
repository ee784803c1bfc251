use super::types::Settings;
use crate::io::BeerNoterPaths;
use crate::{BeerNoterError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "BEERNOTER_DATA_DIR";
/// Environment variable overriding the catalog file
pub const CATALOG_ENV: &str = "BEERNOTER_CATALOG";

/// Configuration loader for settings files
pub struct SettingsLoader {
    /// Look up environment variables (swappable for tests)
    env: Box<dyn Fn(&str) -> Option<String>>,
}

impl SettingsLoader {
    /// Create new settings loader reading the process environment
    pub fn new() -> Self {
        Self {
            env: Box::new(|key| std::env::var(key).ok()),
        }
    }

    /// Use a custom environment lookup
    pub fn with_env<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        Self { env: Box::new(env) }
    }

    /// Load and validate one settings file
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<Settings> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            BeerNoterError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let settings: Settings = serde_yaml_ng::from_str(&contents).map_err(|e| {
            BeerNoterError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        validate(&settings)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(settings)
    }

    /// Resolve settings from defaults, config files and the environment
    ///
    /// The user config file is optional and a broken one is skipped with a
    /// warning. An explicitly requested file must load.
    pub fn load(&self, paths: &BeerNoterPaths, explicit: Option<&Path>) -> Result<Settings> {
        let mut settings = Settings::default();

        let user_config = paths.config_file();
        if user_config.exists() {
            match self.load_file(&user_config) {
                Ok(user) => settings.merge(user),
                Err(e) => warn!(error = %e, "Ignoring user config file"),
            }
        }

        if let Some(path) = explicit {
            settings.merge(self.load_file(path)?);
        }

        if let Some(dir) = (self.env)(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            settings.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(catalog) = (self.env)(CATALOG_ENV).filter(|v| !v.is_empty()) {
            settings.catalog = Some(PathBuf::from(catalog));
        }

        Ok(settings)
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn validate(settings: &Settings) -> Result<()> {
    if settings.session_idle_minutes <= 0 {
        return Err(BeerNoterError::Config(format!(
            "session_idle_minutes must be positive, got {}",
            settings.session_idle_minutes
        )));
    }
    if settings.top_list_size == 0 {
        return Err(BeerNoterError::Config(
            "top_list_size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env() -> SettingsLoader {
        SettingsLoader::with_env(|_| None)
    }

    #[test]
    fn test_defaults_without_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BeerNoterPaths::for_dir(temp_dir.path());

        let settings = no_env().load(&paths, None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_user_config_then_explicit_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BeerNoterPaths::for_dir(temp_dir.path());
        std::fs::write(paths.config_file(), "top_list_size: 3\ncatalog: /a.json\n").unwrap();

        let explicit = temp_dir.path().join("other.yaml");
        std::fs::write(&explicit, "catalog: /b.json\n").unwrap();

        let settings = no_env().load(&paths, Some(&explicit)).unwrap();
        assert_eq!(settings.top_list_size, 3);
        assert_eq!(settings.catalog, Some(PathBuf::from("/b.json")));
    }

    #[test]
    fn test_broken_user_config_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BeerNoterPaths::for_dir(temp_dir.path());
        std::fs::write(paths.config_file(), "top_list_size: [nope").unwrap();

        let settings = no_env().load(&paths, None).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BeerNoterPaths::for_dir(temp_dir.path());

        let result = no_env().load(&paths, Some(&temp_dir.path().join("missing.yaml")));
        assert!(matches!(result, Err(BeerNoterError::Config(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        std::fs::write(&path, "session_idle_minutes: 0\n").unwrap();

        assert!(no_env().load_file(&path).is_err());
    }

    #[test]
    fn test_environment_overrides_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BeerNoterPaths::for_dir(temp_dir.path());
        std::fs::write(paths.config_file(), "data_dir: /from-file\n").unwrap();

        let env: HashMap<&str, &str> =
            HashMap::from([(DATA_DIR_ENV, "/from-env"), (CATALOG_ENV, "")]);
        let loader = SettingsLoader::with_env(move |key| env.get(key).map(|v| v.to_string()));

        let settings = loader.load(&paths, None).unwrap();
        assert_eq!(settings.data_dir, Some(PathBuf::from("/from-env")));
        assert_eq!(settings.catalog, None);
    }
}
