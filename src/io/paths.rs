use crate::{BeerNoterError, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Where beernoter keeps its configuration and saved data
#[derive(Debug, Clone, PartialEq)]
pub struct BeerNoterPaths {
    /// Configuration directory (holds config.yaml)
    pub config_dir: PathBuf,
    /// Durable data: annotations, user breweries, hidden breweries
    pub data_dir: PathBuf,
    /// Session data: filters and expanded breweries
    pub session_dir: PathBuf,
}

impl BeerNoterPaths {
    /// Create new paths instance using standard directories
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "beernoter").ok_or_else(|| {
            BeerNoterError::Path("Failed to determine project directories".to_string())
        })?;

        let data_dir = dirs.data_dir().to_path_buf();
        Ok(Self {
            config_dir: dirs.config_dir().to_path_buf(),
            session_dir: data_dir.join("session"),
            data_dir,
        })
    }

    /// Keep everything under one explicit directory
    pub fn for_dir(dir: &Path) -> Self {
        Self {
            config_dir: dir.to_path_buf(),
            data_dir: dir.to_path_buf(),
            session_dir: dir.join("session"),
        }
    }

    /// Default configuration file path
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.yaml")
    }
}

impl Default for BeerNoterPaths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| {
            // Fallback to current directory if platform directories fail
            let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            Self::for_dir(&current_dir.join(".beernoter"))
        })
    }
}
