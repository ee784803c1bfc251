//! The bundled brewery catalog.
//!
//! The catalog ships inside the binary and can be replaced at startup by a
//! file with the same schema. Unlike user data, a broken catalog is an error.

use super::types::{is_user_authored, Group};
use crate::{BeerNoterError, Result};
use std::path::Path;
use tracing::debug;

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Read-only list of breweries loaded once per process
#[derive(Debug, Clone, PartialEq)]
pub struct BaseCatalog {
    groups: Vec<Group>,
}

impl BaseCatalog {
    /// The catalog compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Parse a catalog document
    ///
    /// Ids in the user range are rejected; they belong to breweries and
    /// beers the user adds.
    pub fn from_json(content: &str) -> Result<Self> {
        let groups: Vec<Group> = serde_json::from_str(content)
            .map_err(|e| BeerNoterError::Catalog(format!("Failed to parse catalog: {}", e)))?;

        for group in &groups {
            if is_user_authored(group.id) {
                return Err(BeerNoterError::Catalog(format!(
                    "brewery id {} is in the range reserved for user breweries",
                    group.id
                )));
            }
            if let Some(entry) = group.beers.iter().find(|e| is_user_authored(e.id)) {
                return Err(BeerNoterError::Catalog(format!(
                    "beer id {} in brewery {} is in the range reserved for user beers",
                    entry.id, group.id
                )));
            }
        }
        Ok(Self { groups })
    }

    /// Load a catalog file in place of the bundled one
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            BeerNoterError::Catalog(format!("Failed to read catalog {}: {}", path.display(), e))
        })?;
        let catalog = Self::from_json(&content)?;
        debug!(path = %path.display(), groups = catalog.groups.len(), "Loaded catalog file");
        Ok(catalog)
    }

    pub fn from_groups(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn contains_group(&self, group_id: u64) -> bool {
        self.groups.iter().any(|g| g.id == group_id)
    }
}
