//! Breweries and beers the user added, and edits to bundled beers.

use super::bundle::BaseCatalog;
use super::types::{is_user_authored, EntryPatch, UserEntry, UserGroup, USER_ID_BASE};
use crate::state::store::{load_json, persist_json, KeyValueStore};
use crate::{BeerNoterError, Result};
use tracing::{debug, info};

/// Durable key holding the user's breweries as a JSON array
pub const USER_CATALOG_KEY: &str = "userBreweries";
/// Durable key holding the highest user id ever handed out
pub const LAST_USER_ID_KEY: &str = "lastUserId";

/// The user's breweries and beers
///
/// Breweries and beers share one id counter that only moves up, so an id
/// freed by a removal is never handed out again and cannot pick up the
/// annotations or hidden flag left behind under it.
pub struct UserCatalog {
    groups: Vec<UserGroup>,
    last_id: u64,
    store: Box<dyn KeyValueStore>,
}

impl UserCatalog {
    /// Load the user's catalog additions; missing or malformed data starts empty
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let groups: Vec<UserGroup> = load_json(store.as_ref(), USER_CATALOG_KEY);
        let saved: u64 = load_json(store.as_ref(), LAST_USER_ID_KEY);
        let last_id = highest_user_id(&groups).max(saved).max(USER_ID_BASE);
        debug!(groups = groups.len(), last_id, "Loaded user catalog");
        Self {
            groups,
            last_id,
            store,
        }
    }

    pub fn groups(&self) -> &[UserGroup] {
        &self.groups
    }

    /// Add a new brewery and return its id
    pub fn add_group(&mut self, name: &str) -> u64 {
        let id = self.allocate_id();
        self.groups.push(UserGroup {
            id,
            name: Some(name.to_string()),
            beers: Vec::new(),
        });
        info!(group_id = id, name, "Added brewery");
        self.save();
        id
    }

    /// Rename a brewery, bundled or user-authored
    pub fn rename_group(&mut self, base: &BaseCatalog, group_id: u64, name: &str) -> Result<()> {
        let group = self.overlay_for(base, group_id)?;
        group.name = Some(name.to_string());
        self.save();
        Ok(())
    }

    /// Add a beer to a brewery and return its id
    pub fn add_entry(&mut self, base: &BaseCatalog, group_id: u64, draft: &EntryPatch) -> Result<u64> {
        self.overlay_for(base, group_id)?;
        let id = self.allocate_id();
        let group = self.overlay_for(base, group_id)?;

        let mut entry = UserEntry {
            id,
            ..Default::default()
        };
        entry.apply(draft);
        group.beers.push(entry);

        info!(group_id, entry_id = id, "Added beer");
        self.save();
        Ok(id)
    }

    /// Change fields of a beer; edits to bundled beers are kept as overrides
    pub fn edit_entry(
        &mut self,
        base: &BaseCatalog,
        group_id: u64,
        entry_id: u64,
        patch: &EntryPatch,
    ) -> Result<()> {
        let in_base = base
            .groups()
            .iter()
            .find(|g| g.id == group_id)
            .is_some_and(|g| g.entry(entry_id).is_some());
        let in_user = self
            .groups
            .iter()
            .find(|g| g.id == group_id)
            .is_some_and(|g| g.beers.iter().any(|e| e.id == entry_id));
        if !in_base && !in_user {
            return Err(BeerNoterError::UnknownEntry { group_id, entry_id });
        }

        let group = self.overlay_for(base, group_id)?;
        match group.beers.iter_mut().find(|e| e.id == entry_id) {
            Some(entry) => entry.apply(patch),
            None => {
                let mut entry = UserEntry {
                    id: entry_id,
                    ..Default::default()
                };
                entry.apply(patch);
                group.beers.push(entry);
            }
        }

        self.save();
        Ok(())
    }

    /// Remove a user-authored beer
    ///
    /// A user-authored brewery left without beers is removed with it.
    pub fn remove_entry(&mut self, group_id: u64, entry_id: u64) -> Result<()> {
        if !is_user_authored(entry_id) {
            return Err(BeerNoterError::NotUserAuthored { group_id, entry_id });
        }

        let index = self
            .groups
            .iter()
            .position(|g| g.id == group_id)
            .ok_or(BeerNoterError::UnknownEntry { group_id, entry_id })?;
        let group = &mut self.groups[index];
        let before = group.beers.len();
        group.beers.retain(|e| e.id != entry_id);
        if group.beers.len() == before {
            return Err(BeerNoterError::UnknownEntry { group_id, entry_id });
        }

        if group.beers.is_empty() && (is_user_authored(group_id) || group.name.is_none()) {
            self.groups.remove(index);
            debug!(group_id, "Removed emptied brewery");
        }

        info!(group_id, entry_id, "Removed beer");
        self.save();
        Ok(())
    }

    /// Overlay record for a brewery, created on demand for bundled breweries
    fn overlay_for(&mut self, base: &BaseCatalog, group_id: u64) -> Result<&mut UserGroup> {
        let index = match self.groups.iter().position(|g| g.id == group_id) {
            Some(index) => index,
            None if base.contains_group(group_id) => {
                self.groups.push(UserGroup {
                    id: group_id,
                    name: None,
                    beers: Vec::new(),
                });
                self.groups.len() - 1
            }
            None => return Err(BeerNoterError::UnknownGroup(group_id)),
        };
        Ok(&mut self.groups[index])
    }

    fn allocate_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn save(&mut self) {
        persist_json(self.store.as_mut(), LAST_USER_ID_KEY, &self.last_id);
        persist_json(self.store.as_mut(), USER_CATALOG_KEY, &self.groups);
    }
}

/// Highest user-range id among breweries and beers, if any
fn highest_user_id(groups: &[UserGroup]) -> u64 {
    groups
        .iter()
        .flat_map(|g| std::iter::once(g.id).chain(g.beers.iter().map(|e| e.id)))
        .filter(|id| is_user_authored(*id))
        .max()
        .unwrap_or(USER_ID_BASE)
}
