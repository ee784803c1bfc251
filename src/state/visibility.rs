use crate::state::store::{load_json, persist_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Durable key for breweries the user chose to hide
pub const HIDDEN_GROUPS_KEY: &str = "hiddenBreweries";

/// Per-brewery on/off flags, stored as a JSON object keyed by brewery id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupFlags(BTreeMap<u64, bool>);

impl GroupFlags {
    pub fn get(&self, group_id: u64) -> bool {
        self.0.get(&group_id).copied().unwrap_or(false)
    }

    pub fn set(&mut self, group_id: u64, value: bool) {
        self.0.insert(group_id, value);
    }

    /// Flip the flag and return the new value
    pub fn toggle(&mut self, group_id: u64) -> bool {
        let value = !self.get(group_id);
        self.set(group_id, value);
        value
    }

    /// Ids whose flag is on, in id order
    pub fn enabled(&self) -> Vec<u64> {
        self.0
            .iter()
            .filter(|(_, on)| **on)
            .map(|(id, _)| *id)
            .collect()
    }
}

/// Breweries hidden from every listing until the user unhides them
pub struct HiddenGroups {
    flags: GroupFlags,
    store: Box<dyn KeyValueStore>,
}

impl HiddenGroups {
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let flags = load_json(store.as_ref(), HIDDEN_GROUPS_KEY);
        Self { flags, store }
    }

    pub fn is_hidden(&self, group_id: u64) -> bool {
        self.flags.get(group_id)
    }

    pub fn set_hidden(&mut self, group_id: u64, hidden: bool) {
        self.flags.set(group_id, hidden);
        persist_json(self.store.as_mut(), HIDDEN_GROUPS_KEY, &self.flags);
    }

    pub fn flags(&self) -> &GroupFlags {
        &self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_flags_default_off() {
        let mut flags = GroupFlags::default();
        assert!(!flags.get(3));
        assert!(flags.toggle(3));
        assert!(!flags.toggle(3));
        assert!(flags.enabled().is_empty());
    }

    #[test]
    fn test_flags_json_shape() {
        let mut flags = GroupFlags::default();
        flags.set(2, true);
        flags.set(5, false);

        assert_eq!(serde_json::to_string(&flags).unwrap(), r#"{"2":true,"5":false}"#);
        let parsed: GroupFlags = serde_json::from_str(r#"{"7":true}"#).unwrap();
        assert_eq!(parsed.enabled(), vec![7]);
    }

    #[test]
    fn test_hidden_groups_persist() {
        let backing = MemoryStore::new();
        let mut hidden = HiddenGroups::load(Box::new(backing.clone()));
        hidden.set_hidden(4, true);

        let reloaded = HiddenGroups::load(Box::new(backing));
        assert!(reloaded.is_hidden(4));
        assert!(!reloaded.is_hidden(1));
    }
}
