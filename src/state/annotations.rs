use crate::catalog::rating::{self, Rating};
use crate::catalog::EntryKey;
use crate::state::store::{load_json, persist_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Durable key holding all annotations, keyed `"groupId-entryId"`
pub const ANNOTATIONS_KEY: &str = "userBeerData";

pub type AnnotationMap = BTreeMap<EntryKey, Annotation>;

/// What the user recorded about one beer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Annotation {
    #[serde(
        default,
        deserialize_with = "rating::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub user_rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub favorite: bool,
}

impl Annotation {
    /// Notes, unless blank
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.is_empty())
    }

    /// Whether there is anything worth exporting
    pub fn has_content(&self) -> bool {
        self.user_rating.is_some() || self.notes().is_some()
    }
}

/// Annotations for every beer, saved in full after each change
pub struct AnnotationStore {
    annotations: AnnotationMap,
    store: Box<dyn KeyValueStore>,
}

impl AnnotationStore {
    /// Load saved annotations; missing or malformed data starts empty
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let annotations: AnnotationMap = load_json(store.as_ref(), ANNOTATIONS_KEY);
        debug!(count = annotations.len(), "Loaded annotations");
        Self { annotations, store }
    }

    pub fn get(&self, key: EntryKey) -> Option<&Annotation> {
        self.annotations.get(&key)
    }

    /// Replace the annotation for `key` and save every annotation
    ///
    /// When saving fails the change still holds for the rest of the session.
    pub fn set(&mut self, key: EntryKey, annotation: Annotation) {
        self.annotations.insert(key, annotation);
        persist_json(self.store.as_mut(), ANNOTATIONS_KEY, &self.annotations);
    }

    pub fn all(&self) -> &AnnotationMap {
        &self.annotations
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::MemoryStore;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_missing() {
        let store = AnnotationStore::load(Box::new(MemoryStore::new()));
        assert!(store.get(EntryKey::new(1, 2)).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_persists_whole_map() {
        let backing = MemoryStore::new();
        let mut store = AnnotationStore::load(Box::new(backing.clone()));

        store.set(
            EntryKey::new(1, 7155171),
            Annotation {
                user_rating: Rating::parse("4.5"),
                notes: Some("nice".to_string()),
                favorite: false,
            },
        );
        store.set(
            EntryKey::new(2, 3),
            Annotation {
                favorite: true,
                ..Default::default()
            },
        );

        let saved = backing.get(ANNOTATIONS_KEY).unwrap().unwrap();
        assert_eq!(
            saved,
            r#"{"1-7155171":{"userRating":"4.5","notes":"nice"},"2-3":{"favorite":true}}"#
        );

        let reloaded = AnnotationStore::load(Box::new(backing));
        assert_eq!(reloaded.len(), 2);
        assert_eq!(
            reloaded.get(EntryKey::new(1, 7155171)).unwrap().notes(),
            Some("nice")
        );
    }

    #[test]
    fn test_unavailable_storage_keeps_session_state() {
        let mut store = AnnotationStore::load(Box::new(MemoryStore::unavailable()));
        store.set(
            EntryKey::new(1, 2),
            Annotation {
                favorite: true,
                ..Default::default()
            },
        );

        assert!(store.get(EntryKey::new(1, 2)).unwrap().favorite);
    }

    #[test]
    fn test_malformed_saved_data_starts_empty() {
        let mut backing = MemoryStore::new();
        backing.set(ANNOTATIONS_KEY, r#"{"oops":{"favorite":true}}"#).unwrap();

        let store = AnnotationStore::load(Box::new(backing));
        assert!(store.is_empty());
    }

    #[test]
    fn test_legacy_numeric_rating_loads() {
        let mut backing = MemoryStore::new();
        backing
            .set(ANNOTATIONS_KEY, r#"{"1-2":{"userRating":4,"favorite":false}}"#)
            .unwrap();

        let store = AnnotationStore::load(Box::new(backing));
        let annotation = store.get(EntryKey::new(1, 2)).unwrap();
        assert_eq!(annotation.user_rating.as_ref().unwrap().value(), Some(4.0));
        assert!(!annotation.favorite);
    }

    #[test]
    fn test_blank_notes_are_not_content() {
        let annotation = Annotation {
            notes: Some(String::new()),
            ..Default::default()
        };
        assert!(annotation.notes().is_none());
        assert!(!annotation.has_content());
    }
}
