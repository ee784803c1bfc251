//! Session-scoped settings: the current filters and expanded breweries.
//!
//! Values are stored as strings under the same keys the web app kept in
//! `sessionStorage`. A command-line session ends after a period of
//! inactivity instead of when a tab closes.

use crate::state::store::{load_json, KeyValueStore};
use crate::state::visibility::GroupFlags;
use crate::view::{FilterCriteria, SortMode};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

pub const SEARCH_QUERY_KEY: &str = "searchQuery";
pub const SHOW_FAVORITES_KEY: &str = "showFavorites";
pub const SHOW_UNRATED_KEY: &str = "showBeersWithoutUntappdRating";
pub const MIN_RATING_KEY: &str = "minUntappdRating";
pub const HAS_USER_RATING_KEY: &str = "hasUserRating";
pub const SORT_OPTION_KEY: &str = "sortOption";
pub const EXPANDED_KEY: &str = "breweryVisibility";
pub const LAST_ACTIVE_KEY: &str = "lastActive";

const SESSION_KEYS: [&str; 8] = [
    SEARCH_QUERY_KEY,
    SHOW_FAVORITES_KEY,
    SHOW_UNRATED_KEY,
    MIN_RATING_KEY,
    HAS_USER_RATING_KEY,
    SORT_OPTION_KEY,
    EXPANDED_KEY,
    LAST_ACTIVE_KEY,
];

pub struct SessionState {
    criteria: FilterCriteria,
    expanded: GroupFlags,
    store: Box<dyn KeyValueStore>,
}

impl SessionState {
    /// Resume the current session, or start a new one if it went idle
    pub fn open(store: Box<dyn KeyValueStore>, idle_timeout: Duration) -> Self {
        Self::open_at(store, idle_timeout, Utc::now())
    }

    /// Same as [`SessionState::open`] with an explicit clock
    pub fn open_at(mut store: Box<dyn KeyValueStore>, idle_timeout: Duration, now: DateTime<Utc>) -> Self {
        let last_active = read(store.as_ref(), LAST_ACTIVE_KEY)
            .and_then(|value| DateTime::parse_from_rfc3339(&value).ok())
            .map(|time| time.with_timezone(&Utc));

        let expired = match last_active {
            Some(time) => now - time > idle_timeout,
            None => true,
        };
        if expired {
            debug!("Starting a new session");
            clear_keys(store.as_mut());
        }

        write(store.as_mut(), LAST_ACTIVE_KEY, &now.to_rfc3339());

        let criteria = FilterCriteria {
            query: read(store.as_ref(), SEARCH_QUERY_KEY).unwrap_or_default(),
            favorites_only: read_flag(store.as_ref(), SHOW_FAVORITES_KEY),
            min_external_rating: read(store.as_ref(), MIN_RATING_KEY)
                .and_then(|value| value.parse::<f64>().ok()),
            externally_unrated_only: read_flag(store.as_ref(), SHOW_UNRATED_KEY),
            has_user_rating: read_flag(store.as_ref(), HAS_USER_RATING_KEY),
            sort: read(store.as_ref(), SORT_OPTION_KEY)
                .and_then(|value| value.parse::<SortMode>().ok())
                .unwrap_or_default(),
        };
        let expanded = load_json(store.as_ref(), EXPANDED_KEY);

        Self {
            criteria,
            expanded,
            store,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the criteria and save all six fields
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        let min_rating = self
            .criteria
            .min_external_rating
            .map(|min| min.to_string())
            .unwrap_or_default();

        let store = self.store.as_mut();
        write(store, SEARCH_QUERY_KEY, &self.criteria.query);
        write(store, SHOW_FAVORITES_KEY, &self.criteria.favorites_only.to_string());
        write(store, SHOW_UNRATED_KEY, &self.criteria.externally_unrated_only.to_string());
        write(store, MIN_RATING_KEY, &min_rating);
        write(store, HAS_USER_RATING_KEY, &self.criteria.has_user_rating.to_string());
        write(store, SORT_OPTION_KEY, self.criteria.sort.as_str());
    }

    pub fn expanded(&self) -> &GroupFlags {
        &self.expanded
    }

    /// Flip a brewery between collapsed and expanded; returns the new state
    pub fn toggle_expanded(&mut self, group_id: u64) -> bool {
        let expanded = self.expanded.toggle(group_id);
        match serde_json::to_string(&self.expanded) {
            Ok(content) => write(self.store.as_mut(), EXPANDED_KEY, &content),
            Err(e) => warn!(error = %e, "Failed to encode expanded breweries"),
        }
        expanded
    }
}

fn read(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Failed to read session value");
            None
        }
    }
}

fn read_flag(store: &dyn KeyValueStore, key: &str) -> bool {
    read(store, key).as_deref() == Some("true")
}

fn write(store: &mut dyn KeyValueStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        warn!(key, error = %e, "Failed to save session value");
    }
}

fn clear_keys(store: &mut dyn KeyValueStore) {
    for key in SESSION_KEYS {
        if let Err(e) = store.remove(key) {
            warn!(key, error = %e, "Failed to clear session value");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::store::MemoryStore;
    use pretty_assertions::assert_eq;

    fn idle() -> Duration {
        Duration::minutes(30)
    }

    fn sample_criteria() -> FilterCriteria {
        FilterCriteria {
            query: "stout".to_string(),
            favorites_only: true,
            min_external_rating: Some(3.75),
            externally_unrated_only: false,
            has_user_rating: true,
            sort: SortMode::UserRatingDesc,
        }
    }

    #[test]
    fn test_fresh_session_has_defaults() {
        let session = SessionState::open(Box::new(MemoryStore::new()), idle());
        assert_eq!(session.criteria(), &FilterCriteria::default());
        assert!(session.expanded().enabled().is_empty());
    }

    #[test]
    fn test_criteria_saved_as_strings() {
        let backing = MemoryStore::new();
        let mut session = SessionState::open(Box::new(backing.clone()), idle());
        session.set_criteria(sample_criteria());

        assert_eq!(backing.get(SEARCH_QUERY_KEY).unwrap().as_deref(), Some("stout"));
        assert_eq!(backing.get(SHOW_FAVORITES_KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(backing.get(SHOW_UNRATED_KEY).unwrap().as_deref(), Some("false"));
        assert_eq!(backing.get(MIN_RATING_KEY).unwrap().as_deref(), Some("3.75"));
        assert_eq!(backing.get(SORT_OPTION_KEY).unwrap().as_deref(), Some("userRating"));
    }

    #[test]
    fn test_session_resumes_within_timeout() {
        let backing = MemoryStore::new();
        let start = Utc::now();
        {
            let mut session = SessionState::open_at(Box::new(backing.clone()), idle(), start);
            session.set_criteria(sample_criteria());
            session.toggle_expanded(2);
        }

        let resumed =
            SessionState::open_at(Box::new(backing), idle(), start + Duration::minutes(10));
        assert_eq!(resumed.criteria(), &sample_criteria());
        assert!(resumed.expanded().get(2));
    }

    #[test]
    fn test_session_expires_after_idle_timeout() {
        let backing = MemoryStore::new();
        let start = Utc::now();
        {
            let mut session = SessionState::open_at(Box::new(backing.clone()), idle(), start);
            session.set_criteria(sample_criteria());
            session.toggle_expanded(2);
        }

        let expired =
            SessionState::open_at(Box::new(backing), idle(), start + Duration::minutes(31));
        assert_eq!(expired.criteria(), &FilterCriteria::default());
        assert!(!expired.expanded().get(2));
    }

    #[test]
    fn test_empty_min_rating_is_unset() {
        let backing = MemoryStore::new();
        let mut session = SessionState::open(Box::new(backing.clone()), idle());
        session.set_criteria(FilterCriteria::default());

        assert_eq!(backing.get(MIN_RATING_KEY).unwrap().as_deref(), Some(""));
        let resumed = SessionState::open(Box::new(backing), idle());
        assert_eq!(resumed.criteria().min_external_rating, None);
    }
}
