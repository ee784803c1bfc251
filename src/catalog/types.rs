use super::rating::{self, Rating};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ids at or above this value are allocated by users, never by the bundled catalog
pub const USER_ID_BASE: u64 = 1_000_000_000_000;

/// Whether an id was allocated for a user-authored brewery or beer
pub fn is_user_authored(id: u64) -> bool {
    id >= USER_ID_BASE
}

/// A beer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub details: String,
    #[serde(
        default,
        deserialize_with = "rating::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub untappd_rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub untappd_url: Option<String>,
}

/// A brewery and its beers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub beers: Vec<Entry>,
}

impl Group {
    pub fn entry(&self, entry_id: u64) -> Option<&Entry> {
        self.beers.iter().find(|e| e.id == entry_id)
    }
}

/// A user-authored beer, or a user edit layered over a bundled one
///
/// Every field but the id is optional; present fields win over the
/// bundled beer's fields when the two are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntry {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(
        default,
        deserialize_with = "rating::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub untappd_rating: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub untappd_url: Option<String>,
}

impl UserEntry {
    /// Layer this record's present fields over a bundled beer
    pub fn overlay(&self, base: &Entry) -> Entry {
        Entry {
            id: base.id,
            name: self.name.clone().unwrap_or_else(|| base.name.clone()),
            style: self.style.clone().unwrap_or_else(|| base.style.clone()),
            details: self.details.clone().unwrap_or_else(|| base.details.clone()),
            untappd_rating: self
                .untappd_rating
                .clone()
                .or_else(|| base.untappd_rating.clone()),
            untappd_url: self.untappd_url.clone().or_else(|| base.untappd_url.clone()),
        }
    }

    /// A beer with no bundled counterpart; missing fields are left blank
    pub fn to_entry(&self) -> Entry {
        Entry {
            id: self.id,
            name: self.name.clone().unwrap_or_default(),
            style: self.style.clone().unwrap_or_default(),
            details: self.details.clone().unwrap_or_default(),
            untappd_rating: self.untappd_rating.clone(),
            untappd_url: self.untappd_url.clone(),
        }
    }

    /// Copy the fields a patch sets, leaving the rest untouched
    pub fn apply(&mut self, patch: &EntryPatch) {
        if let Some(name) = &patch.name {
            self.name = Some(name.clone());
        }
        if let Some(style) = &patch.style {
            self.style = Some(style.clone());
        }
        if let Some(details) = &patch.details {
            self.details = Some(details.clone());
        }
    }
}

/// Fields a user may set when adding or editing a beer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryPatch {
    pub name: Option<String>,
    pub style: Option<String>,
    pub details: Option<String>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.style.is_none() && self.details.is_none()
    }
}

/// A user-authored brewery, or the user's additions to a bundled one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserGroup {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub beers: Vec<UserEntry>,
}

/// Identifies one beer within one brewery
///
/// Beer ids are only unique within their brewery, so every per-beer record
/// is keyed by the pair. Serialized as `"groupId-entryId"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EntryKey {
    pub group_id: u64,
    pub entry_id: u64,
}

impl EntryKey {
    pub fn new(group_id: u64, entry_id: u64) -> Self {
        Self { group_id, entry_id }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.group_id, self.entry_id)
    }
}

impl FromStr for EntryKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (group, entry) = s
            .split_once('-')
            .ok_or_else(|| format!("invalid beer key '{}'", s))?;
        let group_id = group
            .parse()
            .map_err(|_| format!("invalid brewery id in key '{}'", s))?;
        let entry_id = entry
            .parse()
            .map_err(|_| format!("invalid beer id in key '{}'", s))?;
        Ok(Self { group_id, entry_id })
    }
}

impl From<EntryKey> for String {
    fn from(key: EntryKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for EntryKey {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base_entry() -> Entry {
        Entry {
            id: 7,
            name: "Testi".to_string(),
            style: "IPA".to_string(),
            details: "6.5%".to_string(),
            untappd_rating: Rating::parse("3.9"),
            untappd_url: None,
        }
    }

    #[test]
    fn test_user_id_range() {
        assert!(!is_user_authored(7155171));
        assert!(is_user_authored(USER_ID_BASE));
        assert!(is_user_authored(USER_ID_BASE + 42));
    }

    #[test]
    fn test_overlay_is_field_level() {
        let patch = UserEntry {
            id: 7,
            style: Some("Hazy IPA".to_string()),
            ..Default::default()
        };

        let merged = patch.overlay(&base_entry());
        assert_eq!(merged.name, "Testi");
        assert_eq!(merged.style, "Hazy IPA");
        assert_eq!(merged.details, "6.5%");
        assert_eq!(merged.untappd_rating, Rating::parse("3.9"));
    }

    #[test]
    fn test_entry_key_string_form() {
        let key = EntryKey::new(1, 7155171);
        assert_eq!(key.to_string(), "1-7155171");
        assert_eq!("1-7155171".parse::<EntryKey>().unwrap(), key);
        assert!("17155171".parse::<EntryKey>().is_err());
        assert!("a-1".parse::<EntryKey>().is_err());
    }

    #[test]
    fn test_bundled_schema() {
        let json = r#"{"id":1,"name":"Brewery","beers":[
            {"id":2,"name":"Beer","style":"Lager","details":"4.7%","untappdRating":"3.41","untappdUrl":"https://untappd.com/b/2"},
            {"id":3,"name":"Other","style":"Stout","details":""}
        ]}"#;
        let group: Group = serde_json::from_str(json).unwrap();

        assert_eq!(group.beers.len(), 2);
        assert_eq!(group.beers[0].untappd_rating.as_ref().unwrap().value(), Some(3.41));
        assert!(group.beers[1].untappd_rating.is_none());
        assert_eq!(group.entry(3).unwrap().name, "Other");
    }
}
