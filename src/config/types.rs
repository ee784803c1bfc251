use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings read from config.yaml
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Directory for saved annotations and user breweries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Catalog file to use instead of the bundled one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Minutes of inactivity after which filters and expanded breweries reset
    #[serde(default = "default_session_idle_minutes")]
    pub session_idle_minutes: i64,

    /// Entries per page of a top list
    #[serde(default = "default_top_list_size")]
    pub top_list_size: usize,

    /// Directory exports are written to (current directory when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

fn default_session_idle_minutes() -> i64 {
    720
}

fn default_top_list_size() -> usize {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            catalog: None,
            session_idle_minutes: default_session_idle_minutes(),
            top_list_size: default_top_list_size(),
            export_dir: None,
        }
    }
}

impl Settings {
    /// Layer the fields another file sets over these settings
    pub fn merge(&mut self, other: Settings) {
        let defaults = Settings::default();
        if other.data_dir.is_some() {
            self.data_dir = other.data_dir;
        }
        if other.catalog.is_some() {
            self.catalog = other.catalog;
        }
        if other.session_idle_minutes != defaults.session_idle_minutes {
            self.session_idle_minutes = other.session_idle_minutes;
        }
        if other.top_list_size != defaults.top_list_size {
            self.top_list_size = other.top_list_size;
        }
        if other.export_dir.is_some() {
            self.export_dir = other.export_dir;
        }
    }
}
