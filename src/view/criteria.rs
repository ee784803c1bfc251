use std::fmt;
use std::str::FromStr;

/// How beers are ordered within each brewery
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortMode {
    /// Catalog order
    #[default]
    Default,
    /// Highest Untappd rating first
    ExternalRatingDesc,
    /// Highest user rating first
    UserRatingDesc,
}

impl SortMode {
    /// Name used when the mode is saved in the session store
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Default => "default",
            SortMode::ExternalRatingDesc => "untappdRating",
            SortMode::UserRatingDesc => "userRating",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(SortMode::Default),
            "untappdRating" | "untappd" | "external" => Ok(SortMode::ExternalRatingDesc),
            "userRating" | "user" => Ok(SortMode::UserRatingDesc),
            other => Err(format!(
                "unknown sort '{}', expected one of: default, untappd, user",
                other
            )),
        }
    }
}

/// Search, filter and sort settings for a catalog listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Case-insensitive text matched against beer fields and the user's notes
    pub query: String,
    pub favorites_only: bool,
    /// Minimum Untappd rating; unset or zero means no minimum
    pub min_external_rating: Option<f64>,
    /// Only beers Untappd lists with a literal "0" rating
    pub externally_unrated_only: bool,
    pub has_user_rating: bool,
    pub sort: SortMode,
}

impl FilterCriteria {
    /// The minimum rating, when one is actually in effect
    pub fn threshold(&self) -> Option<f64> {
        self.min_external_rating
            .filter(|min| min.is_finite() && *min != 0.0)
    }

    /// Whether any setting narrows the set of beers shown
    ///
    /// Sorting alone never counts.
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
            || self.favorites_only
            || self.has_user_rating
            || self.externally_unrated_only
            || self.threshold().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_inactive() {
        assert!(!FilterCriteria::default().is_active());
    }

    #[test]
    fn test_zero_threshold_is_inactive() {
        let criteria = FilterCriteria {
            min_external_rating: Some(0.0),
            ..Default::default()
        };
        assert!(!criteria.is_active());
        assert_eq!(criteria.threshold(), None);
    }

    #[test]
    fn test_sort_alone_is_inactive() {
        let criteria = FilterCriteria {
            sort: SortMode::UserRatingDesc,
            ..Default::default()
        };
        assert!(!criteria.is_active());
    }

    #[test]
    fn test_each_filter_activates() {
        let active = [
            FilterCriteria {
                query: "ipa".to_string(),
                ..Default::default()
            },
            FilterCriteria {
                favorites_only: true,
                ..Default::default()
            },
            FilterCriteria {
                min_external_rating: Some(3.5),
                ..Default::default()
            },
            FilterCriteria {
                externally_unrated_only: true,
                ..Default::default()
            },
            FilterCriteria {
                has_user_rating: true,
                ..Default::default()
            },
        ];
        assert!(active.iter().all(FilterCriteria::is_active));
    }

    #[test]
    fn test_sort_mode_names() {
        assert_eq!("untappdRating".parse::<SortMode>().unwrap(), SortMode::ExternalRatingDesc);
        assert_eq!("user".parse::<SortMode>().unwrap(), SortMode::UserRatingDesc);
        assert_eq!(SortMode::ExternalRatingDesc.to_string(), "untappdRating");
        assert!("best".parse::<SortMode>().is_err());
    }
}
