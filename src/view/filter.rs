//! Filtering and sorting the merged catalog for display.

use super::criteria::{FilterCriteria, SortMode};
use crate::catalog::rating::sort_value;
use crate::catalog::{Entry, EntryKey, Group};
use crate::state::annotations::{Annotation, AnnotationMap};
use crate::state::visibility::GroupFlags;

/// A beer as listed, with whatever the user recorded about it
#[derive(Debug, Clone, Copy)]
pub struct EntryView<'a> {
    pub group_id: u64,
    pub entry: &'a Entry,
    pub annotation: Option<&'a Annotation>,
}

impl EntryView<'_> {
    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.group_id, self.entry.id)
    }

    pub fn is_favorite(&self) -> bool {
        self.annotation.is_some_and(|a| a.favorite)
    }
}

/// A brewery with the beers that passed the filters, in display order
#[derive(Debug, Clone)]
pub struct GroupView<'a> {
    pub group: &'a Group,
    pub entries: Vec<EntryView<'a>>,
}

/// Apply criteria to the catalog without touching it
///
/// Hidden breweries are left out before anything else. Breweries with no
/// beers left are dropped only while a filter is active, so an unfiltered
/// listing always shows the whole catalog.
pub fn view<'a>(
    groups: &'a [Group],
    annotations: &'a AnnotationMap,
    hidden: &GroupFlags,
    criteria: &FilterCriteria,
) -> Vec<GroupView<'a>> {
    let query = criteria.query.to_lowercase();
    let active = criteria.is_active();

    groups
        .iter()
        .filter(|group| !hidden.get(group.id))
        .map(|group| {
            let mut entries: Vec<EntryView<'a>> = group
                .beers
                .iter()
                .map(|entry| EntryView {
                    group_id: group.id,
                    entry,
                    annotation: annotations.get(&EntryKey::new(group.id, entry.id)),
                })
                .filter(|view| matches(view, criteria, &query))
                .collect();
            sort_entries(&mut entries, criteria.sort);
            GroupView { group, entries }
        })
        .filter(|group| !active || !group.entries.is_empty())
        .collect()
}

/// Whether a beer passes every criterion; `query` is already lowercased
pub fn matches(view: &EntryView<'_>, criteria: &FilterCriteria, query: &str) -> bool {
    let annotation = view.annotation;

    if !query.is_empty() && !matches_query(view, query) {
        return false;
    }

    if criteria.favorites_only && !view.is_favorite() {
        return false;
    }

    if criteria.has_user_rating && annotation.and_then(|a| a.user_rating.as_ref()).is_none() {
        return false;
    }

    let external = view.entry.untappd_rating.as_ref();
    if criteria.externally_unrated_only {
        external.is_some_and(|r| r.is_literal_zero())
    } else if let Some(min) = criteria.threshold() {
        external.and_then(|r| r.value()).is_some_and(|v| v >= min)
    } else {
        true
    }
}

fn matches_query(view: &EntryView<'_>, query: &str) -> bool {
    let entry = view.entry;
    let annotation = view.annotation;

    let fields = [
        Some(entry.name.as_str()),
        Some(entry.style.as_str()),
        Some(entry.details.as_str()),
        entry.untappd_rating.as_ref().map(|r| r.as_str()),
        annotation.and_then(|a| a.notes.as_deref()),
        annotation.and_then(|a| a.user_rating.as_ref()).map(|r| r.as_str()),
    ];

    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(query))
}

/// Stable sort; beers without a usable rating rank as zero
pub fn sort_entries(entries: &mut [EntryView<'_>], mode: SortMode) {
    match mode {
        SortMode::Default => {}
        SortMode::ExternalRatingDesc => entries.sort_by(|a, b| {
            sort_value(b.entry.untappd_rating.as_ref())
                .total_cmp(&sort_value(a.entry.untappd_rating.as_ref()))
        }),
        SortMode::UserRatingDesc => entries.sort_by(|a, b| {
            user_sort_value(b).total_cmp(&user_sort_value(a))
        }),
    }
}

fn user_sort_value(view: &EntryView<'_>) -> f64 {
    sort_value(view.annotation.and_then(|a| a.user_rating.as_ref()))
}
