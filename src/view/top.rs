//! Ranked top lists across all visible breweries.

use crate::catalog::{Entry, EntryKey, Group, Rating};
use crate::state::annotations::{Annotation, AnnotationMap};
use crate::state::visibility::GroupFlags;

/// Which rating a top list ranks by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopKind {
    External,
    User,
}

/// A beer in a top list, with its brewery attached
#[derive(Debug, Clone, Copy)]
pub struct RankedEntry<'a> {
    pub group_id: u64,
    pub group_name: &'a str,
    pub entry: &'a Entry,
    pub annotation: Option<&'a Annotation>,
}

impl<'a> RankedEntry<'a> {
    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.group_id, self.entry.id)
    }

    /// The rating this entry is ranked by
    pub fn rating(&self, kind: TopKind) -> Option<&'a Rating> {
        match kind {
            TopKind::External => self.entry.untappd_rating.as_ref(),
            TopKind::User => self.annotation.and_then(|a| a.user_rating.as_ref()),
        }
    }
}

/// Every ranked beer, best first; ties keep catalog order
pub fn ranked<'a>(
    groups: &'a [Group],
    annotations: &'a AnnotationMap,
    hidden: &GroupFlags,
    kind: TopKind,
) -> Vec<RankedEntry<'a>> {
    let mut entries: Vec<RankedEntry<'a>> = groups
        .iter()
        .filter(|group| !hidden.get(group.id))
        .flat_map(|group| {
            group.beers.iter().map(move |entry| RankedEntry {
                group_id: group.id,
                group_name: &group.name,
                entry,
                annotation: annotations.get(&EntryKey::new(group.id, entry.id)),
            })
        })
        .filter(|ranked| match (kind, ranked.rating(kind)) {
            (TopKind::External, Some(_)) => true,
            (TopKind::User, Some(rating)) => rating.value().is_some(),
            (_, None) => false,
        })
        .collect();

    entries.sort_by(|a, b| sort_key(b, kind).total_cmp(&sort_key(a, kind)));
    entries
}

fn sort_key(entry: &RankedEntry<'_>, kind: TopKind) -> f64 {
    entry.rating(kind).map(Rating::sort_value).unwrap_or(0.0)
}

/// The `n` beers with the highest Untappd rating
pub fn top_by_external<'a>(
    groups: &'a [Group],
    annotations: &'a AnnotationMap,
    hidden: &GroupFlags,
    n: usize,
) -> Vec<RankedEntry<'a>> {
    let mut entries = ranked(groups, annotations, hidden, TopKind::External);
    entries.truncate(n);
    entries
}

/// The `n` beers the user rated highest
pub fn top_by_user<'a>(
    groups: &'a [Group],
    annotations: &'a AnnotationMap,
    hidden: &GroupFlags,
    n: usize,
) -> Vec<RankedEntry<'a>> {
    let mut entries = ranked(groups, annotations, hidden, TopKind::User);
    entries.truncate(n);
    entries
}

/// A top list that grows a page at a time
///
/// Only the current length is kept; every read ranks the catalog again and
/// slices, which is cheap at catalog sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopList {
    kind: TopKind,
    limit: usize,
    page_size: usize,
}

impl TopList {
    pub fn new(kind: TopKind, page_size: usize) -> Self {
        Self {
            kind,
            limit: page_size,
            page_size,
        }
    }

    pub fn kind(&self) -> TopKind {
        self.kind
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Extend the list by one page
    pub fn show_more(&mut self) {
        self.limit += self.page_size;
    }

    pub fn entries<'a>(
        &self,
        groups: &'a [Group],
        annotations: &'a AnnotationMap,
        hidden: &GroupFlags,
    ) -> Vec<RankedEntry<'a>> {
        let mut entries = ranked(groups, annotations, hidden, self.kind);
        entries.truncate(self.limit);
        entries
    }

    /// Whether `show_more` would reveal anything
    pub fn has_more(&self, groups: &[Group], annotations: &AnnotationMap, hidden: &GroupFlags) -> bool {
        ranked(groups, annotations, hidden, self.kind).len() > self.limit
    }
}
