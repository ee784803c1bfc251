//! Merging the bundled catalog with user-authored additions and edits.

use super::types::{Group, UserGroup};

/// Merge the bundled breweries with the user's breweries
///
/// Bundled breweries keep their order and come first. A user brewery with
/// a bundled counterpart overrides fields of same-id beers and appends its
/// other beers in authored order; user breweries without a counterpart are
/// appended as they are. Beers only match within the same brewery id, and
/// no bundled beer is ever dropped.
pub fn merge(base: &[Group], user: &[UserGroup]) -> Vec<Group> {
    let mut merged: Vec<Group> = base
        .iter()
        .map(|group| match user.iter().find(|u| u.id == group.id) {
            Some(overlay) => merge_group(group, overlay),
            None => group.clone(),
        })
        .collect();

    merged.extend(
        user.iter()
            .filter(|u| !base.iter().any(|group| group.id == u.id))
            .map(|u| Group {
                id: u.id,
                name: u.name.clone().unwrap_or_default(),
                beers: u.beers.iter().map(|entry| entry.to_entry()).collect(),
            }),
    );

    merged
}

fn merge_group(base: &Group, overlay: &UserGroup) -> Group {
    let mut beers: Vec<_> = base
        .beers
        .iter()
        .map(|entry| match overlay.beers.iter().find(|u| u.id == entry.id) {
            Some(edit) => edit.overlay(entry),
            None => entry.clone(),
        })
        .collect();

    beers.extend(
        overlay
            .beers
            .iter()
            .filter(|u| base.entry(u.id).is_none())
            .map(|u| u.to_entry()),
    );

    Group {
        id: base.id,
        name: overlay.name.clone().unwrap_or_else(|| base.name.clone()),
        beers,
    }
}
