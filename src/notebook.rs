//! The notebook: one user's view of the catalog and everything they saved.
//!
//! [`Notebook`] is the context object every command works through. It owns
//! the bundled catalog, the user's catalog additions, their annotations,
//! hidden breweries and session settings, and keeps the merged catalog in
//! step with the user's additions.

use crate::catalog::{merge, BaseCatalog, Entry, EntryKey, EntryPatch, Group, Rating, UserCatalog};
use crate::config::Settings;
use crate::export::{self, ExportFormat};
use crate::io::BeerNoterPaths;
use crate::state::{Annotation, AnnotationStore, FileStore, HiddenGroups, KeyValueStore, SessionState};
use crate::view::{self, FilterCriteria, GroupView, RankedEntry, TopKind, TopList};
use crate::{BeerNoterError, Result};
use chrono::Duration;
use tracing::{debug, info};

/// Asks the user to confirm a destructive action
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirms everything, for `--yes`
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

pub struct Notebook {
    base: BaseCatalog,
    user: UserCatalog,
    merged: Vec<Group>,
    annotations: AnnotationStore,
    hidden: HiddenGroups,
    session: SessionState,
}

impl Notebook {
    /// Open a notebook over explicit stores
    ///
    /// `durable` is shared by annotations, user breweries and hidden
    /// breweries; each keeps its own key.
    pub fn open<D, S>(base: BaseCatalog, durable: D, session: S, session_idle: Duration) -> Self
    where
        D: KeyValueStore + Clone + 'static,
        S: KeyValueStore + 'static,
    {
        let user = UserCatalog::load(Box::new(durable.clone()));
        let annotations = AnnotationStore::load(Box::new(durable.clone()));
        let hidden = HiddenGroups::load(Box::new(durable));
        let session = SessionState::open(Box::new(session), session_idle);
        let merged = merge(base.groups(), user.groups());

        Self {
            base,
            user,
            merged,
            annotations,
            hidden,
            session,
        }
    }

    /// Open the notebook described by the resolved settings
    pub fn from_settings(settings: &Settings, paths: &BeerNoterPaths) -> Result<Self> {
        let paths = match &settings.data_dir {
            Some(dir) => BeerNoterPaths::for_dir(dir),
            None => paths.clone(),
        };
        let base = match &settings.catalog {
            Some(path) => BaseCatalog::from_path(path)?,
            None => BaseCatalog::bundled()?,
        };
        debug!(data_dir = %paths.data_dir.display(), "Opening notebook");

        Ok(Self::open(
            base,
            FileStore::new(&paths.data_dir),
            FileStore::new(&paths.session_dir),
            Duration::minutes(settings.session_idle_minutes),
        ))
    }

    /// The merged catalog, hidden breweries included
    pub fn groups(&self) -> &[Group] {
        &self.merged
    }

    pub fn group(&self, group_id: u64) -> Result<&Group> {
        self.merged
            .iter()
            .find(|g| g.id == group_id)
            .ok_or(BeerNoterError::UnknownGroup(group_id))
    }

    pub fn entry(&self, key: EntryKey) -> Result<(&Group, &Entry)> {
        let group = self.group(key.group_id)?;
        let entry = group.entry(key.entry_id).ok_or(BeerNoterError::UnknownEntry {
            group_id: key.group_id,
            entry_id: key.entry_id,
        })?;
        Ok((group, entry))
    }

    pub fn annotation(&self, key: EntryKey) -> Option<&Annotation> {
        self.annotations.get(key)
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    /// Flip the favorite flag, keeping rating and notes; returns the new flag
    pub fn toggle_favorite(&mut self, key: EntryKey) -> Result<bool> {
        let mut annotation = self.editable_annotation(key)?;
        annotation.favorite = !annotation.favorite;
        let favorite = annotation.favorite;
        self.annotations.set(key, annotation);
        Ok(favorite)
    }

    /// Set the user's rating from typed input; blank input clears it
    pub fn set_user_rating(&mut self, key: EntryKey, input: &str) -> Result<()> {
        let mut annotation = self.editable_annotation(key)?;
        annotation.user_rating = Rating::from_user_input(input);
        self.annotations.set(key, annotation);
        Ok(())
    }

    /// Set the user's notes; blank notes clear them
    pub fn set_notes(&mut self, key: EntryKey, notes: &str) -> Result<()> {
        let mut annotation = self.editable_annotation(key)?;
        annotation.notes = Some(notes.to_string()).filter(|n| !n.trim().is_empty());
        self.annotations.set(key, annotation);
        Ok(())
    }

    /// Reset rating, notes and favorite; the record itself is kept
    pub fn clear_annotation(&mut self, key: EntryKey) -> Result<()> {
        self.entry(key)?;
        self.annotations.set(key, Annotation::default());
        Ok(())
    }

    fn editable_annotation(&self, key: EntryKey) -> Result<Annotation> {
        self.entry(key)?;
        Ok(self.annotations.get(key).cloned().unwrap_or_default())
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.session.criteria()
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.session.set_criteria(criteria);
    }

    pub fn reset_criteria(&mut self) {
        self.session.set_criteria(FilterCriteria::default());
    }

    /// The catalog under the session's criteria
    pub fn view(&self) -> Vec<GroupView<'_>> {
        self.view_with(self.session.criteria())
    }

    pub fn view_with(&self, criteria: &FilterCriteria) -> Vec<GroupView<'_>> {
        view::view(
            &self.merged,
            self.annotations.all(),
            self.hidden.flags(),
            criteria,
        )
    }

    /// Beers are listed for an expanded brewery, or for all while filtering
    pub fn shows_entries(&self, group_id: u64) -> bool {
        self.session.criteria().is_active() || self.session.expanded().get(group_id)
    }

    pub fn toggle_expanded(&mut self, group_id: u64) -> Result<bool> {
        self.group(group_id)?;
        Ok(self.session.toggle_expanded(group_id))
    }

    /// Hide a brewery after confirmation; returns whether it was hidden
    pub fn hide_group(&mut self, group_id: u64, confirm: &dyn Confirm) -> Result<bool> {
        let name = self.group(group_id)?.name.clone();
        if !confirm.confirm(&format!("Hide {}?", name)) {
            return Ok(false);
        }
        self.hidden.set_hidden(group_id, true);
        info!(group_id, "Hid brewery");
        Ok(true)
    }

    pub fn unhide_group(&mut self, group_id: u64) -> Result<()> {
        self.group(group_id)?;
        self.hidden.set_hidden(group_id, false);
        Ok(())
    }

    pub fn hidden_groups(&self) -> Vec<&Group> {
        self.merged
            .iter()
            .filter(|g| self.hidden.is_hidden(g.id))
            .collect()
    }

    pub fn add_group(&mut self, name: &str) -> u64 {
        let id = self.user.add_group(name);
        self.remerge();
        id
    }

    pub fn rename_group(&mut self, group_id: u64, name: &str) -> Result<()> {
        self.user.rename_group(&self.base, group_id, name)?;
        self.remerge();
        Ok(())
    }

    pub fn add_entry(&mut self, group_id: u64, draft: &EntryPatch) -> Result<u64> {
        let id = self.user.add_entry(&self.base, group_id, draft)?;
        self.remerge();
        Ok(id)
    }

    pub fn edit_entry(&mut self, key: EntryKey, patch: &EntryPatch) -> Result<()> {
        self.user
            .edit_entry(&self.base, key.group_id, key.entry_id, patch)?;
        self.remerge();
        Ok(())
    }

    /// Remove a user-authored beer after confirmation; returns whether it was removed
    pub fn remove_entry(&mut self, key: EntryKey, confirm: &dyn Confirm) -> Result<bool> {
        let (_, entry) = self.entry(key)?;
        if !crate::catalog::is_user_authored(entry.id) {
            return Err(BeerNoterError::NotUserAuthored {
                group_id: key.group_id,
                entry_id: key.entry_id,
            });
        }
        if !confirm.confirm(&format!("Remove {}?", entry.name)) {
            return Ok(false);
        }
        self.user.remove_entry(key.group_id, key.entry_id)?;
        self.remerge();
        Ok(true)
    }

    pub fn top(&self, kind: TopKind, n: usize) -> Vec<RankedEntry<'_>> {
        let annotations = self.annotations.all();
        let hidden = self.hidden.flags();
        match kind {
            TopKind::External => view::top_by_external(&self.merged, annotations, hidden, n),
            TopKind::User => view::top_by_user(&self.merged, annotations, hidden, n),
        }
    }

    /// The beers a paged top list currently shows, and whether more remain
    pub fn top_list(&self, list: &TopList) -> (Vec<RankedEntry<'_>>, bool) {
        let annotations = self.annotations.all();
        let hidden = self.hidden.flags();
        (
            list.entries(&self.merged, annotations, hidden),
            list.has_more(&self.merged, annotations, hidden),
        )
    }

    /// Render an export, or `None` when there is nothing to export
    pub fn export(&self, format: ExportFormat) -> Option<String> {
        let annotations = self.annotations.all();
        if !export::has_exportable_content(annotations) {
            return None;
        }
        Some(export::render(&self.merged, annotations, format))
    }

    fn remerge(&mut self) {
        self.merged = merge(self.base.groups(), self.user.groups());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStore;
    use pretty_assertions::assert_eq;

    struct Decline;

    impl Confirm for Decline {
        fn confirm(&self, _prompt: &str) -> bool {
            false
        }
    }

    fn notebook() -> Notebook {
        Notebook::open(
            BaseCatalog::bundled().unwrap(),
            MemoryStore::new(),
            MemoryStore::new(),
            Duration::minutes(60),
        )
    }

    const TESTI: EntryKey = EntryKey {
        group_id: 1,
        entry_id: 7155171,
    };

    #[test]
    fn test_favorite_toggle_keeps_other_fields() {
        let mut notebook = notebook();
        notebook.set_user_rating(TESTI, "4,5").unwrap();
        notebook.set_notes(TESTI, "nice").unwrap();

        assert!(notebook.toggle_favorite(TESTI).unwrap());
        assert!(!notebook.toggle_favorite(TESTI).unwrap());

        let annotation = notebook.annotation(TESTI).unwrap();
        assert!(!annotation.favorite);
        assert_eq!(annotation.user_rating.as_ref().unwrap().as_str(), "4.5");
        assert_eq!(annotation.notes(), Some("nice"));
    }

    #[test]
    fn test_annotating_unknown_entry_fails() {
        let mut notebook = notebook();
        let result = notebook.toggle_favorite(EntryKey::new(1, 1));
        assert!(matches!(result, Err(BeerNoterError::UnknownEntry { .. })));
        assert!(notebook.annotations().is_empty());
    }

    #[test]
    fn test_clear_keeps_record() {
        let mut notebook = notebook();
        notebook.set_notes(TESTI, "nice").unwrap();
        notebook.clear_annotation(TESTI).unwrap();

        assert_eq!(notebook.annotation(TESTI), Some(&Annotation::default()));
    }

    #[test]
    fn test_declined_hide_changes_nothing() {
        let mut notebook = notebook();
        assert!(!notebook.hide_group(1, &Decline).unwrap());
        assert!(notebook.hidden_groups().is_empty());

        assert!(notebook.hide_group(1, &AssumeYes).unwrap());
        assert_eq!(notebook.hidden_groups().len(), 1);
        assert!(notebook.view().iter().all(|g| g.group.id != 1));

        notebook.unhide_group(1).unwrap();
        assert!(notebook.hidden_groups().is_empty());
    }

    #[test]
    fn test_added_entry_is_listed_and_removable() {
        let mut notebook = notebook();
        let draft = EntryPatch {
            name: Some("Kotikalja".to_string()),
            style: Some("Sahti".to_string()),
            details: None,
        };
        let id = notebook.add_entry(2, &draft).unwrap();
        let key = EntryKey::new(2, id);

        assert_eq!(notebook.entry(key).unwrap().1.name, "Kotikalja");

        assert!(!notebook.remove_entry(key, &Decline).unwrap());
        assert!(notebook.entry(key).is_ok());

        assert!(notebook.remove_entry(key, &AssumeYes).unwrap());
        assert!(notebook.entry(key).is_err());
    }

    #[test]
    fn test_new_records_start_clean_after_removal() {
        let mut notebook = notebook();
        let draft = EntryPatch {
            name: Some("Awful".to_string()),
            ..Default::default()
        };
        let awful = EntryKey::new(1, notebook.add_entry(1, &draft).unwrap());
        notebook.set_user_rating(awful, "1").unwrap();
        notebook.set_notes(awful, "awful").unwrap();
        notebook.remove_entry(awful, &AssumeYes).unwrap();

        let fresh = EntryKey::new(1, notebook.add_entry(1, &draft).unwrap());
        assert_ne!(fresh, awful);
        assert_eq!(notebook.annotation(fresh), None);

        let garage = notebook.add_group("Garage");
        let beer = notebook.add_entry(garage, &draft).unwrap();
        notebook.hide_group(garage, &AssumeYes).unwrap();
        notebook
            .remove_entry(EntryKey::new(garage, beer), &AssumeYes)
            .unwrap();

        let shed = notebook.add_group("Shed");
        assert_ne!(shed, garage);
        assert!(notebook.view().iter().any(|g| g.group.id == shed));
    }

    #[test]
    fn test_bundled_entry_removal_refused() {
        let mut notebook = notebook();
        let result = notebook.remove_entry(TESTI, &AssumeYes);
        assert!(matches!(result, Err(BeerNoterError::NotUserAuthored { .. })));
    }

    #[test]
    fn test_entries_shown_when_expanded_or_filtering() {
        let mut notebook = notebook();
        assert!(!notebook.shows_entries(1));

        notebook.toggle_expanded(1).unwrap();
        assert!(notebook.shows_entries(1));
        assert!(!notebook.shows_entries(2));

        notebook.set_criteria(FilterCriteria {
            favorites_only: true,
            ..Default::default()
        });
        assert!(notebook.shows_entries(2));
    }

    #[test]
    fn test_export_needs_content() {
        let mut notebook = notebook();
        assert!(notebook.export(ExportFormat::Txt).is_none());

        notebook.toggle_favorite(TESTI).unwrap();
        assert!(notebook.export(ExportFormat::Txt).is_none());

        notebook.set_user_rating(TESTI, "4.5").unwrap();
        let content = notebook.export(ExportFormat::Txt).unwrap();
        assert!(content.contains("Testi – 4.5"));
    }

    #[test]
    fn test_top_list_pages() {
        let notebook = notebook();
        let mut list = TopList::new(TopKind::External, 2);

        let (entries, more) = notebook.top_list(&list);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry.name, "Tiramisu Imperial Stout");
        assert!(more);

        for _ in 0..3 {
            list.show_more();
        }
        let (entries, more) = notebook.top_list(&list);
        assert_eq!(entries.len(), 8);
        assert!(!more);
    }
}
