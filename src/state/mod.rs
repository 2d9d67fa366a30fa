pub(crate) mod selection;

use crate::models::{Note, NoteDraft, NotePatch, Notebook};
use crate::storage::StorageBackend;
use crate::store::{Store, StoreError, StoreResult};
use leptos::logging::warn;
use leptos::prelude::*;

/// Reactive app state plus the transitions that keep it in sync with the
/// store and the single-active-notebook invariant.
///
/// All mutations flow store-first: the store applies and persists the change,
/// then the signals are patched with the store's result. The sidebar and the
/// note panel render purely from these signals.
#[derive(Clone)]
pub(crate) struct AppState {
    pub store: Store,

    /// Shared storage handle; the theme setting writes through it too.
    pub backend: StorageBackend,

    /// All notebooks, creation order.
    pub notebooks: RwSignal<Vec<Notebook>>,

    /// Notes of the active notebook, newest-first.
    pub notes: RwSignal<Vec<Note>>,

    /// Exactly one notebook is active whenever any exists.
    pub active_notebook_id: RwSignal<Option<String>>,

    /// Non-blocking error banner (missing entities, never a crash).
    pub ui_error: RwSignal<Option<String>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_backend(StorageBackend::for_session())
    }

    pub fn with_backend(backend: StorageBackend) -> Self {
        let store = Store::new(backend.clone());
        let notebooks = store.notebooks();
        let ids: Vec<String> = notebooks.iter().map(|nb| nb.id.clone()).collect();
        let active = selection::initial_active(&ids);

        let notes = active
            .as_deref()
            .and_then(|id| notebooks.iter().find(|nb| nb.id == id))
            .map(|nb| nb.notes.clone())
            .unwrap_or_default();

        Self {
            store,
            backend,
            notebooks: RwSignal::new(notebooks),
            notes: RwSignal::new(notes),
            active_notebook_id: RwSignal::new(active),
            ui_error: RwSignal::new(None),
        }
    }

    pub fn active_notebook_name(&self) -> Option<String> {
        let active = self.active_notebook_id.get();
        self.notebooks
            .get()
            .into_iter()
            .find(|nb| Some(nb.id.as_str()) == active.as_deref())
            .map(|nb| nb.name)
    }

    fn notebook_ids(&self) -> Vec<String> {
        self.notebooks
            .get_untracked()
            .into_iter()
            .map(|nb| nb.id)
            .collect()
    }

    fn report(&self, err: StoreError) {
        warn!("store operation failed: {err}");
        self.ui_error.set(Some(err.to_string()));
    }

    /// Marks `notebook_id` active and fills the panel with its notes.
    pub fn activate(&self, notebook_id: &str) {
        match self.store.notes(notebook_id) {
            Ok(notes) => {
                self.active_notebook_id.set(Some(notebook_id.to_string()));
                self.notes.set(notes);
            }
            Err(err) => self.report(err),
        }
    }

    /// Creates a notebook; the new notebook becomes active with an empty panel.
    pub fn create_notebook(&self, name: &str) -> Notebook {
        let notebook = self.store.create_notebook(name);

        self.notebooks.update(|list| list.push(notebook.clone()));
        self.active_notebook_id.set(Some(notebook.id.clone()));
        self.notes.set(vec![]);

        notebook
    }

    /// Renames a notebook in place; the active selection is untouched.
    pub fn rename_notebook(&self, notebook_id: &str, name: &str) {
        match self.store.rename_notebook(notebook_id, name) {
            Ok(updated) => self.notebooks.update(|list| {
                if let Some(nb) = list.iter_mut().find(|nb| nb.id == updated.id) {
                    nb.name = updated.name;
                }
            }),
            Err(err) => self.report(err),
        }
    }

    /// Deletes a notebook (cascading to its notes) and hands the selection to
    /// the deleted row's sibling: next if any, else previous, else nothing.
    pub fn delete_notebook(&self, notebook_id: &str) {
        let ids = self.notebook_ids();

        if let Err(err) = self.store.delete_notebook(notebook_id) {
            self.report(err);
            return;
        }

        let sibling = selection::next_active_after_delete(&ids, notebook_id);
        self.notebooks
            .update(|list| list.retain(|nb| nb.id != notebook_id));

        match selection::reconcile(&self.notebook_ids(), sibling.as_deref()) {
            Some(id) => self.activate(&id),
            None => {
                self.active_notebook_id.set(None);
                self.notes.set(vec![]);
            }
        }
    }

    /// Creates a note in the active notebook; the panel shows it first.
    pub fn create_note(&self, draft: NoteDraft) -> StoreResult<Note> {
        let Some(notebook_id) = self.active_notebook_id.get_untracked() else {
            // UI disables note creation without a notebook; nothing to do.
            return Err(StoreError::NotebookNotFound(String::new()));
        };

        match self.store.create_note(&notebook_id, draft) {
            Ok(note) => {
                self.notes.update(|list| list.insert(0, note.clone()));
                self.notebooks.update(|list| {
                    if let Some(nb) = list.iter_mut().find(|nb| nb.id == notebook_id) {
                        nb.notes.insert(0, note.clone());
                    }
                });
                Ok(note)
            }
            Err(err) => {
                self.report(err.clone());
                Err(err)
            }
        }
    }

    /// Patches a note's title/text; ordering and selection are untouched.
    pub fn update_note(&self, note_id: &str, patch: NotePatch) {
        match self.store.update_note(note_id, patch) {
            Ok(updated) => {
                self.notes.update(|list| {
                    if let Some(n) = list.iter_mut().find(|n| n.id == updated.id) {
                        *n = updated.clone();
                    }
                });
                self.notebooks.update(|list| {
                    if let Some(nb) = list.iter_mut().find(|nb| nb.id == updated.notebook_id) {
                        if let Some(n) = nb.notes.iter_mut().find(|n| n.id == updated.id) {
                            *n = updated.clone();
                        }
                    }
                });
            }
            Err(err) => self.report(err),
        }
    }

    /// Removes a note from the active notebook's panel.
    pub fn delete_note(&self, notebook_id: &str, note_id: &str) {
        match self.store.delete_note(notebook_id, note_id) {
            Ok(remaining) => {
                self.notes.set(remaining.clone());
                self.notebooks.update(|list| {
                    if let Some(nb) = list.iter_mut().find(|nb| nb.id == notebook_id) {
                        nb.notes = remaining.clone();
                    }
                });
            }
            Err(err) => self.report(err),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageBackend;

    fn fresh_state() -> AppState {
        AppState::with_backend(StorageBackend::memory())
    }

    fn draft(title: &str) -> NoteDraft {
        NoteDraft {
            title: title.to_string(),
            text: String::new(),
        }
    }

    #[test]
    fn test_new_notebook_becomes_active_with_empty_panel() {
        let state = fresh_state();
        assert!(state.active_notebook_id.get_untracked().is_none());

        let nb = state.create_notebook("Work");
        assert_eq!(state.active_notebook_id.get_untracked(), Some(nb.id));
        assert!(state.notes.get_untracked().is_empty());
    }

    #[test]
    fn test_delete_active_with_one_sibling_repopulates_panel() {
        let state = fresh_state();
        let n1 = state.create_notebook("N1");
        let n2 = state.create_notebook("N2");
        state.create_note(draft("in n2")).expect("n2 active");

        // Make N1 active, then delete it: N2 must take over and the panel
        // must show N2's notes.
        state.activate(&n1.id);
        state.delete_notebook(&n1.id);

        assert_eq!(state.active_notebook_id.get_untracked(), Some(n2.id));
        let titles: Vec<String> = state
            .notes
            .get_untracked()
            .into_iter()
            .map(|n| n.title)
            .collect();
        assert_eq!(titles, vec!["in n2"]);
    }

    #[test]
    fn test_delete_last_notebook_clears_selection_and_panel() {
        let state = fresh_state();
        let nb = state.create_notebook("only");
        state.create_note(draft("n")).expect("active");

        state.delete_notebook(&nb.id);

        assert!(state.active_notebook_id.get_untracked().is_none());
        assert!(state.notes.get_untracked().is_empty());
        assert!(state.notebooks.get_untracked().is_empty());
    }

    #[test]
    fn test_delete_inactive_notebook_activates_its_sibling() {
        let state = fresh_state();
        let a = state.create_notebook("A");
        let b = state.create_notebook("B");
        let c = state.create_notebook("C");
        state.activate(&c.id);

        // Deleting A hands the selection to A's next sibling, not to the
        // notebook that happened to be active.
        state.delete_notebook(&a.id);

        assert_eq!(state.active_notebook_id.get_untracked(), Some(b.id));
        assert_eq!(state.notebooks.get_untracked().len(), 2);
    }

    #[test]
    fn test_cloned_state_handles_run_repeatedly() {
        // Event handlers hold their own clone of the state and fire any
        // number of times; every clone must see every mutation.
        let state = fresh_state();
        let create = {
            let state = state.clone();
            move |name: &str| state.create_notebook(name)
        };
        let delete = {
            let state = state.clone();
            move |id: &str| state.delete_notebook(id)
        };

        let a = create("a");
        let b = create("b");
        delete(&a.id);
        delete(&b.id);

        assert!(state.notebooks.get_untracked().is_empty());
        assert!(state.active_notebook_id.get_untracked().is_none());
    }

    #[test]
    fn test_rename_preserves_active_selection() {
        let state = fresh_state();
        let nb = state.create_notebook("old");
        state.rename_notebook(&nb.id, "new");

        assert_eq!(state.active_notebook_id.get_untracked(), Some(nb.id.clone()));
        assert_eq!(
            state.notebooks.get_untracked()[0].name,
            "new".to_string()
        );
    }

    #[test]
    fn test_note_operations_never_change_active_notebook() {
        let state = fresh_state();
        state.create_notebook("a");
        let nb = state.create_notebook("b");

        let note = state.create_note(draft("t")).expect("b active");
        state.update_note(
            &note.id,
            NotePatch {
                title: Some("t2".to_string()),
                text: None,
            },
        );
        state.delete_note(&nb.id, &note.id);

        assert_eq!(state.active_notebook_id.get_untracked(), Some(nb.id));
        assert!(state.notes.get_untracked().is_empty());
    }

    #[test]
    fn test_missing_entity_surfaces_as_banner_not_panic() {
        let state = fresh_state();
        state.create_notebook("a");

        state.delete_notebook("ghost");
        assert!(state
            .ui_error
            .get_untracked()
            .is_some_and(|e| e.contains("ghost")));

        // Selection survives the failed operation.
        assert!(state.active_notebook_id.get_untracked().is_some());
    }

    #[test]
    fn test_state_loads_existing_document_with_first_notebook_active() {
        let backend = StorageBackend::memory();
        let seed = Store::new(backend.clone());
        let first = seed.create_notebook("first");
        seed.create_notebook("second");
        seed.create_note(&first.id, draft("hello")).unwrap();

        let state = AppState::with_backend(backend);
        assert_eq!(state.active_notebook_id.get_untracked(), Some(first.id));
        assert_eq!(state.notes.get_untracked().len(), 1);
        assert_eq!(state.notebooks.get_untracked().len(), 2);
    }
}
