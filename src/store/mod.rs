use crate::models::{Document, Note, NoteDraft, NotePatch, Notebook};
use crate::storage::{StorageBackend, DB_KEY};
use crate::util::now_ms;
use leptos::logging::warn;
use std::sync::{Arc, Mutex};

/// A store operation referenced an entity missing from the document.
///
/// Corrupt persisted data is not an error: it self-heals to an empty
/// document at load time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum StoreError {
    NotebookNotFound(String),
    NoteNotFound(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotebookNotFound(id) => write!(f, "Notebook not found: {id}"),
            Self::NoteNotFound(id) => write!(f, "Note not found: {id}"),
        }
    }
}

pub(crate) type StoreResult<T> = Result<T, StoreError>;

/// Timestamp-derived id factory.
///
/// Ids are epoch milliseconds; same-millisecond calls bump monotonically past
/// the last issued value, so a sequence of creates never collides.
#[derive(Clone)]
pub(crate) struct IdGenerator {
    last: Arc<Mutex<i64>>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            last: Arc::new(Mutex::new(0)),
        }
    }

    pub fn next(&self) -> String {
        let now = now_ms();
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let id = now.max(*last + 1);
        *last = id;
        id.to_string()
    }
}

/// Sole authority over the persisted document.
///
/// Every operation re-reads the full document before mutating (storage may
/// have changed out-of-band) and re-writes it afterwards. Documents are small
/// and operations user-paced, so wholesale replacement is fine.
#[derive(Clone)]
pub(crate) struct Store {
    backend: StorageBackend,
    ids: IdGenerator,
}

impl Store {
    pub fn new(backend: StorageBackend) -> Self {
        let store = Self {
            backend,
            ids: IdGenerator::new(),
        };
        // Ensure storage holds a well-formed document from the start.
        store.load();
        store
    }

    fn load(&self) -> Document {
        let Some(json) = self.backend.read(DB_KEY) else {
            let doc = Document::default();
            self.persist(&doc);
            return doc;
        };

        match serde_json::from_str::<Document>(&json) {
            Ok(doc) => doc,
            Err(err) => {
                // Corrupt data is discarded, not salvaged.
                warn!("resetting malformed note database: {err}");
                let doc = Document::default();
                self.persist(&doc);
                doc
            }
        }
    }

    fn persist(&self, doc: &Document) {
        self.backend.save_json(DB_KEY, doc);
    }

    /// Appends a new, empty notebook and returns it.
    pub fn create_notebook(&self, name: &str) -> Notebook {
        let mut doc = self.load();

        let notebook = Notebook {
            id: self.ids.next(),
            name: name.to_string(),
            notes: vec![],
        };

        doc.notebooks.push(notebook.clone());
        self.persist(&doc);

        notebook
    }

    /// All notebooks in creation order, nested notes included.
    pub fn notebooks(&self) -> Vec<Notebook> {
        self.load().notebooks
    }

    /// Notes of one notebook, newest-first.
    pub fn notes(&self, notebook_id: &str) -> StoreResult<Vec<Note>> {
        let doc = self.load();
        let notebook = find_notebook(&doc, notebook_id)?;
        Ok(notebook.notes.clone())
    }

    /// Prepends a new note to the notebook and returns it.
    pub fn create_note(&self, notebook_id: &str, draft: NoteDraft) -> StoreResult<Note> {
        let mut doc = self.load();
        let notebook = find_notebook_mut(&mut doc, notebook_id)?;

        let note = Note {
            id: self.ids.next(),
            notebook_id: notebook_id.to_string(),
            title: draft.title,
            text: draft.text,
            posted_on: now_ms(),
        };

        notebook.notes.insert(0, note.clone());
        self.persist(&doc);

        Ok(note)
    }

    /// Sets a notebook's name and returns the updated notebook.
    pub fn rename_notebook(&self, notebook_id: &str, name: &str) -> StoreResult<Notebook> {
        let mut doc = self.load();
        let notebook = find_notebook_mut(&mut doc, notebook_id)?;

        notebook.name = name.to_string();
        let updated = notebook.clone();
        self.persist(&doc);

        Ok(updated)
    }

    /// Applies a title/text patch to a note, located across all notebooks.
    /// `id`, `notebookId` and `postedOn` are never touched.
    pub fn update_note(&self, note_id: &str, patch: NotePatch) -> StoreResult<Note> {
        let mut doc = self.load();

        let note = doc
            .notebooks
            .iter_mut()
            .flat_map(|nb| nb.notes.iter_mut())
            .find(|n| n.id == note_id)
            .ok_or_else(|| StoreError::NoteNotFound(note_id.to_string()))?;

        if let Some(title) = patch.title {
            note.title = title;
        }
        if let Some(text) = patch.text {
            note.text = text;
        }

        let updated = note.clone();
        self.persist(&doc);

        Ok(updated)
    }

    /// Removes a notebook and, with it, all of its notes.
    pub fn delete_notebook(&self, notebook_id: &str) -> StoreResult<()> {
        let mut doc = self.load();

        let index = doc
            .notebooks
            .iter()
            .position(|nb| nb.id == notebook_id)
            .ok_or_else(|| StoreError::NotebookNotFound(notebook_id.to_string()))?;

        doc.notebooks.remove(index);
        self.persist(&doc);

        Ok(())
    }

    /// Removes one note and returns the notebook's remaining notes.
    pub fn delete_note(&self, notebook_id: &str, note_id: &str) -> StoreResult<Vec<Note>> {
        let mut doc = self.load();
        let notebook = find_notebook_mut(&mut doc, notebook_id)?;

        let index = notebook
            .notes
            .iter()
            .position(|n| n.id == note_id)
            .ok_or_else(|| StoreError::NoteNotFound(note_id.to_string()))?;

        notebook.notes.remove(index);
        let remaining = notebook.notes.clone();
        self.persist(&doc);

        Ok(remaining)
    }
}

fn find_notebook<'a>(doc: &'a Document, notebook_id: &str) -> StoreResult<&'a Notebook> {
    doc.notebooks
        .iter()
        .find(|nb| nb.id == notebook_id)
        .ok_or_else(|| StoreError::NotebookNotFound(notebook_id.to_string()))
}

fn find_notebook_mut<'a>(doc: &'a mut Document, notebook_id: &str) -> StoreResult<&'a mut Notebook> {
    doc.notebooks
        .iter_mut()
        .find(|nb| nb.id == notebook_id)
        .ok_or_else(|| StoreError::NotebookNotFound(notebook_id.to_string()))
}
