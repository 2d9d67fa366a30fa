use serde::{Deserialize, Serialize};

/// The single persisted root. Replaced wholesale on every write.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub(crate) struct Document {
    /// Older persisted blobs may lack the key entirely; treat that as empty.
    #[serde(default)]
    pub notebooks: Vec<Notebook>,
}

/// A named container of notes. Creation order is display order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct Notebook {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub notes: Vec<Note>,
}

/// A title/text pair owned by exactly one notebook.
///
/// Stored newest-first inside its notebook; storage order is display order.
/// Field names stay camelCase on the wire (`notebookId`, `postedOn`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Note {
    pub id: String,
    /// Back-reference to the owning notebook, kept for lookup convenience only.
    pub notebook_id: String,
    pub title: String,
    pub text: String,
    /// Epoch milliseconds, set once at creation and never updated.
    pub posted_on: i64,
}

/// Fields the note modal submits when creating a note.
#[derive(Clone, Debug, Default)]
pub(crate) struct NoteDraft {
    pub title: String,
    pub text: String,
}

/// Partial update for a note. Only `title` and `text` are updatable;
/// `id`/`notebookId`/`postedOn` cannot be touched by construction.
#[derive(Clone, Debug, Default)]
pub(crate) struct NotePatch {
    pub title: Option<String>,
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        Document {
            notebooks: vec![Notebook {
                id: "1700000000000".to_string(),
                name: "Work".to_string(),
                notes: vec![Note {
                    id: "1700000000001".to_string(),
                    notebook_id: "1700000000000".to_string(),
                    title: "A".to_string(),
                    text: "B".to_string(),
                    posted_on: 1_700_000_000_001,
                }],
            }],
        }
    }

    #[test]
    fn test_document_roundtrip_is_field_for_field_identical() {
        let doc = sample_document();
        let json = serde_json::to_string(&doc).expect("should serialize");
        let back: Document = serde_json::from_str(&json).expect("should parse");
        assert_eq!(back, doc);
    }

    #[test]
    fn test_note_wire_shape_is_camel_case() {
        let doc = sample_document();
        let v = serde_json::to_value(&doc).expect("should serialize");
        let note = &v["notebooks"][0]["notes"][0];
        assert_eq!(note["notebookId"], "1700000000000");
        assert_eq!(note["postedOn"], 1_700_000_000_001i64);
        assert!(note.get("notebook_id").is_none());
        assert!(note.get("posted_on").is_none());
    }

    #[test]
    fn test_missing_notebooks_key_parses_as_empty() {
        let doc: Document = serde_json::from_str("{}").expect("should parse");
        assert!(doc.notebooks.is_empty());
    }

    #[test]
    fn test_notebook_without_notes_key_parses_as_empty() {
        let nb: Notebook =
            serde_json::from_str(r#"{"id":"1","name":"Inbox"}"#).expect("should parse");
        assert!(nb.notes.is_empty());
    }
}
