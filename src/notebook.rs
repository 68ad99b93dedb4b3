//! In-memory note collection with the create/save/delete operations the
//! interactive surface performs.
//!
//! The collection is loaded once, mutated in place, and written back in full
//! by `persist`. There are no partial writes. If `persist` fails, the stored
//! collection keeps its previous value while this `Notebook` already holds
//! the new state.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::entity::{extract_domain, now_timestamp, Note, NoteKind};
use crate::error::{KuviyamError, Result};
use crate::search::{filter_notes, NoteFilter};
use crate::storage::{load_notes, save_notes, KeyValueStore};
use crate::tags::extract_tags;

#[derive(Debug, Clone, Default)]
pub struct Notebook {
    notes: Vec<Note>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    /// Load the stored collection.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(Self::from_notes(load_notes(store)?))
    }

    /// Write the whole collection back, replacing what is stored.
    pub fn persist<S: KeyValueStore + ?Sized>(&self, store: &S) -> Result<()> {
        save_notes(store, &self.notes)
    }

    /// All notes, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Resolve an exact id, or a prefix that matches exactly one note.
    pub fn find(&self, id_or_prefix: &str) -> Result<&Note> {
        if let Some(note) = self.get(id_or_prefix) {
            return Ok(note);
        }

        let mut matches = self
            .notes
            .iter()
            .filter(|n| !id_or_prefix.is_empty() && n.id.starts_with(id_or_prefix));
        match (matches.next(), matches.next()) {
            (Some(note), None) => Ok(note),
            (Some(_), Some(_)) => Err(KuviyamError::AmbiguousId(id_or_prefix.to_string())),
            _ => Err(KuviyamError::NoteNotFound(id_or_prefix.to_string())),
        }
    }

    /// Start a new dump page at the front of the collection.
    pub fn create_dump(&mut self) -> &Note {
        self.insert(Note::new_dump())
    }

    /// Start a new hook for the page at `url`.
    pub fn create_hook(&mut self, url: &str) -> &Note {
        self.insert(Note::new_hook(url))
    }

    fn insert(&mut self, note: Note) -> &Note {
        debug!(id = %note.id, kind = %note.kind, "created note");
        self.notes.insert(0, note);
        &self.notes[0]
    }

    /// Apply an edit: set title and content, recompute tags, bump `updatedAt`.
    ///
    /// A blank title becomes the placeholder for the note's kind.
    pub fn save_note(&mut self, id: &str, title: &str, content: &str) -> Result<&Note> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| KuviyamError::NoteNotFound(id.to_string()))?;

        let title = title.trim();
        note.title = if title.is_empty() {
            note.kind.placeholder_title().to_string()
        } else {
            title.to_string()
        };
        note.content = content.to_string();
        note.tags = extract_tags(&note.content);
        note.updated_at = now_timestamp();

        debug!(id, tags = note.tags.len(), "saved note");
        Ok(&*note)
    }

    /// Remove a note, returning it.
    pub fn delete(&mut self, id: &str) -> Result<Note> {
        let index = self
            .notes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| KuviyamError::NoteNotFound(id.to_string()))?;
        Ok(self.notes.remove(index))
    }

    /// Remove every note.
    pub fn clear(&mut self) {
        info!(count = self.notes.len(), "clearing all notes");
        self.notes.clear();
    }

    /// Notes of one kind (or all) passing `filter`.
    pub fn filtered(&self, kind: Option<NoteKind>, filter: &NoteFilter) -> Vec<&Note> {
        filter_notes(
            self.notes.iter().filter(|n| kind.map_or(true, |k| n.kind == k)),
            filter,
        )
    }

    /// Dump notes passing `filter`.
    pub fn dumps(&self, filter: &NoteFilter) -> Vec<&Note> {
        self.filtered(Some(NoteKind::Dump), filter)
    }

    /// Hooks belonging to the page at `url` passing `filter`.
    ///
    /// A hook belongs to the page if it was created on the same host, or on
    /// exactly the same URL.
    pub fn hooks_for_site(&self, url: &str, filter: &NoteFilter) -> Vec<&Note> {
        let domain = extract_domain(url);
        let on_site = self.notes.iter().filter(|n| {
            n.is_hook()
                && (n.domain.as_deref() == Some(domain.as_str()) || n.url.as_deref() == Some(url))
        });
        filter_notes(on_site, filter)
    }

    /// Every tag in use with the number of notes carrying it, sorted by tag.
    pub fn tag_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for tag in self.notes.iter().flat_map(|n| n.tags.iter()) {
            *counts.entry(tag.clone()).or_insert(0) += 1;
        }
        counts
    }
}
