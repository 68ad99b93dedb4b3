//! Plain-text export of the note collection.

use std::fmt::Write;

use crate::entity::Note;

pub const DEFAULT_EXPORT_FILE: &str = "kuviyam-notes.txt";

/// Render notes as plain text, one block per note:
///
/// ```text
/// # <title>
/// type: <type> | created: <createdAt> | url: <url>
/// <content>
///
/// ```
///
/// An empty title renders as `(untitled)` and a missing url as `-`.
pub fn format_notes_as_text(notes: &[Note]) -> String {
    let mut text = String::new();
    for note in notes {
        let title = if note.title.is_empty() {
            "(untitled)"
        } else {
            note.title.as_str()
        };
        let url = match note.url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => "-",
        };

        // Writing to a String cannot fail.
        let _ = writeln!(text, "# {}", title);
        let _ = writeln!(
            text,
            "type: {} | created: {} | url: {}",
            note.kind, note.created_at, url
        );
        let _ = writeln!(text, "{}\n", note.content);
    }
    text
}
