// src/entity/note.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient_enum, now_timestamp, null_as_default};
use crate::id::make_id;
use crate::search::parse_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NoteKind {
    /// Free-standing note, not tied to a page
    #[default]
    Dump,
    /// Note attached to the page it was created on
    Hook,
}

impl NoteKind {
    /// Title used when the user saves a note with an empty title.
    pub fn placeholder_title(&self) -> &'static str {
        match self {
            NoteKind::Dump => "Untitled dump",
            NoteKind::Hook => "Untitled hook",
        }
    }
}

impl std::fmt::Display for NoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteKind::Dump => write!(f, "dump"),
            NoteKind::Hook => write!(f, "hook"),
        }
    }
}

impl std::str::FromStr for NoteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dump" | "dumps" => Ok(NoteKind::Dump),
            "hook" | "hooks" => Ok(NoteKind::Hook),
            _ => Err(format!("Invalid note type: {}", s)),
        }
    }
}

/// A persisted note.
///
/// Field names serialize in camelCase (`createdAt`, `updatedAt`) and the kind
/// serializes as `type`. Every field tolerates being missing or `null` when
/// read back, since stored collections are not migrated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    /// Unrecognised stored values read back as `Dump`
    #[serde(rename = "type", default, deserialize_with = "lenient_enum")]
    pub kind: NoteKind,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    /// Always `extract_tags(content)` after a save
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_at: String,
    /// Page the hook was created on (hooks only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Host of `url` (hooks only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl Note {
    fn blank(kind: NoteKind, title: &str) -> Self {
        let now = now_timestamp();
        Self {
            id: make_id(),
            kind,
            title: title.to_string(),
            content: String::new(),
            tags: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
            url: None,
            domain: None,
        }
    }

    pub fn new_dump() -> Self {
        Self::blank(NoteKind::Dump, "New dump page")
    }

    pub fn new_hook(url: &str) -> Self {
        let mut note = Self::blank(NoteKind::Hook, "New hook");
        note.url = Some(url.to_string());
        note.domain = Some(extract_domain(url));
        note
    }

    pub fn is_hook(&self) -> bool {
        self.kind == NoteKind::Hook
    }

    /// Title for display, falling back to the kind's placeholder.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            self.kind.placeholder_title()
        } else {
            &self.title
        }
    }

    /// Creation time; a missing or unparsable `createdAt` counts as the epoch.
    pub fn created_time(&self) -> DateTime<Utc> {
        parse_timestamp(&self.created_at).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Host name of `url`, or an empty string when it does not parse.
pub fn extract_domain(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}
