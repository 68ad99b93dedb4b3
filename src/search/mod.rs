//! Note filtering by search text, tag and creation date.
//!
//! All criteria are optional and combine with AND. Bad input never fails:
//! a blank criterion is ignored, an unparsable date bound is ignored, and a
//! note whose `createdAt` cannot be parsed counts as created at the epoch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Note, NoteKind};

/// Filter criteria as typed by the user.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteFilter {
    /// Case-insensitive substring of "title content"
    pub search_text: Option<String>,
    /// Single tag, with or without a leading '#'
    pub tag: Option<String>,
    /// Inclusive lower bound on `createdAt`
    pub from: Option<String>,
    /// Inclusive upper bound on `createdAt`
    pub to: Option<String>,
}

impl NoteFilter {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the filter constrains anything. Blank text and unparsable
    /// dates do not count.
    pub fn is_empty(&self) -> bool {
        let criteria = Criteria::from(self);
        criteria.search.is_none()
            && criteria.tag.is_none()
            && criteria.from.is_none()
            && criteria.to.is_none()
    }

    /// Check a single note against the filter.
    pub fn matches(&self, note: &Note) -> bool {
        Criteria::from(self).matches(note)
    }
}

/// Filter criteria normalized once per `filter_notes` call.
struct Criteria {
    search: Option<String>,
    tag: Option<String>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl From<&NoteFilter> for Criteria {
    fn from(filter: &NoteFilter) -> Self {
        Self {
            search: non_blank(&filter.search_text).map(str::to_lowercase),
            tag: non_blank(&filter.tag)
                .map(|t| t.strip_prefix('#').unwrap_or(t).to_lowercase())
                .filter(|t| !t.is_empty()),
            from: non_blank(&filter.from).and_then(parse_timestamp),
            to: non_blank(&filter.to).and_then(parse_timestamp),
        }
    }
}

impl Criteria {
    fn matches(&self, note: &Note) -> bool {
        if let Some(search) = &self.search {
            let haystack = format!("{} {}", note.title, note.content).to_lowercase();
            if !haystack.contains(search.as_str()) {
                return false;
            }
        }

        if let Some(tag) = &self.tag {
            if !note.tags.iter().any(|t| t.to_lowercase() == *tag) {
                return false;
            }
        }

        if self.from.is_some() || self.to.is_some() {
            let created = note.created_time();
            if self.from.is_some_and(|from| created < from) {
                return false;
            }
            if self.to.is_some_and(|to| created > to) {
                return false;
            }
        }

        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Return the notes that pass every supplied criterion, in input order.
pub fn filter_notes<'a, I>(notes: I, filter: &NoteFilter) -> Vec<&'a Note>
where
    I: IntoIterator<Item = &'a Note>,
{
    let criteria = Criteria::from(filter);
    notes.into_iter().filter(|n| criteria.matches(n)).collect()
}

/// A free-text query split into its filter prefixes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub kind: Option<NoteKind>,
    pub filter: NoteFilter,
}

/// Parse a raw query string into a note kind and filter.
///
/// Recognized prefixes:
/// - `type:dump` / `type:hook` - restrict the note kind
/// - `tag:work` - tag filter (the last one wins)
/// - `from:2024-01-01` - created on or after
/// - `to:2024-12-31` - created on or before
///
/// Everything else becomes the search text.
///
/// # Examples
///
/// ```
/// use kuviyam::search::parse_query;
///
/// let parsed = parse_query("tag:work from:2024-01-01 weekly sync");
/// assert_eq!(parsed.filter.search_text.as_deref(), Some("weekly sync"));
/// assert_eq!(parsed.filter.tag.as_deref(), Some("work"));
/// ```
pub fn parse_query(raw: &str) -> ParsedQuery {
    let mut parsed = ParsedQuery::default();
    let mut remaining = Vec::new();

    for token in raw.split_whitespace() {
        if let Some(value) = token.strip_prefix("type:") {
            parsed.kind = value.parse().ok();
        } else if let Some(value) = token.strip_prefix("tag:") {
            parsed.filter.tag = Some(value.to_string());
        } else if let Some(value) = token.strip_prefix("from:") {
            parsed.filter.from = Some(value.to_string());
        } else if let Some(value) = token.strip_prefix("to:") {
            parsed.filter.to = Some(value.to_string());
        } else {
            remaining.push(token);
        }
    }

    if !remaining.is_empty() {
        parsed.filter.search_text = Some(remaining.join(" "));
    }
    parsed
}

/// Parse a timestamp string into `DateTime<Utc>`.
///
/// Accepts RFC 3339, offsets written without a colon (`+0000`), a bare date,
/// year-month or year (midnight UTC at the start of that period), and a date
/// and time without offset (taken as UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(dt) = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"]
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(s, fmt).ok())
    {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(date) = parse_date(s) {
        let datetime = date.and_hms_opt(0, 0, 0)?;
        return Some(DateTime::from_naive_utc_and_offset(datetime, Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// `YYYY-MM-DD`, `YYYY-MM` or `YYYY`; partial dates start on the first day.
fn parse_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }

    let mut parts = s.split('-');
    let year = parts.next().filter(|y| y.len() == 4)?;
    let month = parts.next();
    if parts.next().is_some() || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let month = match month {
        Some(m) if m.len() == 2 && m.bytes().all(|b| b.is_ascii_digit()) => m.parse().ok()?,
        Some(_) => return None,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}
