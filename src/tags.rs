//! Inline `#tag` extraction.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

fn tag_pattern() -> &'static Regex {
    // A tag starts at the beginning of the text or after whitespace and runs
    // until the next whitespace or '#'. The preceding whitespace is consumed
    // by the match, so `#a#b` only yields `a`.
    TAG_PATTERN.get_or_init(|| Regex::new(r"(?:^|\s)#([^\s#]+)").expect("valid tag regex"))
}

/// Extract distinct lowercase tags from `text`, in first-seen order.
///
/// ```
/// let tags = kuviyam::tags::extract_tags("Meeting notes #work #followup and more #WORK");
/// assert_eq!(tags, vec!["work", "followup"]);
/// ```
pub fn extract_tags(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut tags = Vec::new();

    for caps in tag_pattern().captures_iter(text) {
        let tag = caps[1].trim().to_lowercase();
        if !tag.is_empty() && seen.insert(tag.clone()) {
            tags.push(tag);
        }
    }

    tags
}

/// Render tags back into `#tag` form, space separated.
pub fn format_tags(tags: &[String]) -> String {
    tags.iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ")
}
