mod note;
mod settings;

pub use note::{extract_domain, Note, NoteKind};
pub use settings::{BackupMode, Settings};

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer};

/// Current time as an ISO-8601 UTC timestamp with millisecond precision,
/// e.g. `2024-06-01T09:30:00.000Z`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Deserialize `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize an enum from its string form, falling back to the default
/// for missing, `null`, non-string or unrecognised values.
pub(crate) fn lenient_enum<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + std::str::FromStr,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default())
}
