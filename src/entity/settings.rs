// src/entity/settings.rs
use serde::{Deserialize, Serialize};

use super::{lenient_enum, null_as_default};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackupMode {
    #[default]
    Local,
    Drive,
}

impl std::fmt::Display for BackupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackupMode::Local => write!(f, "local"),
            BackupMode::Drive => write!(f, "drive"),
        }
    }
}

impl std::str::FromStr for BackupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(BackupMode::Local),
            "drive" => Ok(BackupMode::Drive),
            _ => Err(format!("Invalid backup mode: {}", s)),
        }
    }
}

/// User settings singleton, stored under the `settings` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Unrecognised stored values read back as `Local`
    #[serde(default, deserialize_with = "lenient_enum")]
    pub backup_mode: BackupMode,
    /// Only meaningful when `backup_mode` is `Drive`
    #[serde(default, deserialize_with = "null_as_default")]
    pub drive_folder_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.backup_mode, BackupMode::Local);
        assert_eq!(settings.drive_folder_id, "");

        let json = serde_json::to_value(&settings).unwrap();
        assert_eq!(json, serde_json::json!({"backupMode": "local", "driveFolderId": ""}));
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"backupMode":"drive"}"#).unwrap();
        assert_eq!(settings.backup_mode, BackupMode::Drive);
        assert_eq!(settings.drive_folder_id, "");
    }

    #[test]
    fn test_unknown_backup_mode_falls_back_to_local() {
        let settings: Settings =
            serde_json::from_str(r#"{"backupMode":"cloud","driveFolderId":"x"}"#).unwrap();
        assert_eq!(settings.backup_mode, BackupMode::Local);
        assert_eq!(settings.drive_folder_id, "x");

        let settings: Settings = serde_json::from_str(r#"{"backupMode":null}"#).unwrap();
        assert_eq!(settings.backup_mode, BackupMode::Local);
    }

    #[test]
    fn test_backup_mode_parse() {
        assert_eq!("DRIVE".parse::<BackupMode>().unwrap(), BackupMode::Drive);
        assert!("cloud".parse::<BackupMode>().is_err());
    }
}
