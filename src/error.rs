use thiserror::Error;

#[derive(Error, Debug)]
pub enum KuviyamError {
    #[error("Not in a kuviyam project. Run 'kuviyam init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .kuviyam/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Ambiguous note id '{0}' matches more than one note")]
    AmbiguousId(String),

    #[error("Invalid note type: {0}")]
    InvalidNoteKind(String),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Invalid backup mode: {0}")]
    InvalidBackupMode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, KuviyamError>;
