pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod export;
pub mod id;
pub mod notebook;
pub mod search;
pub mod storage;
pub mod tags;

pub use entity::{BackupMode, Note, NoteKind, Settings};
pub use error::{KuviyamError, Result};
pub use notebook::Notebook;
pub use search::{filter_notes, NoteFilter};
pub use storage::KeyValueStore;
pub use tags::extract_tags;
