use clap::{Args, Parser, Subcommand};

use crate::export::DEFAULT_EXPORT_FILE;

#[derive(Parser, Debug)]
#[command(name = "kuviyam")]
#[command(version, about = "Dump notes and per-site hook notes with inline #tags")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new kuviyam project in the current directory
    Init {
        /// Storage backend (json, sqlite)
        #[arg(long, default_value = "json")]
        backend: String,
    },

    /// Add a new note
    Add(AddCommand),

    /// Replace the title and/or content of a note
    Edit {
        /// Note ID (full id or unique prefix)
        id: String,

        /// New title (blank falls back to a placeholder)
        #[arg(long)]
        title: Option<String>,

        /// Read the new content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List notes, optionally filtered
    List {
        /// Note type to list (dump, hook)
        #[arg(value_name = "TYPE")]
        kind: Option<String>,

        /// Case-insensitive text in title or content
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Only notes carrying this tag ("work" or "#work")
        #[arg(long, short = 't')]
        tag: Option<String>,

        /// Created on or after this date
        #[arg(long)]
        from: Option<String>,

        /// Created on or before this date
        #[arg(long)]
        to: Option<String>,

        /// Only hooks for this page (same host or same URL)
        #[arg(long)]
        site: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Get {
        /// Note ID (full id or unique prefix)
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search notes; supports type:, tag:, from: and to: prefixes
    Search {
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note
    Delete {
        /// Note ID (full id or unique prefix)
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Delete every note
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// List tags with the number of notes using each
    Tags {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export all notes as plain text
    Export {
        /// Output file, or "-" for stdout
        #[arg(long, short = 'o', default_value = DEFAULT_EXPORT_FILE)]
        output: String,
    },

    /// Show or change settings
    Settings(SettingsCommand),
}

#[derive(Args, Debug)]
pub struct AddCommand {
    #[command(subcommand)]
    pub entity: AddEntity,
}

#[derive(Subcommand, Debug)]
pub enum AddEntity {
    /// Add a free-standing dump page
    Dump {
        /// Note title
        #[arg(long)]
        title: Option<String>,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Add a hook note for a web page
    Hook {
        /// Page URL the hook belongs to
        url: String,

        /// Note title
        #[arg(long)]
        title: Option<String>,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change settings
    Set {
        /// Backup mode (local, drive)
        #[arg(long)]
        backup_mode: Option<String>,

        /// Drive folder id used in drive mode
        #[arg(long)]
        drive_folder: Option<String>,
    },
}
