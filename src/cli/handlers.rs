use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use tracing::info;

use crate::config::{StorageBackend, StoreConfig};
use crate::entity::{BackupMode, Note, NoteKind};
use crate::error::{KuviyamError, Result};
use crate::export::format_notes_as_text;
use crate::notebook::Notebook;
use crate::search::{parse_query, NoteFilter};
use crate::storage::{load_settings, save_settings, KeyValueStore, Project, KUVIYAM_DIR};
use crate::tags::format_tags;

/// Find the project root by looking for .kuviyam/
fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        if current.join(KUVIYAM_DIR).is_dir() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd,
        }
    }
}

fn open_store() -> Result<Box<dyn KeyValueStore>> {
    let project = Project::open(&find_project_root())?;
    project.open_store()
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(content)
}

fn print_note_line(note: &Note) {
    let tags = format_tags(&note.tags);
    println!(
        "  {} [{}] {}{}{}",
        note.id,
        note.kind,
        note.display_title(),
        if tags.is_empty() { "" } else { "  " },
        tags
    );
}

fn print_note(note: &Note) {
    println!("{}", note.display_title());
    println!("  id:      {}", note.id);
    println!("  type:    {}", note.kind);
    println!("  created: {}", note.created_at);
    println!("  updated: {}", note.updated_at);
    if let Some(url) = &note.url {
        println!("  url:     {}", url);
    }
    if !note.tags.is_empty() {
        println!("  tags:    {}", format_tags(&note.tags));
    }
    if !note.content.is_empty() {
        println!();
        println!("{}", note.content);
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    eprintln!("{} [y/N] ", prompt);

    // Check if stdin is a tty for interactive confirmation
    if atty::is(atty::Stream::Stdin) {
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        Ok(input.trim().eq_ignore_ascii_case("y"))
    } else {
        Err(KuviyamError::Storage(
            "Use --force in non-interactive mode".to_string(),
        ))
    }
}

pub fn handle_init(backend: String) -> Result<()> {
    let root = env::current_dir()?;
    let config = StoreConfig {
        backend: backend
            .parse::<StorageBackend>()
            .map_err(KuviyamError::Config)?,
    };

    let project = Project::init(&root, &config)?;
    info!(dir = %project.dir().display(), backend = %config.backend, "initialized project");

    println!(
        "Initialized kuviyam project in {} ({} storage)",
        root.display(),
        config.backend
    );
    Ok(())
}

fn add_note(
    kind: NoteKind,
    url: Option<String>,
    title: Option<String>,
    stdin: bool,
    json: bool,
) -> Result<()> {
    let store = open_store()?;
    let mut book = Notebook::load(store.as_ref())?;

    let created = match (kind, url) {
        (NoteKind::Hook, Some(url)) => book.create_hook(&url).clone(),
        _ => book.create_dump().clone(),
    };

    let content = if stdin { Some(read_stdin()?) } else { None };
    let note = if title.is_some() || content.is_some() {
        book.save_note(
            &created.id,
            title.as_deref().unwrap_or(&created.title),
            content.as_deref().unwrap_or(&created.content),
        )?
        .clone()
    } else {
        created
    };

    book.persist(store.as_ref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        println!(
            "Created {} ({}) - {}",
            note.kind,
            note.id,
            note.display_title()
        );
    }
    Ok(())
}

pub fn handle_add_dump(title: Option<String>, stdin: bool, json: bool) -> Result<()> {
    add_note(NoteKind::Dump, None, title, stdin, json)
}

pub fn handle_add_hook(url: String, title: Option<String>, stdin: bool, json: bool) -> Result<()> {
    add_note(NoteKind::Hook, Some(url), title, stdin, json)
}

pub fn handle_edit(id: String, title: Option<String>, stdin: bool, json: bool) -> Result<()> {
    if title.is_none() && !stdin {
        return Err(KuviyamError::InvalidArgs(
            "nothing to change, pass --title and/or --stdin".to_string(),
        ));
    }

    let store = open_store()?;
    let mut book = Notebook::load(store.as_ref())?;

    let current = book.find(&id)?.clone();
    let content = if stdin { read_stdin()? } else { current.content.clone() };
    let title = title.unwrap_or_else(|| current.title.clone());

    let updated = book.save_note(&current.id, &title, &content)?.clone();
    book.persist(store.as_ref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        println!(
            "Updated {} ({}) - {}",
            updated.kind,
            updated.id,
            updated.display_title()
        );
    }
    Ok(())
}

/// Arguments of `kuviyam list`
#[derive(Debug, Default)]
pub struct ListArgs {
    pub kind: Option<String>,
    pub filter: NoteFilter,
    pub site: Option<String>,
    pub json: bool,
}

pub fn handle_list(args: ListArgs) -> Result<()> {
    let store = open_store()?;
    let book = Notebook::load(store.as_ref())?;

    let kind = args
        .kind
        .as_deref()
        .map(|k| {
            k.parse::<NoteKind>()
                .map_err(|_| KuviyamError::InvalidNoteKind(k.to_string()))
        })
        .transpose()?;

    let notes = match &args.site {
        Some(_) if kind == Some(NoteKind::Dump) => {
            return Err(KuviyamError::InvalidArgs(
                "--site only lists hook notes".to_string(),
            ));
        }
        Some(url) => book.hooks_for_site(url, &args.filter),
        None => book.filtered(kind, &args.filter),
    };

    print_notes(&notes, args.json, "No notes found.")
}

fn print_notes(notes: &[&Note], json: bool, empty_message: &str) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(notes)?);
    } else if notes.is_empty() {
        println!("{}", empty_message);
    } else {
        for note in notes {
            print_note_line(note);
        }
    }
    Ok(())
}

pub fn handle_get(id: String, json: bool) -> Result<()> {
    let store = open_store()?;
    let book = Notebook::load(store.as_ref())?;
    let note = book.find(&id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(note)?);
    } else {
        print_note(note);
    }
    Ok(())
}

pub fn handle_search(query: String, json: bool) -> Result<()> {
    let store = open_store()?;
    let book = Notebook::load(store.as_ref())?;

    let parsed = parse_query(&query);
    let notes = book.filtered(parsed.kind, &parsed.filter);

    if !json && !notes.is_empty() {
        println!("Search results for '{}':\n", query);
    }
    print_notes(&notes, json, &format!("No results found for '{}'.", query))
}

pub fn handle_delete(id: String, force: bool) -> Result<()> {
    let store = open_store()?;
    let mut book = Notebook::load(store.as_ref())?;

    let note = book.find(&id)?.clone();

    // Confirm deletion unless --force is used
    if !force && !confirm(&format!("Delete {} ({}) - {}?", note.kind, note.id, note.display_title()))? {
        println!("Cancelled.");
        return Ok(());
    }

    book.delete(&note.id)?;
    book.persist(store.as_ref())?;

    println!(
        "Deleted {} ({}) - {}",
        note.kind,
        note.id,
        note.display_title()
    );
    Ok(())
}

pub fn handle_clear(force: bool) -> Result<()> {
    let store = open_store()?;
    let mut book = Notebook::load(store.as_ref())?;

    if !force && !confirm("Clear all notes? This cannot be undone.")? {
        println!("Cancelled.");
        return Ok(());
    }

    let count = book.len();
    book.clear();
    book.persist(store.as_ref())?;

    println!("All notes cleared ({} removed).", count);
    Ok(())
}

pub fn handle_tags(json: bool) -> Result<()> {
    let store = open_store()?;
    let book = Notebook::load(store.as_ref())?;
    let counts = book.tag_counts();

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
    } else if counts.is_empty() {
        println!("No tags yet.");
    } else {
        for (tag, count) in counts {
            println!("  #{} ({})", tag, count);
        }
    }
    Ok(())
}

pub fn handle_export(output: String) -> Result<()> {
    let store = open_store()?;
    let book = Notebook::load(store.as_ref())?;
    let text = format_notes_as_text(book.notes());

    if output == "-" {
        print!("{}", text);
    } else {
        fs::write(&output, &text)?;
        info!(path = %output, notes = book.len(), "exported notes");
        println!("Exported {} notes to {}", book.len(), output);
    }
    Ok(())
}

pub fn handle_settings_show(json: bool) -> Result<()> {
    let store = open_store()?;
    let settings = load_settings(store.as_ref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
    } else {
        println!("backup mode:     {}", settings.backup_mode);
        println!(
            "drive folder id: {}",
            if settings.drive_folder_id.is_empty() {
                "-"
            } else {
                settings.drive_folder_id.as_str()
            }
        );
    }
    Ok(())
}

pub fn handle_settings_set(backup_mode: Option<String>, drive_folder: Option<String>) -> Result<()> {
    let store = open_store()?;
    let mut settings = load_settings(store.as_ref())?;

    if let Some(mode) = backup_mode {
        settings.backup_mode = mode
            .parse::<BackupMode>()
            .map_err(|_| KuviyamError::InvalidBackupMode(mode.clone()))?;
    }
    if let Some(folder) = drive_folder {
        settings.drive_folder_id = folder.trim().to_string();
    }

    save_settings(store.as_ref(), &settings)?;
    println!(
        "Saved settings (backup mode: {}, drive folder: {})",
        settings.backup_mode,
        if settings.drive_folder_id.is_empty() {
            "-"
        } else {
            settings.drive_folder_id.as_str()
        }
    );
    Ok(())
}
