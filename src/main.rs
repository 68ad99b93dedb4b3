use clap::Parser;
use kuviyam::cli::{
    handle_add_dump, handle_add_hook, handle_clear, handle_delete, handle_edit, handle_export,
    handle_get, handle_init, handle_list, handle_search, handle_settings_set,
    handle_settings_show, handle_tags, AddEntity, Cli, Commands, ListArgs, SettingsAction,
};
use kuviyam::NoteFilter;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_env("KUVIYAM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { backend } => handle_init(backend),
        Commands::Add(add) => match add.entity {
            AddEntity::Dump { title, stdin, json } => handle_add_dump(title, stdin, json),
            AddEntity::Hook {
                url,
                title,
                stdin,
                json,
            } => handle_add_hook(url, title, stdin, json),
        },
        Commands::Edit {
            id,
            title,
            stdin,
            json,
        } => handle_edit(id, title, stdin, json),
        Commands::List {
            kind,
            search,
            tag,
            from,
            to,
            site,
            json,
        } => handle_list(ListArgs {
            kind,
            filter: NoteFilter {
                search_text: search,
                tag,
                from,
                to,
            },
            site,
            json,
        }),
        Commands::Get { id, json } => handle_get(id, json),
        Commands::Search { query, json } => handle_search(query, json),
        Commands::Delete { id, force } => handle_delete(id, force),
        Commands::Clear { force } => handle_clear(force),
        Commands::Tags { json } => handle_tags(json),
        Commands::Export { output } => handle_export(output),
        Commands::Settings(settings) => match settings.action {
            SettingsAction::Show { json } => handle_settings_show(json),
            SettingsAction::Set {
                backup_mode,
                drive_folder,
            } => handle_settings_set(backup_mode, drive_folder),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
