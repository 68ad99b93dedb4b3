mod commands;
mod handlers;

pub use commands::{AddCommand, AddEntity, Cli, Commands, SettingsAction, SettingsCommand};
pub use handlers::{
    handle_add_dump, handle_add_hook, handle_clear, handle_delete, handle_edit, handle_export,
    handle_get, handle_init, handle_list, handle_search, handle_settings_set,
    handle_settings_show, handle_tags, ListArgs,
};
