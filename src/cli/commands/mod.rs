mod form;
mod records;
mod system;
mod transfer;

use crate::cli::registry::{CommandEntry, CommandRegistry};

/// Registers every shell command; order here is the `help` display order.
pub fn register_all(registry: &mut CommandRegistry) {
    registry.register(CommandEntry::new(
        "show",
        &[],
        "show",
        "Display the current form and edit session",
        form::cmd_show,
    ));
    registry.register(CommandEntry::new(
        "set",
        &[],
        "set <field> <value...>",
        "Set a form field (name, plate, vin, price, notes, exterior, interior)",
        form::cmd_set,
    ));
    registry.register(CommandEntry::new(
        "check",
        &[],
        "check <feature...>",
        "Check one or more checklist features",
        form::cmd_check,
    ));
    registry.register(CommandEntry::new(
        "uncheck",
        &[],
        "uncheck <feature...>",
        "Uncheck one or more checklist features",
        form::cmd_uncheck,
    ));
    registry.register(CommandEntry::new(
        "summary",
        &[],
        "summary",
        "Show per-package checklist progress",
        form::cmd_summary,
    ));
    registry.register(CommandEntry::new(
        "features",
        &[],
        "features",
        "List every package and feature with its current state",
        form::cmd_features,
    ));
    registry.register(CommandEntry::new(
        "colors",
        &[],
        "colors",
        "List the available exterior and interior color keys",
        form::cmd_colors,
    ));
    registry.register(CommandEntry::new(
        "save",
        &[],
        "save",
        "Save the form as a car record (updates the loaded car)",
        records::cmd_save,
    ));
    registry.register(CommandEntry::new(
        "clear",
        &[],
        "clear",
        "Clear the form and abandon the edit session",
        records::cmd_clear,
    ));
    registry.register(CommandEntry::new(
        "list",
        &["ls"],
        "list",
        "List all saved cars",
        records::cmd_list,
    ));
    registry.register(CommandEntry::new(
        "view",
        &[],
        "view <index|plate|id>",
        "Show the full detail of a saved car",
        records::cmd_view,
    ));
    registry.register(CommandEntry::new(
        "load",
        &[],
        "load <index|plate|id>",
        "Load a saved car into the form for editing",
        records::cmd_load,
    ));
    registry.register(CommandEntry::new(
        "delete",
        &["rm"],
        "delete <index|plate|id>",
        "Delete a saved car",
        records::cmd_delete,
    ));
    registry.register(CommandEntry::new(
        "export",
        &[],
        "export [path]",
        "Export all saved cars as a plain JSON array",
        transfer::cmd_export,
    ));
    registry.register(CommandEntry::new(
        "backup",
        &[],
        "backup [path]",
        "Export a versioned backup with a date-stamped filename",
        transfer::cmd_backup,
    ));
    registry.register(CommandEntry::new(
        "import",
        &[],
        "import <path>",
        "Replace all saved cars from an exported JSON file",
        transfer::cmd_import,
    ));
    registry.register(CommandEntry::new(
        "config",
        &[],
        "config [<key> <value>]",
        "Show or change settings (autosave, export_dir)",
        system::cmd_config,
    ));
    registry.register(CommandEntry::new(
        "help",
        &["?"],
        "help [command]",
        "List commands or show usage for one command",
        system::cmd_help,
    ));
    registry.register(CommandEntry::new(
        "exit",
        &["quit"],
        "exit",
        "Leave the shell",
        system::cmd_exit,
    ));
}
