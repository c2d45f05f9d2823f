//! Shell housekeeping: help, configuration, exit.

use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::cli::output;

pub(super) fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        let entry = context.command(&name.to_ascii_lowercase()).ok_or_else(|| {
            CommandError::InvalidArguments(format!("unknown command `{name}`"))
        })?;
        output::section(entry.name);
        cli_io::print_info(format!("Usage: {}", entry.usage));
        cli_io::print_info(entry.description);
        if !entry.aliases.is_empty() {
            cli_io::print_info(format!("Aliases: {}", entry.aliases.join(", ")));
        }
        return Ok(());
    }

    output::section("Commands");
    for entry in context.registry.list() {
        cli_io::print_info(format!("{:<10} {}", entry.name, entry.description));
    }
    cli_io::print_hint("Use `help <command>` for usage details.");
    Ok(())
}

pub(super) fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        output::section("Configuration");
        cli_io::print_info(format!(
            "autosave:   {}",
            if context.config.autosave { "on" } else { "off" }
        ));
        cli_io::print_info(format!(
            "export_dir: {}",
            context
                .config
                .export_dir
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| "(current directory)".into())
        ));
        cli_io::print_hint(format!("Stored at {}", context.config_manager.path().display()));
        return Ok(());
    }

    if args.len() != 2 {
        return Err(CommandError::InvalidArguments(
            "usage: config <key> <value>".into(),
        ));
    }

    match args[0].to_ascii_lowercase().as_str() {
        "autosave" => {
            context.config.autosave = parse_switch(args[1])?;
        }
        "export_dir" => {
            if args[1].eq_ignore_ascii_case("none") {
                context.config.export_dir = None;
            } else {
                context.config.export_dir = Some(PathBuf::from(args[1]));
            }
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown config key `{other}` (keys: autosave, export_dir)"
            )))
        }
    }

    context.config_manager.save(&context.config)?;
    cli_io::print_success("Configuration updated.");
    Ok(())
}

fn parse_switch(value: &str) -> Result<bool, CommandError> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "expected on/off, got `{other}`"
        ))),
    }
}

pub(super) fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    cli_io::print_info("Goodbye.");
    Err(CommandError::ExitRequested)
}
