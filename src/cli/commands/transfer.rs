//! Import/export commands: plain exports, date-stamped backups, and the
//! confirm-then-replace import flow.

use std::fs;
use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io as cli_io;
use crate::store::import;

pub(super) fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = resolve_output_path(context, args.first().copied(), import::default_export_file_name());
    let json = context.store.serialize()?;
    fs::write(&path, json)?;
    cli_io::print_success(format!(
        "Exported {} car(s) to {}.",
        context.store.len(),
        path.display()
    ));
    Ok(())
}

pub(super) fn cmd_backup(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = resolve_output_path(context, args.first().copied(), &import::backup_file_name());
    let json = import::export_backup(context.store.list())?;
    fs::write(&path, json)?;
    cli_io::print_success(format!(
        "Backed up {} car(s) to {}.",
        context.store.len(),
        path.display()
    ));
    Ok(())
}

pub(super) fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: import <path>".into()))?;
    let text = fs::read_to_string(path)?;
    let records = import::parse_records(&text)?;

    let proceed = context.confirm(
        &format!(
            "Import {} car(s)? This replaces the current saved list.",
            records.len()
        ),
        false,
    )?;
    if !proceed {
        cli_io::print_info("Import cancelled.");
        return Ok(());
    }

    let count = records.len();
    context.store.replace_all(records)?;
    cli_io::print_success(format!("Imported {count} car(s)."));
    Ok(())
}

/// Explicit path argument wins; otherwise the configured export directory
/// (or the working directory) plus the default filename.
fn resolve_output_path(context: &ShellContext, arg: Option<&str>, default_name: &str) -> PathBuf {
    match arg {
        Some(path) => PathBuf::from(path),
        None => context
            .config
            .export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(default_name),
    }
}
