//! Commands that move data between the form and the record store.

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::format;
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::domain::CarRecord;
use crate::errors::GarageError;
use crate::store::SaveOutcome;

pub(super) fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let first_try = {
        let ShellContext {
            store,
            controller,
            drafts,
            ..
        } = context;
        controller.save(store, drafts, false)
    };

    match first_try {
        Ok((record, outcome)) => {
            report_saved(&record, outcome);
            Ok(())
        }
        Err(GarageError::PlateConflict { existing_id, plate }) => {
            let existing = context
                .store
                .get(existing_id)
                .map(|record| record.display_label())
                .unwrap_or_else(|| format!("`{plate}`"));
            let proceed = context.confirm(
                &format!("{existing} already uses this license plate. Overwrite it?"),
                false,
            )?;
            if !proceed {
                cli_io::print_info("Save cancelled.");
                return Ok(());
            }
            let ShellContext {
                store,
                controller,
                drafts,
                ..
            } = context;
            let (record, outcome) = controller.save(store, drafts, true)?;
            report_saved(&record, outcome);
            Ok(())
        }
        Err(err) => Err(CommandError::Core(err)),
    }
}

fn report_saved(record: &CarRecord, outcome: SaveOutcome) {
    match outcome {
        SaveOutcome::Created => {
            cli_io::print_success(format!("Car saved: {}.", record.display_label()));
        }
        SaveOutcome::Updated => {
            cli_io::print_success(format!("Car updated: {}.", record.display_label()));
        }
        SaveOutcome::Overwrote { .. } => {
            cli_io::print_success(format!(
                "Car saved: {} (replaced the previous holder of this plate).",
                record.display_label()
            ));
        }
    }
}

pub(super) fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Clear the form? Unsaved changes will be lost.", false)? {
        cli_io::print_info("Clear cancelled.");
        return Ok(());
    }
    let ShellContext {
        controller, drafts, ..
    } = context;
    controller.clear(drafts);
    cli_io::print_success("Form cleared.");
    Ok(())
}

pub(super) fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.store.is_empty() {
        cli_io::print_info("No saved cars yet. Save a car to see it here.");
        return Ok(());
    }
    output::section("Saved Cars");
    for (index, record) in context.store.list().iter().enumerate() {
        cli_io::print_info(format::record_row(index, record));
    }
    Ok(())
}

pub(super) fn cmd_view(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: view <index|plate|id>".into())
    })?;
    let id = context.resolve_record(reference)?;
    let record = context
        .store
        .get(id)
        .expect("resolved id refers to a stored record");
    output::section(record.display_label());
    for line in format::record_detail(record) {
        cli_io::print_info(line);
    }
    Ok(())
}

pub(super) fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: load <index|plate|id>".into())
    })?;
    let id = context.resolve_record(reference)?;
    context.controller.load(&context.store, id)?;
    let label = context
        .store
        .get(id)
        .map(|record| record.display_label())
        .unwrap_or_else(|| id.to_string());
    cli_io::print_success(format!("Loaded {label}."));
    cli_io::print_hint("Subsequent `save` updates this car; `clear` starts a new one.");
    Ok(())
}

pub(super) fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: delete <index|plate|id>".into())
    })?;
    let id = context.resolve_record(reference)?;
    let label = context
        .store
        .get(id)
        .map(|record| record.display_label())
        .unwrap_or_else(|| id.to_string());
    if !context.confirm(&format!("Delete {label}?"), false)? {
        cli_io::print_info("Delete cancelled.");
        return Ok(());
    }
    let removed = {
        let ShellContext {
            store,
            controller,
            drafts,
            ..
        } = context;
        controller.delete(store, drafts, id)?
    };
    if removed {
        cli_io::print_success(format!("Deleted {label}."));
    } else {
        cli_io::print_warning("Nothing to delete.");
    }
    Ok(())
}
