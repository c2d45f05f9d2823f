//! Commands operating on the current form: fields, checklist, summary.

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::format;
use crate::cli::io as cli_io;
use crate::cli::output;
use crate::domain::{color, schema, ColorSlot};
use crate::session::EditSession;

pub(super) fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let form = context.controller.form();
    output::section("Current Car");
    cli_io::print_info(format!("Name:          {}", blank_dash(&form.name)));
    cli_io::print_info(format!("License plate: {}", blank_dash(&form.license_plate)));
    cli_io::print_info(format!("VIN:           {}", blank_dash(&form.vin)));
    cli_io::print_info(format!("Price:         {}", blank_dash(&form.price)));
    cli_io::print_info(format!("Notes:         {}", blank_dash(&form.notes)));
    cli_io::print_info(format!(
        "Exterior:      {}",
        form.exterior_color
            .as_deref()
            .map(|key| color::display_name(ColorSlot::Exterior, key))
            .unwrap_or_else(|| "-".into())
    ));
    cli_io::print_info(format!(
        "Interior:      {}",
        form.interior_color
            .as_deref()
            .map(|key| color::display_name(ColorSlot::Interior, key))
            .unwrap_or_else(|| "-".into())
    ));
    cli_io::print_info(format!(
        "Checked:       {}/{} features",
        form.checked.len(),
        schema::feature_count()
    ));
    match context.controller.session() {
        EditSession::New => cli_io::print_hint("New entry: `save` creates a new record."),
        EditSession::Editing(id) => {
            let label = context
                .store
                .get(id)
                .map(|record| record.display_label())
                .unwrap_or_else(|| id.to_string());
            cli_io::print_hint(format!("Editing {label}: `save` updates it."));
        }
    }
    Ok(())
}

pub(super) fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() < 2 {
        return Err(CommandError::InvalidArguments(
            "usage: set <field> <value...>".into(),
        ));
    }
    let field = args[0];
    let value = args[1..].join(" ");
    context.controller.set_field(field, &value)?;
    cli_io::print_success(format!("Updated {}.", field.to_ascii_lowercase()));
    Ok(())
}

pub(super) fn cmd_check(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    set_features(context, args, true)
}

pub(super) fn cmd_uncheck(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    set_features(context, args, false)
}

fn set_features(context: &mut ShellContext, args: &[&str], checked: bool) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {} <feature...>",
            if checked { "check" } else { "uncheck" }
        )));
    }
    for &feature in args {
        context.controller.set_checked(feature, checked)?;
        let label = schema::find_feature(feature)
            .map(|def| def.label)
            .unwrap_or(feature);
        cli_io::print_success(format!(
            "{} {label}.",
            if checked { "Checked" } else { "Unchecked" }
        ));
    }
    Ok(())
}

pub(super) fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let summary = context.controller.summarize();
    output::section("Package Summary");
    if context.controller.form().checked.is_empty() {
        cli_io::print_hint("Complete some checks to see package progress.");
    }
    for line in format::package_lines(&summary) {
        cli_io::print_info(line);
    }
    Ok(())
}

pub(super) fn cmd_features(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let form = context.controller.form();
    for package in schema::packages() {
        output::section(package.name);
        for feature in package.features {
            let mark = if form.checked.contains(feature.id) {
                "[x]"
            } else {
                "[ ]"
            };
            cli_io::print_info(format!(
                "{mark} {:<22} {} ({})",
                feature.id, feature.label, feature.importance
            ));
        }
    }
    Ok(())
}

pub(super) fn cmd_colors(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Exterior Colors");
    for option in color::EXTERIOR_COLORS {
        cli_io::print_info(format!(
            "{:<16} {} ({})",
            option.key, option.name, option.swatch
        ));
    }
    output::section("Interior Colors");
    for option in color::INTERIOR_COLORS {
        cli_io::print_info(format!(
            "{:<16} {} ({})",
            option.key, option.name, option.swatch
        ));
    }
    Ok(())
}

fn blank_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}
