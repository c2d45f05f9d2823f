use std::fmt;

use colored::Colorize;

/// Plain informational line.
pub fn info(message: impl fmt::Display) {
    println!("{message}");
}

pub fn success(message: impl fmt::Display) {
    println!("{}", format!("OK: {message}").bright_green());
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", format!("WARNING: {message}").bright_yellow());
}

pub fn error(message: impl fmt::Display) {
    println!("{}", format!("ERROR: {message}").bright_red());
}

/// Secondary guidance rendered dimmed below errors and lists.
pub fn hint(message: impl fmt::Display) {
    println!("{}", message.to_string().dimmed());
}

pub fn section(title: impl fmt::Display) {
    println!("{}", format!("=== {title} ===").bold());
}
