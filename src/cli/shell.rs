use std::{
    borrow::Cow,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;
use crate::domain::schema;
use crate::session;

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os("GARAGE_CORE_CLI_SCRIPT").is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    }
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    output::section("Garage Core");
    output::hint("Type `help` to list commands. Tab completes commands and feature ids.");
    context.offer_draft_restore()?;

    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    let helper = CommandHelper::new(context.registry.primary_names());
    editor.set_helper(Some(helper));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);

    loop {
        if !context.running {
            break;
        }
        let line = editor.readline("garage> ");

        match line {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                editor.add_history_entry(trimmed).ok();

                match handle_line(context, trimmed) {
                    Ok(LoopControl::Continue) => {}
                    Ok(LoopControl::Exit) => break,
                    Err(err) => context.report_error(err)?,
                }
                context.autosave_tick();
            }
            Err(ReadlineError::Interrupted) => {
                if context.confirm_exit().unwrap_or(true) {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        if !context.running {
            break;
        }
        let line = line?;
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
        context.autosave_tick();
    }
    Ok(())
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(message) => {
            output::warning(message);
            return Ok(LoopControl::Continue);
        }
    };

    if tokens.is_empty() {
        return Ok(LoopControl::Continue);
    }

    let raw = &tokens[0];
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

pub(crate) fn parse_command_line(line: &str) -> Result<Vec<String>, String> {
    split(line).map_err(|err| format!("Could not parse command line: {err}"))
}

struct CommandHelper {
    commands: Vec<String>,
    fields: Vec<&'static str>,
    features: Vec<&'static str>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self {
            commands,
            fields: session::field_names().to_vec(),
            features: schema::feature_ids().collect(),
        }
    }

    fn candidates(pool: &[impl AsRef<str>], prefix: &str) -> Vec<Pair> {
        pool.iter()
            .map(AsRef::as_ref)
            .filter(|candidate| candidate.starts_with(prefix))
            .map(|candidate| Pair {
                display: candidate.to_string(),
                replacement: candidate.to_string(),
            })
            .collect()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];

        // Argument completion for the commands that take vocabulary words.
        for prefix in ["check ", "uncheck "] {
            if let Some(rest) = head.strip_prefix(prefix) {
                return Ok((prefix.len(), Self::candidates(&self.features, rest)));
            }
        }
        if let Some(rest) = head.strip_prefix("set ") {
            if !rest.contains(' ') {
                return Ok((4, Self::candidates(&self.fields, rest)));
            }
            return Ok((pos, Vec::new()));
        }

        if !head.contains(' ') {
            return Ok((0, Self::candidates(&self.commands, head)));
        }
        Ok((pos, Vec::new()))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_command_line_honors_quoting() {
        let tokens = parse_command_line("set name \"Daily Driver\"").unwrap();
        assert_eq!(tokens, ["set", "name", "Daily Driver"]);
        assert!(parse_command_line("set name \"unterminated").is_err());
    }

    #[test]
    fn completer_suggests_feature_ids_for_check() {
        let helper = CommandHelper::new(vec!["check", "save"]);
        let ctx_history = DefaultHistory::new();
        let ctx = ReadlineContext::new(&ctx_history);
        let (start, pairs) = helper.complete("check sun", 9, &ctx).unwrap();
        assert_eq!(start, 6);
        assert!(pairs.iter().any(|pair| pair.replacement == "sunroof"));
    }
}
