//! Shell context, command dispatch, and the CLI error types.

use std::io;

use strsim::levenshtein;
use thiserror::Error;
use uuid::Uuid;

use crate::config::{Config, ConfigManager};
use crate::errors::GarageError;
use crate::session::FormController;
use crate::store::draft::DraftStore;
use crate::store::medium::JsonFileMedium;
use crate::store::RecordStore;

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure of a single dispatched command; the shell loop reports it and
/// keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("exit requested")]
    ExitRequested,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] GarageError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
}

/// Top-level CLI failure surfaced by the binary.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] GarageError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Shared CLI runtime state: the open record store, the form controller with
/// its edit session, drafts, and configuration.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) store: RecordStore,
    pub(crate) controller: FormController,
    pub(crate) drafts: DraftStore,
    pub(crate) config: Config,
    pub(crate) config_manager: ConfigManager,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let store = RecordStore::open(Box::new(JsonFileMedium::new_default()?))?;
        let drafts = DraftStore::new(Box::new(JsonFileMedium::new_default()?));
        let config_manager = ConfigManager::new()?;
        let config = config_manager.load()?;

        Ok(Self {
            mode,
            registry,
            store,
            controller: FormController::new(),
            drafts,
            config,
            config_manager,
            running: true,
        })
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    /// Confirms a destructive action; script mode auto-accepts so piped
    /// command files run unattended.
    pub(crate) fn confirm(&self, prompt: &str, default: bool) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(prompt, default)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action("Exit shell?", true)
    }

    /// Resolves a user-supplied record reference: 1-based list index, record
    /// id, or license plate.
    pub(crate) fn resolve_record(&self, reference: &str) -> Result<Uuid, CommandError> {
        let needle = reference.trim();
        if self.store.is_empty() {
            return Err(CommandError::InvalidArguments(
                "no saved cars yet".into(),
            ));
        }
        if let Ok(index) = needle.parse::<usize>() {
            if index == 0 || index > self.store.len() {
                return Err(CommandError::InvalidArguments(format!(
                    "index {index} is out of range (1-{})",
                    self.store.len()
                )));
            }
            return Ok(self.store.list()[index - 1].id);
        }
        if let Ok(id) = Uuid::parse_str(needle) {
            return self
                .store
                .get(id)
                .map(|record| record.id)
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!("no saved car with id {id}"))
                });
        }
        self.store
            .find_by_plate(needle)
            .map(|record| record.id)
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "no saved car matches `{needle}` (use `list` for indexes)"
                ))
            })
    }

    /// The between-commands tick: persist a draft of the current form when
    /// autosave is enabled. Never surfaces a failure.
    pub(crate) fn autosave_tick(&self) {
        if self.config.autosave {
            self.controller.autosave(&self.drafts);
        }
    }

    /// Offers to restore a leftover draft before the interactive loop starts.
    pub(crate) fn offer_draft_restore(&mut self) -> Result<(), CliError> {
        if self.mode != CliMode::Interactive {
            return Ok(());
        }
        let Some(draft) = self.drafts.load()? else {
            return Ok(());
        };
        let stamp = draft.saved_at.format("%Y-%m-%d %H:%M");
        let restore =
            cli_io::confirm_action(&format!("Restore unsaved draft from {stamp}?"), true)
                .unwrap_or(false);
        if restore {
            if self.controller.restore_draft(&self.drafts)? {
                cli_io::print_success("Draft restored.");
            }
        } else if let Err(err) = self.drafts.clear() {
            tracing::debug!(%err, "could not discard declined draft");
        }
        Ok(())
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }
}
