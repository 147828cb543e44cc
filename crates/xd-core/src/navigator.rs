use thiserror::Error;
use tracing::debug;
use tracing::error;
use tracing::warn;

use crate::command::Command;
use crate::command::CommandTree;
use crate::command::NodeKind;
use crate::command::EXIT_OPTION;
use crate::contracts::ExecError;
use crate::contracts::Executor;
use crate::contracts::Picker;
use crate::contracts::PickerError;
use crate::contracts::Selection;
use crate::placeholder::bind_children;
use crate::placeholder::substitute;

/// Label of the picker shown when a command fails.
pub const ERROR_LABEL: &str = "Error";

/// How a navigation run ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user picked "Exit", cancelled the picker or submitted empty input.
    Exited,
    /// The selection resolved to nothing runnable.
    Skipped,
    Executed { command: String, output: String },
}

#[derive(Debug, Error)]
pub enum NavigationError {
    /// A command failed. The failure has already been shown through the
    /// picker; the run must end.
    #[error("command `{}` failed: {}", .0.command, .0.message)]
    Execution(ExecError),
    #[error(transparent)]
    Picker(#[from] PickerError),
}

impl NavigationError {
    pub fn is_fatal_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }
}

/// Walks a command tree through a [`Picker`], running leaves with an
/// [`Executor`].
///
/// Every call frame asks the picker exactly once and runs at most one
/// command before recursing or returning. The tree is only borrowed; values
/// captured by prompts and lists are bound into copies of the children.
pub struct Navigator<P, E> {
    picker: P,
    executor: E,
}

impl<P: Picker, E: Executor> Navigator<P, E> {
    pub fn new(picker: P, executor: E) -> Self {
        Self { picker, executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_parts(self) -> (P, E) {
        (self.picker, self.executor)
    }

    pub fn run(&mut self, tree: &CommandTree, label: &str) -> Result<Outcome, NavigationError> {
        self.navigate(tree.commands(), label)
    }

    pub fn navigate(
        &mut self,
        commands: &[Command],
        breadcrumb: &str,
    ) -> Result<Outcome, NavigationError> {
        let mut options: Vec<String> = commands
            .iter()
            .map(|command| command.name.clone())
            .collect();
        options.push(EXIT_OPTION.to_string());

        let Some(choice) = self.choose(breadcrumb, &options)? else {
            return Ok(Outcome::Exited);
        };
        let Some(selected) = commands.iter().find(|command| command.name == choice) else {
            debug!(%choice, "selection matches no command");
            return Ok(Outcome::Skipped);
        };

        let kind = selected.kind();
        debug!(name = %selected.name, kind = kind.label(), "selected command");
        match kind {
            NodeKind::Prompt(_) => self.navigate_prompt(selected, breadcrumb),
            NodeKind::List(_) => self.navigate_list(selected, breadcrumb),
            NodeKind::Submenu(children) => {
                self.navigate(children, &extend(breadcrumb, &selected.name))
            }
            NodeKind::Exec(cmd) => self.execute(cmd),
            NodeKind::Empty => Ok(Outcome::Skipped),
        }
    }

    fn navigate_prompt(
        &mut self,
        command: &Command,
        breadcrumb: &str,
    ) -> Result<Outcome, NavigationError> {
        let label = format!("{breadcrumb} > {} > {}", command.name, command.prompt);
        let Some(input) = self.choose(&label, &[])? else {
            return Ok(Outcome::Exited);
        };
        self.descend_with(command, breadcrumb, &input)
    }

    fn navigate_list(
        &mut self,
        command: &Command,
        breadcrumb: &str,
    ) -> Result<Outcome, NavigationError> {
        let output = self.run_command(&command.list)?;
        let mut items = list_items(&output);
        items.push(EXIT_OPTION.to_string());

        let Some(item) = self.choose(&extend(breadcrumb, &command.name), &items)? else {
            return Ok(Outcome::Exited);
        };
        self.descend_with(command, breadcrumb, &item)
    }

    /// Continues below a prompt or list node once `value` has been captured.
    fn descend_with(
        &mut self,
        command: &Command,
        breadcrumb: &str,
        value: &str,
    ) -> Result<Outcome, NavigationError> {
        if !command.commands.is_empty() {
            let children = bind_children(&command.commands, value);
            self.navigate(&children, &extend(breadcrumb, &command.name))
        } else if !command.cmd.is_empty() {
            self.execute(&substitute(&command.cmd, value))
        } else {
            Ok(Outcome::Skipped)
        }
    }

    /// Asks the picker, folding cancellation, empty answers and "Exit" into
    /// `None`.
    fn choose(&mut self, label: &str, options: &[String]) -> Result<Option<String>, PickerError> {
        match self.picker.pick(label, options)? {
            Selection::Chosen(choice) if !choice.is_empty() && choice != EXIT_OPTION => {
                Ok(Some(choice))
            }
            Selection::Chosen(_) | Selection::Cancelled => {
                debug!(label, "navigation ended by user");
                Ok(None)
            }
        }
    }

    fn execute(&mut self, command: &str) -> Result<Outcome, NavigationError> {
        let output = self.run_command(command)?;
        Ok(Outcome::Executed {
            command: command.to_string(),
            output,
        })
    }

    fn run_command(&mut self, command: &str) -> Result<String, NavigationError> {
        match self.executor.run(command) {
            Ok(output) => Ok(output),
            Err(err) => {
                error!(command, error = %err.message, "command failed");
                let options = vec![format!("Error: {}", err.message), EXIT_OPTION.to_string()];
                if let Err(picker_err) = self.picker.pick(ERROR_LABEL, &options) {
                    warn!(error = %picker_err, "could not show command failure");
                }
                Err(NavigationError::Execution(err))
            }
        }
    }
}

fn extend(breadcrumb: &str, name: &str) -> String {
    format!("{breadcrumb} > {name}")
}

/// Splits list command output into picker options, dropping blank lines.
pub fn list_items(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests;
