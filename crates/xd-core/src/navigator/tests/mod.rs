use std::collections::HashMap;
use std::collections::VecDeque;

pub(super) use super::list_items;
pub(super) use super::NavigationError;
pub(super) use super::Navigator;
pub(super) use super::Outcome;
pub(super) use super::ERROR_LABEL;
pub(super) use crate::command::Command;
pub(super) use crate::command::CommandTree;
pub(super) use crate::command::EXIT_OPTION;
pub(super) use crate::contracts::ExecError;
pub(super) use crate::contracts::Executor;
pub(super) use crate::contracts::Picker;
pub(super) use crate::contracts::PickerError;
pub(super) use crate::contracts::Selection;


/// Answers picker calls from a queue and records every prompt it was shown.
/// Once the queue is drained it cancels.
#[derive(Debug, Default)]
struct ScriptedPicker {
    answers: VecDeque<Selection>,
    shown: Vec<(String, Vec<String>)>,
}

impl Picker for ScriptedPicker {
    fn pick(&mut self, label: &str, options: &[String]) -> Result<Selection, PickerError> {
        self.shown.push((label.to_string(), options.to_vec()));
        Ok(self.answers.pop_front().unwrap_or(Selection::Cancelled))
    }
}

/// Records every command it is asked to run. Commands without a canned
/// result succeed with empty output.
#[derive(Debug, Default)]
struct RecordingExecutor {
    results: HashMap<String, Result<String, String>>,
    ran: Vec<String>,
}

impl RecordingExecutor {
    fn with_output(mut self, command: &str, output: &str) -> Self {
        self.results
            .insert(command.to_string(), Ok(output.to_string()));
        self
    }

    fn with_failure(mut self, command: &str, message: &str) -> Self {
        self.results
            .insert(command.to_string(), Err(message.to_string()));
        self
    }
}

impl Executor for RecordingExecutor {
    fn run(&mut self, command: &str) -> Result<String, ExecError> {
        self.ran.push(command.to_string());
        match self.results.get(command) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(message)) => Err(ExecError {
                command: command.to_string(),
                message: message.clone(),
            }),
            None => Ok(String::new()),
        }
    }
}

fn chosen(value: &str) -> Selection {
    Selection::Chosen(value.to_string())
}

fn navigator(
    answers: Vec<Selection>,
    executor: RecordingExecutor,
) -> Navigator<ScriptedPicker, RecordingExecutor> {
    let picker = ScriptedPicker {
        answers: answers.into(),
        shown: Vec::new(),
    };
    Navigator::new(picker, executor)
}

fn options(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn system_tree() -> CommandTree {
    CommandTree::new(vec![Command::new("System").with_commands(vec![
        Command::new("Reboot").with_cmd("reboot"),
        Command::new("Shutdown").with_cmd("shutdown now"),
    ])])
    .expect("valid tree")
}

fn run_tree(
    tree: &CommandTree,
    answers: Vec<Selection>,
    executor: RecordingExecutor,
) -> (
    Result<Outcome, NavigationError>,
    ScriptedPicker,
    RecordingExecutor,
) {
    let mut navigator = navigator(answers, executor);
    let result = navigator.run(tree, "xd");
    let (picker, executor) = navigator.into_parts();
    (result, picker, executor)
}
