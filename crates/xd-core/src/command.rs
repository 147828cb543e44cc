use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

/// Synthetic option appended to every menu. Selecting it unwinds navigation.
pub const EXIT_OPTION: &str = "Exit";

/// A node of the launcher menu.
///
/// Every field other than `name` is optional; absence is an empty string or
/// an empty `commands` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Command {
    pub name: String,
    pub cmd: String,
    pub list: String,
    pub prompt: String,
    pub commands: Vec<Command>,
}

/// How a node behaves when it is selected.
///
/// Resolved from the first non-empty field in the order `prompt`, `list`,
/// `commands`, `cmd`; lower-precedence fields are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind<'a> {
    Prompt(&'a str),
    List(&'a str),
    Submenu(&'a [Command]),
    Exec(&'a str),
    Empty,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_cmd(mut self, cmd: impl Into<String>) -> Self {
        self.cmd = cmd.into();
        self
    }

    pub fn with_list(mut self, list: impl Into<String>) -> Self {
        self.list = list.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_commands(mut self, commands: Vec<Command>) -> Self {
        self.commands = commands;
        self
    }

    pub fn kind(&self) -> NodeKind<'_> {
        if !self.prompt.is_empty() {
            NodeKind::Prompt(&self.prompt)
        } else if !self.list.is_empty() {
            NodeKind::List(&self.list)
        } else if !self.commands.is_empty() {
            NodeKind::Submenu(&self.commands)
        } else if !self.cmd.is_empty() {
            NodeKind::Exec(&self.cmd)
        } else {
            NodeKind::Empty
        }
    }
}

impl NodeKind<'_> {
    pub fn label(self) -> &'static str {
        match self {
            Self::Prompt(_) => "prompt",
            Self::List(_) => "list",
            Self::Submenu(_) => "submenu",
            Self::Exec(_) => "exec",
            Self::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("command without a name under {parent}")]
    EmptyName { parent: String },
    #[error("duplicate command name `{name}` under {parent}")]
    DuplicateName { name: String, parent: String },
    #[error("command name `{name}` under {parent} collides with the exit option")]
    ReservedName { name: String, parent: String },
}

/// Validated root of a menu.
///
/// Sibling names are non-empty, unique and distinct from [`EXIT_OPTION`] at
/// every level, so a picker selection maps back to exactly one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandTree {
    commands: Vec<Command>,
}

impl CommandTree {
    pub fn new(commands: Vec<Command>) -> Result<Self, TreeError> {
        validate_siblings(&commands, "the menu root")?;
        Ok(Self { commands })
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

fn validate_siblings(commands: &[Command], parent: &str) -> Result<(), TreeError> {
    let mut seen = HashSet::new();
    for command in commands {
        if command.name.is_empty() {
            return Err(TreeError::EmptyName {
                parent: parent.to_string(),
            });
        }
        if command.name == EXIT_OPTION {
            return Err(TreeError::ReservedName {
                name: command.name.clone(),
                parent: parent.to_string(),
            });
        }
        if !seen.insert(command.name.as_str()) {
            return Err(TreeError::DuplicateName {
                name: command.name.clone(),
                parent: parent.to_string(),
            });
        }
        if !command.commands.is_empty() {
            validate_siblings(&command.commands, &format!("`{}`", command.name))?;
        }
    }
    Ok(())
}
