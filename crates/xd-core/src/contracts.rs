use thiserror::Error;

/// Result of a single picker interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Chosen(String),
    Cancelled,
}

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("failed to launch picker `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("picker `{program}` failed: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Interactive selection surface.
///
/// A non-empty `options` slice asks the user to choose one entry; an empty
/// slice asks for free text. Blocks until the user answers or cancels.
pub trait Picker {
    fn pick(&mut self, label: &str, options: &[String]) -> Result<Selection, PickerError>;
}

/// Failure text of a shell command that exited unsuccessfully or could not
/// be started.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ExecError {
    pub command: String,
    pub message: String,
}

/// Runs shell command lines synchronously, returning their combined output.
pub trait Executor {
    fn run(&mut self, command: &str) -> Result<String, ExecError>;
}
