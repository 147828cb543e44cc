use std::io::ErrorKind;
use std::io::Write;
use std::process::Command;
use std::process::Stdio;

use tracing::debug;
use xd_core::contracts::Picker;
use xd_core::contracts::PickerError;
use xd_core::contracts::Selection;

pub const DEFAULT_PICKER: &str = "dmenu";

/// Picker backed by a dmenu-compatible program.
///
/// The program gets `extra_args` followed by `-i -p <label>`. Options are
/// written newline-separated to its stdin; with no options stdin is empty,
/// which turns the program into a free-text prompt. A non-zero exit is read
/// as the user cancelling.
#[derive(Debug, Clone)]
pub struct DmenuPicker {
    program: String,
    extra_args: Vec<String>,
}

impl Default for DmenuPicker {
    fn default() -> Self {
        Self::new(DEFAULT_PICKER, Vec::new())
    }
}

impl DmenuPicker {
    pub fn new(program: impl Into<String>, extra_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            extra_args,
        }
    }

    fn command(&self, label: &str) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.extra_args).args(["-i", "-p", label]);
        command
    }
}

impl Picker for DmenuPicker {
    fn pick(&mut self, label: &str, options: &[String]) -> Result<Selection, PickerError> {
        let stdin = if options.is_empty() {
            Stdio::null()
        } else {
            Stdio::piped()
        };
        let mut child = self
            .command(label)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| PickerError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if let Some(mut input) = child.stdin.take() {
            if let Err(source) = input.write_all(options.join("\n").as_bytes()) {
                // The picker may exit before reading everything.
                if source.kind() != ErrorKind::BrokenPipe {
                    return Err(PickerError::Io {
                        program: self.program.clone(),
                        source,
                    });
                }
            }
        }

        let output = child.wait_with_output().map_err(|source| PickerError::Io {
            program: self.program.clone(),
            source,
        })?;
        if !output.status.success() {
            debug!(label, status = %output.status, "picker cancelled");
            return Ok(Selection::Cancelled);
        }
        let choice = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Selection::Chosen(choice))
    }
}
