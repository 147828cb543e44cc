use crate::command::Command;

/// Marker replaced with the value captured by a prompt or list selection.
pub const PLACEHOLDER: &str = "$selected";

pub fn substitute(template: &str, value: &str) -> String {
    template.replace(PLACEHOLDER, value)
}

/// Copies `children` with `value` bound into their templates.
///
/// Only the immediate children are rewritten; grandchildren keep their
/// placeholders until their own parent captures a value. Each copy's `list`
/// is overwritten with the substituted `cmd`, matching the launcher's
/// long-standing behavior, so a child's own `list` template does not survive.
pub fn bind_children(children: &[Command], value: &str) -> Vec<Command> {
    children
        .iter()
        .map(|child| {
            let cmd = substitute(&child.cmd, value);
            Command {
                name: child.name.clone(),
                list: cmd.clone(),
                cmd,
                prompt: child.prompt.clone(),
                commands: child.commands.clone(),
            }
        })
        .collect()
}
