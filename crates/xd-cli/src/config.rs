//! Locating, bootstrapping and reading the YAML menu files.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;
use tracing::warn;
use xd_core::command::Command;

/// Written as `xd.yaml` the first time the config directory is created.
pub const DEFAULT_CONFIG: &str = "\
- name: System
  commands:
    - name: Reboot
      cmd: reboot
    - name: Shutdown
      cmd: shutdown now
    - name: Suspend
      cmd: systemctl suspend
";

const DEFAULT_CONFIG_FILE: &str = "xd.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to resolve the home directory")]
    NoHome,
    #[error("failed to create config dir {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write default config file {}: {source}", .path.display())]
    WriteDefault {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not read config dir {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to load config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Loads the menu.
///
/// An explicit `path` is read on its own. Otherwise every `*.yaml` file in
/// the config directory is read and concatenated. `command` narrows each
/// file to the children of its matching top-level command.
pub fn load_config(
    path: Option<&Path>,
    command: Option<&str>,
) -> Result<Vec<Command>, ConfigError> {
    match path {
        Some(path) => read_config(path, command),
        None => load_dir(&config_dir()?, command),
    }
}

/// `$XDG_CONFIG_HOME/xd`, falling back to `~/.config/xd`.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    resolve_config_dir(std::env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())
}

fn resolve_config_dir(
    xdg_config_home: Option<OsString>,
    home: Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    let base = match xdg_config_home.filter(|value| !value.is_empty()) {
        Some(value) => PathBuf::from(value),
        None => home.ok_or(ConfigError::NoHome)?.join(".config"),
    };
    Ok(base.join("xd"))
}

/// Reads every `*.yaml` file in `dir` in file-name order.
///
/// A missing `dir` is created with the default menu. Files that fail to
/// load are skipped with a warning.
pub fn load_dir(dir: &Path, command: Option<&str>) -> Result<Vec<Command>, ConfigError> {
    if !dir.exists() {
        bootstrap_dir(dir)?;
    }

    let entries = fs::read_dir(dir).map_err(|source| ConfigError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "yaml"))
        .collect();
    files.sort();

    let mut commands = Vec::new();
    for file in files {
        match read_config(&file, command) {
            Ok(found) => commands.extend(found),
            Err(err) => warn!(file = %file.display(), error = %err, "skipping config file"),
        }
    }
    Ok(commands)
}

fn bootstrap_dir(dir: &Path) -> Result<(), ConfigError> {
    fs::create_dir_all(dir).map_err(|source| ConfigError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(DEFAULT_CONFIG_FILE);
    fs::write(&path, DEFAULT_CONFIG).map_err(|source| ConfigError::WriteDefault {
        path: path.clone(),
        source,
    })?;
    debug!(path = %path.display(), "wrote default config");
    Ok(())
}

/// Parses one YAML file into its top-level commands.
///
/// With `command`, returns the children of the first top-level command whose
/// name matches case-insensitively and that has children, or nothing.
pub fn read_config(path: &Path, command: Option<&str>) -> Result<Vec<Command>, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let commands: Vec<Command> = if text.trim().is_empty() {
        Vec::new()
    } else {
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?
    };

    let Some(wanted) = command.filter(|name| !name.is_empty()) else {
        return Ok(commands);
    };
    let wanted = wanted.to_lowercase();
    Ok(commands
        .into_iter()
        .find(|candidate| {
            candidate.name.to_lowercase() == wanted && !candidate.commands.is_empty()
        })
        .map(|candidate| candidate.commands)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const NETWORK: &str = "
- name: Network
  commands:
    - name: Wifi
      list: nmcli -t -f ssid dev wifi
      cmd: nmcli dev wifi connect $selected
";

    fn names(commands: &[Command]) -> Vec<&str> {
        commands.iter().map(|command| command.name.as_str()).collect()
    }

    #[test]
    fn missing_dir_is_bootstrapped_with_the_default_menu() {
        let root = tempfile::tempdir().expect("tempdir");
        let dir = root.path().join("xd");

        let commands = load_dir(&dir, None).expect("load");

        assert_eq!(
            fs::read_to_string(dir.join("xd.yaml")).expect("default file"),
            DEFAULT_CONFIG
        );
        assert_eq!(names(&commands), vec!["System"]);
        assert_eq!(
            names(&commands[0].commands),
            vec!["Reboot", "Shutdown", "Suspend"]
        );
    }

    #[test]
    fn yaml_files_are_merged_in_name_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("b.yaml"), NETWORK).expect("write b");
        fs::write(dir.path().join("a.yaml"), DEFAULT_CONFIG).expect("write a");
        fs::write(dir.path().join("notes.txt"), "- name: Ignored\n").expect("write txt");
        fs::create_dir(dir.path().join("dir.yaml")).expect("mkdir");

        let commands = load_dir(dir.path(), None).expect("load");

        assert_eq!(names(&commands), vec!["System", "Network"]);
    }

    #[test]
    fn broken_files_are_skipped() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("a.yaml"), "name: [unclosed").expect("write a");
        fs::write(dir.path().join("b.yaml"), NETWORK).expect("write b");

        let commands = load_dir(dir.path(), None).expect("load");

        assert_eq!(names(&commands), vec!["Network"]);
    }

    #[test]
    fn explicit_file_errors_are_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            load_config(Some(&missing), None),
            Err(ConfigError::Read { .. })
        ));

        let broken = dir.path().join("broken.yaml");
        fs::write(&broken, "- name: [").expect("write");
        assert!(matches!(
            load_config(Some(&broken), None),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn command_filter_selects_children_case_insensitively() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("menu.yaml");
        fs::write(&path, format!("{DEFAULT_CONFIG}{NETWORK}")).expect("write");

        let network = read_config(&path, Some("network")).expect("read");
        assert_eq!(names(&network), vec!["Wifi"]);
        assert_eq!(network[0].cmd, "nmcli dev wifi connect $selected");

        assert!(read_config(&path, Some("Wifi")).expect("read").is_empty());
        assert_eq!(names(&read_config(&path, Some("")).expect("read")), vec!["System", "Network"]);
    }

    #[test]
    fn empty_file_has_no_commands() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("empty.yaml");
        fs::write(&path, "\n").expect("write");

        assert!(read_config(&path, None).expect("read").is_empty());
    }

    #[test]
    fn config_dir_prefers_xdg_config_home() {
        assert_eq!(
            resolve_config_dir(Some("/xdg".into()), Some("/home/u".into())).expect("dir"),
            PathBuf::from("/xdg/xd")
        );
        assert_eq!(
            resolve_config_dir(Some("".into()), Some("/home/u".into())).expect("dir"),
            PathBuf::from("/home/u/.config/xd")
        );
        assert!(matches!(
            resolve_config_dir(None, None),
            Err(ConfigError::NoHome)
        ));
    }
}
