use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

/// A saved snippet that can be inserted into the prompt input.
///
/// `id` is assigned once at creation and never changes; `name` is the label
/// the picker matches against; `command` is the text payload that replaces
/// the input content on selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    pub id: String,
    pub name: String,
    pub command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode command set: {0}")]
    Encode(#[from] serde_json::Error),
}

/// File-backed command set. The whole set is kept in memory for display and
/// rewritten as one JSON document on every mutation.
pub struct CommandStore {
    path: PathBuf,
    commands: Vec<Command>,
}

impl CommandStore {
    /// Opens the store, falling back to the built-in default set when the
    /// file is missing or unreadable. Failures never reach the user here.
    pub fn open(path: PathBuf) -> Self {
        let commands = read_commands(&path);
        Self { path, commands }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Appends a command and persists the full set. A failed write is logged
    /// and swallowed; the in-memory set keeps the new entry either way.
    pub fn append(&mut self, command: Command) {
        self.commands.push(command);
        self.flush();
    }

    /// Removes the command with the given id, persists the filtered set, and
    /// re-reads the file so the in-memory set matches what is on disk.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.commands.len();
        self.commands.retain(|command| command.id != id);
        if self.commands.len() == before {
            return false;
        }
        self.flush();
        self.reload();
        true
    }

    /// Replaces the in-memory set with whatever is currently persisted.
    pub fn reload(&mut self) {
        self.commands = read_commands(&self.path);
    }

    fn flush(&self) {
        if let Err(err) = write_commands(&self.path, &self.commands) {
            error!(path = %self.path.display(), %err, "failed to persist command set");
        }
    }

    /// Produces an opaque token unique enough to never collide in one store.
    pub fn generate_id() -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Location of the command file unless overridden on the command line.
pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snip")
        .join("commands.json")
}

fn read_commands(path: &Path) -> Vec<Command> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return default_commands(),
        Err(err) => {
            warn!(path = %path.display(), %err, "failed to read command file, using defaults");
            return default_commands();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(commands) => commands,
        Err(err) => {
            warn!(path = %path.display(), %err, "malformed command file, using defaults");
            default_commands()
        }
    }
}

fn write_commands(path: &Path, commands: &[Command]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StoreError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let encoded = serde_json::to_string_pretty(commands)?;
    fs::write(path, encoded).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn default_commands() -> Vec<Command> {
    vec![
        Command {
            id: CommandStore::generate_id(),
            name: "RefactorCode".to_string(),
            command: "Act like a software developer. Improve the following code.".to_string(),
            description: Some(
                "Refactors the following snippet to improve its quality and readability."
                    .to_string(),
            ),
        },
        Command {
            id: CommandStore::generate_id(),
            name: "CheckSpelling".to_string(),
            command: "Act like an English teacher. Check and correct the spelling in the given text."
                .to_string(),
            description: Some("Checks and corrects spelling errors in the text.".to_string()),
        },
        Command {
            id: CommandStore::generate_id(),
            name: "OptimizePerformance".to_string(),
            command: "Act like a performance expert. Optimize the following code for better performance."
                .to_string(),
            description: Some(
                "Analyzes the code for potential performance optimizations.".to_string(),
            ),
        },
    ]
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod store_tests;
