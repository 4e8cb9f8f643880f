use std::{
    fs, io,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use thiserror::Error;
use tracing::debug;

/// How the application waits for the host prompt file to become available.
#[derive(Clone, Debug)]
pub struct HostConfig {
    /// Delay between existence checks while polling.
    pub poll_interval: Duration,
    /// Number of checks before giving up.
    pub max_attempts: u32,
    /// When false, a missing file fails immediately instead of polling.
    pub wait: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(100),
            max_attempts: 50,
            wait: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum HostError {
    #[error("prompt file {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("gave up waiting for {} after {attempts} attempts", path.display())]
    Timeout { path: PathBuf, attempts: u32 },
    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Attaches to the host prompt file and returns its current contents.
///
/// A missing file is polled for up to `max_attempts` checks, or rejected
/// immediately when `wait` is off. Nothing else is ever retried.
pub fn attach(path: &Path, config: &HostConfig) -> Result<String, HostError> {
    let mut attempts: u32 = 0;
    while !path.exists() {
        if !config.wait {
            return Err(HostError::NotFound(path.to_path_buf()));
        }
        attempts += 1;
        if attempts >= config.max_attempts {
            return Err(HostError::Timeout {
                path: path.to_path_buf(),
                attempts,
            });
        }
        thread::sleep(config.poll_interval);
    }
    debug!(path = %path.display(), attempts, "attached to prompt file");
    fs::read_to_string(path).map_err(|source| HostError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the composed prompt back into the host file.
pub fn write_back(path: &Path, contents: &str) -> io::Result<()> {
    fs::write(path, contents)
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod host_tests;
