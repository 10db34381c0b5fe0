use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{error, warn};

use crate::session::{SessionError, SessionState};

/// File-backed persistence for the session. Writes go through a temp file in
/// the same directory so a crash never leaves a half-written session behind.
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the persisted session. A missing file means signed out; an
    /// unreadable one is discarded.
    pub fn load(&self) -> SessionState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return SessionState::default(),
            Err(e) => {
                warn!("Could not read session file {}: {e}", self.path.display());
                return SessionState::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(e) => {
                error!(
                    "Stored session at {} is unreadable, discarding it: {e}",
                    self.path.display()
                );
                if let Err(e) = fs::remove_file(&self.path) {
                    warn!("Could not remove unreadable session file: {e}");
                }
                SessionState::default()
            }
        }
    }

    pub fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut file = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut file, state)?;
        file.flush()?;
        file.persist(&self.path)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
