use std::path::{Path, PathBuf};

use tracing::info;

use crate::database::archive::Archive;
use crate::error::{ArchiveError, Result};

/// Owns the archive for one browsing session: loaded on first use, then
/// shared by every lookup until reloaded.
pub struct Session {
    path: PathBuf,
    archive: Option<Archive>,
}

impl Session {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            archive: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_initialized(&self) -> bool {
        self.archive.is_some()
    }

    /// Loads the image unless it is already loaded.
    pub fn init(&mut self) -> Result<&Archive> {
        if self.archive.is_none() {
            info!("Initializing archive session from {:?}", self.path);
            self.archive = Some(Archive::load(&self.path)?);
        }
        self.get()
    }

    /// Discards the loaded image and loads it again.
    pub fn reload(&mut self) -> Result<&Archive> {
        self.archive = None;
        self.init()
    }

    pub fn get(&self) -> Result<&Archive> {
        self.archive.as_ref().ok_or(ArchiveError::NotInitialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::schema::SCHEMA;
    use rusqlite::Connection;

    #[test]
    fn test_get_before_init_is_not_initialized() {
        let session = Session::new("kulturperler.db");
        assert!(matches!(session.get(), Err(ArchiveError::NotInitialized)));
        assert!(!session.is_initialized());
    }

    #[test]
    fn test_init_is_idempotent() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("kulturperler.db");
        Connection::open(&path)?.execute_batch(SCHEMA)?;

        let mut session = Session::new(&path);
        let first = session.init()?.fingerprint().map(str::to_owned);
        std::fs::remove_file(&path)?;

        // Already loaded, so the missing file is not touched again.
        let second = session.init()?.fingerprint().map(str::to_owned);
        assert_eq!(first, second);
        assert!(session.get().is_ok());
        Ok(())
    }

    #[test]
    fn test_failed_reload_leaves_session_uninitialized() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("kulturperler.db");
        Connection::open(&path)?.execute_batch(SCHEMA)?;

        let mut session = Session::new(&path);
        session.init()?;
        std::fs::remove_file(&path)?;

        assert!(session.reload().is_err());
        assert!(matches!(session.get(), Err(ArchiveError::NotInitialized)));
        Ok(())
    }
}
