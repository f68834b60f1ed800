//! Profile persistence with file locking.
//!
//! The profile slot survives restarts as a small JSON file. Writes are
//! atomic (temp file + fsync + rename) and corrupt or missing files load
//! as an absent profile rather than an error.

use crate::{Error, ProfileStore, Result};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl ProfileStore {
    /// Load the persisted profile slot with shared locking
    ///
    /// Returns an empty store if the file doesn't exist. If the file is
    /// corrupted, logs a warning and returns an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No profile file found, starting with empty slot");
            return Ok(Self::default());
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open profile file {:?}: {}. Using empty slot.", path, e);
                return Ok(Self::default());
            }
        };

        // Acquire shared lock for reading
        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock profile file {:?}: {}. Using empty slot.", path, e);
            return Ok(Self::default());
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read profile file {:?}: {}. Using empty slot.", path, e);
            return Ok(Self::default());
        }

        file.unlock()?;

        match serde_json::from_str::<ProfileStore>(&contents) {
            Ok(store) => {
                tracing::debug!("Loaded profile slot from {:?}", path);
                Ok(store)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse profile file {:?}: {}. Using empty slot.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save the profile slot to a file with exclusive locking
    ///
    /// Writes to a temp file in the same directory, syncs, then renames
    /// over the original so readers never observe a half-written slot.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "profile path missing parent")
        })?)?;

        // Exclusive lock serializes concurrent writers
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved profile slot to {:?}", path);
        Ok(())
    }
}
