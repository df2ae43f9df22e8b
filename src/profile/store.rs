//! Durable storage for profile snapshots.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::model::ProfileSnapshot;
use crate::cache::{StoreError, StoreResult};

/// Loads and saves the whole profile snapshot. Saves are last-write-wins.
pub trait ProfileStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = StoreResult<ProfileSnapshot>> + Send;

    fn save(
        &self,
        snapshot: &ProfileSnapshot,
    ) -> impl std::future::Future<Output = StoreResult<()>> + Send;
}

/// Two JSON files: one for preferences, one for interaction histories.
///
/// Missing files are created as `{}` on load. Writes go through a temporary
/// file in the same directory and are renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    profile_path: PathBuf,
    interactions_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(profile_path: impl Into<PathBuf>, interactions_path: impl Into<PathBuf>) -> Self {
        Self {
            profile_path: profile_path.into(),
            interactions_path: interactions_path.into(),
        }
    }

    pub fn profile_path(&self) -> &Path {
        &self.profile_path
    }

    pub fn interactions_path(&self) -> &Path {
        &self.interactions_path
    }

    fn load_blocking(&self) -> StoreResult<ProfileSnapshot> {
        Ok(ProfileSnapshot {
            profiles: read_or_init(&self.profile_path)?,
            interactions: read_or_init(&self.interactions_path)?,
        })
    }

    fn save_blocking(&self, snapshot: &ProfileSnapshot) -> StoreResult<()> {
        write_atomic(&self.profile_path, &snapshot.profiles)?;
        write_atomic(&self.interactions_path, &snapshot.interactions)?;
        Ok(())
    }
}

impl ProfileStore for JsonFileStore {
    async fn load(&self) -> StoreResult<ProfileSnapshot> {
        let this = self.clone();
        let snapshot = tokio::task::spawn_blocking(move || this.load_blocking())
            .await
            .map_err(|e| StoreError::Unavailable {
                reason: format!("profile load task failed: {e}"),
            })??;

        info!(
            profiles = snapshot.profiles.len(),
            users_with_interactions = snapshot.interactions.len(),
            "Loaded user profiles"
        );
        Ok(snapshot)
    }

    async fn save(&self, snapshot: &ProfileSnapshot) -> StoreResult<()> {
        let this = self.clone();
        let snapshot = snapshot.clone();
        tokio::task::spawn_blocking(move || this.save_blocking(&snapshot))
            .await
            .map_err(|e| StoreError::Unavailable {
                reason: format!("profile save task failed: {e}"),
            })?
    }
}

fn read_or_init<T: DeserializeOwned + Default + Serialize>(path: &Path) -> StoreResult<T> {
    if !path.exists() {
        debug!(path = %path.display(), "Creating empty profile file");
        let empty = T::default();
        write_atomic(path, &empty)?;
        return Ok(empty);
    }

    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn write_atomic<T: Serialize>(path: &Path, value: &T) -> StoreResult<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

/// Keeps the snapshot in process memory only.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    snapshot: Mutex<ProfileSnapshot>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: ProfileSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }

    /// Returns a copy of what was last saved.
    pub fn snapshot(&self) -> ProfileSnapshot {
        self.snapshot.lock().clone()
    }
}

impl ProfileStore for MemoryProfileStore {
    async fn load(&self) -> StoreResult<ProfileSnapshot> {
        Ok(self.snapshot.lock().clone())
    }

    async fn save(&self, snapshot: &ProfileSnapshot) -> StoreResult<()> {
        *self.snapshot.lock() = snapshot.clone();
        Ok(())
    }
}
