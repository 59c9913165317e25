use crate::domain::storage::{Storage, StorageKeys};
use crate::domain::{Leaderboard, Restaurant, StandingsManifest};
use crate::error::{Result, StandingsError};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the restaurant snapshot from a JSON file and writes standings as
/// pretty-printed JSON under a data directory.
#[derive(Clone)]
pub struct FileSystemStore {
    snapshot_path: PathBuf,
    data_dir: PathBuf,
    pretty: bool,
}

impl FileSystemStore {
    pub fn new(snapshot_path: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            data_dir: data_dir.into(),
            pretty: true,
        }
    }

    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    fn get_path_for_key(&self, key: &str, subdir: Option<&str>) -> PathBuf {
        if let Some(dir) = subdir {
            self.data_dir.join(dir).join(format!("{}.json", key))
        } else {
            self.data_dir.join(format!("{}.json", key))
        }
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    fn write_json_file<T: serde::Serialize + ?Sized>(
        &self,
        key: &str,
        subdir: Option<&str>,
        data: &T,
    ) -> Result<()> {
        match subdir {
            Some(dir) => self.ensure_dir(&self.data_dir.join(dir))?,
            None => self.ensure_dir(&self.data_dir)?,
        }

        let path = self.get_path_for_key(key, subdir);
        let content = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        fs::write(&path, content)?;
        debug!("Wrote {:?}", path);
        Ok(())
    }
}

impl Storage for FileSystemStore {
    fn load_restaurants(&self) -> Result<Vec<Restaurant>> {
        let content = fs::read_to_string(&self.snapshot_path)?;
        let value: Value = serde_json::from_str(&content)?;
        if !value.is_array() {
            return Err(StandingsError::InvalidSnapshot(format!(
                "{} must contain a JSON array of restaurants",
                self.snapshot_path.display()
            )));
        }
        Ok(serde_json::from_value(value)?)
    }

    fn save_manifest(&self, manifest: &StandingsManifest) -> Result<()> {
        self.write_json_file(StorageKeys::MANIFEST, None, manifest)
    }

    fn save_leaderboard(&self, name: &str, leaderboard: &Leaderboard) -> Result<()> {
        self.write_json_file(name, Some(StorageKeys::LEADERBOARDS_DIR), leaderboard)
    }
}
