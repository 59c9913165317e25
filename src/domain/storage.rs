use super::{Leaderboard, Restaurant, StandingsManifest};
use crate::error::Result;

/// Where snapshots come from and where computed standings go.
pub trait Storage: Send + Sync {
    fn load_restaurants(&self) -> Result<Vec<Restaurant>>;
    fn save_manifest(&self, manifest: &StandingsManifest) -> Result<()>;
    fn save_leaderboard(&self, name: &str, leaderboard: &Leaderboard) -> Result<()>;
}

pub struct StorageKeys;

impl StorageKeys {
    pub const LEADERBOARDS_DIR: &'static str = "leaderboards";

    pub const MANIFEST: &'static str = "standings";
}
