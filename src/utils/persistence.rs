//! JSON profile saves under ~/.wayfarer/, one file per profile.
//!
//! Only the durable parts of a run are written: the player, the stage index,
//! and the lifetime counters. Transient combat state never hits disk, so a
//! load always lands at the start of the saved stage with the world rebuilt.

use crate::character::player::Player;
use crate::core::constants::{PLAYER_START_X, PROFILE_NAME_MAX_LENGTH, SAVE_FILE_VERSION};
use crate::core::game_state::{GamePhase, PlayStats, SimulationState};
use crate::world::generator::repopulate;
use crate::world::types::stage_start_x;
use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// The on-disk shape of one profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    pub player: Player,
    pub stage_index: u32,
    pub play_stats: PlayStats,
    /// Unix timestamp of the save, for the profile picker.
    pub saved_at: i64,
}

impl SaveData {
    pub fn capture(state: &SimulationState) -> Self {
        SaveData {
            version: SAVE_FILE_VERSION,
            player: state.player.clone(),
            stage_index: state.world.stage_index,
            play_stats: state.play_stats.clone(),
            saved_at: Utc::now().timestamp(),
        }
    }

    /// Rebuild a running simulation from this profile. The stage is
    /// regenerated from scratch, so enemy layouts differ from the session
    /// that saved.
    pub fn restore(self, rng: &mut impl Rng) -> SimulationState {
        let mut state = SimulationState::new(&self.player.name);
        state.player = self.player;
        state.play_stats = self.play_stats;
        repopulate(&mut state.world, self.stage_index, state.now_ms, rng);
        state.player.x = stage_start_x(self.stage_index) + PLAYER_START_X;
        state.phase = GamePhase::Playing;
        state
    }
}

/// Summary of one save file for the profile picker.
#[derive(Debug, Clone)]
pub struct ProfileInfo {
    pub name: String,
    pub filename: String,
    pub level: u32,
    pub farthest_stage: u32,
    pub play_time_seconds: u64,
    pub saved_at: i64,
    pub is_corrupted: bool,
}

pub struct ProfileStore {
    save_dir: PathBuf,
}

impl ProfileStore {
    pub fn new() -> io::Result<Self> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        let save_dir = home_dir.join(".wayfarer");
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    /// A store rooted in a unique temporary directory.
    #[cfg(test)]
    fn new_for_test() -> io::Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

        let test_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
        let save_dir = std::env::temp_dir().join(format!("wayfarer-test-{}", test_id));
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    pub fn save(&self, state: &SimulationState) -> io::Result<()> {
        let data = SaveData::capture(state);
        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let filename = format!("{}.json", sanitize_name(&data.player.name));
        fs::write(self.save_dir.join(filename), json)?;
        Ok(())
    }

    /// Loads one profile. A file this build cannot parse, or one written by
    /// a newer build, is an error; nothing is salvaged from it.
    pub fn load(&self, filename: &str) -> io::Result<SaveData> {
        let json = fs::read_to_string(self.save_dir.join(filename))?;
        let data: SaveData = serde_json::from_str(&json)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if data.version > SAVE_FILE_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Save version {} is newer than this build supports",
                    data.version
                ),
            ));
        }
        Ok(data)
    }

    /// Every `.json` file in the save directory, most recently saved first.
    /// Unreadable files are listed as corrupted instead of being skipped, so
    /// the picker can offer to delete them.
    pub fn list_profiles(&self) -> io::Result<Vec<ProfileInfo>> {
        let mut profiles = Vec::new();

        for entry in fs::read_dir(&self.save_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let filename = path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_string();

            match self.load(&filename) {
                Ok(data) => profiles.push(ProfileInfo {
                    name: data.player.name,
                    filename,
                    level: data.player.level,
                    farthest_stage: data.play_stats.farthest_stage,
                    play_time_seconds: data.play_stats.play_time_seconds,
                    saved_at: data.saved_at,
                    is_corrupted: false,
                }),
                Err(_) => profiles.push(ProfileInfo {
                    name: "[CORRUPTED]".to_string(),
                    filename,
                    level: 0,
                    farthest_stage: 0,
                    play_time_seconds: 0,
                    saved_at: 0,
                    is_corrupted: true,
                }),
            }
        }

        profiles.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(profiles)
    }

    pub fn delete_profile(&self, filename: &str) -> io::Result<()> {
        fs::remove_file(self.save_dir.join(filename))?;
        Ok(())
    }
}

pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.chars().count() > PROFILE_NAME_MAX_LENGTH {
        return Err(format!(
            "Name must be {} characters or less",
            PROFILE_NAME_MAX_LENGTH
        ));
    }
    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');
    if !valid_chars {
        return Err(
            "Name can only contain letters, numbers, spaces, hyphens, and underscores".to_string(),
        );
    }
    Ok(())
}

pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}
