//! Runtime configuration loaded from `assets/settings.ron`.
//!
//! The file is optional: a missing or malformed file logs a warning and the
//! game runs on defaults. Nothing here is hot-reloaded; the file is read
//! once at startup.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const SETTINGS_PATH: &str = "assets/settings.ron";

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .add_systems(Startup, load_config);
    }
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub audio: AudioConfig,
    pub gameplay: GameplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub sfx_volume: f32,
    pub music_volume: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Player speed in world pixels per second.
    pub player_speed: f32,
    /// Delay between pressing the use key and the tool landing.
    pub tool_use_ms: u64,
    /// Debounce for the tool/seed cycling keys.
    pub switch_cooldown_ms: u64,
    /// Chance each morning that the new day is rainy, in [0, 1].
    pub rain_chance: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            gameplay: GameplayConfig::default(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sfx_volume: 0.3,
            music_volume: 0.5,
        }
    }
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            player_speed: 72.0,
            tool_use_ms: 350,
            switch_cooldown_ms: 200,
            rain_chance: 0.3,
        }
    }
}

impl GameConfig {
    /// Parse a settings file's contents, clamping values into sane ranges.
    pub fn from_ron(contents: &str) -> Result<Self, ron::error::SpannedError> {
        let mut config: GameConfig = ron::from_str(contents)?;
        config.sanitize();
        Ok(config)
    }

    fn sanitize(&mut self) {
        self.audio.sfx_volume = self.audio.sfx_volume.clamp(0.0, 1.0);
        self.audio.music_volume = self.audio.music_volume.clamp(0.0, 1.0);
        self.gameplay.rain_chance = self.gameplay.rain_chance.clamp(0.0, 1.0);
        self.gameplay.player_speed = self.gameplay.player_speed.max(0.0);
    }
}

/// Read the settings file into the already-initialised GameConfig resource.
fn load_config(mut config: ResMut<GameConfig>) {
    match std::fs::read_to_string(SETTINGS_PATH) {
        Ok(contents) => match GameConfig::from_ron(&contents) {
            Ok(parsed) => {
                *config = parsed;
                info!("[Config] Loaded {}", SETTINGS_PATH);
            }
            Err(err) => {
                warn!(
                    "[Config] Failed to parse {} ({}); using defaults",
                    SETTINGS_PATH, err
                );
            }
        },
        Err(_) => {
            info!("[Config] No {} found; using defaults", SETTINGS_PATH);
        }
    }
}
