//! Audio domain — fire-and-forget playback of sound ids.
//!
//! Other domains emit `PlaySfxEvent`/`PlayMusicEvent` and never learn
//! whether playback happened; an unknown id is logged and skipped so a
//! missing sound can never interrupt the simulation.

use bevy::audio::Volume;
use bevy::prelude::*;

use crate::config::GameConfig;
use crate::shared::*;

pub struct AudioPlugin;

impl Plugin for AudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MusicState>()
            .add_systems(OnEnter(GameState::Playing), start_game_music)
            .add_systems(Update, (handle_play_sfx, handle_play_music));
    }
}

/// Tracks the currently playing music entity.
#[derive(Resource, Default)]
pub struct MusicState {
    pub current_track: Option<Entity>,
    pub current_track_id: String,
}

/// Maps SFX ids (sent by other domains) to audio file paths.
fn sfx_path(sfx_id: &str) -> Option<&'static str> {
    match sfx_id {
        "hoe" => Some("audio/hoe.ogg"),
        "water" => Some("audio/water.ogg"),
        "plant" => Some("audio/plant.ogg"),
        "pickup" => Some("audio/success.ogg"),
        _ => None,
    }
}

/// Maps music track ids to audio file paths.
fn music_path(track_id: &str) -> Option<&'static str> {
    match track_id {
        "meadow" => Some("audio/music.ogg"),
        "rain" => Some("audio/rain.ogg"),
        _ => None,
    }
}

/// Spawn one-shot audio sources that auto-despawn.
pub fn handle_play_sfx(
    mut events: EventReader<PlaySfxEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    for event in events.read() {
        match sfx_path(&event.sfx_id) {
            Some(path) => {
                commands.spawn((
                    AudioPlayer::new(asset_server.load(path)),
                    PlaybackSettings::DESPAWN.with_volume(Volume::new(config.audio.sfx_volume)),
                ));
            }
            None => {
                warn!("[Audio] Unknown sfx id '{}'", event.sfx_id);
            }
        }
    }
}

/// Stop the current music track and start the requested one.
pub fn handle_play_music(
    mut events: EventReader<PlayMusicEvent>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
    mut music_state: ResMut<MusicState>,
) {
    for event in events.read() {
        if music_state.current_track_id == event.track_id {
            continue;
        }

        if let Some(entity) = music_state.current_track.take() {
            commands.entity(entity).despawn();
        }
        music_state.current_track_id.clear();

        match music_path(&event.track_id) {
            Some(path) => {
                let entity = commands
                    .spawn((
                        AudioPlayer::new(asset_server.load(path)),
                        PlaybackSettings::LOOP
                            .with_volume(Volume::new(config.audio.music_volume)),
                    ))
                    .id();
                music_state.current_track = Some(entity);
                music_state.current_track_id = event.track_id.clone();
            }
            None => {
                warn!("[Audio] Unknown music id '{}'", event.track_id);
            }
        }
    }
}

fn start_game_music(music_state: Res<MusicState>, mut music_events: EventWriter<PlayMusicEvent>) {
    // Skip if something is already playing (Shop -> Playing flips).
    if music_state.current_track.is_some() {
        return;
    }
    music_events.send(PlayMusicEvent {
        track_id: "meadow".to_string(),
    });
}
