//! Player entity setup.

use bevy::prelude::*;

use crate::config::GameConfig;
use crate::shared::*;
use crate::world::maps;
use super::{player_hitbox, PlayerSpriteData, PLAYER_SPRITE_SIZE};

/// Load the character sheet handles once.
/// Layout: 4 columns × 8 rows of 16×24 frames — walk rows for
/// down/up/left/right, then action rows in the same facing order.
pub fn load_sprite_data(
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut sprites: ResMut<PlayerSpriteData>,
) {
    if sprites.loaded {
        return;
    }
    sprites.image = asset_server.load("sprites/character.png");
    sprites.layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::new(16, 24),
        4,
        8,
        None,
        None,
    ));
    sprites.loaded = true;
}

/// Spawn the player at the map's spawn tile.
/// Runs once on `OnEnter(GameState::Playing)`.
pub fn spawn_player(
    mut commands: Commands,
    config: Res<GameConfig>,
    sprites: Res<PlayerSpriteData>,
    existing: Query<Entity, With<Player>>,
) {
    // Guard: don't double-spawn when returning to Playing state.
    if !existing.is_empty() {
        return;
    }

    let map = maps::farm_map();
    let (spawn_x, spawn_y) = map.spawn;
    let world = Vec2::new(
        (spawn_x as f32 + 0.5) * TILE_SIZE,
        (spawn_y as f32 + 0.5) * TILE_SIZE,
    );

    commands.spawn((
        Player,
        PlayerMovement {
            speed: config.gameplay.player_speed,
            ..default()
        },
        PlayerTimers::from_millis(
            config.gameplay.tool_use_ms,
            config.gameplay.switch_cooldown_ms,
        ),
        PlayerAnimation::default(),
        player_hitbox(),
        Sprite {
            image: sprites.image.clone(),
            texture_atlas: Some(TextureAtlas {
                layout: sprites.layout.clone(),
                index: 0,
            }),
            custom_size: Some(PLAYER_SPRITE_SIZE),
            ..default()
        },
        Transform::from_translation(world.extend(Z_PLAYER)),
    ));

    info!("[Player] Spawned at tile ({}, {})", spawn_x, spawn_y);
}
