//! Player domain — spawning, movement, tools, animation, interaction.
//!
//! The per-tick order is fixed and significant: action input, direction
//! input, status resolution, timer updates (which fire the tool effects),
//! movement with collision, animation, interaction. The chain below is
//! that order.

mod spawn;
pub mod movement;
pub mod tools;
pub mod animation;
pub mod interaction;
mod camera;

use bevy::prelude::*;

use crate::shared::*;

pub use movement::{resolve_horizontal, resolve_vertical, step_for};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerSpriteData>();

        app.add_systems(
            OnEnter(GameState::Playing),
            (spawn::load_sprite_data, spawn::spawn_player).chain(),
        );

        app.add_systems(
            Update,
            (
                tools::handle_action_input,
                movement::read_direction,
                animation::resolve_status,
                tools::update_timers,
                movement::apply_movement,
                animation::animate_player,
                interaction::handle_interact,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );

        app.add_systems(
            Update,
            camera::camera_follow_player.run_if(in_state(GameState::Playing)),
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Local resources (player-domain only)
// ═══════════════════════════════════════════════════════════════════════

/// Character spritesheet handles, loaded once on entering Playing.
/// Rendering falls back to the placeholder tint until the sheet is in.
#[derive(Resource, Default)]
pub struct PlayerSpriteData {
    pub loaded: bool,
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
}

/// Visual sprite size. The hitbox below is deliberately much smaller.
pub const PLAYER_SPRITE_SIZE: Vec2 = Vec2::new(16.0, 24.0);

/// Collision hitbox inset to the character's feet, so the body can overlap
/// scenery the feet walk behind.
pub fn player_hitbox() -> Hitbox {
    Hitbox::with_offset(Vec2::new(10.0, 6.0), Vec2::new(0.0, -9.0))
}
