//! Camera follow.

use bevy::prelude::*;

use crate::shared::Player;

const FOLLOW_SPEED: f32 = 6.0;

/// Smoothly track the player, leaving the camera's z alone.
pub fn camera_follow_player(
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let Ok(mut camera) = camera_query.get_single_mut() else {
        return;
    };

    let target = player.translation.truncate();
    let current = camera.translation.truncate();
    let t = (FOLLOW_SPEED * time.delta_secs()).min(1.0);
    let next = current.lerp(target, t);
    camera.translation.x = next.x;
    camera.translation.y = next.y;
}
