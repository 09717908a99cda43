//! Movement and collision.
//!
//! Direction comes from the raw input axes; the step is normalized so a
//! diagonal is no faster than a cardinal. Each axis is applied and resolved
//! separately — vertical first, then horizontal — which is what lets the
//! player slide along an obstacle instead of stopping dead on contact.

use bevy::prelude::*;

use crate::shared::*;

/// Update direction and facing from this frame's input. Skipped entirely
/// mid-action and while asleep (the action start zeroed the vector).
pub fn read_direction(
    input: Res<PlayerInput>,
    player_state: Res<PlayerState>,
    mut query: Query<(&mut PlayerMovement, &PlayerTimers), With<Player>>,
) {
    let Ok((mut movement, timers)) = query.get_single_mut() else {
        return;
    };

    if timers.action_active() || player_state.sleeping {
        return;
    }

    let axis = input.move_axis;

    // Vertical is evaluated before horizontal, so when both axes are held
    // the later horizontal assignment decides the facing.
    if axis.y > 0.0 {
        movement.facing = Facing::Up;
    } else if axis.y < 0.0 {
        movement.facing = Facing::Down;
    }
    if axis.x > 0.0 {
        movement.facing = Facing::Right;
    } else if axis.x < 0.0 {
        movement.facing = Facing::Left;
    }

    movement.direction = axis;
}

/// Apply one tick of movement with axis-separated collision resolution.
pub fn apply_movement(
    time: Res<Time>,
    mut player_query: Query<(&mut Transform, &PlayerMovement, &Hitbox), With<Player>>,
    obstacle_query: Query<(&Transform, &Hitbox), (With<Obstacle>, Without<Player>)>,
) {
    let Ok((mut transform, movement, hitbox)) = player_query.get_single_mut() else {
        return;
    };

    let step = step_for(movement.direction, movement.speed, time.delta_secs());
    if step == Vec2::ZERO {
        return;
    }

    let obstacles: Vec<Rect> = obstacle_query
        .iter()
        .map(|(t, hb)| hb.rect_at(t.translation.truncate()))
        .collect();

    let mut center = transform.translation.truncate();

    center.y += step.y;
    center = resolve_vertical(center, hitbox, step.y, &obstacles);

    center.x += step.x;
    center = resolve_horizontal(center, hitbox, step.x, &obstacles);

    transform.translation.x = center.x;
    transform.translation.y = center.y;
}

/// Velocity step for a raw input direction: normalized when nonzero, so
/// |step| == speed × dt regardless of how many keys are held.
pub fn step_for(direction: Vec2, speed: f32, dt: f32) -> Vec2 {
    direction.normalize_or_zero() * speed * dt
}

/// Resolve vertical overlap after a vertical step. Moving down snaps the
/// hitbox bottom onto the obstacle's top edge; moving up snaps the top
/// onto the bottom edge.
pub fn resolve_vertical(mut center: Vec2, hitbox: &Hitbox, step_y: f32, obstacles: &[Rect]) -> Vec2 {
    for &obstacle in obstacles {
        if !rects_overlap(hitbox.rect_at(center), obstacle) {
            continue;
        }
        if step_y < 0.0 {
            // moving down
            center.y = obstacle.max.y + hitbox.size.y * 0.5 - hitbox.offset.y;
        } else if step_y > 0.0 {
            // moving up
            center.y = obstacle.min.y - hitbox.size.y * 0.5 - hitbox.offset.y;
        }
    }
    center
}

/// Horizontal counterpart of `resolve_vertical`.
pub fn resolve_horizontal(
    mut center: Vec2,
    hitbox: &Hitbox,
    step_x: f32,
    obstacles: &[Rect],
) -> Vec2 {
    for &obstacle in obstacles {
        if !rects_overlap(hitbox.rect_at(center), obstacle) {
            continue;
        }
        if step_x > 0.0 {
            // moving right
            center.x = obstacle.min.x - hitbox.size.x * 0.5 - hitbox.offset.x;
        } else if step_x < 0.0 {
            // moving left
            center.x = obstacle.max.x + hitbox.size.x * 0.5 - hitbox.offset.x;
        }
    }
    center
}
