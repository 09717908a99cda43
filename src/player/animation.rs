//! Status resolution and frame advance for the character sheet.

use bevy::prelude::*;

use crate::shared::*;
use super::PlayerSpriteData;

/// Frames per animation row.
pub const FRAMES_PER_ROW: usize = 4;

/// Activity is derived, never set directly: an armed use countdown wins,
/// then a nonzero direction, then idle. Facing is left untouched here, so
/// an action keeps the facing it started with.
pub fn resolve_status(mut query: Query<(&mut PlayerMovement, &PlayerTimers), With<Player>>) {
    for (mut movement, timers) in query.iter_mut() {
        movement.activity = if timers.action_active() {
            Activity::Action
        } else if movement.direction != Vec2::ZERO {
            Activity::Walking
        } else {
            Activity::Idle
        };
    }
}

/// Atlas row for a facing/activity pair. Walk rows first, action rows
/// after, both in down/up/left/right order. Idle reuses the walk row at
/// frame 0.
fn atlas_row(facing: Facing, activity: Activity) -> usize {
    let base = match facing {
        Facing::Down => 0,
        Facing::Up => 1,
        Facing::Left => 2,
        Facing::Right => 3,
    };
    match activity {
        Activity::Action => 4 + base,
        _ => base,
    }
}

pub fn animate_player(
    time: Res<Time>,
    sprites: Res<PlayerSpriteData>,
    mut query: Query<(&mut Sprite, &mut PlayerAnimation, &PlayerMovement), With<Player>>,
) {
    let Ok((mut sprite, mut animation, movement)) = query.get_single_mut() else {
        return;
    };

    match movement.activity {
        Activity::Idle => animation.frame = 0.0,
        Activity::Walking | Activity::Action => {
            animation.frame += ANIMATION_RATE * time.delta_secs();
            if animation.frame >= FRAMES_PER_ROW as f32 {
                animation.frame = 0.0;
            }
        }
    }

    if !sprites.loaded {
        return;
    }
    if let Some(atlas) = sprite.texture_atlas.as_mut() {
        atlas.index =
            atlas_row(movement.facing, movement.activity) * FRAMES_PER_ROW + animation.frame as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_rows_follow_walk_rows() {
        for facing in [Facing::Down, Facing::Up, Facing::Left, Facing::Right] {
            let walk = atlas_row(facing, Activity::Walking);
            assert_eq!(atlas_row(facing, Activity::Idle), walk);
            assert_eq!(atlas_row(facing, Activity::Action), walk + 4);
        }
    }

    #[test]
    fn test_rows_are_distinct() {
        let mut rows: Vec<usize> = Vec::new();
        for facing in [Facing::Down, Facing::Up, Facing::Left, Facing::Right] {
            for activity in [Activity::Walking, Activity::Action] {
                rows.push(atlas_row(facing, activity));
            }
        }
        rows.sort_unstable();
        rows.dedup();
        assert_eq!(rows.len(), 8);
    }
}
