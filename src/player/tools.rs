//! Tool/seed selection and the use countdowns.
//!
//! Pressing use doesn't apply the tool immediately: it arms a countdown
//! whose expiry fires the actual effect, so the landing lines up with the
//! swing animation. Movement is zeroed and the animation frame reset at
//! activation for the same reason.

use bevy::prelude::*;

use crate::shared::*;

pub fn handle_action_input(
    input: Res<PlayerInput>,
    mut player_state: ResMut<PlayerState>,
    mut query: Query<(&mut PlayerMovement, &mut PlayerTimers, &mut PlayerAnimation), With<Player>>,
) {
    let Ok((mut movement, mut timers, mut animation)) = query.get_single_mut() else {
        return;
    };

    if player_state.sleeping {
        return;
    }

    // Cycling, debounced by its own short countdown.
    if input.tool_next && !timers.tool_switch.is_active() {
        timers.tool_switch.activate();
        player_state.tool_index = (player_state.tool_index + 1) % TOOL_ORDER.len();
        info!("[Player] Tool: {:?}", player_state.selected_tool());
    }
    if input.seed_next && !timers.seed_switch.is_active() {
        timers.seed_switch.activate();
        player_state.seed_index = (player_state.seed_index + 1) % SpeciesId::ALL.len();
        info!("[Player] Seed: {}", player_state.selected_seed().name());
    }

    if input.tool_use && !timers.action_active() {
        timers.tool_use.activate();
        movement.direction = Vec2::ZERO;
        animation.frame = 0.0;
    } else if input.seed_use && !timers.action_active() {
        timers.seed_use.activate();
        movement.direction = Vec2::ZERO;
        animation.frame = 0.0;
    }
}

/// Tick every player countdown; on use-countdown expiry, fire the effect
/// at the tile the player is facing.
pub fn update_timers(
    time: Res<Time>,
    player_state: Res<PlayerState>,
    mut query: Query<(&Transform, &PlayerMovement, &mut PlayerTimers), With<Player>>,
    mut tool_events: EventWriter<ToolUseEvent>,
    mut seed_events: EventWriter<SeedUseEvent>,
) {
    let Ok((transform, movement, mut timers)) = query.get_single_mut() else {
        return;
    };

    let delta = time.delta();
    timers.tool_switch.tick(delta);
    timers.seed_switch.tick(delta);

    // Facing-direction offset from the player's center.
    let target = transform.translation.truncate() + movement.facing.offset() * TOOL_REACH;

    if timers.tool_use.tick(delta) {
        tool_events.send(ToolUseEvent {
            tool: player_state.selected_tool(),
            target,
        });
    }
    if timers.seed_use.tick(delta) {
        seed_events.send(SeedUseEvent {
            species: player_state.selected_seed(),
            target,
        });
    }
}
