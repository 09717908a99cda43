//! Confirm-key interaction with static interactables.

use bevy::prelude::*;

use crate::shared::*;

/// On confirm, branch by the identity of the interactable the player's
/// hitbox overlaps: the trader opens the shop, the bed puts the player to
/// sleep. Sleep freezes input until the calendar wakes us after day-end
/// processing.
pub fn handle_interact(
    input: Res<PlayerInput>,
    mut player_state: ResMut<PlayerState>,
    mut player_query: Query<(&Transform, &Hitbox, &mut PlayerMovement), With<Player>>,
    interactables: Query<(&Transform, &Hitbox, &Interactable), Without<Player>>,
    mut shop_events: EventWriter<ShopToggleEvent>,
    mut sleep_events: EventWriter<SleepRequestedEvent>,
) {
    if !input.interact || player_state.sleeping {
        return;
    }

    let Ok((transform, hitbox, mut movement)) = player_query.get_single_mut() else {
        return;
    };
    let player_rect = hitbox.rect_at(transform.translation.truncate());

    for (i_transform, i_hitbox, interactable) in interactables.iter() {
        let zone = i_hitbox.rect_at(i_transform.translation.truncate());
        if !rects_overlap(player_rect, zone) {
            continue;
        }

        match interactable.kind {
            InteractableKind::Trader => {
                shop_events.send(ShopToggleEvent);
            }
            InteractableKind::Bed => {
                player_state.sleeping = true;
                movement.direction = Vec2::ZERO;
                movement.facing = Facing::Left;
                sleep_events.send(SleepRequestedEvent);
                info!("[Player] Went to bed");
            }
        }
        break;
    }
}
