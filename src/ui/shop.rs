//! Shop open/close — the boundary the trade interactable calls into.
//!
//! The shop itself (stock, prices, buying and selling) is not part of this
//! crate; opening it is modelled as the Playing <-> Shop state flip, which
//! freezes gameplay input via the input context.

use bevy::prelude::*;

use crate::shared::*;

pub fn handle_shop_toggle(
    mut events: EventReader<ShopToggleEvent>,
    state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for _event in events.read() {
        match state.get() {
            GameState::Playing => {
                info!("[Shop] Opened");
                next_state.set(GameState::Shop);
            }
            GameState::Shop => {
                info!("[Shop] Closed");
                next_state.set(GameState::Playing);
            }
            GameState::Loading => {}
        }
    }
}

/// Cancel or confirm leaves the shop.
pub fn close_shop_input(
    input: Res<PlayerInput>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if input.ui_cancel || input.ui_confirm {
        info!("[Shop] Closed");
        next_state.set(GameState::Playing);
    }
}
