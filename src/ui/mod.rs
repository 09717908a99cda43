//! UI domain — the gameplay HUD and the shop-state flip.

mod hud;
pub mod shop;

use bevy::prelude::*;

use crate::shared::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // ─── HUD — spawned once, lives for the whole session ───
        app.add_systems(OnEnter(GameState::Playing), hud::spawn_hud);
        app.add_systems(
            Update,
            (
                hud::update_day_display,
                hud::update_selection_display,
                hud::update_produce_display,
            )
                .run_if(in_state(GameState::Playing)),
        );

        // ─── Shop toggle — the trade interactable's callback surface ───
        app.add_systems(Update, shop::handle_shop_toggle);
        app.add_systems(
            Update,
            shop::close_shop_input.run_if(in_state(GameState::Shop)),
        );
    }
}
