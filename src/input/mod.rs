//! Input domain — the single point where hardware input becomes game
//! actions. Gameplay systems read `PlayerInput`, never the keyboard.

use bevy::prelude::*;

use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PreUpdate,
            (reset_and_read_input, manage_input_context).chain(),
        );
    }
}

fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<KeyBindings>,
    context: Res<InputContext>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    match *context {
        InputContext::Disabled => {}

        InputContext::Gameplay => {
            // Held opposite keys sum to zero on their axis, independently
            // per axis — the vector stays raw here (the movement system
            // normalizes and resolves facing).
            let mut axis = Vec2::ZERO;
            if keys.pressed(bindings.move_up) || keys.pressed(KeyCode::ArrowUp) {
                axis.y += 1.0;
            }
            if keys.pressed(bindings.move_down) || keys.pressed(KeyCode::ArrowDown) {
                axis.y -= 1.0;
            }
            if keys.pressed(bindings.move_left) || keys.pressed(KeyCode::ArrowLeft) {
                axis.x -= 1.0;
            }
            if keys.pressed(bindings.move_right) || keys.pressed(KeyCode::ArrowRight) {
                axis.x += 1.0;
            }
            input.move_axis = axis;

            input.tool_use =
                keys.just_pressed(bindings.tool_use) || mouse.just_pressed(MouseButton::Left);
            input.seed_use =
                keys.just_pressed(bindings.seed_use) || mouse.just_pressed(MouseButton::Right);
            input.interact = keys.just_pressed(bindings.interact);
            input.tool_next = keys.just_pressed(bindings.tool_next);
            input.seed_next = keys.just_pressed(bindings.seed_next);
            input.ui_cancel = keys.just_pressed(bindings.ui_cancel);
        }

        InputContext::Menu => {
            input.ui_confirm =
                keys.just_pressed(bindings.interact) || keys.just_pressed(KeyCode::Enter);
            input.ui_cancel = keys.just_pressed(bindings.ui_cancel);
        }
    }
}

/// Derives InputContext from GameState. One system instead of per-domain
/// guards.
fn manage_input_context(game_state: Res<State<GameState>>, mut context: ResMut<InputContext>) {
    *context = match *game_state.get() {
        GameState::Loading => InputContext::Disabled,
        GameState::Playing => InputContext::Gameplay,
        GameState::Shop => InputContext::Menu,
    };
}
