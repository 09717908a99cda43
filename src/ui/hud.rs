//! HUD — day/weather readout, selected tool and seed, produce tally.

use bevy::prelude::*;

use crate::shared::*;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct HudDayText;

#[derive(Component)]
pub struct HudSelectionText;

#[derive(Component)]
pub struct HudProduceText;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands, existing: Query<(), With<HudRoot>>) {
    if !existing.is_empty() {
        return;
    }

    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            // ─── TOP BAR ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(36.0),
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::SpaceBetween,
                        align_items: AlignItems::Center,
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.55)),
                    PickingBehavior::IGNORE,
                ))
                .with_children(|top_bar| {
                    top_bar.spawn((
                        HudDayText,
                        Text::new("Day 1 — clear"),
                        TextFont {
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        PickingBehavior::IGNORE,
                    ));

                    top_bar.spawn((
                        HudSelectionText,
                        Text::new("Hoe | Tomato seeds x5"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.8, 0.85, 1.0)),
                        PickingBehavior::IGNORE,
                    ));

                    top_bar.spawn((
                        HudProduceText,
                        Text::new(""),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.84, 0.4)),
                        PickingBehavior::IGNORE,
                    ));
                });
        });
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE
// ═══════════════════════════════════════════════════════════════════════

pub fn update_day_display(
    calendar: Res<Calendar>,
    mut query: Query<&mut Text, With<HudDayText>>,
) {
    if !calendar.is_changed() {
        return;
    }
    for mut text in query.iter_mut() {
        text.0 = format!(
            "Day {} — {}",
            calendar.day,
            if calendar.raining { "rain" } else { "clear" }
        );
    }
}

pub fn update_selection_display(
    player_state: Res<PlayerState>,
    inventory: Res<Inventory>,
    mut query: Query<&mut Text, With<HudSelectionText>>,
) {
    if !player_state.is_changed() && !inventory.is_changed() {
        return;
    }
    let seed = player_state.selected_seed();
    for mut text in query.iter_mut() {
        text.0 = format!(
            "{:?} | {} seeds x{}",
            player_state.selected_tool(),
            seed.name(),
            inventory.seed_count(seed)
        );
    }
}

pub fn update_produce_display(
    inventory: Res<Inventory>,
    mut query: Query<&mut Text, With<HudProduceText>>,
) {
    if !inventory.is_changed() {
        return;
    }
    let line = SpeciesId::ALL
        .iter()
        .filter(|&&id| inventory.produce_count(id) > 0)
        .map(|&id| format!("{} x{}", id.name(), inventory.produce_count(id)))
        .collect::<Vec<_>>()
        .join("  ");
    for mut text in query.iter_mut() {
        text.0 = line.clone();
    }
}
