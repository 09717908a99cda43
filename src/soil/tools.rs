//! Tool and seed responses — the grid mutations behind hoe, watering can
//! and seed use.

use bevy::prelude::*;

use crate::shared::*;
use super::SoilGrid;

// ─────────────────────────────────────────────────────────────────────────────
// Hoe — till a farmable tile
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_hoe_tool_use(
    mut tool_events: EventReader<ToolUseEvent>,
    mut grid: ResMut<SoilGrid>,
    calendar: Res<Calendar>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in tool_events.read() {
        if event.tool != ToolKind::Hoe {
            continue;
        }

        if grid.till_at(event.target) {
            sfx_events.send(PlaySfxEvent {
                sfx_id: "hoe".to_string(),
            });

            // Tilling in the rain soaks every open bed, the fresh one
            // included — not just the target cell.
            if calendar.raining {
                grid.water_all();
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Watering can — water a tilled tile
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_watering_can_tool_use(
    mut tool_events: EventReader<ToolUseEvent>,
    mut grid: ResMut<SoilGrid>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in tool_events.read() {
        if event.tool != ToolKind::WateringCan {
            continue;
        }

        if grid.water_at(event.target) {
            sfx_events.send(PlaySfxEvent {
                sfx_id: "water".to_string(),
            });
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Seeds — plant on a tilled, unplanted tile
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_seed_use(
    mut seed_events: EventReader<SeedUseEvent>,
    mut grid: ResMut<SoilGrid>,
    mut inventory: ResMut<Inventory>,
    registry: Res<SpeciesRegistry>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    for event in seed_events.read() {
        if inventory.seed_count(event.species) == 0 {
            continue;
        }

        let Some(def) = registry.get(event.species) else {
            warn!("[Soil] No species definition for {:?}", event.species);
            continue;
        };

        // The seed is only spent when a plant actually takes root; a tile
        // that already bears a plant drops the attempt.
        if grid.plant_at(event.target, def) {
            inventory.take_seed(event.species);
            sfx_events.send(PlaySfxEvent {
                sfx_id: "plant".to_string(),
            });
        }
    }
}
