//! Soil domain — tilling, watering, planting, growth, harvest.
//!
//! The `SoilGrid` resource is the single owner of all tile flags and plant
//! instances. Other domains reach it only through events carrying a world
//! point; the sprite-sync systems in `render` reconcile visuals against
//! grid state after every mutation.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::shared::*;

pub mod grid;
pub mod plant;
pub mod tools;
pub mod harvest;
pub mod events_handler;
mod render;

pub use grid::{SoilGrid, TileFlags};
pub use plant::Plant;

/// Marker component for tilled-soil patch sprites.
#[derive(Component, Debug, Clone)]
pub struct SoilTileSprite {
    pub grid_x: usize,
    pub grid_y: usize,
}

/// Marker component for the translucent water overlay on a watered tile.
#[derive(Component, Debug, Clone)]
pub struct WaterOverlaySprite {
    pub grid_x: usize,
    pub grid_y: usize,
}

/// Marker component for plant sprites.
#[derive(Component, Debug, Clone)]
pub struct PlantSprite {
    pub grid_x: usize,
    pub grid_y: usize,
}

/// Tracks which soil/water/plant entities exist keyed by grid position, so
/// the sync systems can reconcile without scanning every entity.
#[derive(Resource, Default, Debug)]
pub struct SoilEntities {
    pub soil: HashMap<(usize, usize), Entity>,
    pub water: HashMap<(usize, usize), Entity>,
    pub plants: HashMap<(usize, usize), Entity>,
}

pub struct SoilPlugin;

impl Plugin for SoilPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoilGrid>()
            .init_resource::<SoilEntities>()
            // Tool/seed responses and harvest run during Playing.
            .add_systems(
                Update,
                (
                    tools::handle_hoe_tool_use,
                    tools::handle_watering_can_tool_use,
                    tools::handle_seed_use,
                    harvest::harvest_on_overlap,
                )
                    .run_if(in_state(GameState::Playing)),
            )
            // Day-end growth listens in every state so the event is never
            // missed while the shop is open.
            .add_systems(Update, events_handler::on_day_end)
            // Visual sync runs after all state mutations.
            .add_systems(
                PostUpdate,
                (
                    render::sync_soil_sprites,
                    render::sync_water_overlays,
                    render::sync_plant_sprites,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared helpers used across submodules
// ─────────────────────────────────────────────────────────────────────────────

/// World-space center of a grid cell.
pub fn tile_center(x: usize, y: usize) -> Vec2 {
    Vec2::new((x as f32 + 0.5) * TILE_SIZE, (y as f32 + 0.5) * TILE_SIZE)
}

/// Placeholder colour for a tilled soil patch.
pub fn soil_color() -> Color {
    Color::srgb(0.45, 0.32, 0.20)
}

/// Placeholder colour for the water overlay.
pub fn water_overlay_color() -> Color {
    Color::srgba(0.25, 0.4, 0.75, 0.45)
}

/// Colour for a plant growth stage (0 = seedling, last frame = ripe).
/// Used as a placeholder while no sprite atlas is loaded: lerps from pale
/// yellow-green to a deep ripe green.
pub fn plant_stage_color(stage: usize, total_frames: u8) -> Color {
    let last = total_frames.saturating_sub(1).max(1) as f32;
    let progress = (stage as f32 / last).clamp(0.0, 1.0);
    let r = 0.55 * (1.0 - progress) + 0.15 * progress;
    let g = 0.6 + 0.25 * progress;
    let b = 0.25 * (1.0 - progress) + 0.1 * progress;
    Color::srgb(r, g, b)
}
