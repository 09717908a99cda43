//! Visual synchronisation — reconciles sprite entities against grid state.
//!
//! Pure read-from-grid systems: spawn what is missing, restyle what exists,
//! despawn what the grid no longer knows about. Placeholder colours stand
//! in for the soil/plant atlases.

use bevy::prelude::*;

use crate::shared::*;
use super::{
    plant_stage_color, soil_color, tile_center, water_overlay_color,
    PlantSprite, SoilEntities, SoilGrid, SoilTileSprite, TileFlags, WaterOverlaySprite,
};

// ─────────────────────────────────────────────────────────────────────────────
// Tilled soil patches
// ─────────────────────────────────────────────────────────────────────────────

pub fn sync_soil_sprites(
    mut commands: Commands,
    mut entities: ResMut<SoilEntities>,
    grid: Res<SoilGrid>,
) {
    for ((x, y), flags) in grid.cells() {
        if flags.contains(TileFlags::TILLED) && !entities.soil.contains_key(&(x, y)) {
            let entity = commands
                .spawn((
                    Sprite {
                        color: soil_color(),
                        custom_size: Some(Vec2::splat(TILE_SIZE)),
                        ..default()
                    },
                    Transform::from_translation(tile_center(x, y).extend(Z_SOIL)),
                    SoilTileSprite { grid_x: x, grid_y: y },
                ))
                .id();
            entities.soil.insert((x, y), entity);
        }
    }

    // Tilled ground never reverts during play, but a rebuilt grid (new map)
    // may orphan patches; sweep them out.
    let stale: Vec<(usize, usize)> = entities
        .soil
        .keys()
        .filter(|&&cell| !grid.flags(cell).contains(TileFlags::TILLED))
        .copied()
        .collect();
    for cell in stale {
        if let Some(entity) = entities.soil.remove(&cell) {
            commands.entity(entity).despawn();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Water overlays
// ─────────────────────────────────────────────────────────────────────────────

pub fn sync_water_overlays(
    mut commands: Commands,
    mut entities: ResMut<SoilEntities>,
    grid: Res<SoilGrid>,
) {
    for ((x, y), flags) in grid.cells() {
        if flags.contains(TileFlags::WATERED) && !entities.water.contains_key(&(x, y)) {
            let entity = commands
                .spawn((
                    Sprite {
                        color: water_overlay_color(),
                        custom_size: Some(Vec2::splat(TILE_SIZE)),
                        ..default()
                    },
                    Transform::from_translation(tile_center(x, y).extend(Z_WATER_OVERLAY)),
                    WaterOverlaySprite { grid_x: x, grid_y: y },
                ))
                .id();
            entities.water.insert((x, y), entity);
        }
    }

    // clear_water leaves these behind; despawn overlays on dry cells.
    let stale: Vec<(usize, usize)> = entities
        .water
        .keys()
        .filter(|&&cell| !grid.is_watered_cell(cell))
        .copied()
        .collect();
    for cell in stale {
        if let Some(entity) = entities.water.remove(&cell) {
            commands.entity(entity).despawn();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Plants
// ─────────────────────────────────────────────────────────────────────────────

pub fn sync_plant_sprites(
    mut commands: Commands,
    mut entities: ResMut<SoilEntities>,
    grid: Res<SoilGrid>,
    registry: Res<SpeciesRegistry>,
    mut plant_query: Query<(&PlantSprite, &mut Sprite, &mut Transform, Option<&Obstacle>)>,
) {
    // Restyle existing plant sprites to match their stage.
    for (marker, mut sprite, mut transform, obstacle) in plant_query.iter_mut() {
        let cell = (marker.grid_x, marker.grid_y);
        let Some(plant) = grid.plant(cell) else {
            continue; // stale; swept below
        };
        let frames = registry
            .get(plant.species)
            .map(|d| d.growth_frames)
            .unwrap_or(1);
        sprite.color = plant_stage_color(plant.stage(), frames);
        sprite.custom_size = Some(plant_size(plant.stage(), frames));

        if plant.surfaced {
            transform.translation.z = Z_MAIN;
            // One-way promotion: the grown plant becomes an obstacle with a
            // hitbox inset from its sprite bounds.
            if obstacle.is_none() {
                if let Some(entity) = entities.plants.get(&cell) {
                    commands.entity(*entity).insert((
                        Hitbox::with_offset(
                            Vec2::new(TILE_SIZE * 0.6, TILE_SIZE * 0.4),
                            Vec2::new(0.0, -TILE_SIZE * 0.25),
                        ),
                        Obstacle,
                    ));
                }
            }
        }
    }

    // Spawn sprites for plants that don't have one yet.
    let missing: Vec<(usize, usize)> = grid
        .plants()
        .map(|(cell, _)| cell)
        .filter(|cell| !entities.plants.contains_key(cell))
        .collect();

    for (x, y) in missing {
        let Some(plant) = grid.plant((x, y)) else {
            continue;
        };
        let def = registry.get(plant.species);
        let frames = def.map(|d| d.growth_frames).unwrap_or(1);
        let y_offset = def.map(|d| d.sprite_y_offset).unwrap_or(0.0);
        let z = if plant.surfaced { Z_MAIN } else { Z_PLANT_YOUNG };

        let translation = (tile_center(x, y) + Vec2::new(0.0, y_offset)).extend(z);
        let entity = commands
            .spawn((
                Sprite {
                    color: plant_stage_color(plant.stage(), frames),
                    custom_size: Some(plant_size(plant.stage(), frames)),
                    ..default()
                },
                Transform::from_translation(translation),
                PlantSprite { grid_x: x, grid_y: y },
            ))
            .id();
        entities.plants.insert((x, y), entity);
    }

    // Despawn sprites for harvested plants.
    let stale: Vec<(usize, usize)> = entities
        .plants
        .keys()
        .filter(|&&cell| grid.plant(cell).is_none())
        .copied()
        .collect();
    for cell in stale {
        if let Some(entity) = entities.plants.remove(&cell) {
            commands.entity(entity).despawn();
        }
    }
}

/// Plants fill out as they mature.
fn plant_size(stage: usize, total_frames: u8) -> Vec2 {
    let last = total_frames.saturating_sub(1).max(1) as f32;
    let progress = (stage as f32 / last).clamp(0.0, 1.0);
    Vec2::splat(TILE_SIZE * (0.45 + 0.5 * progress))
}
