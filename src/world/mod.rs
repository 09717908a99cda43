//! World domain — spawns the farm: ground tiles, solid scenery, the bed
//! and the trader stall, and hands the farmable tile set to the soil grid.

use bevy::prelude::*;

use crate::shared::*;
use crate::soil::SoilGrid;

pub mod maps;

use maps::{farm_map, ObjectKind, TileKind};

/// Marker for static ground tile sprites.
#[derive(Component, Debug, Clone, Copy)]
pub struct GroundTile;

/// Marker for solid scenery (trees, rocks).
#[derive(Component, Debug, Clone, Copy)]
pub struct WorldObject;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_farm);
    }
}

fn setup_farm(
    mut commands: Commands,
    existing: Query<(), With<GroundTile>>,
    mut grid: ResMut<SoilGrid>,
) {
    // Guard: the farm persists across Shop <-> Playing flips.
    if !existing.is_empty() {
        return;
    }

    let map = farm_map();

    // The soil grid takes ownership of the farmable layer.
    *grid = SoilGrid::new(map.width, map.height, map.farmable.iter().copied());

    // Ground tiles; solid kinds double as full-tile obstacles.
    for y in 0..map.height {
        for x in 0..map.width {
            let kind = map.tile(x, y);
            let center = tile_center(x, y);
            let mut entity = commands.spawn((
                GroundTile,
                Sprite {
                    color: ground_color(kind),
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                },
                Transform::from_translation(center.extend(Z_GROUND)),
            ));
            if kind.is_solid() {
                entity.insert((Hitbox::new(Vec2::splat(TILE_SIZE)), Obstacle));
            }
        }
    }

    // Scenery on the main layer with inset hitboxes.
    for &((x, y), kind) in &map.objects {
        let center = tile_center(x, y);
        let (color, size, hitbox) = match kind {
            ObjectKind::Tree => (
                Color::srgb(0.20, 0.38, 0.16),
                Vec2::new(14.0, 20.0),
                Hitbox::with_offset(Vec2::new(10.0, 8.0), Vec2::new(0.0, -5.0)),
            ),
            ObjectKind::Rock => (
                Color::srgb(0.50, 0.50, 0.52),
                Vec2::new(12.0, 10.0),
                Hitbox::new(Vec2::new(10.0, 8.0)),
            ),
        };
        commands.spawn((
            WorldObject,
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(Z_MAIN)),
            hitbox,
            Obstacle,
        ));
    }

    // Interactables: a hitbox marks the interaction zone, but no Obstacle —
    // the player walks onto them and confirms.
    for &((x, y), kind) in &map.interactables {
        let center = tile_center(x, y);
        let (color, zone) = match kind {
            InteractableKind::Bed => (Color::srgb(0.75, 0.35, 0.40), Vec2::new(18.0, 22.0)),
            InteractableKind::Trader => (Color::srgb(0.85, 0.65, 0.25), Vec2::new(20.0, 20.0)),
        };
        commands.spawn((
            Sprite {
                color,
                custom_size: Some(Vec2::new(14.0, 20.0)),
                ..default()
            },
            Transform::from_translation(center.extend(Z_MAIN)),
            Hitbox::new(zone),
            Interactable { kind },
        ));
    }

    info!(
        "[World] Farm ready — {}x{} tiles, {} farmable",
        map.width,
        map.height,
        map.farmable.len()
    );
}

fn tile_center(x: usize, y: usize) -> Vec2 {
    Vec2::new((x as f32 + 0.5) * TILE_SIZE, (y as f32 + 0.5) * TILE_SIZE)
}

fn ground_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Grass => Color::srgb(0.36, 0.55, 0.32),
        TileKind::Field => Color::srgb(0.55, 0.42, 0.28),
        TileKind::Water => Color::srgb(0.25, 0.45, 0.75),
        TileKind::Fence => Color::srgb(0.42, 0.30, 0.18),
    }
}
