//! Harvesting — walking into a ripe crop picks it.
//!
//! The pick-up zone is the plant's full tile, while collision uses the
//! plant's smaller inset hitbox; the player can brush a ripe crop without
//! being blocked by it first.

use bevy::prelude::*;

use crate::shared::*;
use super::{tile_center, SoilGrid};

pub fn harvest_on_overlap(
    mut grid: ResMut<SoilGrid>,
    mut inventory: ResMut<Inventory>,
    player_query: Query<(&Transform, &Hitbox), With<Player>>,
    mut harvested_events: EventWriter<CropHarvestedEvent>,
    mut sfx_events: EventWriter<PlaySfxEvent>,
) {
    let Ok((transform, hitbox)) = player_query.get_single() else {
        return;
    };
    let player_rect = hitbox.rect_at(transform.translation.truncate());

    let ripe: Vec<(usize, usize)> = grid
        .plants()
        .filter(|(_, plant)| plant.harvestable)
        .map(|(cell, _)| cell)
        .filter(|&(x, y)| {
            let tile_rect = Rect::from_center_size(tile_center(x, y), Vec2::splat(TILE_SIZE));
            rects_overlap(player_rect, tile_rect)
        })
        .collect();

    for cell in ripe {
        if let Some(species) = grid.harvest_at(cell) {
            inventory.add_produce(species, 1);
            harvested_events.send(CropHarvestedEvent {
                species,
                grid_x: cell.0,
                grid_y: cell.1,
            });
            sfx_events.send(PlaySfxEvent {
                sfx_id: "pickup".to_string(),
            });
            info!(
                "[Soil] Harvested {} at ({}, {})",
                species.name(),
                cell.0,
                cell.1
            );
        }
    }
}
