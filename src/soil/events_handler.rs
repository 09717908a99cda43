//! Day-boundary handling for the soil grid.
//!
//! Order inside one DayEndEvent matters: plants grow against the watered
//! flags of the day that just ended, then the water dries out, then rain
//! (if the new day has any) soaks every open bed again.

use bevy::prelude::*;

use crate::shared::*;
use super::SoilGrid;

pub fn on_day_end(
    mut day_end_events: EventReader<DayEndEvent>,
    mut grid: ResMut<SoilGrid>,
) {
    for event in day_end_events.read() {
        grid.grow_plants();
        grid.clear_water();
        if event.raining {
            grid.water_all();
        }

        let ripe = grid.plants().filter(|(_, p)| p.harvestable).count();
        info!(
            "[Soil] Day {} — {} plants in the ground, {} ready to pick",
            event.day,
            grid.plant_count(),
            ripe
        );
    }
}
