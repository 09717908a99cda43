//! Data layer — populates the species registry at startup.
//!
//! Runs in OnEnter(GameState::Loading), fills the registry from the
//! hard-coded design data in submodules, then transitions into Playing.
//! Domain plugins can safely read the registry once GameState has
//! advanced past Loading.

pub mod species;

use bevy::prelude::*;

use crate::shared::*;

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

fn load_all_data(
    mut registry: ResMut<SpeciesRegistry>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    species::populate_species(&mut registry);
    info!("[Data] Species loaded: {}", registry.species.len());

    // A registry missing a cycleable species would make seed selection a
    // dead end; fail loudly at startup rather than quietly in play.
    for id in SpeciesId::ALL {
        if registry.get(id).is_none() {
            error!("[Data] Missing species definition for {:?}", id);
        }
    }

    next_state.set(GameState::Playing);
}
