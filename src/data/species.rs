//! Crop species definitions.
//!
//! Growth rates are age-per-watered-day; a species ripens once its age
//! reaches `growth_frames - 1`, so a tomato at 0.7/day needs eight watered
//! days while corn at 1.0/day needs three.

use crate::shared::*;

pub fn populate_species(registry: &mut SpeciesRegistry) {
    registry.species.insert(
        SpeciesId::Tomato,
        SpeciesDef {
            id: SpeciesId::Tomato,
            growth_per_day: 0.7,
            growth_frames: 6,
            sprite_y_offset: 2.0,
            seed_price: 4,
            produce_price: 12,
        },
    );

    registry.species.insert(
        SpeciesId::Corn,
        SpeciesDef {
            id: SpeciesId::Corn,
            growth_per_day: 1.0,
            growth_frames: 4,
            // Corn grows tall; lift the sprite further off the bed.
            sprite_y_offset: 4.0,
            seed_price: 4,
            produce_price: 10,
        },
    );
}
