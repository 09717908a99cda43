//! A single crop instance. Created by the grid when a seed lands on a
//! tilled, unplanted cell; destroyed by the harvest hook.

use crate::shared::*;

#[derive(Debug, Clone)]
pub struct Plant {
    pub species: SpeciesId,
    /// Continuous age, advanced only on watered growth ticks.
    pub age: f32,
    growth_per_day: f32,
    max_age: f32,
    /// True once age has reached max_age. Never reverts; the plant does
    /// nothing further until harvested.
    pub harvestable: bool,
    /// One-way layer promotion: set when the integer part of age first
    /// rises above 0. Surfaced plants render on the main layer and carry
    /// a collision hitbox.
    pub surfaced: bool,
}

impl Plant {
    pub fn new(def: &SpeciesDef) -> Self {
        Self {
            species: def.id,
            age: 0.0,
            growth_per_day: def.growth_per_day,
            max_age: def.max_age(),
            harvestable: false,
            surfaced: false,
        }
    }

    /// One growth evaluation. The grid passes in the owning cell's watered
    /// state; a dry cell leaves the plant untouched.
    pub fn grow(&mut self, watered: bool) {
        if !watered {
            return;
        }
        self.age += self.growth_per_day;

        if self.age as i32 > 0 {
            self.surfaced = true;
        }

        if self.age >= self.max_age {
            self.age = self.max_age;
            self.harvestable = true;
        }
    }

    /// Growth-frame index: frames are ordered youngest-first, so the stage
    /// is simply the integer part of the age.
    pub fn stage(&self) -> usize {
        self.age as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corn_def() -> SpeciesDef {
        SpeciesDef {
            id: SpeciesId::Corn,
            growth_per_day: 1.0,
            growth_frames: 4,
            sprite_y_offset: 4.0,
            seed_price: 4,
            produce_price: 10,
        }
    }

    #[test]
    fn test_dry_tick_leaves_age_unchanged() {
        let mut plant = Plant::new(&corn_def());
        plant.grow(false);
        assert_eq!(plant.age, 0.0);
        assert!(!plant.surfaced);
        assert!(!plant.harvestable);
    }

    #[test]
    fn test_age_is_monotone_and_clamped() {
        let mut plant = Plant::new(&corn_def());
        let mut last = plant.age;
        for _ in 0..10 {
            plant.grow(true);
            assert!(plant.age >= last);
            last = plant.age;
        }
        assert_eq!(plant.age, 3.0);
        assert!(plant.harvestable);
    }

    #[test]
    fn test_harvestable_iff_age_reaches_max() {
        let mut plant = Plant::new(&corn_def());
        plant.grow(true);
        plant.grow(true);
        assert_eq!(plant.age, 2.0);
        assert!(!plant.harvestable);
        plant.grow(true);
        assert_eq!(plant.age, 3.0);
        assert!(plant.harvestable);
    }

    #[test]
    fn test_surface_promotion_is_one_way() {
        let mut plant = Plant::new(&corn_def());
        assert!(!plant.surfaced);
        plant.grow(true);
        assert!(plant.surfaced, "integer age above 0 surfaces the plant");
        // Dry spells never demote a surfaced plant.
        plant.grow(false);
        assert!(plant.surfaced);
    }

    #[test]
    fn test_slow_grower_stays_below_ground_at_first() {
        let def = SpeciesDef {
            id: SpeciesId::Tomato,
            growth_per_day: 0.7,
            growth_frames: 6,
            sprite_y_offset: 2.0,
            seed_price: 4,
            produce_price: 12,
        };
        let mut plant = Plant::new(&def);
        plant.grow(true);
        // age 0.7 — integer part still 0.
        assert!(!plant.surfaced);
        assert_eq!(plant.stage(), 0);
        plant.grow(true);
        // age 1.4 — now above ground, second frame.
        assert!(plant.surfaced);
        assert_eq!(plant.stage(), 1);
    }
}
