//! The soil grid — authoritative per-tile state for farmable ground.
//!
//! Cells are a fixed row-major array of flag sets sized to the map at load
//! time. Which tiles are farmable is decided once, by the map source; every
//! mutation here is guarded by the flag invariants (tilled only where
//! farmable, watered/planted only where tilled), so callers can fire
//! operations at arbitrary world points and rely on no-ops for misses.
//! All plant instances are owned by the grid and keyed by their cell.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::shared::*;
use super::plant::Plant;

/// Per-cell flag set. A u8 bitset instead of a tag list: O(1) membership
/// and no duplicate-tag states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileFlags(u8);

impl TileFlags {
    pub const FARMABLE: TileFlags = TileFlags(1 << 0);
    pub const TILLED: TileFlags = TileFlags(1 << 1);
    pub const WATERED: TileFlags = TileFlags(1 << 2);
    pub const PLANTED: TileFlags = TileFlags(1 << 3);

    pub const fn empty() -> Self {
        TileFlags(0)
    }

    pub fn contains(self, other: TileFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: TileFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: TileFlags) {
        self.0 &= !other.0;
    }
}

#[derive(Resource, Debug, Default)]
pub struct SoilGrid {
    width: usize,
    height: usize,
    cells: Vec<TileFlags>,
    plants: HashMap<(usize, usize), Plant>,
}

impl SoilGrid {
    pub fn new(
        width: usize,
        height: usize,
        farmable: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut grid = Self {
            width,
            height,
            cells: vec![TileFlags::empty(); width * height],
            plants: HashMap::new(),
        };
        for (x, y) in farmable {
            if x < width && y < height {
                grid.cells[y * width + x].insert(TileFlags::FARMABLE);
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The cell containing a world-space point, or None when the point is
    /// off the grid. Every point-taking operation routes through this, so
    /// out-of-bounds input can never index the cell array.
    pub fn tile_at(&self, point: Vec2) -> Option<(usize, usize)> {
        if point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let x = (point.x / TILE_SIZE) as usize;
        let y = (point.y / TILE_SIZE) as usize;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((x, y))
    }

    pub fn flags(&self, cell: (usize, usize)) -> TileFlags {
        if cell.0 >= self.width || cell.1 >= self.height {
            return TileFlags::empty();
        }
        self.cells[cell.1 * self.width + cell.0]
    }

    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), TileFlags)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &flags)| ((i % width, i / width), flags))
    }

    /// Till the farmable, untilled cell containing `point`.
    /// Returns true when the cell was newly tilled. Idempotent: tilling an
    /// already-tilled cell changes nothing.
    pub fn till_at(&mut self, point: Vec2) -> bool {
        let Some((x, y)) = self.tile_at(point) else {
            return false;
        };
        let flags = &mut self.cells[y * self.width + x];
        if flags.contains(TileFlags::FARMABLE) && !flags.contains(TileFlags::TILLED) {
            flags.insert(TileFlags::TILLED);
            true
        } else {
            false
        }
    }

    /// Water the tilled cell containing `point`. Returns true only on the
    /// unwatered → watered transition so the caller spawns exactly one
    /// overlay; no-op on untilled cells and misses.
    pub fn water_at(&mut self, point: Vec2) -> bool {
        let Some((x, y)) = self.tile_at(point) else {
            return false;
        };
        let flags = &mut self.cells[y * self.width + x];
        if flags.contains(TileFlags::TILLED) && !flags.contains(TileFlags::WATERED) {
            flags.insert(TileFlags::WATERED);
            true
        } else {
            false
        }
    }

    /// Water every tilled, unwatered cell (the rain path). Returns the
    /// newly watered cells.
    pub fn water_all(&mut self) -> Vec<(usize, usize)> {
        let mut newly_watered = Vec::new();
        for (i, flags) in self.cells.iter_mut().enumerate() {
            if flags.contains(TileFlags::TILLED) && !flags.contains(TileFlags::WATERED) {
                flags.insert(TileFlags::WATERED);
                newly_watered.push((i % self.width, i / self.width));
            }
        }
        newly_watered
    }

    /// Strip WATERED grid-wide. Tilled/farmable/planted are untouched.
    pub fn clear_water(&mut self) {
        for flags in self.cells.iter_mut() {
            flags.remove(TileFlags::WATERED);
        }
    }

    pub fn is_watered(&self, point: Vec2) -> bool {
        self.tile_at(point)
            .map(|cell| self.is_watered_cell(cell))
            .unwrap_or(false)
    }

    pub fn is_watered_cell(&self, cell: (usize, usize)) -> bool {
        self.flags(cell).contains(TileFlags::WATERED)
    }

    /// Plant a seed in the tilled, unplanted cell containing `point`.
    /// A cell that already bears a plant silently drops the seed — one
    /// plant per tile. Returns true when a plant was created.
    pub fn plant_at(&mut self, point: Vec2, def: &SpeciesDef) -> bool {
        let Some((x, y)) = self.tile_at(point) else {
            return false;
        };
        let flags = &mut self.cells[y * self.width + x];
        if !flags.contains(TileFlags::TILLED) || flags.contains(TileFlags::PLANTED) {
            return false;
        }
        flags.insert(TileFlags::PLANTED);
        self.plants.insert((x, y), Plant::new(def));
        true
    }

    pub fn plant(&self, cell: (usize, usize)) -> Option<&Plant> {
        self.plants.get(&cell)
    }

    pub fn plants(&self) -> impl Iterator<Item = ((usize, usize), &Plant)> + '_ {
        self.plants.iter().map(|(&cell, plant)| (cell, plant))
    }

    pub fn plant_count(&self) -> usize {
        self.plants.len()
    }

    /// One growth tick: every plant is evaluated once, ageing only if its
    /// cell is currently watered.
    pub fn grow_plants(&mut self) {
        let width = self.width;
        let cells = &self.cells;
        for (&(x, y), plant) in self.plants.iter_mut() {
            let watered = cells
                .get(y * width + x)
                .is_some_and(|f| f.contains(TileFlags::WATERED));
            plant.grow(watered);
        }
    }

    /// The harvest hook: remove a ripe plant and clear the cell's PLANTED
    /// flag, leaving tilled/watered state intact. Returns the species so
    /// the caller can credit the produce.
    pub fn harvest_at(&mut self, cell: (usize, usize)) -> Option<SpeciesId> {
        if !self.plants.get(&cell).is_some_and(|p| p.harvestable) {
            return None;
        }
        let plant = self.plants.remove(&cell)?;
        let i = cell.1 * self.width + cell.0;
        if let Some(flags) = self.cells.get_mut(i) {
            flags.remove(TileFlags::PLANTED);
        }
        Some(plant.species)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tomato_def() -> SpeciesDef {
        SpeciesDef {
            id: SpeciesId::Tomato,
            growth_per_day: 0.7,
            growth_frames: 6,
            sprite_y_offset: 2.0,
            seed_price: 4,
            produce_price: 12,
        }
    }

    /// A 3×3 grid where every cell is farmable.
    fn grid_3x3() -> SoilGrid {
        SoilGrid::new(3, 3, (0..3).flat_map(|y| (0..3).map(move |x| (x, y))))
    }

    fn center(x: usize, y: usize) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) * TILE_SIZE,
            (y as f32 + 0.5) * TILE_SIZE,
        )
    }

    #[test]
    fn test_out_of_bounds_operations_are_no_ops() {
        let mut grid = grid_3x3();
        let outside = [
            Vec2::new(-1.0, 8.0),
            Vec2::new(8.0, -1.0),
            Vec2::new(3.5 * TILE_SIZE, 8.0),
            Vec2::new(8.0, 100.0 * TILE_SIZE),
        ];
        for p in outside {
            assert!(!grid.till_at(p));
            assert!(!grid.water_at(p));
            assert!(!grid.plant_at(p, &tomato_def()));
            assert!(!grid.is_watered(p));
        }
        assert_eq!(grid.plant_count(), 0);
        for (_, flags) in grid.cells() {
            assert_eq!(flags, TileFlags::FARMABLE);
        }
    }

    #[test]
    fn test_till_requires_farmable() {
        let mut grid = SoilGrid::new(3, 3, [(1usize, 1usize)]);
        assert!(!grid.till_at(center(0, 0)));
        assert!(grid.till_at(center(1, 1)));
        assert!(grid.flags((1, 1)).contains(TileFlags::TILLED));
    }

    #[test]
    fn test_till_is_idempotent() {
        let mut grid = grid_3x3();
        assert!(grid.till_at(center(1, 1)));
        let after_once = grid.flags((1, 1));
        assert!(!grid.till_at(center(1, 1)));
        assert_eq!(grid.flags((1, 1)), after_once);
    }

    #[test]
    fn test_water_requires_tilled() {
        let mut grid = grid_3x3();
        assert!(!grid.water_at(center(1, 1)));
        assert!(!grid.is_watered(center(1, 1)));

        grid.till_at(center(1, 1));
        assert!(grid.water_at(center(1, 1)));
        assert!(grid.is_watered(center(1, 1)));
        // Watering twice reports no new transition.
        assert!(!grid.water_at(center(1, 1)));
        assert!(grid.is_watered(center(1, 1)));
    }

    #[test]
    fn test_water_all_only_touches_tilled() {
        let mut grid = grid_3x3();
        grid.till_at(center(0, 0));
        grid.till_at(center(2, 2));
        let newly = grid.water_all();
        assert_eq!(newly.len(), 2);
        assert!(grid.is_watered_cell((0, 0)));
        assert!(grid.is_watered_cell((2, 2)));
        assert!(!grid.is_watered_cell((1, 1)));
        // A second pass has nothing left to water.
        assert!(grid.water_all().is_empty());
    }

    #[test]
    fn test_clear_water_leaves_other_flags() {
        let mut grid = grid_3x3();
        grid.till_at(center(0, 0));
        grid.water_at(center(0, 0));
        grid.plant_at(center(0, 0), &tomato_def());
        grid.clear_water();
        let flags = grid.flags((0, 0));
        assert!(!flags.contains(TileFlags::WATERED));
        assert!(flags.contains(TileFlags::FARMABLE));
        assert!(flags.contains(TileFlags::TILLED));
        assert!(flags.contains(TileFlags::PLANTED));
        assert_eq!(grid.plant_count(), 1);
    }

    #[test]
    fn test_planting_requires_tilled_and_unplanted() {
        let mut grid = grid_3x3();
        let def = tomato_def();
        assert!(!grid.plant_at(center(1, 1), &def), "untilled");

        grid.till_at(center(1, 1));
        assert!(grid.plant_at(center(1, 1), &def));
        assert_eq!(grid.plant_count(), 1);

        // Second seed on the same tile is silently dropped.
        assert!(!grid.plant_at(center(1, 1), &def));
        assert_eq!(grid.plant_count(), 1);
    }

    #[test]
    fn test_growth_is_gated_on_watered() {
        let mut grid = grid_3x3();
        grid.till_at(center(1, 1));
        grid.plant_at(center(1, 1), &tomato_def());

        grid.grow_plants();
        assert_eq!(grid.plant((1, 1)).unwrap().age, 0.0);

        grid.water_at(center(1, 1));
        grid.grow_plants();
        let age = grid.plant((1, 1)).unwrap().age;
        assert!((age - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_harvest_requires_ripe_plant() {
        let mut grid = grid_3x3();
        grid.till_at(center(1, 1));
        grid.plant_at(center(1, 1), &tomato_def());
        assert_eq!(grid.harvest_at((1, 1)), None);

        grid.water_at(center(1, 1));
        // Tomato ripens at age 5 with 0.7/day: 8 watered days.
        for _ in 0..8 {
            grid.grow_plants();
            grid.clear_water();
            grid.water_at(center(1, 1));
        }
        assert!(grid.plant((1, 1)).unwrap().harvestable);

        assert_eq!(grid.harvest_at((1, 1)), Some(SpeciesId::Tomato));
        assert_eq!(grid.plant_count(), 0);
        let flags = grid.flags((1, 1));
        assert!(!flags.contains(TileFlags::PLANTED));
        assert!(flags.contains(TileFlags::TILLED), "harvest keeps the tilled bed");
    }

    #[test]
    fn test_example_scenario_till_plant_water_grow() {
        let mut grid = SoilGrid::new(3, 3, [(1usize, 1usize)]);
        let def = tomato_def();
        let p = center(1, 1);

        assert!(grid.till_at(p));
        assert!(grid.plant_at(p, &def));
        let plant = grid.plant((1, 1)).unwrap();
        assert_eq!(plant.age, 0.0);
        assert!(!plant.harvestable);

        assert!(grid.water_at(p));
        grid.grow_plants();
        let plant = grid.plant((1, 1)).unwrap();
        assert!((plant.age - def.growth_per_day).abs() < 1e-6);

        // Keep it watered until ripe; harvestable then stays true.
        for _ in 0..20 {
            grid.grow_plants();
        }
        let plant = grid.plant((1, 1)).unwrap();
        assert_eq!(plant.age, def.max_age());
        assert!(plant.harvestable);
        grid.grow_plants();
        assert!(grid.plant((1, 1)).unwrap().harvestable);
    }
}
