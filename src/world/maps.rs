//! Farm map definition.
//!
//! The layout is an ASCII grid parsed once at load. Row 0 is the top of
//! the map; parsed coordinates are bevy-style with y growing upward.
//!
//! Legend:
//!   `#` fence (solid)      `G` grass
//!   `F` farmable field     `W` pond (solid)
//!   `T` tree (solid)       `R` rock (solid)
//!   `B` bed                `S` trader stall
//!   `P` player spawn

use crate::shared::InteractableKind;

const FARM_LAYOUT: [&str; 15] = [
    "########################",
    "#GGGGGGGGGGGGGGGGGGGGGG#",
    "#GTTGGGGGGGGGGGGGGGGTTG#",
    "#GGGGFFFFFFFFFFFFGGGGGG#",
    "#GGGGFFFFFFFFFFFFGGGGGG#",
    "#GGGGFFFFFFFFFFFFGGGGGG#",
    "#GGGGFFFFFFFFFFFFGGGGGG#",
    "#GGGGFFFFFFFFFFFFGGGGGG#",
    "#GGGGGGGGGGGGGGGGGGGGGG#",
    "#GRGGGGGGGGGPGGGGGGGGRG#",
    "#GGGGGGGGGGGGGGGGWWWGGG#",
    "#GBGGGGGGGGGGGGGGWWWGGG#",
    "#GGGGGGGGGGGGSGGGWWWGGG#",
    "#GGGGGGGGGGGGGGGGGGGGGG#",
    "########################",
];

/// Ground tile kinds; `Water` and `Fence` block movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Grass,
    Field,
    Water,
    Fence,
}

impl TileKind {
    pub fn is_solid(self) -> bool {
        matches!(self, TileKind::Water | TileKind::Fence)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Tree,
    Rock,
}

#[derive(Debug, Clone)]
pub struct FarmMap {
    pub width: usize,
    pub height: usize,
    /// Row-major ground data: tiles[y * width + x].
    pub tiles: Vec<TileKind>,
    /// Tile coordinates eligible for tilling, fixed at load.
    pub farmable: Vec<(usize, usize)>,
    pub objects: Vec<((usize, usize), ObjectKind)>,
    pub interactables: Vec<((usize, usize), InteractableKind)>,
    pub spawn: (usize, usize),
}

impl FarmMap {
    pub fn tile(&self, x: usize, y: usize) -> TileKind {
        self.tiles[y * self.width + x]
    }
}

/// Parse the built-in farm layout. The layout is a compile-time constant;
/// malformed rows would be a bug in this file, so parsing asserts rather
/// than returning errors.
pub fn farm_map() -> FarmMap {
    let height = FARM_LAYOUT.len();
    let width = FARM_LAYOUT[0].len();

    let mut tiles = vec![TileKind::Grass; width * height];
    let mut farmable = Vec::new();
    let mut objects = Vec::new();
    let mut interactables = Vec::new();
    let mut spawn = (width / 2, height / 2);

    for (row, line) in FARM_LAYOUT.iter().enumerate() {
        assert_eq!(line.len(), width, "ragged farm layout row {}", row);
        let y = height - 1 - row;
        for (x, ch) in line.chars().enumerate() {
            let kind = match ch {
                '#' => TileKind::Fence,
                'W' => TileKind::Water,
                'F' => {
                    farmable.push((x, y));
                    TileKind::Field
                }
                'T' => {
                    objects.push(((x, y), ObjectKind::Tree));
                    TileKind::Grass
                }
                'R' => {
                    objects.push(((x, y), ObjectKind::Rock));
                    TileKind::Grass
                }
                'B' => {
                    interactables.push(((x, y), InteractableKind::Bed));
                    TileKind::Grass
                }
                'S' => {
                    interactables.push(((x, y), InteractableKind::Trader));
                    TileKind::Grass
                }
                'P' => {
                    spawn = (x, y);
                    TileKind::Grass
                }
                _ => TileKind::Grass,
            };
            tiles[y * width + x] = kind;
        }
    }

    FarmMap {
        width,
        height,
        tiles,
        farmable,
        objects,
        interactables,
        spawn,
    }
}
