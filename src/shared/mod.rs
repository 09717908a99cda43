//! Shared components, resources, events, and states for Willowmere.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod timer;

pub use timer::Countdown;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Shop,
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Facing {
    /// Unit offset in world space (bevy y-up).
    pub fn offset(self) -> Vec2 {
        match self {
            Facing::Up => Vec2::Y,
            Facing::Down => Vec2::NEG_Y,
            Facing::Left => Vec2::NEG_X,
            Facing::Right => Vec2::X,
        }
    }
}

/// What the player is currently doing, for animation and input gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Activity {
    #[default]
    Idle,
    Walking,
    /// A tool/seed use countdown is running; facing is preserved from
    /// before the action started.
    Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Hoe,
    WateringCan,
}

/// The ordered tool list for cycling.
pub const TOOL_ORDER: [ToolKind; 2] = [ToolKind::Hoe, ToolKind::WateringCan];

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

#[derive(Component, Debug, Clone)]
pub struct PlayerMovement {
    pub facing: Facing,
    pub activity: Activity,
    /// Raw input direction: each axis in {-1, 0, 1}. Normalized at
    /// movement time so diagonal speed equals cardinal speed.
    pub direction: Vec2,
    pub speed: f32,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self {
            facing: Facing::Down,
            activity: Activity::Idle,
            direction: Vec2::ZERO,
            speed: 72.0,
        }
    }
}

/// One-shot countdowns owned by the player. Tool/seed use double as the
/// action-animation window; the switch timers debounce cycling keys.
#[derive(Component, Debug)]
pub struct PlayerTimers {
    pub tool_use: Countdown,
    pub seed_use: Countdown,
    pub tool_switch: Countdown,
    pub seed_switch: Countdown,
}

impl PlayerTimers {
    pub fn from_millis(use_ms: u64, switch_ms: u64) -> Self {
        Self {
            tool_use: Countdown::from_millis(use_ms),
            seed_use: Countdown::from_millis(use_ms),
            tool_switch: Countdown::from_millis(switch_ms),
            seed_switch: Countdown::from_millis(switch_ms),
        }
    }

    /// True while either use countdown runs — the action window during
    /// which direction input is ignored.
    pub fn action_active(&self) -> bool {
        self.tool_use.is_active() || self.seed_use.is_active()
    }
}

impl Default for PlayerTimers {
    fn default() -> Self {
        Self::from_millis(350, 200)
    }
}

/// Drives the walk/action animation frame. Reset to 0 whenever an action
/// starts so the swing lines up with the use countdown.
#[derive(Component, Debug, Clone, Default)]
pub struct PlayerAnimation {
    pub frame: f32,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerState {
    /// Input is frozen while true; the calendar clears it after day-end
    /// processing.
    pub sleeping: bool,
    pub tool_index: usize,
    pub seed_index: usize,
}

impl PlayerState {
    pub fn selected_tool(&self) -> ToolKind {
        TOOL_ORDER[self.tool_index % TOOL_ORDER.len()]
    }

    pub fn selected_seed(&self) -> SpeciesId {
        SpeciesId::ALL[self.seed_index % SpeciesId::ALL.len()]
    }
}

// ═══════════════════════════════════════════════════════════════════════
// COLLISION
// ═══════════════════════════════════════════════════════════════════════

/// The collision-authoritative rectangle, generally smaller than the
/// visual sprite bounds. Centered on the entity translation plus `offset`.
#[derive(Component, Debug, Clone, Copy)]
pub struct Hitbox {
    pub size: Vec2,
    pub offset: Vec2,
}

impl Hitbox {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            offset: Vec2::ZERO,
        }
    }

    pub fn with_offset(size: Vec2, offset: Vec2) -> Self {
        Self { size, offset }
    }

    /// World-space rect for an entity whose translation is `center`.
    pub fn rect_at(&self, center: Vec2) -> Rect {
        Rect::from_center_size(center + self.offset, self.size)
    }
}

/// Marker: this hitbox blocks movement. Interaction zones carry a Hitbox
/// without this marker so the player can walk into them.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Obstacle;

/// Strict-overlap test; rects that merely touch do not collide, so a
/// snapped hitbox resting flush against an obstacle stays resolved.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

// ═══════════════════════════════════════════════════════════════════════
// INTERACTABLES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractableKind {
    /// Sleeping ends the day.
    Bed,
    /// Opens the shop.
    Trader,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Interactable {
    pub kind: InteractableKind,
}

// ═══════════════════════════════════════════════════════════════════════
// SPECIES & INVENTORY
// ═══════════════════════════════════════════════════════════════════════

/// Closed set of crop species. Enum-keyed lookups instead of stringly-typed
/// item names, so a typo is a compile error rather than a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeciesId {
    Tomato,
    Corn,
}

impl SpeciesId {
    pub const ALL: [SpeciesId; 2] = [SpeciesId::Tomato, SpeciesId::Corn];

    pub fn name(self) -> &'static str {
        match self {
            SpeciesId::Tomato => "Tomato",
            SpeciesId::Corn => "Corn",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesDef {
    pub id: SpeciesId,
    /// Age gained per watered day.
    pub growth_per_day: f32,
    /// Number of growth sprite frames, ordered youngest-first.
    /// Max age is derived from this: a plant is ripe at `frames - 1`.
    pub growth_frames: u8,
    /// Vertical sprite offset so tall crops sit above the soil tile.
    pub sprite_y_offset: f32,
    pub seed_price: u32,
    pub produce_price: u32,
}

impl SpeciesDef {
    pub fn max_age(&self) -> f32 {
        self.growth_frames.saturating_sub(1) as f32
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SpeciesRegistry {
    pub species: HashMap<SpeciesId, SpeciesDef>,
}

impl SpeciesRegistry {
    pub fn get(&self, id: SpeciesId) -> Option<&SpeciesDef> {
        self.species.get(&id)
    }
}

/// Seed and produce counts per species. Every variant is present from
/// construction, so lookups never miss and counts never go negative.
#[derive(Resource, Debug, Clone)]
pub struct Inventory {
    seeds: HashMap<SpeciesId, u32>,
    produce: HashMap<SpeciesId, u32>,
}

impl Default for Inventory {
    fn default() -> Self {
        let mut seeds = HashMap::new();
        let mut produce = HashMap::new();
        for id in SpeciesId::ALL {
            seeds.insert(id, 5);
            produce.insert(id, 0);
        }
        Self { seeds, produce }
    }
}

impl Inventory {
    pub fn seed_count(&self, id: SpeciesId) -> u32 {
        self.seeds.get(&id).copied().unwrap_or(0)
    }

    pub fn produce_count(&self, id: SpeciesId) -> u32 {
        self.produce.get(&id).copied().unwrap_or(0)
    }

    /// Consume one seed. Returns false (and changes nothing) if none left.
    pub fn take_seed(&mut self, id: SpeciesId) -> bool {
        match self.seeds.get_mut(&id) {
            Some(n) if *n > 0 => {
                *n -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn add_seeds(&mut self, id: SpeciesId, quantity: u32) {
        *self.seeds.entry(id).or_insert(0) += quantity;
    }

    pub fn add_produce(&mut self, id: SpeciesId, quantity: u32) {
        *self.produce.entry(id).or_insert(0) += quantity;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR
// ═══════════════════════════════════════════════════════════════════════

/// Day counter and today's weather. The soil domain reads `raining` but
/// never writes it.
#[derive(Resource, Debug, Clone)]
pub struct Calendar {
    pub day: u32,
    pub raining: bool,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            day: 1,
            raining: false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub tool_use: KeyCode,
    pub seed_use: KeyCode,
    pub interact: KeyCode,
    pub tool_next: KeyCode,
    pub seed_next: KeyCode,
    pub ui_cancel: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            tool_use: KeyCode::Space,
            seed_use: KeyCode::ControlLeft,
            interact: KeyCode::KeyF,
            tool_next: KeyCode::KeyQ,
            seed_next: KeyCode::KeyE,
            ui_cancel: KeyCode::Escape,
        }
    }
}

/// Which set of actions hardware input maps onto, derived from GameState.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Disabled,
    Gameplay,
    Menu,
}

/// Game actions for this frame. Rebuilt from hardware state every frame
/// by the input domain; all gameplay systems read this, never the keyboard.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    /// Raw movement axes, each component in {-1, 0, 1}. Opposite keys on
    /// one axis cancel to zero. Deliberately NOT normalized here — the
    /// movement system needs the per-axis values for facing resolution.
    pub move_axis: Vec2,
    pub tool_use: bool,
    pub seed_use: bool,
    pub interact: bool,
    pub tool_next: bool,
    pub seed_next: bool,
    pub ui_confirm: bool,
    pub ui_cancel: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// The tool-use countdown expired; apply the tool at the target point.
#[derive(Event, Debug, Clone)]
pub struct ToolUseEvent {
    pub tool: ToolKind,
    pub target: Vec2,
}

/// The seed-use countdown expired; try to plant at the target point.
#[derive(Event, Debug, Clone)]
pub struct SeedUseEvent {
    pub species: SpeciesId,
    pub target: Vec2,
}

/// Player confirmed at the bed; the calendar advances the day in response.
#[derive(Event, Debug, Clone)]
pub struct SleepRequestedEvent;

/// A day boundary was crossed. `raining` is the NEW day's weather; soil
/// growth runs against the ended day's watered flags before they clear.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day: u32,
    pub raining: bool,
}

/// Player confirmed at the trader; the UI flips Playing <-> Shop.
#[derive(Event, Debug, Clone)]
pub struct ShopToggleEvent;

#[derive(Event, Debug, Clone)]
pub struct CropHarvestedEvent {
    pub species: SpeciesId,
    pub grid_x: usize,
    pub grid_y: usize,
}

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

#[derive(Event, Debug, Clone)]
pub struct PlayMusicEvent {
    pub track_id: String,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 16.0;
pub const PIXEL_SCALE: f32 = 3.0; // render scale (16px × 3 = 48px on screen)
pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

/// How far in front of the player's center a tool lands.
pub const TOOL_REACH: f32 = TILE_SIZE;

/// Walk-cycle frames advanced per second.
pub const ANIMATION_RATE: f32 = 4.0;

// Z layers, back to front.
pub const Z_GROUND: f32 = 0.0;
pub const Z_SOIL: f32 = 1.0;
pub const Z_WATER_OVERLAY: f32 = 1.5;
/// Seedlings render below the main layer until they surface.
pub const Z_PLANT_YOUNG: f32 = 2.0;
/// Surfaced plants, world objects and the player share the main layer.
pub const Z_MAIN: f32 = 5.0;
pub const Z_PLAYER: f32 = 6.0;
