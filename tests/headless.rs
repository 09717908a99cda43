//! Headless integration tests for Willowmere.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic systems (skipping all rendering/UI), and verify that the
//! core loops — tilling, watering, planting, growth, collision, sleep —
//! work correctly.
//!
//! Run with: `cargo test --test headless`

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use willowmere::calendar::process_sleep_requests;
use willowmere::config::GameConfig;
use willowmere::data::DataPlugin;
use willowmere::player::{interaction, movement, tools as player_tools};
use willowmere::shared::*;
use willowmere::soil::{events_handler, harvest, tile_center, tools as soil_tools};
use willowmere::soil::{SoilGrid, TileFlags};
use willowmere::ui::shop;

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared resources and events
/// registered but NO rendering, windowing, or asset loading. Systems are
/// added per-test depending on what's being exercised.
fn build_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);

    // Deterministic frame time: 16 ms per update.
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
        16,
    )));

    app.init_state::<GameState>();

    // ── Shared Resources (mirrors main.rs) ───────────────────────────────
    app.init_resource::<Calendar>()
        .init_resource::<PlayerState>()
        .init_resource::<Inventory>()
        .init_resource::<SpeciesRegistry>()
        .init_resource::<KeyBindings>()
        .init_resource::<PlayerInput>()
        .init_resource::<InputContext>()
        .init_resource::<GameConfig>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<ToolUseEvent>()
        .add_event::<SeedUseEvent>()
        .add_event::<SleepRequestedEvent>()
        .add_event::<DayEndEvent>()
        .add_event::<ShopToggleEvent>()
        .add_event::<CropHarvestedEvent>()
        .add_event::<PlaySfxEvent>()
        .add_event::<PlayMusicEvent>();

    app
}

/// Transitions the test app to Playing state and ticks once to process it.
fn enter_playing_state(app: &mut App) {
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();
}

/// A 16×16 grid with every tile farmable.
fn open_grid() -> SoilGrid {
    SoilGrid::new(16, 16, (0..16).flat_map(|y| (0..16).map(move |x| (x, y))))
}

fn populated_registry() -> SpeciesRegistry {
    let mut registry = SpeciesRegistry::default();
    willowmere::data::species::populate_species(&mut registry);
    registry
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: Boot smoke — data loads and the state machine reaches Playing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_reaches_playing() {
    let mut app = build_test_app();
    app.add_plugins(DataPlugin);

    // First update runs OnEnter(Loading); second applies NextState.
    app.update();
    app.update();

    let state = app.world().resource::<State<GameState>>();
    assert_eq!(
        state.get(),
        &GameState::Playing,
        "Expected to reach Playing after loading data"
    );

    let registry = app.world().resource::<SpeciesRegistry>();
    for id in SpeciesId::ALL {
        assert!(
            registry.get(id).is_some(),
            "Species registry should define {:?}",
            id
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: Hoe events till the target tile; misses are no-ops
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hoe_event_tills_target_tile() {
    let mut app = build_test_app();
    app.insert_resource(open_grid());
    app.add_systems(Update, soil_tools::handle_hoe_tool_use);
    enter_playing_state(&mut app);

    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        target: tile_center(4, 4),
    });
    app.update();

    let grid = app.world().resource::<SoilGrid>();
    assert!(grid.flags((4, 4)).contains(TileFlags::TILLED));
}

#[test]
fn test_hoe_event_outside_grid_is_a_no_op() {
    let mut app = build_test_app();
    app.insert_resource(open_grid());
    app.add_systems(Update, soil_tools::handle_hoe_tool_use);
    enter_playing_state(&mut app);

    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        target: Vec2::new(-50.0, 9_000.0),
    });
    app.update();

    let grid = app.world().resource::<SoilGrid>();
    for (_, flags) in grid.cells() {
        assert!(!flags.contains(TileFlags::TILLED));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: Tilling during rain soaks every open bed
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_raining_till_waters_all_tilled_cells() {
    let mut app = build_test_app();
    let mut grid = open_grid();
    grid.till_at(tile_center(1, 1));
    grid.till_at(tile_center(2, 5));
    app.insert_resource(grid);
    app.world_mut().resource_mut::<Calendar>().raining = true;
    app.add_systems(Update, soil_tools::handle_hoe_tool_use);
    enter_playing_state(&mut app);

    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::Hoe,
        target: tile_center(8, 8),
    });
    app.update();

    let grid = app.world().resource::<SoilGrid>();
    for cell in [(1, 1), (2, 5), (8, 8)] {
        assert!(
            grid.is_watered_cell(cell),
            "rain till should water {:?}",
            cell
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: Watering can requires a tilled tile
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_watering_can_requires_tilled_soil() {
    let mut app = build_test_app();
    let mut grid = open_grid();
    grid.till_at(tile_center(3, 3));
    app.insert_resource(grid);
    app.add_systems(Update, soil_tools::handle_watering_can_tool_use);
    enter_playing_state(&mut app);

    // Untilled target: nothing happens.
    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::WateringCan,
        target: tile_center(9, 9),
    });
    // Tilled target: becomes watered.
    app.world_mut().send_event(ToolUseEvent {
        tool: ToolKind::WateringCan,
        target: tile_center(3, 3),
    });
    app.update();

    let grid = app.world().resource::<SoilGrid>();
    assert!(!grid.is_watered_cell((9, 9)));
    assert!(grid.is_watered_cell((3, 3)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: Seed use plants once and spends seeds only on success
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_seed_use_plants_and_consumes_one_seed() {
    let mut app = build_test_app();
    let mut grid = open_grid();
    grid.till_at(tile_center(2, 2));
    app.insert_resource(grid);
    app.insert_resource(populated_registry());
    app.add_systems(Update, soil_tools::handle_seed_use);
    enter_playing_state(&mut app);

    let before = app
        .world()
        .resource::<Inventory>()
        .seed_count(SpeciesId::Tomato);

    app.world_mut().send_event(SeedUseEvent {
        species: SpeciesId::Tomato,
        target: tile_center(2, 2),
    });
    app.update();

    {
        let grid = app.world().resource::<SoilGrid>();
        assert_eq!(grid.plant_count(), 1);
        assert!(grid.flags((2, 2)).contains(TileFlags::PLANTED));
    }
    assert_eq!(
        app.world()
            .resource::<Inventory>()
            .seed_count(SpeciesId::Tomato),
        before - 1
    );

    // A second seed on the same tile is dropped and nothing is spent.
    app.world_mut().send_event(SeedUseEvent {
        species: SpeciesId::Tomato,
        target: tile_center(2, 2),
    });
    app.update();

    assert_eq!(app.world().resource::<SoilGrid>().plant_count(), 1);
    assert_eq!(
        app.world()
            .resource::<Inventory>()
            .seed_count(SpeciesId::Tomato),
        before - 1
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: Day end — growth against the ended day's water, then reset
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_day_end_grows_then_dries() {
    let mut app = build_test_app();
    let mut grid = open_grid();
    let registry = populated_registry();
    grid.till_at(tile_center(5, 5));
    grid.plant_at(tile_center(5, 5), registry.get(SpeciesId::Corn).unwrap());
    grid.water_at(tile_center(5, 5));
    app.insert_resource(grid);
    app.insert_resource(registry);
    app.add_systems(Update, events_handler::on_day_end);
    enter_playing_state(&mut app);

    app.world_mut().send_event(DayEndEvent {
        day: 2,
        raining: false,
    });
    app.update();

    let grid = app.world().resource::<SoilGrid>();
    let plant = grid.plant((5, 5)).unwrap();
    assert_eq!(plant.age, 1.0, "watered corn gains a day of growth");
    assert!(!grid.is_watered_cell((5, 5)), "beds dry out overnight");
}

#[test]
fn test_rainy_day_end_rewaters_every_bed() {
    let mut app = build_test_app();
    let mut grid = open_grid();
    grid.till_at(tile_center(1, 2));
    grid.till_at(tile_center(6, 6));
    grid.water_at(tile_center(1, 2));
    app.insert_resource(grid);
    app.insert_resource(populated_registry());
    app.add_systems(Update, events_handler::on_day_end);
    enter_playing_state(&mut app);

    app.world_mut().send_event(DayEndEvent {
        day: 2,
        raining: true,
    });
    app.update();

    let grid = app.world().resource::<SoilGrid>();
    assert!(grid.is_watered_cell((1, 2)));
    assert!(grid.is_watered_cell((6, 6)));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: Tool-use countdown drives the tool effect
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_tool_press_arms_countdown_and_tills_on_expiry() {
    let mut app = build_test_app();
    app.insert_resource(open_grid());
    app.add_systems(
        Update,
        (
            player_tools::handle_action_input,
            player_tools::update_timers,
            soil_tools::handle_hoe_tool_use,
        )
            .chain(),
    );
    enter_playing_state(&mut app);

    // Facing defaults to Down; the tool lands one reach below center.
    let player_pos = tile_center(8, 8);
    app.world_mut().spawn((
        Player,
        PlayerMovement::default(),
        // Zero-length use countdown: the effect lands on the same tick.
        PlayerTimers::from_millis(0, 0),
        PlayerAnimation::default(),
        Hitbox::new(Vec2::new(10.0, 6.0)),
        Transform::from_translation(player_pos.extend(Z_PLAYER)),
    ));

    app.world_mut().resource_mut::<PlayerInput>().tool_use = true;
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();
    app.update();

    let grid = app.world().resource::<SoilGrid>();
    assert!(
        grid.flags((8, 7)).contains(TileFlags::TILLED),
        "tile in front of the player (facing down) should be tilled"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: Collision — downward contact halts y exactly, x keeps sliding
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_downward_collision_snaps_flush_while_sliding() {
    let mut app = build_test_app();
    app.add_systems(Update, movement::apply_movement);
    enter_playing_state(&mut app);

    let start = Vec2::new(40.0, 60.0);
    let player = app
        .world_mut()
        .spawn((
            Player,
            PlayerMovement {
                direction: Vec2::new(1.0, -1.0),
                ..default()
            },
            Hitbox::new(Vec2::new(10.0, 6.0)),
            Transform::from_translation(start.extend(Z_PLAYER)),
        ))
        .id();

    // A wide ledge below the player: rect spans y in [16, 32].
    app.world_mut().spawn((
        Obstacle,
        Hitbox::new(Vec2::new(200.0, 16.0)),
        Transform::from_translation(Vec3::new(40.0, 24.0, 0.0)),
    ));

    for _ in 0..60 {
        app.update();
    }

    let transform = app.world().entity(player).get::<Transform>().unwrap();
    // Hitbox is 6 tall and centered: bottom = y - 3 must rest on the
    // ledge top at 32.
    assert_eq!(transform.translation.y, 35.0, "hitbox bottom == ledge top");
    assert!(
        transform.translation.x > start.x + 10.0,
        "horizontal motion keeps sliding along the ledge"
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 9: Bed interaction sleeps, the calendar wakes and advances the day
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_sleeping_at_bed_advances_the_day() {
    let mut app = build_test_app();
    // Deterministic weather for the assertion below.
    let mut config = GameConfig::default();
    config.gameplay.rain_chance = 0.0;
    app.insert_resource(config);

    let mut grid = open_grid();
    let registry = populated_registry();
    grid.till_at(tile_center(4, 4));
    grid.plant_at(tile_center(4, 4), registry.get(SpeciesId::Corn).unwrap());
    grid.water_at(tile_center(4, 4));
    app.insert_resource(grid);
    app.insert_resource(registry);

    app.add_systems(
        Update,
        (
            interaction::handle_interact,
            process_sleep_requests,
            events_handler::on_day_end,
        )
            .chain(),
    );
    enter_playing_state(&mut app);

    let bed_pos = tile_center(2, 2);
    app.world_mut().spawn((
        Interactable {
            kind: InteractableKind::Bed,
        },
        Hitbox::new(Vec2::new(18.0, 22.0)),
        Transform::from_translation(bed_pos.extend(Z_MAIN)),
    ));
    app.world_mut().spawn((
        Player,
        PlayerMovement::default(),
        PlayerTimers::default(),
        PlayerAnimation::default(),
        Hitbox::new(Vec2::new(10.0, 6.0)),
        Transform::from_translation(bed_pos.extend(Z_PLAYER)),
    ));

    app.world_mut().resource_mut::<PlayerInput>().interact = true;
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();
    app.update();

    let calendar = app.world().resource::<Calendar>();
    assert_eq!(calendar.day, 2, "sleeping turns the day over");
    assert!(!calendar.raining, "rain chance 0 keeps the morning clear");
    assert!(
        !app.world().resource::<PlayerState>().sleeping,
        "the day cycle wakes the player"
    );

    let grid = app.world().resource::<SoilGrid>();
    assert_eq!(
        grid.plant((4, 4)).unwrap().age,
        1.0,
        "the watered crop grew overnight"
    );
    assert!(!grid.is_watered_cell((4, 4)), "the bed dried out");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 10: Full lifecycle — till, plant, water, grow, walk-over harvest
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_full_crop_lifecycle_ends_in_harvest() {
    let mut app = build_test_app();
    let mut grid = open_grid();
    let registry = populated_registry();
    let cell = (6, 6);
    let p = tile_center(cell.0, cell.1);

    grid.till_at(p);
    grid.plant_at(p, registry.get(SpeciesId::Corn).unwrap());
    app.insert_resource(grid);
    app.insert_resource(registry);

    app.add_systems(Update, (events_handler::on_day_end, harvest::harvest_on_overlap));
    enter_playing_state(&mut app);

    // Park the player away from the crop while it grows.
    let player = app
        .world_mut()
        .spawn((
            Player,
            PlayerMovement::default(),
            Hitbox::new(Vec2::new(10.0, 6.0)),
            Transform::from_translation(tile_center(1, 1).extend(Z_PLAYER)),
        ))
        .id();

    // Corn ripens after 3 watered days.
    for day in 2..=4 {
        app.world_mut().resource_mut::<SoilGrid>().water_at(p);
        app.world_mut().send_event(DayEndEvent {
            day,
            raining: false,
        });
        app.update();
    }

    assert!(
        app.world()
            .resource::<SoilGrid>()
            .plant(cell)
            .unwrap()
            .harvestable
    );

    // Walk onto the crop tile: the overlap harvests it.
    app.world_mut()
        .entity_mut(player)
        .get_mut::<Transform>()
        .unwrap()
        .translation = p.extend(Z_PLAYER);
    app.update();

    let grid = app.world().resource::<SoilGrid>();
    assert_eq!(grid.plant_count(), 0, "harvest removed the plant");
    assert!(
        !grid.flags(cell).contains(TileFlags::PLANTED),
        "the cell is open for replanting"
    );
    assert!(
        grid.flags(cell).contains(TileFlags::TILLED),
        "harvest keeps the tilled bed"
    );
    assert_eq!(
        app.world()
            .resource::<Inventory>()
            .produce_count(SpeciesId::Corn),
        1
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 11: Shop toggle flips the game state both ways
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_shop_toggle_flips_state() {
    let mut app = build_test_app();
    app.add_systems(Update, shop::handle_shop_toggle);
    enter_playing_state(&mut app);

    app.world_mut().send_event(ShopToggleEvent);
    app.update();
    app.update();
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Shop
    );

    app.world_mut().send_event(ShopToggleEvent);
    app.update();
    app.update();
    assert_eq!(
        app.world().resource::<State<GameState>>().get(),
        &GameState::Playing
    );
}
