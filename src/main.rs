mod shared;
mod config;
mod input;
mod calendar;
mod player;
mod soil;
mod world;
mod data;
mod audio;
mod ui;

use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use shared::*;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Willowmere".into(),
                        resolution: WindowResolution::new(SCREEN_WIDTH, SCREEN_HEIGHT),
                        present_mode: PresentMode::AutoVsync,
                        resizable: true,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        // Game state
        .init_state::<GameState>()
        // Shared resources
        .init_resource::<Calendar>()
        .init_resource::<PlayerState>()
        .init_resource::<Inventory>()
        .init_resource::<SpeciesRegistry>()
        .init_resource::<KeyBindings>()
        .init_resource::<PlayerInput>()
        .init_resource::<InputContext>()
        // Events
        .add_event::<ToolUseEvent>()
        .add_event::<SeedUseEvent>()
        .add_event::<SleepRequestedEvent>()
        .add_event::<DayEndEvent>()
        .add_event::<ShopToggleEvent>()
        .add_event::<CropHarvestedEvent>()
        .add_event::<PlaySfxEvent>()
        .add_event::<PlayMusicEvent>()
        // Domain plugins
        .add_plugins(config::ConfigPlugin)
        .add_plugins(input::InputPlugin)
        .add_plugins(calendar::CalendarPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(soil::SoilPlugin)
        .add_plugins(world::WorldPlugin)
        .add_plugins(audio::AudioPlugin)
        .add_plugins(ui::UiPlugin)
        // Data loading
        .add_plugins(data::DataPlugin)
        // Camera
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Transform::from_scale(Vec3::splat(1.0 / PIXEL_SCALE)),
    ));
}
