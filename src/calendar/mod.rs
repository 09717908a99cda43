//! Calendar domain — the day cycle.
//!
//! Days only turn over when the player sleeps. Processing a sleep request
//! advances the counter, rolls the new day's weather, emits DayEndEvent
//! (which the soil domain uses to grow plants and reset water), and wakes
//! the player. The soil domain reads `Calendar::raining`; only this module
//! writes it.

use bevy::prelude::*;
use rand::Rng;

use crate::config::GameConfig;
use crate::shared::*;

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            process_sleep_requests.run_if(in_state(GameState::Playing)),
        );
    }
}

pub fn process_sleep_requests(
    mut sleep_events: EventReader<SleepRequestedEvent>,
    mut calendar: ResMut<Calendar>,
    mut player_state: ResMut<PlayerState>,
    config: Res<GameConfig>,
    mut day_end_events: EventWriter<DayEndEvent>,
    mut music_events: EventWriter<PlayMusicEvent>,
) {
    // Collapse multiple requests in one frame into a single night.
    if sleep_events.read().next().is_none() {
        return;
    }
    sleep_events.clear();

    calendar.day += 1;
    calendar.raining = roll_rain(config.gameplay.rain_chance);

    day_end_events.send(DayEndEvent {
        day: calendar.day,
        raining: calendar.raining,
    });

    // The sleep freeze ends here; input resumes next frame.
    player_state.sleeping = false;

    if calendar.raining {
        music_events.send(PlayMusicEvent {
            track_id: "rain".to_string(),
        });
    }

    info!(
        "[Calendar] Day {} begins — {}",
        calendar.day,
        if calendar.raining { "rain" } else { "clear skies" }
    );
}

fn roll_rain(chance: f32) -> bool {
    let chance = chance.clamp(0.0, 1.0) as f64;
    rand::thread_rng().gen_bool(chance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rain_roll_extremes() {
        for _ in 0..100 {
            assert!(!roll_rain(0.0));
            assert!(roll_rain(1.0));
        }
    }

    #[test]
    fn test_rain_roll_tolerates_out_of_range_chance() {
        // Config sanitizing already clamps, but the roll must never panic
        // even on a raw value.
        let _ = roll_rain(5.0);
        let _ = roll_rain(-3.0);
    }
}
