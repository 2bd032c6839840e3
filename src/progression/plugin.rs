//! Progression plugin - experience and level-ups.

use bevy::prelude::*;

use super::components::Experience;
use super::data::{load_experience_curve, ExperienceCurve};
use crate::core::{ExperienceGainedEvent, GameState, LevelUpEvent};
use crate::player::Player;

/// Progression plugin - turns experience into level-up events.
pub struct ProgressionPlugin;

impl Plugin for ProgressionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_experience_curve).add_systems(
            Update,
            award_experience
                .run_if(in_state(GameState::InGame))
                .run_if(resource_exists::<ExperienceCurve>),
        );
    }
}

/// Add gained experience to the player, one `LevelUpEvent` per level.
fn award_experience(
    mut gained: EventReader<ExperienceGainedEvent>,
    curve: Res<ExperienceCurve>,
    mut player_query: Query<(Entity, &mut Experience), With<Player>>,
    mut level_ups: EventWriter<LevelUpEvent>,
) {
    let Ok((player, mut experience)) = player_query.get_single_mut() else {
        gained.clear();
        return;
    };

    for event in gained.read() {
        for new_level in experience.gain(event.amount, &curve) {
            info!("Reached level {}", new_level);
            level_ups.send(LevelUpEvent { player, new_level });
        }
    }
}
