//! Abilities plugin - runs the player's power-up driven abilities.

use bevy::prelude::*;

use super::systems;
use crate::combat::CombatSet;
use crate::core::{GameState, PlayState};
use crate::powerups::no_choice_pending;

/// Abilities plugin - lightning, fireballs, healing, water veil.
pub struct AbilitiesPlugin;

impl Plugin for AbilitiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                systems::lightning_strikes,
                systems::orbiting_fireballs,
                systems::healing_pulse,
                systems::water_veil,
            )
                .before(CombatSet::Damage)
                .run_if(in_state(GameState::InGame))
                .run_if(in_state(PlayState::Playing))
                .run_if(no_choice_pending),
        );
    }
}
