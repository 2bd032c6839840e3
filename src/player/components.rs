//! Player-related components.

use bevy::prelude::*;

use crate::abilities::{AbilityTimers, PlayerAbilities};
use crate::combat::Health;
use crate::progression::Experience;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// Starting maximum health.
pub const PLAYER_BASE_HEALTH: f32 = 100.0;

/// Spawn a fresh player at the origin.
pub fn spawn_player(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            Player,
            Health::new(PLAYER_BASE_HEALTH),
            Experience::default(),
            PlayerAbilities::default(),
            AbilityTimers::default(),
            Transform::default(),
        ))
        .id()
}
