//! Player plugin - spawning and cleanup of the player entity.

use bevy::prelude::*;

use super::components::*;
use crate::core::GameState;

/// Player plugin - one player per run, kept across pauses.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::InGame), ensure_player)
            .add_systems(OnEnter(GameState::MainMenu), despawn_player)
            .add_systems(OnEnter(GameState::GameOver), despawn_player);
    }
}

/// Spawn the player when a run starts. Resuming from pause keeps the
/// existing one.
fn ensure_player(mut commands: Commands, player_query: Query<(), With<Player>>) {
    if player_query.is_empty() {
        spawn_player(&mut commands);
        info!("Player spawned");
    }
}

fn despawn_player(mut commands: Commands, player_query: Query<Entity, With<Player>>) {
    for entity in player_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
