//! Combat systems - enemy waves, movement, contact damage and deaths.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use super::components::*;
use crate::core::{DamageEvent, DeathEvent, ExperienceGainedEvent, GameState, PlayState};
use crate::player::Player;
use crate::powerups::no_choice_pending;

/// Enemies closer than this touch the player.
const CONTACT_RANGE: f32 = 0.9;

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    Spawn,
    Movement,
    Damage,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        // Resources
        .init_resource::<WaveSpawner>()

        // System ordering
        .configure_sets(
            Update,
            (CombatSet::Spawn, CombatSet::Movement, CombatSet::Damage)
                .chain()
                .run_if(in_state(GameState::InGame))
                .run_if(in_state(PlayState::Playing))
                .run_if(no_choice_pending),
        )
        .add_systems(Update, spawn_waves.in_set(CombatSet::Spawn))
        .add_systems(
            Update,
            (move_enemies, enemy_contact_damage).chain().in_set(CombatSet::Movement),
        )
        .add_systems(
            Update,
            (apply_damage, handle_deaths).chain().in_set(CombatSet::Damage),
        )

        // A new run starts with fresh waves
        .add_systems(OnEnter(GameState::MainMenu), cleanup_enemies)
        .add_systems(OnEnter(GameState::GameOver), cleanup_enemies);
}

/// Spawn a ring of enemies around the player each time the wave timer fires.
fn spawn_waves(
    mut commands: Commands,
    time: Res<Time>,
    mut spawner: ResMut<WaveSpawner>,
    player_query: Query<&Transform, With<Player>>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };

    spawner.timer.tick(time.delta());
    if !spawner.timer.just_finished() {
        return;
    }

    let count = spawner.next_wave_size();
    let offset: f32 = rand::thread_rng().gen_range(0.0..TAU);

    for i in 0..count {
        let angle = offset + TAU * i as f32 / count as f32;
        let position = player_transform.translation
            + Vec3::new(angle.cos(), 0.0, angle.sin()) * spawner.spawn_radius;

        commands.spawn((
            Enemy,
            EnemyStats::default(),
            Health::new(20.0),
            Transform::from_translation(position),
        ));
    }

    spawner.waves_spawned += 1;
    debug!("Spawned wave {} with {} enemies", spawner.waves_spawned, count);
}

/// Walk enemies toward the player.
fn move_enemies(
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<(&mut Transform, &EnemyStats, Option<&Slowed>), With<Enemy>>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };
    let dt = time.delta_secs();

    for (mut transform, stats, slowed) in enemy_query.iter_mut() {
        let to_player = player_transform.translation - transform.translation;
        if to_player.length() <= CONTACT_RANGE {
            continue;
        }

        let slow = slowed.map_or(0.0, |s| s.0);
        let speed = stats.move_speed * (1.0 - slow);
        transform.translation += to_player.normalize() * speed * dt;
    }
}

/// Enemies touching the player damage them over time.
fn enemy_contact_damage(
    time: Res<Time>,
    player_query: Query<(Entity, &Transform), With<Player>>,
    enemy_query: Query<(&Transform, &EnemyStats), With<Enemy>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok((player, player_transform)) = player_query.get_single() else {
        return;
    };
    let dt = time.delta_secs();

    let total: f32 = enemy_query
        .iter()
        .filter(|(transform, _)| {
            transform.translation.distance(player_transform.translation) <= CONTACT_RANGE
        })
        .map(|(_, stats)| stats.contact_damage * dt)
        .sum();

    if total > 0.0 {
        damage_events.send(DamageEvent {
            target: player,
            amount: total,
        });
    }
}

/// Apply damage events to health, reporting each death once.
fn apply_damage(
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<&mut Health>,
    mut death_events: EventWriter<DeathEvent>,
) {
    for event in damage_events.read() {
        let Ok(mut health) = health_query.get_mut(event.target) else {
            continue;
        };

        if health.is_dead() {
            continue;
        }

        health.take_damage(event.amount);
        if health.is_dead() {
            death_events.send(DeathEvent {
                entity: event.target,
            });
        }
    }
}

/// Despawn dead enemies for experience; the player's death ends the run.
fn handle_deaths(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    enemy_query: Query<&EnemyStats, With<Enemy>>,
    player_query: Query<(), With<Player>>,
    mut experience_events: EventWriter<ExperienceGainedEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in death_events.read() {
        if let Ok(stats) = enemy_query.get(event.entity) {
            experience_events.send(ExperienceGainedEvent {
                amount: stats.xp_reward,
            });
            commands.entity(event.entity).despawn_recursive();
        } else if player_query.get(event.entity).is_ok() {
            info!("Player died");
            next_state.set(GameState::GameOver);
        }
    }
}

/// Remove all enemies and restart the wave schedule.
fn cleanup_enemies(
    mut commands: Commands,
    enemy_query: Query<Entity, With<Enemy>>,
    mut spawner: ResMut<WaveSpawner>,
) {
    for entity in enemy_query.iter() {
        commands.entity(entity).despawn_recursive();
    }
    *spawner = WaveSpawner::default();
}
