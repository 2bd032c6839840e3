//! Ability systems - periodic strikes, heals, fireballs and the veil.

use bevy::prelude::*;

use super::components::{AbilityTimers, PlayerAbilities};
use super::targeting::nearest_targets;
use crate::combat::{Enemy, Health, Slowed};
use crate::core::DamageEvent;
use crate::player::Player;

/// Enemies further than this are never struck by lightning.
const LIGHTNING_RANGE: f32 = 15.0;

/// Half-width of the ring swept by orbiting fireballs.
const FIREBALL_REACH: f32 = 0.75;

/// Strike the nearest enemies whenever the lightning cooldown elapses.
pub fn lightning_strikes(
    time: Res<Time>,
    mut player_query: Query<(&Transform, &PlayerAbilities, &mut AbilityTimers), With<Player>>,
    enemy_query: Query<(Entity, &Transform), With<Enemy>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok((transform, abilities, mut timers)) = player_query.get_single_mut() else {
        return;
    };

    timers.lightning.tick(time.delta());
    if !timers.lightning.just_finished() || abilities.lightning_targets == 0 {
        return;
    }

    let origin = transform.translation;
    let in_range = enemy_query
        .iter()
        .map(|(entity, enemy_transform)| (entity, enemy_transform.translation))
        .filter(|(_, position)| origin.distance(*position) <= LIGHTNING_RANGE);

    for target in nearest_targets(origin, in_range, abilities.lightning_targets as usize) {
        damage_events.send(DamageEvent {
            target,
            amount: abilities.lightning_damage,
        });
    }
}

/// Burn enemies caught in the fireball ring.
pub fn orbiting_fireballs(
    time: Res<Time>,
    mut player_query: Query<(&Transform, &PlayerAbilities, &mut AbilityTimers), With<Player>>,
    enemy_query: Query<(Entity, &Transform), With<Enemy>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let Ok((transform, abilities, mut timers)) = player_query.get_single_mut() else {
        return;
    };

    timers.fireball.tick(time.delta());
    if !timers.fireball.just_finished() || abilities.fireballs == 0 {
        return;
    }

    for (entity, enemy_transform) in enemy_query.iter() {
        let distance = transform.translation.distance(enemy_transform.translation);
        if (distance - abilities.orbit_radius).abs() <= FIREBALL_REACH {
            damage_events.send(DamageEvent {
                target: entity,
                amount: abilities.fireball_damage,
            });
        }
    }
}

/// Restore health whenever the heal cooldown elapses.
pub fn healing_pulse(
    time: Res<Time>,
    mut player_query: Query<(&PlayerAbilities, &mut AbilityTimers, &mut Health), With<Player>>,
) {
    let Ok((abilities, mut timers, mut health)) = player_query.get_single_mut() else {
        return;
    };

    timers.heal.tick(time.delta());
    if timers.heal.just_finished() && abilities.heal_amount > 0.0 {
        health.heal(abilities.heal_amount);
    }
}

/// Slow enemies inside the water veil, release those that left it.
pub fn water_veil(
    mut commands: Commands,
    player_query: Query<(&Transform, &PlayerAbilities), With<Player>>,
    enemy_query: Query<(Entity, &Transform, Option<&Slowed>), With<Enemy>>,
) {
    let Ok((transform, abilities)) = player_query.get_single() else {
        return;
    };

    for (entity, enemy_transform, slowed) in enemy_query.iter() {
        let inside = abilities.veil_slow > 0.0
            && transform.translation.distance(enemy_transform.translation) <= abilities.veil_radius;

        match (inside, slowed) {
            (true, Some(current)) if current.0 == abilities.veil_slow => {}
            (true, _) => {
                commands.entity(entity).insert(Slowed(abilities.veil_slow));
            }
            (false, Some(_)) => {
                commands.entity(entity).remove::<Slowed>();
            }
            (false, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abilities::AbilitiesPlugin;
    use crate::core::{CorePlugin, GameState};
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;
    use std::collections::HashSet;
    use std::time::Duration;

    /// App in a run, with every frame advancing time by 100ms.
    fn abilities_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .add_plugins((CorePlugin, AbilitiesPlugin));

        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::InGame);
        app.update();
        app
    }

    /// Timers that all fire on the next 100ms frame.
    fn quick_timers() -> AbilityTimers {
        AbilityTimers {
            lightning: Timer::from_seconds(0.05, TimerMode::Repeating),
            heal: Timer::from_seconds(0.05, TimerMode::Repeating),
            fireball: Timer::from_seconds(0.05, TimerMode::Repeating),
        }
    }

    fn spawn_player(app: &mut App, abilities: PlayerAbilities, health: Health) -> Entity {
        app.world_mut()
            .spawn((Player, abilities, quick_timers(), health, Transform::default()))
            .id()
    }

    fn spawn_enemy_at(app: &mut App, position: Vec3) -> Entity {
        app.world_mut()
            .spawn((Enemy, Transform::from_translation(position)))
            .id()
    }

    fn damaged_targets(app: &App) -> Vec<(Entity, f32)> {
        let events = app.world().resource::<Events<DamageEvent>>();
        let mut cursor = events.get_cursor();
        cursor.read(events).map(|e| (e.target, e.amount)).collect()
    }

    #[test]
    fn lightning_strikes_the_nearest_enemies_in_range() {
        let mut app = abilities_app();
        spawn_player(
            &mut app,
            PlayerAbilities {
                lightning_targets: 2,
                lightning_damage: 12.0,
                ..default()
            },
            Health::new(100.0),
        );
        let near = spawn_enemy_at(&mut app, Vec3::new(2.0, 0.0, 0.0));
        let far = spawn_enemy_at(&mut app, Vec3::new(0.0, 0.0, 5.0));
        let middle = spawn_enemy_at(&mut app, Vec3::new(-3.0, 0.0, 0.0));
        spawn_enemy_at(&mut app, Vec3::new(LIGHTNING_RANGE + 1.0, 0.0, 0.0));

        app.update();

        let hits = damaged_targets(&app);
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|(_, amount)| *amount == 12.0));

        let struck: HashSet<Entity> = hits.iter().map(|(target, _)| *target).collect();
        assert_eq!(struck, HashSet::from([near, middle]));
        assert!(!struck.contains(&far));
    }

    #[test]
    fn lightning_ignores_enemies_out_of_range() {
        let mut app = abilities_app();
        spawn_player(&mut app, PlayerAbilities::default(), Health::new(100.0));
        spawn_enemy_at(&mut app, Vec3::new(0.0, 0.0, LIGHTNING_RANGE * 2.0));

        app.update();

        assert!(damaged_targets(&app).is_empty());
    }

    #[test]
    fn fireballs_burn_enemies_on_the_orbit() {
        let mut app = abilities_app();
        let abilities = PlayerAbilities {
            fireballs: 1,
            fireball_damage: 4.0,
            lightning_targets: 0,
            ..default()
        };
        let radius = abilities.orbit_radius;
        spawn_player(&mut app, abilities, Health::new(100.0));
        let on_orbit = spawn_enemy_at(&mut app, Vec3::new(radius, 0.0, 0.0));
        spawn_enemy_at(&mut app, Vec3::new(0.0, 0.0, radius + 3.0));

        app.update();

        assert_eq!(damaged_targets(&app), vec![(on_orbit, 4.0)]);
    }

    #[test]
    fn healing_pulse_restores_health() {
        let mut app = abilities_app();
        let mut health = Health::new(100.0);
        health.take_damage(50.0);
        let player = spawn_player(
            &mut app,
            PlayerAbilities {
                heal_amount: 10.0,
                ..default()
            },
            health,
        );

        app.update();

        assert_eq!(app.world().get::<Health>(player).unwrap().current, 60.0);
    }

    #[test]
    fn water_veil_slows_only_enemies_inside_it() {
        let mut app = abilities_app();
        let abilities = PlayerAbilities {
            veil_slow: 0.3,
            ..default()
        };
        let radius = abilities.veil_radius;
        spawn_player(&mut app, abilities, Health::new(100.0));
        let inside = spawn_enemy_at(&mut app, Vec3::new(radius - 1.0, 0.0, 0.0));
        let left = app
            .world_mut()
            .spawn((
                Enemy,
                Transform::from_xyz(radius + 5.0, 0.0, 0.0),
                Slowed(0.3),
            ))
            .id();

        app.update();

        assert_eq!(app.world().get::<Slowed>(inside), Some(&Slowed(0.3)));
        assert!(app.world().get::<Slowed>(left).is_none());
    }
}
