//! Combat-related components.

use bevy::prelude::*;

/// Component for entities that can take damage.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.maximum - self.current).max(0.0);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn percentage(&self) -> f32 {
        self.current / self.maximum
    }
}

/// Marker component for enemies.
#[derive(Component)]
pub struct Enemy;

/// Per-enemy tuning.
#[derive(Component, Debug, Clone)]
pub struct EnemyStats {
    pub move_speed: f32,
    /// Damage per second while touching the player
    pub contact_damage: f32,
    /// Experience awarded on death
    pub xp_reward: u32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            move_speed: 1.6,
            contact_damage: 8.0,
            xp_reward: 3,
        }
    }
}

/// Movement slow applied by the water veil (0.0 to 1.0).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Slowed(pub f32);

/// Timed enemy waves around the player.
#[derive(Resource)]
pub struct WaveSpawner {
    pub timer: Timer,
    pub enemies_per_wave: u32,
    /// Extra enemies added to each following wave
    pub growth: u32,
    pub spawn_radius: f32,
    pub waves_spawned: u32,
}

impl Default for WaveSpawner {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(4.0, TimerMode::Repeating),
            enemies_per_wave: 4,
            growth: 1,
            spawn_radius: 12.0,
            waves_spawned: 0,
        }
    }
}

impl WaveSpawner {
    /// Enemy count of the next wave.
    pub fn next_wave_size(&self) -> u32 {
        self.enemies_per_wave + self.growth * self.waves_spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_is_clamped_to_remaining_health() {
        let mut health = Health::new(20.0);
        assert_eq!(health.take_damage(15.0), 15.0);
        assert_eq!(health.take_damage(15.0), 5.0);
        assert!(health.is_dead());
    }

    #[test]
    fn heal_does_not_exceed_maximum() {
        let mut health = Health::new(50.0);
        health.take_damage(10.0);
        assert_eq!(health.heal(25.0), 10.0);
        assert_eq!(health.current, 50.0);
        assert_eq!(health.percentage(), 1.0);
    }

    #[test]
    fn waves_grow() {
        let mut spawner = WaveSpawner::default();
        let first = spawner.next_wave_size();
        spawner.waves_spawned += 2;
        assert_eq!(spawner.next_wave_size(), first + 2 * spawner.growth);
    }
}
