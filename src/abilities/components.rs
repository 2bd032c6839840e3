//! Ability components: what the player's power-ups add up to.

use bevy::prelude::*;

/// Highest slow the water veil can reach.
pub const MAX_VEIL_SLOW: f32 = 0.8;

/// The player's current ability loadout. Power-ups only ever add to it.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerAbilities {
    /// Number of fireballs orbiting the player
    pub fireballs: u32,
    /// Contact damage per fireball hit
    pub fireball_damage: f32,
    pub orbit_radius: f32,
    /// Enemies hit per lightning strike
    pub lightning_targets: u32,
    pub lightning_damage: f32,
    /// Health restored per heal pulse
    pub heal_amount: f32,
    /// Slow applied to enemies inside the veil (0.0 to MAX_VEIL_SLOW)
    pub veil_slow: f32,
    pub veil_radius: f32,
}

impl Default for PlayerAbilities {
    fn default() -> Self {
        Self {
            fireballs: 0,
            fireball_damage: 0.0,
            orbit_radius: 2.5,
            // Starting weapon: a single weak strike
            lightning_targets: 1,
            lightning_damage: 10.0,
            heal_amount: 0.0,
            veil_slow: 0.0,
            veil_radius: 3.5,
        }
    }
}

/// Cooldowns for periodic abilities, advanced once per frame.
#[derive(Component)]
pub struct AbilityTimers {
    pub lightning: Timer,
    pub heal: Timer,
    pub fireball: Timer,
}

impl Default for AbilityTimers {
    fn default() -> Self {
        Self {
            lightning: Timer::from_seconds(1.5, TimerMode::Repeating),
            heal: Timer::from_seconds(3.0, TimerMode::Repeating),
            fireball: Timer::from_seconds(0.5, TimerMode::Repeating),
        }
    }
}
