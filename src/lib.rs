//! Moksha - an action RPG built around level-up power-up choices.
//!
//! Enemies come in waves, abilities kill them, experience levels the
//! player up, and every level-up offers a handful of power-ups drawn by
//! rarity. Picks stack into the player's abilities for the rest of the run.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, pause handling
//! - **Power-ups**: Catalog, rarity weights, run ledger, weighted selection,
//!   level-up orchestration
//! - **Progression**: Experience, levels
//! - **Abilities**: Lightning, orbiting fireballs, healing, water veil
//! - **Combat**: Health, enemy waves, damage, deaths
//! - **Player**: The player entity
//! - **UI**: Menus, HUD, power-up choice screen
//!
//! The power-up core (`powerups` minus its plugin) has no ECS dependency
//! and can be driven directly.

pub mod abilities;
pub mod combat;
pub mod core;
pub mod player;
pub mod powerups;
pub mod progression;
pub mod ui;

use bevy::prelude::*;

/// Gameplay plugins without any presentation.
pub struct MokshaGamePlugin;

impl Plugin for MokshaGamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Power-up selection and stacking
            .add_plugins(powerups::PowerUpPlugin)

            // Experience and levels
            .add_plugins(progression::ProgressionPlugin)

            // Player, abilities and enemies
            .add_plugins(player::PlayerPlugin)
            .add_plugins(abilities::AbilitiesPlugin)
            .add_plugins(combat::CombatPlugin);
    }
}

/// Main game plugin that adds all sub-plugins.
pub struct MokshaPlugin;

impl Plugin for MokshaPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MokshaGamePlugin)
            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
