//! Abilities module - the player's combat abilities and how power-ups
//! change them.

mod components;
mod effects;
mod plugin;
mod systems;
mod targeting;

pub use components::*;
pub use effects::{apply_effect, PlayerEffectApplier};
pub use plugin::AbilitiesPlugin;
pub use targeting::nearest_targets;
