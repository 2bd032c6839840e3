//! Player module - the player entity and its lifecycle.

mod components;
mod plugin;

pub use components::*;
pub use plugin::PlayerPlugin;
