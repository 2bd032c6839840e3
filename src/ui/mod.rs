//! UI module - menus, HUD, and the power-up choice screen.

mod hud;
mod level_up;
mod plugin;

pub use plugin::UiPlugin;
