//! Progression module - experience, levels, and the level-up signal.

mod components;
mod data;
mod plugin;

pub use components::Experience;
pub use data::ExperienceCurve;
pub use plugin::ProgressionPlugin;
