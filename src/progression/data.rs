//! Experience curve loaded from an external RON file.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

const CURVE_PATH: &str = "assets/data/progression.ron";

/// How much experience each level needs.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
pub struct ExperienceCurve {
    /// Experience needed to go from level 1 to level 2
    pub base: f32,
    /// Multiplier applied per level
    pub growth: f32,
}

impl Default for ExperienceCurve {
    fn default() -> Self {
        Self {
            base: 10.0,
            growth: 1.35,
        }
    }
}

impl ExperienceCurve {
    /// Experience needed to advance from `level` to the next one.
    pub fn required_for(&self, level: u32) -> u32 {
        let exponent = level.saturating_sub(1) as i32;
        (self.base * self.growth.powi(exponent)).round().max(1.0) as u32
    }

    /// Load the curve from RON, falling back to defaults.
    pub fn load() -> Self {
        match fs::read_to_string(CURVE_PATH) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(curve) => {
                    info!("Loaded experience curve from {}", CURVE_PATH);
                    curve
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", CURVE_PATH, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", CURVE_PATH, e);
                Self::default()
            }
        }
    }
}

/// System to load the experience curve at startup.
pub fn load_experience_curve(mut commands: Commands, existing: Option<Res<ExperienceCurve>>) {
    if existing.is_none() {
        commands.insert_resource(ExperienceCurve::load());
    }
}
