//! Experience and level tracking.

use bevy::prelude::*;

use super::data::ExperienceCurve;

/// The player's level and progress toward the next one.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct Experience {
    pub level: u32,
    /// Experience collected since the last level-up
    pub current: u32,
}

impl Default for Experience {
    fn default() -> Self {
        Self {
            level: 1,
            current: 0,
        }
    }
}

impl Experience {
    /// Add experience and return every level reached, in order.
    pub fn gain(&mut self, amount: u32, curve: &ExperienceCurve) -> Vec<u32> {
        self.current += amount;

        let mut reached = Vec::new();
        loop {
            let needed = curve.required_for(self.level);
            if self.current < needed {
                break;
            }
            self.current -= needed;
            self.level += 1;
            reached.push(self.level);
        }
        reached
    }

    /// Fraction of the way to the next level (0.0 to 1.0).
    pub fn progress(&self, curve: &ExperienceCurve) -> f32 {
        self.current as f32 / curve.required_for(self.level) as f32
    }
}
