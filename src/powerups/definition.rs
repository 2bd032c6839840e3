//! Power-up definitions: plain data loaded from configuration.
//!
//! A definition only describes what a power-up is. What it does to the
//! player is decided by an [`EffectApplier`](super::EffectApplier) that
//! dispatches on the [`PowerUpEffect`] tag.

use std::fmt;

use serde::Deserialize;

use super::rarity::Rarity;

/// Unique identity of a power-up definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct PowerUpId(String);

impl PowerUpId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PowerUpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PowerUpId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// What a power-up does, with the per-stack magnitude of the effect.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum PowerUpEffect {
    /// One more fireball orbiting the player, plus contact damage.
    OrbitingFireballs { damage: f32 },
    /// One more lightning target per strike, plus strike damage.
    LightningStrike { damage: f32 },
    /// Periodic heal amount.
    Healing { amount: f32 },
    /// Slow applied to enemies inside the veil (0.0 to 1.0).
    WaterVeil { slow: f32 },
    /// Raises maximum health.
    MaxHealth { amount: f32 },
}

impl PowerUpEffect {
    /// Short kind name for logs and UI.
    pub fn kind_label(&self) -> &'static str {
        match self {
            PowerUpEffect::OrbitingFireballs { .. } => "Fireballs",
            PowerUpEffect::LightningStrike { .. } => "Lightning",
            PowerUpEffect::Healing { .. } => "Healing",
            PowerUpEffect::WaterVeil { .. } => "Water Veil",
            PowerUpEffect::MaxHealth { .. } => "Vitality",
        }
    }
}

fn default_can_stack() -> bool {
    true
}

/// A power-up definition loaded from RON.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PowerUpDefinition {
    pub id: PowerUpId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub rarity: Rarity,
    /// Whether the power-up can be acquired more than once.
    #[serde(default = "default_can_stack")]
    pub can_stack: bool,
    /// Maximum stack count, 0 = unlimited. Ignored when `can_stack` is false.
    #[serde(default)]
    pub max_stacks: u32,
    pub effect: PowerUpEffect,
}

impl PowerUpDefinition {
    /// A stackable, uncapped definition named after its id.
    pub fn new(id: impl Into<String>, rarity: Rarity, effect: PowerUpEffect) -> Self {
        let id = PowerUpId::new(id);
        Self {
            name: id.to_string(),
            id,
            description: String::new(),
            rarity,
            can_stack: true,
            max_stacks: 0,
            effect,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Make the definition a one-time pick.
    pub fn unique(mut self) -> Self {
        self.can_stack = false;
        self
    }

    pub fn with_max_stacks(mut self, max_stacks: u32) -> Self {
        self.max_stacks = max_stacks;
        self
    }

    /// Whether the stacking rules allow another acquisition at `stacks`.
    pub fn is_eligible(&self, stacks: u32) -> bool {
        if self.can_stack {
            self.max_stacks == 0 || stacks < self.max_stacks
        } else {
            stacks == 0
        }
    }
}
