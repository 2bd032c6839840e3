//! Rarity tiers and their relative selection weights.

use serde::Deserialize;

use super::error::ConfigurationError;

/// Ordered rarity classification controlling selection probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    /// Every tier, lowest first.
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Display name for UI.
    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Maps every rarity tier to a positive selection weight.
///
/// A table can only be built when all five tiers are covered, so lookups
/// are total once construction succeeded.
#[derive(Debug, Clone, PartialEq)]
pub struct RarityWeightTable {
    weights: [f64; 5],
}

impl RarityWeightTable {
    /// Build a table from configured `(rarity, weight)` entries.
    ///
    /// Later entries for the same tier replace earlier ones.
    pub fn from_entries<I>(entries: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (Rarity, f64)>,
    {
        let mut configured: [Option<f64>; 5] = [None; 5];

        for (rarity, weight) in entries {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ConfigurationError::InvalidRarityWeight { rarity, weight });
            }
            configured[rarity.index()] = Some(weight);
        }

        let mut weights = [0.0; 5];
        for rarity in Rarity::ALL {
            weights[rarity.index()] = configured[rarity.index()]
                .ok_or(ConfigurationError::MissingRarityWeight(rarity))?;
        }

        let total: f64 = weights.iter().sum();
        if !total.is_finite() {
            return Err(ConfigurationError::WeightTotalNotFinite(total));
        }

        Ok(Self { weights })
    }

    /// Relative selection weight of a tier.
    pub fn weight_of(&self, rarity: Rarity) -> f64 {
        self.weights[rarity.index()]
    }

    /// Chance of a tier when every tier is equally represented in the pool.
    pub fn probability_of(&self, rarity: Rarity) -> f64 {
        let total: f64 = self.weights.iter().sum();
        self.weight_of(rarity) / total
    }
}

impl Default for RarityWeightTable {
    fn default() -> Self {
        Self {
            weights: [60.0, 25.0, 10.0, 4.0, 1.0],
        }
    }
}
