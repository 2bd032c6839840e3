//! Power-up data loading from RON files.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::catalog::PowerUpCatalog;
use super::definition::PowerUpDefinition;
use super::error::{ConfigurationError, DataLoadError};
use super::rarity::{Rarity, RarityWeightTable};

/// Default location of the power-up data file.
pub const DEFAULT_POWER_UP_PATH: &str = "assets/data/powerups.ron";

fn default_choices_per_level() -> usize {
    3
}

/// Contents of `assets/data/powerups.ron`.
#[derive(Debug, Clone, Deserialize)]
pub struct PowerUpConfig {
    pub rarity_weights: HashMap<Rarity, f64>,
    /// How many distinct choices each level-up offers.
    #[serde(default = "default_choices_per_level")]
    pub choices_per_level: usize,
    pub powerups: Vec<PowerUpDefinition>,
}

impl PowerUpConfig {
    /// Parse a config from RON text. `origin` is only used in errors.
    pub fn from_ron(contents: &str, origin: &str) -> Result<Self, DataLoadError> {
        ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: origin.to_string(),
            details: e.to_string(),
        })
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, DataLoadError> {
        let display = path.display().to_string();

        if !path.exists() {
            return Err(DataLoadError::FileNotFound(display));
        }

        let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;

        Self::from_ron(&contents, &display)
    }

    /// Validate into the immutable catalog and weight table.
    pub fn into_parts(self) -> Result<(PowerUpCatalog, RarityWeightTable), ConfigurationError> {
        let weights = RarityWeightTable::from_entries(self.rarity_weights)?;
        let catalog = PowerUpCatalog::from_definitions(self.powerups)?;
        Ok((catalog, weights))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::powerups::PowerUpEffect;

    const BUNDLED: &str = include_str!("../../assets/data/powerups.ron");

    #[test]
    fn bundled_config_is_valid() {
        let config = PowerUpConfig::from_ron(BUNDLED, DEFAULT_POWER_UP_PATH).unwrap();
        assert!(config.choices_per_level >= 1);

        let (catalog, weights) = config.into_parts().unwrap();
        assert!(!catalog.is_empty());
        assert!(weights.weight_of(Rarity::Common) > weights.weight_of(Rarity::Legendary));
    }

    #[test]
    fn parses_definitions_with_defaults() {
        let source = r#"(
            rarity_weights: {
                Common: 10.0,
                Uncommon: 5.0,
                Rare: 3.0,
                Epic: 2.0,
                Legendary: 1.0,
            },
            powerups: [
                (
                    id: "spark",
                    name: "Spark",
                    rarity: Rare,
                    effect: LightningStrike(damage: 8.0),
                ),
                (
                    id: "veil",
                    name: "Veil",
                    description: "Slows nearby enemies.",
                    rarity: Epic,
                    can_stack: false,
                    effect: WaterVeil(slow: 0.3),
                ),
            ],
        )"#;

        let config = PowerUpConfig::from_ron(source, "inline").unwrap();
        assert_eq!(config.choices_per_level, 3);

        let (catalog, _) = config.into_parts().unwrap();
        let spark = catalog.get(&"spark".into()).unwrap();
        assert!(spark.can_stack);
        assert_eq!(spark.max_stacks, 0);
        assert_eq!(spark.effect, PowerUpEffect::LightningStrike { damage: 8.0 });

        let veil = catalog.get(&"veil".into()).unwrap();
        assert!(!veil.can_stack);
    }

    #[test]
    fn missing_weight_fails_validation() {
        let source = r#"(
            rarity_weights: { Common: 10.0, Rare: 3.0 },
            powerups: [],
        )"#;

        let config = PowerUpConfig::from_ron(source, "inline").unwrap();
        assert_eq!(
            config.into_parts().err(),
            Some(ConfigurationError::MissingRarityWeight(Rarity::Uncommon))
        );
    }

    #[test]
    fn malformed_ron_is_a_parse_error() {
        let result = PowerUpConfig::from_ron("(rarity_weights: ", "broken.ron");
        assert!(matches!(result, Err(DataLoadError::ParseError { path, .. }) if path == "broken.ron"));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = PowerUpConfig::load(Path::new("assets/data/does-not-exist.ron"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound(_))));
    }
}
