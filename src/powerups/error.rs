//! Error types for the power-up core and its data loading.

use thiserror::Error;

use super::definition::PowerUpId;
use super::rarity::Rarity;

/// Configuration problems detected while building the catalog or the
/// rarity weight table. These are fatal: the game must not enter play.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// A rarity tier has no weight configured.
    #[error("No selection weight configured for rarity {0:?}")]
    MissingRarityWeight(Rarity),

    /// A weight is zero, negative, or not a finite number.
    #[error("Rarity {rarity:?} has invalid weight {weight}, weights must be finite and positive")]
    InvalidRarityWeight { rarity: Rarity, weight: f64 },

    /// Weights are individually valid but their sum is not a finite number.
    #[error("Rarity weights add up to {0}, the total must be finite")]
    WeightTotalNotFinite(f64),

    /// Two definitions share the same identity.
    #[error("Duplicate power-up definition '{0}'")]
    DuplicateDefinition(PowerUpId),
}

/// Errors reported when the presentation layer answers an offer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceError {
    /// No offer is currently presented.
    #[error("No power-up choice is currently being offered")]
    NotAwaitingChoice,

    /// The chosen power-up is not one of the presented choices.
    #[error("Power-up '{0}' is not part of the current offer")]
    NotOffered(PowerUpId),
}

/// Errors that can occur when loading the power-up data file.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// The file parsed but describes an unusable configuration.
    #[error("Invalid power-up configuration: {0}")]
    Invalid(#[from] ConfigurationError),
}
