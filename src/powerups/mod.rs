//! Power-ups module - rarity weights, catalog, per-run ledger, weighted
//! selection and the level-up orchestrator.
//!
//! Everything except the plugin is plain Rust and can be used without an
//! `App`.

mod catalog;
mod data;
mod definition;
mod error;
mod ledger;
mod orchestrator;
mod plugin;
mod rarity;
mod selector;

pub use catalog::PowerUpCatalog;
pub use data::{PowerUpConfig, DEFAULT_POWER_UP_PATH};
pub use definition::{PowerUpDefinition, PowerUpEffect, PowerUpId};
pub use error::{ChoiceError, ConfigurationError, DataLoadError};
pub use ledger::AcquisitionLedger;
pub use orchestrator::{EffectApplier, LevelUpOrchestrator, OrchestratorState};
pub use plugin::{no_choice_pending, PowerUpPlugin, PowerUpProgression, PowerUpSettings};
pub use rarity::{Rarity, RarityWeightTable};
pub use selector::{eligible, select, SelectionResult};
