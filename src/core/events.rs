//! Global events used for cross-system communication.
//!
//! Events keep the experience tracker, the power-up core and the UI
//! decoupled. The tracker sends `LevelUpEvent`s, the power-up plugin turns
//! them into offers, and the choice screen answers with a
//! `PowerUpChosenEvent`.

use bevy::prelude::*;

use crate::powerups::PowerUpId;

/// Sent when an entity takes damage.
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Damage amount
    pub amount: f32,
}

/// Sent when an entity dies (health reaches 0).
///
/// Enemy deaths award experience, the player's death ends the run.
#[derive(Event, Debug, Clone)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
}

/// Sent when the player earns experience.
#[derive(Event, Debug, Clone)]
pub struct ExperienceGainedEvent {
    pub amount: u32,
}

/// Sent when the player levels up.
///
/// One event is sent per level crossed, in order, so a large experience
/// gain can produce several of these in the same frame.
#[derive(Event, Debug, Clone)]
pub struct LevelUpEvent {
    /// The player entity
    pub player: Entity,
    /// New level
    pub new_level: u32,
}

/// Sent whenever a new set of power-up choices is presented.
#[derive(Event, Debug, Clone)]
pub struct PowerUpOfferedEvent {
    /// Offered power-ups in draw order
    pub choices: Vec<PowerUpId>,
}

/// Sent by the presentation layer when the player picks a power-up.
#[derive(Event, Debug, Clone)]
pub struct PowerUpChosenEvent {
    pub id: PowerUpId,
}

/// Sent after a chosen power-up has been applied and recorded.
#[derive(Event, Debug, Clone)]
pub struct PowerUpAppliedEvent {
    pub id: PowerUpId,
    /// Stack count after this acquisition
    pub stacks: u32,
}
