//! Applying chosen power-ups to the player.

use bevy::prelude::*;

use super::components::{PlayerAbilities, MAX_VEIL_SLOW};
use crate::combat::Health;
use crate::powerups::{EffectApplier, PowerUpDefinition, PowerUpEffect};

/// Add one stack of `effect` to the player.
pub fn apply_effect(abilities: &mut PlayerAbilities, health: &mut Health, effect: PowerUpEffect) {
    match effect {
        PowerUpEffect::OrbitingFireballs { damage } => {
            abilities.fireballs += 1;
            abilities.fireball_damage += damage;
        }
        PowerUpEffect::LightningStrike { damage } => {
            abilities.lightning_targets += 1;
            abilities.lightning_damage += damage;
        }
        PowerUpEffect::Healing { amount } => {
            abilities.heal_amount += amount;
        }
        PowerUpEffect::WaterVeil { slow } => {
            abilities.veil_slow = (abilities.veil_slow + slow).min(MAX_VEIL_SLOW);
        }
        PowerUpEffect::MaxHealth { amount } => {
            health.maximum += amount;
            health.heal(amount);
        }
    }
}

/// Effect applier backed by the player entity's components.
///
/// Without a player (e.g. it died the same frame) the pick is still
/// recorded, the effect is skipped with a warning.
pub struct PlayerEffectApplier<'a> {
    player: Option<(&'a mut PlayerAbilities, &'a mut Health)>,
}

impl<'a> PlayerEffectApplier<'a> {
    pub fn new(player: Option<(&'a mut PlayerAbilities, &'a mut Health)>) -> Self {
        Self { player }
    }
}

impl EffectApplier for PlayerEffectApplier<'_> {
    fn apply(&mut self, definition: &PowerUpDefinition, stacks: u32) {
        let Some((abilities, health)) = self.player.as_mut() else {
            warn!("No player to apply '{}' to, effect skipped", definition.id);
            return;
        };

        apply_effect(abilities, health, definition.effect);
        debug!(
            "{} ({}) now at stack {}",
            definition.name,
            definition.effect.kind_label(),
            stacks
        );
    }
}
