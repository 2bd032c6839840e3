//! Weighted random selection of distinct power-up choices.

use bevy::log::debug;
use rand::Rng;

use super::catalog::PowerUpCatalog;
use super::definition::{PowerUpDefinition, PowerUpId};
use super::ledger::AcquisitionLedger;
use super::rarity::RarityWeightTable;

/// Ordered, duplicate-free list of offered power-ups (draw order).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionResult {
    choices: Vec<PowerUpId>,
}

impl SelectionResult {
    pub fn choices(&self) -> &[PowerUpId] {
        &self.choices
    }

    pub fn contains(&self, id: &PowerUpId) -> bool {
        self.choices.contains(id)
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PowerUpId> {
        self.choices.iter()
    }
}

/// Definitions the stacking rules currently allow, in catalog order.
pub fn eligible<'a>(
    catalog: &'a PowerUpCatalog,
    ledger: &AcquisitionLedger,
) -> Vec<&'a PowerUpDefinition> {
    catalog
        .all()
        .iter()
        .filter(|definition| definition.is_eligible(ledger.stacks_of(&definition.id)))
        .collect()
}

/// Draw up to `k` distinct eligible power-ups, weighted by rarity.
///
/// Each draw removes the chosen definition from the pool; the weights of
/// the others stay as configured. An exhausted pool yields an empty result.
pub fn select<R: Rng + ?Sized>(
    catalog: &PowerUpCatalog,
    ledger: &AcquisitionLedger,
    weights: &RarityWeightTable,
    k: usize,
    rng: &mut R,
) -> SelectionResult {
    let mut pool: Vec<(&PowerUpDefinition, f64)> = eligible(catalog, ledger)
        .into_iter()
        .map(|definition| (definition, weights.weight_of(definition.rarity)))
        .collect();

    if pool.is_empty() {
        debug!("No eligible power-ups left in a catalog of {}", catalog.len());
        return SelectionResult::default();
    }

    let draws = k.min(pool.len());
    let mut choices = Vec::with_capacity(draws);

    for _ in 0..draws {
        let index = draw_weighted(&pool, rng);
        let (definition, _) = pool.remove(index);
        choices.push(definition.id.clone());
    }

    SelectionResult { choices }
}

/// Pick one pool index with probability proportional to its weight.
fn draw_weighted<R: Rng + ?Sized>(pool: &[(&PowerUpDefinition, f64)], rng: &mut R) -> usize {
    let total: f64 = pool.iter().map(|(_, weight)| weight).sum();
    let roll = rng.gen_range(0.0..total);

    let mut cumulative = 0.0;
    for (index, (_, weight)) in pool.iter().enumerate() {
        cumulative += weight;
        if roll < cumulative {
            return index;
        }
    }

    // Rounding in the running sum can leave the roll just past the end.
    pool.len() - 1
}
