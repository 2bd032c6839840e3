//! Level-up orchestration: queueing level-ups and resolving one choice
//! screen at a time.

use bevy::log::{debug, info};
use rand::Rng;

use super::catalog::PowerUpCatalog;
use super::definition::{PowerUpDefinition, PowerUpId};
use super::error::ChoiceError;
use super::ledger::AcquisitionLedger;
use super::rarity::RarityWeightTable;
use super::selector::{select, SelectionResult};

/// Applies a chosen power-up to whoever owns the run.
///
/// Called synchronously with the stack count the pick brings the power-up
/// to. Implementations should log and no-op when their prerequisites are
/// missing; the orchestrator records the pick either way.
pub trait EffectApplier {
    fn apply(&mut self, definition: &PowerUpDefinition, stacks: u32);
}

/// Where the orchestrator is in the level-up cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OrchestratorState {
    /// No choice is being presented.
    #[default]
    Idle,
    /// Waiting for the player to pick one of these.
    AwaitingChoice(SelectionResult),
}

/// Owns everything a run needs to turn level-ups into power-ups: the
/// catalog, the rarity weights, the run's ledger and the random source.
#[derive(Debug)]
pub struct LevelUpOrchestrator<R> {
    catalog: PowerUpCatalog,
    weights: RarityWeightTable,
    ledger: AcquisitionLedger,
    rng: R,
    choices_per_level: usize,
    state: OrchestratorState,
    /// Level-ups received but not yet resolved, including the one whose
    /// offer is on screen.
    queued: u32,
    offer_serial: u64,
}

impl<R: Rng> LevelUpOrchestrator<R> {
    pub fn new(
        catalog: PowerUpCatalog,
        weights: RarityWeightTable,
        choices_per_level: usize,
        rng: R,
    ) -> Self {
        Self {
            catalog,
            weights,
            ledger: AcquisitionLedger::new(),
            rng,
            choices_per_level,
            state: OrchestratorState::Idle,
            queued: 0,
            offer_serial: 0,
        }
    }

    /// Queue a level-up. Returns the offer if this call put a new one on
    /// screen; level-ups arriving while a choice is pending just wait.
    pub fn on_level_up(&mut self, new_level: u32) -> Option<&SelectionResult> {
        self.queued += 1;
        debug!("Level {} queued ({} pending)", new_level, self.queued);

        let serial = self.offer_serial;
        if self.state == OrchestratorState::Idle {
            self.advance();
        }
        self.newly_presented(serial)
    }

    /// Resolve the current offer with the player's pick.
    ///
    /// On success the effect is applied, the pick recorded, and the next
    /// queued level-up (if any) presented; that new offer is returned.
    pub fn on_selection<A>(
        &mut self,
        id: &PowerUpId,
        applier: &mut A,
    ) -> Result<Option<&SelectionResult>, ChoiceError>
    where
        A: EffectApplier + ?Sized,
    {
        let OrchestratorState::AwaitingChoice(offer) = &self.state else {
            return Err(ChoiceError::NotAwaitingChoice);
        };
        if !offer.contains(id) {
            return Err(ChoiceError::NotOffered(id.clone()));
        }
        let Some(definition) = self.catalog.get(id) else {
            return Err(ChoiceError::NotOffered(id.clone()));
        };

        let stacks = self.ledger.stacks_of(id) + 1;
        applier.apply(definition, stacks);
        self.ledger.record_acquisition(id);
        info!("Acquired power-up '{}' (stack {})", id, stacks);

        self.queued = self.queued.saturating_sub(1);
        self.state = OrchestratorState::Idle;

        let serial = self.offer_serial;
        self.advance();
        Ok(self.newly_presented(serial))
    }

    /// Abandon the run: drop queued level-ups, go idle, clear the ledger.
    pub fn reset(&mut self) {
        self.queued = 0;
        self.state = OrchestratorState::Idle;
        self.ledger.reset();
    }

    /// Present the next offer, consuming level-ups that have nothing left
    /// to offer.
    fn advance(&mut self) {
        while self.queued > 0 {
            let offer = select(
                &self.catalog,
                &self.ledger,
                &self.weights,
                self.choices_per_level,
                &mut self.rng,
            );

            if offer.is_empty() {
                info!("No eligible power-ups left, level-up resolved without a choice");
                self.queued -= 1;
                continue;
            }

            self.offer_serial += 1;
            self.state = OrchestratorState::AwaitingChoice(offer);
            return;
        }

        self.state = OrchestratorState::Idle;
    }
}

impl<R> LevelUpOrchestrator<R> {
    pub fn state(&self) -> &OrchestratorState {
        &self.state
    }

    pub fn is_awaiting_choice(&self) -> bool {
        matches!(self.state, OrchestratorState::AwaitingChoice(_))
    }

    /// The offer currently on screen.
    pub fn current_offer(&self) -> Option<&SelectionResult> {
        match &self.state {
            OrchestratorState::AwaitingChoice(offer) => Some(offer),
            OrchestratorState::Idle => None,
        }
    }

    /// Unresolved level-ups, including the one currently presented.
    pub fn pending_level_ups(&self) -> u32 {
        self.queued
    }

    /// Increments every time a new offer is presented.
    pub fn offer_serial(&self) -> u64 {
        self.offer_serial
    }

    pub fn catalog(&self) -> &PowerUpCatalog {
        &self.catalog
    }

    pub fn weights(&self) -> &RarityWeightTable {
        &self.weights
    }

    pub fn ledger(&self) -> &AcquisitionLedger {
        &self.ledger
    }

    pub fn choices_per_level(&self) -> usize {
        self.choices_per_level
    }

    fn newly_presented(&self, previous_serial: u64) -> Option<&SelectionResult> {
        if self.offer_serial != previous_serial {
            self.current_offer()
        } else {
            None
        }
    }
}
