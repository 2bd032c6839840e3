//! Per-run record of acquired power-ups.

use std::collections::HashMap;

use super::definition::PowerUpId;

/// Maps acquired power-ups to their stack count.
///
/// Entries are created on first acquisition and never hold zero;
/// absence means the power-up has not been picked this run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcquisitionLedger {
    stacks: HashMap<PowerUpId, u32>,
}

impl AcquisitionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack count for a power-up, 0 if never acquired.
    pub fn stacks_of(&self, id: &PowerUpId) -> u32 {
        self.stacks.get(id).copied().unwrap_or(0)
    }

    /// Record one more acquisition and return the new stack count.
    ///
    /// No cap is enforced here, eligibility is the selector's concern.
    pub fn record_acquisition(&mut self, id: &PowerUpId) -> u32 {
        let count = self.stacks.entry(id.clone()).or_insert(0);
        *count += 1;
        *count
    }

    /// Forget everything (new run).
    pub fn reset(&mut self) {
        self.stacks.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PowerUpId, u32)> {
        self.stacks.iter().map(|(id, &count)| (id, count))
    }

    /// Sum of all stack counts.
    pub fn total_acquisitions(&self) -> u32 {
        self.stacks.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_power_up_has_no_stacks() {
        let ledger = AcquisitionLedger::new();
        assert_eq!(ledger.stacks_of(&"fireball".into()), 0);
        assert!(ledger.is_empty());
    }

    #[test]
    fn each_acquisition_adds_exactly_one() {
        let mut ledger = AcquisitionLedger::new();
        let id = PowerUpId::new("fireball");

        assert_eq!(ledger.record_acquisition(&id), 1);
        assert_eq!(ledger.record_acquisition(&id), 2);
        assert_eq!(ledger.record_acquisition(&id), 3);
        assert_eq!(ledger.stacks_of(&id), 3);
        assert_eq!(ledger.stacks_of(&"lightning".into()), 0);
    }

    #[test]
    fn reset_clears_all_entries() {
        let mut ledger = AcquisitionLedger::new();
        ledger.record_acquisition(&"a".into());
        ledger.record_acquisition(&"b".into());
        ledger.record_acquisition(&"b".into());
        assert_eq!(ledger.total_acquisitions(), 3);

        ledger.reset();

        assert!(ledger.is_empty());
        assert_eq!(ledger.stacks_of(&"b".into()), 0);
        assert_eq!(ledger.total_acquisitions(), 0);
    }
}
