use chrono::{DateTime, Utc};
use serde::Serialize;

/// Fire-and-forget presentation cues. The engine never waits on or branches
/// on their handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Move,
    Collect,
    Success,
    Fail,
    Reward,
}

/// Services the engine consumes but does not own: energy and currency
/// ledgers, run statistics, and the effects channel.
pub trait Backend {
    /// Checks the energy balance and debits `cost` in one step.
    fn check_and_deduct_energy(&mut self, cost: u32) -> bool;

    fn credit_currency(&mut self, amount: u64);

    /// Called exactly once for every run that reaches a terminal result.
    fn record_run_outcome(&mut self, reward: u64, success: bool);

    fn play_effect(&mut self, effect: Effect);
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    pub reward: u64,
    pub success: bool,
    pub finished_at: DateTime<Utc>,
}

/// In-process backend: an energy pool, a currency balance and a run log.
#[derive(Clone, Debug, Default)]
pub struct LocalLedger {
    energy: u32,
    balance: u64,
    history: Vec<RunRecord>,
    effects: Vec<Effect>,
}

impl LocalLedger {
    pub fn new(energy: u32) -> Self {
        Self {
            energy,
            ..Self::default()
        }
    }

    pub fn energy(&self) -> u32 {
        self.energy
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn history(&self) -> &[RunRecord] {
        &self.history
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }
}

impl Backend for LocalLedger {
    fn check_and_deduct_energy(&mut self, cost: u32) -> bool {
        match self.energy.checked_sub(cost) {
            Some(rest) => {
                self.energy = rest;
                true
            }
            None => false,
        }
    }

    fn credit_currency(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    fn record_run_outcome(&mut self, reward: u64, success: bool) {
        self.history.push(RunRecord {
            reward,
            success,
            finished_at: Utc::now(),
        });
    }

    fn play_effect(&mut self, effect: Effect) {
        self.effects.push(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_is_only_debited_when_sufficient() {
        let mut ledger = LocalLedger::new(15);
        assert!(ledger.check_and_deduct_energy(10));
        assert_eq!(ledger.energy(), 5);
        assert!(!ledger.check_and_deduct_energy(10));
        assert_eq!(ledger.energy(), 5);
    }

    #[test]
    fn outcomes_and_credits_accumulate() {
        let mut ledger = LocalLedger::new(0);
        ledger.credit_currency(30);
        ledger.credit_currency(12);
        ledger.record_run_outcome(42, true);
        ledger.record_run_outcome(0, false);
        assert_eq!(ledger.balance(), 42);
        assert_eq!(ledger.history().len(), 2);
        assert!(ledger.history()[0].success);
        assert_eq!(ledger.history()[1].reward, 0);
    }
}
