//! Agent metrics shown in the stats panel
//!
//! A snapshot is never edited field by field. Each update produces a new
//! snapshot from the previous one plus a delta.

use serde::{Deserialize, Serialize};

use crate::record::RecordKind;

/// Point-in-time view of the agent's counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Total earned (USD)
    pub earned: f64,
    /// Total spent (USD)
    pub spent: f64,
    pub nfts_owned: u64,
    pub tokens_owned: u64,
    pub transactions: u64,
    pub thoughts: u64,
    /// Wallet balance (USD), random walk
    pub wallet_balance: f64,
}

impl Default for MetricsSnapshot {
    fn default() -> Self {
        Self {
            earned: 10_000.0,
            spent: 4_000.0,
            nfts_owned: 3,
            tokens_owned: 0,
            transactions: 0,
            thoughts: 900,
            wallet_balance: 5_000.0,
        }
    }
}

/// One drift step sampled by the metrics timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsDelta {
    pub earned: f64,
    pub spent: f64,
    pub nfts: u64,
    pub tokens: u64,
    pub wallet: f64,
}

impl MetricsSnapshot {
    /// Apply a timer drift step. Record-driven counters are carried over.
    pub fn drifted(&self, delta: &MetricsDelta) -> Self {
        Self {
            earned: self.earned + delta.earned,
            spent: self.spent + delta.spent,
            nfts_owned: self.nfts_owned.saturating_add(delta.nfts),
            tokens_owned: self.tokens_owned.saturating_add(delta.tokens),
            transactions: self.transactions,
            thoughts: self.thoughts,
            wallet_balance: self.wallet_balance + delta.wallet,
        }
    }

    /// Count an emitted record: thoughts for pure thoughts, transactions for actions.
    pub fn after_record(&self, kind: &RecordKind) -> Self {
        let (thoughts, transactions) = match kind {
            RecordKind::Thought => (1, 0),
            RecordKind::Action(_) => (0, 1),
            _ => (0, 0),
        };
        Self {
            thoughts: self.thoughts.saturating_add(thoughts),
            transactions: self.transactions.saturating_add(transactions),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ActionKind;

    #[test]
    fn test_default_matches_dashboard_seed_values() {
        let m = MetricsSnapshot::default();
        assert_eq!(m.nfts_owned, 3);
        assert_eq!(m.thoughts, 900);
        assert_eq!(m.wallet_balance, 5_000.0);
    }

    #[test]
    fn test_drift_keeps_record_counters() {
        let base = MetricsSnapshot {
            transactions: 7,
            thoughts: 901,
            ..MetricsSnapshot::default()
        };
        let next = base.drifted(&MetricsDelta {
            earned: 2.5,
            spent: 1.0,
            nfts: 1,
            tokens: 0,
            wallet: -12.0,
        });
        assert_eq!(next.earned, 10_002.5);
        assert_eq!(next.spent, 4_001.0);
        assert_eq!(next.nfts_owned, 4);
        assert_eq!(next.transactions, 7);
        assert_eq!(next.thoughts, 901);
        assert_eq!(next.wallet_balance, 4_988.0);
    }

    #[test]
    fn test_after_record_counts_by_kind() {
        let base = MetricsSnapshot::default();
        let thought = base.after_record(&RecordKind::Thought);
        assert_eq!(thought.thoughts, 901);
        assert_eq!(thought.transactions, 0);

        let action = base.after_record(&RecordKind::Action(ActionKind::GetBalance));
        assert_eq!(action.thoughts, 900);
        assert_eq!(action.transactions, 1);

        assert_eq!(base.after_record(&RecordKind::User), base);
        assert_eq!(base.after_record(&RecordKind::Agent), base);
    }
}
