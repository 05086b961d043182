//! Random drift applied to the metrics on every metrics tick

use agentpulse_types::MetricsDelta;
use rand::Rng;

/// Bounds of a single drift step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftModel {
    /// earned grows by `[0, earned_max)`
    pub earned_max: f64,
    /// spent grows by `[0, spent_max)`
    pub spent_max: f64,
    /// chance of +1 NFT per step
    pub nft_probability: f64,
    /// chance of +1 token per step
    pub token_probability: f64,
    /// wallet moves by `(-wallet_swing, wallet_swing)`
    pub wallet_swing: f64,
}

impl Default for DriftModel {
    fn default() -> Self {
        Self {
            earned_max: 10.0,
            spent_max: 5.0,
            nft_probability: 0.05,
            token_probability: 0.02,
            wallet_swing: 50.0,
        }
    }
}

impl DriftModel {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> MetricsDelta {
        MetricsDelta {
            earned: rng.gen::<f64>() * self.earned_max,
            spent: rng.gen::<f64>() * self.spent_max,
            nfts: u64::from(rng.gen_bool(self.nft_probability.clamp(0.0, 1.0))),
            tokens: u64::from(rng.gen_bool(self.token_probability.clamp(0.0, 1.0))),
            wallet: (rng.gen::<f64>() - 0.5) * 2.0 * self.wallet_swing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentpulse_types::MetricsSnapshot;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_nft_rate_is_rare() {
        let model = DriftModel::default();
        let mut rng = StdRng::seed_from_u64(99);
        let nfts: u64 = (0..10_000).map(|_| model.sample(&mut rng).nfts).sum();
        assert!((350..650).contains(&nfts), "nfts = {nfts}");
    }

    proptest! {
        #[test]
        fn prop_drift_step_within_bounds(seed in any::<u64>(), steps in 1usize..40) {
            let model = DriftModel::default();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut snapshot = MetricsSnapshot::default();
            for _ in 0..steps {
                let next = snapshot.drifted(&model.sample(&mut rng));
                let earned = next.earned - snapshot.earned;
                let spent = next.spent - snapshot.spent;
                let wallet = next.wallet_balance - snapshot.wallet_balance;
                prop_assert!((0.0..=10.0).contains(&earned));
                prop_assert!((0.0..=5.0).contains(&spent));
                prop_assert!(wallet.abs() <= 50.0 + 1e-9);
                prop_assert!(next.nfts_owned - snapshot.nfts_owned <= 1);
                prop_assert!(next.tokens_owned - snapshot.tokens_owned <= 1);
                prop_assert!(next.nfts_owned >= snapshot.nfts_owned);
                prop_assert!(next.tokens_owned >= snapshot.tokens_owned);
                prop_assert_eq!(next.thoughts, snapshot.thoughts);
                prop_assert_eq!(next.transactions, snapshot.transactions);
                snapshot = next;
            }
        }
    }
}
