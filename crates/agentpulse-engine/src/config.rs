//! Engine timing configuration

use std::time::Duration;

use crate::engine::EngineError;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Generator tick period
    pub generator_period: Duration,
    /// Delay between tick start and emission
    pub thinking_delay: Duration,
    pub metrics_period: Duration,
    pub liveness_period: Duration,
    pub dots_period: Duration,
    /// How often observe mode checks whether to post again
    pub observe_poll: Duration,
    /// Post the default prompt once on start (chat variant)
    pub observe_on_start: bool,
    /// Probability that a generator tick yields a thought
    pub thought_probability: f64,
    /// Seed for generator and metrics randomness
    pub seed: u64,
    /// Prompt posted by observe mode
    pub default_prompt: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generator_period: Duration::from_millis(3000),
            thinking_delay: Duration::from_millis(1500),
            metrics_period: Duration::from_millis(2000),
            liveness_period: Duration::from_millis(1000),
            dots_period: Duration::from_millis(500),
            observe_poll: Duration::from_millis(500),
            observe_on_start: true,
            thought_probability: agentpulse_core::DEFAULT_THOUGHT_PROBABILITY,
            seed: 42,
            default_prompt: agentpulse_chat::DEFAULT_PROMPT.to_string(),
        }
    }
}

impl EngineConfig {
    /// Reject periods a tokio interval cannot run with
    pub fn validate(&self) -> Result<(), EngineError> {
        let periods = [
            ("generator_period", self.generator_period),
            ("metrics_period", self.metrics_period),
            ("liveness_period", self.liveness_period),
            ("dots_period", self.dots_period),
            ("observe_poll", self.observe_poll),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, period)| period.is_zero()) {
            return Err(EngineError::InvalidConfig(format!("{name} must be non-zero")));
        }
        if self.thought_probability.is_nan() {
            return Err(EngineError::InvalidConfig(
                "thought_probability must be a number".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_period_rejected() {
        let config = EngineConfig {
            liveness_period: Duration::ZERO,
            ..EngineConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("liveness_period"));
    }

    #[test]
    fn test_zero_thinking_delay_allowed() {
        let config = EngineConfig {
            thinking_delay: Duration::ZERO,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
