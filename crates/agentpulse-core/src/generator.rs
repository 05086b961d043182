//! Simulated agent activity
//!
//! The generator is a pure function of its language and the random source it
//! is handed. Seeding the source makes the produced stream reproducible.

use agentpulse_types::{ActionKind, ActivityRecord, Language};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::phrases::{phrases, ThoughtKey};

/// Default probability that a tick produces a thought rather than an action
pub const DEFAULT_THOUGHT_PROBABILITY: f64 = 0.7;

/// Uniformly pick one element of `set`. `None` only for an empty set.
pub fn pick<'a, T, R>(rng: &mut R, set: &'a [T]) -> Option<&'a T>
where
    R: Rng + ?Sized,
{
    set.choose(rng)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityGenerator {
    language: Language,
    thought_probability: f64,
}

impl ActivityGenerator {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            thought_probability: DEFAULT_THOUGHT_PROBABILITY,
        }
    }

    /// Override the thought/action split. Clamped to `[0, 1]`.
    pub fn with_thought_probability(mut self, probability: f64) -> Self {
        self.thought_probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Produce one record: a thought with the configured probability, otherwise an action.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> ActivityRecord {
        if rng.gen_bool(self.thought_probability) {
            self.generate_thought(rng)
        } else {
            self.generate_action(rng)
        }
    }

    pub fn generate_thought<R: Rng + ?Sized>(&self, rng: &mut R) -> ActivityRecord {
        let key = pick(rng, &ThoughtKey::ALL).copied().unwrap_or(ThoughtKey::Analyzing);
        ActivityRecord::thought(phrases(self.language).thought(key))
    }

    pub fn generate_action<R: Rng + ?Sized>(&self, rng: &mut R) -> ActivityRecord {
        let kind = pick(rng, &ActionKind::ALL)
            .copied()
            .unwrap_or(ActionKind::GetBalance);
        ActivityRecord::action(kind, phrases(self.language).action_content(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentpulse_types::RecordKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pick_empty_set() {
        let mut rng = StdRng::seed_from_u64(1);
        let empty: [u8; 0] = [];
        assert!(pick(&mut rng, &empty).is_none());
        assert_eq!(pick(&mut rng, &[42]), Some(&42));
    }

    #[test]
    fn test_same_seed_same_stream() {
        let generator = ActivityGenerator::new(Language::En);
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let ra = generator.generate(&mut a);
            let rb = generator.generate(&mut b);
            assert_eq!(ra.kind(), rb.kind());
            assert_eq!(ra.content(), rb.content());
        }
    }

    #[test]
    fn test_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(3);
        let thoughts_only = ActivityGenerator::new(Language::En).with_thought_probability(1.0);
        let actions_only = ActivityGenerator::new(Language::En).with_thought_probability(0.0);
        for _ in 0..50 {
            assert_eq!(thoughts_only.generate(&mut rng).kind(), RecordKind::Thought);
            assert!(actions_only.generate(&mut rng).kind().subtype().is_some());
        }
    }

    #[test]
    fn test_split_is_roughly_seventy_thirty() {
        let mut rng = StdRng::seed_from_u64(11);
        let generator = ActivityGenerator::new(Language::En);
        let thoughts = (0..10_000)
            .filter(|_| generator.generate(&mut rng).kind().is_thought())
            .count();
        assert!((6_500..7_500).contains(&thoughts), "thoughts = {thoughts}");
    }

    #[test]
    fn test_content_comes_from_selected_language() {
        let mut rng = StdRng::seed_from_u64(5);
        let generator = ActivityGenerator::new(Language::Es);
        let table = phrases(Language::Es);
        for _ in 0..50 {
            let record = generator.generate(&mut rng);
            match record.kind() {
                RecordKind::Thought => assert!(ThoughtKey::ALL
                    .iter()
                    .any(|k| table.thought(*k) == record.content())),
                RecordKind::Action(kind) => {
                    assert_eq!(record.content(), table.action_content(kind))
                }
                other => panic!("unexpected kind {other:?}"),
            }
        }
    }
}
