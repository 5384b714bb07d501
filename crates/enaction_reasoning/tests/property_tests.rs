//! Property-based tests for enaction_reasoning.
//!
//! Drives the decision cycle with arbitrary outcome scripts and checks the
//! per-tick contract and the learning invariants.

use enaction_core::config::{DecisionConfig, HierarchyConfig};
use enaction_core::{Act, ActRepository, BundleRegistry, Motion, PrimitiveSpec};
use enaction_memory::LocalSpaceMemory;
use enaction_reasoning::{DecisionCycle, Environment};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

struct Scripted {
    outcomes: Vec<bool>,
    issued: usize,
}

impl Environment for Scripted {
    fn enact_primitive(&mut self, act: &Act) -> bool {
        assert!(act.is_primitive(), "composite {} reached the environment", act.label());
        let outcome = self.outcomes.get(self.issued).copied().unwrap_or(true);
        self.issued += 1;
        outcome
    }
}

fn repository() -> ActRepository {
    let mut acts = ActRepository::new();
    acts.add_primitive(PrimitiveSpec::new(">", 5, -10).with_motion(Motion::translate(1.0, 0.0)))
        .unwrap();
    acts.add_primitive(PrimitiveSpec::new("^", -3, -3).with_motion(Motion::rotate(1.57)))
        .unwrap();
    acts.add_primitive(PrimitiveSpec::new("v", -3, -3).with_motion(Motion::rotate(-1.57)))
        .unwrap();
    acts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// **One primitive per tick**, whatever the outcomes and however deep
    /// the learned hierarchy grows.
    #[test]
    fn one_primitive_per_tick(outcomes in prop::collection::vec(any::<bool>(), 1..120), seed in any::<u64>(), threshold in 0u32..4) {
        let mut acts = repository();
        let mut memory = LocalSpaceMemory::default();
        let bundles = BundleRegistry::default();
        let mut cycle = DecisionCycle::new(
            HierarchyConfig { regularity_threshold: threshold },
            DecisionConfig { simulate_candidates: false, ..DecisionConfig::default() },
        );
        let mut env = Scripted { outcomes: outcomes.clone(), issued: 0 };
        let mut rng = StdRng::seed_from_u64(seed);

        for tick in 0..outcomes.len() {
            let report = cycle.step(&mut acts, &mut memory, &bundles, &mut env, &mut rng).unwrap();
            prop_assert_eq!(env.issued, tick + 1);
            prop_assert!(report.primitive.is_some());
            let enacted = report.enacted.unwrap();
            prop_assert!(acts.act(enacted).is_primitive());
        }
    }

    /// **Schema dedup under learning**: every schema label is unique.
    #[test]
    fn learned_schemas_are_unique(outcomes in prop::collection::vec(any::<bool>(), 1..150), seed in any::<u64>()) {
        let mut acts = repository();
        let mut memory = LocalSpaceMemory::default();
        let bundles = BundleRegistry::default();
        let mut cycle = DecisionCycle::new(
            HierarchyConfig { regularity_threshold: 1 },
            DecisionConfig { simulate_candidates: false, ..DecisionConfig::default() },
        );
        let mut env = Scripted { outcomes: outcomes.clone(), issued: 0 };
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..outcomes.len() {
            cycle.step(&mut acts, &mut memory, &bundles, &mut env, &mut rng).unwrap();
        }

        let mut labels: Vec<&str> = acts.schemas().map(|s| s.label()).collect();
        let total = labels.len();
        labels.sort_unstable();
        labels.dedup();
        prop_assert_eq!(labels.len(), total);
    }
}
