//! Property-based tests for enaction_core.
//!
//! Uses proptest to check the hierarchy and geometry invariants over
//! arbitrary inputs rather than hand-picked examples.

use enaction_core::geometry::normalize_angle;
use enaction_core::{select_best, ActRepository, Motion, Position, PrimitiveSpec, Proposal};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

// ============================================================================
// Strategies
// ============================================================================

fn arb_motion() -> impl Strategy<Value = Motion> {
    (-3.0f32..=3.0, -3.0f32..=3.0, -3.14f32..=3.14)
        .prop_map(|(x, y, r)| Motion::new(Position::new(x, y, 0.0), r))
}

fn arb_position() -> impl Strategy<Value = Position> {
    (-10.0f32..=10.0, -10.0f32..=10.0).prop_map(|(x, y)| Position::new(x, y, 0.0))
}

// ============================================================================
// Interning
// ============================================================================

proptest! {
    /// **Bijection**: one handle per distinct label, however often requested.
    #[test]
    fn interning_is_a_bijection(labels in prop::collection::vec("[a-z<>^v]{1,4}", 1..40)) {
        let mut repo = ActRepository::new();
        let ids: Vec<_> = labels.iter().map(|l| repo.intern_act(l)).collect();
        let again: Vec<_> = labels.iter().map(|l| repo.intern_act(l)).collect();
        prop_assert_eq!(&ids, &again);

        let distinct_labels: HashSet<_> = labels.iter().collect();
        let distinct_ids: HashSet<_> = ids.iter().collect();
        prop_assert_eq!(distinct_labels.len(), distinct_ids.len());
        prop_assert_eq!(repo.act_count(), distinct_labels.len());
        for (label, id) in labels.iter().zip(&ids) {
            prop_assert_eq!(repo.act(*id).label(), label.as_str());
        }
    }

    /// **Schema dedup**: composing the same pairs again never grows the repository.
    #[test]
    fn compose_is_idempotent(pairs in prop::collection::vec((0usize..3, 0usize..3), 1..20)) {
        let mut repo = ActRepository::new();
        for l in ["a", "b", "c"] {
            repo.add_primitive(PrimitiveSpec::new(l, 1, -1)).unwrap();
        }
        let acts: Vec<_> = ["(a)", "(b)", "(c)"].iter().map(|l| repo.find_act(l).unwrap()).collect();
        for (c, i) in &pairs {
            repo.compose_schema(acts[*c], acts[*i]);
        }
        let count = repo.schema_count();
        for (c, i) in &pairs {
            repo.compose_schema(acts[*c], acts[*i]);
        }
        prop_assert_eq!(repo.schema_count(), count);
    }

    /// **Selection** always returns one of the top-scored candidates.
    #[test]
    fn select_best_returns_a_maximum(scores in prop::collection::vec(-50i64..50, 1..30), seed in any::<u64>()) {
        let mut repo = ActRepository::new();
        let candidates: Vec<Proposal> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| Proposal { act: repo.intern_act(&i.to_string()), score: *s })
            .collect();
        let mut rng = StdRng::seed_from_u64(seed);
        let picked = select_best(&candidates, &mut rng).unwrap();
        let best = *scores.iter().max().unwrap();
        let score = candidates.iter().find(|p| p.act == picked).unwrap().score;
        prop_assert_eq!(score, best);
    }
}

// ============================================================================
// Geometry
// ============================================================================

proptest! {
    /// **Round trip**: reprojecting by a motion then by its inverse is identity.
    #[test]
    fn motion_inverse_round_trip(m in arb_motion(), p in arb_position()) {
        let back = m.inverse().reproject(&m.reproject(&p));
        prop_assert!((back - p).norm() < 1e-3, "{:?} -> {:?}", p, back);
    }

    /// **Rigid**: reprojection preserves distances between points.
    #[test]
    fn reprojection_preserves_distances(m in arb_motion(), a in arb_position(), b in arb_position()) {
        let d0 = (a - b).norm();
        let d1 = (m.reproject(&a) - m.reproject(&b)).norm();
        prop_assert!((d0 - d1).abs() < 1e-3);
    }

    #[test]
    fn normalized_angles_stay_in_range(a in -100.0f32..100.0) {
        let n = normalize_angle(a);
        prop_assert!(n > -std::f32::consts::PI - 1e-5 && n <= std::f32::consts::PI + 1e-5);
    }
}
