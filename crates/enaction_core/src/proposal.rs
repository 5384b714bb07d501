//! Proposal of candidate acts and weighted selection with random tie-break.

use crate::act::ActId;
use crate::repository::ActRepository;
use rand::Rng;

/// A candidate act and its weighted-proposition score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proposal {
    pub act: ActId,
    pub score: i64,
}

impl ActRepository {
    /// Candidate acts given the current context.
    ///
    /// Every schema whose weight exceeds `threshold` proposes its success act;
    /// then every composite schema whose context is `context` proposes its
    /// success act unless it is already proposed.
    pub fn propose(&self, context: Option<ActId>, threshold: u32) -> Vec<Proposal> {
        let mut proposals: Vec<Proposal> = Vec::new();

        for schema in self.schemas() {
            if schema.weight > threshold {
                proposals.push(self.proposal_for(schema.success_act(), schema.weight));
            }
        }

        if let Some(context) = context {
            for schema in self.schemas() {
                if schema.context_act() == Some(context)
                    && !proposals.iter().any(|p| p.act == schema.success_act())
                {
                    proposals.push(self.proposal_for(schema.success_act(), schema.weight));
                }
            }
        }

        proposals
    }

    /// Every primitive success act at score zero; used when nothing else is
    /// proposed.
    pub fn propose_primitives(&self) -> Vec<Proposal> {
        self.schemas()
            .filter(|s| s.is_primitive())
            .map(|s| Proposal {
                act: s.success_act(),
                score: 0,
            })
            .collect()
    }

    fn proposal_for(&self, act: ActId, weight: u32) -> Proposal {
        Proposal {
            act,
            score: i64::from(weight) * i64::from(self.act(act).enaction_value),
        }
    }
}

/// Highest-scoring candidate; ties at the maximum are broken uniformly at
/// random. Returns `None` for an empty candidate list.
pub fn select_best<R: Rng + ?Sized>(candidates: &[Proposal], rng: &mut R) -> Option<ActId> {
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));

    let best = sorted.first()?.score;
    let tied = sorted.iter().take_while(|p| p.score == best).count();
    Some(sorted[rng.gen_range(0..tied)].act)
}
