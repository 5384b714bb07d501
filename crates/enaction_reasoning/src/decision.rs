//! Decision cycle: Propose → Select → Enact → Learn.
//!
//! Each call to [`DecisionCycle::step`] issues exactly one primitive to the
//! environment. A composite intention is enacted over several steps through
//! the repository's prescriber chain; the cycle only returns to Propose once
//! the intention has completed or failed.

use crate::environment::Environment;
use enaction_core::config::{DecisionConfig, HierarchyConfig};
use enaction_core::{select_best, ActId, ActRepository, BundleRegistry, EnactionError, Proposal, Result, SchemaId};
use enaction_memory::LocalSpaceMemory;
use rand::Rng;
use serde::Serialize;

// ============================================================================
// Phases
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    Propose,
    Select,
    Enact,
    Learn,
}

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickReport {
    /// The intention being enacted when the primitive was issued.
    pub intended: Option<ActId>,
    /// Primitive issued to the environment.
    pub primitive: Option<ActId>,
    /// Primitive actually enacted: the issued one, or its alternate.
    pub enacted: Option<ActId>,
    /// Intention concluded this tick, as actually enacted.
    pub completed: Option<ActId>,
    /// Schema learned or reinforced this tick.
    pub learned: Option<SchemaId>,
    /// True if a stop was honoured instead of issuing a primitive.
    pub stopped: bool,
}

impl TickReport {
    pub fn is_mismatch(&self) -> bool {
        self.primitive.is_some() && self.primitive != self.enacted
    }
}

// ============================================================================
// DecisionCycle
// ============================================================================

pub struct DecisionCycle {
    phase: Phase,
    context: Option<ActId>,
    proposals: Vec<Proposal>,
    intended: Option<ActId>,
    pending: Option<ActId>,
    stop_requested: bool,
    hierarchy: HierarchyConfig,
    decision: DecisionConfig,
}

impl Default for DecisionCycle {
    fn default() -> Self {
        Self::new(HierarchyConfig::default(), DecisionConfig::default())
    }
}

impl DecisionCycle {
    pub fn new(hierarchy: HierarchyConfig, decision: DecisionConfig) -> Self {
        Self {
            phase: Phase::Propose,
            context: None,
            proposals: Vec::new(),
            intended: None,
            pending: None,
            stop_requested: false,
            hierarchy,
            decision,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The last enacted act, context of the next proposal.
    pub fn context(&self) -> Option<ActId> {
        self.context
    }

    pub fn intended(&self) -> Option<ActId> {
        self.intended
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Ask the cycle to stop. Honoured the next time it reaches Propose, so
    /// an intention in progress is carried to its end first.
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Advance until exactly one primitive has been issued, or a stop is
    /// observed at the Propose boundary.
    pub fn step<E, R>(
        &mut self,
        acts: &mut ActRepository,
        memory: &mut LocalSpaceMemory,
        bundles: &BundleRegistry,
        env: &mut E,
        rng: &mut R,
    ) -> Result<TickReport>
    where
        E: Environment + ?Sized,
        R: Rng + ?Sized,
    {
        let mut enacted: Option<TickReport> = None;
        loop {
            match self.phase {
                Phase::Propose => {
                    if self.stop_requested {
                        tracing::info!("Stop honoured at propose boundary");
                        return Ok(TickReport {
                            stopped: true,
                            ..TickReport::default()
                        });
                    }
                    self.proposals = self.propose(acts)?;
                    self.phase = Phase::Select;
                }
                Phase::Select => {
                    let intended = self.select(acts, memory, bundles, rng)?;
                    self.intended = Some(intended);
                    self.pending = Some(acts.prescribe(intended));
                    self.phase = Phase::Enact;
                }
                Phase::Enact => {
                    let report = self.enact(acts, env)?;
                    if self.phase != Phase::Learn {
                        return Ok(report);
                    }
                    enacted = Some(report);
                }
                Phase::Learn => {
                    let mut report = enacted.take().unwrap_or_default();
                    report.learned = self.learn(acts, report.completed);
                    self.phase = Phase::Propose;
                    return Ok(report);
                }
            }
        }
    }

    fn propose(&self, acts: &ActRepository) -> Result<Vec<Proposal>> {
        let proposals = acts.propose(self.context, self.hierarchy.regularity_threshold);
        if !proposals.is_empty() {
            return Ok(proposals);
        }
        let fallback = acts.propose_primitives();
        if fallback.is_empty() {
            return Err(EnactionError::NoPrimitives);
        }
        tracing::debug!("No proposal, exploring {} primitives", fallback.len());
        Ok(fallback)
    }

    fn select<R: Rng + ?Sized>(
        &self,
        acts: &ActRepository,
        memory: &mut LocalSpaceMemory,
        bundles: &BundleRegistry,
        rng: &mut R,
    ) -> Result<ActId> {
        let mut candidates = self.proposals.clone();
        if self.decision.simulate_candidates {
            let consistent: Vec<Proposal> = candidates
                .iter()
                .copied()
                .filter(|p| memory.run_simulation(p.act, self.decision.doubt, acts, bundles))
                .collect();
            if consistent.is_empty() {
                tracing::warn!("Every candidate contradicts local space, ignoring simulation");
            } else {
                candidates = consistent;
            }
        }
        let chosen = select_best(&candidates, rng).ok_or(EnactionError::NoPrimitives)?;
        tracing::debug!(
            "Selected {} among {} candidates",
            acts.act(chosen).label(),
            candidates.len()
        );
        Ok(chosen)
    }

    fn enact<E: Environment + ?Sized>(&mut self, acts: &mut ActRepository, env: &mut E) -> Result<TickReport> {
        let primitive = self
            .pending
            .take()
            .ok_or_else(|| EnactionError::UnknownAct("no pending primitive".to_string()))?;
        let intended = self.intended;

        let act = acts.act(primitive);
        let success = env.enact_primitive(act);
        let enacted = if success == act.is_success() {
            primitive
        } else {
            acts.alternate(primitive)
                .ok_or_else(|| EnactionError::UnknownSchema(act.label().to_string()))?
        };

        let mut report = TickReport {
            intended,
            primitive: Some(primitive),
            enacted: Some(enacted),
            ..TickReport::default()
        };

        if enacted != primitive {
            acts.terminate(primitive);
            if let Some(intended) = intended {
                if acts.add_alternate(intended, enacted) {
                    tracing::debug!(
                        "New alternate {} for {}",
                        acts.act(enacted).label(),
                        acts.act(intended).label()
                    );
                }
            }
            report.completed = Some(enacted);
            self.phase = Phase::Learn;
            return Ok(report);
        }

        match acts.update_prescriber(primitive) {
            Some(next) => self.pending = Some(acts.prescribe(next)),
            None => {
                report.completed = intended;
                self.phase = Phase::Learn;
            }
        }
        Ok(report)
    }

    fn learn(&mut self, acts: &mut ActRepository, enacted: Option<ActId>) -> Option<SchemaId> {
        let enacted = enacted?;
        let intended = self.intended.take();
        if intended == Some(enacted) {
            acts.reinforce(enacted);
        }

        let mut learned = None;
        if let Some(context) = self.context {
            let schema = acts.compose_schema(context, enacted);
            let success_act = acts.schema(schema).success_act();
            let is_new = acts.schema(schema).weight == 0;
            acts.reinforce(success_act);
            if is_new {
                tracing::info!("Learned schema {}", acts.schema(schema).label());
            }
            learned = Some(schema);
        }

        tracing::debug!(
            "Enacted {} (intended {})",
            acts.act(enacted).label(),
            intended.map(|i| acts.act(i).label().to_string()).unwrap_or_default()
        );
        self.context = Some(enacted);
        learned
    }
}

// ============================================================================
// Tests
// ============================================================================
