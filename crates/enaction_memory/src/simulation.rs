//! Internal simulation of a candidate act in local space.
//!
//! A transient marker place stands for the simulated agent. It starts at the
//! origin, walks through the act's primitives and is removed when the walk
//! ends, whatever the outcome.

use crate::local_space::LocalSpaceMemory;
use enaction_core::geometry::{normalize_angle, yaw};
use enaction_core::{ActId, ActRepository, BundleId, BundleRegistry, Motion, PlaceId, PlaceType, Position};
use serde::Serialize;

/// What the simulation found at one primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationStep {
    pub act: ActId,
    /// Where the interaction would start, in the current frame.
    pub position: Position,
    pub orientation: f32,
    pub bundle: Option<BundleId>,
    pub consistent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationReport {
    pub consistent: bool,
    pub steps: Vec<SimulationStep>,
}

/// Scoped simulation marker. The marker place lives exactly as long as the
/// guard.
pub struct Marker<'a> {
    memory: &'a mut LocalSpaceMemory,
    id: PlaceId,
    position: Position,
    orientation: f32,
}

impl<'a> Marker<'a> {
    pub fn acquire(memory: &'a mut LocalSpaceMemory) -> Self {
        let id = memory.add_place(None, Position::zeros(), PlaceType::Simulation);
        Self {
            memory,
            id,
            position: Position::zeros(),
            orientation: 0.0,
        }
    }

    pub fn id(&self) -> PlaceId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn orientation(&self) -> f32 {
        self.orientation
    }

    pub fn memory(&self) -> &LocalSpaceMemory {
        &*self.memory
    }

    /// Where a point given in the simulated agent's frame lies in the
    /// current frame.
    pub fn project(&self, local: &Position) -> Position {
        self.position + yaw(self.orientation) * local
    }

    /// Move the simulated agent as if it performed `motion`.
    pub fn advance(&mut self, motion: &Motion) {
        self.orientation = normalize_angle(self.orientation + motion.rotation);
        self.position += yaw(self.orientation) * motion.translation;
        if let Some(place) = self.memory.get_mut(self.id) {
            place.position = self.position;
            place.orientation = self.orientation;
        }
    }
}

impl Drop for Marker<'_> {
    fn drop(&mut self) {
        self.memory.remove(self.id);
    }
}

impl LocalSpaceMemory {
    /// Whether `act` could be enacted given what local space knows.
    pub fn run_simulation(&mut self, act: ActId, doubt: bool, acts: &ActRepository, bundles: &BundleRegistry) -> bool {
        self.simulate(act, doubt, acts, bundles).consistent
    }

    /// Walk `act` depth first. At each primitive the bundle found where the
    /// interaction would start decides: none yields `doubt`, otherwise the
    /// bundle must be consistent with the act (doubt) or afford it (strict).
    /// The walk stops at the first inconsistent primitive.
    pub fn simulate(&mut self, act: ActId, doubt: bool, acts: &ActRepository, bundles: &BundleRegistry) -> SimulationReport {
        let mut marker = Marker::acquire(self);
        let mut steps = Vec::new();
        let consistent = walk(&mut marker, act, doubt, acts, bundles, &mut steps);
        tracing::debug!(
            "Simulated {} over {} primitives: {}",
            acts.act(act).label(),
            steps.len(),
            consistent
        );
        SimulationReport { consistent, steps }
    }
}

fn walk(
    marker: &mut Marker<'_>,
    id: ActId,
    doubt: bool,
    acts: &ActRepository,
    bundles: &BundleRegistry,
    steps: &mut Vec<SimulationStep>,
) -> bool {
    let act = acts.act(id);
    if let (Some(pre), Some(post)) = (act.pre_act(), act.post_act()) {
        return walk(marker, pre, doubt, acts, bundles, steps)
            && walk(marker, post, doubt, acts, bundles, steps);
    }

    let position = marker.project(&act.start_position);
    let bundle = marker.memory().bundle_at(&position);
    let consistent = match bundle {
        None => doubt,
        Some(b) if doubt => bundles.get(b).is_consistent(id, acts),
        Some(b) => bundles.get(b).afford(id),
    };
    steps.push(SimulationStep {
        act: id,
        position,
        orientation: marker.orientation(),
        bundle,
        consistent,
    });
    if consistent {
        marker.advance(&act.motion);
    }
    consistent
}

// ============================================================================
// Tests
// ============================================================================
