use crate::bundle::BundleId;
use crate::geometry::{polar_angle, Position};
use crate::place::{PlaceId, PlaceType};
use crate::stimulation::{Stimulation, GUSTATORY_NOTHING, KINEMATIC_FORWARD, TACTILE_EMPTY, VISUAL_UNSEEN};
use serde::{Deserialize, Serialize};

/// What the spatial system reports about one cycle: the focus of interest
/// and the stimulations and feedback produced by the enacted interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub focus: Option<PlaceId>,
    pub bundle: Option<BundleId>,
    pub position: Position,
    pub span: f32,
    pub speed: Position,

    pub visual: Stimulation,
    pub tactile: Stimulation,
    pub gustatory: Stimulation,
    pub kinematic: Stimulation,

    pub attractiveness: i32,
    pub satisfaction: i32,
    /// Feedback obtained when the act starts.
    pub instantaneous_feedback: String,
    /// Dynamic feature computed from the change since the previous observation.
    pub stimuli: String,
    pub place_type: Option<PlaceType>,
    /// Update count of the focus place, -1 when there is none.
    pub update_count: i64,
    /// True iff the focus place changed this cycle.
    pub new_focus: bool,

    pub translation: Position,
    pub rotation: f32,
}

impl Default for Observation {
    fn default() -> Self {
        Self {
            focus: None,
            bundle: None,
            position: Position::new(1.0, 0.0, 0.0),
            span: 0.0,
            speed: Position::zeros(),
            visual: Stimulation::visual(VISUAL_UNSEEN),
            tactile: Stimulation::tactile(TACTILE_EMPTY),
            gustatory: Stimulation::gustatory(GUSTATORY_NOTHING),
            kinematic: Stimulation::kinematic(KINEMATIC_FORWARD),
            attractiveness: 0,
            satisfaction: 0,
            instantaneous_feedback: String::new(),
            stimuli: String::new(),
            place_type: None,
            update_count: -1,
            new_focus: false,
            translation: Position::zeros(),
            rotation: 0.0,
        }
    }
}

impl Observation {
    pub fn direction(&self) -> f32 {
        polar_angle(&self.position)
    }
}
