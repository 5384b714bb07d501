//! Dynamic feedback: what changed between two observations, and how much
//! the agent likes it.

use enaction_core::stimulation::{GUSTATORY_NOTHING, KINEMATIC_BUMP};
use enaction_core::{Act, Observation};
use std::f32::consts::FRAC_PI_4;

/// Margin inside which a positive focus counts as off the fovea.
const FOVEA: f32 = FRAC_PI_4 - 0.01;
/// Margin inside which a repulsive focus counts as straight ahead.
const AHEAD: f32 = 0.1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feedback {
    /// Visual and gustatory part of the feature, without the kinematic prefix.
    pub visual: String,
    /// Full feature: kinematic prefix (`w` on bump, space otherwise) followed
    /// by the visual part.
    pub stimuli: String,
    pub satisfaction: i32,
}

pub fn dynamic_feature(previous: &Observation, new: &Observation, act: Option<&Act>) -> Feedback {
    let previous_direction = previous.direction().abs();
    let new_direction = new.direction();
    let mut satisfaction = 0;

    let mut feature = if new.attractiveness >= 0 {
        let sign = if previous.attractiveness > new.attractiveness {
            "-"
        } else if previous.attractiveness < new.attractiveness {
            "+"
        } else if previous_direction < new_direction.abs() {
            "-"
        } else if previous_direction > new_direction.abs() {
            "+"
        } else {
            ""
        };
        satisfaction = match sign {
            "-" => -100,
            "+" => 20,
            _ => 0,
        };
        side_markers(sign, new_direction, -FOVEA, FOVEA, true)
    } else {
        let sign = if previous.attractiveness >= 0 {
            "*"
        } else if previous_direction < new_direction.abs() {
            "_"
        } else if previous_direction > new_direction.abs() {
            "*"
        } else {
            ""
        };
        satisfaction = match sign {
            "*" => -100,
            "_" => 20,
            _ => satisfaction,
        };
        side_markers(sign, new_direction, -AHEAD, AHEAD, false)
    };

    if new.gustatory.value != GUSTATORY_NOTHING {
        feature = "e".to_string();
        satisfaction = 100;
    }

    let moved = new.kinematic.value != KINEMATIC_BUMP;
    if let Some(act) = act {
        let forward = act.motion.translation.norm() > f32::EPSILON;
        satisfaction += match (forward, moved) {
            (true, true) => 20,
            (true, false) => -100,
            (false, true) => -10,
            (false, false) => -20,
        };
    }

    let prefix = if moved { " " } else { "w" };
    Feedback {
        stimuli: format!("{}{}", prefix, feature),
        visual: feature,
        satisfaction,
    }
}

fn side_markers(sign: &str, direction: f32, low: f32, high: f32, inclusive: bool) -> String {
    if sign.is_empty() {
        return String::new();
    }
    let (right, left) = if inclusive {
        (direction <= low, direction >= high)
    } else {
        (direction < low, direction > high)
    };
    if right {
        format!("|{}", sign)
    } else if left {
        format!("{}|", sign)
    } else {
        sign.to_string()
    }
}
