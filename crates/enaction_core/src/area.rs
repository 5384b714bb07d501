use crate::geometry::{polar_angle, Position};
use serde::{Deserialize, Serialize};

/// Coarse egocentric areas: A to the left, B ahead, C to the right, O here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Area {
    A,
    B,
    C,
    O,
}

impl Area {
    /// Area a point belongs to.
    pub fn of(point: &Position) -> Area {
        if point.x.abs() <= 0.1 && point.y.abs() <= 0.1 && point.z.abs() <= 0.1 {
            Area::O
        } else {
            let angle = polar_angle(point);
            if angle > 0.1 {
                Area::A
            } else if angle >= -0.1 {
                Area::B
            } else {
                Area::C
            }
        }
    }
}
