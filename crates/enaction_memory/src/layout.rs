//! Coarse layout of the surroundings: which phenomenon was last met in each
//! of the three frontal areas, and how self-motion shifts them.

use enaction_core::{Area, Motion};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const EMPTY: &str = "_";

/// Yaw beyond which a motion counts as a turn.
const TURN_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transformation {
    Unknown,
    Identity,
    ShiftLeft,
    ShiftRight,
}

impl Transformation {
    /// Turning right shifts the surroundings to the left and vice versa.
    pub fn from_motion(motion: &Motion) -> Self {
        if motion.rotation > TURN_THRESHOLD {
            Transformation::ShiftRight
        } else if motion.rotation < -TURN_THRESHOLD {
            Transformation::ShiftLeft
        } else {
            Transformation::Identity
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub a: String,
    pub b: String,
    pub c: String,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            a: EMPTY.to_string(),
            b: EMPTY.to_string(),
            c: EMPTY.to_string(),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.a, self.b, self.c)
    }
}

impl Layout {
    /// Remember `phenomenon` in `area`. The area here (O) is not tracked.
    pub fn record(&mut self, area: Area, phenomenon: &str) {
        let slot = match area {
            Area::A => &mut self.a,
            Area::B => &mut self.b,
            Area::C => &mut self.c,
            Area::O => return,
        };
        *slot = phenomenon.to_string();
    }

    pub fn get(&self, area: Area) -> &str {
        match area {
            Area::A => self.a.as_str(),
            Area::B => self.b.as_str(),
            Area::C => self.c.as_str(),
            Area::O => EMPTY,
        }
    }

    /// Expected layout after the agent undergoes `transformation`.
    pub fn predict(&self, transformation: Transformation) -> Self {
        match transformation {
            Transformation::Identity => self.clone(),
            Transformation::Unknown => Self::default(),
            Transformation::ShiftLeft => Self {
                a: EMPTY.to_string(),
                b: self.a.clone(),
                c: self.b.clone(),
            },
            Transformation::ShiftRight => Self {
                a: self.b.clone(),
                b: self.c.clone(),
                c: EMPTY.to_string(),
            },
        }
    }
}
