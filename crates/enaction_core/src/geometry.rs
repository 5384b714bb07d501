//! Egocentric geometry helpers on top of `nalgebra`.
//!
//! The agent's frame has `x` pointing ahead, `y` to the left and `z` up.
//! Rotations are yaw angles around `z`, in radians, counter-clockwise.

use nalgebra::{Rotation3, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_1_SQRT_2, PI};

pub type Position = Vector3<f32>;

/// Rotation of `angle` radians around the vertical axis.
pub fn yaw(angle: f32) -> Rotation3<f32> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), angle)
}

/// Direction of a point seen from the origin, in (-π, π].
pub fn polar_angle(p: &Position) -> f32 {
    p.y.atan2(p.x)
}

/// Wrap an angle into (-π, π].
pub fn normalize_angle(angle: f32) -> f32 {
    let mut a = angle % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}

/// Two positions share a cell when they round to the same grid square.
pub fn same_cell(a: &Position, b: &Position) -> bool {
    a.x.round() == b.x.round() && a.y.round() == b.y.round()
}

/// A displacement of the agent expressed in its own frame before moving:
/// first it rotates by `rotation`, then it moves by `translation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub translation: Position,
    pub rotation: f32,
}

impl Default for Motion {
    fn default() -> Self {
        Self::identity()
    }
}

impl Motion {
    pub fn new(translation: Position, rotation: f32) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn identity() -> Self {
        Self::new(Position::zeros(), 0.0)
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self::new(Position::new(x, y, 0.0), 0.0)
    }

    pub fn rotate(angle: f32) -> Self {
        Self::new(Position::zeros(), angle)
    }

    /// The motion that undoes this one under [`Motion::reproject`].
    pub fn inverse(&self) -> Self {
        Self::new(-(yaw(self.rotation) * self.translation), -self.rotation)
    }

    /// Re-express a stationary world point after the agent performed this
    /// motion: inverse rotation, then inverse translation.
    pub fn reproject(&self, p: &Position) -> Position {
        yaw(-self.rotation) * p - self.translation
    }
}

/// The nine egocentric cells sampled by tracers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Here,
    Ahead,
    Behind,
    Left,
    Right,
    AheadLeft,
    AheadRight,
    BehindLeft,
    BehindRight,
}

impl Direction {
    /// Trace order: behind-right first, clockwise around to here.
    pub const LOCAL_SPACE: [Direction; 9] = [
        Direction::BehindRight,
        Direction::Right,
        Direction::AheadRight,
        Direction::Ahead,
        Direction::AheadLeft,
        Direction::Left,
        Direction::BehindLeft,
        Direction::Behind,
        Direction::Here,
    ];

    pub fn vector(self) -> Position {
        let d = FRAC_1_SQRT_2;
        match self {
            Direction::Here => Position::new(0.0, 0.0, 0.0),
            Direction::Ahead => Position::new(1.0, 0.0, 0.0),
            Direction::Behind => Position::new(-1.0, 0.0, 0.0),
            Direction::Left => Position::new(0.0, 1.0, 0.0),
            Direction::Right => Position::new(0.0, -1.0, 0.0),
            Direction::AheadLeft => Position::new(d, d, 0.0),
            Direction::AheadRight => Position::new(d, -d, 0.0),
            Direction::BehindLeft => Position::new(-d, d, 0.0),
            Direction::BehindRight => Position::new(-d, -d, 0.0),
        }
    }
}
