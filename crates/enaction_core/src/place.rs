use crate::act::ActId;
use crate::bundle::{BundleId, BundleRegistry};
use crate::geometry::{normalize_angle, polar_angle, same_cell, yaw, Motion, Position};
use serde::{Deserialize, Serialize};

/// Stable identity of a place in spatial memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceType {
    Sight,
    Touch,
    EvokePhenomenon,
    Simulation,
    Copresence,
}

impl PlaceType {
    /// Perception-sourced types are evicted one tick earlier by `clear`.
    pub fn is_perceived(self) -> bool {
        matches!(
            self,
            PlaceType::Sight | PlaceType::Touch | PlaceType::EvokePhenomenon
        )
    }
}

/// Something perceived or inferred at an egocentric position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub place_type: PlaceType,
    pub bundle: Option<BundleId>,
    pub value: u32,
    /// Clock value of the last refresh.
    pub update_count: i64,
    pub position: Position,
    pub orientation: f32,
    pub first_position: Position,
    pub second_position: Position,
    pub span: f32,
    pub speed: Position,
    pub act: Option<ActId>,
}

impl Place {
    pub fn new(id: PlaceId, bundle: Option<BundleId>, position: Position, place_type: PlaceType) -> Self {
        Self {
            id,
            place_type,
            bundle,
            value: 0xFFFFFF,
            update_count: 0,
            position,
            orientation: 0.0,
            first_position: position,
            second_position: position,
            span: 0.0,
            speed: Position::zeros(),
            act: None,
        }
    }

    pub fn distance(&self) -> f32 {
        self.position.norm()
    }

    pub fn direction(&self) -> f32 {
        polar_angle(&self.position)
    }

    pub fn is_in_cell(&self, position: &Position) -> bool {
        same_cell(&self.position, position)
    }

    /// A place that stands for an object whose bundle is known.
    pub fn is_phenomenon(&self) -> bool {
        self.bundle.is_some()
            && matches!(
                self.place_type,
                PlaceType::Sight | PlaceType::Touch | PlaceType::Copresence
            )
    }

    /// Whether this place was produced by an enacted interaction recently
    /// enough to take part in copresence.
    pub fn evokes_phenomenon(&self, clock: i64, window: i64) -> bool {
        self.place_type == PlaceType::EvokePhenomenon
            && self.act.is_some()
            && clock - self.update_count <= window
    }

    pub fn attractiveness(&self, clock: i64, bundles: &BundleRegistry) -> i32 {
        self.bundle
            .map(|b| bundles.attractiveness(b, clock))
            .unwrap_or(0)
    }

    /// Move this place into the frame the agent reaches after `motion`.
    pub fn reproject(&mut self, motion: &Motion) {
        self.position = motion.reproject(&self.position);
        self.first_position = motion.reproject(&self.first_position);
        self.second_position = motion.reproject(&self.second_position);
        self.speed = yaw(-motion.rotation) * self.speed;
        self.orientation = normalize_angle(self.orientation - motion.rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perceived_types() {
        assert!(PlaceType::Sight.is_perceived());
        assert!(PlaceType::EvokePhenomenon.is_perceived());
        assert!(!PlaceType::Copresence.is_perceived());
        assert!(!PlaceType::Simulation.is_perceived());
    }

    #[test]
    fn test_reproject_moves_extent() {
        let mut p = Place::new(PlaceId(1), None, Position::new(2.0, 0.0, 0.0), PlaceType::Sight);
        p.second_position = Position::new(2.0, 1.0, 0.0);
        p.reproject(&Motion::translate(1.0, 0.0));
        assert!((p.position - Position::new(1.0, 0.0, 0.0)).norm() < 1e-5);
        assert!((p.second_position - Position::new(1.0, 1.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn test_evokes_phenomenon_window() {
        let mut p = Place::new(PlaceId(1), None, Position::zeros(), PlaceType::EvokePhenomenon);
        p.act = Some(ActId(0));
        p.update_count = 5;
        assert!(p.evokes_phenomenon(5, 1));
        assert!(p.evokes_phenomenon(6, 1));
        assert!(!p.evokes_phenomenon(7, 1));
    }
}
