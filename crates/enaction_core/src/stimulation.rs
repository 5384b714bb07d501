//! Stimulation codes delivered by the sensorimotor decoder.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modality {
    Visual,
    Tactile,
    Gustatory,
    Kinematic,
}

/// A single stimulation: a modality and an integer code.
///
/// Visual codes are RGB colors (`0xRRGGBB`); the other modalities use the
/// constants below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stimulation {
    pub modality: Modality,
    pub value: u32,
}

pub const VISUAL_UNSEEN: u32 = 0xFFFFFF;
pub const VISUAL_WALL: u32 = 0x008000;
pub const VISUAL_FISH: u32 = 0x6495ED;

pub const TACTILE_EMPTY: u32 = 0;
pub const TACTILE_SOFT: u32 = 1;
pub const TACTILE_FOOD: u32 = 2;
pub const TACTILE_HARD: u32 = 3;

pub const GUSTATORY_NOTHING: u32 = 0;
pub const GUSTATORY_FOOD: u32 = 1;

pub const KINEMATIC_FORWARD: u32 = 0;
pub const KINEMATIC_BUMP: u32 = 1;
pub const KINEMATIC_TURN: u32 = 2;

impl Stimulation {
    pub fn new(modality: Modality, value: u32) -> Self {
        Self { modality, value }
    }

    pub fn visual(color: u32) -> Self {
        Self::new(Modality::Visual, color)
    }

    pub fn tactile(value: u32) -> Self {
        Self::new(Modality::Tactile, value)
    }

    pub fn gustatory(value: u32) -> Self {
        Self::new(Modality::Gustatory, value)
    }

    pub fn kinematic(value: u32) -> Self {
        Self::new(Modality::Kinematic, value)
    }

    /// Display color of this stimulation as `0xRRGGBB`.
    pub fn rgb(&self) -> u32 {
        let rgb = match self.modality {
            Modality::Visual => self.value,
            Modality::Tactile => match self.value {
                TACTILE_EMPTY => 0xFFFFFF,
                TACTILE_SOFT => 0xC0C0C0,
                TACTILE_FOOD => 0xFFFF80,
                _ => 0x000000,
            },
            Modality::Gustatory => {
                if self.value == GUSTATORY_NOTHING {
                    0xFFFFFF
                } else {
                    0xFFFF00
                }
            }
            Modality::Kinematic => match self.value {
                KINEMATIC_BUMP => 0xFF0000,
                KINEMATIC_TURN => 0x0000FF,
                _ => 0xFFFFFF,
            },
        };
        rgb & 0xFFFFFF
    }

    pub fn hex_color(&self) -> String {
        format!("{:06X}", self.rgb())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color() {
        assert_eq!(Stimulation::visual(VISUAL_WALL).hex_color(), "008000");
        assert_eq!(Stimulation::kinematic(KINEMATIC_BUMP).hex_color(), "FF0000");
        assert_eq!(Stimulation::tactile(TACTILE_EMPTY).hex_color(), "FFFFFF");
        assert_eq!(Stimulation::tactile(TACTILE_FOOD).rgb(), 0xFFFF80);
        assert_eq!(Stimulation::tactile(TACTILE_HARD).rgb(), 0x000000);
    }
}
