//! Boundary to the world the agent lives in.

use enaction_core::Act;
use enaction_memory::SensoryFrame;

/// Executes primitive acts.
pub trait Environment {
    /// Perform the primitive interaction `act` and report whether it
    /// succeeded.
    fn enact_primitive(&mut self, act: &Act) -> bool;
}

/// Turns raw sensor readings into stimulations at egocentric positions.
pub trait SensorimotorDecoder {
    fn sense(&mut self) -> SensoryFrame;
}

impl<T: Environment + ?Sized> Environment for &mut T {
    fn enact_primitive(&mut self, act: &Act) -> bool {
        (**self).enact_primitive(act)
    }
}

impl<T: SensorimotorDecoder + ?Sized> SensorimotorDecoder for &mut T {
    fn sense(&mut self) -> SensoryFrame {
        (**self).sense()
    }
}
