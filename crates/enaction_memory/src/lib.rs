//! # Enaction Memory
//!
//! Egocentric spatial memory of the agent. Places are stored relative to the
//! agent, re-projected after every self-motion, and forgotten when they age
//! out or drift beyond the memory radius.
//!
//! - [`LocalSpaceMemory`]: places, eviction, focus and copresence
//! - [`simulation`]: walking a candidate act through local space with a
//!   scoped marker
//! - [`SpatialSystem`]: integration of a sensory frame into an observation
//! - [`Layout`]: which phenomenon sits in each frontal area

pub mod layout;
pub mod local_space;
pub mod simulation;
pub mod spas;

pub use layout::{Layout, Transformation};
pub use local_space::{Copresence, LocalSpaceMemory, UNANIMATED_COLOR};
pub use simulation::{Marker, SimulationReport, SimulationStep};
pub use spas::{Salience, SensoryFrame, SpatialSystem};

#[cfg(test)]
mod tests;
