//! # Enaction Reasoning
//!
//! The decision cycle of the agent and the seams to its world.
//!
//! Every tick the [`DecisionCycle`] proposes acts from the hierarchy given
//! the last enacted act, selects one (optionally filtered by internal
//! simulation in local space), issues exactly one primitive to the
//! [`Environment`], and learns once the intention concludes. The [`Agent`]
//! wraps the cycle with the spatial system and dynamic feedback.

pub mod agent;
pub mod decision;
pub mod environment;
pub mod feedback;

pub use agent::Agent;
pub use decision::{DecisionCycle, Phase, TickReport};
pub use environment::{Environment, SensorimotorDecoder};
pub use feedback::{dynamic_feature, Feedback};
