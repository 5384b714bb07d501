//! # Enaction Core
//!
//! The vocabulary of the agent: acts and schemas (the sensorimotor
//! hierarchy), bundles of stimulations (object identities), places and the
//! per-cycle observation.
//!
//! Everything here is plain synchronous data. Acts, schemas and bundles are
//! stored in arenas and referred to by copyable handles so that the decision
//! cycle and the spatial memory can share them without reference counting.

pub mod act;
pub mod area;
pub mod bundle;
pub mod config;
pub mod error;
pub mod geometry;
pub mod observation;
pub mod place;
pub mod proposal;
pub mod repository;
pub mod schema;
pub mod stimulation;

pub use act::{Act, ActId, ActTags, AlternateAct, Step};
pub use area::Area;
pub use bundle::{Bundle, BundleId, BundleRegistry};
pub use config::EnactionConfig;
pub use error::{EnactionError, Result};
pub use geometry::{Direction, Motion, Position};
pub use observation::Observation;
pub use place::{Place, PlaceId, PlaceType};
pub use proposal::{select_best, Proposal};
pub use repository::{ActRepository, PrimitiveSpec};
pub use schema::{Schema, SchemaId, SchemaKey};
pub use stimulation::{Modality, Stimulation};
