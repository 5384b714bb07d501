//! Acts: primitive and composite sensorimotor interactions.
//!
//! Acts live in the [`ActRepository`](crate::ActRepository) arena and are
//! referred to by [`ActId`]. A composite act links to a pre-act and a post-act,
//! forming a binary DAG whose nodes may be shared by several parents.

use crate::area::Area;
use crate::geometry::{Motion, Position};
use crate::schema::SchemaId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of an interned act.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActId(pub(crate) usize);

impl ActId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ActId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Progress of a composite act during an active enactment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Step {
    #[default]
    Idle,
    /// The pre-act (context side) is being enacted.
    Pre,
    /// The post-act (intention side) is being enacted.
    Post,
}

/// Classification tags attached to an act.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActTags {
    pub action: Option<String>,
    pub aspect: Option<String>,
    pub area: Option<Area>,
    pub phenomenon: Option<String>,
}

/// An act observed in place of the intended one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateAct {
    pub act: ActId,
    /// True until the same alternate is observed a second time.
    pub fresh: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Act {
    pub(crate) id: ActId,
    pub(crate) label: String,
    pub(crate) primitive: bool,
    pub(crate) success: bool,
    pub(crate) schema: Option<SchemaId>,
    pub(crate) pre: Option<ActId>,
    pub(crate) post: Option<ActId>,
    pub(crate) step: Step,
    pub(crate) prescriber: Option<ActId>,
    pub(crate) alternates: Vec<AlternateAct>,

    /// Number of times this act was reinforced.
    pub weight: u32,
    /// Satisfaction of enacting this act.
    pub enaction_value: i32,
    pub tags: ActTags,
    /// Displacement of the agent expected when this act is enacted.
    pub motion: Motion,
    /// Where the interaction takes place relative to the agent when it starts.
    pub start_position: Position,
    /// Whether the act informs about exactly one place (copresence candidate).
    pub concerns_one_place: bool,
    /// Display color of the place evoked by this act.
    pub color: u32,
}

impl Act {
    pub(crate) fn new(id: ActId, label: &str) -> Self {
        Self {
            id,
            label: label.to_string(),
            primitive: true,
            success: true,
            schema: None,
            pre: None,
            post: None,
            step: Step::Idle,
            prescriber: None,
            alternates: Vec::new(),
            weight: 0,
            enaction_value: 0,
            tags: ActTags::default(),
            motion: Motion::identity(),
            start_position: Position::zeros(),
            concerns_one_place: false,
            color: 0xFFFFFF,
        }
    }

    pub fn id(&self) -> ActId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_primitive(&self) -> bool {
        self.primitive
    }

    /// Polarity: true for a success act, false for a failure act.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The schema this act is an outcome of.
    pub fn schema(&self) -> Option<SchemaId> {
        self.schema
    }

    pub fn pre_act(&self) -> Option<ActId> {
        self.pre
    }

    pub fn post_act(&self) -> Option<ActId> {
        self.post
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn prescriber(&self) -> Option<ActId> {
        self.prescriber
    }

    pub fn alternates(&self) -> &[AlternateAct] {
        &self.alternates
    }
}

impl fmt::Display for Act {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.enaction_value)
    }
}
