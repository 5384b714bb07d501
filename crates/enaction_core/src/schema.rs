use crate::act::ActId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle of a registered schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaId(pub(crate) usize);

impl SchemaId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Identity of a composite schema: the labels of its context and intention acts.
///
/// Labels are immutable once interned, so this key stays valid for the life
/// of the repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaKey {
    pub context: String,
    pub intention: String,
}

/// A context-act followed by an intention-act, with its two outcome acts.
///
/// Primitive schemas have neither context nor intention; they are enacted
/// directly by the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    pub(crate) id: SchemaId,
    pub(crate) label: String,
    pub(crate) context: Option<ActId>,
    pub(crate) intention: Option<ActId>,
    pub(crate) success_act: ActId,
    pub(crate) failure_act: ActId,
    pub weight: u32,
}

impl Schema {
    pub fn id(&self) -> SchemaId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_primitive(&self) -> bool {
        self.context.is_none()
    }

    pub fn context_act(&self) -> Option<ActId> {
        self.context
    }

    pub fn intention_act(&self) -> Option<ActId> {
        self.intention
    }

    pub fn success_act(&self) -> ActId {
        self.success_act
    }

    pub fn failure_act(&self) -> ActId {
        self.failure_act
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} w={}", self.label, self.weight)
    }
}
