//! Act/schema repository: interning, schema learning and the prescriber
//! protocol that enacts composite acts one primitive at a time.

use crate::act::{Act, ActId, AlternateAct, Step};
use crate::area::Area;
use crate::error::{EnactionError, Result};
use crate::geometry::{Motion, Position};
use crate::schema::{Schema, SchemaId, SchemaKey};
use std::collections::HashMap;

// ============================================================================
// Primitive declaration
// ============================================================================

/// Declaration of a primitive schema and its two outcome acts.
#[derive(Debug, Clone)]
pub struct PrimitiveSpec {
    pub label: String,
    pub success_value: i32,
    pub failure_value: i32,
    pub success_motion: Motion,
    pub failure_motion: Motion,
    pub start_position: Position,
    pub success_color: u32,
    pub failure_color: u32,
    /// Whether the outcome informs about the single cell at `start_position`.
    pub concerns_one_place: bool,
    pub action: Option<String>,
    pub aspect: Option<String>,
    /// Area and phenomenon recorded in the layout by the success and the
    /// failure act respectively.
    pub phenomena: Option<(Area, String, String)>,
}

impl PrimitiveSpec {
    pub fn new(label: &str, success_value: i32, failure_value: i32) -> Self {
        Self {
            label: label.to_string(),
            success_value,
            failure_value,
            success_motion: Motion::identity(),
            failure_motion: Motion::identity(),
            start_position: Position::zeros(),
            success_color: 0xFFFFFF,
            failure_color: 0xFFFFFF,
            concerns_one_place: false,
            action: None,
            aspect: None,
            phenomena: None,
        }
    }

    /// Motion when the primitive succeeds; failures leave the agent in place.
    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.success_motion = motion;
        self
    }

    pub fn with_failure_motion(mut self, motion: Motion) -> Self {
        self.failure_motion = motion;
        self
    }

    /// Where the interaction happens. An act located there concerns that one
    /// place unless [`with_one_place`](Self::with_one_place) says otherwise.
    pub fn with_start_position(mut self, position: Position) -> Self {
        self.start_position = position;
        self.concerns_one_place = true;
        self
    }

    pub fn with_one_place(mut self, concerns_one_place: bool) -> Self {
        self.concerns_one_place = concerns_one_place;
        self
    }

    pub fn with_colors(mut self, success: u32, failure: u32) -> Self {
        self.success_color = success;
        self.failure_color = failure;
        self
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn with_aspect(mut self, aspect: &str) -> Self {
        self.aspect = Some(aspect.to_string());
        self
    }

    pub fn with_phenomena(mut self, area: Area, success: &str, failure: &str) -> Self {
        self.phenomena = Some((area, success.to_string(), failure.to_string()));
        self
    }
}

// ============================================================================
// ActRepository
// ============================================================================

/// Arena of acts and schemas with a label index.
#[derive(Debug, Clone, Default)]
pub struct ActRepository {
    acts: Vec<Act>,
    act_index: HashMap<String, ActId>,
    schemas: Vec<Schema>,
    composite_index: HashMap<SchemaKey, SchemaId>,
    primitive_index: HashMap<String, SchemaId>,
}

impl ActRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Acts
    // ------------------------------------------------------------------------

    /// Canonical act for `label`, created as a bare primitive on first use.
    pub fn intern_act(&mut self, label: &str) -> ActId {
        if let Some(id) = self.act_index.get(label) {
            return *id;
        }
        let id = ActId(self.acts.len());
        self.acts.push(Act::new(id, label));
        self.act_index.insert(label.to_string(), id);
        debug_assert_eq!(self.acts.len(), self.act_index.len());
        id
    }

    pub fn find_act(&self, label: &str) -> Option<ActId> {
        self.act_index.get(label).copied()
    }

    pub fn act_by_label(&self, label: &str) -> Result<&Act> {
        self.find_act(label)
            .map(|id| self.act(id))
            .ok_or_else(|| EnactionError::UnknownAct(label.to_string()))
    }

    /// Panics if `id` was not produced by this repository.
    pub fn act(&self, id: ActId) -> &Act {
        &self.acts[id.0]
    }

    pub fn act_mut(&mut self, id: ActId) -> &mut Act {
        &mut self.acts[id.0]
    }

    pub fn acts(&self) -> impl Iterator<Item = &Act> {
        self.acts.iter()
    }

    pub fn act_count(&self) -> usize {
        self.acts.len()
    }

    /// Number of primitive acts a full enactment of `id` issues.
    pub fn length(&self, id: ActId) -> usize {
        let mut count = 0;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let act = self.act(current);
            match (act.primitive, act.pre, act.post) {
                (false, Some(pre), Some(post)) => {
                    stack.push(post);
                    stack.push(pre);
                }
                _ => count += 1,
            }
        }
        count
    }

    /// The opposite-polarity outcome of the same schema.
    pub fn alternate(&self, id: ActId) -> Option<ActId> {
        let act = self.act(id);
        let schema = self.schema(act.schema?);
        Some(if act.success {
            schema.failure_act
        } else {
            schema.success_act
        })
    }

    /// Record that `actual` was enacted while `intended` was intended.
    /// Returns true if this alternate was not known yet.
    pub fn add_alternate(&mut self, intended: ActId, actual: ActId) -> bool {
        if intended == actual {
            return false;
        }
        let act = self.act_mut(intended);
        if let Some(existing) = act.alternates.iter_mut().find(|a| a.act == actual) {
            existing.fresh = false;
            return false;
        }
        act.alternates.push(AlternateAct {
            act: actual,
            fresh: true,
        });
        true
    }

    // ------------------------------------------------------------------------
    // Schemas
    // ------------------------------------------------------------------------

    /// Register a primitive schema and its success `(label)` and failure
    /// `[label]` acts.
    pub fn add_primitive(&mut self, spec: PrimitiveSpec) -> Result<SchemaId> {
        if self.primitive_index.contains_key(&spec.label) {
            return Err(EnactionError::DuplicatePrimitive(spec.label));
        }
        let schema_id = SchemaId(self.schemas.len());
        let success_act = self.intern_act(&format!("({})", spec.label));
        let failure_act = self.intern_act(&format!("[{}]", spec.label));

        for (id, success) in [(success_act, true), (failure_act, false)] {
            let act = self.act_mut(id);
            act.primitive = true;
            act.success = success;
            act.schema = Some(schema_id);
            act.start_position = spec.start_position;
            act.concerns_one_place = spec.concerns_one_place;
            act.tags.action = spec.action.clone();
            act.tags.aspect = spec.aspect.clone();
            if let Some((area, on_success, on_failure)) = &spec.phenomena {
                act.tags.area = Some(*area);
                act.tags.phenomenon = Some(if success { on_success } else { on_failure }.clone());
            }
            if success {
                act.enaction_value = spec.success_value;
                act.motion = spec.success_motion;
                act.color = spec.success_color;
            } else {
                act.enaction_value = spec.failure_value;
                act.motion = spec.failure_motion;
                act.color = spec.failure_color;
            }
        }

        self.schemas.push(Schema {
            id: schema_id,
            label: spec.label.clone(),
            context: None,
            intention: None,
            success_act,
            failure_act,
            weight: 0,
        });
        self.primitive_index.insert(spec.label, schema_id);
        Ok(schema_id)
    }

    pub fn primitive_schema(&self, label: &str) -> Result<SchemaId> {
        self.primitive_index
            .get(label)
            .copied()
            .ok_or_else(|| EnactionError::UnknownSchema(label.to_string()))
    }

    /// Composite schema for `(context, intention)`, registered on first request.
    pub fn compose_schema(&mut self, context: ActId, intention: ActId) -> SchemaId {
        let key = self.key(context, intention);
        if let Some(id) = self.composite_index.get(&key) {
            return *id;
        }

        let schema_id = SchemaId(self.schemas.len());
        let value = self.act(context).enaction_value + self.act(intention).enaction_value;
        let success_act = self.intern_act(&format!("({} {})", key.context, key.intention));
        let failure_act = self.intern_act(&format!("[{} {}]", key.context, key.intention));

        for (id, success) in [(success_act, true), (failure_act, false)] {
            let act = self.act_mut(id);
            act.primitive = false;
            act.success = success;
            act.schema = Some(schema_id);
            act.pre = Some(context);
            act.post = Some(intention);
            act.enaction_value = value;
        }

        self.schemas.push(Schema {
            id: schema_id,
            label: format!("{}{}", key.context, key.intention),
            context: Some(context),
            intention: Some(intention),
            success_act,
            failure_act,
            weight: 0,
        });
        self.composite_index.insert(key, schema_id);
        tracing::debug!("Registered schema {}", self.schemas[schema_id.0].label);
        schema_id
    }

    fn key(&self, context: ActId, intention: ActId) -> SchemaKey {
        SchemaKey {
            context: self.act(context).label.clone(),
            intention: self.act(intention).label.clone(),
        }
    }

    /// Increment the weight of the schema owning `act`.
    pub fn reinforce(&mut self, id: ActId) {
        let act = self.act_mut(id);
        act.weight += 1;
        if let Some(schema) = act.schema {
            self.schemas[schema.0].weight += 1;
        }
    }

    pub fn schema(&self, id: SchemaId) -> &Schema {
        &self.schemas[id.0]
    }

    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        self.schemas.iter()
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    pub fn has_primitives(&self) -> bool {
        !self.primitive_index.is_empty()
    }

    // ------------------------------------------------------------------------
    // Prescriber protocol
    // ------------------------------------------------------------------------

    /// Walk down the pre-acts of `id` to its deepest-left primitive, recording
    /// each ancestor as the prescriber of its child. Returns the primitive.
    pub fn prescribe(&mut self, id: ActId) -> ActId {
        let mut current = id;
        loop {
            let act = &self.acts[current.0];
            let pre = match (act.primitive, act.pre) {
                (false, Some(pre)) => pre,
                _ => return current,
            };
            self.acts[current.0].step = Step::Pre;
            self.acts[pre.0].prescriber = Some(current);
            current = pre;
        }
    }

    /// Called when `id` concluded. Hands control from a context side to its
    /// sibling intention side, or climbs past completed prescribers.
    ///
    /// Returns the next act to enact (possibly composite), or `None` when the
    /// top-level act is complete.
    pub fn update_prescriber(&mut self, id: ActId) -> Option<ActId> {
        let mut concluded = id;
        loop {
            let prescriber = self.acts[concluded.0].prescriber.take()?;
            self.acts[concluded.0].step = Step::Idle;
            match self.acts[prescriber.0].step {
                Step::Pre => {
                    let post = self.acts[prescriber.0].post?;
                    self.acts[prescriber.0].step = Step::Post;
                    self.acts[post.0].prescriber = Some(prescriber);
                    return Some(post);
                }
                Step::Post | Step::Idle => {
                    self.acts[prescriber.0].step = Step::Idle;
                    concluded = prescriber;
                }
            }
        }
    }

    /// Clear the prescriber chain above `id`.
    pub fn terminate(&mut self, id: ActId) {
        let mut current = Some(id);
        while let Some(act_id) = current {
            let act = &mut self.acts[act_id.0];
            act.step = Step::Idle;
            current = act.prescriber.take();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
