//! Spatial system: integrates one sensory frame per cycle into local space
//! memory and reports the resulting observation.

use crate::layout::{Layout, Transformation};
use crate::local_space::LocalSpaceMemory;
use enaction_core::config::MemoryConfig;
use enaction_core::stimulation::{GUSTATORY_FOOD, GUSTATORY_NOTHING, KINEMATIC_FORWARD, TACTILE_EMPTY, VISUAL_UNSEEN};
use enaction_core::{
    Act, ActId, ActRepository, Area, BundleId, BundleRegistry, Motion, Observation, PlaceId, PlaceType, Position,
    Stimulation,
};
use serde::{Deserialize, Serialize};

/// Something salient in one modality at an egocentric position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Salience {
    pub position: Position,
    pub span: f32,
    pub stimulation: Stimulation,
}

impl Salience {
    pub fn new(position: Position, span: f32, stimulation: Stimulation) -> Self {
        Self {
            position,
            span,
            stimulation,
        }
    }
}

/// Decoded sensory input of one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensoryFrame {
    pub visual: Vec<Salience>,
    pub tactile: Vec<Salience>,
    pub gustatory: Stimulation,
    pub kinematic: Stimulation,
}

impl Default for SensoryFrame {
    fn default() -> Self {
        Self {
            visual: Vec::new(),
            tactile: Vec::new(),
            gustatory: Stimulation::gustatory(GUSTATORY_NOTHING),
            kinematic: Stimulation::kinematic(KINEMATIC_FORWARD),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpatialSystem {
    memory: LocalSpaceMemory,
    focus: Option<PlaceId>,
    observation: Observation,
    layout: Layout,
}

impl SpatialSystem {
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            memory: LocalSpaceMemory::new(config),
            ..Self::default()
        }
    }

    pub fn memory(&self) -> &LocalSpaceMemory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut LocalSpaceMemory {
        &mut self.memory
    }

    pub fn focus(&self) -> Option<PlaceId> {
        self.focus
    }

    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Run one cycle of spatial integration after `enacted` was performed.
    pub fn step(
        &mut self,
        enacted: Option<ActId>,
        frame: &SensoryFrame,
        acts: &ActRepository,
        bundles: &mut BundleRegistry,
    ) -> Observation {
        self.memory.tick();
        let clock = self.memory.clock();
        let motion = enacted.map(|a| acts.act(a).motion).unwrap_or_else(Motion::identity);

        self.memory.transform(&motion);
        self.memory.clear_background();
        if !frame.visual.is_empty() {
            self.memory.clear_front();
        }

        for salience in &frame.visual {
            let bundle = visual_bundle(bundles, salience.stimulation);
            self.add_salience(bundle, salience, PlaceType::Sight);
        }
        for salience in &frame.tactile {
            let bundle = self.tactile_bundle(bundles, salience);
            self.add_salience(bundle, salience, PlaceType::Touch);
        }

        if frame.gustatory.value == GUSTATORY_FOOD {
            if let Some(b) = self.memory.bundle_at(&Position::zeros()) {
                bundles.get_mut(b).gustatory = frame.gustatory;
            }
        }

        if let Some(id) = enacted {
            let act = acts.act(id);
            let position = motion.reproject(&act.start_position);
            if let Some(b) = self.memory.bundle_at(&position) {
                bundles.get_mut(b).set_last_time_bundled(clock);
            }
            let place = self.memory.add_place(None, position, PlaceType::EvokePhenomenon);
            if let Some(place) = self.memory.get_mut(place) {
                place.act = Some(id);
                place.value = act.color;
            }
        }

        self.memory.copresence(acts, bundles);

        let focus = self.memory.focus(clock, bundles);
        let new_focus = focus != self.focus;
        self.focus = focus;

        self.layout = self.update_layout(&motion, enacted.map(|a| acts.act(a)), bundles);
        self.observation = self.observe(clock, &motion, new_focus, frame, bundles);
        tracing::debug!(
            "Spatial step {}: {} places, focus {:?}, layout {}",
            clock,
            self.memory.len(),
            self.focus,
            self.layout
        );
        self.observation.clone()
    }

    fn add_salience(&mut self, bundle: BundleId, salience: &Salience, place_type: PlaceType) {
        let id = self.memory.add_place(Some(bundle), salience.position, place_type);
        if let Some(place) = self.memory.get_mut(id) {
            place.span = salience.span;
            place.value = salience.stimulation.value;
            let half = salience.span / 2.0;
            place.first_position = salience.position + Position::new(0.0, half, 0.0);
            place.second_position = salience.position - Position::new(0.0, half, 0.0);
        }
    }

    /// Touching something already seen completes its bundle.
    fn tactile_bundle(&self, bundles: &mut BundleRegistry, salience: &Salience) -> BundleId {
        if let Some(seen) = self.memory.bundle_at(&salience.position) {
            let bundle = bundles.get_mut(seen);
            if bundle.tactile.value == TACTILE_EMPTY || bundle.tactile == salience.stimulation {
                bundle.tactile = salience.stimulation;
                return seen;
            }
        }
        bundles.bundle_for(Stimulation::visual(VISUAL_UNSEEN), salience.stimulation)
    }

    fn update_layout(&self, motion: &Motion, enacted: Option<&Act>, bundles: &BundleRegistry) -> Layout {
        let transformation = match enacted {
            Some(_) => Transformation::from_motion(motion),
            None => Transformation::Unknown,
        };
        let mut layout = self.layout.predict(transformation);
        for place in self.memory.places().iter().filter(|p| p.is_phenomenon()) {
            if let Some(b) = place.bundle {
                layout.record(Area::of(&place.position), &bundles.get(b).hex_color());
            }
        }
        if let Some(act) = enacted {
            if let (Some(area), Some(phenomenon)) = (act.tags.area, act.tags.phenomenon.as_deref()) {
                layout.record(area, phenomenon);
            }
        }
        layout
    }

    fn observe(
        &self,
        clock: i64,
        motion: &Motion,
        new_focus: bool,
        frame: &SensoryFrame,
        bundles: &BundleRegistry,
    ) -> Observation {
        let mut observation = Observation {
            new_focus,
            gustatory: frame.gustatory,
            kinematic: frame.kinematic,
            translation: motion.translation,
            rotation: motion.rotation,
            ..Observation::default()
        };

        let Some(place) = self.focus.and_then(|id| self.memory.get(id)) else {
            return observation;
        };
        observation.focus = Some(place.id);
        observation.position = place.position;
        observation.span = place.span;
        observation.speed = place.speed;
        observation.place_type = Some(place.place_type);
        observation.update_count = place.update_count;
        observation.attractiveness = place.attractiveness(clock, bundles);
        observation.bundle = place.bundle;
        if let Some(b) = place.bundle {
            let bundle = bundles.get(b);
            observation.visual = bundle.visual;
            observation.tactile = bundle.tactile;
        }
        observation
    }
}

/// The bundle a sighted color belongs to, created if the color is new.
fn visual_bundle(bundles: &mut BundleRegistry, visual: Stimulation) -> BundleId {
    if let Some(id) = bundles.iter().find(|b| b.visual == visual).map(|b| b.id()) {
        return id;
    }
    bundles.bundle_for(visual, Stimulation::tactile(TACTILE_EMPTY))
}

// ============================================================================
// Tests
// ============================================================================
