//! Local space memory: a short-lived, egocentric collection of places.
//!
//! Places are expressed in the agent's current frame. Every self-motion
//! re-projects them, places that drift beyond the memory radius are evicted,
//! and places that are not refreshed expire after the persistence window.

use enaction_core::config::MemoryConfig;
use enaction_core::{
    ActId, ActRepository, BundleId, BundleRegistry, Direction, Motion, Place, PlaceId, PlaceType,
    Position,
};
use std::f32::consts::FRAC_PI_2;

/// Display value of a cell where nothing is known.
pub const UNANIMATED_COLOR: u32 = 0xFFFFFF;

/// Outcome of a copresence pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Copresence {
    pub created: Vec<PlaceId>,
    pub refreshed: Vec<PlaceId>,
}

#[derive(Debug, Clone)]
pub struct LocalSpaceMemory {
    places: Vec<Place>,
    clock: i64,
    next_id: u64,
    config: MemoryConfig,
}

impl Default for LocalSpaceMemory {
    fn default() -> Self {
        Self::new(MemoryConfig::default())
    }
}

impl LocalSpaceMemory {
    pub fn new(config: MemoryConfig) -> Self {
        Self {
            places: Vec::new(),
            clock: 0,
            next_id: 0,
            config,
        }
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn tick(&mut self) {
        self.clock += 1;
    }

    pub fn clock(&self) -> i64 {
        self.clock
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    pub fn get(&self, id: PlaceId) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: PlaceId) -> Option<&mut Place> {
        self.places.iter_mut().find(|p| p.id == id)
    }

    // ------------------------------------------------------------------------
    // Insertion and refresh
    // ------------------------------------------------------------------------

    /// Append a new place stamped with the current clock. Never merges with
    /// existing places.
    pub fn add_place(&mut self, bundle: Option<BundleId>, position: Position, place_type: PlaceType) -> PlaceId {
        let id = PlaceId(self.next_id);
        self.next_id += 1;
        let mut place = Place::new(id, bundle, position, place_type);
        place.update_count = self.clock;
        self.places.push(place);
        id
    }

    /// Stamp a place with the current clock. Returns false if it is gone.
    pub fn refresh(&mut self, id: PlaceId) -> bool {
        let clock = self.clock;
        match self.get_mut(id) {
            Some(place) => {
                place.update_count = clock;
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: PlaceId) {
        self.places.retain(|p| p.id != id);
    }

    // ------------------------------------------------------------------------
    // Self-motion
    // ------------------------------------------------------------------------

    /// Re-project every place after the agent performed `motion`, then evict
    /// the places that fell outside the memory radius.
    pub fn transform(&mut self, motion: &Motion) {
        for place in &mut self.places {
            place.reproject(motion);
        }

        let radius = self.config.radius;
        let before = self.places.len();
        self.places.retain(|p| p.distance() <= radius);
        if self.places.len() < before {
            tracing::debug!("Evicted {} places beyond radius {}", before - self.places.len(), radius);
        }
        debug_assert!(self.places.iter().all(|p| p.distance() <= radius));
    }

    // ------------------------------------------------------------------------
    // Eviction
    // ------------------------------------------------------------------------

    /// Evict places older than the persistence window. Perceived places
    /// expire one tick earlier than inferred ones.
    pub fn clear(&mut self) {
        let clock = self.clock;
        let persistence = self.config.persistence;
        self.places.retain(|p| {
            if p.place_type.is_perceived() {
                p.update_count >= clock - persistence + 1
            } else {
                p.update_count >= clock - persistence
            }
        });
    }

    /// Evict the places in the visual background.
    pub fn clear_background(&mut self) {
        let limit = self.config.background_distance - 1.0;
        self.places.retain(|p| p.distance() <= limit);
    }

    /// Evict the places in front of the agent, except those within reach.
    pub fn clear_front(&mut self) {
        self.places.retain(|p| {
            let d = p.direction();
            !(d > -FRAC_PI_2 && d < FRAC_PI_2 && p.distance() > 1.0)
        });
    }

    pub fn clear_place(&mut self, position: &Position) {
        self.places.retain(|p| !p.is_in_cell(position));
    }

    pub fn clear_simulation(&mut self) {
        self.places.retain(|p| p.place_type != PlaceType::Simulation);
    }

    // ------------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------------

    /// The bundle of the last phenomenon in this cell.
    pub fn bundle_at(&self, position: &Position) -> Option<BundleId> {
        self.places
            .iter()
            .rev()
            .find(|p| p.is_in_cell(position) && p.is_phenomenon())
            .and_then(|p| p.bundle)
    }

    /// Display value of the last phenomenon in this cell.
    pub fn value_at(&self, position: &Position) -> u32 {
        self.places
            .iter()
            .rev()
            .find(|p| p.is_in_cell(position) && p.is_phenomenon())
            .map(|p| p.value)
            .unwrap_or(UNANIMATED_COLOR)
    }

    /// Values of the nine cells around the agent, in trace order.
    pub fn local_space_snapshot(&self) -> [u32; 9] {
        Direction::LOCAL_SPACE.map(|d| self.value_at(&d.vector()))
    }

    /// The phenomenon place of maximal absolute attractiveness; the last one
    /// wins ties.
    pub fn focus(&self, clock: i64, bundles: &BundleRegistry) -> Option<PlaceId> {
        let mut best: Option<(i32, PlaceId)> = None;
        for place in self.places.iter().filter(|p| p.is_phenomenon()) {
            let attractiveness = place.attractiveness(clock, bundles);
            match best {
                Some((max, _)) if attractiveness.abs() < max.abs() => {}
                _ => best = Some((attractiveness, place.id)),
            }
        }
        best.map(|(_, id)| id)
    }

    // ------------------------------------------------------------------------
    // Copresence
    // ------------------------------------------------------------------------

    /// Infer object identity from interactions enacted in the same cell.
    ///
    /// Distinct one-place acts evoked in the same cell are bundled together.
    /// Each act evoked this tick then refreshes, or creates, a copresence
    /// place carrying its bundle.
    pub fn copresence(&mut self, acts: &ActRepository, bundles: &mut BundleRegistry) -> Copresence {
        self.clear();
        let clock = self.clock;
        let window = self.config.evoke_window;

        let evoking: Vec<Place> = self
            .places
            .iter()
            .filter(|p| p.evokes_phenomenon(clock, window))
            .cloned()
            .collect();

        let one_place = |p: &Place| -> Option<ActId> {
            p.act.filter(|a| acts.act(*a).concerns_one_place)
        };

        for first in &evoking {
            let Some(first_act) = one_place(first) else { continue };
            for second in &evoking {
                let Some(second_act) = one_place(second) else { continue };
                if first_act != second_act && first.is_in_cell(&second.position) {
                    bundles.add_bundle(first_act, second_act);
                }
            }
        }

        let mut outcome = Copresence::default();
        for evoked in evoking.iter().filter(|p| p.update_count == clock) {
            let Some(bundle) = evoked.act.and_then(|a| bundles.evoke_bundle(a)) else {
                continue;
            };

            let mut found = false;
            for place in &mut self.places {
                if place.place_type == PlaceType::Copresence
                    && place.is_in_cell(&evoked.position)
                    && place.bundle == Some(bundle)
                {
                    place.update_count = clock;
                    found = true;
                    if !outcome.refreshed.contains(&place.id) {
                        outcome.refreshed.push(place.id);
                    }
                }
            }

            if !found {
                let id = self.add_place(Some(bundle), evoked.position, PlaceType::Copresence);
                if let Some(place) = self.get_mut(id) {
                    place.first_position = evoked.first_position;
                    place.second_position = evoked.second_position;
                    place.orientation = evoked.orientation;
                    place.value = evoked.value;
                }
                tracing::debug!("Copresence place {:?} for bundle {:?}", id, bundle);
                outcome.created.push(id);
            }
        }
        outcome
    }
}

// ============================================================================
// Tests
// ============================================================================
