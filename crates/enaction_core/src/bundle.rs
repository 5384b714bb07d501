//! Bundles: multimodal identities of the things the agent interacts with.
//!
//! A bundle groups the stimulations that belong to the same object and the
//! acts that were found to be copresent on it.

use crate::act::ActId;
use crate::config::BundleConfig;
use crate::repository::ActRepository;
use crate::stimulation::{
    Stimulation, GUSTATORY_FOOD, GUSTATORY_NOTHING, KINEMATIC_FORWARD, TACTILE_EMPTY,
    TACTILE_FOOD, TACTILE_HARD, VISUAL_UNSEEN,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BundleId(pub(crate) usize);

impl BundleId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bundle {
    id: BundleId,
    pub visual: Stimulation,
    pub tactile: Stimulation,
    pub gustatory: Stimulation,
    pub kinematic: Stimulation,
    /// Clock value when the bundle was last checked; `None` if never.
    last_time_bundled: Option<i64>,
    acts: Vec<ActId>,
}

impl Bundle {
    fn new(id: BundleId, visual: Stimulation, tactile: Stimulation) -> Self {
        Self {
            id,
            visual,
            tactile,
            gustatory: Stimulation::gustatory(GUSTATORY_NOTHING),
            kinematic: Stimulation::kinematic(KINEMATIC_FORWARD),
            last_time_bundled: None,
            acts: Vec::new(),
        }
    }

    pub fn id(&self) -> BundleId {
        self.id
    }

    /// Display value: the visual color if seen, otherwise a tactile shade.
    pub fn value(&self) -> u32 {
        if self.visual.value != VISUAL_UNSEEN {
            self.visual.value
        } else {
            self.tactile.rgb()
        }
    }

    pub fn hex_color(&self) -> String {
        format!("{:06X}", self.value() & 0xFFFFFF)
    }

    pub fn last_time_bundled(&self) -> Option<i64> {
        self.last_time_bundled
    }

    /// Checking a bundle makes it unattractive for a while.
    pub fn set_last_time_bundled(&mut self, clock: i64) {
        self.last_time_bundled = Some(clock);
    }

    /// Attractiveness at `clock`.
    ///
    /// Food is always attractive (more so when touched); hard things repel.
    /// Anything else is attractive while unknown, drops to zero when checked,
    /// then ramps back up over the forget window.
    pub fn attractiveness(&self, clock: i64, config: &BundleConfig) -> i32 {
        if self.gustatory.value == GUSTATORY_FOOD {
            if self.tactile.value == TACTILE_FOOD {
                return config.food_attractiveness + config.touched_food_bonus;
            }
            return config.food_attractiveness;
        }
        if self.tactile.value == TACTILE_HARD {
            return config.hard_attractiveness;
        }
        match self.last_time_bundled {
            None => config.unknown_attractiveness,
            Some(t) => {
                let elapsed = (clock - t).max(0);
                if config.forget_window <= 0 || elapsed >= config.forget_window {
                    config.unknown_attractiveness
                } else {
                    (i64::from(config.unknown_attractiveness) * elapsed / config.forget_window) as i32
                }
            }
        }
    }

    pub fn acts(&self) -> &[ActId] {
        &self.acts
    }

    pub fn contains(&self, act: ActId) -> bool {
        self.acts.contains(&act)
    }

    pub fn add_act(&mut self, act: ActId) {
        if !self.contains(act) {
            self.acts.push(act);
        }
    }

    /// Strict check: this bundle is known to afford `act`.
    pub fn afford(&self, act: ActId) -> bool {
        self.contains(act)
    }

    /// Weak check: nothing known about this bundle contradicts `act`.
    pub fn is_consistent(&self, act: ActId, acts: &ActRepository) -> bool {
        match acts.alternate(act) {
            Some(alternate) => !self.contains(alternate),
            None => true,
        }
    }
}

// ============================================================================
// BundleRegistry
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct BundleRegistry {
    bundles: Vec<Bundle>,
    config: BundleConfig,
}

impl BundleRegistry {
    pub fn new(config: BundleConfig) -> Self {
        Self {
            bundles: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &BundleConfig {
        &self.config
    }

    /// The bundle with these visual and tactile stimulations, created if new.
    pub fn bundle_for(&mut self, visual: Stimulation, tactile: Stimulation) -> BundleId {
        if let Some(b) = self
            .bundles
            .iter()
            .find(|b| b.visual == visual && b.tactile == tactile)
        {
            return b.id;
        }
        self.push(visual, tactile)
    }

    /// Bundle two acts found copresent in the same cell. If either already
    /// belongs to a bundle, the other joins it.
    pub fn add_bundle(&mut self, first: ActId, second: ActId) -> BundleId {
        let id = match self.evoke_bundle(first).or_else(|| self.evoke_bundle(second)) {
            Some(id) => id,
            None => {
                let id = self.push(
                    Stimulation::visual(VISUAL_UNSEEN),
                    Stimulation::tactile(TACTILE_EMPTY),
                );
                tracing::debug!("New copresence bundle {:?}", id);
                id
            }
        };
        let bundle = &mut self.bundles[id.0];
        bundle.add_act(first);
        bundle.add_act(second);
        id
    }

    /// The bundle that `act` is known to belong to.
    pub fn evoke_bundle(&self, act: ActId) -> Option<BundleId> {
        self.bundles.iter().find(|b| b.contains(act)).map(|b| b.id)
    }

    fn push(&mut self, visual: Stimulation, tactile: Stimulation) -> BundleId {
        let id = BundleId(self.bundles.len());
        self.bundles.push(Bundle::new(id, visual, tactile));
        id
    }

    pub fn get(&self, id: BundleId) -> &Bundle {
        &self.bundles[id.0]
    }

    pub fn get_mut(&mut self, id: BundleId) -> &mut Bundle {
        &mut self.bundles[id.0]
    }

    pub fn attractiveness(&self, id: BundleId, clock: i64) -> i32 {
        self.get(id).attractiveness(clock, &self.config)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bundle> {
        self.bundles.iter()
    }
}
