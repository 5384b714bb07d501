//! The agent: hierarchy, bundles, spatial system and decision cycle wired
//! together, one tick at a time.

use crate::decision::{DecisionCycle, TickReport};
use crate::environment::{Environment, SensorimotorDecoder};
use crate::feedback::dynamic_feature;
use anyhow::Context;
use enaction_core::{
    ActRepository, BundleRegistry, EnactionConfig, Observation, Place, PrimitiveSpec, Result, SchemaId,
};
use enaction_memory::{Layout, SpatialSystem};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

pub struct Agent {
    config: EnactionConfig,
    acts: ActRepository,
    bundles: BundleRegistry,
    spatial: SpatialSystem,
    cycle: DecisionCycle,
    rng: StdRng,
    observation: Observation,
    ticks: u64,
}

impl Default for Agent {
    fn default() -> Self {
        Self::new(EnactionConfig::default())
    }
}

impl Agent {
    pub fn new(config: EnactionConfig) -> Self {
        let rng = match config.decision.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            acts: ActRepository::new(),
            bundles: BundleRegistry::new(config.bundle.clone()),
            spatial: SpatialSystem::new(config.memory.clone()),
            cycle: DecisionCycle::new(config.hierarchy.clone(), config.decision.clone()),
            rng,
            observation: Observation::default(),
            ticks: 0,
            config,
        }
    }

    /// Build an agent from a TOML config file.
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let config = EnactionConfig::load(path.as_ref())
            .with_context(|| format!("Failed to configure agent from {}", path.as_ref().display()))?;
        Ok(Self::new(config))
    }

    pub fn add_primitive(&mut self, spec: PrimitiveSpec) -> Result<SchemaId> {
        self.acts.add_primitive(spec)
    }

    /// Run one tick: decide and issue one primitive, sense the result,
    /// integrate it into local space and score it.
    pub fn step<W>(&mut self, world: &mut W) -> Result<TickReport>
    where
        W: Environment + SensorimotorDecoder + ?Sized,
    {
        let report = self.cycle.step(
            &mut self.acts,
            self.spatial.memory_mut(),
            &self.bundles,
            world,
            &mut self.rng,
        )?;
        if report.stopped {
            return Ok(report);
        }

        let frame = world.sense();
        let mut observation = self.spatial.step(report.enacted, &frame, &self.acts, &mut self.bundles);
        let feedback = dynamic_feature(&self.observation, &observation, report.enacted.map(|a| self.acts.act(a)));
        observation.instantaneous_feedback = feedback.visual;
        observation.stimuli = feedback.stimuli;
        observation.satisfaction = feedback.satisfaction;
        self.observation = observation;
        self.ticks += 1;

        if let Some(completed) = report.completed {
            tracing::info!(
                "Tick {}: enacted {} (satisfaction {})",
                self.ticks,
                self.acts.act(completed).label(),
                self.observation.satisfaction
            );
        }
        Ok(report)
    }

    pub fn request_stop(&mut self) {
        self.cycle.request_stop();
    }

    // ------------------------------------------------------------------------
    // Tracer accessors
    // ------------------------------------------------------------------------

    pub fn config(&self) -> &EnactionConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn repository(&self) -> &ActRepository {
        &self.acts
    }

    pub fn bundles(&self) -> &BundleRegistry {
        &self.bundles
    }

    pub fn spatial(&self) -> &SpatialSystem {
        &self.spatial
    }

    pub fn cycle(&self) -> &DecisionCycle {
        &self.cycle
    }

    pub fn places(&self) -> &[Place] {
        self.spatial.memory().places()
    }

    pub fn layout(&self) -> &Layout {
        self.spatial.layout()
    }

    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    pub fn local_space_snapshot(&self) -> [u32; 9] {
        self.spatial.memory().local_space_snapshot()
    }

    /// One-line JSON trace of the last tick.
    pub fn trace(&self, report: &TickReport) -> serde_json::Value {
        let label = |id: Option<enaction_core::ActId>| id.map(|a| self.acts.act(a).label().to_string());
        serde_json::json!({
            "tick": self.ticks,
            "intended": label(report.intended),
            "primitive": label(report.primitive),
            "enacted": label(report.enacted),
            "completed": label(report.completed),
            "tags": report.enacted.map(|a| &self.acts.act(a).tags),
            "stimuli": self.observation.stimuli,
            "satisfaction": self.observation.satisfaction,
            "places": self.places().len(),
            "schemas": self.acts.schema_count(),
            "layout": self.layout().to_string(),
            "local_space": self
                .local_space_snapshot()
                .iter()
                .map(|v| format!("{:06X}", v))
                .collect::<Vec<_>>(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enaction_core::{Act, Motion, PlaceType, Position};
    use enaction_memory::SensoryFrame;

    /// An empty world: moving always succeeds, nothing is ever seen.
    struct Void;

    impl Environment for Void {
        fn enact_primitive(&mut self, _act: &Act) -> bool {
            true
        }
    }

    impl SensorimotorDecoder for Void {
        fn sense(&mut self) -> SensoryFrame {
            SensoryFrame::default()
        }
    }

    fn agent(seed: u64) -> Agent {
        let mut config = EnactionConfig::default();
        config.decision.seed = Some(seed);
        let mut agent = Agent::new(config);
        agent
            .add_primitive(PrimitiveSpec::new(">", 5, -10).with_motion(Motion::translate(1.0, 0.0)))
            .unwrap();
        agent
            .add_primitive(PrimitiveSpec::new("^", -3, -3).with_motion(Motion::rotate(1.57)))
            .unwrap();
        agent
    }

    #[test]
    fn test_each_tick_evokes_one_place() {
        let mut agent = agent(1);
        let report = agent.step(&mut Void).unwrap();
        assert!(report.enacted.is_some());
        assert_eq!(agent.ticks(), 1);
        assert_eq!(agent.spatial().memory().clock(), 1);
        assert_eq!(
            agent
                .places()
                .iter()
                .filter(|p| p.place_type == PlaceType::EvokePhenomenon)
                .count(),
            1
        );
        assert!(agent.observation().stimuli.starts_with(' '));
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let mut a = agent(42);
        let mut b = agent(42);
        for _ in 0..30 {
            let ra = a.step(&mut Void).unwrap();
            let rb = b.step(&mut Void).unwrap();
            assert_eq!(ra, rb);
        }
        assert_eq!(a.repository().schema_count(), b.repository().schema_count());
    }

    #[test]
    fn test_stop_request_ends_ticking() {
        let mut agent = agent(3);
        agent.request_stop();
        let mut stopped = false;
        for _ in 0..10 {
            if agent.step(&mut Void).unwrap().stopped {
                stopped = true;
                break;
            }
        }
        assert!(stopped);
    }

    #[test]
    fn test_trace_is_json_object() {
        let mut agent = agent(9);
        let report = agent.step(&mut Void).unwrap();
        let trace = agent.trace(&report);
        assert_eq!(trace["tick"], 1);
        assert_eq!(trace["local_space"].as_array().unwrap().len(), 9);
        assert!(trace["tags"].is_object());
    }

    #[test]
    fn test_empty_world_makes_no_objects() {
        let mut config = EnactionConfig::default();
        config.decision.seed = Some(5);
        let mut agent = Agent::new(config);
        agent
            .add_primitive(
                PrimitiveSpec::new(">", 5, -10)
                    .with_motion(Motion::translate(1.0, 0.0))
                    .with_start_position(Position::new(1.0, 0.0, 0.0))
                    .with_one_place(false),
            )
            .unwrap();
        agent
            .add_primitive(PrimitiveSpec::new("^", -3, -3).with_motion(Motion::rotate(1.57)))
            .unwrap();
        agent
            .add_primitive(PrimitiveSpec::new("v", -3, -3).with_motion(Motion::rotate(-1.57)))
            .unwrap();

        let mut focus_changes = 0;
        for _ in 0..10 {
            agent.step(&mut Void).unwrap();
            if agent.observation().new_focus {
                focus_changes += 1;
            }
        }
        assert!(agent.bundles().is_empty());
        assert_eq!(focus_changes, 0);
        assert_eq!(agent.observation().focus, None);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(Agent::from_config_file("/nonexistent/enaction.toml").is_err());
    }
}
