use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EnactionConfig {
    pub hierarchy: HierarchyConfig,
    pub memory: MemoryConfig,
    pub bundle: BundleConfig,
    pub decision: DecisionConfig,
}

impl EnactionConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let config: EnactionConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        Ok(config)
    }

    /// Try to load from path; if the file doesn't exist or is invalid, return defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Apply environment variable overrides on top of file-based config.
    ///
    /// The agent itself never reads the environment; only the runner calls this.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("ENACTION_SEED") {
            if let Ok(n) = v.parse() {
                self.decision.seed = Some(n);
            }
        }
        if let Ok(v) = std::env::var("ENACTION_REGULARITY_THRESHOLD") {
            if let Ok(n) = v.parse() {
                self.hierarchy.regularity_threshold = n;
            }
        }
        if let Ok(v) = std::env::var("ENACTION_MEMORY_RADIUS") {
            if let Ok(n) = v.parse() {
                self.memory.radius = n;
            }
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Schemas whose weight exceeds this are proposed regardless of context.
    pub regularity_threshold: u32,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            regularity_threshold: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Places farther than this from the agent are evicted after a transform.
    pub radius: f32,
    /// Number of clock ticks a place survives without refresh.
    pub persistence: i64,
    /// `clear_background` removes places beyond `background_distance - 1`.
    pub background_distance: f32,
    /// An evoking place is fresh while `clock - update_count <= evoke_window`:
    /// with 1, an act enacted this tick pairs with one enacted the tick before.
    pub evoke_window: i64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            radius: 20.0,
            persistence: 10,
            background_distance: 10.0,
            evoke_window: 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    pub unknown_attractiveness: i32,
    pub food_attractiveness: i32,
    /// Extra attractiveness when the food is also being touched.
    pub touched_food_bonus: i32,
    pub hard_attractiveness: i32,
    /// Ticks for a checked bundle to become fully attractive again.
    pub forget_window: i64,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            unknown_attractiveness: 200,
            food_attractiveness: 400,
            touched_food_bonus: 10,
            hard_attractiveness: -200,
            forget_window: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    /// Discard candidates whose spatial simulation is inconsistent.
    pub simulate_candidates: bool,
    /// How an empty cell resolves during candidate simulation.
    pub doubt: bool,
    /// Fixed RNG seed for reproducible tie-breaks.
    pub seed: Option<u64>,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            simulate_candidates: true,
            doubt: true,
            seed: None,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = EnactionConfig::default();
        assert_eq!(cfg.hierarchy.regularity_threshold, 4);
        assert_eq!(cfg.memory.persistence, 10);
        assert_eq!(cfg.memory.radius, 20.0);
        assert_eq!(cfg.bundle.food_attractiveness, 400);
        assert!(cfg.decision.seed.is_none());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml_str = r#"
[hierarchy]
regularity_threshold = 5
"#;
        let cfg: EnactionConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.hierarchy.regularity_threshold, 5);
        // Defaults for unspecified fields
        assert_eq!(cfg.memory.persistence, 10);
        assert!(cfg.decision.simulate_candidates);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_str = r#"
[hierarchy]
regularity_threshold = 2

[memory]
radius = 4.0
persistence = 50
background_distance = 8.0
evoke_window = 0

[bundle]
unknown_attractiveness = 150
food_attractiveness = 500
touched_food_bonus = 5
hard_attractiveness = -300
forget_window = 20

[decision]
simulate_candidates = false
doubt = false
seed = 42
"#;
        let cfg: EnactionConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.hierarchy.regularity_threshold, 2);
        assert_eq!(cfg.memory.radius, 4.0);
        assert_eq!(cfg.memory.persistence, 50);
        assert_eq!(cfg.memory.evoke_window, 0);
        assert_eq!(cfg.bundle.hard_attractiveness, -300);
        assert_eq!(cfg.bundle.forget_window, 20);
        assert!(!cfg.decision.simulate_candidates);
        assert!(!cfg.decision.doubt);
        assert_eq!(cfg.decision.seed, Some(42));
    }

    #[test]
    fn test_env_overrides_and_defaults() {
        std::env::set_var("ENACTION_SEED", "7");
        std::env::set_var("ENACTION_REGULARITY_THRESHOLD", "9");

        let mut cfg = EnactionConfig::default();
        cfg.apply_env_overrides();

        assert_eq!(cfg.decision.seed, Some(7));
        assert_eq!(cfg.hierarchy.regularity_threshold, 9);

        std::env::remove_var("ENACTION_SEED");
        std::env::remove_var("ENACTION_REGULARITY_THRESHOLD");

        // Nonexistent path returns defaults
        let cfg = EnactionConfig::load_or_default("/nonexistent/path.toml");
        assert_eq!(cfg.hierarchy.regularity_threshold, 4);
    }
}
