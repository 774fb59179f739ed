use std::fmt;

use serde::{Deserialize, Serialize};

/// Horizontal speed while running, jumping, airborne, or landing (units/s).
pub const RUN_SPEED: f32 = 350.0;
/// Horizontal speed while grinding a rail (units/s).
pub const GRIND_SPEED: f32 = 400.0;
/// Vertical velocity applied on jump. Negative is up (y-down world).
pub const JUMP_VELOCITY: f32 = -450.0;
/// Downward acceleration applied by the arcade host (units/s^2).
pub const GRAVITY: f32 = 1200.0;
/// Seconds spent in Jumping before switching to InAir.
pub const JUMP_APEX_WINDOW: f32 = 0.1;
/// Seconds spent in Landing before switching to Running.
pub const LANDING_WINDOW: f32 = 0.05;
/// Minimum |vy| for a lost contact to count as falling rather than flicker.
pub const FALL_EPSILON: f32 = 1.0;
/// Player center y beyond which the run ends.
pub const DEATH_Y: f32 = 700.0;

/// Narrowest and widest rooftop.
pub const MIN_WIDTH: f32 = 200.0;
pub const MAX_WIDTH: f32 = 600.0;
/// Gap bounds. `MAX_GAP` must stay under the flat-roof jump distance
/// `RUN_SPEED * 2 * |JUMP_VELOCITY| / GRAVITY` (262.5 with the defaults).
pub const MIN_GAP: f32 = 100.0;
pub const MAX_GAP: f32 = 250.0;
/// Terrain is kept generated this far ahead of the reference point.
pub const SPAWN_DISTANCE: f32 = 1600.0;
/// Terrain whose trailing edge is further behind than this is released.
pub const DESPAWN_DISTANCE: f32 = -800.0;

/// Player tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub run_speed: f32,
    pub grind_speed: f32,
    pub jump_velocity: f32,
    pub jump_apex_window: f32,
    pub landing_window: f32,
    pub fall_epsilon: f32,
    pub death_y: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    pub width: f32,
    pub height: f32,
    /// Camera x sits this far ahead of the player.
    pub camera_lead: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            run_speed: RUN_SPEED,
            grind_speed: GRIND_SPEED,
            jump_velocity: JUMP_VELOCITY,
            jump_apex_window: JUMP_APEX_WINDOW,
            landing_window: LANDING_WINDOW,
            fall_epsilon: FALL_EPSILON,
            death_y: DEATH_Y,
            spawn_x: 100.0,
            spawn_y: 420.0,
            width: 40.0,
            height: 60.0,
            camera_lead: 200.0,
        }
    }
}

/// How platform widths are drawn from `[min_width, max_width]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WidthDistribution {
    #[default]
    Uniform,
    /// `random()^power * range + min`; a power below 1 favours wide roofs.
    Skewed { power: f32 },
}

/// Terrain generation tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub min_width: f32,
    pub max_width: f32,
    pub min_gap: f32,
    pub max_gap: f32,
    pub spawn_distance: f32,
    pub despawn_distance: f32,
    /// Frontier reached by `initialize` before the first tick.
    pub initial_horizon: f32,
    pub roof_y: f32,
    pub platform_height: f32,
    pub rail_height: f32,
    /// Probability that a spawned segment is a rail instead of a rooftop.
    pub rail_chance: f64,
    pub width_distribution: WidthDistribution,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            min_width: MIN_WIDTH,
            max_width: MAX_WIDTH,
            min_gap: MIN_GAP,
            max_gap: MAX_GAP,
            spawn_distance: SPAWN_DISTANCE,
            despawn_distance: DESPAWN_DISTANCE,
            initial_horizon: SPAWN_DISTANCE,
            roof_y: 450.0,
            platform_height: 100.0,
            rail_height: 10.0,
            rail_chance: 0.0,
            width_distribution: WidthDistribution::Uniform,
        }
    }
}

/// Arcade host integration settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: f32,
    /// Fixed tick length in seconds.
    pub timestep: f32,
    pub substeps: u32,
    pub max_steps_per_frame: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            timestep: 0.016,
            substeps: 2,
            max_steps_per_frame: 8,
        }
    }
}

/// Top-level runner configuration, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub seed: u64,
    pub player: PlayerConfig,
    pub terrain: TerrainConfig,
    pub physics: PhysicsConfig,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            player: PlayerConfig::default(),
            terrain: TerrainConfig::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

/// Errors from loading or validating a runner configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(String),
    Parse(String),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config read error: {e}"),
            Self::Parse(e) => write!(f, "config parse error: {e}"),
            Self::Invalid(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl RunnerConfig {
    /// Load config from `$ROOFTOP_CONFIG` or `config/rooftop.toml`. Falls back
    /// to defaults if the file is missing, unparseable, or fails validation.
    pub fn load() -> Self {
        let path =
            std::env::var("ROOFTOP_CONFIG").unwrap_or_else(|_| "config/rooftop.toml".to_string());
        match Self::from_file(&path) {
            Ok(cfg) => {
                tracing::info!("Loaded configuration from {path}");
                cfg
            },
            Err(ConfigError::Io(_)) => {
                tracing::debug!("No {path} found, using defaults");
                Self::default()
            },
            Err(e) => {
                tracing::warn!("Failed to load {path}: {e}, using defaults");
                Self::default()
            },
        }
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Horizontal distance covered by a jump that lands back at take-off height.
    pub fn max_jump_distance(&self) -> f32 {
        let airtime = 2.0 * self.player.jump_velocity.abs() / self.physics.gravity;
        self.player.run_speed * airtime
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.terrain;
        let p = &self.player;
        let ph = &self.physics;

        let distances = [
            ("min_width", t.min_width),
            ("max_width", t.max_width),
            ("min_gap", t.min_gap),
            ("max_gap", t.max_gap),
            ("spawn_distance", t.spawn_distance),
            ("despawn_distance", t.despawn_distance),
            ("initial_horizon", t.initial_horizon),
            ("roof_y", t.roof_y),
            ("platform_height", t.platform_height),
            ("rail_height", t.rail_height),
        ];
        if let Some((name, value)) = distances.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "terrain.{name} must be finite (got {value})"
            )));
        }

        if !(t.min_width > 0.0 && t.min_width <= t.max_width) {
            return Err(ConfigError::Invalid(format!(
                "terrain widths must satisfy 0 < min_width <= max_width (got {}..{})",
                t.min_width, t.max_width
            )));
        }
        if !(t.min_gap >= 0.0 && t.min_gap <= t.max_gap) {
            return Err(ConfigError::Invalid(format!(
                "terrain gaps must satisfy 0 <= min_gap <= max_gap (got {}..{})",
                t.min_gap, t.max_gap
            )));
        }
        if !(t.spawn_distance > 0.0) {
            return Err(ConfigError::Invalid(
                "terrain.spawn_distance must be > 0".to_string(),
            ));
        }
        if !(t.despawn_distance < 0.0) {
            return Err(ConfigError::Invalid(
                "terrain.despawn_distance must be < 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&t.rail_chance) {
            return Err(ConfigError::Invalid(
                "terrain.rail_chance must be within [0, 1]".to_string(),
            ));
        }
        if let WidthDistribution::Skewed { power } = t.width_distribution
            && !(power > 0.0 && power.is_finite())
        {
            return Err(ConfigError::Invalid(format!(
                "skewed width power must be a positive number (got {power})"
            )));
        }
        if !(ph.gravity > 0.0) || !(ph.timestep > 0.0) || ph.substeps == 0 {
            return Err(ConfigError::Invalid(
                "physics gravity, timestep, and substeps must be > 0".to_string(),
            ));
        }
        if !(p.jump_velocity < 0.0) || !(p.run_speed > 0.0) || !(p.grind_speed > 0.0) {
            return Err(ConfigError::Invalid(
                "player speeds must be > 0 and jump_velocity must point up (< 0)".to_string(),
            ));
        }

        let reach = self.max_jump_distance();
        if t.max_gap > reach {
            return Err(ConfigError::Invalid(format!(
                "terrain.max_gap {} exceeds the jump distance {reach:.1} at gravity {} \
                 and jump velocity {}",
                t.max_gap, ph.gravity, p.jump_velocity
            )));
        }

        Ok(())
    }
}
