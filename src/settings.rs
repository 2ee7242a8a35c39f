//! Runtime settings
//!
//! Loaded once at startup from a JSON file; every field falls back to its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// How a fresh helicopter picks its heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpawnDirection {
    /// Two independent uniform samples in [-0.5, 0.5), normalized.
    /// Favours the axes over the diagonals.
    #[default]
    AxisBiased,
    /// Uniformly distributed angle
    UniformAngle,
}

/// When overlapping helicopters exchange velocities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Swap on every frame a pair overlaps (pairs stuck together oscillate)
    #[default]
    EveryFrame,
    /// Swap once, on the first frame of each overlap episode
    OnEnter,
}

impl CollisionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionPolicy::EveryFrame => "every_frame",
            CollisionPolicy::OnEnter => "on_enter",
        }
    }
}

/// Simulation and headless-run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Spawning ===
    /// Seconds between spawns
    pub spawn_interval: f32,
    /// Initial spawn timer value; `None` pre-loads it with one full interval
    pub initial_spawn_timer: Option<f32>,
    /// Where new sprites are centred; `None` means the arena centre
    pub spawn_point: Option<(f32, f32)>,
    pub spawn_direction: SpawnDirection,
    /// RNG seed; `None` picks one from the OS
    pub seed: Option<u64>,

    // === Helicopter ===
    pub speed: f32,
    /// Seconds each animation frame is shown
    pub frame_duration: f32,
    /// Image names of the rotor animation
    pub frames: Vec<String>,

    // === Collisions ===
    pub collision_policy: CollisionPolicy,

    // === Headless run ===
    /// Simulated seconds the binary runs for
    pub run_seconds: f32,
    /// Fixed frame rate of the headless driver
    pub frame_rate: f32,
    /// Pixel size of every frame registered by the headless asset store
    pub frame_size: (u32, u32),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            spawn_interval: SPAWN_INTERVAL,
            initial_spawn_timer: None,
            spawn_point: None,
            spawn_direction: SpawnDirection::AxisBiased,
            seed: None,

            speed: SPEED,
            frame_duration: FRAME_DURATION,
            frames: HELICOPTER_FRAMES.iter().map(|s| s.to_string()).collect(),

            collision_policy: CollisionPolicy::EveryFrame,

            run_seconds: 60.0,
            frame_rate: 60.0,
            frame_size: (128, 48),
        }
    }
}

impl Settings {
    /// Arena extents as a vector
    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    /// Spawn timer value at startup
    pub fn effective_initial_timer(&self) -> f32 {
        self.initial_spawn_timer.unwrap_or(self.spawn_interval)
    }

    /// Centre of freshly spawned sprites
    pub fn effective_spawn_point(&self) -> Vec2 {
        match self.spawn_point {
            Some((x, y)) => Vec2::new(x, y),
            None => self.arena() / 2.0,
        }
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("spawn_interval", self.spawn_interval),
            ("speed", self.speed),
            ("frame_duration", self.frame_duration),
            ("frame_rate", self.frame_rate),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.run_seconds.is_finite() && self.run_seconds >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "run_seconds must not be negative, got {}",
                self.run_seconds
            )));
        }
        if let Some(timer) = self.initial_spawn_timer {
            if !(timer.is_finite() && timer >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "initial_spawn_timer must not be negative, got {timer}"
                )));
            }
        }
        if self.frames.is_empty() {
            return Err(ConfigError::Invalid("frames must not be empty".into()));
        }
        Ok(())
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            log::info!("Using default settings");
            Ok(Self::default())
        }
    }
}
