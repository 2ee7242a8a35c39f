//! Simulation state
//!
//! Owns the live helicopters, the spawn timer and the seeded RNG.

use std::collections::HashSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::animation::Animation;
use super::helicopter::Helicopter;
use crate::error::AssetError;
use crate::platform::Assets;
use crate::settings::{CollisionPolicy, Settings, SpawnDirection};

/// Unordered pair of helicopter ids, smaller id first
pub type PairKey = (u32, u32);

#[inline]
pub fn pair_key(a: u32, b: u32) -> PairKey {
    if a <= b { (a, b) } else { (b, a) }
}

/// Complete simulation state
#[derive(Debug)]
pub struct Simulation {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub arena: Vec2,
    pub spawn_interval: f32,
    /// Accumulated seconds toward the next spawn
    pub spawn_timer: f32,
    /// Centre of freshly spawned sprites
    pub spawn_point: Vec2,
    pub spawn_direction: SpawnDirection,
    pub speed: f32,
    pub frame_duration: f32,
    /// Image names loaded for every new helicopter
    pub frame_names: Vec<String>,
    pub collision_policy: CollisionPolicy,
    /// Live helicopters in spawn order
    pub helicopters: Vec<Helicopter>,
    /// Pairs that overlapped on the previous frame (`OnEnter` policy only)
    pub(super) overlapping: HashSet<PairKey>,
    /// Simulated seconds
    pub elapsed: f32,
    pub frame_count: u64,
    next_id: u32,
}

impl Simulation {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            arena: settings.arena(),
            spawn_interval: settings.spawn_interval,
            spawn_timer: settings.effective_initial_timer(),
            spawn_point: settings.effective_spawn_point(),
            spawn_direction: settings.spawn_direction,
            speed: settings.speed,
            frame_duration: settings.frame_duration,
            frame_names: settings.frames.clone(),
            collision_policy: settings.collision_policy,
            helicopters: Vec::new(),
            overlapping: HashSet::new(),
            elapsed: 0.0,
            frame_count: 0,
            next_id: 1,
        }
    }

    /// Seed from settings, or a random one
    pub fn from_settings(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::new(settings, seed)
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Load a fresh set of frames and add a helicopter at the spawn point
    pub fn spawn_helicopter(&mut self, assets: &mut dyn Assets) -> Result<&Helicopter, AssetError> {
        let animation = Animation::load(assets, &self.frame_names, self.frame_duration)?;
        let id = self.next_entity_id();
        let heli = Helicopter::spawn(
            id,
            animation,
            self.spawn_point,
            self.speed,
            self.spawn_direction,
            &mut self.rng,
        );
        log::debug!(
            "Spawned helicopter {} at {:?} heading {:.1} deg",
            id,
            heli.position(),
            crate::heading_degrees(heli.velocity())
        );
        self.helicopters.push(heli);
        Ok(&self.helicopters[self.helicopters.len() - 1])
    }

    pub fn live_count(&self) -> usize {
        self.helicopters.len()
    }

    /// Release every helicopter's frames and empty the collection
    pub fn dispose(&mut self, assets: &mut dyn Assets) {
        let count = self.helicopters.len();
        for mut heli in self.helicopters.drain(..) {
            heli.dispose(assets);
        }
        self.overlapping.clear();
        if count > 0 {
            log::info!("Disposed {count} helicopters");
        }
    }
}
