//! Colliding Copters - helicopters bouncing around a rectangular arena
//!
//! Core modules:
//! - `sim`: Simulation (spawning, motion, wall bounce, overlap and velocity swap)
//! - `renderer`: Drawing surface abstraction and sprite draw calls
//! - `platform`: Asset loading, lifecycle hooks and the headless backend
//! - `settings`: Runtime configuration loaded from JSON
//! - `game`: Composition root wiring the simulation to the platform

pub mod error;
pub mod game;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AssetError, ConfigError, Error, Result};
pub use game::CoptersGame;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Arena dimensions (16:9)
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = ARENA_WIDTH * 9.0 / 16.0;

    /// Seconds between helicopter spawns
    pub const SPAWN_INTERVAL: f32 = 5.0;

    /// Helicopter speed (arena units per second)
    pub const SPEED: f32 = 1000.0;

    /// Seconds each animation frame is displayed
    pub const FRAME_DURATION: f32 = 0.1;

    /// Rotor animation frames, in playback order
    pub const HELICOPTER_FRAMES: [&str; 4] = ["heli1.png", "heli2.png", "heli3.png", "heli4.png"];

    /// Sprites are drawn facing left, so headings are offset by half a turn
    pub const SPRITE_HEADING_OFFSET_DEG: f32 = 180.0;
}

/// Heading of a vector in degrees, in [0, 360)
#[inline]
pub fn heading_degrees(v: Vec2) -> f32 {
    let deg = v.y.atan2(v.x).to_degrees();
    if deg < 0.0 { deg + 360.0 } else { deg }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_degrees_quadrants() {
        assert_eq!(heading_degrees(Vec2::new(1.0, 0.0)), 0.0);
        assert!((heading_degrees(Vec2::new(0.0, 1.0)) - 90.0).abs() < 1e-4);
        assert!((heading_degrees(Vec2::new(-1.0, 0.0)) - 180.0).abs() < 1e-4);
        assert!((heading_degrees(Vec2::new(0.0, -1.0)) - 270.0).abs() < 1e-4);
    }
}
