//! Rendering abstraction
//!
//! The core issues exactly two kinds of commands: clear the surface and draw a sprite.

pub mod recording;

pub use recording::RecordingSurface;

use glam::Vec2;

use crate::platform::ImageHandle;

/// One sprite draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw {
    pub image: ImageHandle,
    /// Bottom-left corner in arena units
    pub position: Vec2,
    /// Pivot for scale and rotation, relative to `position`
    pub origin: Vec2,
    pub size: Vec2,
    pub scale: Vec2,
    /// Counter-clockwise rotation around `origin`
    pub rotation_deg: f32,
    /// Source rectangle in image pixels: x, y, width, height
    pub source: [u32; 4],
    pub flip_x: bool,
    pub flip_y: bool,
}

/// Drawing target
pub trait Surface {
    fn clear(&mut self, color: [f32; 4]);
    fn draw_sprite(&mut self, sprite: &SpriteDraw);
}

/// Colors
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}
