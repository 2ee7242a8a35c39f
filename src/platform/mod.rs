//! Platform abstraction layer
//!
//! The simulation never touches a window or a GPU directly. It sees:
//! - `Assets` for loading and releasing sprite images
//! - `App` lifecycle hooks driven once per frame
//! - `renderer::Surface` for drawing
//!
//! `headless` provides an in-memory implementation used by the binary and tests.

pub mod headless;

pub use headless::{HeadlessAssets, HeadlessRunner};

use glam::Vec2;

use crate::error::{AssetError, Result};
use crate::renderer::Surface;

/// Opaque handle to a loaded image, carrying its pixel size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

impl ImageHandle {
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// Image loading backend
pub trait Assets {
    /// Load an image by name. Every call yields a fresh handle that must be released once.
    fn load_image(&mut self, name: &str) -> std::result::Result<ImageHandle, AssetError>;

    /// Release a handle obtained from `load_image`
    fn release_image(&mut self, handle: ImageHandle);
}

/// Application lifecycle, driven by the platform
pub trait App {
    /// Called once before the first frame
    fn on_create(&mut self, assets: &mut dyn Assets) -> Result<()>;

    /// Called once per frame with the seconds elapsed since the previous frame
    fn on_frame(&mut self, dt: f32, assets: &mut dyn Assets, surface: &mut dyn Surface)
    -> Result<()>;

    /// Called once at teardown
    fn on_dispose(&mut self, assets: &mut dyn Assets);
}
