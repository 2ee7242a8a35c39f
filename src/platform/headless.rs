//! Headless platform backend
//!
//! In-memory image registry plus a fixed-step driver. Lets the simulation run
//! without a window, and lets tests account for every loaded handle.

use std::collections::HashMap;

use super::{App, Assets, ImageHandle};
use crate::error::{AssetError, Result};
use crate::renderer::Surface;

/// Image store backed by a name -> size table
#[derive(Debug)]
pub struct HeadlessAssets {
    images: HashMap<String, (u32, u32)>,
    /// Handles loaded and not yet released
    live: HashMap<u32, String>,
    next_id: u32,
    /// Total successful loads
    pub loads: u64,
    /// Total releases of live handles
    pub releases: u64,
    /// Releases of handles that were not live (double release or foreign handle)
    pub stale_releases: u64,
}

impl Default for HeadlessAssets {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessAssets {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
            live: HashMap::new(),
            next_id: 1,
            loads: 0,
            releases: 0,
            stale_releases: 0,
        }
    }

    /// Store with every name registered at the same pixel size
    pub fn with_images<S: AsRef<str>>(names: &[S], width: u32, height: u32) -> Self {
        let mut assets = Self::new();
        for name in names {
            assets.register(name.as_ref(), width, height);
        }
        assets
    }

    /// Make `name` loadable. A zero-sized image loads as corrupt.
    pub fn register(&mut self, name: &str, width: u32, height: u32) {
        self.images.insert(name.to_string(), (width, height));
    }

    /// Number of handles currently loaded
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, handle: ImageHandle) -> bool {
        self.live.contains_key(&handle.id)
    }
}

impl Assets for HeadlessAssets {
    fn load_image(&mut self, name: &str) -> std::result::Result<ImageHandle, AssetError> {
        let &(width, height) = self.images.get(name).ok_or_else(|| AssetError::NotFound {
            name: name.to_string(),
        })?;
        if width == 0 || height == 0 {
            return Err(AssetError::Corrupt {
                name: name.to_string(),
                reason: format!("zero-sized image {width}x{height}"),
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.live.insert(id, name.to_string());
        self.loads += 1;
        log::trace!("Loaded {name} as image {id}");
        Ok(ImageHandle { id, width, height })
    }

    fn release_image(&mut self, handle: ImageHandle) {
        match self.live.remove(&handle.id) {
            Some(name) => {
                self.releases += 1;
                log::trace!("Released image {} ({name})", handle.id);
            }
            None => {
                self.stale_releases += 1;
                log::warn!("Release of image {} that is not loaded", handle.id);
            }
        }
    }
}

/// Drives an `App` for a fixed number of frames at a fixed timestep
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunner {
    pub frames: u32,
    pub dt: f32,
}

impl HeadlessRunner {
    pub fn new(frames: u32, dt: f32) -> Self {
        Self { frames, dt }
    }

    /// Runner covering `seconds` of simulated time at `frame_rate` frames per second
    pub fn for_duration(seconds: f32, frame_rate: f32) -> Self {
        let frames = (seconds * frame_rate).round().max(0.0) as u32;
        Self::new(frames, 1.0 / frame_rate)
    }

    /// Create, run every frame, then dispose.
    /// The app is disposed even if a frame fails.
    pub fn run(
        &self,
        app: &mut dyn App,
        assets: &mut dyn Assets,
        surface: &mut dyn Surface,
    ) -> Result<()> {
        app.on_create(assets)?;

        let mut outcome = Ok(());
        for _ in 0..self.frames {
            if let Err(e) = app.on_frame(self.dt, assets, surface) {
                outcome = Err(e);
                break;
            }
        }

        app.on_dispose(assets);
        outcome
    }
}
