//! Frame animation
//!
//! An ordered sequence of images, each shown for the same duration, played in a loop.

use crate::error::AssetError;
use crate::platform::{Assets, ImageHandle};

#[derive(Debug, Clone)]
pub struct Animation {
    frames: Vec<ImageHandle>,
    frame_duration: f32,
}

impl Animation {
    pub fn from_frames(frames: Vec<ImageHandle>, frame_duration: f32) -> Self {
        Self {
            frames,
            frame_duration,
        }
    }

    /// Load one fresh handle per name. On failure, handles already loaded are released.
    pub fn load<S: AsRef<str>>(
        assets: &mut dyn Assets,
        names: &[S],
        frame_duration: f32,
    ) -> Result<Self, AssetError> {
        if names.is_empty() {
            return Err(AssetError::Corrupt {
                name: "animation".into(),
                reason: "no frames".into(),
            });
        }

        let mut frames = Vec::with_capacity(names.len());
        for name in names {
            match assets.load_image(name.as_ref()) {
                Ok(handle) => frames.push(handle),
                Err(e) => {
                    for handle in frames {
                        assets.release_image(handle);
                    }
                    return Err(e);
                }
            }
        }
        Ok(Self::from_frames(frames, frame_duration))
    }

    /// Length of one full cycle
    pub fn duration(&self) -> f32 {
        self.frames.len() as f32 * self.frame_duration
    }

    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    pub fn frames(&self) -> &[ImageHandle] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame shown at `time`, looping. `None` once released.
    pub fn key_frame(&self, time: f32) -> Option<ImageHandle> {
        if self.frames.is_empty() {
            return None;
        }
        let index = if self.frame_duration > 0.0 {
            (time / self.frame_duration).max(0.0) as usize % self.frames.len()
        } else {
            0
        };
        Some(self.frames[index])
    }

    /// Release every frame. A second call finds nothing to release.
    pub fn release(&mut self, assets: &mut dyn Assets) {
        for handle in self.frames.drain(..) {
            assets.release_image(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HeadlessAssets;

    fn handle(id: u32) -> ImageHandle {
        ImageHandle {
            id,
            width: 10,
            height: 5,
        }
    }

    #[test]
    fn test_key_frame_loops() {
        let anim = Animation::from_frames(vec![handle(1), handle(2), handle(3), handle(4)], 0.1);
        assert!((anim.duration() - 0.4).abs() < 1e-6);
        assert_eq!(anim.key_frame(0.0).unwrap().id, 1);
        assert_eq!(anim.key_frame(0.15).unwrap().id, 2);
        assert_eq!(anim.key_frame(0.35).unwrap().id, 4);
        assert_eq!(anim.key_frame(0.45).unwrap().id, 1);
    }

    #[test]
    fn test_load_and_release() {
        let mut assets = HeadlessAssets::with_images(&["a.png", "b.png"], 10, 5);
        let mut anim = Animation::load(&mut assets, &["a.png", "b.png"], 0.1).unwrap();
        assert_eq!(anim.frames().len(), 2);
        assert_eq!(assets.live_count(), 2);

        anim.release(&mut assets);
        assert!(anim.is_empty());
        assert_eq!(anim.key_frame(0.0), None);
        assert_eq!(assets.live_count(), 0);

        anim.release(&mut assets);
        assert_eq!(assets.stale_releases, 0);
    }

    #[test]
    fn test_failed_load_releases_partial_frames() {
        let mut assets = HeadlessAssets::with_images(&["a.png"], 10, 5);
        let err = Animation::load(&mut assets, &["a.png", "missing.png"], 0.1).unwrap_err();
        assert_eq!(
            err,
            AssetError::NotFound {
                name: "missing.png".into()
            }
        );
        assert_eq!(assets.live_count(), 0);
        assert_eq!(assets.loads, 1);
        assert_eq!(assets.releases, 1);
    }

    #[test]
    fn test_load_without_frames_fails() {
        let mut assets = HeadlessAssets::new();
        let names: [&str; 0] = [];
        assert!(matches!(
            Animation::load(&mut assets, &names, 0.1),
            Err(AssetError::Corrupt { .. })
        ));
    }
}
