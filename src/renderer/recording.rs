//! Surface that records draw calls instead of rasterizing them

use super::{SpriteDraw, Surface};

/// Keeps the draw calls issued since the last clear
#[derive(Debug, Default)]
pub struct RecordingSurface {
    /// Number of clears (one per rendered frame)
    pub clears: u64,
    pub clear_color: Option<[f32; 4]>,
    /// Sprites drawn since the last clear, in paint order
    pub sprites: Vec<SpriteDraw>,
    /// Sprites drawn over the surface's lifetime
    pub total_sprites: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: [f32; 4]) {
        self.clears += 1;
        self.clear_color = Some(color);
        self.sprites.clear();
    }

    fn draw_sprite(&mut self, sprite: &SpriteDraw) {
        self.total_sprites += 1;
        self.sprites.push(*sprite);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ImageHandle;
    use glam::Vec2;

    fn sprite() -> SpriteDraw {
        SpriteDraw {
            image: ImageHandle { id: 1, width: 4, height: 2 },
            position: Vec2::ZERO,
            origin: Vec2::new(2.0, 1.0),
            size: Vec2::new(4.0, 2.0),
            scale: Vec2::ONE,
            rotation_deg: 0.0,
            source: [0, 0, 4, 2],
            flip_x: false,
            flip_y: false,
        }
    }

    #[test]
    fn test_clear_starts_a_new_frame() {
        let mut surface = RecordingSurface::new();
        surface.draw_sprite(&sprite());
        surface.draw_sprite(&sprite());
        assert_eq!(surface.sprites.len(), 2);

        surface.clear([0.0, 0.0, 0.0, 1.0]);
        assert!(surface.sprites.is_empty());
        assert_eq!(surface.clears, 1);
        assert_eq!(surface.total_sprites, 2);

        surface.draw_sprite(&sprite());
        assert_eq!(surface.sprites.len(), 1);
        assert_eq!(surface.total_sprites, 3);
    }
}
