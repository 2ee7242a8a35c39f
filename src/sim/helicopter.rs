//! The helicopter entity
//!
//! Moves at constant speed, reflects off the arena walls and carries a
//! collision rectangle that follows its position and heading.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::animation::Animation;
use super::collision::CollisionRect;
use crate::consts::SPRITE_HEADING_OFFSET_DEG;
use crate::heading_degrees;
use crate::platform::{Assets, ImageHandle};
use crate::renderer::{SpriteDraw, Surface};
use crate::settings::SpawnDirection;

/// Random velocity of magnitude `speed`
pub fn random_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f32, direction: SpawnDirection) -> Vec2 {
    match direction {
        SpawnDirection::AxisBiased => loop {
            let sample = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
            if let Some(dir) = sample.try_normalize() {
                return dir * speed;
            }
        },
        SpawnDirection::UniformAngle => Vec2::from_angle(rng.random_range(0.0..TAU)) * speed,
    }
}

#[derive(Debug, Clone)]
pub struct Helicopter {
    pub id: u32,
    /// Bottom-left corner of the sprite
    position: Vec2,
    velocity: Vec2,
    /// Seconds into the rotor animation, wrapped to one cycle
    animation_clock: f32,
    animation: Animation,
    shape: CollisionRect,
}

impl Helicopter {
    /// Helicopter with its sprite centred on `center`
    pub fn new(id: u32, animation: Animation, center: Vec2, velocity: Vec2) -> Self {
        let size = animation.key_frame(0.0).map(|f| f.size()).unwrap_or(Vec2::ZERO);
        let mut heli = Self {
            id,
            position: center - size / 2.0,
            velocity,
            animation_clock: 0.0,
            animation,
            shape: CollisionRect::new(size),
        };
        heli.sync_shape();
        heli
    }

    /// Helicopter centred on `center`, flying in a random direction at `speed`
    pub fn spawn<R: Rng + ?Sized>(
        id: u32,
        animation: Animation,
        center: Vec2,
        speed: f32,
        direction: SpawnDirection,
        rng: &mut R,
    ) -> Self {
        let velocity = random_velocity(rng, speed, direction);
        Self::new(id, animation, center, velocity)
    }

    /// Bottom-left corner of the sprite
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Move the sprite; the collision rectangle moves with it
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.sync_shape();
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Replace the velocity; the collision rectangle turns to the new heading
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.sync_shape();
    }

    pub fn animation_clock(&self) -> f32 {
        self.animation_clock
    }

    pub fn collision_shape(&self) -> &CollisionRect {
        &self.shape
    }

    /// Frame currently shown, `None` after `dispose`
    pub fn current_frame(&self) -> Option<ImageHandle> {
        self.animation.key_frame(self.animation_clock)
    }

    /// Size of the current frame (last known size once disposed)
    pub fn size(&self) -> Vec2 {
        self.current_frame().map(|f| f.size()).unwrap_or(self.shape.size)
    }

    /// Sprite rotation: heading offset by half a turn
    pub fn rotation_deg(&self) -> f32 {
        heading_degrees(self.velocity) - SPRITE_HEADING_OFFSET_DEG
    }

    /// Advance animation and motion by `dt`, bouncing off the arena walls
    pub fn update(&mut self, dt: f32, arena: Vec2) {
        let cycle = self.animation.duration();
        if cycle > 0.0 {
            self.animation_clock = (self.animation_clock + dt) % cycle;
        }

        self.position += self.velocity * dt;

        let size = self.size();
        if self.position.x < 0.0 || self.position.x + size.x > arena.x {
            self.position.x = self.position.x.clamp(0.0, (arena.x - size.x).max(0.0));
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y + size.y > arena.y {
            self.position.y = self.position.y.clamp(0.0, (arena.y - size.y).max(0.0));
            self.velocity.y = -self.velocity.y;
        }

        self.sync_shape();
    }

    /// Recompute the collision rectangle from frame size, position and heading
    fn sync_shape(&mut self) {
        let size = self.size();
        self.shape.resize(size);
        self.shape.set_transform(self.position, self.rotation_deg());
    }

    pub fn collides(&self, other: &Helicopter) -> bool {
        self.shape.overlaps(&other.shape)
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        let Some(frame) = self.current_frame() else {
            return;
        };
        let size = frame.size();
        surface.draw_sprite(&SpriteDraw {
            image: frame,
            position: self.position,
            origin: size / 2.0,
            size,
            scale: Vec2::ONE,
            rotation_deg: self.rotation_deg(),
            source: [0, 0, frame.width, frame.height],
            flip_x: false,
            flip_y: false,
        });
    }

    /// Release the animation frames. Safe to call more than once.
    pub fn dispose(&mut self, assets: &mut dyn Assets) {
        self.animation.release(assets);
    }

    pub fn is_disposed(&self) -> bool {
        self.animation.is_empty()
    }
}
