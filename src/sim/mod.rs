//! Simulation module
//!
//! All gameplay logic lives here:
//! - Helicopter motion, wall reflection and animation
//! - Rotated-rectangle overlap tests
//! - Timed spawning and the velocity-swap collision pass
//!
//! Rendering and asset loading go through the `platform` and `renderer` traits.

pub mod animation;
pub mod collision;
pub mod helicopter;
pub mod state;
pub mod tick;

pub use animation::Animation;
pub use collision::{CollisionRect, convex_polygons_overlap};
pub use helicopter::{Helicopter, random_velocity};
pub use state::{PairKey, Simulation, pair_key};
pub use tick::{FrameReport, collide, frame, render, step};
