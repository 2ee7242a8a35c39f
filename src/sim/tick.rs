//! Per-frame simulation step
//!
//! Order within a frame: spawn timer, spawns, motion, collision pass, render.

use std::collections::HashSet;

use super::state::{Simulation, pair_key};
use crate::error::AssetError;
use crate::platform::Assets;
use crate::renderer::{Surface, colors};
use crate::settings::CollisionPolicy;

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub spawned: u32,
    pub swaps: u32,
    pub live: usize,
}

/// Advance the simulation by `dt` seconds: spawn, move, collide
pub fn step(
    sim: &mut Simulation,
    dt: f32,
    assets: &mut dyn Assets,
) -> Result<FrameReport, AssetError> {
    let dt = if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        log::warn!("Ignoring invalid frame delta {dt}");
        0.0
    };

    sim.frame_count += 1;
    sim.elapsed += dt;

    // The timer keeps its remainder, so long frames spawn several helicopters
    let mut spawned = 0;
    sim.spawn_timer += dt;
    while sim.spawn_timer >= sim.spawn_interval {
        sim.spawn_helicopter(assets)?;
        sim.spawn_timer -= sim.spawn_interval;
        spawned += 1;
    }

    let arena = sim.arena;
    for heli in &mut sim.helicopters {
        heli.update(dt, arena);
    }

    let swaps = collide(sim);

    Ok(FrameReport {
        spawned,
        swaps,
        live: sim.live_count(),
    })
}

/// Swap velocities of overlapping pairs. Returns the number of swaps.
///
/// Each unordered pair is tested once per call.
pub fn collide(sim: &mut Simulation) -> u32 {
    let n = sim.helicopters.len();
    let mut swaps = 0;
    let mut overlapping_now = HashSet::new();

    for i in 0..n {
        for j in (i + 1)..n {
            if !sim.helicopters[i].collides(&sim.helicopters[j]) {
                continue;
            }

            let key = pair_key(sim.helicopters[i].id, sim.helicopters[j].id);
            let swap = match sim.collision_policy {
                CollisionPolicy::EveryFrame => true,
                CollisionPolicy::OnEnter => {
                    overlapping_now.insert(key);
                    !sim.overlapping.contains(&key)
                }
            };
            if !swap {
                continue;
            }

            let (head, tail) = sim.helicopters.split_at_mut(j);
            let (a, b) = (&mut head[i], &mut tail[0]);
            let va = a.velocity();
            a.set_velocity(b.velocity());
            b.set_velocity(va);
            swaps += 1;
            log::trace!("Helicopters {} and {} swapped velocities", key.0, key.1);
        }
    }

    if sim.collision_policy == CollisionPolicy::OnEnter {
        sim.overlapping = overlapping_now;
    }
    swaps
}

/// Clear the surface and draw every helicopter in spawn order
pub fn render(sim: &Simulation, surface: &mut dyn Surface) {
    surface.clear(colors::BACKGROUND);
    for heli in &sim.helicopters {
        heli.draw(surface);
    }
}

/// One full frame: step then render
pub fn frame(
    sim: &mut Simulation,
    dt: f32,
    assets: &mut dyn Assets,
    surface: &mut dyn Surface,
) -> Result<FrameReport, AssetError> {
    let report = step(sim, dt, assets)?;
    render(sim, surface);
    Ok(report)
}
