//! Composition root
//!
//! Wires the simulation to the platform lifecycle and keeps run statistics.

use serde::Serialize;

use crate::error::Result;
use crate::platform::{App, Assets, HeadlessAssets, HeadlessRunner};
use crate::renderer::{RecordingSurface, Surface};
use crate::settings::Settings;
use crate::sim::{self, Animation, FrameReport, Simulation};

/// Totals over a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub seed: Option<u64>,
    pub frames: u64,
    pub elapsed: f32,
    pub spawned: u64,
    pub swaps: u64,
    pub live: usize,
    pub peak_live: usize,
}

impl RunStats {
    fn record(&mut self, report: &FrameReport, dt: f32) {
        self.frames += 1;
        self.elapsed += dt;
        self.spawned += u64::from(report.spawned);
        self.swaps += u64::from(report.swaps);
        self.live = report.live;
        self.peak_live = self.peak_live.max(report.live);
    }
}

pub struct CoptersGame {
    settings: Settings,
    sim: Option<Simulation>,
    pub stats: RunStats,
}

impl CoptersGame {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            sim: None,
            stats: RunStats::default(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The running simulation, between `on_create` and `on_dispose`
    pub fn simulation(&self) -> Option<&Simulation> {
        self.sim.as_ref()
    }
}

impl App for CoptersGame {
    fn on_create(&mut self, assets: &mut dyn Assets) -> Result<()> {
        self.settings.validate()?;

        // Fail at startup, not on the first spawn, if the frames are unusable
        let mut sample = Animation::load(assets, &self.settings.frames, self.settings.frame_duration)?;
        if let Some(frame) = sample.key_frame(0.0) {
            log::info!(
                "Helicopter sprite is {}x{} with {} frames",
                frame.width,
                frame.height,
                sample.frames().len()
            );
        }
        sample.release(assets);

        let sim = Simulation::from_settings(&self.settings);
        log::info!(
            "Arena {}x{}, spawning every {}s, collision policy {}, seed {}",
            sim.arena.x,
            sim.arena.y,
            sim.spawn_interval,
            sim.collision_policy.as_str(),
            sim.seed
        );
        self.stats = RunStats {
            seed: Some(sim.seed),
            ..Default::default()
        };
        self.sim = Some(sim);
        Ok(())
    }

    fn on_frame(
        &mut self,
        dt: f32,
        assets: &mut dyn Assets,
        surface: &mut dyn Surface,
    ) -> Result<()> {
        let Some(simulation) = self.sim.as_mut() else {
            log::warn!("Frame before create, skipping");
            return Ok(());
        };
        let report = sim::frame(simulation, dt, assets, surface)?;
        self.stats.record(&report, dt);
        if report.spawned > 0 {
            log::debug!("{} helicopters live", report.live);
        }
        Ok(())
    }

    fn on_dispose(&mut self, assets: &mut dyn Assets) {
        if let Some(mut sim) = self.sim.take() {
            sim.dispose(assets);
            log::info!(
                "Run finished after {} frames: {} spawned, {} swaps",
                self.stats.frames,
                self.stats.spawned,
                self.stats.swaps
            );
        }
    }
}

/// Run the game on the headless backend for `settings.run_seconds`
pub fn run_headless(settings: Settings) -> Result<RunStats> {
    let (width, height) = settings.frame_size;
    let mut assets = HeadlessAssets::with_images(&settings.frames, width, height);
    let mut surface = RecordingSurface::new();
    let runner = HeadlessRunner::for_duration(settings.run_seconds, settings.frame_rate);
    log::info!(
        "Running {} frames at {} fps",
        runner.frames,
        settings.frame_rate
    );

    let mut game = CoptersGame::new(settings);
    runner.run(&mut game, &mut assets, &mut surface)?;

    if assets.live_count() > 0 {
        log::warn!("{} images still loaded after teardown", assets.live_count());
    }
    Ok(game.stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AssetError, ConfigError, Error};

    fn assets() -> HeadlessAssets {
        HeadlessAssets::with_images(&Settings::default().frames, 128, 48)
    }

    #[test]
    fn test_headless_run_spawns_on_schedule() {
        let settings = Settings {
            seed: Some(1234),
            ..Default::default()
        };
        let mut game = CoptersGame::new(settings);
        let mut assets = assets();
        let mut surface = RecordingSurface::new();

        // 20 seconds at 4 frames per second: pre-loaded spawn plus one every 5s
        HeadlessRunner::new(80, 0.25)
            .run(&mut game, &mut assets, &mut surface)
            .unwrap();

        assert_eq!(game.stats.seed, Some(1234));
        assert_eq!(game.stats.frames, 80);
        assert_eq!(game.stats.spawned, 5);
        assert_eq!(game.stats.peak_live, 5);
        assert_eq!(surface.clears, 80);
        assert_eq!(surface.sprites.len(), 5);
        assert!(game.simulation().is_none(), "disposed at teardown");
        assert_eq!(assets.live_count(), 0);
        assert_eq!(assets.stale_releases, 0);
    }

    #[test]
    fn test_missing_frames_fail_at_create() {
        let mut game = CoptersGame::new(Settings::default());
        let mut assets = HeadlessAssets::with_images(&["heli1.png", "heli2.png"], 128, 48);
        let err = game.on_create(&mut assets).unwrap_err();
        assert!(matches!(
            err,
            Error::Asset(AssetError::NotFound { ref name }) if name == "heli3.png"
        ));
        assert!(game.simulation().is_none());
        assert_eq!(assets.live_count(), 0);
    }

    #[test]
    fn test_invalid_settings_fail_at_create() {
        let settings = Settings {
            spawn_interval: 0.0,
            ..Default::default()
        };
        let mut game = CoptersGame::new(settings);
        let err = game.on_create(&mut assets()).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_frame_before_create_is_skipped() {
        let mut game = CoptersGame::new(Settings::default());
        let mut surface = RecordingSurface::new();
        game.on_frame(0.1, &mut assets(), &mut surface).unwrap();
        assert_eq!(surface.clears, 0);
        assert_eq!(game.stats.frames, 0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let settings = Settings {
                seed: Some(99),
                spawn_interval: 0.5,
                ..Default::default()
            };
            let mut game = CoptersGame::new(settings);
            let mut assets = assets();
            let mut surface = RecordingSurface::new();
            HeadlessRunner::new(300, 1.0 / 60.0)
                .run(&mut game, &mut assets, &mut surface)
                .unwrap();
            (game.stats.swaps, surface.sprites)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_run_headless_covers_run_seconds() {
        let settings = Settings {
            seed: Some(5),
            run_seconds: 20.0,
            frame_rate: 4.0,
            ..Default::default()
        };
        let stats = run_headless(settings).unwrap();
        assert_eq!(stats.seed, Some(5));
        assert_eq!(stats.frames, 80);
        assert_eq!(stats.spawned, 5);
        assert!((stats.elapsed - 20.0).abs() < 1e-3);
    }

    #[test]
    fn test_run_headless_reports_corrupt_frames() {
        let settings = Settings {
            frame_size: (0, 48),
            ..Default::default()
        };
        let err = run_headless(settings).unwrap_err();
        assert!(matches!(err, Error::Asset(AssetError::Corrupt { .. })));
    }
}
