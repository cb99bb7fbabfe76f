//! Application wiring: config, logging, clock, randomness and frame loop

use scene_core::config::ConfigError;
use scene_core::foundation::logging;
use scene_core::prelude::*;
use thiserror::Error;

/// Seconds between periodic statistics lines
const STATS_INTERVAL: f32 = 5.0;

/// Application errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Config file could not be read
    #[error("failed to load config {path}: {source}")]
    Config {
        /// Path given on the command line
        path: String,
        /// Underlying failure
        #[source]
        source: ConfigError,
    },

    /// Scene setup or a frame failed
    #[error(transparent)]
    Scene(#[from] SceneError),
}

/// Runs the overlap scene with a system clock and a log renderer
pub struct OrbitApp {
    config: SceneConfig,
    scene: OverlapScene<SystemClock, RngSource>,
    renderer: LogRenderer,
}

impl OrbitApp {
    /// Load the configuration and build the scene
    pub fn new(config_path: Option<&str>) -> Result<Self, AppError> {
        let config = match config_path {
            Some(path) => SceneConfig::load_from_file(path).map_err(|source| AppError::Config {
                path: path.to_string(),
                source,
            })?,
            None => SceneConfig::default(),
        };

        logging::init(&config.logging);
        match config_path {
            Some(path) => log::info!("Loaded scene config from {path}"),
            None => log::info!("Using default scene config"),
        }

        let random = match config.seed {
            Some(seed) => {
                log::info!("Spawning with fixed seed {seed}");
                RngSource::seeded(seed)
            }
            None => RngSource::from_entropy(),
        };

        let scene = OverlapScene::new(&config, SystemClock::start_new(), random)?;

        Ok(Self {
            config,
            scene,
            renderer: LogRenderer::new(),
        })
    }

    /// Drive the frame loop until the frame limit is reached or a frame fails
    pub fn run(&mut self) -> Result<(), AppError> {
        let mut scheduler = FixedRateScheduler::new(self.config.frame_rate)
            .with_frame_limit(self.config.frame_limit);
        let mut next_stats = STATS_INTERVAL;

        let result = scheduler.run(&mut self.scene, &mut self.renderer, |scene, report| {
            for timed in scene.drain_events() {
                log::debug!("frame {} t={:.3}s {:?}", timed.frame, timed.elapsed, timed.event);
            }

            if report.elapsed >= next_stats {
                next_stats = report.elapsed + STATS_INTERVAL;
                let timer = scene.timer();
                log::info!(
                    "{} frames, {:.1} fps average, {} spawned entities, {:?}",
                    timer.frame_count(),
                    timer.average_fps(),
                    scene.store().spawned_len(),
                    scene.overlap_state()
                );
            }
        });

        match result {
            Ok(frames) => {
                log::info!(
                    "Finished after {frames} frames with {} spawned entities",
                    self.scene.store().spawned_len()
                );
                Ok(())
            }
            Err(e) => {
                log::error!("Frame loop stopped: {e}");
                Err(e.into())
            }
        }
    }
}
