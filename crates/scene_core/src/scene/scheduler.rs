//! Frame pacing for [`OverlapScene`]

use super::{FrameReport, OverlapScene};
use crate::error::SceneError;
use crate::foundation::time::{Clock, Stopwatch};
use crate::render::RenderSink;
use crate::spawn::RandomSource;
use std::time::Duration;

/// Drives a scene until it stops or fails
pub trait FrameScheduler {
    /// Run the scene, calling `on_frame` after every tick
    ///
    /// Returns the number of completed frames.
    fn run<C, R, F>(
        &mut self,
        scene: &mut OverlapScene<C, R>,
        renderer: &mut dyn RenderSink,
        on_frame: F,
    ) -> Result<u64, SceneError>
    where
        C: Clock,
        R: RandomSource,
        F: FnMut(&mut OverlapScene<C, R>, &FrameReport);
}

/// Ticks at a fixed cadence, sleeping off the remainder of each frame
#[derive(Debug, Clone)]
pub struct FixedRateScheduler {
    frame_duration: Duration,
    frame_limit: Option<u64>,
}

impl FixedRateScheduler {
    /// Scheduler targeting `frame_rate` frames per second
    ///
    /// Rates that are not positive, or whose period cannot be represented,
    /// disable pacing.
    pub fn new(frame_rate: f32) -> Self {
        let frame_duration = if frame_rate.is_finite() && frame_rate > 0.0 {
            Duration::try_from_secs_f32(frame_rate.recip()).unwrap_or_else(|e| {
                log::warn!("Frame rate {frame_rate} has no usable period ({e}), running unpaced");
                Duration::ZERO
            })
        } else {
            Duration::ZERO
        };
        Self {
            frame_duration,
            frame_limit: None,
        }
    }

    /// Stop after `limit` frames when set
    #[must_use]
    pub fn with_frame_limit(mut self, limit: Option<u64>) -> Self {
        self.frame_limit = limit;
        self
    }

    /// Target duration of one frame
    pub fn frame_duration(&self) -> Duration {
        self.frame_duration
    }

    /// Frame limit, if any
    pub fn frame_limit(&self) -> Option<u64> {
        self.frame_limit
    }
}

impl FrameScheduler for FixedRateScheduler {
    fn run<C, R, F>(
        &mut self,
        scene: &mut OverlapScene<C, R>,
        renderer: &mut dyn RenderSink,
        mut on_frame: F,
    ) -> Result<u64, SceneError>
    where
        C: Clock,
        R: RandomSource,
        F: FnMut(&mut OverlapScene<C, R>, &FrameReport),
    {
        log::info!(
            "Starting frame loop at {:.1} fps{}",
            self.frame_duration.as_secs_f32().recip(),
            self.frame_limit.map_or_else(String::new, |n| format!(", {n} frames"))
        );

        let mut frames = 0;
        while self.frame_limit.map_or(true, |limit| frames < limit) {
            let frame_start = Stopwatch::start_new();

            let report = scene.tick(renderer)?;
            on_frame(scene, &report);
            frames += 1;

            if let Some(remaining) = self.frame_duration.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        log::info!("Frame loop finished after {frames} frames");
        Ok(frames)
    }
}
