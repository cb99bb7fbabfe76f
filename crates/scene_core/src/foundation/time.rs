//! Time management utilities
//!
//! The frame loop reads elapsed time through the [`Clock`] trait so tests can
//! drive it with a [`ManualClock`] while applications use a [`SystemClock`].

use crate::error::SceneError;
use std::time::{Duration, Instant};

/// Monotonic source of seconds elapsed since the loop started
pub trait Clock {
    /// Read the elapsed time in seconds
    fn elapsed_secs(&mut self) -> Result<f32, SceneError>;
}

/// Simple stopwatch for measuring elapsed time
#[derive(Debug, Clone)]
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time.take() {
            self.elapsed += start.elapsed();
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = self
            .start_time
            .map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + current_elapsed
    }

    /// Get the elapsed time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed().as_secs_f32()
    }

    /// Check if the stopwatch is currently running
    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }
}

/// Wall clock backed by a running [`Stopwatch`]
#[derive(Debug, Clone)]
pub struct SystemClock {
    stopwatch: Stopwatch,
}

impl SystemClock {
    /// Create a clock that starts counting immediately
    pub fn start_new() -> Self {
        Self {
            stopwatch: Stopwatch::start_new(),
        }
    }

    /// Halt the clock; further reads fail until it is resumed
    pub fn stop(&mut self) {
        self.stopwatch.stop();
    }

    /// Resume a stopped clock, keeping the time accumulated so far
    pub fn resume(&mut self) {
        self.stopwatch.start();
    }
}

impl Clock for SystemClock {
    fn elapsed_secs(&mut self) -> Result<f32, SceneError> {
        if !self.stopwatch.is_running() {
            return Err(SceneError::ClockUnavailable("system clock is stopped".to_string()));
        }
        Ok(self.stopwatch.elapsed_secs())
    }
}

/// Clock whose time is set explicitly, for tests and replays
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: f32,
    unavailable: bool,
}

impl ManualClock {
    /// Create a clock reading `start` seconds
    pub fn new(start: f32) -> Self {
        Self {
            now: start,
            unavailable: false,
        }
    }

    /// Set the current reading
    pub fn set(&mut self, seconds: f32) {
        self.now = seconds;
    }

    /// Advance the current reading
    pub fn advance(&mut self, seconds: f32) {
        self.now += seconds;
    }

    /// Make subsequent reads fail
    pub fn disconnect(&mut self) {
        self.unavailable = true;
    }
}

impl Clock for ManualClock {
    fn elapsed_secs(&mut self) -> Result<f32, SceneError> {
        if self.unavailable {
            return Err(SceneError::ClockUnavailable("manual clock disconnected".to_string()));
        }
        Ok(self.now)
    }
}

/// Frame statistics derived from successive clock readings
#[derive(Debug, Clone, Default)]
pub struct FrameTimer {
    last_elapsed: Option<f32>,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl FrameTimer {
    /// Create a new timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the elapsed reading of a finished frame
    pub fn record(&mut self, elapsed: f32) {
        self.delta_time = self.last_elapsed.map_or(0.0, |last| (elapsed - last).max(0.0));
        self.total_time = elapsed;
        self.last_elapsed = Some(elapsed);
        self.frame_count += 1;
    }

    /// Get the time between the last two frames in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since the first recorded frame
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }

    /// Get the current FPS (based on last frame time)
    pub fn current_fps(&self) -> f32 {
        if self.delta_time > 0.0 {
            1.0 / self.delta_time
        } else {
            0.0
        }
    }
}
