//! Frame timing for the host loop.
//!
//! Produces the `dt` handed to [`Simulation::step`](crate::Simulation::step)
//! each frame, plus a frame counter and a periodically refreshed FPS figure.

use std::time::{Duration, Instant};

const FPS_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct Time {
    last_frame: Instant,
    frame_count: u64,
    fps: f32,
    /// Frame count and instant at the start of the current FPS window.
    fps_window_start: (u64, Instant),
    paused: bool,
    fixed_delta: Option<f32>,
}

impl Time {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame: now,
            frame_count: 0,
            fps: 0.0,
            fps_window_start: (0, now),
            paused: false,
            fixed_delta: None,
        }
    }

    /// Advance one frame and return its `dt` in seconds; zero while paused.
    ///
    /// Paused frames are not counted.
    pub fn update(&mut self) -> f32 {
        if self.paused {
            return 0.0;
        }

        let now = Instant::now();
        let raw_delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.frame_count += 1;

        let (window_frames, window_start) = self.fps_window_start;
        let window = now.duration_since(window_start);
        if window >= FPS_WINDOW {
            self.fps = (self.frame_count - window_frames) as f32 / window.as_secs_f32();
            self.fps_window_start = (self.frame_count, now);
        }

        self.fixed_delta.unwrap_or(raw_delta)
    }

    /// Frames advanced since start, excluding paused ones.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause or resume. Resuming restarts the frame clock so the first
    /// frame afterwards does not see the paused span as its `dt`.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if !self.paused {
            let now = Instant::now();
            self.last_frame = now;
            self.fps_window_start = (self.frame_count, now);
        }
    }

    /// Use a fixed `dt` instead of wall-clock frame time; `None` restores
    /// real timing.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.fixed_delta = delta;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_update_counts_frames() {
        let mut time = Time::new();
        thread::sleep(Duration::from_millis(5));
        assert!(time.update() > 0.0);
        time.update();
        assert_eq!(time.frame(), 2);
    }

    #[test]
    fn test_paused_frames_have_zero_dt() {
        let mut time = Time::new();
        time.update();
        time.toggle_pause();
        assert!(time.is_paused());

        thread::sleep(Duration::from_millis(5));
        assert_eq!(time.update(), 0.0);
        assert_eq!(time.frame(), 1);
    }

    #[test]
    fn test_resume_does_not_replay_paused_span() {
        let mut time = Time::new();
        time.toggle_pause();
        thread::sleep(Duration::from_millis(50));
        time.toggle_pause();
        assert!(!time.is_paused());
        assert!(time.update() < 0.05);
    }

    #[test]
    fn test_fixed_delta_overrides_clock() {
        let mut time = Time::new();
        time.set_fixed_delta(Some(1.0 / 60.0));
        thread::sleep(Duration::from_millis(20));
        assert!((time.update() - 1.0 / 60.0).abs() < 1e-6);

        time.set_fixed_delta(None);
        thread::sleep(Duration::from_millis(5));
        assert!(time.update() > 0.0);
    }
}
