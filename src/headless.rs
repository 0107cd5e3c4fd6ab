//! Windowless runner.
//!
//! Steps a [`Simulation`] at a fixed `dt` without creating a window or
//! touching the GPU. Stops early once a winner is decided.

use crate::simulation::Simulation;
use glam::Vec3;

/// Outcome of a headless run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessSummary {
    /// Steps actually taken.
    pub frames: u64,
    pub remaining: usize,
    pub winner: Option<Vec3>,
}

/// Step `sim` up to `max_frames` times at `dt`.
pub fn run(sim: &mut Simulation, max_frames: u64, dt: f32) -> HeadlessSummary {
    log::info!(
        "Headless run: up to {} frames at dt {}, {} particles",
        max_frames,
        dt,
        sim.store().len()
    );

    let mut frames = 0;
    while frames < max_frames && !sim.has_winner() {
        sim.step(dt);
        frames += 1;
    }

    let summary = HeadlessSummary {
        frames,
        remaining: sim.store().len(),
        winner: sim.winner(),
    };

    match summary.winner {
        Some(_) => log::info!("Finished after {} frames", summary.frames),
        None => log::info!(
            "Stopped after {} frames with {} particles left",
            summary.frames,
            summary.remaining
        ),
    }

    summary
}
