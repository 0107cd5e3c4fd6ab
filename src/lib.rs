//! # Particle Arena
//!
//! A last-particle-standing simulation. A batch of point particles bounces
//! around a walled arena; whenever two come within the collision threshold
//! a coin flip removes one of them. Once few particles remain the "sudden
//! death" ramp grows them every frame until a single winner is left, and
//! the background takes the winner's color.
//!
//! ## Quick Start
//!
//! ```ignore
//! use particle_arena::{SimConfig, Simulation};
//!
//! let mut sim = Simulation::new(SimConfig::default());
//! while !sim.has_winner() {
//!     sim.step(0.016);
//!     let vertices = sim.store().vertices(); // [x, y, z, r, g, b] per particle
//! }
//! ```
//!
//! ## Frame order
//!
//! [`Simulation::step`] runs collision resolution, wall reflection,
//! integration, the sudden-death ramp, vertex resync and the win check, in
//! that order. Collisions are settled by a [`CoinFlip`]; the default
//! [`WallClockCoin`] reseeds from the clock on every flip, while
//! [`SeededCoin`] and [`FixedCoin`] give reproducible runs.
//!
//! ## Hosts
//!
//! [`window::run`] opens a winit window and draws through [`gpu::GpuState`];
//! [`headless::run`] steps at a fixed `dt` with no window at all.

pub mod coin;
pub mod config;
pub mod error;
pub mod gpu;
pub mod headless;
pub mod input;
pub mod logging;
pub mod particle;
mod shader;
pub mod simulation;
pub mod spawn;
pub mod store;
pub mod time;
pub mod window;

pub use coin::{CoinFlip, FixedCoin, SeededCoin, Side, WallClockCoin};
pub use config::{SimConfig, Walls};
pub use error::{AppError, ConfigError, GpuError};
pub use glam::Vec3;
pub use particle::{Particle, ParticleShape};
pub use simulation::{SimParams, Simulation, StepReport};
pub use spawn::{SpawnBounds, SpawnContext};
pub use store::{ParticleStore, VERTEX_STRIDE};
