//! The simulation context and its per-frame step.
//!
//! A [`Simulation`] owns everything that changes from frame to frame: the
//! [`ParticleStore`], the scalar parameters, the coin used to settle
//! collisions and the winner state. The host calls [`Simulation::step`]
//! once per frame and then reads [`ParticleStore::vertices`].

use crate::coin::{wall_clock_seed, CoinFlip, Side, WallClockCoin};
use crate::config::{SimConfig, Walls};
use crate::store::ParticleStore;
use glam::Vec3;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Scalars the step reads and writes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    /// Visual size in pixels; also the numerator of the collision threshold.
    pub particle_size: f32,
    /// Collision divisor.
    pub collide_scale: f32,
    pub walls: Walls,
    /// Clear color; takes the winner's color once there is one.
    pub background: Vec3,
}

impl SimParams {
    fn from_config(config: &SimConfig) -> Self {
        Self {
            particle_size: config.particle_size,
            collide_scale: config.collide_scale,
            walls: config.walls,
            background: Vec3::ZERO,
        }
    }

    /// Distance below which two particles collide.
    #[inline]
    pub fn collision_threshold(&self) -> f32 {
        self.particle_size / self.collide_scale
    }
}

/// What happened during one [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// Particles removed by collisions this frame.
    pub removed: usize,
    /// Particles left after the frame.
    pub remaining: usize,
    /// Whether the sudden-death ramp ran this frame.
    pub sudden_death: bool,
    /// True only on the frame the winner was decided.
    pub winner_found_now: bool,
}

/// Owned simulation state.
pub struct Simulation {
    store: ParticleStore,
    params: SimParams,
    config: SimConfig,
    coin: Box<dyn CoinFlip>,
    initial_count: usize,
    winner: Option<Vec3>,
    sudden_death_logged: bool,
    extinction_logged: bool,
    frame: u64,
}

impl Simulation {
    /// Spawn `config.particle_count` particles from a clock-seeded RNG.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = SmallRng::seed_from_u64(wall_clock_seed());
        Self::with_rng(config, &mut rng)
    }

    /// Spawn from a caller-provided RNG.
    pub fn with_rng<R: rand::Rng>(config: SimConfig, rng: &mut R) -> Self {
        let mut store = ParticleStore::new();
        store.initialize(config.particle_count, config.spawn_bounds(), rng);
        Self::from_store(store, config)
    }

    /// Run on an existing store. Its current size counts as the initial count.
    pub fn from_store(mut store: ParticleStore, config: SimConfig) -> Self {
        store.sync_vertex_buffer();
        let initial_count = store.len();
        log::info!(
            "Arena ready: {} particles, collision threshold {:.4}",
            initial_count,
            config.particle_size / config.collide_scale
        );

        Self {
            store,
            params: SimParams::from_config(&config),
            config,
            coin: Box::new(WallClockCoin),
            initial_count,
            winner: None,
            sudden_death_logged: false,
            extinction_logged: false,
            frame: 0,
        }
    }

    /// Replace the coin used to settle collisions.
    pub fn with_coin<C: CoinFlip + 'static>(mut self, coin: C) -> Self {
        self.coin = Box::new(coin);
        self
    }

    /// Advance the world by `dt` seconds.
    ///
    /// A `dt` that is not a positive finite number skips reflection and
    /// integration; collisions, the ramp and the win check still run.
    pub fn step(&mut self, dt: f32) -> StepReport {
        self.frame += 1;

        let removed = self.resolve_collisions();

        if dt.is_finite() && dt > 0.0 {
            self.reflect();
            self.integrate(dt);
        }

        let sudden_death = self.sudden_death();

        self.store.sync_vertex_buffer();

        let winner_found_now = self.check_winner();

        if removed > 0 {
            log::debug!(
                "frame {}: {} removed, {} remaining",
                self.frame,
                removed,
                self.store.len()
            );
        }

        StepReport {
            removed,
            remaining: self.store.len(),
            sudden_death,
            winner_found_now,
        }
    }

    /// All-pairs scan. Each colliding pair loses one member to the coin; a
    /// removed particle is not compared again. Removals are applied after
    /// the scan, highest index first, so indices stay valid throughout.
    fn resolve_collisions(&mut self) -> usize {
        let threshold = self.params.collision_threshold();
        let particles = self.store.particles();
        let n = particles.len();
        let mut alive = vec![true; n];

        for i in 0..n {
            for j in (i + 1)..n {
                if !alive[i] {
                    break;
                }
                if !alive[j] {
                    continue;
                }
                let distance = particles[i].position.distance(particles[j].position);
                if distance < threshold {
                    let loser = match self.coin.flip() {
                        Side::First => i,
                        Side::Second => j,
                    };
                    log::trace!("collision {}-{} at {:.4}, removing {}", i, j, distance, loser);
                    alive[loser] = false;
                }
            }
        }

        let mut removed = 0;
        for index in (0..n).rev() {
            if !alive[index] && self.store.remove(index).is_some() {
                removed += 1;
            }
        }
        removed
    }

    fn reflect(&mut self) {
        let walls = self.params.walls;
        for p in self.store.particles_mut() {
            if p.position.x <= walls.left || p.position.x >= walls.right {
                p.velocity.x = -p.velocity.x;
            }
            if p.position.y <= walls.bottom || p.position.y >= walls.top {
                p.velocity.y = -p.velocity.y;
            }
        }
    }

    fn integrate(&mut self, dt: f32) {
        for p in self.store.particles_mut() {
            p.velocity += p.acceleration * (dt * 2.0);
            p.position += p.velocity * dt;
        }
    }

    fn sudden_death(&mut self) -> bool {
        let threshold = self.config.sudden_death_threshold(self.initial_count);
        if self.store.len() > threshold {
            return false;
        }

        if !self.sudden_death_logged {
            log::info!(
                "Sudden death at {} particles (threshold {})",
                self.store.len(),
                threshold
            );
            self.sudden_death_logged = true;
        }

        self.params.particle_size += self.config.sudden_death_step;
        self.params.collide_scale += self.config.sudden_death_step;
        true
    }

    /// Returns true on the frame the winner is first found.
    fn check_winner(&mut self) -> bool {
        match self.store.particles() {
            [survivor] => {
                let color = survivor.color;
                self.params.background = color;
                if self.winner.is_some() {
                    return false;
                }
                self.winner = Some(color);
                println!(
                    "WE HAVE A WINNER! ColorCode: ({}, {}, {})",
                    color.x, color.y, color.z
                );
                log::info!("Winner decided on frame {}", self.frame);
                true
            }
            [] if self.winner.is_none() && !self.extinction_logged => {
                log::warn!("All particles eliminated without a winner");
                self.extinction_logged = true;
                false
            }
            _ => false,
        }
    }

    /// Input stimulus: grow the particles by one size step.
    pub fn grow_particles(&mut self) {
        self.params.particle_size += self.config.size_step;
        log::debug!("particle size now {:.2}", self.params.particle_size);
    }

    #[inline]
    pub fn collision_threshold(&self) -> f32 {
        self.params.collision_threshold()
    }

    #[inline]
    pub fn params(&self) -> &SimParams {
        &self.params
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    /// The winning color, once there is one.
    #[inline]
    pub fn winner(&self) -> Option<Vec3> {
        self.winner
    }

    #[inline]
    pub fn has_winner(&self) -> bool {
        self.winner.is_some()
    }

    #[inline]
    pub fn background(&self) -> Vec3 {
        self.params.background
    }

    /// Steps taken so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[inline]
    pub fn initial_count(&self) -> usize {
        self.initial_count
    }
}
