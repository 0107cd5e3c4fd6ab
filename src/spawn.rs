//! Spawn context for particle initialization.
//!
//! Provides helper methods for the randomized initial particle batch.

use crate::particle::{Particle, ParticleShape};
use glam::Vec3;
use rand::Rng;

/// Ranges the initial particle batch is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnBounds {
    /// Half-size of the square positions are sampled in (x and y).
    pub extent: f32,
    /// Per-axis velocity range is `[-max_speed, max_speed)`.
    pub max_speed: f32,
    /// Constant acceleration given to every particle.
    pub acceleration: Vec3,
}

impl Default for SpawnBounds {
    fn default() -> Self {
        Self {
            extent: 1.0,
            max_speed: 1.0,
            acceleration: Vec3::new(0.0, -0.05, 0.0),
        }
    }
}

/// Random source for the initial batch.
///
/// Borrows the caller's RNG so the whole batch comes from one injected
/// source and tests can pass a seeded one.
pub struct SpawnContext<'a, R: Rng> {
    pub bounds: SpawnBounds,
    rng: &'a mut R,
}

impl<'a, R: Rng> SpawnContext<'a, R> {
    pub fn new(bounds: SpawnBounds, rng: &'a mut R) -> Self {
        Self { bounds, rng }
    }

    /// Random f32 in `[min, max)`. Returns `min` for an empty range.
    ///
    /// Ranges whose width overflows `f32` are sampled by interpolating
    /// between the endpoints instead.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if !(max > min) {
            return min;
        }
        if (max - min).is_finite() {
            self.rng.gen_range(min..max)
        } else {
            let t: f32 = self.rng.gen();
            min * (1.0 - t) + max * t
        }
    }

    // ========== Particle attributes ==========

    /// Random point in the `[-extent, extent]` square at z = 0.
    pub fn random_in_square(&mut self) -> Vec3 {
        let e = self.bounds.extent;
        Vec3::new(self.random_range(-e, e), self.random_range(-e, e), 0.0)
    }

    /// Random RGB color (each channel 0-1).
    pub fn random_color(&mut self) -> Vec3 {
        Vec3::new(self.rng.gen(), self.rng.gen(), self.rng.gen())
    }

    /// One of the three shapes, uniformly.
    pub fn random_shape(&mut self) -> ParticleShape {
        ParticleShape::from_index(self.rng.gen_range(0..ParticleShape::COUNT))
    }

    /// Planar velocity, each axis uniform in `[-max_speed, max_speed)`.
    pub fn random_velocity(&mut self) -> Vec3 {
        let s = self.bounds.max_speed;
        Vec3::new(self.random_range(-s, s), self.random_range(-s, s), 0.0)
    }

    /// A fully randomized particle.
    pub fn particle(&mut self) -> Particle {
        let position = self.random_in_square();
        let color = self.random_color();
        let shape = self.random_shape();
        let velocity = self.random_velocity();

        Particle::at(position)
            .with_color(color)
            .with_shape(shape)
            .with_velocity(velocity)
            .with_acceleration(self.bounds.acceleration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_in_square_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        let bounds = SpawnBounds {
            extent: 0.5,
            ..Default::default()
        };
        let mut ctx = SpawnContext::new(bounds, &mut rng);
        for _ in 0..100 {
            let pos = ctx.random_in_square();
            assert!(pos.x >= -0.5 && pos.x < 0.5);
            assert!(pos.y >= -0.5 && pos.y < 0.5);
            assert_eq!(pos.z, 0.0);
        }
    }

    #[test]
    fn test_particle_uses_bounds() {
        let mut rng = SmallRng::seed_from_u64(3);
        let bounds = SpawnBounds::default();
        let mut ctx = SpawnContext::new(bounds, &mut rng);
        for _ in 0..50 {
            let p = ctx.particle();
            assert_eq!(p.acceleration, bounds.acceleration);
            assert!(p.velocity.x.abs() <= 1.0 && p.velocity.y.abs() <= 1.0);
            assert_eq!(p.velocity.z, 0.0);
            assert!(p.color.min_element() >= 0.0 && p.color.max_element() <= 1.0);
        }
    }

    #[test]
    fn test_zero_speed_range_is_still() {
        let mut rng = SmallRng::seed_from_u64(9);
        let bounds = SpawnBounds {
            max_speed: 0.0,
            ..Default::default()
        };
        let mut ctx = SpawnContext::new(bounds, &mut rng);
        assert_eq!(ctx.random_velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_overflowing_range_stays_within_endpoints() {
        let mut rng = SmallRng::seed_from_u64(11);
        let bounds = SpawnBounds {
            extent: 3e38,
            max_speed: f32::MAX,
            ..Default::default()
        };
        let mut ctx = SpawnContext::new(bounds, &mut rng);
        for _ in 0..100 {
            let p = ctx.particle();
            assert!(p.position.x.is_finite() && p.position.x.abs() <= 3e38);
            assert!(p.position.y.is_finite() && p.position.y.abs() <= 3e38);
            assert!(p.velocity.x.is_finite() && p.velocity.y.is_finite());
        }
    }
}
