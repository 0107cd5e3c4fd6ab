//! Particle storage and its flat vertex mirror.
//!
//! The store keeps the live particles in insertion order alongside a flat
//! `f32` buffer laid out for the renderer: [`VERTEX_STRIDE`] floats per
//! particle, `[x, y, z, r, g, b]`, with particle `i` at `6i..6i + 6`.

use crate::particle::Particle;
use crate::spawn::{SpawnBounds, SpawnContext};
use rand::Rng;

/// Floats per particle in the vertex buffer.
pub const VERTEX_STRIDE: usize = 6;

/// Ordered particle list plus the vertex buffer the renderer reads.
#[derive(Debug, Clone, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    vertices: Vec<f32>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from explicit particles, with the buffer already synced.
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        let mut store = Self {
            particles,
            vertices: Vec::new(),
        };
        store.sync_vertex_buffer();
        store
    }

    /// Spawn `count` randomized particles, appending each one's vertex block
    /// in the same order.
    pub fn initialize<R: Rng>(&mut self, count: usize, bounds: SpawnBounds, rng: &mut R) {
        self.particles.reserve(count);
        self.vertices.reserve(count * VERTEX_STRIDE);

        let mut spawn = SpawnContext::new(bounds, rng);
        for _ in 0..count {
            let particle = spawn.particle();
            self.vertices.extend_from_slice(&particle.vertex());
            self.particles.push(particle);
        }
    }

    /// Remove the particle at `index`, shifting later ones down.
    ///
    /// Out-of-range indices are ignored. The vertex buffer is left as is
    /// until the next [`sync_vertex_buffer`](Self::sync_vertex_buffer).
    pub fn remove(&mut self, index: usize) -> Option<Particle> {
        if index < self.particles.len() {
            Some(self.particles.remove(index))
        } else {
            None
        }
    }

    /// Rewrite the vertex buffer from the current particles.
    pub fn sync_vertex_buffer(&mut self) {
        self.vertices.clear();
        self.vertices
            .extend(self.particles.iter().flat_map(|p| p.vertex()));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// The flat buffer as of the last sync.
    #[inline]
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn seeded_store(count: usize) -> ParticleStore {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut store = ParticleStore::new();
        store.initialize(count, SpawnBounds::default(), &mut rng);
        store
    }

    #[test]
    fn test_initialize_buffer_length() {
        for n in [0, 1, 2, 17, 100] {
            let store = seeded_store(n);
            assert_eq!(store.len(), n);
            assert_eq!(store.vertices().len(), VERTEX_STRIDE * n);
        }
    }

    #[test]
    fn test_initialize_buffer_mirrors_particles() {
        let store = seeded_store(10);
        for (i, p) in store.particles().iter().enumerate() {
            let block = &store.vertices()[i * VERTEX_STRIDE..(i + 1) * VERTEX_STRIDE];
            assert_eq!(block, &p.vertex());
        }
    }

    #[test]
    fn test_initialize_ranges() {
        let store = seeded_store(200);
        for p in store.particles() {
            assert!(p.position.x >= -1.0 && p.position.x <= 1.0);
            assert!(p.position.y >= -1.0 && p.position.y <= 1.0);
            assert_eq!(p.position.z, 0.0);
            assert_eq!(p.acceleration, Vec3::new(0.0, -0.05, 0.0));
        }
    }

    #[test]
    fn test_remove_shifts_and_defers_sync() {
        let mut store = ParticleStore::from_particles(vec![
            Particle::at(Vec3::new(0.0, 0.0, 0.0)),
            Particle::at(Vec3::new(1.0, 0.0, 0.0)),
            Particle::at(Vec3::new(2.0, 0.0, 0.0)),
        ]);

        let removed = store.remove(1);
        assert_eq!(removed.map(|p| p.position.x), Some(1.0));
        assert_eq!(store.len(), 2);
        assert_eq!(store.particles()[1].position.x, 2.0);

        // Not synced yet
        assert_eq!(store.vertices().len(), 3 * VERTEX_STRIDE);

        store.sync_vertex_buffer();
        assert_eq!(store.vertices().len(), 2 * VERTEX_STRIDE);
        assert_eq!(store.vertices()[VERTEX_STRIDE], 2.0);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut store = seeded_store(3);
        let before = store.particles().to_vec();
        assert!(store.remove(3).is_none());
        assert!(store.remove(usize::MAX).is_none());
        assert_eq!(store.particles(), before.as_slice());

        let mut empty = ParticleStore::new();
        assert!(empty.remove(0).is_none());
    }

    #[test]
    fn test_sync_is_idempotent() {
        let mut store = seeded_store(25);
        store.sync_vertex_buffer();
        let first = store.vertices().to_vec();
        store.sync_vertex_buffer();
        assert_eq!(store.vertices(), first.as_slice());
    }

    #[test]
    fn test_sync_picks_up_moves() {
        let mut store = seeded_store(2);
        store.particles_mut()[1].position = Vec3::new(0.25, -0.5, 0.0);
        store.sync_vertex_buffer();
        assert_eq!(&store.vertices()[6..9], &[0.25, -0.5, 0.0]);
    }
}
