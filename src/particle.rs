//! The particle value type.

use glam::Vec3;

/// Shape tag assigned to each particle at spawn.
///
/// Carried through to the renderer side only; collision and integration
/// never look at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParticleShape {
    /// Equilateral triangle pointing up.
    #[default]
    Triangle,
    /// Diamond/rhombus shape.
    Diamond,
    /// Regular hexagon.
    Hexagon,
}

impl ParticleShape {
    /// Number of distinct shapes.
    pub const COUNT: u32 = 3;

    /// Shape for a numeric tag. Wraps, so any `u32` maps to a shape.
    pub fn from_index(index: u32) -> Self {
        match index % Self::COUNT {
            0 => ParticleShape::Triangle,
            1 => ParticleShape::Diamond,
            _ => ParticleShape::Hexagon,
        }
    }

    /// Numeric tag (0, 1 or 2).
    pub fn index(self) -> u32 {
        match self {
            ParticleShape::Triangle => 0,
            ParticleShape::Diamond => 1,
            ParticleShape::Hexagon => 2,
        }
    }
}

/// A simulated point.
///
/// Particles have no identity beyond their slot in the
/// [`ParticleStore`](crate::ParticleStore).
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Constant for the particle's whole life.
    pub acceleration: Vec3,
    /// RGB, each channel in 0-1.
    pub color: Vec3,
    pub shape: ParticleShape,
    /// Initialized to 1.0 and never consumed by the step.
    pub lifespan: f32,
}

/// Starting `lifespan` for every particle.
pub const DEFAULT_LIFESPAN: f32 = 1.0;

impl Particle {
    /// A motionless white particle at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            color: Vec3::ONE,
            shape: ParticleShape::default(),
            lifespan: DEFAULT_LIFESPAN,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_acceleration(mut self, acceleration: Vec3) -> Self {
        self.acceleration = acceleration;
        self
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_shape(mut self, shape: ParticleShape) -> Self {
        self.shape = shape;
        self
    }

    /// The interleaved `[x, y, z, r, g, b]` block the renderer consumes.
    #[inline]
    pub fn vertex(&self) -> [f32; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.color.x,
            self.color.y,
            self.color.z,
        ]
    }
}
