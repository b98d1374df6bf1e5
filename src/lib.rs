pub mod clock;
pub mod config;
pub mod logging;
pub mod pointer;
pub mod viewport;

use cgmath::prelude::*;
use rand::prelude::*;
use rayon::prelude::*;

pub use clock::FrameClock;
pub use config::{ConfigLoadError, InvalidConfig, ParticleColor, SimulationConfig, SizeRange};
pub use pointer::{PointerState, PointerTracker};
pub use viewport::{Viewport, ViewportBounds};

/// Per-tick velocity damping.
pub const FRICTION: f32 = 0.95;

/// How far outside the viewport a particle may drift before it wraps.
pub const WRAP_MARGIN: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: cgmath::Vector2<f32>,
    pub velocity: cgmath::Vector2<f32>,
    size: f32,
    speed: f32,
    color: ParticleColor,
}

impl Particle {
    pub fn size(&self) -> f32 {
        self.size
    }

    /// Multiplier applied to velocity when integrating position.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn color(&self) -> ParticleColor {
        self.color
    }

    pub fn sprite(&self) -> Sprite {
        Sprite {
            x: self.position.x,
            y: self.position.y,
            size: self.size,
            color: self.color,
        }
    }
}

/// What a renderer needs to draw one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: ParticleColor,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldStats {
    /// Particles currently inside the attraction range.
    pub attracted: usize,
    pub mean_distance: f32,
    pub mean_speed: f32,
}

/// A fixed set of particles drifting towards the pointer.
///
/// The set is created once and regenerated wholesale whenever the viewport
/// changes. Particles never interact with one another, so a tick is a single
/// data-parallel pass.
#[derive(Clone, Debug)]
pub struct ParticleField {
    config: SimulationConfig,
    viewport: Viewport,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn create(config: SimulationConfig, viewport: Viewport) -> Result<Self, InvalidConfig> {
        Self::create_with_rng(config, viewport, &mut thread_rng())
    }

    pub fn create_with_rng(
        config: SimulationConfig,
        viewport: Viewport,
        rng: &mut impl Rng,
    ) -> Result<Self, InvalidConfig> {
        config.validate()?;

        let particles = spawn_particles(&config, viewport, rng);
        log::debug!(
            "Spawned {} particles in a {}x{} viewport",
            particles.len(),
            viewport.width,
            viewport.height
        );

        Ok(Self {
            config,
            viewport,
            particles,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Viewport the current particle set was spawned in.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Positions and velocities may be adjusted; the set itself may not grow
    /// or shrink.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn sprites(&self) -> impl ExactSizeIterator<Item = Sprite> + '_ {
        self.particles.iter().map(Particle::sprite)
    }

    /// Discard every particle and spawn a fresh set for `viewport`.
    pub fn resize(&mut self, viewport: Viewport) {
        self.resize_with_rng(viewport, &mut thread_rng());
    }

    pub fn resize_with_rng(&mut self, viewport: Viewport, rng: &mut impl Rng) {
        self.viewport = viewport;
        self.particles = spawn_particles(&self.config, viewport, rng);
        log::debug!(
            "Respawned {} particles for a {}x{} viewport",
            self.particles.len(),
            viewport.width,
            viewport.height
        );
    }

    /// Replace the configuration and respawn. Leaves the field untouched if
    /// `config` is invalid.
    pub fn reconfigure(
        &mut self,
        config: SimulationConfig,
        viewport: Viewport,
    ) -> Result<(), InvalidConfig> {
        *self = Self::create(config, viewport)?;
        Ok(())
    }

    /// Advance every particle by one frame.
    pub fn tick(&mut self, pointer: PointerState, viewport: Viewport) {
        let forces = Forces {
            pointer: cgmath::vec2(pointer.x, pointer.y),
            strength: self.config.attraction_strength,
            range: self.config.attraction_range,
        };

        self.particles
            .par_iter_mut()
            .for_each(|particle| update_single_particle(particle, &forces, viewport));
    }

    pub fn stats(&self, pointer: PointerState) -> FieldStats {
        if self.particles.is_empty() {
            return FieldStats::default();
        }

        let pointer = cgmath::vec2(pointer.x, pointer.y);
        let (attracted, distance_sum, speed_sum) = self
            .particles
            .par_iter()
            .map(|particle| {
                let distance = (pointer - particle.position).magnitude();
                let attracted = usize::from(distance < self.config.attraction_range);
                (attracted, distance, particle.velocity.magnitude())
            })
            .reduce(|| (0, 0.0, 0.0), |a, b| (a.0 + b.0, a.1 + b.1, a.2 + b.2));

        let count = self.particles.len() as f32;
        FieldStats {
            attracted,
            mean_distance: distance_sum / count,
            mean_speed: speed_sum / count,
        }
    }
}

struct Forces {
    pointer: cgmath::Vector2<f32>,
    strength: f32,
    range: f32,
}

impl Forces {
    /// Linear falloff: full strength on the pointer, zero at the range edge.
    fn calculate_force(&self, distance: f32) -> f32 {
        self.strength * (1.0 - distance / self.range)
    }
}

fn update_single_particle(particle: &mut Particle, forces: &Forces, viewport: Viewport) {
    let relative_position = forces.pointer - particle.position;
    let distance = relative_position.magnitude();

    if distance < forces.range {
        let f = forces.calculate_force(distance);
        // zero distance yields a zero direction
        let divisor = if distance == 0.0 { 1.0 } else { distance };
        particle.velocity += relative_position / divisor * f;
    }

    particle.velocity *= FRICTION;
    particle.position += particle.velocity * particle.speed;

    apply_boundary_conditions(particle, viewport);
}

/// Toroidal wrap with a margin on every side.
pub fn wrap_coordinate(value: f32, extent: f32) -> f32 {
    if value < -WRAP_MARGIN {
        extent + WRAP_MARGIN
    } else if value > extent + WRAP_MARGIN {
        -WRAP_MARGIN
    } else {
        value
    }
}

fn apply_boundary_conditions(particle: &mut Particle, viewport: Viewport) {
    particle.position.x = wrap_coordinate(particle.position.x, viewport.width);
    particle.position.y = wrap_coordinate(particle.position.y, viewport.height);
}

fn spawn_particles(config: &SimulationConfig, viewport: Viewport, rng: &mut impl Rng) -> Vec<Particle> {
    let SizeRange { min, max } = config.size_range;

    (0..config.particle_count)
        .map(|_| {
            let size = min + rng.r#gen::<f32>() * (max - min);
            Particle {
                position: cgmath::vec2(
                    rng.r#gen::<f32>() * viewport.width,
                    rng.r#gen::<f32>() * viewport.height,
                ),
                velocity: cgmath::vec2(rng.r#gen::<f32>() - 0.5, rng.r#gen::<f32>() - 0.5),
                size,
                speed: config.speed_for_size(size),
                color: config.colors[rng.gen_range(0..config.colors.len())],
            }
        })
        .collect()
}
