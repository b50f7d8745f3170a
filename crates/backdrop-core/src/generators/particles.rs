use super::{check_at_least, Generator, PointerScope};
use crate::canvas::Canvas;
use crate::clock::FrameTime;
use crate::color::Rgba;
use crate::constants::*;
use crate::error::{BackdropError, Result};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use std::f32::consts::TAU;

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParticleConfig {
    pub particle_colors: Vec<Rgba>,
    pub particle_count: usize,
    /// Width of the random radius range above the minimum radius.
    pub particle_spread: f32,
    /// Velocity scale; each component starts in `[-speed/2, speed/2)`.
    pub speed: f32,
    /// Radius scale in percent.
    pub particle_base_size: f32,
    pub move_particles_on_hover: bool,
    pub alpha_particles: bool,
    pub disable_rotation: bool,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particle_colors: vec![Rgba::WHITE, Rgba::WHITE],
            particle_count: 200,
            particle_spread: 10.0,
            speed: 0.1,
            particle_base_size: 100.0,
            move_particles_on_hover: true,
            alpha_particles: false,
            disable_rotation: false,
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<()> {
        if self.particle_colors.is_empty() {
            return Err(BackdropError::config(
                "particleColors",
                "at least one color is required",
            ));
        }
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(BackdropError::config(
                "particleCount",
                format!("at most {} particles are supported", MAX_PARTICLE_COUNT),
            ));
        }
        check_at_least("particleSpread", self.particle_spread, 0.0)?;
        check_at_least("speed", self.speed, 0.0)?;
        check_at_least("particleBaseSize", self.particle_base_size, 0.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Rgba,
    pub rotation: f32,
    pub rotation_rate: f32,
}

/// A fixed-size set of drifting, bouncing discs.
pub struct ParticleField {
    config: ParticleConfig,
    particles: Vec<Particle>,
    rng: StdRng,
    scattered: bool,
    hover: bool,
}

impl ParticleField {
    pub fn new(config: ParticleConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Build with an explicit RNG; positions stay at the origin until the
    /// first frame with a known surface size scatters them.
    pub fn with_rng(config: ParticleConfig, mut rng: StdRng) -> Self {
        let size_scale = config.particle_base_size / PARTICLE_BASE_SIZE_UNIT;
        let particles = (0..config.particle_count)
            .map(|_| Particle {
                position: Vec2::ZERO,
                velocity: Vec2::new(
                    (rng.gen::<f32>() - 0.5) * config.speed,
                    (rng.gen::<f32>() - 0.5) * config.speed,
                ),
                radius: (rng.gen::<f32>() * config.particle_spread + PARTICLE_MIN_RADIUS)
                    * size_scale,
                color: pick_color(&config.particle_colors, &mut rng),
                rotation: rng.gen::<f32>() * TAU,
                rotation_rate: (rng.gen::<f32>() - 0.5) * 2.0 * PARTICLE_MAX_SPIN,
            })
            .collect();
        let hover = config.move_particles_on_hover;
        Self {
            config,
            particles,
            rng,
            scattered: false,
            hover,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn is_scattered(&self) -> bool {
        self.scattered
    }

    /// Place every particle uniformly over a `size` surface.
    pub fn scatter(&mut self, size: Vec2) {
        for p in &mut self.particles {
            p.position = Vec2::new(self.rng.gen::<f32>() * size.x, self.rng.gen::<f32>() * size.y);
        }
        self.scattered = true;
    }

    /// Advance the simulation by `step` nominal frames. `pointer` is the
    /// damped pointer in surface pixels, ignored unless hover is enabled.
    pub fn step(&mut self, size: Vec2, pointer: Vec2, step: f32) {
        let pull = (PARTICLE_HOVER_PULL * step).min(1.0);
        let spin = !self.config.disable_rotation;
        for p in &mut self.particles {
            p.position += p.velocity * step;

            if p.position.x < 0.0 || p.position.x > size.x {
                p.velocity.x = -p.velocity.x;
            }
            if p.position.y < 0.0 || p.position.y > size.y {
                p.velocity.y = -p.velocity.y;
            }

            if self.hover {
                let to_pointer = pointer - p.position;
                if to_pointer.length() < PARTICLE_HOVER_RADIUS {
                    p.position += to_pointer * pull;
                }
            }

            if spin {
                p.rotation += p.rotation_rate * step;
            }
        }
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        for p in &self.particles {
            let alpha = if self.config.alpha_particles {
                self.rng.gen::<f32>() * PARTICLE_ALPHA_SPAN + PARTICLE_ALPHA_MIN
            } else {
                1.0
            };
            canvas.save();
            canvas.translate(p.position);
            canvas.rotate(p.rotation);
            canvas.set_global_alpha(alpha);
            canvas.fill_circle(Vec2::ZERO, p.radius, p.color);
            canvas.restore();
        }
    }
}

fn pick_color(palette: &[Rgba], rng: &mut StdRng) -> Rgba {
    if palette.is_empty() {
        return Rgba::WHITE;
    }
    palette[rng.gen_range(0..palette.len())]
}

impl Generator for ParticleField {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn pointer_scope(&self) -> Option<PointerScope> {
        self.hover.then_some(PointerScope::Window)
    }

    fn disable_pointer(&mut self) {
        self.hover = false;
    }

    fn tick(
        &mut self,
        time: &FrameTime,
        pointer: Vec2,
        canvas: &mut dyn Canvas,
        size: Vec2,
    ) -> Result<()> {
        if !self.scattered {
            self.scatter(size);
        }
        self.step(size, pointer * size, time.step);
        self.draw(canvas);
        Ok(())
    }
}
