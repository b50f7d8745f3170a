//! The four visual generators and the configuration that selects one.

pub mod blinds;
pub mod particles;
pub mod ripple;
pub mod wireframe;

pub use blinds::{BlindsConfig, GradientBlindsField, ShineDirection};
pub use particles::{Particle, ParticleConfig, ParticleField};
pub use ripple::{RippleConfig, RippleGrid};
pub use wireframe::{WireframeConfig, WireframeRotator};

use crate::canvas::Canvas;
use crate::clock::FrameTime;
use crate::error::{BackdropError, Result};
use glam::Vec2;
use std::fmt;
use std::str::FromStr;

/// Where pointer movement should be listened for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerScope {
    /// Anywhere in the window; the canvas itself stays click-through.
    Window,
    /// Only over the generator's own surface, which then claims pointer events.
    Surface,
}

/// A per-frame simulation plus renderer.
///
/// Each tick receives the damped pointer (normalized, already advanced for
/// this frame) and a cleared canvas of non-zero `size`.
pub trait Generator {
    fn name(&self) -> &'static str;

    /// Damping applied to the shared pointer before each tick.
    fn pointer_dampening(&self) -> f32 {
        1.0
    }

    /// `None` when the generator ignores the pointer.
    fn pointer_scope(&self) -> Option<PointerScope> {
        None
    }

    /// Fall back to pointer-free behaviour, e.g. when no listener could be
    /// registered.
    fn disable_pointer(&mut self) {}

    fn tick(
        &mut self,
        time: &FrameTime,
        pointer: Vec2,
        canvas: &mut dyn Canvas,
        size: Vec2,
    ) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorKind {
    Particles,
    RippleGrid,
    GradientBlinds,
    Wireframe,
}

impl GeneratorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GeneratorKind::Particles => "particles",
            GeneratorKind::RippleGrid => "ripple-grid",
            GeneratorKind::GradientBlinds => "gradient-blinds",
            GeneratorKind::Wireframe => "wireframe",
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GeneratorKind {
    type Err = BackdropError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "particles" => Ok(GeneratorKind::Particles),
            "ripple-grid" => Ok(GeneratorKind::RippleGrid),
            "gradient-blinds" => Ok(GeneratorKind::GradientBlinds),
            "wireframe" => Ok(GeneratorKind::Wireframe),
            other => Err(BackdropError::UnknownGenerator(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub enum GeneratorConfig {
    Particles(ParticleConfig),
    RippleGrid(RippleConfig),
    GradientBlinds(BlindsConfig),
    Wireframe(WireframeConfig),
}

impl GeneratorConfig {
    /// Parse the camelCase options object for `kind`. Missing fields take
    /// their defaults and unknown fields are ignored.
    pub fn from_json(kind: GeneratorKind, json: &str) -> Result<Self> {
        let config = match kind {
            GeneratorKind::Particles => Self::Particles(serde_json::from_str(json)?),
            GeneratorKind::RippleGrid => Self::RippleGrid(serde_json::from_str(json)?),
            GeneratorKind::GradientBlinds => Self::GradientBlinds(serde_json::from_str(json)?),
            GeneratorKind::Wireframe => Self::Wireframe(serde_json::from_str(json)?),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn kind(&self) -> GeneratorKind {
        match self {
            Self::Particles(_) => GeneratorKind::Particles,
            Self::RippleGrid(_) => GeneratorKind::RippleGrid,
            Self::GradientBlinds(_) => GeneratorKind::GradientBlinds,
            Self::Wireframe(_) => GeneratorKind::Wireframe,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Particles(c) => c.validate(),
            Self::RippleGrid(c) => c.validate(),
            Self::GradientBlinds(c) => c.validate(),
            Self::Wireframe(_) => Ok(()),
        }
    }

    /// Where the damped pointer sits before any movement arrives.
    pub fn initial_pointer(&self) -> Vec2 {
        match self {
            Self::GradientBlinds(_) => Vec2::splat(0.5),
            _ => Vec2::ZERO,
        }
    }

    pub fn build(self) -> Box<dyn Generator> {
        match self {
            Self::Particles(c) => Box::new(ParticleField::new(c)),
            Self::RippleGrid(c) => Box::new(RippleGrid::new(c)),
            Self::GradientBlinds(c) => Box::new(GradientBlindsField::new(c)),
            Self::Wireframe(c) => Box::new(WireframeRotator::new(c)),
        }
    }
}

/// Reject NaN/infinite numbers and values below `min`.
pub(crate) fn check_at_least(option: &'static str, value: f32, min: f32) -> Result<()> {
    if !value.is_finite() || value < min {
        return Err(BackdropError::config(
            option,
            format!("expected a finite number >= {min}, got {value}"),
        ));
    }
    Ok(())
}
