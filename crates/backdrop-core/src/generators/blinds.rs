//! Vertical gradient strips lit by a pointer-following spotlight.
//!
//! Like the ripple grid this is a stateless field: blind geometry, opacity and
//! gradients are derived from the surface size and the damped pointer every
//! frame. Only the jitter RNG persists between frames.

use super::{check_at_least, Generator, PointerScope};
use crate::canvas::{Canvas, ColorStop, Paint};
use crate::clock::FrameTime;
use crate::color::{BlendMode, Rgba};
use crate::constants::*;
use crate::error::{BackdropError, Result};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShineDirection {
    /// First color on the left edge of each strip.
    #[default]
    Left,
    /// First color on the right edge.
    Right,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlindsConfig {
    pub gradient_colors: Vec<Rgba>,
    /// Gradient axis rotation in degrees.
    pub angle: f32,
    pub noise: f32,
    pub blind_count: u32,
    pub blind_min_width: f32,
    pub spotlight_radius: f32,
    pub spotlight_softness: f32,
    pub spotlight_opacity: f32,
    pub mouse_dampening: f32,
    /// Extra displacement in pixels, either way, at full proximity.
    pub distort_amount: f32,
    pub shine_direction: ShineDirection,
    pub mix_blend_mode: BlendMode,
}

impl Default for BlindsConfig {
    fn default() -> Self {
        Self {
            gradient_colors: vec![Rgba::rgb(0xff, 0x9f, 0xfc), Rgba::rgb(0x52, 0x27, 0xff)],
            angle: 0.0,
            noise: 0.3,
            blind_count: 12,
            blind_min_width: 50.0,
            spotlight_radius: 0.5,
            spotlight_softness: 1.0,
            spotlight_opacity: 1.0,
            mouse_dampening: 0.15,
            distort_amount: 0.0,
            shine_direction: ShineDirection::Left,
            mix_blend_mode: BlendMode::Lighten,
        }
    }
}

impl BlindsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.gradient_colors.is_empty() {
            return Err(BackdropError::config(
                "gradientColors",
                "at least one color is required",
            ));
        }
        if !(1..=MAX_BLIND_COUNT).contains(&self.blind_count) {
            return Err(BackdropError::config(
                "blindCount",
                format!("expected 1 to {}, got {}", MAX_BLIND_COUNT, self.blind_count),
            ));
        }
        if !(self.mouse_dampening > 0.0 && self.mouse_dampening <= 1.0) {
            return Err(BackdropError::config(
                "mouseDampening",
                format!("expected a value in (0, 1], got {}", self.mouse_dampening),
            ));
        }
        if !self.angle.is_finite() {
            return Err(BackdropError::config("angle", "must be finite"));
        }
        check_at_least("noise", self.noise, 0.0)?;
        check_at_least("blindMinWidth", self.blind_min_width, 0.0)?;
        check_at_least("spotlightRadius", self.spotlight_radius, 0.0)?;
        check_at_least("spotlightSoftness", self.spotlight_softness, 0.0)?;
        check_at_least("spotlightOpacity", self.spotlight_opacity, 0.0)?;
        check_at_least("distortAmount", self.distort_amount, 0.0)
    }

    /// The two gradient endpoints; a single configured color is used for both.
    pub fn stop_colors(&self) -> (Rgba, Rgba) {
        let first = self.gradient_colors.first().copied().unwrap_or(Rgba::WHITE);
        let second = self.gradient_colors.get(1).copied().unwrap_or(first);
        match self.shine_direction {
            ShineDirection::Left => (first, second),
            ShineDirection::Right => (second, first),
        }
    }
}

/// Strip width and the number of strips needed to cover the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlindLayout {
    pub width: f32,
    pub count: usize,
}

impl BlindLayout {
    /// `width = max(surface_width / blind_count, min_width)`, enough strips
    /// to reach the right edge (the last one may overhang it).
    pub fn compute(surface_width: f32, blind_count: u32, min_width: f32) -> Self {
        let width = (surface_width / blind_count.max(1) as f32).max(min_width);
        let count = if width > 0.0 && surface_width > 0.0 {
            (surface_width / width).ceil() as usize
        } else {
            0
        };
        Self { width, count }
    }

    /// Left edge of strip `index`.
    pub fn x(&self, index: usize) -> f32 {
        index as f32 * self.width
    }
}

/// 1 when the pointer is over the strip centre, falling linearly to 0 at
/// half the surface width away.
#[inline]
pub fn distort_factor(pointer_x: f32, strip_center: f32, surface_width: f32) -> f32 {
    if surface_width <= 0.0 {
        return 0.0;
    }
    let distance = (pointer_x - strip_center).abs();
    1.0 - (distance / (surface_width / 2.0)).min(1.0)
}

/// One strip as drawn this frame, before jitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blind {
    pub index: usize,
    pub x: f32,
    pub width: f32,
    pub distort_factor: f32,
    pub alpha: f32,
}

pub struct GradientBlindsField {
    config: BlindsConfig,
    rng: StdRng,
}

impl GradientBlindsField {
    pub fn new(config: BlindsConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: BlindsConfig, rng: StdRng) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &BlindsConfig {
        &self.config
    }

    pub fn layout(&self, size: Vec2) -> BlindLayout {
        BlindLayout::compute(size.x, self.config.blind_count, self.config.blind_min_width)
    }

    /// Strips for a `size` surface with the pointer at `pointer_x` pixels.
    pub fn blinds(&self, size: Vec2, pointer_x: f32) -> impl Iterator<Item = Blind> + '_ {
        let layout = self.layout(size);
        (0..layout.count).map(move |index| {
            let x = layout.x(index);
            let factor = distort_factor(pointer_x, x + layout.width / 2.0, size.x);
            Blind {
                index,
                x,
                width: layout.width,
                distort_factor: factor,
                alpha: self.config.spotlight_opacity
                    * (BLIND_BASE_ALPHA + factor * BLIND_PROXIMITY_ALPHA),
            }
        })
    }

    /// Linear gradient across a strip; at `angle == 0` it runs from the
    /// strip's top-left corner to its bottom-right corner.
    pub fn gradient_for(&self, blind: &Blind, height: f32) -> Paint {
        let center = Vec2::new(blind.x + blind.width / 2.0, height / 2.0);
        let half = Vec2::from_angle(self.config.angle.to_radians())
            .rotate(Vec2::new(blind.width / 2.0, height / 2.0));
        let (c0, c1) = self.config.stop_colors();
        Paint::Linear {
            from: center - half,
            to: center + half,
            stops: vec![ColorStop::new(0.0, c0), ColorStop::new(1.0, c1)],
        }
    }

    /// Radial highlight centred on the pointer (pixels).
    pub fn spotlight(&self, size: Vec2, pointer: Vec2) -> Paint {
        let c = &self.config;
        Paint::Radial {
            center: pointer,
            inner_radius: 0.0,
            outer_radius: c.spotlight_radius * size.x.max(size.y) * c.spotlight_softness,
            stops: vec![
                ColorStop::new(0.0, Rgba::WHITE.with_alpha(SPOTLIGHT_CORE_ALPHA)),
                ColorStop::new(1.0, Rgba::WHITE.with_alpha(0.0)),
            ],
        }
    }

    /// Horizontal offset for one strip, uniform in `±reach` where `reach`
    /// is half the noise span plus `distortAmount`, scaled by proximity.
    fn jitter(&mut self, factor: f32) -> f32 {
        let reach =
            (self.config.noise * BLIND_NOISE_SCALE / 2.0 + self.config.distort_amount) * factor;
        (self.rng.gen::<f32>() * 2.0 - 1.0) * reach
    }

    pub fn draw(&mut self, canvas: &mut dyn Canvas, size: Vec2, pointer: Vec2) {
        let blinds: Vec<Blind> = self.blinds(size, pointer.x).collect();
        for blind in &blinds {
            let paint = self.gradient_for(blind, size.y);
            let offset = self.jitter(blind.distort_factor);
            canvas.set_global_alpha(blind.alpha);
            canvas.fill_rect(
                Vec2::new(blind.x + offset, 0.0),
                Vec2::new(blind.width, size.y),
                &paint,
            );
        }

        let spotlight = self.spotlight(size, pointer);
        canvas.set_blend_mode(self.config.mix_blend_mode);
        canvas.set_global_alpha(self.config.spotlight_opacity);
        canvas.fill_rect(Vec2::ZERO, size, &spotlight);

        // Leave no compositing state behind for the next frame.
        canvas.set_blend_mode(BlendMode::SourceOver);
        canvas.set_global_alpha(1.0);
    }
}

impl Generator for GradientBlindsField {
    fn name(&self) -> &'static str {
        "gradient-blinds"
    }

    fn pointer_dampening(&self) -> f32 {
        self.config.mouse_dampening
    }

    fn pointer_scope(&self) -> Option<PointerScope> {
        Some(PointerScope::Window)
    }

    fn tick(
        &mut self,
        _time: &FrameTime,
        pointer: Vec2,
        canvas: &mut dyn Canvas,
        size: Vec2,
    ) -> Result<()> {
        self.draw(canvas, size, pointer * size);
        Ok(())
    }
}
