//! A lattice of full-width lines displaced by an analytic ripple field.
//!
//! Nothing per node is stored: every frame recomputes each intersection's
//! distortion from its position, the elapsed time and the damped pointer.

use super::{check_at_least, Generator, PointerScope};
use crate::canvas::Canvas;
use crate::clock::FrameTime;
use crate::color::Rgba;
use crate::constants::*;
use crate::error::Result;
use glam::Vec2;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RippleConfig {
    pub enable_rainbow: bool,
    pub grid_color: Rgba,
    pub ripple_intensity: f32,
    /// Lattice spacing in pixels.
    pub grid_size: f32,
    /// Line width in tenths of a pixel.
    pub grid_thickness: f32,
    pub mouse_interaction: bool,
    /// Reach of the pointer ripple, in units of ten cells.
    pub mouse_interaction_radius: f32,
    pub opacity: f32,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            enable_rainbow: false,
            grid_color: Rgba::WHITE,
            ripple_intensity: 0.05,
            grid_size: 10.0,
            grid_thickness: 15.0,
            mouse_interaction: true,
            mouse_interaction_radius: 1.2,
            opacity: 0.8,
        }
    }
}

impl RippleConfig {
    pub fn validate(&self) -> Result<()> {
        check_at_least("gridSize", self.grid_size, 1.0)?;
        check_at_least("gridThickness", self.grid_thickness, 0.0)?;
        check_at_least("rippleIntensity", self.ripple_intensity, 0.0)?;
        check_at_least("mouseInteractionRadius", self.mouse_interaction_radius, 0.0)?;
        check_at_least("opacity", self.opacity, 0.0)
    }

    /// Pointer ripples vanish beyond this distance in pixels.
    pub fn reach(&self) -> f32 {
        self.grid_size * self.mouse_interaction_radius * RIPPLE_REACH_SCALE
    }
}

/// Standing-wave distortion used when pointer interaction is off.
#[inline]
pub fn ambient_distortion(node: Vec2, t: f32, intensity: f32) -> f32 {
    (node.x * RIPPLE_AMBIENT_FREQ + t).sin()
        * (node.y * RIPPLE_AMBIENT_FREQ + t).cos()
        * intensity
        * RIPPLE_AMPLITUDE_SCALE
}

/// Outward-travelling ripple centred on `pointer` (pixels), zero at or
/// beyond `reach`.
#[inline]
pub fn pointer_distortion(node: Vec2, pointer: Vec2, t: f32, intensity: f32, reach: f32) -> f32 {
    let d = node.distance(pointer);
    if d < reach {
        ((d - t * RIPPLE_WAVE_SPEED) * RIPPLE_WAVE_NUMBER).sin() * intensity * RIPPLE_AMPLITUDE_SCALE
    } else {
        0.0
    }
}

/// Hue in degrees, always in \[0, 360).
#[inline]
pub fn rainbow_hue(node: Vec2, t: f32) -> f32 {
    let hue = (node.x + node.y + t * RAINBOW_HUE_SPEED).rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if hue >= 360.0 || !hue.is_finite() {
        0.0
    } else {
        hue
    }
}

/// Lattice intersections covering a `size` surface, row by row.
pub fn lattice(size: Vec2, cell: f32) -> impl Iterator<Item = Vec2> {
    let cols = (size.x / cell).ceil().max(0.0) as u32;
    let rows = (size.y / cell).ceil().max(0.0) as u32;
    (0..=cols).flat_map(move |i| (0..=rows).map(move |j| Vec2::new(i as f32 * cell, j as f32 * cell)))
}

pub struct RippleGrid {
    config: RippleConfig,
    time: f32,
    interactive: bool,
}

impl RippleGrid {
    pub fn new(config: RippleConfig) -> Self {
        let interactive = config.mouse_interaction;
        Self {
            config,
            time: 0.0,
            interactive,
        }
    }

    pub fn config(&self) -> &RippleConfig {
        &self.config
    }

    /// Simulation time in ripple units (advances 0.016 per nominal frame).
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn advance(&mut self, step: f32) {
        self.time += RIPPLE_TIME_PER_FRAME * step;
    }

    /// Distortion of the intersection at `node` for the current time;
    /// `pointer` is in pixels.
    pub fn distortion_at(&self, node: Vec2, pointer: Vec2) -> f32 {
        let intensity = self.config.ripple_intensity;
        if self.interactive {
            pointer_distortion(node, pointer, self.time, intensity, self.config.reach())
        } else {
            ambient_distortion(node, self.time, intensity)
        }
    }

    pub fn color_at(&self, node: Vec2) -> Rgba {
        if self.config.enable_rainbow {
            Rgba::from_hsl(
                rainbow_hue(node, self.time),
                RAINBOW_SATURATION,
                RAINBOW_LIGHTNESS,
            )
        } else {
            self.config.grid_color
        }
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, size: Vec2, pointer: Vec2) {
        canvas.save();
        canvas.set_global_alpha(self.config.opacity);
        canvas.set_line_width(self.config.grid_thickness / RIPPLE_THICKNESS_DIVISOR);
        for node in lattice(size, self.config.grid_size) {
            let d = self.distortion_at(node, pointer);
            let color = self.color_at(node);
            let x = node.x + d;
            let y = node.y + d;
            canvas.stroke_line(Vec2::new(x, 0.0), Vec2::new(x, size.y), color);
            canvas.stroke_line(Vec2::new(0.0, y), Vec2::new(size.x, y), color);
        }
        canvas.restore();
    }
}

impl Generator for RippleGrid {
    fn name(&self) -> &'static str {
        "ripple-grid"
    }

    fn pointer_scope(&self) -> Option<PointerScope> {
        self.interactive.then_some(PointerScope::Surface)
    }

    fn disable_pointer(&mut self) {
        self.interactive = false;
    }

    fn tick(
        &mut self,
        time: &FrameTime,
        pointer: Vec2,
        canvas: &mut dyn Canvas,
        size: Vec2,
    ) -> Result<()> {
        self.advance(time.step);
        self.draw(canvas, size, pointer * size);
        Ok(())
    }
}
