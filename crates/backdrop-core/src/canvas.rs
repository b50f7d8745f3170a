//! Drawing backend abstraction.
//!
//! Generators only ever talk to `dyn Canvas`; the web front-end implements it
//! on top of `CanvasRenderingContext2d` and `RecordingCanvas` (the `testing`
//! feature) implements it for headless use and tests. Coordinates are surface pixels
//! with the origin at the top-left corner.

use crate::color::{BlendMode, Rgba};
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

impl ColorStop {
    pub const fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

/// Fill source for [`Canvas::fill_rect`].
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Rgba),
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<ColorStop>,
    },
    Radial {
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        stops: Vec<ColorStop>,
    },
}

/// Immediate-mode 2D drawing context with canvas-style state
/// (transform, global alpha, composite mode, line width) that is saved and
/// restored as a stack.
pub trait Canvas {
    /// Set the backing buffer to `width`×`height` pixels.
    fn resize(&mut self, width: u32, height: u32);
    /// Wipe a `width`×`height` region at the origin to transparent.
    fn clear(&mut self, width: f32, height: f32);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, offset: Vec2);
    fn rotate(&mut self, radians: f32);

    fn set_global_alpha(&mut self, alpha: f32);
    fn set_blend_mode(&mut self, mode: BlendMode);
    fn set_line_width(&mut self, width: f32);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba);
    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);
}
