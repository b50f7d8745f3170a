//! `Canvas` on top of `CanvasRenderingContext2d`.

use crate::constants::CONTEXT_2D;
use crate::dom;
use backdrop_core::{BackdropError, BlendMode, Canvas, Paint, Rgba, SurfaceHost};
use glam::Vec2;
use std::f64::consts::TAU;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A canvas stretched over its container.
///
/// The backing size follows the canvas element's own layout box, the same
/// box pointer positions are measured against, so the two agree even when
/// the container has borders, padding or a static position.
pub struct CanvasHost {
    canvas: web::HtmlCanvasElement,
}

impl CanvasHost {
    pub fn new(canvas: web::HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl SurfaceHost for CanvasHost {
    type Canvas = WebCanvas;

    fn container_size(&self) -> Option<(u32, u32)> {
        dom::layout_size(&self.canvas)
    }

    fn acquire_canvas(&mut self) -> backdrop_core::Result<WebCanvas> {
        let ctx = self
            .canvas
            .get_context(CONTEXT_2D)
            .map_err(|e| BackdropError::SurfaceUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| BackdropError::SurfaceUnavailable("no 2d context".to_string()))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| BackdropError::SurfaceUnavailable("not a 2d context".to_string()))?;
        Ok(WebCanvas {
            canvas: self.canvas.clone(),
            ctx,
        })
    }
}

pub struct WebCanvas {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl WebCanvas {
    fn set_fill(&self, paint: &Paint) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(&color.to_css()),
            Paint::Linear { from, to, stops } => {
                let gradient = self.ctx.create_linear_gradient(
                    from.x as f64,
                    from.y as f64,
                    to.x as f64,
                    to.y as f64,
                );
                add_stops(&gradient, stops);
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
            Paint::Radial {
                center,
                inner_radius,
                outer_radius,
                stops,
            } => {
                match self.ctx.create_radial_gradient(
                    center.x as f64,
                    center.y as f64,
                    *inner_radius as f64,
                    center.x as f64,
                    center.y as f64,
                    *outer_radius as f64,
                ) {
                    Ok(gradient) => {
                        add_stops(&gradient, stops);
                        self.ctx.set_fill_style_canvas_gradient(&gradient);
                    }
                    // Negative or non-finite radii; draw nothing visible.
                    Err(_) => self.ctx.set_fill_style_str(&Rgba::TRANSPARENT.to_css()),
                }
            }
        }
    }
}

fn add_stops(gradient: &web::CanvasGradient, stops: &[backdrop_core::ColorStop]) {
    for stop in stops {
        _ = gradient.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_css());
    }
}

impl Canvas for WebCanvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        _ = self.ctx.translate(offset.x as f64, offset.y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        _ = self.ctx.rotate(radians as f64);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        _ = self.ctx.set_global_composite_operation(mode.as_css());
    }

    fn set_line_width(&mut self, width: f32) {
        self.ctx.set_line_width(width as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.ctx.begin_path();
        if self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU)
            .is_err()
        {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, paint: &Paint) {
        self.set_fill(paint);
        self.ctx
            .fill_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.stroke();
    }

    fn stroke_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx
            .stroke_rect(origin.x as f64, origin.y as f64, size.x as f64, size.y as f64);
    }
}
