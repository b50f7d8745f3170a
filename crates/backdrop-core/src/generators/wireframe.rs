use super::Generator;
use crate::canvas::Canvas;
use crate::clock::FrameTime;
use crate::color::Rgba;
use crate::constants::*;
use crate::error::Result;
use glam::Vec2;
use serde::Deserialize;

/// The rotator has no options; unknown fields are ignored.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct WireframeConfig {}

pub const WIREFRAME_STROKE: Rgba = Rgba::rgb(
    WIREFRAME_COLOR[0],
    WIREFRAME_COLOR[1],
    WIREFRAME_COLOR[2],
);

/// Two offset squares joined at the corners, spinning about the surface
/// centre.
pub struct WireframeRotator {
    angle: f32,
}

impl WireframeRotator {
    pub fn new(_config: WireframeConfig) -> Self {
        Self { angle: 0.0 }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn advance(&mut self, step: f32) {
        self.angle += WIREFRAME_ROTATION_PER_FRAME * step;
    }

    /// Corners of the front and back squares, relative to the rotation
    /// centre, in drawing order.
    pub fn corners() -> ([Vec2; 4], [Vec2; 4]) {
        let h = WIREFRAME_SIZE / 2.0;
        let o = WIREFRAME_DEPTH_OFFSET;
        let square = |shift: f32| {
            [
                Vec2::new(-h + shift, -h + shift),
                Vec2::new(h + shift, -h + shift),
                Vec2::new(h + shift, h + shift),
                Vec2::new(-h + shift, h + shift),
            ]
        };
        (square(0.0), square(o))
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, size: Vec2) {
        let (front, back) = Self::corners();
        let side = Vec2::splat(WIREFRAME_SIZE);

        canvas.save();
        canvas.translate(size / 2.0);
        canvas.rotate(self.angle);
        canvas.set_line_width(WIREFRAME_LINE_WIDTH);
        canvas.stroke_rect(front[0], side, WIREFRAME_STROKE);
        canvas.stroke_rect(back[0], side, WIREFRAME_STROKE);
        for (a, b) in front.iter().zip(back.iter()) {
            canvas.stroke_line(*a, *b, WIREFRAME_STROKE);
        }
        canvas.restore();
    }
}

impl Generator for WireframeRotator {
    fn name(&self) -> &'static str {
        "wireframe"
    }

    fn tick(
        &mut self,
        time: &FrameTime,
        _pointer: Vec2,
        canvas: &mut dyn Canvas,
        size: Vec2,
    ) -> Result<()> {
        self.advance(time.step);
        self.draw(canvas, size);
        Ok(())
    }
}
