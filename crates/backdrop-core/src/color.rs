//! CSS-compatible colors and canvas composite modes.
//!
//! Options arrive from JavaScript as CSS strings (`"#5227FF"`, `"purple"`,
//! `"hsl(200 70% 60%)"`, `"lighten"`), so both types deserialize from a
//! string and render back to the form `CanvasRenderingContext2d` expects.
//! Color syntax is delegated to `csscolorparser`.

use crate::error::{BackdropError, Result};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// 8-bit RGB with a floating alpha in \[0, 1\].
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const TRANSPARENT: Rgba = Rgba::rgba(0, 0, 0, 0.0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Convert from HSL. `hue_deg` wraps; saturation and lightness are
    /// fractions in \[0, 1\].
    pub fn from_hsl(hue_deg: f32, saturation: f32, lightness: f32) -> Self {
        let h = hue_deg.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        Self::rgb(channel(r1 + m), channel(g1 + m), channel(b1 + m))
    }

    pub fn to_css(&self) -> String {
        if self.a >= 1.0 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
        }
    }
}

#[inline]
fn channel(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl FromStr for Rgba {
    type Err = BackdropError;

    /// Accepts any CSS color string: hex, named colors and the functional
    /// `rgb()`/`hsl()`/`hwb()` forms in comma or space syntax.
    fn from_str(s: &str) -> Result<Self> {
        let color = csscolorparser::parse(s.trim())
            .map_err(|_| BackdropError::InvalidColor(s.to_string()))?;
        let [r, g, b, _] = color.to_rgba8();
        Ok(Self::rgb(r, g, b).with_alpha(color.a as f32))
    }
}

impl TryFrom<String> for Rgba {
    type Error = BackdropError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Composite operations accepted for the spotlight pass.
///
/// Names follow `globalCompositeOperation`; `normal` is accepted as an alias
/// of `source-over` since option values are usually written as CSS
/// `mix-blend-mode` keywords.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum BlendMode {
    #[default]
    SourceOver,
    Lighten,
    Darken,
    Screen,
    Multiply,
    Overlay,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Lighter,
}

impl BlendMode {
    pub const ALL: [BlendMode; 13] = [
        BlendMode::SourceOver,
        BlendMode::Lighten,
        BlendMode::Darken,
        BlendMode::Screen,
        BlendMode::Multiply,
        BlendMode::Overlay,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Lighter,
    ];

    pub fn as_css(self) -> &'static str {
        match self {
            BlendMode::SourceOver => "source-over",
            BlendMode::Lighten => "lighten",
            BlendMode::Darken => "darken",
            BlendMode::Screen => "screen",
            BlendMode::Multiply => "multiply",
            BlendMode::Overlay => "overlay",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::ColorBurn => "color-burn",
            BlendMode::HardLight => "hard-light",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
            BlendMode::Lighter => "lighter",
        }
    }
}

impl FromStr for BlendMode {
    type Err = BackdropError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        if name == "normal" {
            return Ok(BlendMode::SourceOver);
        }
        BlendMode::ALL
            .into_iter()
            .find(|m| m.as_css() == name)
            .ok_or_else(|| BackdropError::UnknownBlendMode(s.to_string()))
    }
}

impl TryFrom<String> for BlendMode {
    type Error = BackdropError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
