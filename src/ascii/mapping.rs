//! Color sample to glyph mapping.

use serde::{Deserialize, Serialize};

/// SGR reset sequence written after every colorized glyph.
pub const RESET_ESCAPE: &str = "\x1b[0m";

/// An opaque RGB color sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex color. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// How a color sample is turned into a glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorMode {
    /// Dark samples map to dense glyphs
    Grayscale,
    /// Dark samples map to sparse glyphs (for light terminals)
    Inverted,
    /// Grayscale glyph wrapped in a 24-bit foreground color escape
    #[default]
    Color,
}

impl ColorMode {
    /// Whether glyphs produced in this mode carry color escapes.
    pub fn is_color(&self) -> bool {
        matches!(self, ColorMode::Color)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColorMode::Grayscale => "grayscale",
            ColorMode::Inverted => "inverted",
            ColorMode::Color => "color",
        }
    }
}

/// Quantize the mean brightness of a sample into one of `levels` buckets.
///
/// Computes `floor(mean(r, g, b) / 255 * (levels - 1))` with integer math and
/// clamps the result to the valid index range.
#[inline]
pub fn glyph_index(rgb: Rgb, levels: usize) -> usize {
    if levels == 0 {
        return 0;
    }
    let sum = usize::from(rgb.r) + usize::from(rgb.g) + usize::from(rgb.b);
    (sum * (levels - 1) / (3 * 255)).min(levels - 1)
}

/// Append the glyph for one sample to `out`, reusing the caller's buffer.
///
/// `charset` is ordered densest first. An empty charset produces a space.
pub fn push_glyph(out: &mut String, rgb: Rgb, mode: ColorMode, charset: &[char]) {
    if charset.is_empty() {
        out.push(' ');
        return;
    }

    let idx = glyph_index(rgb, charset.len());
    match mode {
        ColorMode::Grayscale => out.push(charset[idx]),
        ColorMode::Inverted => out.push(charset[charset.len() - 1 - idx]),
        ColorMode::Color => out.push_str(&format!(
            "\x1b[38;2;{};{};{}m{}{}",
            rgb.r, rgb.g, rgb.b, charset[idx], RESET_ESCAPE
        )),
    }
}

/// Map one sample to its glyph text.
pub fn pixel_to_glyph(rgb: Rgb, mode: ColorMode, charset: &[char]) -> String {
    let mut out = String::new();
    push_glyph(&mut out, rgb, mode, charset);
    out
}
