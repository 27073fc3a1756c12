//! CLI enum types for glyph mode and character set options.

use clap::ValueEnum;

use crate::ascii;

/// How pixels become glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorModeArg {
    Grayscale,
    Inverted,
    #[default]
    Color,
}

impl From<ColorModeArg> for ascii::ColorMode {
    fn from(m: ColorModeArg) -> Self {
        match m {
            ColorModeArg::Grayscale => ascii::ColorMode::Grayscale,
            ColorModeArg::Inverted => ascii::ColorMode::Inverted,
            ColorModeArg::Color => ascii::ColorMode::Color,
        }
    }
}

/// ASCII character set for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    #[default]
    Standard,
    Blocks,
    Minimal,
}

impl From<CharacterSet> for ascii::CharSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Standard => ascii::CharSet::Standard,
            CharacterSet::Blocks => ascii::CharSet::Blocks,
            CharacterSet::Minimal => ascii::CharSet::Minimal,
        }
    }
}
