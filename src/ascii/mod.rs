//! Glyph mapping for converting images to terminal text.
//!
//! This module turns raster pixels into rows of glyphs:
//!
//! 1. **Character sets** - ordered glyph ramps from densest to sparsest
//! 2. **Dimensions** - character grid size for a source image
//! 3. **Glyph mapping** - one RGB sample to one glyph, optionally colorized
//! 4. **Rows** - a whole RGBA canvas to one string per scanline
//!
//! # Character Sets
//!
//! Multiple character sets are available via [`CharSet`]:
//! - `Standard` - 10-level ASCII density ramp
//! - `Blocks` - Unicode block characters
//! - `Minimal` - 5-level clean look
//!
//! None of the ramps contain ASCII digits, which keeps run counts written by
//! the line codec unambiguous.

mod charset;
mod dimensions;
mod mapping;
mod rows;

pub use charset::{CharSet, BLOCKS_CHARSET, MINIMAL_CHARSET, STANDARD_CHARSET};
pub use dimensions::{calculate_dimensions, DEFAULT_CHAR_ASPECT};
pub use mapping::{glyph_index, pixel_to_glyph, push_glyph, ColorMode, Rgb, RESET_ESCAPE};
pub use rows::image_to_rows;
