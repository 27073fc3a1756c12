//! Character set definitions for glyph mapping.

use serde::{Deserialize, Serialize};

/// Standard ASCII density ramp (10 levels).
/// Characters ordered from densest (@) to sparsest (space).
pub const STANDARD_CHARSET: &[char] = &['@', '%', '#', '*', '+', '=', '-', ':', '.', ' '];

/// Block character set (5 levels).
/// Uses Unicode block characters for higher perceived resolution.
pub const BLOCKS_CHARSET: &[char] = &['█', '▓', '▒', '░', ' '];

/// Minimal character set (5 levels).
/// Clean, less noisy look.
pub const MINIMAL_CHARSET: &[char] = &['#', '+', ':', '.', ' '];

/// Character set used when mapping brightness to glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharSet {
    /// Standard ASCII density ramp (10 levels)
    #[default]
    Standard,
    /// Block character set (5 levels) using Unicode blocks
    Blocks,
    /// Minimal character set (5 levels) for a clean look
    Minimal,
}

impl CharSet {
    /// Get the character slice for this charset, densest glyph first.
    pub fn chars(&self) -> &'static [char] {
        match self {
            CharSet::Standard => STANDARD_CHARSET,
            CharSet::Blocks => BLOCKS_CHARSET,
            CharSet::Minimal => MINIMAL_CHARSET,
        }
    }

    /// Get a human-readable name for the charset.
    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Standard => "standard",
            CharSet::Blocks => "blocks",
            CharSet::Minimal => "minimal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charsets_contain_no_digits() {
        for charset in [CharSet::Standard, CharSet::Blocks, CharSet::Minimal] {
            assert!(
                !charset.chars().iter().any(|c| c.is_ascii_digit()),
                "{} charset must not contain digits",
                charset.name()
            );
        }
    }

    #[test]
    fn test_charsets_end_with_space() {
        for charset in [CharSet::Standard, CharSet::Blocks, CharSet::Minimal] {
            assert_eq!(charset.chars().last(), Some(&' '));
        }
    }

    #[test]
    fn test_charset_default_is_standard() {
        assert_eq!(CharSet::default(), CharSet::Standard);
        assert_eq!(CharSet::default().chars().len(), 10);
    }
}
