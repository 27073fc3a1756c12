//! Whole-item encode and decode: glyph rows in, container out, and back.

use super::container::{Container, Metadata};
use super::diff::{diff_decode, diff_encode};
use super::error::CodecError;
use super::line::{compress, unpack};
use super::payload::{join_frames, pad_frames, split_frames};

/// Payload settings for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Run-length encode rows
    pub compress: bool,
    /// Minimum run length written as a count
    pub threshold: usize,
    /// Store frames after the first as per-row deltas
    pub diff: bool,
    /// Rows carry color escapes
    pub color: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            compress: true,
            threshold: 3,
            diff: true,
            color: true,
        }
    }
}

/// Encode glyph frames into a container.
///
/// A single frame without delays is written as a still: no diff and no
/// delay list, whatever `options.diff` says. Anything else is an animation
/// and records `delays`.
///
/// # Errors
/// [`CodecError::EncodeInput`] when there are no frames, a frame has no rows,
/// or (with diff enabled) a row equals the diff sentinel.
pub fn encode_frames(
    frames: &[Vec<String>],
    delays: Option<Vec<u32>>,
    options: EncodeOptions,
) -> Result<Container, CodecError> {
    if frames.is_empty() {
        return Err(CodecError::EncodeInput("animation has no frames".to_string()));
    }
    if let Some(i) = frames.iter().position(Vec::is_empty) {
        return Err(CodecError::EncodeInput(format!("frame {} has no rows", i)));
    }

    let still = frames.len() == 1 && delays.is_none();
    let diff = options.diff && !still;

    let mut stored = if diff {
        diff_encode(frames)?
    } else {
        let mut padded = frames.to_vec();
        pad_frames(&mut padded);
        padded
    };

    for row in stored.iter_mut().flatten() {
        *row = compress(row, options.compress, options.threshold);
    }

    let metadata = Metadata {
        compressed: options.compress,
        diff,
        color: options.color,
        delays: if still { None } else { delays },
    };
    Ok(Container::new(metadata, join_frames(&stored)))
}

/// Rebuild full frames from a decoded container.
///
/// Rows are unpacked first, then deltas are replayed, so a sentinel written
/// through the run-length coder is still recognised.
pub fn decode_frames(container: &Container) -> Vec<Vec<String>> {
    let mut frames = split_frames(&container.payload);

    if container.metadata.compressed {
        for row in frames.iter_mut().flatten() {
            *row = unpack(row);
        }
    }

    if container.metadata.diff {
        diff_decode(frames)
    } else {
        pad_frames(&mut frames);
        frames
    }
}
