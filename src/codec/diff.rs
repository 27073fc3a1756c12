//! Temporal diff of animation frames.
//!
//! The first frame is stored as-is. Every later frame stores, per row, either
//! [`DIFF_SENTINEL`] when the row is unchanged from the previous frame or the
//! row itself when it changed.

use super::error::CodecError;
use super::payload::pad_frames;

/// Stored in place of a row equal to the same row of the previous frame.
pub const DIFF_SENTINEL: &str = "=";

/// Encode frames as a base frame plus per-row deltas.
///
/// Frames are first padded to a common height (blank rows prepended), so the
/// result decodes to the padded frames.
///
/// # Errors
/// Returns [`CodecError::EncodeInput`] when there are no frames, a frame has
/// no rows, or a row is literally the sentinel.
pub fn diff_encode(frames: &[Vec<String>]) -> Result<Vec<Vec<String>>, CodecError> {
    if frames.is_empty() {
        return Err(CodecError::EncodeInput("animation has no frames".to_string()));
    }
    if let Some(i) = frames.iter().position(Vec::is_empty) {
        return Err(CodecError::EncodeInput(format!("frame {} has no rows", i)));
    }
    if let Some(i) = frames
        .iter()
        .position(|rows| rows.iter().any(|row| row == DIFF_SENTINEL))
    {
        return Err(CodecError::EncodeInput(format!(
            "frame {} contains a row equal to the diff sentinel",
            i
        )));
    }

    let mut padded = frames.to_vec();
    pad_frames(&mut padded);

    let mut encoded = Vec::with_capacity(padded.len());
    encoded.push(padded[0].clone());
    for pair in padded.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);
        let delta = current
            .iter()
            .zip(prev)
            .map(|(row, prev_row)| {
                if row == prev_row {
                    DIFF_SENTINEL.to_string()
                } else {
                    row.clone()
                }
            })
            .collect();
        encoded.push(delta);
    }

    Ok(encoded)
}

/// Replay per-row deltas into full frames, then pad to a common height.
///
/// A sentinel with no matching row in the previous frame (only possible in
/// files written by other tools) becomes an empty row.
pub fn diff_decode(mut frames: Vec<Vec<String>>) -> Vec<Vec<String>> {
    for i in 1..frames.len() {
        let (done, rest) = frames.split_at_mut(i);
        let prev = &done[i - 1];
        for (j, row) in rest[0].iter_mut().enumerate() {
            if row == DIFF_SENTINEL {
                *row = prev.get(j).cloned().unwrap_or_default();
            }
        }
    }

    pad_frames(&mut frames);
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rows(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_diff_frames() {
        let frames = vec![rows(&["ABC", "DEF"]), rows(&["ABX", "DEF"])];
        let encoded = diff_encode(&frames).unwrap();
        assert_eq!(encoded[0], rows(&["ABC", "DEF"]));
        assert_eq!(encoded[1], rows(&["ABX", "="]));
    }

    #[test]
    fn test_apply_diff() {
        let frames = vec![rows(&["ABC", "DEF"]), rows(&["==X", "="])];
        let full = diff_decode(frames);
        assert_eq!(full, vec![rows(&["ABC", "DEF"]), rows(&["==X", "DEF"])]);
    }

    #[test]
    fn test_diff_chains_through_unchanged_frames() {
        let frames = vec![rows(&["A", "B"]), rows(&["A", "B"]), rows(&["C", "B"])];
        let encoded = diff_encode(&frames).unwrap();
        assert_eq!(encoded[1], rows(&["=", "="]));
        assert_eq!(encoded[2], rows(&["C", "="]));
        assert_eq!(diff_decode(encoded), frames);
    }

    #[test]
    fn test_diff_pads_shorter_frames_at_top() {
        let frames = vec![rows(&["AA", "BB", "CC"]), rows(&["CC"])];
        let encoded = diff_encode(&frames).unwrap();
        assert_eq!(encoded[1], rows(&["", "", "="]));
        assert_eq!(
            diff_decode(encoded),
            vec![rows(&["AA", "BB", "CC"]), rows(&["", "", "CC"])]
        );
    }

    #[test]
    fn test_diff_rejects_empty_input() {
        assert!(matches!(diff_encode(&[]), Err(CodecError::EncodeInput(_))));
        assert!(matches!(
            diff_encode(&[rows(&["A"]), Vec::new()]),
            Err(CodecError::EncodeInput(_))
        ));
    }

    #[test]
    fn test_diff_rejects_sentinel_rows() {
        let frames = vec![rows(&["="])];
        assert!(matches!(diff_encode(&frames), Err(CodecError::EncodeInput(_))));
    }

    #[test]
    fn test_decode_sentinel_without_previous_row() {
        let frames = vec![rows(&["A"]), rows(&["B", "="])];
        let full = diff_decode(frames);
        assert_eq!(full, vec![rows(&["", "A"]), rows(&["B", ""])]);
    }
}
