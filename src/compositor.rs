//! Disposal-aware compositing of animation frames onto a persistent canvas.
//!
//! Source animations (GIF) store partial frames: a sub-rectangle at an
//! offset, possibly transparent, plus a rule saying how the canvas is reset
//! before the next frame. The [`Compositor`] replays those rules and hands
//! back one full-size opaque canvas per source frame.

use image::{Rgba, RgbaImage};

use crate::ascii::Rgb;

/// Default display duration for frames whose source gives none.
pub const DEFAULT_DELAY_MS: u32 = 120;

/// How the canvas is reset after a frame has been shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Disposal {
    /// Leave the canvas as composited
    #[default]
    None,
    /// Fill the whole canvas with the background color
    RestoreBackground,
    /// Return to the canvas as it was before the frame was drawn
    RestorePrevious,
}

/// One undecoded-to-canvas source frame.
#[derive(Debug, Clone)]
pub struct RawFrame {
    /// RGBA pixels, row-major, `width * height * 4` bytes
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Offset of the frame's top-left corner on the canvas
    pub left: u32,
    pub top: u32,
    pub disposal: Disposal,
    pub delay_ms: u32,
}

impl RawFrame {
    /// A full-canvas frame at the origin that is never disposed.
    pub fn full(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
            left: 0,
            top: 0,
            disposal: Disposal::None,
            delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

/// Encoder-local compositing state for one animation.
#[derive(Debug)]
pub struct Compositor {
    canvas: RgbaImage,
    background: Rgba<u8>,
    /// Canvas before the last frame was drawn, kept only when that frame
    /// asked to be restored to it
    previous: Option<RgbaImage>,
    last_disposal: Disposal,
}

impl Compositor {
    /// Create a canvas filled with the opaque background color.
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let background = Rgba([background.r, background.g, background.b, 255]);
        Self {
            canvas: RgbaImage::from_pixel(width, height, background),
            background,
            previous: None,
            last_disposal: Disposal::None,
        }
    }

    /// Current canvas contents.
    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Apply the previous frame's disposal, draw `frame`, and return a
    /// snapshot of the result.
    pub fn push(&mut self, frame: &RawFrame) -> RgbaImage {
        match self.last_disposal {
            Disposal::None => {}
            Disposal::RestoreBackground => {
                let background = self.background;
                self.canvas.pixels_mut().for_each(|p| *p = background);
            }
            Disposal::RestorePrevious => {
                if let Some(previous) = self.previous.take() {
                    self.canvas = previous;
                }
            }
        }

        self.previous = match frame.disposal {
            Disposal::RestorePrevious => Some(self.canvas.clone()),
            _ => None,
        };
        self.blend(frame);
        self.last_disposal = frame.disposal;

        self.canvas.clone()
    }

    /// Source-over blend of `frame` at its offset; pixels outside the canvas
    /// are clipped.
    fn blend(&mut self, frame: &RawFrame) {
        if frame.width == 0 {
            return;
        }
        let (canvas_w, canvas_h) = self.canvas.dimensions();

        for (i, src) in frame.pixels.chunks_exact(4).enumerate() {
            let i = i as u32;
            let (fx, fy) = (i % frame.width, i / frame.width);
            if fy >= frame.height {
                break;
            }
            let (x, y) = (frame.left + fx, frame.top + fy);
            if x >= canvas_w || y >= canvas_h {
                continue;
            }

            let src_a = u32::from(src[3]);
            if src_a == 0 {
                continue;
            }
            let dst = self.canvas.get_pixel_mut(x, y);
            if src_a == 255 {
                *dst = Rgba([src[0], src[1], src[2], 255]);
                continue;
            }

            // out = src * a + dst * (1 - a)
            let inv_a = 255 - src_a;
            for c in 0..3 {
                let mixed = u32::from(src[c]) * src_a + u32::from(dst[c]) * inv_a;
                dst[c] = ((mixed + 127) / 255) as u8;
            }
            dst[3] = (src_a + u32::from(dst[3]) * inv_a / 255).min(255) as u8;
        }
    }
}

/// Composite a whole animation.
///
/// # Returns
/// One opaque `width x height` canvas per input frame, and the frames'
/// durations in order.
pub fn composite_frames(
    frames: &[RawFrame],
    width: u32,
    height: u32,
    background: Rgb,
) -> (Vec<RgbaImage>, Vec<u32>) {
    let mut compositor = Compositor::new(width, height, background);
    let canvases = frames.iter().map(|f| compositor.push(f)).collect();
    let delays = frames.iter().map(|f| f.delay_ms).collect();
    (canvases, delays)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgb = Rgb::new(0, 0, 0);

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        rgba.repeat((width * height) as usize)
    }

    fn frame(pixels: Vec<u8>, w: u32, h: u32, left: u32, top: u32, disposal: Disposal) -> RawFrame {
        RawFrame {
            pixels,
            width: w,
            height: h,
            left,
            top,
            disposal,
            delay_ms: 100,
        }
    }

    #[test]
    fn test_canvas_starts_with_background() {
        let compositor = Compositor::new(2, 2, Rgb::new(10, 20, 30));
        assert!(compositor.canvas().pixels().all(|p| p.0 == [10, 20, 30, 255]));
    }

    #[test]
    fn test_partial_frame_at_offset() {
        let mut compositor = Compositor::new(3, 3, BLACK);
        let out = compositor.push(&frame(solid(1, 1, [255, 0, 0, 255]), 1, 1, 2, 1, Disposal::None));
        assert_eq!(out.get_pixel(2, 1).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_out_of_bounds_pixels_are_clipped() {
        let mut compositor = Compositor::new(2, 2, BLACK);
        let out = compositor.push(&frame(solid(2, 2, [0, 255, 0, 255]), 2, 2, 1, 1, Disposal::None));
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(out.get_pixel(1, 1).0, [0, 255, 0, 255]);
        assert_eq!(out.get_pixel(0, 1).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_transparent_pixels_keep_canvas() {
        let mut compositor = Compositor::new(1, 1, BLACK);
        compositor.push(&frame(solid(1, 1, [200, 0, 0, 255]), 1, 1, 0, 0, Disposal::None));
        let out = compositor.push(&frame(solid(1, 1, [0, 0, 255, 0]), 1, 1, 0, 0, Disposal::None));
        assert_eq!(out.get_pixel(0, 0).0, [200, 0, 0, 255]);
    }

    #[test]
    fn test_half_alpha_blends() {
        let mut compositor = Compositor::new(1, 1, BLACK);
        let out = compositor.push(&frame(solid(1, 1, [255, 255, 255, 128]), 1, 1, 0, 0, Disposal::None));
        // 255 * 128 / 255 rounds to 128
        assert_eq!(out.get_pixel(0, 0).0, [128, 128, 128, 255]);
    }

    #[test]
    fn test_restore_background_clears_whole_canvas() {
        let mut compositor = Compositor::new(2, 1, BLACK);
        compositor.push(&frame(solid(2, 1, [255, 0, 0, 255]), 2, 1, 0, 0, Disposal::RestoreBackground));
        let out = compositor.push(&frame(solid(1, 1, [0, 255, 0, 255]), 1, 1, 1, 0, Disposal::None));
        assert_eq!(out.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_restore_previous_rewinds_canvas() {
        let mut compositor = Compositor::new(2, 1, BLACK);
        compositor.push(&frame(solid(1, 1, [255, 0, 0, 255]), 1, 1, 0, 0, Disposal::None));
        let overlay = compositor.push(&frame(solid(2, 1, [0, 0, 255, 255]), 2, 1, 0, 0, Disposal::RestorePrevious));
        assert_eq!(overlay.get_pixel(0, 0).0, [0, 0, 255, 255]);

        let out = compositor.push(&frame(solid(1, 1, [0, 255, 0, 255]), 1, 1, 1, 0, Disposal::None));
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_keep_disposal_accumulates() {
        let mut compositor = Compositor::new(2, 1, BLACK);
        compositor.push(&frame(solid(1, 1, [255, 0, 0, 255]), 1, 1, 0, 0, Disposal::None));
        let out = compositor.push(&frame(solid(1, 1, [0, 255, 0, 255]), 1, 1, 1, 0, Disposal::None));
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [0, 255, 0, 255]);
    }

    #[test]
    fn test_frame_count_matches_for_any_disposal_mix() {
        let disposals = [
            Disposal::None,
            Disposal::RestorePrevious,
            Disposal::RestoreBackground,
            Disposal::RestorePrevious,
            Disposal::None,
            Disposal::RestoreBackground,
        ];
        let frames: Vec<RawFrame> = disposals
            .iter()
            .enumerate()
            .map(|(i, d)| frame(solid(1, 1, [i as u8 * 40, 0, 0, 255]), 1, 1, (i % 3) as u32, 0, *d))
            .collect();

        let (canvases, delays) = composite_frames(&frames, 3, 2, BLACK);
        assert_eq!(canvases.len(), frames.len());
        assert_eq!(delays, vec![100; frames.len()]);
        assert!(canvases.iter().all(|c| c.dimensions() == (3, 2)));
        assert!(canvases.iter().all(|c| c.pixels().all(|p| p[3] == 255)));
    }

    #[test]
    fn test_empty_animation() {
        let (canvases, delays) = composite_frames(&[], 4, 4, BLACK);
        assert!(canvases.is_empty());
        assert!(delays.is_empty());
    }
}
