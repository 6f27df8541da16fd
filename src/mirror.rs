//! Camera-frame to ASCII rendering for `mirror`. Each pixel's average
//! brightness picks a character from the variant's density ramp.

use crate::error::TerminalError;
use crate::model::MirrorVariant;

pub const CAMERA_DENIED: &str =
    "Camera access failed. Please allow camera permissions and try again.";

/// One RGBA frame, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, TerminalError> {
        let expected = (width as usize) * (height as usize) * 4;
        if rgba.len() != expected {
            return Err(TerminalError::Resource {
                message: format!(
                    "frame is {} bytes, expected {expected} for {width}x{height}",
                    rgba.len()
                ),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// A moving diagonal gradient, for hosts without a camera. `phase` shifts
    /// the gradient so successive frames differ.
    #[allow(clippy::cast_possible_truncation)]
    pub fn test_pattern(width: u32, height: u32, phase: u32) -> Self {
        let span = u64::from(width.max(1)) + u64::from(height.max(1));
        let mut rgba = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for y in 0..height {
            for x in 0..width {
                let pos = (u64::from(x) + u64::from(y) + u64::from(phase)) % span;
                // pos < span, so the scaled value fits in a byte
                let v = (pos * 255 / span) as u8;
                rgba.extend_from_slice(&[v, v, v, 255]);
            }
        }
        Self {
            width,
            height,
            rgba,
        }
    }
}

/// Density index for an average brightness in `[0, 255]`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn density_index(avg: f64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let scaled = (avg.clamp(0.0, 255.0) / 255.0 * len as f64).floor() as usize;
    scaled.min(len - 1)
}

/// Render a frame as text, one line per pixel row.
pub fn render_ascii(frame: &Frame, variant: MirrorVariant) -> String {
    let ramp: Vec<char> = variant.density().chars().collect();
    let row_bytes = (frame.width as usize) * 4;
    if row_bytes == 0 {
        return String::new();
    }

    frame
        .rgba
        .chunks_exact(row_bytes)
        .map(|row| {
            row.chunks_exact(4)
                .map(|px| {
                    let (r, g, b) = match px {
                        [r, g, b, _] => (f64::from(*r), f64::from(*g), f64::from(*b)),
                        _ => (0.0, 0.0, 0.0),
                    };
                    let idx = density_index((r + g + b) / 3.0, ramp.len());
                    ramp.get(idx).copied().unwrap_or(' ')
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, value: u8) -> Frame {
        let rgba = std::iter::repeat([value, value, value, 255])
            .take((width * height) as usize)
            .flatten()
            .collect();
        Frame::new(width, height, rgba).unwrap()
    }

    #[test]
    fn black_maps_to_first_char() {
        let text = render_ascii(&solid(3, 2, 0), MirrorVariant::V3);
        assert_eq!(text, "ÑÑÑ\nÑÑÑ");
    }

    #[test]
    fn white_clamps_to_last_char() {
        let text = render_ascii(&solid(2, 1, 255), MirrorVariant::V1);
        assert_eq!(text, "██");
    }

    #[test]
    fn index_formula() {
        // v2 ramp has 18 characters
        assert_eq!(density_index(0.0, 18), 0);
        assert_eq!(density_index(127.5, 18), 9);
        assert_eq!(density_index(255.0, 18), 17);
        assert_eq!(density_index(300.0, 18), 17);
        assert_eq!(density_index(10.0, 0), 0);
    }

    #[test]
    fn mixed_channels_average() {
        // (255 + 0 + 0) / 3 = 85 -> floor(85/255*14) = 4 -> still a space in v1
        let frame = Frame::new(1, 1, vec![255, 0, 0, 255]).unwrap();
        assert_eq!(render_ascii(&frame, MirrorVariant::V1), " ");
    }

    #[test]
    fn rejects_short_buffer() {
        assert!(Frame::new(2, 2, vec![0; 15]).is_err());
    }

    #[test]
    fn test_pattern_has_requested_shape() {
        let frame = Frame::test_pattern(24, 16, 3);
        let text = render_ascii(&frame, MirrorVariant::V2);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 16);
        assert!(lines.iter().all(|l| l.chars().count() == 24));
        assert_ne!(frame, Frame::test_pattern(24, 16, 4));
    }

    #[test]
    fn empty_frame_renders_nothing() {
        assert_eq!(render_ascii(&Frame::test_pattern(0, 0, 0), MirrorVariant::V1), "");
    }
}
