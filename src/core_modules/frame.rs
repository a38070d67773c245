// THEORY:
// The `frame` module is the preprocessing stage that sits between the camera and
// the cascade. Every raw capture goes through the same two steps:
// 1.  **Bounded Size**: The frame is scaled to a fixed width with its aspect ratio
//     kept, so per-frame detection cost does not depend on the camera resolution.
// 2.  **Single Channel**: The cascade works on intensity only. The luma weights are
//     the BT.601 ones in 14-bit fixed point, which is what the cascade models were
//     trained against, so the grayscale frame matches what OpenCV would produce.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbImage};

const LUMA_SHIFT: u32 = 14;
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;

/// Scales `frame` to `width` pixels wide, keeping its aspect ratio.
///
/// The new height is `floor(height * width / original_width)`, never less than 1.
pub fn resize_to_width(frame: &RgbImage, width: u32) -> RgbImage {
    let (original_width, original_height) = frame.dimensions();
    if original_width == 0 || original_height == 0 || original_width == width {
        return frame.clone();
    }
    let height = (u64::from(original_height) * u64::from(width) / u64::from(original_width)).max(1);
    imageops::resize(frame, width, height as u32, FilterType::Triangle)
}

/// Converts an RGB frame to a single-channel intensity image.
pub fn to_luma(frame: &RgbImage) -> GrayImage {
    GrayImage::from_fn(frame.width(), frame.height(), |x, y| {
        let [r, g, b] = frame.get_pixel(x, y).0;
        Luma([luma(r, g, b)])
    })
}

fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = u32::from(r) * LUMA_R + u32::from(g) * LUMA_G + u32::from(b) * LUMA_B;
    ((weighted + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn resize_keeps_aspect_ratio() {
        let frame = RgbImage::new(640, 480);
        assert_eq!(resize_to_width(&frame, 500).dimensions(), (500, 375));

        let frame = RgbImage::new(1920, 1080);
        assert_eq!(resize_to_width(&frame, 500).dimensions(), (500, 281));
    }

    #[test]
    fn resize_upscales_narrow_frames() {
        let frame = RgbImage::new(250, 100);
        assert_eq!(resize_to_width(&frame, 500).dimensions(), (500, 200));
    }

    #[test]
    fn resize_never_collapses_height() {
        let frame = RgbImage::new(5000, 1);
        assert_eq!(resize_to_width(&frame, 500).dimensions(), (500, 1));
    }

    #[test]
    fn luma_matches_bt601_weights() {
        let mut frame = RgbImage::new(5, 1);
        frame.put_pixel(0, 0, Rgb([255, 0, 0]));
        frame.put_pixel(1, 0, Rgb([0, 255, 0]));
        frame.put_pixel(2, 0, Rgb([0, 0, 255]));
        frame.put_pixel(3, 0, Rgb([255, 255, 255]));
        frame.put_pixel(4, 0, Rgb([0, 0, 0]));

        let gray = to_luma(&frame);
        let values: Vec<u8> = gray.pixels().map(|p| p.0[0]).collect();
        assert_eq!(values, vec![76, 150, 29, 255, 0]);
    }
}
