//! Convert packed RGB pixels into bit planes.

use crate::Bits;

/// Thresholding rule applied to each pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plane {
    /// 0 = black, 1 = white.
    Monochrome,
    /// 0 = a pixel that needs the label's extra color, 1 = pure black or white.
    ColorMask,
}

impl Plane {
    fn bit(self, luma: f64) -> bool {
        match self {
            Self::Monochrome => luma >= 0.5,
            Self::ColorMask => !(0.1..0.9).contains(&luma),
        }
    }
}

/// Relative luminance of a `0xAARRGGBB` pixel in `[0, 1]`. Alpha is ignored.
pub fn luma(pixel: u32) -> f64 {
    let r = ((pixel >> 16) & 0xFF) as f64;
    let g = ((pixel >> 8) & 0xFF) as f64;
    let b = (pixel & 0xFF) as f64;

    (0.21 * r + 0.72 * g + 0.07 * b) / 255.0
}

/// One bit per pixel, row-major, in the order the pixels are supplied.
pub fn convert(pixels: &[u32], plane: Plane) -> Bits {
    pixels.iter().map(|&p| plane.bit(luma(p))).collect()
}

/// The monochrome plane, followed by the color mask plane when `color` is set.
///
/// The planes are concatenated without separator; the display splits them
/// using the pixel count from the parameters frame.
pub fn planes(pixels: &[u32], color: bool) -> Bits {
    let mut bits = convert(pixels, Plane::Monochrome);
    if color {
        bits.extend(convert(pixels, Plane::ColorMask));
    }
    bits
}

/// Pack 8 bit RGB triples (as produced by `image::RgbImage::into_raw`) into `0xFFRRGGBB` pixels.
pub fn pack_rgb(rgb_data: &[u8]) -> Vec<u32> {
    rgb_data
        .chunks_exact(3)
        .map(|px| 0xFF00_0000 | (px[0] as u32) << 16 | (px[1] as u32) << 8 | px[2] as u32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WHITE: u32 = 0xFFFF_FFFF;
    const BLACK: u32 = 0xFF00_0000;
    const GREY: u32 = 0xFF80_8080;
    const RED: u32 = 0xFFFF_0000;

    #[test]
    fn test_luma() {
        assert_eq!(luma(BLACK), 0.0);
        assert!((luma(WHITE) - 1.0).abs() < 1e-9);
        // alpha does not matter
        assert_eq!(luma(0x0012_3456), luma(0xFF12_3456));
    }

    #[test]
    fn test_monochrome() {
        let bits = convert(&[BLACK, WHITE, GREY, RED], Plane::Monochrome);
        // red: 0.21 * 255 / 255 = 0.21 -> black
        assert_eq!(bits, vec![false, true, true, false]);
    }

    #[test]
    fn test_color_mask() {
        let bits = convert(&[BLACK, WHITE, GREY, RED], Plane::ColorMask);
        assert_eq!(bits, vec![true, true, false, false]);
    }

    #[test]
    fn test_color_mask_bounds() {
        // luma exactly 0.1 is colored, anything >= 0.9 is not
        assert!(!Plane::ColorMask.bit(0.1));
        assert!(Plane::ColorMask.bit(0.0999));
        assert!(Plane::ColorMask.bit(0.9));
        assert!(!Plane::ColorMask.bit(0.8999));
        assert!(Plane::Monochrome.bit(0.5));
        assert!(!Plane::Monochrome.bit(0.4999));
    }

    #[test]
    fn test_planes() {
        let pixels = [BLACK, GREY];
        assert_eq!(planes(&pixels, false), vec![false, true]);
        assert_eq!(planes(&pixels, true), vec![false, true, true, false]);
        assert!(planes(&[], true).is_empty());
    }

    #[test]
    fn test_pack_rgb() {
        let pixels = pack_rgb(&[0x12, 0x34, 0x56, 0xFF, 0x00, 0x00]);
        assert_eq!(pixels, vec![0xFF12_3456, RED]);
    }
}
