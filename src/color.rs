//! Color and pixel output

use glam::Vec3A;

use crate::interval::Interval;

pub use glam::Vec3A as Color;

pub mod colors {
    use super::{Color, Vec3A};

    pub const WHITE: Color = Vec3A::ONE;
    pub const BLACK: Color = Vec3A::ZERO;
    pub const SKY_BLUE: Color = Vec3A::new(0.5, 0.7, 1.0);
}

/// Channel range that maps onto `0..=255` once scaled by 256.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Square-root gamma encoding; non-positive input maps to zero.
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

// conversion for sdr pixels
pub trait VecExt {
    /// Gamma corrects and quantizes a linear color into 8-bit channels.
    fn to_rgb8(self) -> [u8; 3];
}

impl VecExt for Color {
    fn to_rgb8(self) -> [u8; 3] {
        self.to_array()
            .map(|channel| (256.0 * INTENSITY.clamp(linear_to_gamma(channel))) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamma_of_non_positive_is_zero() {
        assert_eq!(linear_to_gamma(-0.5), 0.0);
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(0.25), 0.5);
    }

    #[test]
    fn quantize_extremes() {
        assert_eq!(colors::BLACK.to_rgb8(), [0, 0, 0]);
        assert_eq!(colors::WHITE.to_rgb8(), [255, 255, 255]);
        assert_eq!(Color::new(4.0, -1.0, 0.25).to_rgb8(), [255, 0, 128]);
    }
}
