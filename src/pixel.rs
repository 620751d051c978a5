//! Conversion between integer pixel values and normalized floating point intensities.

use crate::types::RealScalar;
use num::Float;

/// Integer pixel types that can be normalized to the unit interval.
pub trait Pixel: Copy {
    /// The pixel value that maps to an intensity of 1.
    const MAX: f64;

    /// Return the pixel value as a floating point number.
    fn value(self) -> f64;

    /// Map the pixel value to $[0, 1]$.
    fn normalize<A: RealScalar>(self) -> A {
        A::real(self.value() / Self::MAX)
    }
}

macro_rules! pixel_impl {
    ($pixel:ty) => {
        impl Pixel for $pixel {
            const MAX: f64 = <$pixel>::MAX as f64;

            fn value(self) -> f64 {
                f64::from(self)
            }
        }
    };
}

pixel_impl!(u8);
pixel_impl!(u16);

/// Clip a normalized intensity to $[0, 1]$ and round it to the nearest 8-bit value.
pub fn quantize<A: RealScalar>(intensity: A) -> u8 {
    let clipped = Float::max(Float::min(intensity, A::one()), A::zero());
    Float::round(clipped * A::real(255.0))
        .to_u8()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(0u8.normalize::<f64>(), 0.0);
        assert_eq!(255u8.normalize::<f64>(), 1.0);
        assert_eq!(65535u16.normalize::<f32>(), 1.0);
        assert!((100u8.normalize::<f64>() - 100.0 / 255.0).abs() < 1E-15);
    }

    #[test]
    fn test_quantize_rounds_to_nearest() {
        assert_eq!(quantize(0.0f64), 0);
        assert_eq!(quantize(1.0f64), 255);
        assert_eq!(quantize(100.0f64 / 255.0), 100);
        assert_eq!(quantize(100.4f64 / 255.0), 100);
        assert_eq!(quantize(100.6f32 / 255.0), 101);
    }

    #[test]
    fn test_quantize_clips() {
        assert_eq!(quantize(-0.3f64), 0);
        assert_eq!(quantize(-1E-9f32), 0);
        assert_eq!(quantize(1.0f64 + 1E-9), 255);
        assert_eq!(quantize(7.5f32), 255);
    }
}
