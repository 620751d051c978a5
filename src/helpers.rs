//! Error measures between an 8-bit image and its approximation.

use crate::types::{Result, RustyImageError};
use ndarray::{ArrayBase, Data, Dimension, Zip};

fn check_shapes<S1, S2, D>(first: &ArrayBase<S1, D>, second: &ArrayBase<S2, D>) -> Result<()>
where
    S1: Data<Elem = u8>,
    S2: Data<Elem = u8>,
    D: Dimension,
{
    if first.shape() != second.shape() {
        return Err(RustyImageError::ShapeMismatch {
            expected: first.shape().to_vec(),
            actual: second.shape().to_vec(),
        });
    }
    Ok(())
}

/// Return the mean of the squared pixel differences of `first` and `second`.
///
/// The result is measured on the $[0, 255]$ scale. Empty images have zero error.
pub fn mean_squared_error<S1, S2, D>(
    first: &ArrayBase<S1, D>,
    second: &ArrayBase<S2, D>,
) -> Result<f64>
where
    S1: Data<Elem = u8>,
    S2: Data<Elem = u8>,
    D: Dimension,
{
    check_shapes(first, second)?;

    if first.is_empty() {
        return Ok(0.0);
    }

    let total = Zip::from(first).and(second).fold(0.0, |acc, &a, &b| {
        let diff = f64::from(a) - f64::from(b);
        acc + diff * diff
    });

    Ok(total / first.len() as f64)
}

/// Return the largest absolute pixel difference of `first` and `second`.
pub fn max_abs_deviation<S1, S2, D>(
    first: &ArrayBase<S1, D>,
    second: &ArrayBase<S2, D>,
) -> Result<u8>
where
    S1: Data<Elem = u8>,
    S2: Data<Elem = u8>,
    D: Dimension,
{
    check_shapes(first, second)?;

    Ok(Zip::from(first)
        .and(second)
        .fold(0, |acc, &a, &b| acc.max(if a > b { a - b } else { b - a })))
}

/// Peak signal to noise ratio in decibels. Identical images give infinity.
pub fn psnr<S1, S2, D>(first: &ArrayBase<S1, D>, second: &ArrayBase<S2, D>) -> Result<f64>
where
    S1: Data<Elem = u8>,
    S2: Data<Elem = u8>,
    D: Dimension,
{
    let mse = mean_squared_error(first, second)?;

    if mse == 0.0 {
        Ok(f64::INFINITY)
    } else {
        Ok(10.0 * (255.0 * 255.0 / mse).log10())
    }
}
