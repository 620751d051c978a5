//! Generation of random matrices and random test images

use crate::types::{RealScalar, Result, RustyImageError};
use ndarray::{Array, Array2, ShapeBuilder};
use ndarray_linalg::{JobSvd, SVDDCInto};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

pub trait RandomMatrix
where
    Self: RealScalar,
{
    /// Generate a random Gaussian matrix.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `rng`: The random number generator to use.
    fn random_gaussian<R: Rng>(dimension: (usize, usize), rng: &mut R) -> Array2<Self> {
        let mut mat = Array2::<Self>::zeros(dimension);
        mat.map_inplace(|item| {
            let sample: f64 = StandardNormal.sample(rng);
            *item = Self::real(sample);
        });
        mat
    }

    /// Generate a random matrix with orthogonal rows or columns.
    ///
    /// This function creates a normally distributed (m, n) random matrix,
    /// orthogonalizes it and returns the resulting orthogonal matrix.
    ///
    /// If m > n then the returned matrix has orthogonal columns. If n > m
    /// the returned matrix has orthogonalized rows.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `rng`: The random number generator to use.
    fn random_orthogonal_matrix<R: Rng>(
        dimension: (usize, usize),
        rng: &mut R,
    ) -> Result<Array2<Self>> {
        let mut m = dimension.0;
        let mut n = dimension.1;

        // Always orthogonalize a long and skinny matrix
        if dimension.1 > dimension.0 {
            std::mem::swap(&mut m, &mut n);
        }

        let mat = Self::random_gaussian((m, n), rng);

        let (u, _, _) = mat.svddc_into(JobSvd::Some)?;
        let u = u.ok_or(RustyImageError::MissingSingularVectors)?;

        // If we originally had more columns than rows, transpose again.
        if dimension.1 > dimension.0 {
            Ok(u.t().to_owned())
        } else {
            Ok(u)
        }
    }

    /// Generate a random approximate low-rank matrix.
    ///
    /// This function generates a random approximate low-rank matrix
    /// with singular values logarithmically distributed between
    /// `sigma_max` and `sigma_min`.
    ///
    /// # Arguments
    ///
    /// * `dimension`: Tuple (rows, cols) specifying the number of rows and columns.
    /// * `sigma_max`: Maximum singular value.
    /// * `sigma_min`: Minimum singular value.
    /// * `rng`: The random number generator to use.
    fn random_approximate_low_rank_matrix<R: Rng>(
        dimension: (usize, usize),
        sigma_max: f64,
        sigma_min: f64,
        rng: &mut R,
    ) -> Result<Array2<Self>> {
        if !(sigma_min < sigma_max) {
            return Err(RustyImageError::InvalidParameter(
                "`sigma_min` must be smaller than `sigma_max`",
            ));
        }
        if !(sigma_min > 0.0) {
            return Err(RustyImageError::InvalidParameter(
                "`sigma_min` must be positive",
            ));
        }

        let min_dim = std::cmp::min(dimension.0, dimension.1);

        let u = Self::random_orthogonal_matrix((dimension.0, min_dim), rng)?;
        let vt = Self::random_orthogonal_matrix((min_dim, dimension.1), rng)?;
        let singvals = Array::geomspace(sigma_max, sigma_min, min_dim)
            .ok_or(RustyImageError::InvalidParameter(
                "singular values must be positive",
            ))?
            .mapv(|item| Self::real(item));

        Ok((&u * &singvals).dot(&vt))
    }
}

impl RandomMatrix for f64 {}
impl RandomMatrix for f32 {}

/// Generate an image with uniformly distributed 8-bit pixel values.
///
/// Pass `(rows, cols)` for a grayscale image or `(rows, cols, channels)` for a color image.
pub fn random_image<Sh, R>(shape: Sh, rng: &mut R) -> Array<u8, Sh::Dim>
where
    Sh: ShapeBuilder,
    R: Rng,
{
    Array::from_shape_simple_fn(shape, || rng.gen::<u8>())
}
