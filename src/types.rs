//! Error types, the scalar trait for image channels and the relative difference helpers.

use ndarray::{ArrayView1, ArrayView2, ShapeError};
use ndarray_linalg::error::LinalgError;
use ndarray_linalg::{Lapack, Norm};
use num::Float;
use thiserror::Error;

pub use ndarray_linalg::Scalar;

#[derive(Error, Debug)]
pub enum RustyImageError {
    #[error("Invalid rank {rank}, expected a rank between 1 and {max_rank}")]
    InvalidRank { rank: usize, max_rank: usize },
    #[error("Stale decomposition cache: {0}")]
    StaleCache(StaleCause),
    #[error("SVD computation failed")]
    Decomposition(#[from] LinalgError),
    #[error("SVD computation returned no singular vectors")]
    MissingSingularVectors,
    #[error("Unsupported image with {0} dimensions, expected 2 or 3")]
    UnsupportedDimension(usize),
    #[error("Shape mismatch: expected {expected:?}, found {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("Incompatible array shape")]
    Shape(#[from] ShapeError),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

/// Reason why a cached decomposition cannot serve a reuse request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StaleCause {
    #[error("no decomposition is cached, recompute with reuse disabled")]
    Empty,
    #[error("cached decomposition has shape {cached:?} but the image has shape {requested:?}")]
    ShapeMismatch {
        cached: [usize; 3],
        requested: [usize; 3],
    },
}

pub type Result<T> = std::result::Result<T, RustyImageError>;

/// Real floating point types in which image channels are decomposed.
pub trait RealScalar: Scalar<Real = Self> + Lapack + Float {}

impl RealScalar for f32 {}
impl RealScalar for f64 {}

pub trait RelDiff {
    type A: RealScalar;

    /// Return the relative Frobenius norm difference of `first` and `second`.
    fn rel_diff_fro(first: ArrayView2<Self::A>, second: ArrayView2<Self::A>) -> Self::A;

    /// Return the relative l2 vector norm difference of `first` and `second`.
    fn rel_diff_l2(first: ArrayView1<Self::A>, second: ArrayView1<Self::A>) -> Self::A;
}

macro_rules! rel_diff_impl {
    ($scalar:ty) => {
        impl RelDiff for $scalar {
            type A = $scalar;

            fn rel_diff_fro(first: ArrayView2<Self::A>, second: ArrayView2<Self::A>) -> Self::A {
                let diff = first.to_owned() - &second;
                diff.norm_l2() / second.norm_l2()
            }

            fn rel_diff_l2(first: ArrayView1<Self::A>, second: ArrayView1<Self::A>) -> Self::A {
                let diff = first.to_owned() - &second;
                diff.norm_l2() / second.norm_l2()
            }
        }
    };
}

rel_diff_impl!(f32);
rel_diff_impl!(f64);
