//! Rank-reduced reconstruction of images.
//!
//! A [`RankReducer`] decomposes every channel of an image with the SVD and rebuilds the
//! image from the leading singular triples only. Computing the decomposition is the
//! expensive step, so the reducer keeps the decomposition of the current image and
//! reconstructions at further ranks can reuse it.
//!
//! Grayscale images are two dimensional arrays `(rows, cols)`, color images are three
//! dimensional arrays `(rows, cols, channels)`. The output always has the shape of the input.

use crate::decomposition::{Decomposition, DecompositionCache};
use crate::pixel::{quantize, Pixel};
use crate::svd::{check_rank, numerical_rank, singular_values};
use crate::types::{RealScalar, Result, RustyImageError, StaleCause};
use ndarray::{Array, Array3, ArrayBase, Axis, Data, Dimension};

pub struct RankReducer<A: RealScalar> {
    cache: DecompositionCache<A>,
}

impl<A: RealScalar> Default for RankReducer<A> {
    fn default() -> Self {
        RankReducer {
            cache: DecompositionCache::new(),
        }
    }
}

impl<A: RealScalar> RankReducer<A> {
    /// Create a reducer with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstruct `image` from its `target_rank` leading singular triples per channel.
    ///
    /// If `reuse_cache` is `false` the decomposition of `image` is computed and replaces
    /// the cached one. If it is `true` the cached decomposition is used without recomputing
    /// it. The returned image has the shape of `image` with 8-bit pixel values.
    ///
    /// # Errors
    ///
    /// * [`RustyImageError::InvalidRank`] if `target_rank` is zero or larger than
    ///   $\min(rows, cols)$.
    /// * [`RustyImageError::StaleCache`] if `reuse_cache` is set but no decomposition is
    ///   cached or the cached one belongs to an image of a different shape.
    /// * [`RustyImageError::Decomposition`] if the SVD fails.
    pub fn decompose_and_reduce<P, S, D>(
        &mut self,
        image: &ArrayBase<S, D>,
        target_rank: usize,
        reuse_cache: bool,
    ) -> Result<Array<u8, D>>
    where
        P: Pixel,
        S: Data<Elem = P>,
        D: Dimension,
    {
        let shape = channel_shape(image.shape())?;
        check_rank(target_rank, shape[0].min(shape[1]))?;

        let decomposition = if reuse_cache {
            tracing::trace!(
                generation = self.cache.generation(),
                target_rank,
                "reusing cached decomposition"
            );
            self.cache.lookup(shape)?
        } else {
            self.decompose(image)?
        };

        let reduced = decomposition.reconstruct(target_rank)?.mapv(quantize);

        Ok(reduced.into_shape(image.raw_dim())?)
    }

    /// Compute the decomposition of a new image and store it in the cache.
    pub fn decompose<P, S, D>(&mut self, image: &ArrayBase<S, D>) -> Result<&Decomposition<A>>
    where
        P: Pixel,
        S: Data<Elem = P>,
        D: Dimension,
    {
        let normalized = normalize::<A, _, _, _>(image)?;
        let (rows, cols, channels) = normalized.dim();

        tracing::debug!(rows, cols, channels, "computing singular value decompositions");

        let decomposition = Decomposition::compute(normalized.view())?;
        Ok(self.cache.store(decomposition))
    }

    /// Reconstruct the cached image at rank `target_rank`.
    ///
    /// The result has the three dimensional shape `(rows, cols, channels)` of the cached
    /// decomposition, also for grayscale images.
    pub fn reduce(&self, target_rank: usize) -> Result<Array3<u8>> {
        let decomposition = self
            .cache
            .get()
            .ok_or(RustyImageError::StaleCache(StaleCause::Empty))?;

        Ok(decomposition.reconstruct(target_rank)?.mapv(quantize))
    }

    /// The cached decomposition, if any.
    pub fn cached(&self) -> Option<&Decomposition<A>> {
        self.cache.get()
    }

    /// Drop the cached decomposition.
    pub fn invalidate(&mut self) {
        self.cache.clear();
    }

    /// Number of decompositions computed by this reducer.
    pub fn generation(&self) -> u64 {
        self.cache.generation()
    }

    /// Numerical rank of every channel of `image`.
    ///
    /// A singular value counts if it is larger than $\sigma_1 \max(rows, cols) \epsilon$.
    /// The cache is not touched.
    pub fn channel_ranks<P, S, D>(image: &ArrayBase<S, D>) -> Result<Vec<usize>>
    where
        P: Pixel,
        S: Data<Elem = P>,
        D: Dimension,
    {
        let normalized = normalize::<A, _, _, _>(image)?;
        let (rows, cols, _) = normalized.dim();

        if rows == 0 || cols == 0 {
            return Ok(vec![0; normalized.len_of(Axis(2))]);
        }

        normalized
            .axis_iter(Axis(2))
            .map(|channel| -> Result<usize> {
                let sigma = singular_values(channel)?;
                Ok(numerical_rank(sigma.view(), rows, cols))
            })
            .collect()
    }

    /// Rank of `image`, the largest numerical rank over all channels.
    ///
    /// Callers use this to bound the ranks they request from [`decompose_and_reduce`].
    ///
    /// [`decompose_and_reduce`]: RankReducer::decompose_and_reduce
    pub fn image_rank<P, S, D>(image: &ArrayBase<S, D>) -> Result<usize>
    where
        P: Pixel,
        S: Data<Elem = P>,
        D: Dimension,
    {
        Ok(Self::channel_ranks(image)?.into_iter().max().unwrap_or(0))
    }
}

/// Interpret the shape of a grayscale or color image as `(rows, cols, channels)`.
fn channel_shape(shape: &[usize]) -> Result<[usize; 3]> {
    match *shape {
        [rows, cols] => Ok([rows, cols, 1]),
        [rows, cols, channels] => Ok([rows, cols, channels]),
        _ => Err(RustyImageError::UnsupportedDimension(shape.len())),
    }
}

/// Map the pixels of `image` to $[0, 1]$ in a `(rows, cols, channels)` array.
fn normalize<A, P, S, D>(image: &ArrayBase<S, D>) -> Result<Array3<A>>
where
    A: RealScalar,
    P: Pixel,
    S: Data<Elem = P>,
    D: Dimension,
{
    let [rows, cols, channels] = channel_shape(image.shape())?;
    let values = image.iter().map(|&pixel| pixel.normalize::<A>()).collect();

    Ok(Array3::from_shape_vec((rows, cols, channels), values)?)
}
