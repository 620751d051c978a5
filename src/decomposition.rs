//! Per-channel decompositions of an image and the cache that holds them.
//!
//! An image with `rows x cols` pixels and `channels` color planes is stored as an
//! array of shape `(rows, cols, channels)`. Every channel is decomposed independently.
//! The cache keeps exactly one decomposition: storing a new one silently replaces the
//! previous one, and a reuse request is only served if the shapes agree.

use crate::svd::{check_rank, SVDTraits, SVD};
use crate::types::{RealScalar, Result, RustyImageError, StaleCause};
use itertools::izip;
use ndarray::{Array3, ArrayView3, Axis};

pub struct Decomposition<A: RealScalar> {
    /// The decomposition of each channel
    channels: Vec<SVD<A>>,
    /// The shape `(rows, cols, channels)` of the decomposed image
    shape: [usize; 3],
}

impl<A: RealScalar> Decomposition<A> {
    /// Decompose every channel of a normalized `(rows, cols, channels)` image.
    pub fn compute(image: ArrayView3<A>) -> Result<Self> {
        let (rows, cols, nchannels) = image.dim();

        let channels = image
            .axis_iter(Axis(2))
            .enumerate()
            .map(|(index, channel)| {
                tracing::trace!(channel = index, rows, cols, "decomposing channel");
                SVD::<A>::compute_from(channel)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Decomposition {
            channels,
            shape: [rows, cols, nchannels],
        })
    }

    /// The shape `(rows, cols, channels)` of the decomposed image.
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    pub fn nchannels(&self) -> usize {
        self.shape[2]
    }

    /// Largest rank a reconstruction can use, $\min(rows, cols)$.
    pub fn max_rank(&self) -> usize {
        self.shape[0].min(self.shape[1])
    }

    pub fn channels(&self) -> &[SVD<A>] {
        &self.channels
    }

    /// Numerical rank of every channel, computed from the stored singular values.
    pub fn channel_ranks(&self) -> Vec<usize> {
        self.channels
            .iter()
            .map(|svd| svd.numerical_rank(svd.default_rank_tolerance()))
            .collect()
    }

    /// Rank of the image, the largest numerical rank over all channels.
    pub fn rank(&self) -> usize {
        self.channel_ranks().into_iter().max().unwrap_or(0)
    }

    /// Reconstruct the rank `rank` approximation of every channel.
    ///
    /// The result is not clipped, values may lie slightly outside of $[0, 1]$.
    pub fn reconstruct(&self, rank: usize) -> Result<Array3<A>> {
        check_rank(rank, self.max_rank())?;

        let mut output = Array3::<A>::zeros((self.shape[0], self.shape[1], self.shape[2]));

        for (svd, mut channel) in izip!(&self.channels, output.axis_iter_mut(Axis(2))) {
            channel.assign(&svd.reconstruct(rank)?);
        }

        Ok(output)
    }
}

/// A cache with a single slot for the decomposition of the current image.
pub struct DecompositionCache<A: RealScalar> {
    slot: Option<Decomposition<A>>,
    generation: u64,
}

impl<A: RealScalar> Default for DecompositionCache<A> {
    fn default() -> Self {
        DecompositionCache {
            slot: None,
            generation: 0,
        }
    }
}

impl<A: RealScalar> DecompositionCache<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a decomposition, replacing the previous one.
    pub fn store(&mut self, decomposition: Decomposition<A>) -> &Decomposition<A> {
        self.generation += 1;
        self.slot.insert(decomposition)
    }

    pub fn get(&self) -> Option<&Decomposition<A>> {
        self.slot.as_ref()
    }

    /// Return the cached decomposition if it was computed for an image of shape `shape`.
    pub fn lookup(&self, shape: [usize; 3]) -> Result<&Decomposition<A>> {
        let decomposition = self
            .slot
            .as_ref()
            .ok_or(RustyImageError::StaleCache(StaleCause::Empty))?;

        if decomposition.shape() != shape {
            return Err(RustyImageError::StaleCache(StaleCause::ShapeMismatch {
                cached: decomposition.shape(),
                requested: shape,
            }));
        }

        Ok(decomposition)
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    /// Drop the cached decomposition.
    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Number of decompositions stored so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random_matrix::RandomMatrix;
    use crate::types::RelDiff;
    use ndarray::{s, Array2};

    fn random_channels(shape: (usize, usize, usize)) -> Array3<f64> {
        let mut rng = rand::thread_rng();
        let mut image = Array3::<f64>::zeros(shape);
        for mut channel in image.axis_iter_mut(Axis(2)) {
            channel.assign(&f64::random_gaussian((shape.0, shape.1), &mut rng));
        }
        image
    }

    #[test]
    fn test_channels_are_decomposed_independently() {
        let image = random_channels((20, 12, 3));
        let decomposition = Decomposition::compute(image.view()).unwrap();

        assert_eq!(decomposition.shape(), [20, 12, 3]);
        assert_eq!(decomposition.nchannels(), 3);
        assert_eq!(decomposition.max_rank(), 12);

        for (index, svd) in decomposition.channels().iter().enumerate() {
            let channel = image.slice(s![.., .., index]);
            let single = SVD::<f64>::compute_from(channel).unwrap();
            assert!(f64::rel_diff_l2(svd.s.view(), single.s.view()) < 1E-12);
        }

        let full = decomposition.reconstruct(12).unwrap();
        for index in 0..3 {
            assert!(
                f64::rel_diff_fro(full.slice(s![.., .., index]), image.slice(s![.., .., index])) < 1E-12
            );
        }
    }

    #[test]
    fn test_reconstruct_rejects_invalid_ranks() {
        let decomposition = Decomposition::compute(random_channels((6, 9, 2)).view()).unwrap();

        assert!(matches!(
            decomposition.reconstruct(0),
            Err(RustyImageError::InvalidRank { rank: 0, max_rank: 6 })
        ));
        assert!(matches!(
            decomposition.reconstruct(7),
            Err(RustyImageError::InvalidRank { rank: 7, max_rank: 6 })
        ));
    }

    #[test]
    fn test_channel_ranks() {
        let mut image = Array3::<f64>::zeros((8, 8, 2));
        image.slice_mut(s![.., .., 0]).fill(0.5);
        image.slice_mut(s![.., .., 1]).assign(&Array2::<f64>::eye(8));

        let decomposition = Decomposition::compute(image.view()).unwrap();

        assert_eq!(decomposition.channel_ranks(), vec![1, 8]);
        assert_eq!(decomposition.rank(), 8);
    }

    #[test]
    fn test_cache_lifecycle() {
        let mut cache = DecompositionCache::<f64>::new();
        assert!(cache.is_empty());
        assert_eq!(cache.generation(), 0);
        assert!(matches!(
            cache.lookup([4, 4, 1]),
            Err(RustyImageError::StaleCache(StaleCause::Empty))
        ));

        cache.store(Decomposition::compute(random_channels((4, 4, 1)).view()).unwrap());
        assert_eq!(cache.generation(), 1);
        assert!(cache.lookup([4, 4, 1]).is_ok());

        cache.store(Decomposition::compute(random_channels((5, 3, 3)).view()).unwrap());
        assert_eq!(cache.generation(), 2);
        assert_eq!(cache.get().map(|item| item.shape()), Some([5, 3, 3]));

        match cache.lookup([4, 4, 1]) {
            Err(RustyImageError::StaleCache(StaleCause::ShapeMismatch { cached, requested })) => {
                assert_eq!(cached, [5, 3, 3]);
                assert_eq!(requested, [4, 4, 1]);
            }
            _ => panic!("Expected a stale cache error."),
        }

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.generation(), 2);
    }
}
