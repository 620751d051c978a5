//! Rank-reduced image reconstruction with the singular value decomposition.
//!
//! Every channel of an image is decomposed as $A = U\Sigma V^T$ and rebuilt from its
//! $k$ largest singular values, which gives the best rank $k$ approximation of the
//! channel. The [`RankReducer`] keeps the decomposition of the current image, so that
//! reconstructions at several ranks only pay for one decomposition.
//!
//! ```
//! use ndarray::Array2;
//! use rusty_image_svd::RankReducer;
//!
//! let image = Array2::<u8>::from_elem((4, 4), 100);
//! let rank = RankReducer::<f64>::image_rank(&image).unwrap();
//!
//! let mut reducer = RankReducer::<f64>::new();
//! let reduced = reducer.decompose_and_reduce(&image, rank, false).unwrap();
//! assert_eq!(reduced, image);
//!
//! // Further ranks reuse the cached decomposition.
//! let again = reducer.decompose_and_reduce(&image, 1, true).unwrap();
//! assert_eq!(again, reduced);
//! ```

pub mod decomposition;
pub mod examples;
pub mod helpers;
pub mod pixel;
pub mod prelude;
pub mod random_matrix;
pub mod rank_reducer;
pub mod svd;
pub mod types;

pub use decomposition::{Decomposition, DecompositionCache};
pub use helpers::{max_abs_deviation, mean_squared_error, psnr};
pub use pixel::{quantize, Pixel};
pub use random_matrix::{random_image, RandomMatrix};
pub use rank_reducer::RankReducer;
pub use svd::{SVDTraits, SVD};
pub use types::{RealScalar, RelDiff, Result, RustyImageError, StaleCause};
