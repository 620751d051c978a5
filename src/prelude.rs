//! Collect all traits and other exports here.

pub use crate::decomposition::{Decomposition, DecompositionCache};
pub use crate::helpers::*;
pub use crate::pixel::Pixel;
pub use crate::random_matrix::{random_image, RandomMatrix};
pub use crate::rank_reducer::RankReducer;
pub use crate::svd::{SVDTraits, SVD};
pub use crate::types::{RealScalar, RelDiff, RustyImageError, StaleCause};
