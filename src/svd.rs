//! Economy-size singular value decompositions and their truncation.
//!
//! The singular value decomposition of a real matrix $A\in\mathbb{R}^{m\times n}$ is
//! $A = U\Sigma V^T$, where $U\in\mathbb{R}^{m\times k}$ has orthonormal columns,
//! $V^T\in\mathbb{R}^{k\times n}$ has orthonormal rows and $\Sigma = \text{diag}(\sigma_1, \dots, \sigma_k)$
//! with $\sigma_1\geq\sigma_2\geq\dots\geq\sigma_k\geq 0$. Here $k = \min(m, n)$.
//!
//! Keeping only the first $\ell\leq k$ columns of $U$, singular values and rows of $V^T$
//! gives the best rank $\ell$ approximation of $A$ in the Frobenius norm (Eckart-Young).
//! The error of this approximation is $\sqrt{\sum_{i>\ell}\sigma_i^2}$.

use crate::types::{RealScalar, Result, RustyImageError};
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};
use ndarray_linalg::{JobSvd, SVDDCInto};
use num::Float;

pub struct SVD<A: RealScalar> {
    /// The U matrix
    pub u: Array2<A>,
    /// The array of singular values in descending order
    pub s: Array1<A>,
    /// The vt matrix
    pub vt: Array2<A>,
}

/// Traits for the singular value decomposition
pub trait SVDTraits {
    type A: RealScalar;

    /// Number of rows
    fn nrows(&self) -> usize {
        self.get_u().nrows()
    }

    /// Number of columns
    fn ncols(&self) -> usize {
        self.get_vt().ncols()
    }

    /// Number of singular triples stored in the decomposition
    fn rank(&self) -> usize {
        self.get_s().len()
    }

    /// Convert the decomposition back to a matrix
    fn to_mat(&self) -> Array2<Self::A> {
        let scaled_u = &self.get_u() * &self.get_s();
        scaled_u.dot(&self.get_vt())
    }

    /// Return the rank `max_rank` prefix of the decomposition
    fn truncate(&self, max_rank: usize) -> Result<SVD<Self::A>> {
        check_rank(max_rank, self.rank())?;

        Ok(SVD {
            u: self.get_u().slice(s![.., 0..max_rank]).into_owned(),
            s: self.get_s().slice(s![0..max_rank]).into_owned(),
            vt: self.get_vt().slice(s![0..max_rank, ..]).into_owned(),
        })
    }

    /// Reconstruct the best rank `max_rank` approximation of the original matrix
    fn reconstruct(&self, max_rank: usize) -> Result<Array2<Self::A>> {
        check_rank(max_rank, self.rank())?;

        let u = self.get_u().slice_move(s![.., 0..max_rank]);
        let sigma = self.get_s().slice_move(s![0..max_rank]);
        let vt = self.get_vt().slice_move(s![0..max_rank, ..]);

        Ok((&u * &sigma).dot(&vt))
    }

    /// Frobenius norm of the difference between the matrix and its rank `max_rank` approximation
    fn truncation_error(&self, max_rank: usize) -> Result<Self::A> {
        if max_rank > self.rank() {
            return Err(RustyImageError::InvalidRank {
                rank: max_rank,
                max_rank: self.rank(),
            });
        }

        let tail = self
            .get_s()
            .slice_move(s![max_rank..])
            .fold(num::zero::<Self::A>(), |acc, &sigma| acc + sigma * sigma);

        Ok(Float::sqrt(tail))
    }

    /// The tolerance below which a singular value counts as zero.
    ///
    /// This is $\sigma_1 \max(m, n) \epsilon$, the default used by numpy and Matlab.
    fn default_rank_tolerance(&self) -> Self::A {
        rank_tolerance(self.get_s(), self.nrows(), self.ncols())
    }

    /// Number of singular values larger than `tol`
    fn numerical_rank(&self, tol: Self::A) -> usize {
        self.get_s().iter().filter(|&&sigma| sigma > tol).count()
    }

    /// Compute the economy-size SVD of a given array
    fn compute_from(arr: ArrayView2<Self::A>) -> Result<SVD<Self::A>>;

    /// Return the U matrix
    fn get_u(&self) -> ArrayView2<Self::A>;

    /// Return the singular values
    fn get_s(&self) -> ArrayView1<Self::A>;

    /// Return the Vt matrix
    fn get_vt(&self) -> ArrayView2<Self::A>;
}

impl<A: RealScalar> SVDTraits for SVD<A> {
    type A = A;

    fn compute_from(arr: ArrayView2<A>) -> Result<SVD<A>> {
        let (u, s, vt) = arr.to_owned().svddc_into(JobSvd::Some)?;

        match (u, vt) {
            (Some(u), Some(vt)) => Ok(SVD { u, s, vt }),
            _ => Err(RustyImageError::MissingSingularVectors),
        }
    }

    fn get_u(&self) -> ArrayView2<A> {
        self.u.view()
    }

    fn get_s(&self) -> ArrayView1<A> {
        self.s.view()
    }

    fn get_vt(&self) -> ArrayView2<A> {
        self.vt.view()
    }
}

/// Compute only the singular values of `arr`.
pub fn singular_values<A: RealScalar>(arr: ArrayView2<A>) -> Result<Array1<A>> {
    let (_, s, _) = arr.to_owned().svddc_into(JobSvd::None)?;
    Ok(s)
}

/// Numerical rank of an `nrows` x `ncols` matrix with singular values `sigma`.
pub fn numerical_rank<A: RealScalar>(sigma: ArrayView1<A>, nrows: usize, ncols: usize) -> usize {
    let tol = rank_tolerance(sigma, nrows, ncols);
    sigma.iter().filter(|&&item| item > tol).count()
}

fn rank_tolerance<A: RealScalar>(sigma: ArrayView1<A>, nrows: usize, ncols: usize) -> A {
    match sigma.first() {
        Some(&sigma_max) => sigma_max * A::real(nrows.max(ncols)) * <A as Float>::epsilon(),
        None => A::zero(),
    }
}

pub(crate) fn check_rank(rank: usize, max_rank: usize) -> Result<()> {
    if rank == 0 || rank > max_rank {
        Err(RustyImageError::InvalidRank { rank, max_rank })
    } else {
        Ok(())
    }
}
