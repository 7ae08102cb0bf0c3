use std::ops::{AddAssign, MulAssign, SubAssign};

use ark_ff::Field;
use ark_std::{UniformRand, Zero};
use bbrs_ecc::curves::bn254::Fr;
use rand::Rng;

use crate::polynomial_arithmetic;
use crate::polynomial_span::PolynomialSpan;

/// Dense univariate polynomial with shifted storage.
///
/// Coefficients are stored for indices `[start_index, start_index + size)`
/// within a logical polynomial of `virtual_size` coefficients; everything
/// outside the stored range is an implicit zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<Fr>,
    start_index: usize,
    virtual_size: usize,
}

// ── Constructors ──────────────────────────────────────────────────────────────

impl Polynomial {
    /// Zero polynomial of the given real `size` within a `virtual_size` starting at `start_index`.
    pub fn new(size: usize, virtual_size: usize, start_index: usize) -> Self {
        Self::from_shifted_coefficients(vec![Fr::zero(); size], virtual_size, start_index)
    }

    /// Wrap an existing coefficient vector (start_index = 0).
    pub fn from_coefficients(coeffs: Vec<Fr>, virtual_size: usize) -> Self {
        Self::from_shifted_coefficients(coeffs, virtual_size, 0)
    }

    /// Wrap a coefficient vector whose first entry is the coefficient of `X^start_index`.
    pub fn from_shifted_coefficients(
        coeffs: Vec<Fr>,
        virtual_size: usize,
        start_index: usize,
    ) -> Self {
        assert!(
            start_index + coeffs.len() <= virtual_size,
            "polynomial data [{}, {}) exceeds virtual size {}",
            start_index,
            start_index + coeffs.len(),
            virtual_size
        );
        Self {
            coefficients: coeffs,
            start_index,
            virtual_size,
        }
    }

    /// Random polynomial with `size` non-zero coefficients.
    pub fn random<R: Rng>(size: usize, virtual_size: usize, start_index: usize, rng: &mut R) -> Self {
        let data = (0..size).map(|_| Fr::rand(rng)).collect();
        Self::from_shifted_coefficients(data, virtual_size, start_index)
    }
}

// ── Accessors ─────────────────────────────────────────────────────────────────

impl Polynomial {
    #[inline]
    pub fn get(&self, i: usize) -> Fr {
        if i >= self.start_index && i < self.end_index() {
            self.coefficients[i - self.start_index]
        } else {
            Fr::zero()
        }
    }

    /// Mutable reference to the coefficient at logical index `i`.
    /// Panics if `i` is outside the real data range.
    #[inline]
    pub fn at_mut(&mut self, i: usize) -> &mut Fr {
        assert!(
            i >= self.start_index && i < self.end_index(),
            "index {} outside real data range [{}, {})",
            i,
            self.start_index,
            self.end_index()
        );
        let start = self.start_index;
        &mut self.coefficients[i - start]
    }

    #[inline]
    pub fn data(&self) -> &[Fr] {
        &self.coefficients
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [Fr] {
        &mut self.coefficients
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.coefficients.len()
    }

    #[inline]
    pub fn virtual_size(&self) -> usize {
        self.virtual_size
    }

    #[inline]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    #[inline]
    pub fn end_index(&self) -> usize {
        self.start_index + self.coefficients.len()
    }

    pub fn is_zero(&self) -> bool {
        self.data().iter().all(|c| c.is_zero())
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn as_span(&self) -> PolynomialSpan<'_> {
        PolynomialSpan::new(self.data(), self.start_index())
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

impl Polynomial {
    /// Expand the real data range to cover `[new_start, new_end)`, copying existing
    /// coefficients and zero-filling the new regions.
    fn ensure_range(&mut self, new_start: usize, new_end: usize) {
        assert!(
            new_end <= self.virtual_size,
            "range end {} exceeds virtual size {}",
            new_end,
            self.virtual_size
        );
        let cur_start = self.start_index;
        let cur_end = self.end_index();
        if new_start >= cur_start && new_end <= cur_end {
            return;
        }
        let actual_start = new_start.min(cur_start);
        let actual_end = new_end.max(cur_end);
        let mut new_data = vec![Fr::zero(); actual_end - actual_start];
        let offset = cur_start - actual_start;
        new_data[offset..offset + self.coefficients.len()].copy_from_slice(&self.coefficients);
        self.coefficients = new_data;
        self.start_index = actual_start;
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────────

impl AddAssign<PolynomialSpan<'_>> for Polynomial {
    fn add_assign(&mut self, other: PolynomialSpan<'_>) {
        self.add_scaled(&other, Fr::from(1u64));
    }
}

impl SubAssign<PolynomialSpan<'_>> for Polynomial {
    fn sub_assign(&mut self, other: PolynomialSpan<'_>) {
        self.ensure_range(other.start_index, other.end_index());
        let self_start = self.start_index;
        for (i, value) in other.span.iter().enumerate() {
            self.coefficients[other.start_index + i - self_start] -= value;
        }
    }
}

impl MulAssign<Fr> for Polynomial {
    fn mul_assign(&mut self, scalar: Fr) {
        for c in self.data_mut().iter_mut() {
            *c *= scalar;
        }
    }
}

impl Polynomial {
    /// `self += other * scalar`
    pub fn add_scaled(&mut self, other: &PolynomialSpan<'_>, scalar: Fr) {
        self.ensure_range(other.start_index, other.end_index());
        let self_start = self.start_index;
        for (i, value) in other.span.iter().enumerate() {
            self.coefficients[other.start_index + i - self_start] += *value * scalar;
        }
    }
}

// ── Evaluation ────────────────────────────────────────────────────────────────

impl Polynomial {
    /// Evaluate the polynomial at `z`.
    pub fn evaluate(&self, z: &Fr) -> Fr {
        let inner = polynomial_arithmetic::evaluate(self.data(), z);
        if self.start_index == 0 {
            inner
        } else {
            inner * z.pow([self.start_index as u64])
        }
    }
}

// ── Manipulation ──────────────────────────────────────────────────────────────

impl Polynomial {
    /// Return a copy expanded to cover the full `[0, virtual_size)` range, with zeros
    /// where no real data exists.
    pub fn full(&self) -> Self {
        let mut result = self.clone();
        result.ensure_range(0, self.virtual_size);
        result
    }

    /// Divide this polynomial by `(X - root)` in-place via synthetic division.
    ///
    /// The stored range is first extended down to index 0 so the division runs
    /// over the whole coefficient vector.
    pub fn factor_roots(&mut self, root: &Fr) {
        let end = self.end_index();
        self.ensure_range(0, end);
        polynomial_arithmetic::factor_roots(self.data_mut(), root);
    }

    /// Return a polynomial equal to the right-shift-by-`magnitude` of self.
    pub fn right_shifted(&self, magnitude: usize) -> Self {
        assert!(
            self.end_index() + magnitude <= self.virtual_size,
            "right_shifted: end_index ({}) + magnitude ({}) exceeds virtual_size ({})",
            self.end_index(),
            magnitude,
            self.virtual_size,
        );
        Self::from_shifted_coefficients(
            self.coefficients.clone(),
            self.virtual_size,
            self.start_index + magnitude,
        )
    }
}
