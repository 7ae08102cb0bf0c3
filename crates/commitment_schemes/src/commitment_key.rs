//! Commitment key for KZG commitments.

use ark_ec::{CurveGroup, VariableBaseMSM};
use bbrs_ecc::curves::bn254::{G1Affine, G1Element};
use bbrs_polynomials::polynomial::Polynomial;
use bbrs_polynomials::polynomial_span::PolynomialSpan;
use bbrs_srs::factories::{Bn254Crs, Bn254CrsFactory};
use rayon::prelude::*;

/// CommitmentKey object over BN254 G1.
///
/// Commitments are computed as C = [p(x)] = sum_i a_i * G_i where G_i is the
/// i-th element of the SRS { [x^j]_1 } and x is unknown. The map is linear,
/// so commit(a) + commit(b) == commit(a + b).
#[derive(Clone, Debug)]
pub struct CommitmentKey {
    /// SRS monomial points.
    srs_points: Vec<G1Affine>,
    /// Dyadic (power-of-2) size of the SRS.
    pub dyadic_size: usize,
}

impl CommitmentKey {
    /// Construct from raw SRS points.
    pub fn from_points(points: Vec<G1Affine>) -> Self {
        let dyadic_size = points.len().next_power_of_two();
        Self {
            srs_points: points,
            dyadic_size,
        }
    }

    /// Construct a key for `num_points` coefficients from the global CRS.
    ///
    /// Returns `None` if the global CRS is not initialized or is too small.
    pub fn new(num_points: usize) -> Option<Self> {
        let factory = bbrs_srs::global_crs::get_bn254_crs_factory()?;
        if factory.max_degree() < num_points {
            return None;
        }
        let crs = factory.get_crs(num_points);
        Some(Self {
            srs_points: crs.get_monomial_points()[..num_points].to_vec(),
            dyadic_size: num_points.next_power_of_two(),
        })
    }

    /// Whether the commitment key is properly initialized.
    pub fn initialized(&self) -> bool {
        !self.srs_points.is_empty()
    }

    /// Number of coefficients this key can commit to.
    pub fn srs_size(&self) -> usize {
        self.srs_points.len()
    }

    /// Get the SRS monomial points.
    pub fn srs_points(&self) -> &[G1Affine] {
        &self.srs_points
    }

    /// Commit to a polynomial p(X) = sum_i a_i * X^i.
    pub fn commit(&self, polynomial: &Polynomial) -> G1Affine {
        self.commit_span(&polynomial.as_span())
    }

    /// Commit to a polynomial given as a `PolynomialSpan`. Only the SRS points
    /// under the stored range take part in the MSM.
    pub fn commit_span(&self, polynomial: &PolynomialSpan<'_>) -> G1Affine {
        let consumed_srs = polynomial.end_index();
        assert!(
            consumed_srs <= self.srs_points.len(),
            "Attempting to commit to a polynomial that needs {} points with an SRS of size {}",
            consumed_srs,
            self.srs_points.len()
        );

        let points = &self.srs_points[polynomial.start_index..consumed_srs];
        G1Element::msm_unchecked(points, polynomial.span).into_affine()
    }

    /// Batch-commit to multiple polynomials, one MSM per polynomial in parallel.
    pub fn batch_commit(&self, polynomials: &[&Polynomial]) -> Vec<G1Affine> {
        polynomials.par_iter().map(|poly| self.commit(poly)).collect()
    }
}
