use std::sync::Arc;

use bbrs_ecc::curves::bn254::{G1Affine, G2Affine};

use super::crs_factory::{Bn254Crs, Bn254CrsFactory};

// ---------------------------------------------------------------------------
// MemBn254Crs: in-memory CRS backed by a Vec of G1 affine points
// ---------------------------------------------------------------------------

/// In-memory CRS for BN254.
pub struct MemBn254Crs {
    monomials: Vec<G1Affine>,
    g2_x: G2Affine,
}

impl MemBn254Crs {
    pub fn new(points: &[G1Affine], g2_x: G2Affine) -> Self {
        assert!(
            !points.is_empty() && points[0].is_on_curve(),
            "invalid g1_identity passed to MemBn254Crs"
        );
        assert!(g2_x.is_on_curve(), "invalid g2_x passed to MemBn254Crs");
        Self {
            monomials: points.to_vec(),
            g2_x,
        }
    }
}

impl Bn254Crs for MemBn254Crs {
    fn get_monomial_points(&self) -> &[G1Affine] {
        &self.monomials
    }

    fn get_monomial_size(&self) -> usize {
        self.monomials.len()
    }

    fn get_g1_identity(&self) -> G1Affine {
        self.monomials[0]
    }

    fn get_g2x(&self) -> G2Affine {
        self.g2_x
    }
}

// ---------------------------------------------------------------------------
// MemBn254CrsFactory
// ---------------------------------------------------------------------------

/// Factory that serves a pre-supplied in-memory BN254 CRS.
pub struct MemBn254CrsFactory {
    crs: Arc<MemBn254Crs>,
}

impl MemBn254CrsFactory {
    pub fn new(points: &[G1Affine], g2_x: G2Affine) -> Self {
        Self::from_crs(MemBn254Crs::new(points, g2_x))
    }

    pub fn from_crs(crs: MemBn254Crs) -> Self {
        Self { crs: Arc::new(crs) }
    }
}

impl Bn254CrsFactory for MemBn254CrsFactory {
    fn get_crs(&self, degree: usize) -> Arc<dyn Bn254Crs> {
        assert!(
            self.crs.get_monomial_size() >= degree,
            "prover trying to get too many points in MemBn254CrsFactory! {} vs {}",
            self.crs.get_monomial_size(),
            degree
        );
        self.crs.clone()
    }

    fn max_degree(&self) -> usize {
        self.crs.get_monomial_size()
    }
}
