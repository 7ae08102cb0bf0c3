use std::sync::Arc;

use bbrs_ecc::curves::bn254::{G1Affine, G2Affine};

/// CRS for BN254: monomial points `[tau^i]_1` and the G2 point `[tau]_2`.
pub trait Bn254Crs: Send + Sync {
    /// Returns the monomial points used for commitments.
    fn get_monomial_points(&self) -> &[G1Affine];

    /// Number of monomial points.
    fn get_monomial_size(&self) -> usize;

    /// The first G1 element from the CRS, `[1]_1`.
    fn get_g1_identity(&self) -> G1Affine;

    /// `[tau]_2`, the G2 half of the pairing check.
    fn get_g2x(&self) -> G2Affine;
}

/// Factory that produces BN254 CRS instances.
pub trait Bn254CrsFactory: Send + Sync {
    fn get_crs(&self, degree: usize) -> Arc<dyn Bn254Crs>;

    /// Largest degree `get_crs` can serve.
    fn max_degree(&self) -> usize;

    fn get_verifier_crs(&self) -> Arc<dyn Bn254Crs> {
        self.get_crs(1)
    }
}
