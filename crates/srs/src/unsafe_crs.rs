//! CRS generation from a known secret.
//!
//! Anyone who knows `tau` can open a commitment to any value, so a CRS built
//! here is only fit for tests and local experiments.

use ark_ec::{CurveGroup, PrimeGroup};
use ark_ff::Field;
use bbrs_ecc::curves::bn254::{Fr, G1Element, G2Element};

use crate::factories::MemBn254Crs;

/// Build `[tau^i]_1` for `i < num_points` together with `[tau]_2`.
pub fn generate_unsafe_bn254_crs(num_points: usize, tau: Fr) -> MemBn254Crs {
    assert!(num_points > 0, "a CRS needs at least one point");
    let generator = G1Element::generator();
    let mut power = Fr::ONE;
    let projective: Vec<G1Element> = (0..num_points)
        .map(|_| {
            let point = generator * power;
            power *= tau;
            point
        })
        .collect();
    let monomials = G1Element::normalize_batch(&projective);
    let g2_x = (G2Element::generator() * tau).into_affine();
    MemBn254Crs::new(&monomials, g2_x)
}
