//! BN254 type aliases.
//!
//! `Fr` is the scalar field, used as the native field of every circuit and
//! transcript in the workspace. `Fq` is the base field; G1 coordinates live
//! there and must be split into `Fr` limbs before they can enter a circuit.

use ark_ec::AffineRepr;

pub use ark_bn254::{Bn254, Fq, Fr, G1Affine, G2Affine};

/// G1 element in projective coordinates.
pub type G1Element = ark_bn254::G1Projective;

/// G2 element in projective coordinates.
pub type G2Element = ark_bn254::G2Projective;

/// Number of bits in the base field modulus.
pub const FQ_MODULUS_BITS: usize = 254;

/// Number of bits in the scalar field modulus.
pub const FR_MODULUS_BITS: usize = 254;

#[inline]
pub fn g1_generator() -> G1Affine {
    G1Affine::generator()
}

#[inline]
pub fn g2_generator() -> G2Affine {
    G2Affine::generator()
}
