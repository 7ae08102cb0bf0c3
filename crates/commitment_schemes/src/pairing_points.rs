//! Pairing points for BN254 verification.

use ark_ec::CurveGroup;
use ark_std::UniformRand;
use bbrs_ecc::curves::bn254::{Fr, G1Affine, G1Element};

use crate::verification_key::Bn254VerifierCommitmentKey;

/// Two EC points that represent the inputs to a pairing check
/// e(P0, [1]_2) * e(P1, [x]_2) == 1.
///
/// The points may represent the output of a single partial verification or
/// the linear combination of multiple sets of pairing points (an accumulator).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairingPoints {
    pub p0: G1Affine,
    pub p1: G1Affine,
}

impl PairingPoints {
    /// Pairing points initialized to the point at infinity. These pass the
    /// pairing check trivially.
    pub fn new() -> Self {
        Self {
            p0: G1Affine::identity(),
            p1: G1Affine::identity(),
        }
    }

    pub fn from_points(p0: G1Affine, p1: G1Affine) -> Self {
        Self { p0, p1 }
    }

    /// Aggregate with another set of pairing points using a random scalar.
    pub fn aggregate(&mut self, other: &PairingPoints) {
        let aggregation_separator = Fr::rand(&mut rand::thread_rng());
        self.aggregate_with_separator(other, aggregation_separator);
    }

    /// P0 += separator * other.P0, P1 += separator * other.P1.
    pub fn aggregate_with_separator(&mut self, other: &PairingPoints, separator: Fr) {
        let p0 = G1Element::from(self.p0) + other.p0 * separator;
        let p1 = G1Element::from(self.p1) + other.p1 * separator;
        let normalized = G1Element::normalize_batch(&[p0, p1]);
        self.p0 = normalized[0];
        self.p1 = normalized[1];
    }

    /// Perform the pairing check using a verifier commitment key.
    pub fn check(&self, vkey: &Bn254VerifierCommitmentKey) -> bool {
        vkey.pairing_check(&self.p0, &self.p1)
    }
}

impl Default for PairingPoints {
    fn default() -> Self {
        Self::new()
    }
}
