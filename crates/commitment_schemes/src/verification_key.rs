use ark_ec::pairing::Pairing;
use ark_std::One;
use bbrs_ecc::curves::bn254::{g1_generator, g2_generator, Bn254, G1Affine, G2Affine};
use bbrs_srs::factories::{Bn254Crs, Bn254CrsFactory};

/// Verifier commitment key for BN254 KZG.
///
/// Provides pairing-based verification: e(P0, [1]_2) * e(P1, [x]_2) == 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bn254VerifierCommitmentKey {
    g1_identity: G1Affine,
    g2_x: G2Affine,
}

impl Bn254VerifierCommitmentKey {
    /// Construct with a specific G2 SRS point.
    pub fn with_g2x(g2_x: G2Affine) -> Self {
        Self {
            g1_identity: g1_generator(),
            g2_x,
        }
    }

    /// Construct from the global CRS factory, if initialized.
    pub fn from_global_crs() -> Option<Self> {
        let crs = bbrs_srs::global_crs::get_bn254_crs_factory()?.get_verifier_crs();
        Some(Self {
            g1_identity: crs.get_g1_identity(),
            g2_x: crs.get_g2x(),
        })
    }

    /// The G1 identity (first SRS point).
    pub fn get_g1_identity(&self) -> G1Affine {
        self.g1_identity
    }

    pub fn g2_x(&self) -> G2Affine {
        self.g2_x
    }

    /// Returns true iff e(P0, [1]_2) * e(P1, [x]_2) == 1_T.
    pub fn pairing_check(&self, p0: &G1Affine, p1: &G1Affine) -> bool {
        Bn254::multi_pairing([*p0, *p1], [g2_generator(), self.g2_x])
            .0
            .is_one()
    }
}
