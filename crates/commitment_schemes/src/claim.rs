//! Opening claims for KZG.

use bbrs_ecc::curves::bn254::{Fr, G1Affine};
use bbrs_polynomials::polynomial::Polynomial;

use crate::commitment_key::CommitmentKey;

/// Opening pair (r, v) for some witness polynomial p(X) such that p(r) = v.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpeningPair {
    /// Challenge point r.
    pub challenge: Fr,
    /// Evaluation v = p(r).
    pub evaluation: Fr,
}

/// Polynomial p and an opening pair (r, v) such that p(r) = v.
#[derive(Clone, Debug)]
pub struct ProverOpeningClaim {
    pub polynomial: Polynomial,
    pub opening_pair: OpeningPair,
}

/// Unverified claim (C, r, v) for some witness polynomial p(X) such that
/// C = Commit(p(X)) and p(r) = v.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpeningClaim {
    pub opening_pair: OpeningPair,
    pub commitment: G1Affine,
}

impl OpeningClaim {
    /// Inefficiently verify the claim by recomputing the commitment and
    /// evaluating the polynomial at r.
    pub fn verify(&self, ck: &CommitmentKey, polynomial: &Polynomial) -> bool {
        let real_eval = polynomial.evaluate(&self.opening_pair.challenge);
        if real_eval != self.opening_pair.evaluation {
            return false;
        }
        ck.commit(polynomial) == self.commitment
    }
}
