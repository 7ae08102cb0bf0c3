//! KZG polynomial commitment scheme for BN254 (native path).

use ark_ec::CurveGroup;
use bbrs_ecc::curves::bn254::{g1_generator, G1Affine, G1Element};
use bbrs_transcript::{NativeTranscript, TranscriptError};

use crate::claim::{OpeningClaim, ProverOpeningClaim};
use crate::commitment_key::CommitmentKey;
use crate::pairing_points::PairingPoints;

pub struct KZG;

impl KZG {
    /// Computes the KZG commitment to an opening proof polynomial at a single
    /// evaluation point.
    ///
    /// Given a witness polynomial p(X) and an opening pair (r, v = p(r)),
    /// computes the quotient polynomial q(X) = (p(X) - v) / (X - r),
    /// commits to it, and sends the commitment to the transcript.
    pub fn compute_opening_proof(
        ck: &CommitmentKey,
        opening_claim: ProverOpeningClaim,
        transcript: &mut NativeTranscript,
    ) {
        let mut quotient = opening_claim.polynomial;
        let pair = opening_claim.opening_pair;

        let quotient_commitment = if quotient.is_empty() {
            // Treat the empty polynomial as the zero polynomial
            G1Affine::identity()
        } else {
            if quotient.start_index() != 0 {
                quotient = quotient.full();
            }
            *quotient.at_mut(0) -= pair.evaluation;
            // Compute coefficients for q(X) = (p(X) - v) / (X - r)
            quotient.factor_roots(&pair.challenge);
            ck.commit(&quotient)
        };

        transcript.send_to_verifier("KZG:W", &quotient_commitment);

        // Not used natively; keeps the transcript aligned with the verifier.
        let _masking_challenge = transcript.get_challenge("KZG:masking_challenge");
    }

    /// Computes the input points for the pairing check needed to verify a KZG
    /// opening claim of a single polynomial commitment.
    ///
    /// Returns `PairingPoints { P₀, P₁ }` where:
    ///   - P₀ = C − v⋅[1]₁ + r⋅[W(x)]₁
    ///   - P₁ = −[W(x)]₁
    pub fn reduce_verify(
        claim: &OpeningClaim,
        transcript: &mut NativeTranscript,
    ) -> Result<PairingPoints, TranscriptError> {
        let quotient_commitment: G1Affine = transcript.receive_from_prover("KZG:W")?;
        let _masking_challenge = transcript.get_challenge("KZG:masking_challenge");

        let p0 = G1Element::from(claim.commitment)
            + quotient_commitment * claim.opening_pair.challenge
            - g1_generator() * claim.opening_pair.evaluation;
        let p1 = -quotient_commitment;

        Ok(PairingPoints::from_points(p0.into_affine(), p1))
    }
}
