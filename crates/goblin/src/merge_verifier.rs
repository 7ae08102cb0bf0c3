//! Verifier for the merge argument.
//!
//! Replays the prover's transcript to recover `kappa`, `alpha`, the claimed
//! commitments and evaluations, then evaluates each check independently:
//! commitment additivity, the evaluation identity at `kappa`, the batched KZG
//! opening, and (when expected commitments are given) that `[T_i]` matches
//! the aggregate the caller holds.

use ark_ec::CurveGroup;
use ark_ff::{One, Zero};
use bbrs_commitment_schemes::batch_mul::batch_mul_native;
use bbrs_commitment_schemes::claim::{OpeningClaim, OpeningPair};
use bbrs_commitment_schemes::kzg::KZG;
use bbrs_commitment_schemes::pairing_points::PairingPoints;
use bbrs_commitment_schemes::verification_key::Bn254VerifierCommitmentKey;
use bbrs_ecc::curves::bn254::{Fr, G1Affine, G1Element};
use bbrs_op_queue::NUM_WIRES;
use bbrs_transcript::{NativeTranscript, TranscriptError};
use tracing::debug;

/// Claimed evaluations of `T_{i-1}`, `t_i^{shift}` and `T_i` for one column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ColumnEvaluations {
    pub previous: Fr,
    pub shift: Fr,
    pub current: Fr,
}

/// Merge checks that do not need a pairing, plus the deferred pairing inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeReduction {
    pub proof_parsed: bool,
    pub commitments_additive: bool,
    pub evaluations_consistent: bool,
    pub aggregate_linked: bool,
    pub evaluations: [ColumnEvaluations; NUM_WIRES],
    pub current_commitments: [G1Affine; NUM_WIRES],
    pub pairing_points: PairingPoints,
}

impl MergeReduction {
    fn unparsed() -> Self {
        Self {
            proof_parsed: false,
            commitments_additive: false,
            evaluations_consistent: false,
            aggregate_linked: false,
            evaluations: [ColumnEvaluations::default(); NUM_WIRES],
            current_commitments: [G1Affine::identity(); NUM_WIRES],
            pairing_points: PairingPoints::default(),
        }
    }
}

/// Result of each merge check. None of them short-circuits another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeVerifierOutput {
    pub proof_parsed: bool,
    pub commitments_additive: bool,
    pub evaluations_consistent: bool,
    pub opening_verified: bool,
    pub aggregate_linked: bool,
}

impl MergeVerifierOutput {
    pub fn verified(&self) -> bool {
        self.proof_parsed
            && self.commitments_additive
            && self.evaluations_consistent
            && self.opening_verified
            && self.aggregate_linked
    }
}

pub(crate) struct ParsedMergeProof {
    prev_commitments: [G1Affine; NUM_WIRES],
    shift_commitments: [G1Affine; NUM_WIRES],
    current_commitments: [G1Affine; NUM_WIRES],
    evaluations: [ColumnEvaluations; NUM_WIRES],
    pairing_points: PairingPoints,
}

pub struct MergeVerifier {
    pcs_verification_key: Bn254VerifierCommitmentKey,
}

impl MergeVerifier {
    pub fn new(pcs_verification_key: Bn254VerifierCommitmentKey) -> Self {
        Self {
            pcs_verification_key,
        }
    }

    /// Run every merge check, including the pairing.
    ///
    /// `expected` is the aggregate commitment the caller believes the proof
    /// ends at. `None` skips that check.
    pub fn verify_proof(
        &self,
        proof: &[Fr],
        expected: Option<&[G1Affine; NUM_WIRES]>,
    ) -> MergeVerifierOutput {
        let reduction = Self::reduce(proof, expected);
        let opening_verified =
            reduction.proof_parsed && reduction.pairing_points.check(&self.pcs_verification_key);
        let output = MergeVerifierOutput {
            proof_parsed: reduction.proof_parsed,
            commitments_additive: reduction.commitments_additive,
            evaluations_consistent: reduction.evaluations_consistent,
            opening_verified,
            aggregate_linked: reduction.aggregate_linked,
        };
        debug!(?output, "merge verification");
        output
    }

    /// Everything except the final pairing, which is returned for the caller
    /// to check or defer.
    pub fn reduce(proof: &[Fr], expected: Option<&[G1Affine; NUM_WIRES]>) -> MergeReduction {
        let mut transcript = NativeTranscript::from_proof(proof);
        let parsed = match Self::read_proof(&mut transcript) {
            Ok(parsed) if transcript.is_exhausted() => parsed,
            _ => return MergeReduction::unparsed(),
        };

        let commitments_additive = (0..NUM_WIRES).all(|j| {
            (G1Element::from(parsed.prev_commitments[j]) + parsed.shift_commitments[j])
                .into_affine()
                == parsed.current_commitments[j]
        });
        let evaluations_consistent = parsed
            .evaluations
            .iter()
            .all(|e| e.current == e.previous + e.shift);
        let aggregate_linked = expected.map_or(true, |expected| {
            *expected == parsed.current_commitments
        });

        MergeReduction {
            proof_parsed: true,
            commitments_additive,
            evaluations_consistent,
            aggregate_linked,
            evaluations: parsed.evaluations,
            current_commitments: parsed.current_commitments,
            pairing_points: parsed.pairing_points,
        }
    }

    pub(crate) fn read_proof(transcript: &mut NativeTranscript) -> Result<ParsedMergeProof, TranscriptError> {
        let mut prev_commitments = [G1Affine::identity(); NUM_WIRES];
        let mut shift_commitments = [G1Affine::identity(); NUM_WIRES];
        let mut current_commitments = [G1Affine::identity(); NUM_WIRES];
        for j in 0..NUM_WIRES {
            let suffix = j + 1;
            prev_commitments[j] = transcript.receive_from_prover(&format!("T_PREV_{}", suffix))?;
            shift_commitments[j] = transcript.receive_from_prover(&format!("t_SHIFT_{}", suffix))?;
            current_commitments[j] =
                transcript.receive_from_prover(&format!("T_CURRENT_{}", suffix))?;
        }

        let kappa = transcript.get_challenge("kappa");

        let mut evaluations = [ColumnEvaluations::default(); NUM_WIRES];
        for (j, e) in evaluations.iter_mut().enumerate() {
            e.previous = transcript.receive_from_prover(&format!("T_prev_eval_{}", j + 1))?;
        }
        for (j, e) in evaluations.iter_mut().enumerate() {
            e.shift = transcript.receive_from_prover(&format!("t_shift_eval_{}", j + 1))?;
        }
        for (j, e) in evaluations.iter_mut().enumerate() {
            e.current = transcript.receive_from_prover(&format!("T_current_eval_{}", j + 1))?;
        }

        let alpha = transcript.get_challenge("alpha");

        // Same claim order as the prover: all previous, all shift, all current.
        let commitments: Vec<G1Affine> = prev_commitments
            .iter()
            .chain(&shift_commitments)
            .chain(&current_commitments)
            .copied()
            .collect();
        let claimed: Vec<Fr> = evaluations
            .iter()
            .map(|e| e.previous)
            .chain(evaluations.iter().map(|e| e.shift))
            .chain(evaluations.iter().map(|e| e.current))
            .collect();

        let mut scalars = Vec::with_capacity(commitments.len());
        let mut batched_eval = Fr::zero();
        let mut alpha_pow = Fr::one();
        for value in &claimed {
            scalars.push(alpha_pow);
            batched_eval += alpha_pow * value;
            alpha_pow *= alpha;
        }
        let batched_commitment = batch_mul_native(&commitments, &scalars);

        let pairing_points = KZG::reduce_verify(
            &OpeningClaim {
                opening_pair: OpeningPair {
                    challenge: kappa,
                    evaluation: batched_eval,
                },
                commitment: batched_commitment,
            },
            transcript,
        )?;

        Ok(ParsedMergeProof {
            prev_commitments,
            shift_commitments,
            current_commitments,
            evaluations,
            pairing_points,
        })
    }
}
