//! Prover for the merge argument.
//!
//! Let `T_i^(j)` be column `j` of the aggregate op queue after the present
//! circuit's contribution and `T_{i-1}^(j)` the aggregate before it. With
//! `t_i^(j)` the present circuit's ops right-shifted by `M_{i-1} = |T_{i-1}|`,
//! the protocol shows `T_i = T_{i-1} + t_i` for every column by a
//! Schwartz-Zippel check at a challenge `kappa`. The `3 * NUM_WIRES` opening
//! claims are batched with powers of `alpha` and proven with a single KZG
//! opening.

use ark_ec::CurveGroup;
use ark_ff::{One, Zero};
use bbrs_commitment_schemes::claim::{OpeningPair, ProverOpeningClaim};
use bbrs_commitment_schemes::commitment_key::CommitmentKey;
use bbrs_commitment_schemes::kzg::KZG;
use bbrs_ecc::curves::bn254::{Fr, G1Affine, G1Element};
use bbrs_op_queue::{EccOpQueue, NUM_WIRES};
use bbrs_polynomials::polynomial::Polynomial;
use bbrs_transcript::NativeTranscript;
use bbrs_ultra_honk::HonkProof;
use rayon::prelude::*;
use tracing::debug;

use crate::error::GoblinError;

pub struct MergeProver<'a> {
    op_queue: &'a mut EccOpQueue,
    commitment_key: &'a CommitmentKey,
    pub transcript: NativeTranscript,
}

impl<'a> MergeProver<'a> {
    pub fn new(op_queue: &'a mut EccOpQueue, commitment_key: &'a CommitmentKey) -> Self {
        Self {
            op_queue,
            commitment_key,
            transcript: NativeTranscript::new(),
        }
    }

    /// Prove the aggregate op queue was extended correctly by the most
    /// recent append, and cache `[T_i]` in the op queue for the next step.
    pub fn construct_proof(&mut self) -> Result<HonkProof, GoblinError> {
        let n = self.op_queue.current_size();
        let m = self.op_queue.previous_size();

        if self.commitment_key.srs_size() < n {
            return Err(GoblinError::CommitmentKeyTooSmall {
                required: n,
                available: self.commitment_key.srs_size(),
            });
        }
        // TODO: drop this once the commitment key can represent the empty polynomial
        // and the bootstrap row is no longer needed.
        if m == 0 {
            return Err(GoblinError::EmptyPreviousAggregate);
        }
        let prev_commitments = *self
            .op_queue
            .cached_commitments()
            .ok_or(GoblinError::MissingCommitmentData)?;

        debug!(previous_size = m, current_size = n, "constructing merge proof");

        let current = self.op_queue.snapshot_current();
        let previous = self.op_queue.snapshot_previous();
        let t_current: [Polynomial; NUM_WIRES] =
            std::array::from_fn(|j| Polynomial::from_coefficients(current[j].to_vec(), n));
        let t_prev: [Polynomial; NUM_WIRES] =
            std::array::from_fn(|j| Polynomial::from_coefficients(previous[j].to_vec(), n));
        // t_i^{shift}: the new ops occupy [M_{i-1}, N) only
        let t_shift: [Polynomial; NUM_WIRES] = std::array::from_fn(|j| {
            Polynomial::from_coefficients(current[j][m..].to_vec(), n).right_shifted(m)
        });

        let shift_refs: Vec<&Polynomial> = t_shift.iter().collect();
        let shift_commitments = self.commitment_key.batch_commit(&shift_refs);
        let current_commitments: [G1Affine; NUM_WIRES] = std::array::from_fn(|j| {
            (G1Element::from(prev_commitments[j]) + shift_commitments[j]).into_affine()
        });

        for j in 0..NUM_WIRES {
            let suffix = j + 1;
            self.transcript
                .send_to_verifier(&format!("T_PREV_{}", suffix), &prev_commitments[j]);
            self.transcript
                .send_to_verifier(&format!("t_SHIFT_{}", suffix), &shift_commitments[j]);
            self.transcript
                .send_to_verifier(&format!("T_CURRENT_{}", suffix), &current_commitments[j]);
        }

        // [T_i] becomes [T_{i-1}] for the next merge
        self.op_queue.cache_commitments(current_commitments);

        let kappa = self.transcript.get_challenge("kappa");

        let claims: Vec<(&Polynomial, &str)> = t_prev
            .iter()
            .map(|p| (p, "T_prev_eval_"))
            .chain(t_shift.iter().map(|p| (p, "t_shift_eval_")))
            .chain(t_current.iter().map(|p| (p, "T_current_eval_")))
            .collect();
        let evaluations: Vec<Fr> = claims
            .par_iter()
            .map(|(polynomial, _)| polynomial.evaluate(&kappa))
            .collect();
        for (i, ((_, label), evaluation)) in claims.iter().zip(&evaluations).enumerate() {
            let suffix = i % NUM_WIRES + 1;
            self.transcript
                .send_to_verifier(&format!("{}{}", label, suffix), evaluation);
        }

        let alpha = self.transcript.get_challenge("alpha");

        let mut batched_polynomial = Polynomial::new(n, n, 0);
        let mut batched_eval = Fr::zero();
        let mut alpha_pow = Fr::one();
        for ((polynomial, _), evaluation) in claims.iter().zip(&evaluations) {
            batched_polynomial.add_scaled(&polynomial.as_span(), alpha_pow);
            batched_eval += alpha_pow * evaluation;
            alpha_pow *= alpha;
        }

        KZG::compute_opening_proof(
            self.commitment_key,
            ProverOpeningClaim {
                polynomial: batched_polynomial,
                opening_pair: OpeningPair {
                    challenge: kappa,
                    evaluation: batched_eval,
                },
            },
            &mut self.transcript,
        );

        Ok(self.transcript.export_proof())
    }
}
