//! Trace stage: proves the final op queue is a valid execution trace of
//! ECC operations, and produces the translation evaluations.
//!
//! The trace circuit holds one set of witnesses per raw op. Op codes are
//! constrained to `{0, 3, 4, 8}`, and the running accumulator is replayed so
//! every eq-and-reset row is pinned to the point accumulated before it.

use ark_ec::CurveGroup;
use ark_ff::{One, Zero};
use bbrs_circuit_builder::gate_data::{ArithmeticTriple, MulQuad};
use bbrs_circuit_builder::MegaCircuitBuilder;
use bbrs_ecc::curves::bn254::{Fq, Fr, G1Element};
use bbrs_ecc::fields::field_conversion::fr_to_fq;
use bbrs_op_queue::{EccOp, EccOpCode, EccOpQueue};
use bbrs_transcript::NativeTranscript;
use bbrs_ultra_honk::{CircuitProver, HonkProof, VerificationKey};
use tracing::debug;

use crate::error::GoblinError;
use crate::translation_evaluations::TranslationEvaluations;

/// Challenges the trace stage hands to the translation stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TranslationChallenges {
    pub evaluation_challenge_x: Fq,
    pub batching_challenge_v: Fq,
}

impl TranslationChallenges {
    /// Derive `x`, absorb the evaluations, then derive `v`. Prover and
    /// verifier both run this after the trace proof.
    fn derive(
        transcript: &mut NativeTranscript,
        evaluations: impl FnOnce(&Fq) -> TranslationEvaluations,
    ) -> (Self, TranslationEvaluations) {
        let x = fr_to_fq(&transcript.get_challenge("Translation:evaluation_challenge_x"));
        let translation_evaluations = evaluations(&x);
        transcript.add_to_hash_buffer("Translation:evaluations", &translation_evaluations);
        let v = fr_to_fq(&transcript.get_challenge("Translation:batching_challenge_v"));
        (
            Self {
                evaluation_challenge_x: x,
                batching_challenge_v: v,
            },
            translation_evaluations,
        )
    }
}

pub struct EccvmCircuitBuilder {
    circuit: MegaCircuitBuilder,
    num_ops: usize,
}

impl EccvmCircuitBuilder {
    pub fn new(op_queue: &EccOpQueue) -> Self {
        let mut circuit = MegaCircuitBuilder::new();
        let mut accumulator = G1Element::zero();

        for op in op_queue.raw_ops() {
            let ultra = op.to_ultra_op();
            let op_idx = circuit.add_variable(ultra.op);
            Self::constrain_op_code(&mut circuit, op_idx);
            let x_lo = circuit.add_variable(ultra.x_lo);
            let x_hi = circuit.add_variable(ultra.x_hi);
            let y_lo = circuit.add_variable(ultra.y_lo);
            let y_hi = circuit.add_variable(ultra.y_hi);
            circuit.add_variable(ultra.z_1);
            circuit.add_variable(ultra.z_2);

            match op.op_code {
                EccOpCode::Add => accumulator += op.base_point,
                EccOpCode::Mul => accumulator += op.base_point * op.scalar(),
                EccOpCode::EqAndReset => {
                    let expected = EccOp::eq_and_reset(accumulator.into_affine()).to_ultra_op();
                    for (limb, value) in [
                        (x_lo, expected.x_lo),
                        (x_hi, expected.x_hi),
                        (y_lo, expected.y_lo),
                        (y_hi, expected.y_hi),
                    ] {
                        circuit.assert_equal_constant(
                            limb,
                            value,
                            "eq-and-reset point differs from the accumulator",
                        );
                    }
                    accumulator = G1Element::zero();
                }
                EccOpCode::NoOp => {}
            }
        }

        Self {
            circuit,
            num_ops: op_queue.num_ops(),
        }
    }

    /// `op * (op - 3) * (op - 4) * (op - 8) = 0`, split over three gates.
    fn constrain_op_code(circuit: &mut MegaCircuitBuilder, op: u32) {
        let value = circuit.get_variable(op);
        let three = Fr::from(3u64);
        let four = Fr::from(4u64);
        let eight = Fr::from(8u64);
        let t1 = circuit.add_variable(value * (value - three));
        let t2 = circuit.add_variable((value - four) * (value - eight));
        let zero = circuit.zero_idx();

        // t1 = op^2 - 3 op
        circuit.create_big_mul_add_gate(&MulQuad {
            a: op,
            b: op,
            c: t1,
            d: zero,
            mul_scaling: Fr::one(),
            a_scaling: -three,
            b_scaling: Fr::zero(),
            c_scaling: -Fr::one(),
            d_scaling: Fr::zero(),
            const_scaling: Fr::zero(),
        });
        // t2 = op^2 - 12 op + 32
        circuit.create_big_mul_add_gate(&MulQuad {
            a: op,
            b: op,
            c: t2,
            d: zero,
            mul_scaling: Fr::one(),
            a_scaling: -Fr::from(12u64),
            b_scaling: Fr::zero(),
            c_scaling: -Fr::one(),
            d_scaling: Fr::zero(),
            const_scaling: Fr::from(32u64),
        });
        circuit.create_arithmetic_gate(&ArithmeticTriple {
            a: t1,
            b: t2,
            c: zero,
            q_m: Fr::one(),
            q_l: Fr::zero(),
            q_r: Fr::zero(),
            q_o: Fr::zero(),
            q_c: Fr::zero(),
        });
    }

    pub fn circuit(&self) -> &MegaCircuitBuilder {
        &self.circuit
    }

    pub fn num_ops(&self) -> usize {
        self.num_ops
    }
}

/// `sum_i x^i * value_i` over `Fq` for each of the five op columns.
pub fn compute_translation_evaluations(ops: &[EccOp], x: &Fq) -> TranslationEvaluations {
    ops.iter()
        .rev()
        .fold(TranslationEvaluations::default(), |acc, op| {
            let (px, py) = op.coordinates();
            TranslationEvaluations {
                op: acc.op * x + Fq::from(op.op_code.value()),
                px: acc.px * x + px,
                py: acc.py * x + py,
                z1: acc.z1 * x + fr_to_fq(&op.z_1),
                z2: acc.z2 * x + fr_to_fq(&op.z_2),
            }
        })
}

pub struct EccvmProverOutput {
    pub proof: HonkProof,
    pub verification_key: VerificationKey,
    pub translation_evaluations: TranslationEvaluations,
    pub challenges: TranslationChallenges,
}

pub struct EccvmProver<'a> {
    builder: EccvmCircuitBuilder,
    ops: &'a [EccOp],
}

impl<'a> EccvmProver<'a> {
    pub fn new(op_queue: &'a EccOpQueue) -> Self {
        Self {
            builder: EccvmCircuitBuilder::new(op_queue),
            ops: op_queue.raw_ops(),
        }
    }

    /// Prove the trace circuit on `transcript`, which the translation stage
    /// continues afterwards.
    pub fn construct_proof<P: CircuitProver>(
        &self,
        prover: &P,
        transcript: &mut NativeTranscript,
    ) -> Result<EccvmProverOutput, GoblinError> {
        debug!(num_ops = self.builder.num_ops(), "constructing eccvm proof");
        let verification_key = prover.prove_with_transcript(self.builder.circuit(), transcript)?;
        let (challenges, translation_evaluations) =
            TranslationChallenges::derive(transcript, |x| compute_translation_evaluations(self.ops, x));
        Ok(EccvmProverOutput {
            proof: transcript.export_proof(),
            verification_key,
            translation_evaluations,
            challenges,
        })
    }
}

pub struct EccvmVerifier<'a, P: CircuitProver> {
    prover: &'a P,
    verification_key: &'a VerificationKey,
}

impl<'a, P: CircuitProver> EccvmVerifier<'a, P> {
    pub fn new(prover: &'a P, verification_key: &'a VerificationKey) -> Self {
        Self {
            prover,
            verification_key,
        }
    }

    /// Verify the trace proof and re-derive the translation challenges,
    /// absorbing the evaluations the proof claims.
    pub fn verify_proof(
        &self,
        proof: &[Fr],
        translation_evaluations: &TranslationEvaluations,
        transcript: &mut NativeTranscript,
    ) -> (bool, TranslationChallenges) {
        transcript.load_proof(proof);
        let output = self
            .prover
            .verify_with_transcript(self.verification_key, transcript);
        let consumed = transcript.is_exhausted();
        let (challenges, _) = TranslationChallenges::derive(transcript, |_| *translation_evaluations);
        (output.verified && consumed, challenges)
    }
}
