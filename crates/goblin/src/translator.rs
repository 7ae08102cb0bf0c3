//! Translation stage: carries the trace stage's `Fq` evaluations into a
//! proof over `Fr`.
//!
//! The circuit exposes three `Fq` values as public inputs, each as four
//! 68-bit binary limbs bound to its prime-basis limb (the value reduced
//! mod r): the accumulated result `A = sum_i x^i * (op_i + v*Px_i + v^2*Py_i
//! + v^3*z1_i + v^4*z2_i)`, then `x`, then `v`. Point coordinates of every
//! op are decomposed the same way against the op-log limbs.

use ark_ff::{Field, One, Zero};
use bbrs_circuit_builder::gate_data::{AddQuad, AddTriple};
use bbrs_circuit_builder::MegaCircuitBuilder;
use bbrs_ecc::curves::bn254::{Fq, Fr};
use bbrs_ecc::fields::field_conversion::{
    fq_from_binary_limbs, fq_to_binary_limbs, fq_to_fr_reduced, fr_to_fq, NUM_BINARY_LIMBS,
    NUM_LIMB_BITS, NUM_LO_BITS,
};
use bbrs_op_queue::EccOpQueue;
use bbrs_transcript::NativeTranscript;
use bbrs_ultra_honk::{CircuitProver, HonkProof, VerificationKey};
use tracing::debug;

use crate::eccvm::TranslationChallenges;
use crate::error::GoblinError;
use crate::translation_evaluations::TranslationEvaluations;

/// Public inputs: limbs of `A`, then `x`, then `v`.
pub const NUM_TRANSLATOR_PUBLIC_INPUTS: usize = 3 * NUM_BINARY_LIMBS;

fn limb_shift(k: usize) -> Fr {
    Fr::from(2u64).pow([(k * NUM_LIMB_BITS) as u64])
}

pub struct TranslatorCircuitBuilder {
    circuit: MegaCircuitBuilder,
    accumulated_result: Fq,
}

impl TranslatorCircuitBuilder {
    pub fn new(challenges: &TranslationChallenges, op_queue: &EccOpQueue) -> Self {
        let x = challenges.evaluation_challenge_x;
        let v = challenges.batching_challenge_v;
        let v_powers = [v, v.square(), v.square() * v, v.square().square()];

        let accumulated_result = op_queue.raw_ops().iter().rev().fold(Fq::zero(), |acc, op| {
            let (px, py) = op.coordinates();
            let batched = Fq::from(op.op_code.value())
                + v_powers[0] * px
                + v_powers[1] * py
                + v_powers[2] * fr_to_fq(&op.z_1)
                + v_powers[3] * fr_to_fq(&op.z_2);
            acc * x + batched
        });

        let mut circuit = MegaCircuitBuilder::new();
        for value in [accumulated_result, x, v] {
            Self::add_public_fq_element(&mut circuit, &value);
        }

        for op in op_queue.raw_ops() {
            let ultra = op.to_ultra_op();
            let (px, py) = op.coordinates();
            for (value, lo, hi) in [(px, ultra.x_lo, ultra.x_hi), (py, ultra.y_lo, ultra.y_hi)] {
                let lo = circuit.add_variable(lo);
                let hi = circuit.add_variable(hi);
                let reduced = circuit.add_variable(fq_to_fr_reduced(&value));
                // lo + 2^136 * hi = value mod r
                circuit.create_add_gate(&AddTriple {
                    a: lo,
                    b: hi,
                    c: reduced,
                    a_scaling: Fr::one(),
                    b_scaling: Fr::from(2u64).pow([NUM_LO_BITS as u64]),
                    c_scaling: -Fr::one(),
                    const_scaling: Fr::zero(),
                });
            }
        }

        debug!(num_gates = circuit.num_gates(), "translator circuit constructed");
        Self {
            circuit,
            accumulated_result,
        }
    }

    /// Add `value` as four public binary limbs and a private prime-basis
    /// limb, with two gates tying them together.
    fn add_public_fq_element(circuit: &mut MegaCircuitBuilder, value: &Fq) {
        let limbs = fq_to_binary_limbs(value);
        let indices = limbs.map(|limb| circuit.add_public_variable(limb));
        let partial =
            circuit.add_variable(limbs[0] + limb_shift(1) * limbs[1] + limb_shift(2) * limbs[2]);
        let prime = circuit.add_variable(fq_to_fr_reduced(value));

        circuit.create_big_add_gate(&AddQuad {
            a: indices[0],
            b: indices[1],
            c: indices[2],
            d: partial,
            a_scaling: Fr::one(),
            b_scaling: limb_shift(1),
            c_scaling: limb_shift(2),
            d_scaling: -Fr::one(),
            const_scaling: Fr::zero(),
        });
        circuit.create_add_gate(&AddTriple {
            a: partial,
            b: indices[3],
            c: prime,
            a_scaling: Fr::one(),
            b_scaling: limb_shift(3),
            c_scaling: -Fr::one(),
            const_scaling: Fr::zero(),
        });
    }

    pub fn circuit(&self) -> &MegaCircuitBuilder {
        &self.circuit
    }

    pub fn accumulated_result(&self) -> Fq {
        self.accumulated_result
    }
}

pub struct TranslatorProver {
    builder: TranslatorCircuitBuilder,
}

impl TranslatorProver {
    pub fn new(challenges: &TranslationChallenges, op_queue: &EccOpQueue) -> Self {
        Self {
            builder: TranslatorCircuitBuilder::new(challenges, op_queue),
        }
    }

    /// Continue `transcript` from the trace stage and export the new segment.
    pub fn construct_proof<P: CircuitProver>(
        &self,
        prover: &P,
        transcript: &mut NativeTranscript,
    ) -> Result<(HonkProof, VerificationKey), GoblinError> {
        let verification_key = prover.prove_with_transcript(self.builder.circuit(), transcript)?;
        Ok((transcript.export_proof(), verification_key))
    }
}

pub struct TranslatorVerifier<'a, P: CircuitProver> {
    prover: &'a P,
    verification_key: &'a VerificationKey,
    challenges: TranslationChallenges,
    accumulated_result: Option<Fq>,
}

impl<'a, P: CircuitProver> TranslatorVerifier<'a, P> {
    pub fn new(
        prover: &'a P,
        verification_key: &'a VerificationKey,
        challenges: TranslationChallenges,
    ) -> Self {
        Self {
            prover,
            verification_key,
            challenges,
            accumulated_result: None,
        }
    }

    /// Verify the translator proof on the transcript the trace verifier left
    /// off, and check its public `x` and `v` are the challenges derived there.
    pub fn verify_proof(&mut self, proof: &[Fr], transcript: &mut NativeTranscript) -> bool {
        transcript.load_proof(proof);
        let output = self
            .prover
            .verify_with_transcript(self.verification_key, transcript);
        let consumed = transcript.is_exhausted();

        let public_inputs = &output.public_inputs;
        if public_inputs.len() != NUM_TRANSLATOR_PUBLIC_INPUTS {
            return false;
        }
        let limbs = |k: usize| -> [Fr; NUM_BINARY_LIMBS] {
            std::array::from_fn(|i| public_inputs[k * NUM_BINARY_LIMBS + i])
        };
        let challenges_match = limbs(1) == fq_to_binary_limbs(&self.challenges.evaluation_challenge_x)
            && limbs(2) == fq_to_binary_limbs(&self.challenges.batching_challenge_v);
        self.accumulated_result = fq_from_binary_limbs(&limbs(0));

        output.verified && consumed && challenges_match
    }

    /// `A == op + v*Px + v^2*Py + v^3*z1 + v^4*z2` over the evaluations the
    /// trace stage claimed. False until [`Self::verify_proof`] has read `A`.
    pub fn verify_translation(&self, translation_evaluations: &TranslationEvaluations) -> bool {
        self.accumulated_result.is_some_and(|accumulated| {
            accumulated == translation_evaluations.batch(&self.challenges.batching_challenge_v)
        })
    }
}
