//! Embeds verification of a merge proof into the next circuit.
//!
//! The merge verifier runs natively up to the final pairing. Its outcome is
//! then loaded into the circuit: each column's evaluation triple becomes
//! witnesses bound by `previous + shift - current = 0`, and each remaining
//! check becomes a boolean witness fixed to one. A failed check therefore
//! leaves the circuit unsatisfiable. The pairing is deferred and returned.

use ark_ff::{One, Zero};
use bbrs_circuit_builder::gate_data::AddTriple;
use bbrs_circuit_builder::MegaCircuitBuilder;
use bbrs_commitment_schemes::pairing_points::PairingPoints;
use bbrs_ecc::curves::bn254::{Fr, G1Affine};
use bbrs_op_queue::NUM_WIRES;
use tracing::warn;

use crate::merge_verifier::MergeVerifier;

/// Add constraints verifying `proof` to `builder` and return the pairing
/// points the caller must eventually check.
pub fn embed_merge_verification(
    builder: &mut MegaCircuitBuilder,
    proof: &[Fr],
    expected: Option<&[G1Affine; NUM_WIRES]>,
) -> PairingPoints {
    let reduction = MergeVerifier::reduce(proof, expected);

    for evaluations in &reduction.evaluations {
        let previous = builder.add_variable(evaluations.previous);
        let shift = builder.add_variable(evaluations.shift);
        let current = builder.add_variable(evaluations.current);
        builder.create_add_gate(&AddTriple {
            a: previous,
            b: shift,
            c: current,
            a_scaling: Fr::one(),
            b_scaling: Fr::one(),
            c_scaling: -Fr::one(),
            const_scaling: Fr::zero(),
        });
    }

    for (name, passed) in [
        ("proof_parsed", reduction.proof_parsed),
        ("commitments_additive", reduction.commitments_additive),
        ("aggregate_linked", reduction.aggregate_linked),
    ] {
        if !passed {
            warn!(check = name, "recursive merge verification failed");
        }
        let witness = builder.add_variable(Fr::from(u64::from(passed)));
        builder.create_bool_gate(witness);
        builder.fix_witness(witness, Fr::one());
    }

    reduction.pairing_points
}
