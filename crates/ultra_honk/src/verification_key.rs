//! Verification key: the fixed shape of a circuit.

use ark_ff::PrimeField;
use bbrs_circuit_builder::execution_trace::ArithmeticGate;
use bbrs_circuit_builder::MegaCircuitBuilder;
use bbrs_ecc::curves::bn254::Fr;
use bbrs_transcript::codec::fr_to_be_bytes;
use sha2::{Digest, Sha256};

/// Everything the verifier needs to know about a circuit apart from its witness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationKey {
    pub circuit_size: usize,
    pub num_variables: usize,
    pub num_public_inputs: usize,
    /// Witness index of each public input, in order.
    pub public_inputs: Vec<u32>,
    /// Copy-constraint map: witness index to the index holding its value.
    pub real_variable_index: Vec<u32>,
    pub gates: Vec<ArithmeticGate>,
    pub num_ecc_op_rows: usize,
}

impl VerificationKey {
    pub fn create(circuit: &MegaCircuitBuilder) -> Self {
        let circuit_size = circuit
            .base
            .get_circuit_subgroup_size(circuit.blocks.get_total_content_size());
        Self {
            circuit_size,
            num_variables: circuit.base.get_num_variables(),
            num_public_inputs: circuit.base.num_public_inputs(),
            public_inputs: circuit.base.public_inputs().to_vec(),
            real_variable_index: circuit.base.real_variable_index.clone(),
            gates: circuit.blocks.arithmetic.gates(),
            num_ecc_op_rows: circuit.blocks.ecc_op.len(),
        }
    }

    /// SHA-256 of the key's contents, reduced into `Fr`.
    pub fn hash(&self) -> Fr {
        let mut hasher = Sha256::new();
        for value in [
            self.circuit_size,
            self.num_variables,
            self.num_public_inputs,
            self.num_ecc_op_rows,
            self.gates.len(),
        ] {
            hasher.update((value as u64).to_be_bytes());
        }
        for index in self.public_inputs.iter().chain(&self.real_variable_index) {
            hasher.update(index.to_be_bytes());
        }
        for gate in &self.gates {
            for wire in gate.wires {
                hasher.update(wire.to_be_bytes());
            }
            for selector in [gate.q_m, gate.q_1, gate.q_2, gate.q_3, gate.q_4, gate.q_c] {
                hasher.update(fr_to_be_bytes(&selector));
            }
        }
        Fr::from_be_bytes_mod_order(&hasher.finalize())
    }
}
