//! Ultra prover: the reference backend behind [`CircuitProver`].
//!
//! Proof layout on the transcript:
//! 1. `vk_hash` absorbed (not sent)
//! 2. `circuit_size`
//! 3. `public_input_i` for every public input
//! 4. `w_i` for every witness variable
//! 5. `pairing_points_p0`, `pairing_points_p1` (the circuit's deferred pairing check)

use bbrs_circuit_builder::{MegaCircuitBuilder, UltraCircuitChecker};
use bbrs_transcript::NativeTranscript;

use crate::ultra_verifier::{UltraVerifier, UltraVerifierOutput};
use crate::verification_key::VerificationKey;
use crate::{CircuitProver, ProverError};

#[derive(Debug, Clone, Copy, Default)]
pub struct UltraProver;

impl UltraProver {
    pub fn new() -> Self {
        Self
    }
}

impl CircuitProver for UltraProver {
    fn prove_with_transcript(
        &self,
        circuit: &MegaCircuitBuilder,
        transcript: &mut NativeTranscript,
    ) -> Result<VerificationKey, ProverError> {
        UltraCircuitChecker::check(circuit).map_err(ProverError::UnsatisfiedCircuit)?;

        let verification_key = VerificationKey::create(circuit);
        transcript.add_to_hash_buffer("vk_hash", &verification_key.hash());
        transcript.send_to_verifier("circuit_size", &(verification_key.circuit_size as u64));

        for (i, value) in circuit.base.public_input_values().iter().enumerate() {
            transcript.send_to_verifier(&format!("public_input_{}", i), value);
        }
        for (i, value) in circuit.base.get_variables().iter().enumerate() {
            transcript.send_to_verifier(&format!("w_{}", i), value);
        }

        let pairing_points = circuit.pairing_points();
        transcript.send_to_verifier("pairing_points_p0", &pairing_points.p0);
        transcript.send_to_verifier("pairing_points_p1", &pairing_points.p1);

        Ok(verification_key)
    }

    fn verify_with_transcript(
        &self,
        verification_key: &VerificationKey,
        transcript: &mut NativeTranscript,
    ) -> UltraVerifierOutput {
        UltraVerifier::new(verification_key).verify_with_transcript(transcript)
    }
}
