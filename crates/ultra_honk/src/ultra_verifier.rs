//! Ultra verifier: replays the prover's transcript and re-checks every gate.

use ark_ff::Zero;
use bbrs_commitment_schemes::pairing_points::PairingPoints;
use bbrs_ecc::curves::bn254::{Fr, G1Affine};
use bbrs_transcript::{NativeTranscript, TranscriptError};

use crate::verification_key::VerificationKey;

/// Output of the Ultra verifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UltraVerifierOutput {
    pub verified: bool,
    pub public_inputs: Vec<Fr>,
    /// Deferred pairing check carried by the proof. Not checked here.
    pub pairing_points: PairingPoints,
}

impl UltraVerifierOutput {
    fn failed() -> Self {
        Self {
            verified: false,
            public_inputs: Vec::new(),
            pairing_points: PairingPoints::default(),
        }
    }
}

pub struct UltraVerifier<'a> {
    verification_key: &'a VerificationKey,
}

impl<'a> UltraVerifier<'a> {
    pub fn new(verification_key: &'a VerificationKey) -> Self {
        Self { verification_key }
    }

    pub fn verify(&self, proof: &[Fr]) -> UltraVerifierOutput {
        let mut transcript = NativeTranscript::from_proof(proof);
        let output = self.verify_with_transcript(&mut transcript);
        if !transcript.is_exhausted() {
            return UltraVerifierOutput::failed();
        }
        output
    }

    /// Verify the proof segment at the transcript's read position.
    pub fn verify_with_transcript(&self, transcript: &mut NativeTranscript) -> UltraVerifierOutput {
        self.read_and_check(transcript)
            .unwrap_or_else(|_| UltraVerifierOutput::failed())
    }

    fn read_and_check(
        &self,
        transcript: &mut NativeTranscript,
    ) -> Result<UltraVerifierOutput, TranscriptError> {
        let vk = self.verification_key;
        transcript.add_to_hash_buffer("vk_hash", &vk.hash());
        let circuit_size: u64 = transcript.receive_from_prover("circuit_size")?;

        let public_inputs = (0..vk.num_public_inputs)
            .map(|i| transcript.receive_from_prover::<Fr>(&format!("public_input_{}", i)))
            .collect::<Result<Vec<_>, _>>()?;
        let variables = (0..vk.num_variables)
            .map(|i| transcript.receive_from_prover::<Fr>(&format!("w_{}", i)))
            .collect::<Result<Vec<_>, _>>()?;

        let p0: G1Affine = transcript.receive_from_prover("pairing_points_p0")?;
        let p1: G1Affine = transcript.receive_from_prover("pairing_points_p1")?;

        let value = |witness: u32| -> Option<Fr> {
            let real = *vk.real_variable_index.get(witness as usize)?;
            variables.get(real as usize).copied()
        };

        let size_matches = circuit_size == vk.circuit_size as u64;
        let public_inputs_match = vk
            .public_inputs
            .iter()
            .zip(&public_inputs)
            .all(|(&witness, claimed)| value(witness) == Some(*claimed));
        let gates_satisfied = vk.gates.iter().all(|gate| {
            let mut values = [Fr::zero(); 4];
            for (slot, &wire) in values.iter_mut().zip(&gate.wires) {
                match value(wire) {
                    Some(v) => *slot = v,
                    None => return false,
                }
            }
            gate.evaluate(values).is_zero()
        });

        Ok(UltraVerifierOutput {
            verified: size_matches && public_inputs_match && gates_satisfied,
            public_inputs,
            pairing_points: PairingPoints::from_points(p0, p1),
        })
    }
}
