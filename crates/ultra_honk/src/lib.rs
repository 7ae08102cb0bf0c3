//! Circuit proving for Goblin.
//!
//! - **`CircuitProver`**: the interface the accumulation layer proves circuits through
//! - **Verification key**: circuit shape plus a hash bound into the transcript
//! - **Ultra prover / verifier**: the reference backend behind the interface
//!
//! The reference backend is transparent. Its proof carries the full witness
//! and the verifier re-evaluates every gate, so it is neither succinct nor
//! zero-knowledge. It does share the Fiat-Shamir transcript with the caller,
//! which is what lets several proofs be chained on one transcript.

pub mod ultra_prover;
pub mod ultra_verifier;
pub mod verification_key;

#[cfg(test)]
mod e2e_tests;

use bbrs_circuit_builder::MegaCircuitBuilder;
use bbrs_ecc::curves::bn254::Fr;
use bbrs_transcript::{NativeTranscript, TranscriptError};
use thiserror::Error;

pub use ultra_prover::UltraProver;
pub use ultra_verifier::{UltraVerifier, UltraVerifierOutput};
pub use verification_key::VerificationKey;

/// A proof is the sequence of field elements the prover sent.
pub type HonkProof = Vec<Fr>;

#[derive(Debug, Error)]
pub enum ProverError {
    #[error("circuit is not satisfied: {0}")]
    UnsatisfiedCircuit(String),
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
}

/// Turns a circuit into a proof and verification key, and checks proofs.
///
/// The `_with_transcript` variants let callers run several provers on one
/// Fiat-Shamir transcript. `prove` and `verify` use a fresh transcript each.
pub trait CircuitProver {
    fn prove_with_transcript(
        &self,
        circuit: &MegaCircuitBuilder,
        transcript: &mut NativeTranscript,
    ) -> Result<VerificationKey, ProverError>;

    fn verify_with_transcript(
        &self,
        verification_key: &VerificationKey,
        transcript: &mut NativeTranscript,
    ) -> UltraVerifierOutput;

    fn prove(&self, circuit: &MegaCircuitBuilder) -> Result<(HonkProof, VerificationKey), ProverError> {
        let mut transcript = NativeTranscript::new();
        let verification_key = self.prove_with_transcript(circuit, &mut transcript)?;
        Ok((transcript.export_proof(), verification_key))
    }

    fn verify(&self, verification_key: &VerificationKey, proof: &[Fr]) -> bool {
        let mut transcript = NativeTranscript::from_proof(proof);
        let output = self.verify_with_transcript(verification_key, &mut transcript);
        output.verified && transcript.is_exhausted()
    }
}
