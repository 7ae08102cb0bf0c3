//! The assembled Goblin proof and its four-part verifier.

use bbrs_commitment_schemes::verification_key::Bn254VerifierCommitmentKey;
use bbrs_ecc::curves::bn254::{Fr, G1Affine};
use bbrs_op_queue::NUM_WIRES;
use bbrs_transcript::NativeTranscript;
use bbrs_ultra_honk::{CircuitProver, HonkProof, VerificationKey};
use tracing::{debug, info, info_span};

use crate::eccvm::EccvmVerifier;
use crate::merge_verifier::MergeVerifier;
use crate::translation_evaluations::TranslationEvaluations;
use crate::translator::TranslatorVerifier;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GoblinProof {
    pub merge_proof: HonkProof,
    pub eccvm_proof: HonkProof,
    pub translator_proof: HonkProof,
    pub translation_evaluations: TranslationEvaluations,
}

impl GoblinProof {
    /// Total number of `Fr` elements across the four components.
    pub fn size(&self) -> usize {
        self.merge_proof.len()
            + self.eccvm_proof.len()
            + self.translator_proof.len()
            + TranslationEvaluations::SIZE
    }

    pub fn to_buffer(&self) -> Vec<Fr> {
        let mut buffer = Vec::with_capacity(self.size());
        buffer.extend_from_slice(&self.merge_proof);
        buffer.extend_from_slice(&self.eccvm_proof);
        buffer.extend_from_slice(&self.translator_proof);
        buffer.extend(self.translation_evaluations.to_buffer());
        buffer
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GoblinVerificationOutput {
    pub merge_verified: bool,
    pub eccvm_verified: bool,
    pub translator_verified: bool,
    pub translation_verified: bool,
}

impl GoblinVerificationOutput {
    pub fn all_verified(&self) -> bool {
        self.merge_verified && self.eccvm_verified && self.translator_verified && self.translation_verified
    }
}

pub struct GoblinVerifier<'a, P: CircuitProver> {
    prover: &'a P,
    pcs_verification_key: Bn254VerifierCommitmentKey,
    eccvm_verification_key: &'a VerificationKey,
    translator_verification_key: &'a VerificationKey,
    expected_commitments: Option<[G1Affine; NUM_WIRES]>,
    verbose: bool,
}

impl<'a, P: CircuitProver> GoblinVerifier<'a, P> {
    pub fn new(
        prover: &'a P,
        pcs_verification_key: Bn254VerifierCommitmentKey,
        eccvm_verification_key: &'a VerificationKey,
        translator_verification_key: &'a VerificationKey,
    ) -> Self {
        Self {
            prover,
            pcs_verification_key,
            eccvm_verification_key,
            translator_verification_key,
            expected_commitments: None,
            verbose: false,
        }
    }

    /// Require the merge proof to end at these aggregate commitments.
    pub fn with_expected_commitments(mut self, commitments: [G1Affine; NUM_WIRES]) -> Self {
        self.expected_commitments = Some(commitments);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Evaluate all four checks. A failing check does not stop the others.
    pub fn verify(&self, proof: &GoblinProof) -> GoblinVerificationOutput {
        let _span = info_span!("Goblin::verify", proof_size = proof.size()).entered();

        let merge_verified = MergeVerifier::new(self.pcs_verification_key)
            .verify_proof(&proof.merge_proof, self.expected_commitments.as_ref())
            .verified();

        let mut transcript = NativeTranscript::new();
        let (eccvm_verified, challenges) =
            EccvmVerifier::new(self.prover, self.eccvm_verification_key).verify_proof(
                &proof.eccvm_proof,
                &proof.translation_evaluations,
                &mut transcript,
            );

        let mut translator_verifier =
            TranslatorVerifier::new(self.prover, self.translator_verification_key, challenges);
        let translator_verified = translator_verifier.verify_proof(&proof.translator_proof, &mut transcript);
        let translation_verified = translator_verifier.verify_translation(&proof.translation_evaluations);

        let output = GoblinVerificationOutput {
            merge_verified,
            eccvm_verified,
            translator_verified,
            translation_verified,
        };
        for (check, passed) in [
            ("merge", merge_verified),
            ("eccvm", eccvm_verified),
            ("translator", translator_verified),
            ("translation", translation_verified),
        ] {
            if self.verbose {
                info!(check, passed, "goblin verification");
            } else {
                debug!(check, passed, "goblin verification");
            }
        }
        output
    }
}
