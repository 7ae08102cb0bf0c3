//! The accumulation session.
//!
//! A [`Goblin`] owns the op queue. Each circuit stages its ECC ops in its
//! builder; `accumulate` (or `merge`) appends them and proves the append with
//! a merge proof. From the second step on, the circuit first takes on the
//! verification of the previous merge proof, so it cannot be satisfied
//! unless every earlier append was correct.

use bbrs_circuit_builder::MegaCircuitBuilder;
use bbrs_commitment_schemes::commitment_key::CommitmentKey;
use bbrs_commitment_schemes::verification_key::Bn254VerifierCommitmentKey;
use bbrs_op_queue::EccOpQueue;
use bbrs_transcript::NativeTranscript;
use bbrs_ultra_honk::{CircuitProver, HonkProof, UltraProver, VerificationKey};
use tracing::{debug, info, info_span};

use crate::config::GoblinConfig;
use crate::eccvm::EccvmProver;
use crate::error::GoblinError;
use crate::goblin_verifier::{GoblinProof, GoblinVerificationOutput, GoblinVerifier};
use crate::merge_prover::MergeProver;
use crate::merge_recursive_verifier::embed_merge_verification;
use crate::mock_circuits::GoblinMockCircuits;
use crate::translator::TranslatorProver;

/// Where the session is in the accumulation chain. There is no way back to
/// `NoPriorMerge` once a merge proof exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccumulationState {
    NoPriorMerge,
    HasPriorMerge { merge_proof: HonkProof },
}

/// Main proof of one accumulated circuit.
#[derive(Clone, Debug)]
pub struct AccumulationOutput {
    pub proof: HonkProof,
    pub verification_key: VerificationKey,
}

pub struct Goblin<P: CircuitProver = UltraProver> {
    config: GoblinConfig,
    prover: P,
    op_queue: EccOpQueue,
    commitment_key: CommitmentKey,
    pcs_verification_key: Bn254VerifierCommitmentKey,
    pub(crate) state: AccumulationState,
    eccvm_verification_key: Option<VerificationKey>,
    translator_verification_key: Option<VerificationKey>,
}

impl<P: CircuitProver> Goblin<P> {
    /// Start a session with keys taken from the global CRS.
    pub fn new(config: GoblinConfig, prover: P) -> Result<Self, GoblinError> {
        let requested = config.commitment_key_size;
        let commitment_key =
            CommitmentKey::new(requested).ok_or(GoblinError::CrsNotInitialized { requested })?;
        let pcs_verification_key = Bn254VerifierCommitmentKey::from_global_crs()
            .ok_or(GoblinError::CrsNotInitialized { requested })?;
        Self::with_keys(config, prover, commitment_key, pcs_verification_key)
    }

    pub fn with_keys(
        config: GoblinConfig,
        prover: P,
        commitment_key: CommitmentKey,
        pcs_verification_key: Bn254VerifierCommitmentKey,
    ) -> Result<Self, GoblinError> {
        let mut op_queue = EccOpQueue::new();
        GoblinMockCircuits::perform_op_queue_interactions_for_mock_first_circuit(
            &mut op_queue,
            &commitment_key,
        )?;
        debug!(srs_size = commitment_key.srs_size(), "goblin session started");
        Ok(Self {
            config,
            prover,
            op_queue,
            commitment_key,
            pcs_verification_key,
            state: AccumulationState::NoPriorMerge,
            eccvm_verification_key: None,
            translator_verification_key: None,
        })
    }

    /// Prove `circuit`, append its ops and prove the append.
    pub fn accumulate(
        &mut self,
        circuit: &mut MegaCircuitBuilder,
    ) -> Result<AccumulationOutput, GoblinError> {
        let _span = info_span!("Goblin::accumulate", num_ops = circuit.ecc_ops().len()).entered();
        self.ensure_open()?;
        self.verify_prior_merge(circuit);

        let (proof, verification_key) = self.prover.prove(circuit)?;
        debug!(proof_size = proof.len(), "main proof constructed");

        self.append_and_prove_merge(circuit)?;
        Ok(AccumulationOutput {
            proof,
            verification_key,
        })
    }

    /// `accumulate` without the main proof, for callers that prove the
    /// circuit some other way.
    pub fn merge(&mut self, circuit: &mut MegaCircuitBuilder) -> Result<HonkProof, GoblinError> {
        let _span = info_span!("Goblin::merge", num_ops = circuit.ecc_ops().len()).entered();
        self.ensure_open()?;
        self.verify_prior_merge(circuit);
        self.append_and_prove_merge(circuit)
    }

    /// Run the trace and translation stages over the final op queue and
    /// assemble the proof. Seals the op queue.
    pub fn prove(&mut self) -> Result<GoblinProof, GoblinError> {
        let merge_proof = match &self.state {
            AccumulationState::HasPriorMerge { merge_proof } => merge_proof.clone(),
            AccumulationState::NoPriorMerge => return Err(GoblinError::NoMergeProof),
        };
        self.op_queue.seal();

        let mut transcript = NativeTranscript::new();
        let eccvm = {
            let _span = info_span!("Goblin::prove_eccvm", num_ops = self.op_queue.num_ops()).entered();
            EccvmProver::new(&self.op_queue).construct_proof(&self.prover, &mut transcript)?
        };
        let (translator_proof, translator_verification_key) = {
            let _span = info_span!("Goblin::prove_translator").entered();
            TranslatorProver::new(&eccvm.challenges, &self.op_queue)
                .construct_proof(&self.prover, &mut transcript)?
        };

        self.eccvm_verification_key = Some(eccvm.verification_key);
        self.translator_verification_key = Some(translator_verification_key);

        let proof = GoblinProof {
            merge_proof,
            eccvm_proof: eccvm.proof,
            translator_proof,
            translation_evaluations: eccvm.translation_evaluations,
        };
        info!(proof_size = proof.size(), "goblin proof assembled");
        Ok(proof)
    }

    /// Verify `proof` against this session's keys and final aggregate.
    pub fn verify(&self, proof: &GoblinProof) -> Result<GoblinVerificationOutput, GoblinError> {
        let (Some(eccvm_vk), Some(translator_vk)) = (
            self.eccvm_verification_key.as_ref(),
            self.translator_verification_key.as_ref(),
        ) else {
            return Err(GoblinError::NotYetProven);
        };
        let mut verifier =
            GoblinVerifier::new(&self.prover, self.pcs_verification_key, eccvm_vk, translator_vk)
                .verbose(self.config.verbose);
        if let Some(commitments) = self.op_queue.cached_commitments() {
            verifier = verifier.with_expected_commitments(*commitments);
        }
        Ok(verifier.verify(proof))
    }

    pub fn state(&self) -> &AccumulationState {
        &self.state
    }

    pub fn has_prior_merge(&self) -> bool {
        matches!(self.state, AccumulationState::HasPriorMerge { .. })
    }

    pub fn op_queue(&self) -> &EccOpQueue {
        &self.op_queue
    }

    pub fn config(&self) -> &GoblinConfig {
        &self.config
    }

    pub fn pcs_verification_key(&self) -> Bn254VerifierCommitmentKey {
        self.pcs_verification_key
    }

    fn ensure_open(&self) -> Result<(), GoblinError> {
        if self.op_queue.is_sealed() {
            return Err(GoblinError::Sealed);
        }
        Ok(())
    }

    fn verify_prior_merge(&self, circuit: &mut MegaCircuitBuilder) {
        if let AccumulationState::HasPriorMerge { merge_proof } = &self.state {
            let pairing_points =
                embed_merge_verification(circuit, merge_proof, self.op_queue.cached_commitments());
            circuit.add_pairing_points(pairing_points);
        }
    }

    fn append_and_prove_merge(
        &mut self,
        circuit: &MegaCircuitBuilder,
    ) -> Result<HonkProof, GoblinError> {
        self.op_queue.append(circuit.ecc_ops())?;
        let merge_proof = MergeProver::new(&mut self.op_queue, &self.commitment_key).construct_proof()?;
        debug!(
            proof_size = merge_proof.len(),
            aggregate_size = self.op_queue.current_size(),
            "merge proof constructed"
        );
        self.state = AccumulationState::HasPriorMerge {
            merge_proof: merge_proof.clone(),
        };
        Ok(merge_proof)
    }
}
