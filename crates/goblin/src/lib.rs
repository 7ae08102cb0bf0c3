//! Goblin accumulation.
//!
//! - **Merge argument**: proves each circuit's ECC ops were appended to the
//!   aggregate op queue, incrementally via commitment additivity
//! - **Recursive merge verification**: embeds the previous merge proof's
//!   verification into the next circuit
//! - **Accumulation session**: the two-state machine chaining both
//! - **Trace and translation stages**: prove the final op queue over `Fq`
//!   and carry it into `Fr`
//! - **Proof assembly and verification**: the four-part Goblin proof

pub mod config;
pub mod eccvm;
pub mod error;
pub mod goblin;
pub mod goblin_verifier;
pub mod merge_prover;
pub mod merge_recursive_verifier;
pub mod merge_verifier;
pub mod mock_circuits;
pub mod translation_evaluations;
pub mod translator;

pub use config::GoblinConfig;
pub use eccvm::TranslationChallenges;
pub use error::GoblinError;
pub use goblin::{AccumulationOutput, AccumulationState, Goblin};
pub use goblin_verifier::{GoblinProof, GoblinVerificationOutput, GoblinVerifier};
pub use merge_prover::MergeProver;
pub use merge_verifier::{MergeVerifier, MergeVerifierOutput};
pub use translation_evaluations::TranslationEvaluations;
