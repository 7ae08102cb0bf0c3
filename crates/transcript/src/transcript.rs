//! Fiat-Shamir transcript.
//!
//! The prover appends labelled values with [`BaseTranscript::send_to_verifier`];
//! the verifier reads them back in the same order with
//! [`BaseTranscript::receive_from_prover`]. Both sides absorb every element
//! into the current round buffer, and each challenge is the hash of the
//! previous challenge followed by that buffer. Identical message sequences
//! therefore produce identical challenges on both sides.

use std::marker::PhantomData;

use bbrs_ecc::curves::bn254::Fr;
use bbrs_ecc::fields::field_conversion::split_challenge;
use thiserror::Error;

use crate::codec::{CodecError, FieldSerializable};
use crate::manifest::TranscriptManifest;

/// Hash used to derive challenges.
pub trait TranscriptHasher {
    fn hash(input: &[Fr]) -> Fr;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranscriptError {
    #[error("proof exhausted reading '{label}': need {needed} elements, {remaining} remain")]
    Exhausted {
        label: String,
        needed: usize,
        remaining: usize,
    },
    #[error("invalid encoding for '{label}'")]
    InvalidEncoding {
        label: String,
        #[source]
        source: CodecError,
    },
}

pub struct BaseTranscript<H: TranscriptHasher> {
    proof_data: Vec<Fr>,
    current_round_data: Vec<Fr>,
    previous_challenge: Option<Fr>,
    num_frs_written: usize,
    num_frs_read: usize,
    round_number: usize,
    use_manifest: bool,
    manifest: TranscriptManifest,
    _hasher: PhantomData<H>,
}

impl<H: TranscriptHasher> Default for BaseTranscript<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: TranscriptHasher> BaseTranscript<H> {
    pub fn new() -> Self {
        Self {
            proof_data: Vec::new(),
            current_round_data: Vec::new(),
            previous_challenge: None,
            num_frs_written: 0,
            num_frs_read: 0,
            round_number: 0,
            use_manifest: false,
            manifest: TranscriptManifest::new(),
            _hasher: PhantomData,
        }
    }

    /// Verifier transcript reading from `proof`.
    pub fn from_proof(proof: &[Fr]) -> Self {
        let mut transcript = Self::new();
        transcript.load_proof(proof);
        transcript
    }

    /// Append a further proof segment for the verifier to read. Used when one
    /// transcript spans several proofs.
    pub fn load_proof(&mut self, proof: &[Fr]) {
        self.proof_data.extend_from_slice(proof);
    }

    pub fn enable_manifest(&mut self) {
        self.use_manifest = true;
    }

    pub fn get_manifest(&self) -> &TranscriptManifest {
        &self.manifest
    }

    /// Prover: absorb `element` and append it to the proof.
    pub fn send_to_verifier<T: FieldSerializable>(&mut self, label: &str, element: &T) {
        let frs = element.serialize_to_frs();
        self.record_entry(label, frs.len());
        self.current_round_data.extend_from_slice(&frs);
        self.proof_data.extend(frs);
    }

    /// Verifier: read the next `T::NUM_FR` proof elements as a `T` and absorb them.
    pub fn receive_from_prover<T: FieldSerializable>(
        &mut self,
        label: &str,
    ) -> Result<T, TranscriptError> {
        let needed = T::NUM_FR;
        let remaining = self.proof_data.len() - self.num_frs_read;
        if needed > remaining {
            return Err(TranscriptError::Exhausted {
                label: label.to_string(),
                needed,
                remaining,
            });
        }
        let start = self.num_frs_read;
        let frs = &self.proof_data[start..start + needed];
        let element = T::deserialize_from_frs(frs).map_err(|source| {
            TranscriptError::InvalidEncoding {
                label: label.to_string(),
                source,
            }
        })?;
        self.current_round_data.extend_from_slice(frs);
        self.num_frs_read += needed;
        self.record_entry(label, needed);
        Ok(element)
    }

    /// Absorb `element` without adding it to the proof. Both sides must call
    /// this with the same value, obtained out of band.
    pub fn add_to_hash_buffer<T: FieldSerializable>(&mut self, label: &str, element: &T) {
        let frs = element.serialize_to_frs();
        self.record_entry(label, frs.len());
        self.current_round_data.extend(frs);
    }

    /// Derive one challenge per label. Each hash yields two 127-bit challenges.
    pub fn get_challenges(&mut self, labels: &[&str]) -> Vec<Fr> {
        if self.use_manifest {
            for label in labels {
                self.manifest.add_challenge(self.round_number, label);
            }
        }
        let mut challenges = Vec::with_capacity(labels.len());
        while challenges.len() < labels.len() {
            let pair = self.next_duplex_challenge_buffer();
            let take = (labels.len() - challenges.len()).min(2);
            challenges.extend_from_slice(&pair[..take]);
        }
        self.round_number += 1;
        challenges
    }

    pub fn get_challenge(&mut self, label: &str) -> Fr {
        self.get_challenges(&[label])[0]
    }

    /// Proof elements appended since the previous export.
    pub fn export_proof(&mut self) -> Vec<Fr> {
        let proof = self.proof_data[self.num_frs_written..].to_vec();
        self.num_frs_written = self.proof_data.len();
        proof
    }

    pub fn proof_data(&self) -> &[Fr] {
        &self.proof_data
    }

    pub fn num_frs_read(&self) -> usize {
        self.num_frs_read
    }

    /// True when every loaded proof element has been read.
    pub fn is_exhausted(&self) -> bool {
        self.num_frs_read == self.proof_data.len()
    }

    fn next_duplex_challenge_buffer(&mut self) -> [Fr; 2] {
        let mut full_buffer = Vec::with_capacity(1 + self.current_round_data.len());
        if let Some(previous) = self.previous_challenge {
            full_buffer.push(previous);
        }
        full_buffer.append(&mut self.current_round_data);
        let new_challenge = H::hash(&full_buffer);
        self.previous_challenge = Some(new_challenge);
        split_challenge(&new_challenge)
    }

    fn record_entry(&mut self, label: &str, size: usize) {
        if self.use_manifest {
            self.manifest.add_entry(self.round_number, label, size);
        }
    }
}
