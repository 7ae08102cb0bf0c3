use std::collections::BTreeMap;
use std::fmt;

/// Summary of transcript interactions, round by round.
///
/// Prover and verifier record the same manifest when their transcripts are in
/// sync, so comparing manifests pins down the protocol's message order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptManifest {
    manifest: BTreeMap<usize, RoundData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct RoundData {
    challenge_labels: Vec<String>,
    entries: Vec<(String, usize)>,
}

impl TranscriptManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single challenge label to the manifest for the given round.
    pub fn add_challenge(&mut self, round: usize, label: &str) {
        self.manifest
            .entry(round)
            .or_default()
            .challenge_labels
            .push(label.to_string());
    }

    /// Add an entry (element label + field count) to the manifest for the given round.
    pub fn add_entry(&mut self, round: usize, label: &str, element_size: usize) {
        self.manifest
            .entry(round)
            .or_default()
            .entries
            .push((label.to_string(), element_size));
    }

    /// Number of rounds recorded.
    pub fn size(&self) -> usize {
        self.manifest.len()
    }

    /// Labels of the entries recorded in `round`, in order.
    pub fn entry_labels(&self, round: usize) -> Vec<&str> {
        self.manifest
            .get(&round)
            .map(|data| data.entries.iter().map(|(l, _)| l.as_str()).collect())
            .unwrap_or_default()
    }

    /// Challenge labels generated at the end of `round`.
    pub fn challenge_labels(&self, round: usize) -> Vec<&str> {
        self.manifest
            .get(&round)
            .map(|data| data.challenge_labels.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

impl fmt::Display for TranscriptManifest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (round, data) in &self.manifest {
            writeln!(f, "Round: {round}")?;
            for label in &data.challenge_labels {
                writeln!(f, "\tchallenge: {label}")?;
            }
            for (label, size) in &data.entries {
                writeln!(f, "\telement ({size}): {label}")?;
            }
        }
        Ok(())
    }
}
