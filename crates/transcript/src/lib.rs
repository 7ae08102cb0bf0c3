//! Fiat-Shamir transcript for prover-verifier communication.

pub mod codec;
pub mod manifest;
pub mod transcript;

use ark_ff::PrimeField;
use bbrs_ecc::curves::bn254::Fr;
use tiny_keccak::{Hasher, Keccak};

pub use transcript::TranscriptError;

/// Keccak-256 over the big-endian encodings of the input elements, reduced into `Fr`.
pub struct KeccakHasher;

impl transcript::TranscriptHasher for KeccakHasher {
    fn hash(input: &[Fr]) -> Fr {
        let mut keccak = Keccak::v256();
        for element in input {
            keccak.update(&codec::fr_to_be_bytes(element));
        }
        let mut output = [0u8; 32];
        keccak.finalize(&mut output);
        Fr::from_be_bytes_mod_order(&output)
    }
}

/// The transcript used for native (out-of-circuit) proving and verification.
pub type NativeTranscript = transcript::BaseTranscript<KeccakHasher>;

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::CurveGroup;
    use ark_std::Zero;
    use bbrs_ecc::curves::bn254::{g1_generator, Fq, G1Affine};

    /// Test: prover sends data, exports proof, verifier loads and receives same data,
    /// both generate identical challenges.
    #[test]
    fn test_prover_verifier_deterministic_challenge() {
        let mut prover = NativeTranscript::new();

        let val_a = Fr::from(100u64);
        let val_b = Fq::from(200u64);
        let val_c: u32 = 42;

        prover.send_to_verifier("a", &val_a);
        prover.send_to_verifier("b", &val_b);
        prover.send_to_verifier("c", &val_c);

        let prover_challenge = prover.get_challenge("alpha");

        let proof = prover.export_proof();
        assert_eq!(proof.len(), 4);

        let mut verifier = NativeTranscript::from_proof(&proof);

        let recv_a: Fr = verifier.receive_from_prover("a").unwrap();
        let recv_b: Fq = verifier.receive_from_prover("b").unwrap();
        let recv_c: u32 = verifier.receive_from_prover("c").unwrap();

        assert_eq!(recv_a, val_a);
        assert_eq!(recv_b, val_b);
        assert_eq!(recv_c, val_c);

        let verifier_challenge = verifier.get_challenge("alpha");

        assert_eq!(
            prover_challenge, verifier_challenge,
            "Prover and verifier must derive identical challenges"
        );
        assert_ne!(prover_challenge, Fr::zero());
        assert!(verifier.is_exhausted());
    }

    /// Test: multiple rounds of send + challenge generation.
    #[test]
    fn test_multi_round_challenges() {
        let mut prover = NativeTranscript::new();
        let mut challenges_prover = Vec::new();

        prover.send_to_verifier("poly_0", &Fr::from(1u64));
        challenges_prover.push(prover.get_challenge("r0"));

        prover.send_to_verifier("poly_1", &Fr::from(2u64));
        challenges_prover.push(prover.get_challenge("r1"));

        prover.send_to_verifier("poly_2", &Fr::from(3u64));
        challenges_prover.push(prover.get_challenge("r2"));

        let proof = prover.export_proof();

        let mut verifier = NativeTranscript::from_proof(&proof);
        let mut challenges_verifier = Vec::new();

        let _: Fr = verifier.receive_from_prover("poly_0").unwrap();
        challenges_verifier.push(verifier.get_challenge("r0"));

        let _: Fr = verifier.receive_from_prover("poly_1").unwrap();
        challenges_verifier.push(verifier.get_challenge("r1"));

        let _: Fr = verifier.receive_from_prover("poly_2").unwrap();
        challenges_verifier.push(verifier.get_challenge("r2"));

        for i in 0..3 {
            assert_eq!(
                challenges_prover[i], challenges_verifier[i],
                "Challenge mismatch at round {i}"
            );
        }

        assert_ne!(challenges_prover[0], challenges_prover[1]);
        assert_ne!(challenges_prover[1], challenges_prover[2]);
    }

    /// Test: multiple challenges per round (get_challenges with multiple labels).
    #[test]
    fn test_multiple_challenges_per_round() {
        let mut prover = NativeTranscript::new();
        prover.send_to_verifier("data", &Fr::from(999u64));
        let p_challenges = prover.get_challenges(&["alpha", "beta", "gamma"]);

        let proof = prover.export_proof();
        let mut verifier = NativeTranscript::from_proof(&proof);
        let _: Fr = verifier.receive_from_prover("data").unwrap();
        let v_challenges = verifier.get_challenges(&["alpha", "beta", "gamma"]);

        assert_eq!(p_challenges.len(), 3);
        assert_eq!(p_challenges, v_challenges);
        assert_ne!(p_challenges[0], p_challenges[1]);
        assert_ne!(p_challenges[1], p_challenges[2]);
        assert_ne!(p_challenges[0], p_challenges[2]);
    }

    /// Test: a different message changes every later challenge.
    #[test]
    fn test_challenge_depends_on_messages() {
        let mut a = NativeTranscript::new();
        a.send_to_verifier("x", &Fr::from(1u64));
        let mut b = NativeTranscript::new();
        b.send_to_verifier("x", &Fr::from(2u64));
        assert_ne!(a.get_challenge("c"), b.get_challenge("c"));

        // Values absorbed out of band influence challenges too.
        let mut c = NativeTranscript::new();
        c.add_to_hash_buffer("x", &Fr::from(1u64));
        let mut d = NativeTranscript::new();
        assert_ne!(c.get_challenge("c"), d.get_challenge("c"));
        assert!(c.export_proof().is_empty());
    }

    /// Test: export_proof returns only what was sent since the last export, and a
    /// verifier can continue across segments with load_proof.
    #[test]
    fn test_export_segments_and_continue() {
        let mut prover = NativeTranscript::new();
        prover.send_to_verifier("first", &Fr::from(5u64));
        let c1 = prover.get_challenge("c1");
        let segment_one = prover.export_proof();
        prover.send_to_verifier("second", &Fr::from(6u64));
        let c2 = prover.get_challenge("c2");
        let segment_two = prover.export_proof();
        assert_eq!(segment_one, vec![Fr::from(5u64)]);
        assert_eq!(segment_two, vec![Fr::from(6u64)]);

        let mut verifier = NativeTranscript::from_proof(&segment_one);
        let _: Fr = verifier.receive_from_prover("first").unwrap();
        assert_eq!(verifier.get_challenge("c1"), c1);
        verifier.load_proof(&segment_two);
        let _: Fr = verifier.receive_from_prover("second").unwrap();
        assert_eq!(verifier.get_challenge("c2"), c2);
    }

    #[test]
    fn test_receive_past_end_is_an_error() {
        let mut verifier = NativeTranscript::from_proof(&[Fr::from(1u64)]);
        let result: Result<G1Affine, _> = verifier.receive_from_prover("point");
        assert_eq!(
            result,
            Err(TranscriptError::Exhausted {
                label: "point".to_string(),
                needed: 4,
                remaining: 1
            })
        );
    }

    #[test]
    fn test_malformed_point_is_an_error() {
        let mut prover = NativeTranscript::new();
        let point = (g1_generator() * Fr::from(3u64)).into_affine();
        prover.send_to_verifier("P", &point);
        let mut proof = prover.export_proof();
        proof[2] += Fr::from(1u64);

        let mut verifier = NativeTranscript::from_proof(&proof);
        let result: Result<G1Affine, _> = verifier.receive_from_prover("P");
        assert!(matches!(
            result,
            Err(TranscriptError::InvalidEncoding { .. })
        ));
    }

    /// Test: prover and verifier manifests match when the protocol is followed.
    #[test]
    fn test_manifests_match() {
        let mut prover = NativeTranscript::new();
        prover.enable_manifest();
        prover.send_to_verifier("A", &Fr::from(1u64));
        let _ = prover.get_challenge("alpha");
        prover.send_to_verifier("B", &Fq::from(2u64));
        let _ = prover.get_challenges(&["beta", "gamma"]);
        let proof = prover.export_proof();

        let mut verifier = NativeTranscript::from_proof(&proof);
        verifier.enable_manifest();
        let _: Fr = verifier.receive_from_prover("A").unwrap();
        let _ = verifier.get_challenge("alpha");
        let _: Fq = verifier.receive_from_prover("B").unwrap();
        let _ = verifier.get_challenges(&["beta", "gamma"]);

        assert_eq!(prover.get_manifest(), verifier.get_manifest());
        assert_eq!(prover.get_manifest().size(), 2);
        assert_eq!(prover.get_manifest().entry_labels(1), vec!["B"]);
        assert_eq!(prover.get_manifest().challenge_labels(1), vec!["beta", "gamma"]);
    }
}
