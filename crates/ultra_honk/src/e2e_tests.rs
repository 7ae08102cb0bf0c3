//! End-to-end prove/verify tests for the reference prover.
//!
//! These tests wire up MegaCircuitBuilder → UltraProver::prove()
//! → UltraVerifier::verify() for full round-trip verification.

#[cfg(test)]
mod tests {
    use ark_ec::CurveGroup;
    use ark_ff::{One, UniformRand, Zero};
    use bbrs_circuit_builder::gate_data::{AddTriple, MulQuad};
    use bbrs_circuit_builder::MegaCircuitBuilder;
    use bbrs_commitment_schemes::pairing_points::PairingPoints;
    use bbrs_ecc::curves::bn254::{g1_generator, Fr};
    use bbrs_transcript::NativeTranscript;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::ultra_verifier::UltraVerifier;
    use crate::{CircuitProver, ProverError, UltraProver};

    /// a + b = c with c public, plus a multiplication and an ECC op.
    fn build_test_circuit(seed: u64) -> MegaCircuitBuilder {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut builder = MegaCircuitBuilder::new();

        let a_val = Fr::rand(&mut rng);
        let b_val = Fr::rand(&mut rng);
        let a = builder.add_variable(a_val);
        let b = builder.add_variable(b_val);
        let c = builder.add_public_variable(a_val + b_val);
        builder.create_add_gate(&AddTriple {
            a,
            b,
            c,
            a_scaling: Fr::one(),
            b_scaling: Fr::one(),
            c_scaling: -Fr::one(),
            const_scaling: Fr::zero(),
        });

        let d = builder.add_variable(a_val * b_val);
        let zero = builder.zero_idx();
        builder.create_big_mul_add_gate(&MulQuad {
            a,
            b,
            c: d,
            d: zero,
            mul_scaling: Fr::one(),
            a_scaling: Fr::zero(),
            b_scaling: Fr::zero(),
            c_scaling: -Fr::one(),
            d_scaling: Fr::zero(),
            const_scaling: Fr::zero(),
        });

        let point = (g1_generator() * Fr::rand(&mut rng)).into_affine();
        builder.queue_ecc_mul_accum(point, a_val);
        builder.queue_ecc_eq();
        builder
    }

    #[test]
    fn test_prove_and_verify() {
        let circuit = build_test_circuit(1);
        let prover = UltraProver::new();
        let (proof, vk) = prover.prove(&circuit).unwrap();
        assert!(prover.verify(&vk, &proof));

        let output = UltraVerifier::new(&vk).verify(&proof);
        assert!(output.verified);
        assert_eq!(output.public_inputs, circuit.base.public_input_values());
        assert_eq!(output.pairing_points, PairingPoints::default());
    }

    #[test]
    fn test_unsatisfied_circuit_is_rejected() {
        let mut circuit = build_test_circuit(2);
        let c = circuit.base.public_inputs()[0];
        circuit.base.set_variable_unchecked(c, Fr::from(5u64));
        let result = UltraProver::new().prove(&circuit);
        assert!(matches!(result, Err(ProverError::UnsatisfiedCircuit(_))));
    }

    /// Changing any witness element in the proof breaks a gate or a public input.
    #[test]
    fn test_tampered_proof_fails() {
        let circuit = build_test_circuit(3);
        let prover = UltraProver::new();
        let (proof, vk) = prover.prove(&circuit).unwrap();

        // circuit_size, one public input, then witnesses; w_1 is `a`
        let mut tampered = proof.clone();
        tampered[3] += Fr::one();
        assert!(!prover.verify(&vk, &tampered));

        let mut tampered = proof.clone();
        tampered[1] += Fr::one();
        assert!(!prover.verify(&vk, &tampered));

        let mut truncated = proof.clone();
        truncated.pop();
        assert!(!prover.verify(&vk, &truncated));

        let mut extended = proof;
        extended.push(Fr::zero());
        assert!(!prover.verify(&vk, &extended));
    }

    #[test]
    fn test_wrong_verification_key_fails() {
        let prover = UltraProver::new();
        let (proof, _) = prover.prove(&build_test_circuit(4)).unwrap();
        let mut other = MegaCircuitBuilder::new();
        other.add_public_variable(Fr::one());
        let (_, other_vk) = prover.prove(&other).unwrap();
        assert!(!prover.verify(&other_vk, &proof));
    }

    #[test]
    fn test_pairing_points_are_carried() {
        let mut circuit = build_test_circuit(5);
        let g = g1_generator();
        let points = PairingPoints::from_points(g, -g);
        circuit.add_pairing_points(points);

        let (proof, vk) = UltraProver::new().prove(&circuit).unwrap();
        let output = UltraVerifier::new(&vk).verify(&proof);
        assert!(output.verified);
        assert_eq!(output.pairing_points, points);
    }

    /// Two proofs on one transcript verify on one verifier transcript.
    #[test]
    fn test_shared_transcript() {
        let prover = UltraProver::new();
        let first = build_test_circuit(6);
        let second = build_test_circuit(7);

        let mut prover_transcript = NativeTranscript::new();
        let vk_1 = prover.prove_with_transcript(&first, &mut prover_transcript).unwrap();
        let challenge = prover_transcript.get_challenge("between");
        let proof_1 = prover_transcript.export_proof();
        let vk_2 = prover.prove_with_transcript(&second, &mut prover_transcript).unwrap();
        let proof_2 = prover_transcript.export_proof();

        let mut verifier_transcript = NativeTranscript::from_proof(&proof_1);
        assert!(prover.verify_with_transcript(&vk_1, &mut verifier_transcript).verified);
        assert_eq!(verifier_transcript.get_challenge("between"), challenge);
        verifier_transcript.load_proof(&proof_2);
        assert!(prover.verify_with_transcript(&vk_2, &mut verifier_transcript).verified);
        assert!(verifier_transcript.is_exhausted());
    }

    #[test]
    fn test_vk_hash_depends_on_shape() {
        let prover = UltraProver::new();
        let (_, vk_a) = prover.prove(&build_test_circuit(8)).unwrap();
        let (_, vk_b) = prover.prove(&build_test_circuit(9)).unwrap();
        assert_eq!(vk_a.hash(), vk_b.hash());

        let (_, vk_c) = prover.prove(&MegaCircuitBuilder::new()).unwrap();
        assert_ne!(vk_a.hash(), vk_c.hash());
    }
}
