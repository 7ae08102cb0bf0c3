//! Tests for commitment schemes.

use ark_ec::{AffineRepr, CurveGroup};
use ark_std::{UniformRand, Zero};
use bbrs_ecc::curves::bn254::{g1_generator, g2_generator, Fr, G1Affine, G1Element, G2Affine};
use bbrs_polynomials::polynomial::Polynomial;
use bbrs_srs::factories::Bn254Crs;
use bbrs_srs::unsafe_crs::generate_unsafe_bn254_crs;
use bbrs_transcript::NativeTranscript;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::batch_mul::batch_mul_native;
use crate::claim::{OpeningClaim, OpeningPair, ProverOpeningClaim};
use crate::commitment_key::CommitmentKey;
use crate::kzg::KZG;
use crate::pairing_points::PairingPoints;
use crate::verification_key::Bn254VerifierCommitmentKey;

const KZG_N: usize = 32;

fn test_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Generate n random BN254 G1 points for testing.
fn random_bn254_points(n: usize, rng: &mut StdRng) -> Vec<G1Affine> {
    let projective: Vec<G1Element> = (0..n).map(|_| G1Element::rand(rng)).collect();
    G1Element::normalize_batch(&projective)
}

fn naive_msm(scalars: &[Fr], points: &[G1Affine]) -> G1Affine {
    scalars
        .iter()
        .zip(points)
        .fold(G1Element::zero(), |acc, (s, p)| acc + *p * s)
        .into_affine()
}

/// SRS built from a random tau: monomials [tau^i]_1 and [tau]_2.
fn create_kzg_test_srs(n: usize, rng: &mut StdRng) -> (Vec<G1Affine>, G2Affine) {
    let crs = generate_unsafe_bn254_crs(n, Fr::rand(rng));
    (crs.get_monomial_points().to_vec(), crs.get_g2x())
}

#[test]
fn commitment_key_commit_matches_naive_msm() {
    let mut rng = test_rng(1);
    let n = 8;
    let srs_points = random_bn254_points(n, &mut rng);
    let ck = CommitmentKey::from_points(srs_points.clone());

    let coeffs: Vec<Fr> = (0..n).map(|_| Fr::rand(&mut rng)).collect();
    let poly = Polynomial::from_coefficients(coeffs.clone(), n);

    assert_eq!(
        ck.commit(&poly),
        naive_msm(&coeffs, &srs_points),
        "CommitmentKey::commit must match naive MSM"
    );
}

#[test]
fn commitment_key_commit_smaller_poly() {
    let mut rng = test_rng(2);
    let srs_size = 16;
    let poly_size = 5;
    let srs_points = random_bn254_points(srs_size, &mut rng);
    let ck = CommitmentKey::from_points(srs_points.clone());

    let coeffs: Vec<Fr> = (0..poly_size).map(|_| Fr::rand(&mut rng)).collect();
    let poly = Polynomial::from_coefficients(coeffs.clone(), srs_size);

    assert_eq!(
        ck.commit(&poly),
        naive_msm(&coeffs, &srs_points[..poly_size]),
        "Commitment of polynomial smaller than SRS must match naive MSM"
    );
}

/// A polynomial stored from offset s is committed against SRS points [s, s + size).
#[test]
fn commitment_key_commit_shifted_storage() {
    let mut rng = test_rng(3);
    let srs_points = random_bn254_points(16, &mut rng);
    let ck = CommitmentKey::from_points(srs_points.clone());

    let shifted = Polynomial::random(4, 16, 9, &mut rng);
    assert_eq!(
        ck.commit(&shifted),
        naive_msm(shifted.data(), &srs_points[9..13])
    );
    assert_eq!(ck.commit(&shifted), ck.commit(&shifted.full()));
}

#[test]
fn commitment_key_is_homomorphic() {
    let mut rng = test_rng(4);
    let (srs_points, _) = create_kzg_test_srs(16, &mut rng);
    let ck = CommitmentKey::from_points(srs_points);

    let a = Polynomial::random(10, 16, 0, &mut rng);
    let b = Polynomial::random(6, 16, 10, &mut rng);
    let mut sum = a.clone();
    sum += b.as_span();

    let lhs = (ck.commit(&a) + ck.commit(&b)).into_affine();
    assert_eq!(lhs, ck.commit(&sum));
}

#[test]
#[should_panic(expected = "Attempting to commit to a polynomial that needs")]
fn commitment_key_rejects_oversized_polynomial() {
    let mut rng = test_rng(5);
    let ck = CommitmentKey::from_points(random_bn254_points(4, &mut rng));
    let poly = Polynomial::random(5, 8, 0, &mut rng);
    let _ = ck.commit(&poly);
}

#[test]
fn commitment_key_batch_commit() {
    let mut rng = test_rng(6);
    let ck = CommitmentKey::from_points(random_bn254_points(8, &mut rng));
    let polys: Vec<Polynomial> = (0..3).map(|_| Polynomial::random(8, 8, 0, &mut rng)).collect();
    let refs: Vec<&Polynomial> = polys.iter().collect();
    let batched = ck.batch_commit(&refs);
    for (poly, commitment) in polys.iter().zip(batched) {
        assert_eq!(ck.commit(poly), commitment);
    }
    assert_eq!(ck.srs_size(), 8);
    assert_eq!(ck.dyadic_size, 8);
}

#[test]
fn batch_mul_native_matches_naive_msm() {
    let mut rng = test_rng(7);
    let n = 8;
    let points = random_bn254_points(n, &mut rng);
    let scalars: Vec<Fr> = (0..n).map(|_| Fr::rand(&mut rng)).collect();
    assert_eq!(batch_mul_native(&points, &scalars), naive_msm(&scalars, &points));
    assert!(batch_mul_native(&[], &[]).is_zero());
}

#[test]
fn opening_claim_verify_correct() {
    let mut rng = test_rng(8);
    let n = 8;
    let ck = CommitmentKey::from_points(random_bn254_points(n, &mut rng));
    let poly = Polynomial::random(n, n, 0, &mut rng);
    let challenge = Fr::rand(&mut rng);

    let claim = OpeningClaim {
        opening_pair: OpeningPair {
            challenge,
            evaluation: poly.evaluate(&challenge),
        },
        commitment: ck.commit(&poly),
    };
    assert!(claim.verify(&ck, &poly), "Opening claim should verify");
}

#[test]
fn opening_claim_verify_wrong_evaluation() {
    let mut rng = test_rng(9);
    let n = 8;
    let ck = CommitmentKey::from_points(random_bn254_points(n, &mut rng));
    let poly = Polynomial::random(n, n, 0, &mut rng);
    let challenge = Fr::rand(&mut rng);

    let claim = OpeningClaim {
        opening_pair: OpeningPair {
            challenge,
            evaluation: poly.evaluate(&challenge) + Fr::from(1u64),
        },
        commitment: ck.commit(&poly),
    };
    assert!(!claim.verify(&ck, &poly), "Wrong evaluation must fail");
}

#[test]
fn verifier_commitment_key_pairing_check() {
    let mut rng = test_rng(10);
    let (_, g2_x) = create_kzg_test_srs(2, &mut rng);
    let vk = Bn254VerifierCommitmentKey::with_g2x(g2_x);

    assert!(vk.pairing_check(&G1Affine::identity(), &G1Affine::identity()));

    // With [x]_2 = [1]_2 the check reduces to P0 + P1 == 0.
    let trivial = Bn254VerifierCommitmentKey::with_g2x(g2_generator());
    let p = g1_generator();
    assert!(trivial.pairing_check(&p, &(-p)));
    assert!(!trivial.pairing_check(&p, &p));
}

/// Prove a KZG opening claim and return the verifier's pairing points.
fn kzg_prove_and_reduce(
    ck: &CommitmentKey,
    challenge: Fr,
    evaluation: Fr,
    witness: &Polynomial,
) -> PairingPoints {
    let opening_claim = OpeningClaim {
        opening_pair: OpeningPair {
            challenge,
            evaluation,
        },
        commitment: ck.commit(witness),
    };

    let mut prover_transcript = NativeTranscript::new();
    KZG::compute_opening_proof(
        ck,
        ProverOpeningClaim {
            polynomial: witness.clone(),
            opening_pair: OpeningPair {
                challenge,
                evaluation,
            },
        },
        &mut prover_transcript,
    );

    let proof = prover_transcript.export_proof();
    assert_eq!(proof.len(), 4);
    let mut verifier_transcript = NativeTranscript::from_proof(&proof);
    KZG::reduce_verify(&opening_claim, &mut verifier_transcript).unwrap()
}

fn kzg_prove_and_verify(
    ck: &CommitmentKey,
    vk: &Bn254VerifierCommitmentKey,
    challenge: Fr,
    evaluation: Fr,
    witness: &Polynomial,
) {
    let pairing_points = kzg_prove_and_reduce(ck, challenge, evaluation, witness);
    assert!(pairing_points.check(vk), "KZG pairing check failed");
}

fn kzg_setup(seed: u64) -> (CommitmentKey, Bn254VerifierCommitmentKey, StdRng) {
    let mut rng = test_rng(seed);
    let (srs_points, g2_x) = create_kzg_test_srs(KZG_N, &mut rng);
    (
        CommitmentKey::from_points(srs_points),
        Bn254VerifierCommitmentKey::with_g2x(g2_x),
        rng,
    )
}

#[test]
fn kzg_single() {
    let (ck, vk, mut rng) = kzg_setup(11);
    let witness = Polynomial::random(KZG_N, KZG_N, 0, &mut rng);
    let challenge = Fr::rand(&mut rng);
    let evaluation = witness.evaluate(&challenge);
    kzg_prove_and_verify(&ck, &vk, challenge, evaluation, &witness);
}

#[test]
fn kzg_shifted_witness() {
    let (ck, vk, mut rng) = kzg_setup(12);
    let witness = Polynomial::random(8, KZG_N, 20, &mut rng);
    let challenge = Fr::rand(&mut rng);
    let evaluation = witness.evaluate(&challenge);
    kzg_prove_and_verify(&ck, &vk, challenge, evaluation, &witness);
}

#[test]
fn kzg_zero_evaluation() {
    let (ck, vk, mut rng) = kzg_setup(13);
    let mut witness = Polynomial::random(KZG_N, KZG_N, 0, &mut rng);
    let challenge = Fr::rand(&mut rng);
    let evaluation = witness.evaluate(&challenge);
    *witness.at_mut(0) -= evaluation;
    kzg_prove_and_verify(&ck, &vk, challenge, Fr::zero(), &witness);
}

#[test]
fn kzg_zero_polynomial() {
    let (ck, vk, mut rng) = kzg_setup(14);
    let zero = Polynomial::new(10, KZG_N, 0);
    assert!(zero.is_zero());
    let challenge = Fr::rand(&mut rng);
    kzg_prove_and_verify(&ck, &vk, challenge, zero.evaluate(&challenge), &zero);
}

#[test]
fn kzg_constant_polynomial() {
    let (ck, vk, mut rng) = kzg_setup(15);
    let constant = Polynomial::random(1, KZG_N, 0, &mut rng);
    let challenge = Fr::rand(&mut rng);
    kzg_prove_and_verify(&ck, &vk, challenge, constant.evaluate(&challenge), &constant);
}

#[test]
fn kzg_empty_polynomial() {
    let (ck, vk, mut rng) = kzg_setup(16);
    let empty = Polynomial::new(0, 0, 0);
    let challenge = Fr::rand(&mut rng);
    kzg_prove_and_verify(&ck, &vk, challenge, empty.evaluate(&challenge), &empty);
}

#[test]
fn kzg_wrong_evaluation_fails_pairing() {
    let (ck, vk, mut rng) = kzg_setup(17);
    let witness = Polynomial::random(KZG_N, KZG_N, 0, &mut rng);
    let challenge = Fr::rand(&mut rng);
    let evaluation = witness.evaluate(&challenge) + Fr::from(1u64);
    let points = kzg_prove_and_reduce(&ck, challenge, evaluation, &witness);
    assert!(!points.check(&vk));
}

/// Aggregating two valid sets of pairing points yields a valid set; mixing in an
/// invalid one does not.
#[test]
fn pairing_points_aggregate() {
    let (ck, vk, mut rng) = kzg_setup(18);
    let mut valid = Vec::new();
    for _ in 0..2 {
        let witness = Polynomial::random(KZG_N, KZG_N, 0, &mut rng);
        let challenge = Fr::rand(&mut rng);
        valid.push(kzg_prove_and_reduce(&ck, challenge, witness.evaluate(&challenge), &witness));
    }
    let mut acc = valid[0];
    acc.aggregate(&valid[1]);
    assert!(acc.check(&vk));

    let witness = Polynomial::random(KZG_N, KZG_N, 0, &mut rng);
    let challenge = Fr::rand(&mut rng);
    let invalid = kzg_prove_and_reduce(
        &ck,
        challenge,
        witness.evaluate(&challenge) + Fr::from(2u64),
        &witness,
    );
    acc.aggregate_with_separator(&invalid, Fr::from(3u64));
    assert!(!acc.check(&vk));
    assert!(PairingPoints::default().check(&vk));
}
