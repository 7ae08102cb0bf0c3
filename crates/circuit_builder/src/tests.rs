use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{One, UniformRand, Zero};
use bbrs_commitment_schemes::pairing_points::PairingPoints;
use bbrs_ecc::curves::bn254::{g1_generator, Fr, G1Affine};
use bbrs_op_queue::EccOpCode;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::gate_data::{AddTriple, ArithmeticTriple, MulQuad};
use crate::{MegaCircuitBuilder, UltraCircuitChecker};

fn random_point(rng: &mut StdRng) -> G1Affine {
    (g1_generator() * Fr::rand(rng)).into_affine()
}

#[test]
fn empty_circuit_is_satisfied() {
    let builder = MegaCircuitBuilder::new();
    assert_eq!(builder.num_gates(), 1);
    assert!(UltraCircuitChecker::check(&builder).is_ok());
}

#[test]
fn add_gate() {
    let mut builder = MegaCircuitBuilder::new();
    let a = builder.add_variable(Fr::from(3u64));
    let b = builder.add_variable(Fr::from(4u64));
    let c = builder.add_variable(Fr::from(7u64));
    builder.create_add_gate(&AddTriple {
        a,
        b,
        c,
        a_scaling: Fr::one(),
        b_scaling: Fr::one(),
        c_scaling: -Fr::one(),
        const_scaling: Fr::zero(),
    });
    assert!(UltraCircuitChecker::check(&builder).is_ok());

    builder.base.set_variable_unchecked(c, Fr::from(8u64));
    let err = UltraCircuitChecker::check(&builder).unwrap_err();
    assert!(err.contains("Arithmetic relation failed at row 1"), "{err}");
}

#[test]
fn mul_add_and_arithmetic_gates() {
    let mut builder = MegaCircuitBuilder::new();
    let a = builder.add_variable(Fr::from(5u64));
    let b = builder.add_variable(Fr::from(6u64));
    let c = builder.add_variable(Fr::from(30u64));
    let d = builder.add_variable(Fr::from(1u64));
    builder.create_big_mul_add_gate(&MulQuad {
        a,
        b,
        c,
        d,
        mul_scaling: Fr::one(),
        a_scaling: Fr::zero(),
        b_scaling: Fr::zero(),
        c_scaling: -Fr::one(),
        d_scaling: Fr::from(2u64),
        const_scaling: -Fr::from(2u64),
    });
    builder.create_arithmetic_gate(&ArithmeticTriple {
        a,
        b,
        c,
        q_m: Fr::one(),
        q_l: Fr::zero(),
        q_r: Fr::zero(),
        q_o: -Fr::one(),
        q_c: Fr::zero(),
    });
    builder.create_bool_gate(d);
    assert!(UltraCircuitChecker::check(&builder).is_ok());
}

#[test]
fn bool_gate_rejects_non_boolean() {
    let mut builder = MegaCircuitBuilder::new();
    let x = builder.add_variable(Fr::from(2u64));
    builder.create_bool_gate(x);
    assert!(UltraCircuitChecker::check(&builder).is_err());
}

#[test]
fn assert_equal_constant_failure_is_reported() {
    let mut builder = MegaCircuitBuilder::new();
    let x = builder.add_variable(Fr::from(9u64));
    builder.assert_equal_constant(x, Fr::from(9u64), "nine");
    assert!(UltraCircuitChecker::check(&builder).is_ok());

    builder.assert_equal_constant(x, Fr::from(10u64), "ten");
    let err = UltraCircuitChecker::check(&builder).unwrap_err();
    assert!(err.contains("ten"));
}

#[test]
fn put_constant_variable_is_cached() {
    let mut builder = MegaCircuitBuilder::new();
    let a = builder.put_constant_variable(Fr::from(11u64));
    let b = builder.put_constant_variable(Fr::from(11u64));
    assert_eq!(a, b);
}

/// Each queued op adds two ECC op rows and tracks the accumulator natively.
#[test]
fn ecc_ops_are_queued_with_accumulator() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut builder = MegaCircuitBuilder::new();
    let p = random_point(&mut rng);
    let q = random_point(&mut rng);
    let scalar = Fr::rand(&mut rng);

    let add = builder.queue_ecc_add_accum(p);
    builder.queue_ecc_mul_accum(q, scalar);
    let (result, eq) = builder.queue_ecc_eq();
    builder.queue_ecc_no_op();

    assert_eq!(result, (p + q * scalar).into_affine());
    assert_eq!(builder.ecc_ops().len(), 4);
    assert_eq!(builder.blocks.ecc_op.len(), 8);
    assert_eq!(builder.get_variable(add.op), EccOpCode::Add.to_fr());
    assert_eq!(builder.get_variable(eq.op), EccOpCode::EqAndReset.to_fr());
    assert_eq!(builder.ecc_ops()[2].base_point, result);
    assert!(UltraCircuitChecker::check(&builder).is_ok());

    // the accumulator was reset by the eq op
    let (empty, tuple) = builder.queue_ecc_eq();
    assert!(empty.is_zero());
    assert!(tuple.return_is_infinity);
}

#[test]
fn tampered_ecc_op_witness_is_caught() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut builder = MegaCircuitBuilder::new();
    let tuple = builder.queue_ecc_add_accum(random_point(&mut rng));
    builder
        .base
        .set_variable_unchecked(tuple.x_lo, Fr::from(1u64));
    let err = UltraCircuitChecker::check(&builder).unwrap_err();
    assert!(err.contains("EccOp row 0"), "{err}");
}

#[test]
fn pairing_points_accumulate() {
    let mut builder = MegaCircuitBuilder::new();
    assert!(!builder.has_pairing_points());
    assert_eq!(builder.pairing_points(), PairingPoints::default());

    let g = g1_generator();
    let points = PairingPoints::from_points(g, -g);
    builder.add_pairing_points(points);
    assert_eq!(builder.pairing_points(), points);

    builder.add_pairing_points(PairingPoints::new());
    assert!(builder.has_pairing_points());
    assert!(!builder.pairing_points().p0.is_zero());
}
