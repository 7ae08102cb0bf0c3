//! Circuits and op-queue setup used to seed and exercise a Goblin session.

use ark_ec::CurveGroup;
use ark_ff::{One, Zero};
use bbrs_circuit_builder::gate_data::{AddTriple, EccOpTuple, MulQuad};
use bbrs_circuit_builder::MegaCircuitBuilder;
use bbrs_commitment_schemes::commitment_key::CommitmentKey;
use bbrs_ecc::curves::bn254::{g1_generator, Fr};
use bbrs_op_queue::EccOpQueue;
use bbrs_polynomials::polynomial::Polynomial;

use crate::error::GoblinError;

pub struct GoblinMockCircuits;

impl GoblinMockCircuits {
    /// Stand in for the first circuit's interaction with the op queue.
    ///
    /// The merge argument cannot commit to an empty `T_{i-1}`, so the log is
    /// seeded with the bootstrap row and its commitments are cached as the
    /// aggregate the first real merge extends.
    pub fn perform_op_queue_interactions_for_mock_first_circuit(
        op_queue: &mut EccOpQueue,
        commitment_key: &CommitmentKey,
    ) -> Result<(), GoblinError> {
        op_queue.append_bootstrap_row()?;
        let size = op_queue.current_size();
        if commitment_key.srs_size() < size {
            return Err(GoblinError::CommitmentKeyTooSmall {
                required: size,
                available: commitment_key.srs_size(),
            });
        }
        let columns = op_queue.snapshot_current();
        let polynomials: Vec<Polynomial> = columns
            .iter()
            .map(|column| Polynomial::from_coefficients(column.to_vec(), size))
            .collect();
        let refs: Vec<&Polynomial> = polynomials.iter().collect();
        let commitments = commitment_key.batch_commit(&refs);
        op_queue.cache_commitments(std::array::from_fn(|j| commitments[j]));
        Ok(())
    }

    /// A chain of `num_gates` add gates.
    pub fn construct_arithmetic_circuit(builder: &mut MegaCircuitBuilder, num_gates: usize) {
        let mut a = builder.add_variable(Fr::one());
        let b = builder.add_variable(Fr::from(2u64));
        for _ in 0..num_gates {
            let sum = builder.get_variable(a) + builder.get_variable(b);
            let c = builder.add_variable(sum);
            builder.create_add_gate(&AddTriple {
                a,
                b,
                c,
                a_scaling: Fr::one(),
                b_scaling: Fr::one(),
                c_scaling: -Fr::one(),
                const_scaling: Fr::zero(),
            });
            a = c;
        }
    }

    /// Queue add, mul, add, mul, eq: five ops, ten rows per column.
    ///
    /// Points and scalars are derived from `seed` so distinct circuits
    /// contribute distinct ops. Returns the witnesses of the closing eq op.
    pub fn construct_goblin_ecc_op_circuit(builder: &mut MegaCircuitBuilder, seed: u64) -> EccOpTuple {
        let seed = Fr::from(seed);
        let point = |k: u64| {
            (g1_generator() * (seed * Fr::from(16u64) + Fr::from(k + 1))).into_affine()
        };
        let scalar = |k: u64| (seed + Fr::from(3u64)) * Fr::from(k + 5) - Fr::one();

        builder.queue_ecc_add_accum(point(0));
        builder.queue_ecc_mul_accum(point(1), scalar(1));
        builder.queue_ecc_add_accum(point(2));
        builder.queue_ecc_mul_accum(point(3), scalar(3));
        let (_, eq) = builder.queue_ecc_eq();
        eq
    }

    /// Arithmetic plus ECC ops: the shape of an app or kernel circuit.
    pub fn construct_mock_function_circuit(builder: &mut MegaCircuitBuilder, seed: u64) {
        Self::construct_arithmetic_circuit(builder, 4);
        let eq = Self::construct_goblin_ecc_op_circuit(builder, seed);
        builder.set_public_input(eq.x_lo);

        let x_value = Fr::from(seed) + Fr::from(2u64);
        let y_value = Fr::from(seed) + Fr::from(3u64);
        let x = builder.add_variable(x_value);
        let y = builder.add_variable(y_value);
        let product = builder.add_public_variable(x_value * y_value);
        let zero = builder.zero_idx();
        builder.create_big_mul_add_gate(&MulQuad {
            a: x,
            b: y,
            c: product,
            d: zero,
            mul_scaling: Fr::one(),
            a_scaling: Fr::zero(),
            b_scaling: Fr::zero(),
            c_scaling: -Fr::one(),
            d_scaling: Fr::zero(),
            const_scaling: Fr::zero(),
        });
    }
}
