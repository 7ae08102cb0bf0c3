//! MegaCircuitBuilder: an arithmetic circuit builder that can also queue
//! elliptic-curve operations for deferred proving.
//!
//! ECC operations are not constrained in-circuit. The builder records each one
//! as an [`EccOp`], tracks the running accumulator natively, and places the
//! op's ultra rows in the ECC op block as witnesses. After the circuit is
//! proven its staged ops are appended to the shared operation log.

use std::collections::HashMap;

use ark_ec::CurveGroup;
use ark_ff::{One, Zero};
use bbrs_commitment_schemes::pairing_points::PairingPoints;
use bbrs_ecc::curves::bn254::{Fr, G1Affine, G1Element};
use bbrs_op_queue::{EccOp, NUM_WIRES};

use crate::builder_base::CircuitBuilderBase;
use crate::execution_trace::MegaTraceBlocks;
use crate::gate_data::{AddQuad, AddTriple, ArithmeticTriple, EccOpTuple, MulQuad};

#[derive(Debug, Clone)]
pub struct MegaCircuitBuilder {
    pub base: CircuitBuilderBase,
    pub blocks: MegaTraceBlocks,
    constant_variable_indices: HashMap<Fr, u32>,
    ecc_ops: Vec<EccOp>,
    accumulator: G1Element,
    pairing_points: Option<PairingPoints>,
}

impl MegaCircuitBuilder {
    pub fn new() -> Self {
        let mut builder = Self {
            base: CircuitBuilderBase::new(),
            blocks: MegaTraceBlocks::default(),
            constant_variable_indices: HashMap::new(),
            ecc_ops: Vec::new(),
            accumulator: G1Element::zero(),
            pairing_points: None,
        };
        let zero = builder.base.init_zero_idx();
        builder.fix_witness(zero, Fr::zero());
        builder
    }

    // ════════════════════════════════════════════════════════════════════
    //  Variables
    // ════════════════════════════════════════════════════════════════════

    pub fn add_variable(&mut self, value: Fr) -> u32 {
        self.base.add_variable(value)
    }

    pub fn add_public_variable(&mut self, value: Fr) -> u32 {
        self.base.add_public_variable(value)
    }

    pub fn set_public_input(&mut self, witness_index: u32) -> u32 {
        self.base.set_public_input(witness_index)
    }

    pub fn get_variable(&self, index: u32) -> Fr {
        self.base.get_variable(index)
    }

    pub fn zero_idx(&self) -> u32 {
        self.base.zero_idx()
    }

    pub fn num_gates(&self) -> usize {
        self.base.num_gates()
    }

    pub fn failed(&self) -> bool {
        self.base.failed()
    }

    /// Return the index of a variable fixed to `value`, creating it once.
    pub fn put_constant_variable(&mut self, value: Fr) -> u32 {
        if let Some(&idx) = self.constant_variable_indices.get(&value) {
            return idx;
        }
        let idx = self.add_variable(value);
        self.fix_witness(idx, value);
        self.constant_variable_indices.insert(value, idx);
        idx
    }

    pub fn assert_equal(&mut self, a_idx: u32, b_idx: u32, msg: &str) {
        self.base.assert_equal(a_idx, b_idx, msg);
    }

    pub fn assert_equal_constant(&mut self, a_idx: u32, b: Fr, msg: &str) {
        if self.base.get_variable(a_idx) != b && !self.base.failed() {
            self.base.failure(msg.to_string());
        }
        let b_idx = self.put_constant_variable(b);
        self.base.assert_equal(a_idx, b_idx, msg);
    }

    // ════════════════════════════════════════════════════════════════════
    //  Gate creation: arithmetic
    // ════════════════════════════════════════════════════════════════════

    fn push_arithmetic_gate(
        &mut self,
        wires: [u32; NUM_WIRES],
        selectors: [Fr; 6],
    ) {
        self.base.assert_valid_variables(&wires);
        let [a, b, c, d] = wires;
        let [q_m, q_1, q_2, q_3, q_4, q_c] = selectors;
        let block = &mut self.blocks.arithmetic;
        block.populate_wires(a, b, c, d);
        block.push_selectors(q_m, q_1, q_2, q_3, q_4, q_c);
        block.check_selector_length_consistency();
        self.base.increment_num_gates(1);
    }

    /// `a*a_scaling + b*b_scaling + c*c_scaling + const_scaling = 0`.
    pub fn create_add_gate(&mut self, gate: &AddTriple) {
        self.create_big_add_gate(&AddQuad {
            a: gate.a,
            b: gate.b,
            c: gate.c,
            d: self.zero_idx(),
            a_scaling: gate.a_scaling,
            b_scaling: gate.b_scaling,
            c_scaling: gate.c_scaling,
            d_scaling: Fr::zero(),
            const_scaling: gate.const_scaling,
        });
    }

    pub fn create_big_add_gate(&mut self, gate: &AddQuad) {
        self.push_arithmetic_gate(
            [gate.a, gate.b, gate.c, gate.d],
            [
                Fr::zero(),
                gate.a_scaling,
                gate.b_scaling,
                gate.c_scaling,
                gate.d_scaling,
                gate.const_scaling,
            ],
        );
    }

    pub fn create_big_mul_add_gate(&mut self, gate: &MulQuad) {
        self.push_arithmetic_gate(
            [gate.a, gate.b, gate.c, gate.d],
            [
                gate.mul_scaling,
                gate.a_scaling,
                gate.b_scaling,
                gate.c_scaling,
                gate.d_scaling,
                gate.const_scaling,
            ],
        );
    }

    /// Constrain `variable_index` to be 0 or 1 via `x^2 - x = 0`.
    pub fn create_bool_gate(&mut self, variable_index: u32) {
        let zero = self.zero_idx();
        self.push_arithmetic_gate(
            [variable_index, variable_index, zero, zero],
            [Fr::one(), -Fr::one(), Fr::zero(), Fr::zero(), Fr::zero(), Fr::zero()],
        );
    }

    /// `q_m*a*b + q_l*a + q_r*b + q_o*c + q_c = 0`.
    pub fn create_arithmetic_gate(&mut self, gate: &ArithmeticTriple) {
        let zero = self.zero_idx();
        self.push_arithmetic_gate(
            [gate.a, gate.b, gate.c, zero],
            [gate.q_m, gate.q_l, gate.q_r, gate.q_o, Fr::zero(), gate.q_c],
        );
    }

    /// Fix a witness with the gate `1 * witness - witness_value = 0`.
    pub fn fix_witness(&mut self, witness_index: u32, witness_value: Fr) {
        let zero = self.zero_idx();
        self.push_arithmetic_gate(
            [witness_index, zero, zero, zero],
            [Fr::zero(), Fr::one(), Fr::zero(), Fr::zero(), Fr::zero(), -witness_value],
        );
    }

    // ════════════════════════════════════════════════════════════════════
    //  Goblin ECC operations
    // ════════════════════════════════════════════════════════════════════

    /// Queue `accumulator += point`.
    pub fn queue_ecc_add_accum(&mut self, point: G1Affine) -> EccOpTuple {
        self.accumulator += point;
        self.queue_ecc_op(EccOp::add(point))
    }

    /// Queue `accumulator += scalar * point`.
    pub fn queue_ecc_mul_accum(&mut self, point: G1Affine, scalar: Fr) -> EccOpTuple {
        self.accumulator += point * scalar;
        self.queue_ecc_op(EccOp::mul(point, scalar))
    }

    /// Queue an equality assertion against the current accumulator and reset
    /// it. Returns the accumulated point together with the op's witnesses.
    pub fn queue_ecc_eq(&mut self) -> (G1Affine, EccOpTuple) {
        let point = self.accumulator.into_affine();
        self.accumulator = G1Element::zero();
        (point, self.queue_ecc_op(EccOp::eq_and_reset(point)))
    }

    pub fn queue_ecc_no_op(&mut self) -> EccOpTuple {
        self.queue_ecc_op(EccOp::no_op())
    }

    fn queue_ecc_op(&mut self, op: EccOp) -> EccOpTuple {
        let ultra_op = op.to_ultra_op();
        let tuple = EccOpTuple {
            op: self.add_variable(ultra_op.op),
            x_lo: self.add_variable(ultra_op.x_lo),
            x_hi: self.add_variable(ultra_op.x_hi),
            y_lo: self.add_variable(ultra_op.y_lo),
            y_hi: self.add_variable(ultra_op.y_hi),
            z_1: self.add_variable(ultra_op.z_1),
            z_2: self.add_variable(ultra_op.z_2),
            return_is_infinity: ultra_op.return_is_infinity,
        };
        let zero = self.zero_idx();
        let block = &mut self.blocks.ecc_op;
        block.populate_wires(tuple.op, tuple.x_lo, tuple.x_hi, tuple.y_lo);
        block.populate_wires(zero, tuple.y_hi, tuple.z_1, tuple.z_2);
        self.base.increment_num_gates(2);
        self.ecc_ops.push(op);
        tuple
    }

    /// Operations queued by this circuit, in order.
    pub fn ecc_ops(&self) -> &[EccOp] {
        &self.ecc_ops
    }

    // ════════════════════════════════════════════════════════════════════
    //  Pairing-point accumulator
    // ════════════════════════════════════════════════════════════════════

    /// Fold a deferred pairing check into this circuit's accumulator.
    pub fn add_pairing_points(&mut self, points: PairingPoints) {
        match self.pairing_points.as_mut() {
            Some(accumulated) => accumulated.aggregate(&points),
            None => self.pairing_points = Some(points),
        }
    }

    pub fn has_pairing_points(&self) -> bool {
        self.pairing_points.is_some()
    }

    /// The accumulated pairing points, or the trivially valid default.
    pub fn pairing_points(&self) -> PairingPoints {
        self.pairing_points.unwrap_or_default()
    }
}

impl Default for MegaCircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}
