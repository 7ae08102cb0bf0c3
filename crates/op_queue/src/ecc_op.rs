use ark_ec::AffineRepr;
use ark_ff::Zero;
use bbrs_ecc::curves::bn254::{Fq, Fr, G1Affine};
use bbrs_ecc::fields::field_conversion::{join_scalar, split_fq, split_scalar};

use crate::NUM_WIRES;

/// Operation codes. The value is the bit pattern `add | mul | eq | reset`
/// with add at bit 3 and reset at bit 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EccOpCode {
    NoOp,
    Add,
    Mul,
    EqAndReset,
}

impl EccOpCode {
    pub const fn value(self) -> u64 {
        match self {
            EccOpCode::NoOp => 0,
            EccOpCode::Add => 8,
            EccOpCode::Mul => 4,
            EccOpCode::EqAndReset => 3,
        }
    }

    pub fn from_value(value: u64) -> Option<Self> {
        match value {
            0 => Some(EccOpCode::NoOp),
            8 => Some(EccOpCode::Add),
            4 => Some(EccOpCode::Mul),
            3 => Some(EccOpCode::EqAndReset),
            _ => None,
        }
    }

    pub fn to_fr(self) -> Fr {
        Fr::from(self.value())
    }
}

/// One recorded operation.
///
/// `base_point` is the point added or multiplied, or for `EqAndReset` the
/// value the running accumulator is asserted to equal. The scalar of a `Mul`
/// is kept as its 128-bit halves `z_1 + 2^128 * z_2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EccOp {
    pub op_code: EccOpCode,
    pub base_point: G1Affine,
    pub z_1: Fr,
    pub z_2: Fr,
}

impl EccOp {
    pub fn add(point: G1Affine) -> Self {
        Self {
            op_code: EccOpCode::Add,
            base_point: point,
            z_1: Fr::zero(),
            z_2: Fr::zero(),
        }
    }

    pub fn mul(point: G1Affine, scalar: Fr) -> Self {
        let (z_1, z_2) = split_scalar(&scalar);
        Self {
            op_code: EccOpCode::Mul,
            base_point: point,
            z_1,
            z_2,
        }
    }

    pub fn eq_and_reset(expected: G1Affine) -> Self {
        Self {
            op_code: EccOpCode::EqAndReset,
            base_point: expected,
            z_1: Fr::zero(),
            z_2: Fr::zero(),
        }
    }

    pub fn no_op() -> Self {
        Self {
            op_code: EccOpCode::NoOp,
            base_point: G1Affine::identity(),
            z_1: Fr::zero(),
            z_2: Fr::zero(),
        }
    }

    /// Full scalar of a `Mul`.
    pub fn scalar(&self) -> Fr {
        join_scalar(&self.z_1, &self.z_2)
    }

    /// Affine coordinates of `base_point`, (0, 0) for the point at infinity.
    pub fn coordinates(&self) -> (Fq, Fq) {
        self.base_point.xy().unwrap_or((Fq::zero(), Fq::zero()))
    }

    pub fn to_ultra_op(&self) -> UltraOp {
        let (x, y) = self.coordinates();
        let (x_lo, x_hi) = split_fq(&x);
        let (y_lo, y_hi) = split_fq(&y);
        UltraOp {
            op: self.op_code.to_fr(),
            x_lo,
            x_hi,
            y_lo,
            y_hi,
            z_1: self.z_1,
            z_2: self.z_2,
            return_is_infinity: self.base_point.infinity,
        }
    }

    pub fn to_ultra_rows(&self) -> [[Fr; NUM_WIRES]; 2] {
        self.to_ultra_op().rows()
    }
}

/// An operation encoded in native field elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UltraOp {
    pub op: Fr,
    pub x_lo: Fr,
    pub x_hi: Fr,
    pub y_lo: Fr,
    pub y_hi: Fr,
    pub z_1: Fr,
    pub z_2: Fr,
    pub return_is_infinity: bool,
}

impl UltraOp {
    /// The two log rows: `[op, x_lo, x_hi, y_lo]` and `[0, y_hi, z_1, z_2]`.
    pub fn rows(&self) -> [[Fr; NUM_WIRES]; 2] {
        [
            [self.op, self.x_lo, self.x_hi, self.y_lo],
            [Fr::zero(), self.y_hi, self.z_1, self.z_2],
        ]
    }
}
