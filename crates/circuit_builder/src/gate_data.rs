//! Gate data structures for circuit constraint specification.
//!
//! These structs describe the wire indices and scaling factors for the gate
//! types supported by the Mega circuit builder.

use bbrs_ecc::curves::bn254::Fr;

/// 3-wire addition gate: a*a_scaling + b*b_scaling + c*c_scaling + const_scaling = 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTriple {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub a_scaling: Fr,
    pub b_scaling: Fr,
    pub c_scaling: Fr,
    pub const_scaling: Fr,
}

/// 4-wire addition gate: a*a_scaling + b*b_scaling + c*c_scaling + d*d_scaling + const_scaling = 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddQuad {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
    pub a_scaling: Fr,
    pub b_scaling: Fr,
    pub c_scaling: Fr,
    pub d_scaling: Fr,
    pub const_scaling: Fr,
}

/// 4-wire mul-add gate: a*b*mul_scaling + a*a_scaling + b*b_scaling + c*c_scaling + d*d_scaling + const_scaling = 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MulQuad {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
    pub mul_scaling: Fr,
    pub a_scaling: Fr,
    pub b_scaling: Fr,
    pub c_scaling: Fr,
    pub d_scaling: Fr,
    pub const_scaling: Fr,
}

/// Arithmetic gate with standard selector naming: q_m*a*b + q_l*a + q_r*b + q_o*c + q_c = 0
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArithmeticTriple {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub q_m: Fr,
    pub q_l: Fr,
    pub q_r: Fr,
    pub q_o: Fr,
    pub q_c: Fr,
}

/// Witness indices of one queued ECC operation: op code, point coordinates
/// split into limbs, and the scalar halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EccOpTuple {
    pub op: u32,
    pub x_lo: u32,
    pub x_hi: u32,
    pub y_lo: u32,
    pub y_hi: u32,
    pub z_1: u32,
    pub z_2: u32,
    pub return_is_infinity: bool,
}
