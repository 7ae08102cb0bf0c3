//! The ECC operation log.
//!
//! Circuits record elliptic-curve operations (add, scalar-mul, equality
//! assertion, no-op) that are deferred to a dedicated proving stage. Every
//! operation is stored twice: as a raw [`EccOp`] consumed by the execution
//! trace, and as two rows of [`NUM_WIRES`] native field elements (the "ultra
//! op" encoding) that circuits commit to and the merge argument reasons about.

pub mod ecc_op;
pub mod ecc_op_queue;

pub use ecc_op::{EccOp, EccOpCode, UltraOp};
pub use ecc_op_queue::{EccOpQueue, OpQueueError};

/// Number of columns in the ultra op encoding.
pub const NUM_WIRES: usize = 4;

/// Rows occupied by one ultra op.
pub const ULTRA_ROWS_PER_OP: usize = 2;
