use ark_ff::One;
use bbrs_ecc::curves::bn254::{g1_generator, Fr, G1Affine};
use bbrs_ecc::fields::field_conversion::split_fq;
use thiserror::Error;

use crate::ecc_op::EccOp;
use crate::NUM_WIRES;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OpQueueError {
    #[error("operation log is sealed; no further operations may be appended")]
    Sealed,
    #[error("bootstrap row must be the first entry of the log")]
    AlreadyBootstrapped,
}

/// Append-only, columnar log of ECC operations.
///
/// The columns hold the ultra op rows of every operation recorded so far.
/// `previous_ultra_ops_size` marks where the most recent append started, so
/// the aggregate before that append is always a prefix of the current one.
#[derive(Clone, Debug, Default)]
pub struct EccOpQueue {
    raw_ops: Vec<EccOp>,
    ultra_ops: [Vec<Fr>; NUM_WIRES],
    previous_ultra_ops_size: usize,
    ultra_ops_commitments: Option<[G1Affine; NUM_WIRES]>,
    sealed: bool,
}

impl EccOpQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed bootstrap row `[1, gx_lo, gx_hi, gy_lo]`.
    pub fn bootstrap_row() -> [Fr; NUM_WIRES] {
        let generator = g1_generator();
        let (x_lo, x_hi) = split_fq(&generator.x);
        let (y_lo, _) = split_fq(&generator.y);
        [Fr::one(), x_lo, x_hi, y_lo]
    }

    /// Seed an empty log with the bootstrap row so that the previous
    /// aggregate of the first real circuit is nonempty.
    pub fn append_bootstrap_row(&mut self) -> Result<(), OpQueueError> {
        if self.sealed {
            return Err(OpQueueError::Sealed);
        }
        if self.current_size() != 0 {
            return Err(OpQueueError::AlreadyBootstrapped);
        }
        self.previous_ultra_ops_size = 0;
        for (column, value) in self.ultra_ops.iter_mut().zip(Self::bootstrap_row()) {
            column.push(value);
        }
        Ok(())
    }

    /// Append one circuit's operations.
    pub fn append(&mut self, ops: &[EccOp]) -> Result<(), OpQueueError> {
        if self.sealed {
            return Err(OpQueueError::Sealed);
        }
        self.previous_ultra_ops_size = self.current_size();
        for op in ops {
            for row in op.to_ultra_rows() {
                for (column, value) in self.ultra_ops.iter_mut().zip(row) {
                    column.push(value);
                }
            }
        }
        self.raw_ops.extend_from_slice(ops);
        Ok(())
    }

    /// Columns of the aggregate through the most recent append.
    pub fn snapshot_current(&self) -> [&[Fr]; NUM_WIRES] {
        std::array::from_fn(|i| self.ultra_ops[i].as_slice())
    }

    /// Columns of the aggregate as it stood before the most recent append.
    pub fn snapshot_previous(&self) -> [&[Fr]; NUM_WIRES] {
        std::array::from_fn(|i| &self.ultra_ops[i][..self.previous_ultra_ops_size])
    }

    pub fn current_size(&self) -> usize {
        self.ultra_ops[0].len()
    }

    pub fn previous_size(&self) -> usize {
        self.previous_ultra_ops_size
    }

    pub fn raw_ops(&self) -> &[EccOp] {
        &self.raw_ops
    }

    pub fn num_ops(&self) -> usize {
        self.raw_ops.len()
    }

    /// Store the commitments to the current aggregate for reuse by the next merge.
    pub fn cache_commitments(&mut self, commitments: [G1Affine; NUM_WIRES]) {
        self.ultra_ops_commitments = Some(commitments);
    }

    pub fn cached_commitments(&self) -> Option<&[G1Affine; NUM_WIRES]> {
        self.ultra_ops_commitments.as_ref()
    }

    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }
}
