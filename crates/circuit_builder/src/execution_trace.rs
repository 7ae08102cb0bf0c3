//! Execution trace blocks for the Mega circuit builder.
//!
//! Each block stores its wires column-wise as witness indices. The arithmetic
//! block also carries its selector columns.

use bbrs_ecc::curves::bn254::Fr;

/// Number of wires in the arithmetization.
pub const NUM_WIRES: usize = 4;

/// One row of the arithmetic block, read out of the columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArithmeticGate {
    pub wires: [u32; NUM_WIRES],
    pub q_m: Fr,
    pub q_1: Fr,
    pub q_2: Fr,
    pub q_3: Fr,
    pub q_4: Fr,
    pub q_c: Fr,
}

impl ArithmeticGate {
    /// `q_m*a*b + q_1*a + q_2*b + q_3*c + q_4*d + q_c` for the given wire values.
    pub fn evaluate(&self, values: [Fr; NUM_WIRES]) -> Fr {
        let [a, b, c, d] = values;
        self.q_m * a * b + self.q_1 * a + self.q_2 * b + self.q_3 * c + self.q_4 * d + self.q_c
    }
}

#[derive(Debug, Clone, Default)]
pub struct ArithmeticBlock {
    pub wires: [Vec<u32>; NUM_WIRES],
    pub q_m: Vec<Fr>,
    pub q_1: Vec<Fr>,
    pub q_2: Vec<Fr>,
    pub q_3: Vec<Fr>,
    pub q_4: Vec<Fr>,
    pub q_c: Vec<Fr>,
}

impl ArithmeticBlock {
    pub fn populate_wires(&mut self, idx_1: u32, idx_2: u32, idx_3: u32, idx_4: u32) {
        self.wires[0].push(idx_1);
        self.wires[1].push(idx_2);
        self.wires[2].push(idx_3);
        self.wires[3].push(idx_4);
    }

    pub fn push_selectors(&mut self, q_m: Fr, q_1: Fr, q_2: Fr, q_3: Fr, q_4: Fr, q_c: Fr) {
        self.q_m.push(q_m);
        self.q_1.push(q_1);
        self.q_2.push(q_2);
        self.q_3.push(q_3);
        self.q_4.push(q_4);
        self.q_c.push(q_c);
    }

    pub fn len(&self) -> usize {
        self.wires[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn gate(&self, row: usize) -> ArithmeticGate {
        ArithmeticGate {
            wires: std::array::from_fn(|w| self.wires[w][row]),
            q_m: self.q_m[row],
            q_1: self.q_1[row],
            q_2: self.q_2[row],
            q_3: self.q_3[row],
            q_4: self.q_4[row],
            q_c: self.q_c[row],
        }
    }

    pub fn gates(&self) -> Vec<ArithmeticGate> {
        (0..self.len()).map(|row| self.gate(row)).collect()
    }

    /// Debug check that every selector column matches the wire length.
    pub fn check_selector_length_consistency(&self) {
        let n = self.len();
        for selector in [&self.q_m, &self.q_1, &self.q_2, &self.q_3, &self.q_4, &self.q_c] {
            debug_assert_eq!(selector.len(), n, "selector length mismatch");
        }
    }
}

/// Rows of queued ECC operations, two per op.
#[derive(Debug, Clone, Default)]
pub struct EccOpBlock {
    pub wires: [Vec<u32>; NUM_WIRES],
}

impl EccOpBlock {
    pub fn populate_wires(&mut self, idx_1: u32, idx_2: u32, idx_3: u32, idx_4: u32) {
        self.wires[0].push(idx_1);
        self.wires[1].push(idx_2);
        self.wires[2].push(idx_3);
        self.wires[3].push(idx_4);
    }

    pub fn len(&self) -> usize {
        self.wires[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, row: usize) -> [u32; NUM_WIRES] {
        std::array::from_fn(|w| self.wires[w][row])
    }
}

/// The Mega trace layout: ECC op rows first, then arithmetic gates.
#[derive(Debug, Clone, Default)]
pub struct MegaTraceBlocks {
    pub ecc_op: EccOpBlock,
    pub arithmetic: ArithmeticBlock,
}

impl MegaTraceBlocks {
    pub fn get_total_content_size(&self) -> usize {
        self.ecc_op.len() + self.arithmetic.len()
    }
}
