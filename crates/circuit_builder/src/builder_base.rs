//! CircuitBuilderBase: witness storage shared by circuit builders.
//!
//! Provides variable storage, copy-constraint cycle management (via
//! `next_var_index` / `prev_var_index` / `real_variable_index`), public input
//! tracking, and error-state bookkeeping.

use ark_ff::Zero;
use bbrs_ecc::curves::bn254::Fr;

/// Sentinel: marks the *last* variable in its equivalence class (the "real" variable).
const REAL_VARIABLE: u32 = u32::MAX - 1;

/// Sentinel: marks the *first* variable in its equivalence class.
const FIRST_VARIABLE_IN_CLASS: u32 = u32::MAX - 2;

#[derive(Debug, Clone)]
pub struct CircuitBuilderBase {
    // ── witness storage ─────────────────────────────────────────────────
    variables: Vec<Fr>,

    /// Map from witness index to real variable index. Two witnesses that share
    /// a real variable index are copy-constrained to the same value.
    pub real_variable_index: Vec<u32>,

    // ── copy-constraint cycle ───────────────────────────────────────────
    next_var_index: Vec<u32>,
    prev_var_index: Vec<u32>,

    // ── public inputs ───────────────────────────────────────────────────
    public_inputs: Vec<u32>,

    /// Index at which a witness constrained to equal 0 is stored.
    zero_idx: u32,

    num_gates: usize,

    // ── error state ─────────────────────────────────────────────────────
    failed: bool,
    err: String,
}

impl CircuitBuilderBase {
    // ════════════════════════════════════════════════════════════════════
    //  Construction
    // ════════════════════════════════════════════════════════════════════

    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            real_variable_index: Vec::new(),
            next_var_index: Vec::new(),
            prev_var_index: Vec::new(),
            public_inputs: Vec::new(),
            zero_idx: 0,
            num_gates: 0,
            failed: false,
            err: String::new(),
        }
    }

    // ════════════════════════════════════════════════════════════════════
    //  Variable management
    // ════════════════════════════════════════════════════════════════════

    /// Add a variable (witness) to the circuit and return its index.
    pub fn add_variable(&mut self, value: Fr) -> u32 {
        self.variables.push(value);
        let index = self.variables.len() as u32 - 1;
        self.real_variable_index.push(index);
        self.next_var_index.push(REAL_VARIABLE);
        self.prev_var_index.push(FIRST_VARIABLE_IN_CLASS);
        index
    }

    /// Add a variable and register it as a public input.
    pub fn add_public_variable(&mut self, value: Fr) -> u32 {
        let index = self.add_variable(value);
        self.public_inputs.push(index);
        index
    }

    /// Make an existing witness variable public.
    ///
    /// Returns the position of this variable in the public inputs vector.
    pub fn set_public_input(&mut self, witness_index: u32) -> u32 {
        if self.public_inputs.contains(&witness_index) {
            if !self.failed {
                self.failure("Attempted to set a public input that is already public!".into());
            }
            return 0;
        }
        let public_input_index = self.public_inputs.len() as u32;
        self.public_inputs.push(witness_index);
        public_input_index
    }

    /// Get the witness value for a variable, following copy constraints.
    #[inline]
    pub fn get_variable(&self, index: u32) -> Fr {
        debug_assert!((index as usize) < self.real_variable_index.len());
        let real_idx = self.real_variable_index[index as usize];
        self.variables[real_idx as usize]
    }

    /// Overwrite the value behind a variable. Used by tests that check
    /// a tampered witness is caught.
    #[inline]
    pub fn set_variable_unchecked(&mut self, index: u32, value: Fr) {
        let real_idx = self.real_variable_index[index as usize] as usize;
        self.variables[real_idx] = value;
    }

    pub fn get_variables(&self) -> &[Fr] {
        &self.variables
    }

    pub fn get_num_variables(&self) -> usize {
        self.variables.len()
    }

    // ════════════════════════════════════════════════════════════════════
    //  Copy-constraint / equivalence-class management
    // ════════════════════════════════════════════════════════════════════

    /// Join equivalence classes of `a_idx` and `b_idx`.
    ///
    /// Sets `failed` if the current values disagree.
    pub fn assert_equal(&mut self, a_idx: u32, b_idx: u32, msg: &str) {
        self.assert_valid_variables(&[a_idx, b_idx]);

        let values_equal = self.get_variable(a_idx) == self.get_variable(b_idx);
        if !values_equal && !self.failed {
            self.failure(msg.to_string());
        }

        let a_real_idx = self.real_variable_index[a_idx as usize];
        let b_real_idx = self.real_variable_index[b_idx as usize];
        if a_real_idx == b_real_idx {
            return;
        }

        // Point the whole b-chain at a's real index, then splice the cycles.
        let b_start_idx = self.get_first_variable_in_class(b_idx);
        self.update_real_variable_indices(b_start_idx, a_real_idx);

        let a_start_idx = self.get_first_variable_in_class(a_idx);
        self.next_var_index[b_real_idx as usize] = a_start_idx;
        self.prev_var_index[a_start_idx as usize] = b_real_idx;
    }

    pub fn get_first_variable_in_class(&self, mut index: u32) -> u32 {
        while self.prev_var_index[index as usize] != FIRST_VARIABLE_IN_CLASS {
            index = self.prev_var_index[index as usize];
        }
        index
    }

    fn update_real_variable_indices(&mut self, index: u32, new_real_index: u32) {
        let mut cur = index;
        loop {
            self.real_variable_index[cur as usize] = new_real_index;
            cur = self.next_var_index[cur as usize];
            if cur == REAL_VARIABLE {
                break;
            }
        }
    }

    /// Debug-mode check that all variable indices are valid.
    pub fn assert_valid_variables(&self, variable_indices: &[u32]) {
        if cfg!(debug_assertions) {
            for &idx in variable_indices {
                debug_assert!(
                    (idx as usize) < self.variables.len(),
                    "Variable index {} out of range (variables.len() = {})",
                    idx,
                    self.variables.len()
                );
            }
        }
    }

    // ════════════════════════════════════════════════════════════════════
    //  Public inputs
    // ════════════════════════════════════════════════════════════════════

    pub fn public_inputs(&self) -> &[u32] {
        &self.public_inputs
    }

    pub fn num_public_inputs(&self) -> usize {
        self.public_inputs.len()
    }

    /// Values of the public inputs, in order.
    pub fn public_input_values(&self) -> Vec<Fr> {
        self.public_inputs
            .iter()
            .map(|&idx| self.get_variable(idx))
            .collect()
    }

    // ════════════════════════════════════════════════════════════════════
    //  Gate count
    // ════════════════════════════════════════════════════════════════════

    pub fn num_gates(&self) -> usize {
        self.num_gates
    }

    pub fn increment_num_gates(&mut self, count: usize) {
        self.num_gates += count;
    }

    /// Smallest power-of-two subgroup that fits `num_gates` gates.
    pub fn get_circuit_subgroup_size(&self, num_gates: usize) -> usize {
        num_gates.max(1).next_power_of_two()
    }

    // ════════════════════════════════════════════════════════════════════
    //  Zero index
    // ════════════════════════════════════════════════════════════════════

    pub fn zero_idx(&self) -> u32 {
        self.zero_idx
    }

    /// Add the zero witness. Callers must fix it with a gate.
    pub(crate) fn init_zero_idx(&mut self) -> u32 {
        self.zero_idx = self.add_variable(Fr::zero());
        self.zero_idx
    }

    // ════════════════════════════════════════════════════════════════════
    //  Error state
    // ════════════════════════════════════════════════════════════════════

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn err(&self) -> &str {
        &self.err
    }

    pub fn failure(&mut self, msg: String) {
        self.failed = true;
        self.err = msg;
    }
}

impl Default for CircuitBuilderBase {
    fn default() -> Self {
        Self::new()
    }
}
