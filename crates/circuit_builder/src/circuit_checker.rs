//! Validates that a circuit's witness satisfies all of its constraints.

use ark_ff::Zero;
use bbrs_ecc::curves::bn254::Fr;

use crate::execution_trace::NUM_WIRES;
use crate::mega_builder::MegaCircuitBuilder;

pub struct UltraCircuitChecker;

impl UltraCircuitChecker {
    /// Check every arithmetic gate and every ECC op row of `builder`.
    ///
    /// Returns `Ok(())` if the circuit is satisfied, or `Err(message)` listing
    /// the failing rows.
    pub fn check(builder: &MegaCircuitBuilder) -> Result<(), String> {
        if builder.failed() {
            return Err(format!("Circuit builder failed: {}", builder.base.err()));
        }

        let mut failures = Vec::new();

        let arithmetic = &builder.blocks.arithmetic;
        for row in 0..arithmetic.len() {
            let gate = arithmetic.gate(row);
            let values: [Fr; NUM_WIRES] = gate.wires.map(|w| builder.get_variable(w));
            if !gate.evaluate(values).is_zero() {
                failures.push(format!("  Arithmetic relation failed at row {}\n", row));
            }
        }

        let ecc_op = &builder.blocks.ecc_op;
        if ecc_op.len() != 2 * builder.ecc_ops().len() {
            failures.push(format!(
                "  EccOp block has {} rows for {} queued ops\n",
                ecc_op.len(),
                builder.ecc_ops().len()
            ));
        } else {
            for (i, op) in builder.ecc_ops().iter().enumerate() {
                for (j, expected) in op.to_ultra_rows().iter().enumerate() {
                    let row = 2 * i + j;
                    let values = ecc_op.row(row).map(|w| builder.get_variable(w));
                    if &values != expected {
                        failures.push(format!("  EccOp row {} does not match queued op\n", row));
                    }
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            let mut msg = String::from("Circuit check failed:\n");
            for failure in failures {
                msg.push_str(&failure);
            }
            Err(msg)
        }
    }
}
