//! Circuit builder for circuits that take part in Goblin accumulation.
//!
//! Provides gate data structures, execution trace blocks, the builder base
//! with copy constraints, the Mega builder that queues ECC operations, and a
//! satisfiability checker.

pub mod builder_base;
pub mod circuit_checker;
pub mod execution_trace;
pub mod gate_data;
pub mod mega_builder;

pub use circuit_checker::UltraCircuitChecker;
pub use mega_builder::MegaCircuitBuilder;

#[cfg(test)]
mod tests;
