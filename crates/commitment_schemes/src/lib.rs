//! Polynomial commitment scheme types for KZG over BN254.

pub mod batch_mul;
pub mod claim;
pub mod commitment_key;
pub mod kzg;
pub mod pairing_points;
pub mod verification_key;

#[cfg(test)]
mod tests;
