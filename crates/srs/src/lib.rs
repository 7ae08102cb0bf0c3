//! Structured reference strings (CRS) for BN254 KZG commitments.

pub mod factories;
pub mod global_crs;
pub mod unsafe_crs;
