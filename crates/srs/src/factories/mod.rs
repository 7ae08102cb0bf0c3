mod crs_factory;
mod mem_bn254_crs_factory;

pub use crs_factory::{Bn254Crs, Bn254CrsFactory};
pub use mem_bn254_crs_factory::{MemBn254Crs, MemBn254CrsFactory};
