use std::sync::{Arc, OnceLock};

use bbrs_ecc::curves::bn254::{G1Affine, G2Affine};

use crate::factories::{Bn254CrsFactory, MemBn254Crs, MemBn254CrsFactory};

static BN254_CRS_FACTORY: OnceLock<Arc<dyn Bn254CrsFactory>> = OnceLock::new();

/// Initialize the global BN254 CRS factory from in-memory points.
///
/// The first initialization wins; returns `false` if a factory was already set.
pub fn init_bn254_mem_crs_factory(points: &[G1Affine], g2_x: G2Affine) -> bool {
    init_bn254_crs(MemBn254Crs::new(points, g2_x))
}

/// Initialize the global BN254 CRS factory from an already built CRS.
pub fn init_bn254_crs(crs: MemBn254Crs) -> bool {
    let factory: Arc<dyn Bn254CrsFactory> = Arc::new(MemBn254CrsFactory::from_crs(crs));
    BN254_CRS_FACTORY.set(factory).is_ok()
}

/// The global BN254 CRS factory, if one has been initialized.
pub fn get_bn254_crs_factory() -> Option<Arc<dyn Bn254CrsFactory>> {
    BN254_CRS_FACTORY.get().cloned()
}
