use ark_ec::{CurveGroup, VariableBaseMSM};
use bbrs_ecc::curves::bn254::{Fr, G1Affine, G1Element};

/// Computes sum_i scalars[i] * points[i] and returns the result as an affine point.
pub fn batch_mul_native(points: &[G1Affine], scalars: &[Fr]) -> G1Affine {
    assert_eq!(
        points.len(),
        scalars.len(),
        "batch_mul_native: points and scalars must have the same length"
    );

    if points.is_empty() {
        return G1Affine::identity();
    }

    G1Element::msm_unchecked(points, scalars).into_affine()
}
