use ark_std::Zero;
use bbrs_ecc::curves::bn254::Fr;

/// Evaluate `c_0 + c_1 X + ... + c_{n-1} X^{n-1}` at `z` (Horner).
pub fn evaluate(coeffs: &[Fr], z: &Fr) -> Fr {
    coeffs
        .iter()
        .rev()
        .fold(Fr::zero(), |acc, coeff| acc * z + coeff)
}

/// Divide the polynomial held in `coeffs` by `(X - root)` in place.
///
/// The polynomial must vanish at `root`. Afterwards the quotient occupies the
/// first `n - 1` coefficients and the leading coefficient is zero.
pub fn factor_roots(coeffs: &mut [Fr], root: &Fr) {
    let n = coeffs.len();
    if n == 0 {
        return;
    }
    let mut work = coeffs[n - 1];
    coeffs[n - 1] = Fr::zero();
    for i in (0..n - 1).rev() {
        let temp = coeffs[i];
        coeffs[i] = work;
        work = temp + work * root;
    }
}
