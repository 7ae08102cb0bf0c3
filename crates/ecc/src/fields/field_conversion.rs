//! Conversions between `Fq`, `Fr` and their limb decompositions.
//!
//! Two decompositions are used across the workspace:
//!   - the transcript/op-log split of an `Fq` into a (lo, hi) pair of `Fr`
//!     at bit 136 (two 68-bit limbs in the low part, 118 bits in the high part);
//!   - the four 68-bit binary limbs used by non-native field arithmetic, plus a
//!     prime-basis limb (the value reduced modulo r).

use ark_ff::{BigInt, BigInteger, Field, PrimeField};
use crypto_bigint::U256;

use crate::curves::bn254::{Fq, Fr, FQ_MODULUS_BITS};

/// Number of bits in one non-native field limb.
pub const NUM_LIMB_BITS: usize = 68;

/// Number of binary limbs of an `Fq` element.
pub const NUM_BINARY_LIMBS: usize = 4;

/// Bits held by the low element of an (lo, hi) split.
pub const NUM_LO_BITS: usize = 2 * NUM_LIMB_BITS;

/// Bits held by the high element of an (lo, hi) split.
pub const NUM_HI_BITS: usize = FQ_MODULUS_BITS - NUM_LO_BITS;

/// Bits in the low half of a split scalar or challenge.
pub const NUM_SCALAR_LO_BITS: usize = 128;

/// Bits kept in each half of a split transcript challenge.
pub const NUM_CHALLENGE_BITS: usize = 127;

/// Canonical integer representation of a 256-bit prime field element.
pub fn field_to_u256<F>(value: &F) -> U256
where
    F: PrimeField<BigInt = BigInt<4>>,
{
    U256::from_words(value.into_bigint().0)
}

/// Inverse of [`field_to_u256`]; `None` if `value` is not below the modulus.
pub fn u256_to_field<F>(value: &U256) -> Option<F>
where
    F: PrimeField<BigInt = BigInt<4>>,
{
    F::from_bigint(BigInt::new(*value.as_words()))
}

/// `2^bits - 1`.
pub fn low_bits_mask(bits: usize) -> U256 {
    assert!(bits < 256, "mask width {bits} exceeds 255 bits");
    U256::ONE.shl_vartime(bits).wrapping_sub(&U256::ONE)
}

/// Bits `[start, end)` of `value`, shifted down to bit 0.
pub fn slice_u256(value: &U256, start: usize, end: usize) -> U256 {
    assert!(start <= end, "invalid slice [{start}, {end})");
    value.shr_vartime(start) & low_bits_mask(end - start)
}

/// True iff `value < 2^bits`.
pub fn fits_in_bits(value: &U256, bits: usize) -> bool {
    value.shr_vartime(bits) == U256::ZERO
}

// Every value sliced below 254 bits and at most 136 bits wide is below r.
fn small_u256_to_fr(value: &U256) -> Fr {
    Fr::new(BigInt::new(*value.as_words()))
}

/// Split an `Fq` element into `(lo, hi)` with `value = lo + 2^136 * hi`.
pub fn split_fq(value: &Fq) -> (Fr, Fr) {
    let v = field_to_u256(value);
    (
        small_u256_to_fr(&slice_u256(&v, 0, NUM_LO_BITS)),
        small_u256_to_fr(&slice_u256(&v, NUM_LO_BITS, FQ_MODULUS_BITS)),
    )
}

/// Recombine a `(lo, hi)` pair into an `Fq` element.
///
/// Returns `None` unless `lo < 2^136`, `hi < 2^118` and the recombined value
/// is a canonical `Fq` element.
pub fn fq_from_split(lo: &Fr, hi: &Fr) -> Option<Fq> {
    let lo = field_to_u256(lo);
    let hi = field_to_u256(hi);
    if !fits_in_bits(&lo, NUM_LO_BITS) || !fits_in_bits(&hi, NUM_HI_BITS) {
        return None;
    }
    let combined = lo.wrapping_add(&hi.shl_vartime(NUM_LO_BITS));
    u256_to_field::<Fq>(&combined)
}

/// Split an `Fr` scalar into 128-bit low and high halves.
pub fn split_scalar(value: &Fr) -> (Fr, Fr) {
    let v = field_to_u256(value);
    (
        small_u256_to_fr(&slice_u256(&v, 0, NUM_SCALAR_LO_BITS)),
        small_u256_to_fr(&slice_u256(&v, NUM_SCALAR_LO_BITS, 256)),
    )
}

/// `lo + 2^128 * hi` in `Fr`.
pub fn join_scalar(lo: &Fr, hi: &Fr) -> Fr {
    let shift = Fr::from(2u64).pow([NUM_SCALAR_LO_BITS as u64]);
    *lo + shift * hi
}

/// Split a 254-bit challenge into two 127-bit challenges.
pub fn split_challenge(challenge: &Fr) -> [Fr; 2] {
    let v = field_to_u256(challenge);
    [
        small_u256_to_fr(&slice_u256(&v, 0, NUM_CHALLENGE_BITS)),
        small_u256_to_fr(&slice_u256(&v, NUM_CHALLENGE_BITS, 2 * NUM_CHALLENGE_BITS)),
    ]
}

/// Embed an `Fr` element into `Fq`. Exact because `r < q`.
pub fn fr_to_fq(value: &Fr) -> Fq {
    Fq::from_le_bytes_mod_order(&value.into_bigint().to_bytes_le())
}

/// Reduce an `Fq` element modulo r.
pub fn fq_to_fr_reduced(value: &Fq) -> Fr {
    Fr::from_le_bytes_mod_order(&value.into_bigint().to_bytes_le())
}

/// The four 68-bit binary limbs of an `Fq` element, least significant first.
pub fn fq_to_binary_limbs(value: &Fq) -> [Fr; NUM_BINARY_LIMBS] {
    let v = field_to_u256(value);
    std::array::from_fn(|i| {
        let start = i * NUM_LIMB_BITS;
        let end = ((i + 1) * NUM_LIMB_BITS).min(FQ_MODULUS_BITS);
        small_u256_to_fr(&slice_u256(&v, start, end))
    })
}

/// Recombine four 68-bit limbs into an `Fq` element.
///
/// Returns `None` if any limb is out of range or the result is not canonical.
pub fn fq_from_binary_limbs(limbs: &[Fr; NUM_BINARY_LIMBS]) -> Option<Fq> {
    let mut acc = U256::ZERO;
    for (i, limb) in limbs.iter().enumerate().rev() {
        let limb = field_to_u256(limb);
        let width = if i + 1 == NUM_BINARY_LIMBS {
            FQ_MODULUS_BITS - i * NUM_LIMB_BITS
        } else {
            NUM_LIMB_BITS
        };
        if !fits_in_bits(&limb, width) {
            return None;
        }
        acc = acc.shl_vartime(NUM_LIMB_BITS).wrapping_add(&limb);
    }
    u256_to_field::<Fq>(&acc)
}
