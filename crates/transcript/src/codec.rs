//! Field codec for transcript serialization.
//!
//! Every value that crosses the transcript is encoded as a sequence of BN254
//! `Fr` elements. Base-field values are split into a (lo, hi) pair at bit
//! 136; G1 points are their two coordinates, with the point at infinity
//! encoded as all zeros.

use ark_ec::AffineRepr;
use ark_ff::{BigInteger, PrimeField};
use ark_std::{One, Zero};
use bbrs_ecc::curves::bn254::{Fq, Fr, G1Affine};
use bbrs_ecc::fields::field_conversion::{fq_from_split, split_fq};
use thiserror::Error;

/// Decoding failures. Encoding never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("expected {expected} field elements, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("value out of range for {0}")]
    OutOfRange(&'static str),
    #[error("decoded point is not on the curve")]
    PointNotOnCurve,
}

/// Trait for types that can be serialized to/from Fr field elements for the transcript.
pub trait FieldSerializable: Sized {
    /// Number of Fr elements needed to represent this type.
    const NUM_FR: usize;

    /// Serialize to a vector of Fr elements.
    fn serialize_to_frs(&self) -> Vec<Fr>;

    /// Deserialize from exactly `NUM_FR` elements.
    fn deserialize_from_frs(frs: &[Fr]) -> Result<Self, CodecError>;
}

fn check_len(frs: &[Fr], expected: usize) -> Result<(), CodecError> {
    if frs.len() == expected {
        Ok(())
    } else {
        Err(CodecError::InvalidLength {
            expected,
            got: frs.len(),
        })
    }
}

/// Interpret `value` as an integer and return it if it fits in a u64.
fn fr_to_u64(value: &Fr) -> Option<u64> {
    let repr = value.into_bigint();
    if repr.0[1..].iter().all(|w| *w == 0) {
        Some(repr.0[0])
    } else {
        None
    }
}

// --- Primitive types ---

impl FieldSerializable for bool {
    const NUM_FR: usize = 1;

    fn serialize_to_frs(&self) -> Vec<Fr> {
        vec![Fr::from(u64::from(*self))]
    }

    fn deserialize_from_frs(frs: &[Fr]) -> Result<Self, CodecError> {
        check_len(frs, 1)?;
        if frs[0].is_zero() {
            Ok(false)
        } else if frs[0].is_one() {
            Ok(true)
        } else {
            Err(CodecError::OutOfRange("bool"))
        }
    }
}

impl FieldSerializable for u32 {
    const NUM_FR: usize = 1;

    fn serialize_to_frs(&self) -> Vec<Fr> {
        vec![Fr::from(u64::from(*self))]
    }

    fn deserialize_from_frs(frs: &[Fr]) -> Result<Self, CodecError> {
        check_len(frs, 1)?;
        fr_to_u64(&frs[0])
            .and_then(|v| u32::try_from(v).ok())
            .ok_or(CodecError::OutOfRange("u32"))
    }
}

impl FieldSerializable for u64 {
    const NUM_FR: usize = 1;

    fn serialize_to_frs(&self) -> Vec<Fr> {
        vec![Fr::from(*self)]
    }

    fn deserialize_from_frs(frs: &[Fr]) -> Result<Self, CodecError> {
        check_len(frs, 1)?;
        fr_to_u64(&frs[0]).ok_or(CodecError::OutOfRange("u64"))
    }
}

// --- BN254 Fr (1 field element) ---

impl FieldSerializable for Fr {
    const NUM_FR: usize = 1;

    fn serialize_to_frs(&self) -> Vec<Fr> {
        vec![*self]
    }

    fn deserialize_from_frs(frs: &[Fr]) -> Result<Self, CodecError> {
        check_len(frs, 1)?;
        Ok(frs[0])
    }
}

// --- BN254 Fq (2 field elements: lo 136 bits, hi 118 bits) ---

impl FieldSerializable for Fq {
    const NUM_FR: usize = 2;

    fn serialize_to_frs(&self) -> Vec<Fr> {
        let (lo, hi) = split_fq(self);
        vec![lo, hi]
    }

    fn deserialize_from_frs(frs: &[Fr]) -> Result<Self, CodecError> {
        check_len(frs, 2)?;
        fq_from_split(&frs[0], &frs[1]).ok_or(CodecError::OutOfRange("Fq"))
    }
}

// --- BN254 G1 affine points (4 field elements) ---

impl FieldSerializable for G1Affine {
    const NUM_FR: usize = 2 * <Fq as FieldSerializable>::NUM_FR;

    fn serialize_to_frs(&self) -> Vec<Fr> {
        let (x, y) = self.xy().unwrap_or((Fq::zero(), Fq::zero()));
        let mut frs = x.serialize_to_frs();
        frs.extend(y.serialize_to_frs());
        frs
    }

    fn deserialize_from_frs(frs: &[Fr]) -> Result<Self, CodecError> {
        check_len(frs, Self::NUM_FR)?;
        let x = Fq::deserialize_from_frs(&frs[..2])?;
        let y = Fq::deserialize_from_frs(&frs[2..])?;

        if x.is_zero() && y.is_zero() {
            return Ok(G1Affine::identity());
        }

        // BN254 G1 has cofactor 1, so the curve equation is the only check.
        let point = G1Affine::new_unchecked(x, y);
        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(CodecError::PointNotOnCurve)
        }
    }
}

// --- Fixed-size arrays ---

impl<T: FieldSerializable, const N: usize> FieldSerializable for [T; N] {
    const NUM_FR: usize = N * T::NUM_FR;

    fn serialize_to_frs(&self) -> Vec<Fr> {
        self.iter().flat_map(|v| v.serialize_to_frs()).collect()
    }

    fn deserialize_from_frs(frs: &[Fr]) -> Result<Self, CodecError> {
        check_len(frs, Self::NUM_FR)?;
        let items = frs
            .chunks(T::NUM_FR.max(1))
            .take(N)
            .map(T::deserialize_from_frs)
            .collect::<Result<Vec<T>, _>>()?;
        items.try_into().map_err(|_| CodecError::InvalidLength {
            expected: N,
            got: frs.len(),
        })
    }
}

/// Big-endian 32-byte encoding of an `Fr`, as absorbed by byte-oriented hashers.
pub fn fr_to_be_bytes(value: &Fr) -> [u8; 32] {
    let bytes = value.into_bigint().to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::CurveGroup;
    use ark_std::UniformRand;
    use bbrs_ecc::curves::bn254::g1_generator;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fr_roundtrip() {
        let val = Fr::from(42u64);
        let frs = val.serialize_to_frs();
        assert_eq!(frs.len(), 1);
        assert_eq!(Fr::deserialize_from_frs(&frs), Ok(val));
    }

    #[test]
    fn test_u32_roundtrip() {
        let val: u32 = 12345;
        let frs = val.serialize_to_frs();
        assert_eq!(frs.len(), 1);
        assert_eq!(u32::deserialize_from_frs(&frs), Ok(val));
    }

    #[test]
    fn test_u32_rejects_wide_value() {
        let frs = (u64::from(u32::MAX) + 1).serialize_to_frs();
        assert_eq!(
            u32::deserialize_from_frs(&frs),
            Err(CodecError::OutOfRange("u32"))
        );
    }

    #[test]
    fn test_bool_roundtrip() {
        for val in [true, false] {
            let frs = val.serialize_to_frs();
            assert_eq!(frs.len(), 1);
            assert_eq!(bool::deserialize_from_frs(&frs), Ok(val));
        }
        assert!(bool::deserialize_from_frs(&[Fr::from(2u64)]).is_err());
    }

    #[test]
    fn test_fq_roundtrip() {
        let mut rng = StdRng::seed_from_u64(3);
        let val = Fq::rand(&mut rng);
        let frs = val.serialize_to_frs();
        assert_eq!(frs.len(), 2);
        assert_eq!(Fq::deserialize_from_frs(&frs), Ok(val));
    }

    #[test]
    fn test_point_roundtrip_and_infinity() {
        let point = (g1_generator() * Fr::from(77u64)).into_affine();
        let frs = point.serialize_to_frs();
        assert_eq!(frs.len(), 4);
        assert_eq!(G1Affine::deserialize_from_frs(&frs), Ok(point));

        let infinity = G1Affine::identity();
        let frs = infinity.serialize_to_frs();
        assert!(frs.iter().all(|f| f.is_zero()));
        assert_eq!(G1Affine::deserialize_from_frs(&frs), Ok(infinity));
    }

    /// Changing one limb of an encoded point moves it off the curve.
    #[test]
    fn test_point_off_curve_rejected() {
        let mut frs = g1_generator().serialize_to_frs();
        frs[0] += Fr::from(1u64);
        assert_eq!(
            G1Affine::deserialize_from_frs(&frs),
            Err(CodecError::PointNotOnCurve)
        );
    }

    #[test]
    fn test_array_roundtrip() {
        let vals = [Fr::from(1u64), Fr::from(2u64), Fr::from(3u64)];
        let frs = vals.serialize_to_frs();
        assert_eq!(<[Fr; 3]>::deserialize_from_frs(&frs), Ok(vals));
        assert_eq!(
            <[Fr; 3]>::deserialize_from_frs(&frs[..2]),
            Err(CodecError::InvalidLength { expected: 3, got: 2 })
        );
    }

    #[test]
    fn test_be_bytes_are_padded() {
        let bytes = fr_to_be_bytes(&Fr::from(0x0102u64));
        assert_eq!(bytes[30], 0x01);
        assert_eq!(bytes[31], 0x02);
        assert!(bytes[..30].iter().all(|b| *b == 0));
    }
}
