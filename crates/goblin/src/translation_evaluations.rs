use bbrs_ecc::curves::bn254::{Fq, Fr};
use bbrs_transcript::codec::{CodecError, FieldSerializable};

/// Evaluations at the translation challenge `x` of the five op-queue columns
/// seen by the trace stage: `sum_i x^i * value_i` over `Fq`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TranslationEvaluations {
    pub op: Fq,
    pub px: Fq,
    pub py: Fq,
    pub z1: Fq,
    pub z2: Fq,
}

impl TranslationEvaluations {
    /// Number of `Fr` elements in [`Self::to_buffer`].
    pub const SIZE: usize = 5 * <Fq as FieldSerializable>::NUM_FR;

    fn values(&self) -> [Fq; 5] {
        [self.op, self.px, self.py, self.z1, self.z2]
    }

    pub fn to_buffer(&self) -> Vec<Fr> {
        self.serialize_to_frs()
    }

    /// `op + v*Px + v^2*Py + v^3*z1 + v^4*z2`.
    pub fn batch(&self, v: &Fq) -> Fq {
        self.values()
            .iter()
            .rev()
            .fold(Fq::from(0u64), |acc, value| acc * v + value)
    }
}

impl FieldSerializable for TranslationEvaluations {
    const NUM_FR: usize = Self::SIZE;

    fn serialize_to_frs(&self) -> Vec<Fr> {
        self.values()
            .iter()
            .flat_map(|value| value.serialize_to_frs())
            .collect()
    }

    fn deserialize_from_frs(frs: &[Fr]) -> Result<Self, CodecError> {
        if frs.len() != Self::SIZE {
            return Err(CodecError::InvalidLength {
                expected: Self::SIZE,
                got: frs.len(),
            });
        }
        let mut values = [Fq::from(0u64); 5];
        for (value, chunk) in values.iter_mut().zip(frs.chunks(<Fq as FieldSerializable>::NUM_FR)) {
            *value = Fq::deserialize_from_frs(chunk)?;
        }
        let [op, px, py, z1, z2] = values;
        Ok(Self { op, px, py, z1, z2 })
    }
}
