use ark_std::Zero;
use bbrs_ecc::curves::bn254::Fr;

/// Borrowed coefficient slice placed at `start_index` within a larger
/// virtual polynomial. Reads outside `[start_index, end_index)` are zero.
#[derive(Clone, Copy, Debug)]
pub struct PolynomialSpan<'a> {
    pub start_index: usize,
    pub span: &'a [Fr],
}

impl<'a> PolynomialSpan<'a> {
    pub fn new(span: &'a [Fr], start_index: usize) -> Self {
        Self { start_index, span }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.span.len()
    }

    #[inline]
    pub fn end_index(&self) -> usize {
        self.start_index + self.span.len()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Fr {
        if i >= self.start_index && i < self.end_index() {
            self.span[i - self.start_index]
        } else {
            Fr::zero()
        }
    }
}
