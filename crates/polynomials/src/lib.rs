pub mod polynomial_span;
pub mod polynomial_arithmetic;
pub mod polynomial;
