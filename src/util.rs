/// Integer helpers for exact arithmetic.
///
/// This module provides the greatest common divisor used to keep rationals
/// reduced and the exact integer roots used for fractional exponents.
pub mod num;
