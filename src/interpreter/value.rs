/// The number type produced by evaluation.
///
/// `Number` is either an exact rational or an inexact float, so callers can
/// tell a genuine integer result apart from one that merely rounds to an
/// integer.
pub mod core;
/// Exact fractions with checked arithmetic.
///
/// Backs every exact value. Terms are `i128`, and any operation that would
/// overflow reports it instead of wrapping.
pub mod rational;
