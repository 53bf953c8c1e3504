/// Core evaluation logic.
///
/// Defines the evaluation `Context` with its numeric limits and the
/// tree-walking dispatch.
pub mod core;

/// Binary operator evaluation.
///
/// Implements `+ - * /` on exact and inexact numbers and exponentiation
/// with exact roots where possible.
pub mod binary;

/// Unary operator evaluation.
///
/// Implements the bounded factorial.
pub mod unary;
