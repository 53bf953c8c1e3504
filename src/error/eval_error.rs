use thiserror::Error;

/// Represents all errors that can occur during evaluation.
///
/// Positions point at the operator whose evaluation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The right operand of `/` evaluated to exactly zero.
    #[error("Division by zero at position {position}.")]
    DivisionByZero {
        /// Position of the `/`.
        position: usize,
    },
    /// A numerically well-formed but forbidden operation.
    #[error("{detail} (at position {position}).")]
    Domain {
        /// What went wrong.
        detail:   DomainError,
        /// Position of the operator.
        position: usize,
    },
}

/// Details of a [`EvalError::Domain`] failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    /// `!` applied to a fraction or an inexact value.
    #[error("Factorial is only defined for whole numbers")]
    FactorialOfNonInteger,
    /// `!` applied to a negative integer.
    #[error("Factorial is not defined for negative numbers")]
    FactorialOfNegative,
    /// `!` applied to an integer above the configured cap.
    #[error("Factorial operand exceeds {max}")]
    FactorialTooLarge {
        /// The largest operand allowed.
        max: u32,
    },
    /// `0` raised to a negative exponent.
    #[error("Zero cannot be raised to a negative power")]
    ZeroToNegativePower,
    /// A fractional power of a negative base with no real value.
    #[error("Power has no real value")]
    NonRealPower,
    /// A power whose magnitude exceeds the configured bound.
    #[error("Power exceeds the bound of {bound}")]
    OutOfRange {
        /// The configured magnitude bound.
        bound: u64,
    },
    /// An intermediate result does not fit the exact number representation.
    #[error("Intermediate result is too large")]
    Overflow,
}
