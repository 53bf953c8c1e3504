use thiserror::Error;

/// Lexing and parsing errors.
///
/// Defines everything that can go wrong before evaluation starts: empty
/// input, characters outside the allowed alphabet, malformed backtick
/// wrapping, repeated digits and grammar mismatches.
pub mod parse_error;
/// Evaluation errors.
///
/// Contains the errors raised while reducing a syntax tree to a number:
/// division by zero and domain violations such as a factorial of a
/// non-integer or a power outside the configured bound.
pub mod eval_error;

pub use eval_error::{DomainError, EvalError};
pub use parse_error::{Expected, ParseError};

/// Any error produced while turning raw text into a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The text could not be tokenized or parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The expression parsed but could not be evaluated.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
