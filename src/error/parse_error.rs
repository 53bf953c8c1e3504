use std::fmt;

use thiserror::Error;

/// Represents all errors that can occur during lexing or parsing.
///
/// Positions are 0-based character indices into the raw text that was
/// submitted, including any wrapping backticks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Nothing left to evaluate once whitespace and backticks are stripped.
    #[error("Empty expression.")]
    Empty,
    /// A character outside the allowed alphabet, or a stray backtick.
    #[error("Invalid character '{character}' at position {position}.")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// Where it was found.
        position:  usize,
    },
    /// The token sequence does not match the grammar.
    #[error("Syntax error at position {position}: expected {expected}.")]
    Syntax {
        /// The construct the parser was looking for.
        expected: Expected,
        /// Position of the token that did not fit, or the input length when
        /// the input ended early.
        position: usize,
    },
    /// A digit was used a second time while the unique-digit rule is on.
    #[error("Digit {digit} at position {position} was already used.")]
    RepeatedDigit {
        /// The repeated digit.
        digit:    u8,
        /// Position of the second occurrence.
        position: usize,
    },
}

/// The grammar construct a [`ParseError::Syntax`] was expecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// A digit or an opening parenthesis.
    Operand,
    /// A closing parenthesis matching an earlier `(`.
    ClosingParen,
    /// An operator or the end of the expression.
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand => write!(f, "a digit or '('"),
            Self::ClosingParen => write!(f, "')'"),
            Self::EndOfInput => write!(f, "an operator or the end of the expression"),
        }
    }
}
