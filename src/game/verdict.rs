use thiserror::Error;

use crate::{
    error::{self, Error, EvalError, Expected, ParseError},
    interpreter::value::core::Number,
};

/// The outcome of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// The move counted; `new_total` is the next value to reach.
    Accepted {
        /// The total the next move has to produce.
        new_total: u64,
    },
    /// The move did not count and the game state is unchanged.
    Rejected(Rejection),
}

impl Verdict {
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Why a submission was rejected.
///
/// Lexical, syntactic and numeric reasons come straight from the
/// interpreter errors; the last four are game rules.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    /// Nothing to evaluate.
    #[error("The message is empty.")]
    EmptyExpression,
    /// A character outside the alphabet, or a stray backtick.
    #[error("Invalid character '{character}' at position {position}.")]
    InvalidCharacter {
        /// Where it was found.
        position:  usize,
        /// The offending character.
        character: char,
    },
    /// The expression does not match the grammar.
    #[error("Syntax error at position {position}: expected {expected}.")]
    SyntaxError {
        /// Where the parser gave up.
        position: usize,
        /// What it was looking for.
        expected: Expected,
    },
    /// A digit was used twice under the unique-digit rule.
    #[error("Digit {digit} at position {position} was already used.")]
    RepeatedDigit {
        /// Position of the repeat.
        position: usize,
        /// The digit.
        digit:    u8,
    },
    /// Division by an exact zero.
    #[error("Division by zero at position {position}.")]
    DivisionByZero {
        /// Position of the `/`.
        position: usize,
    },
    /// A forbidden numeric operation.
    #[error("{detail} (at position {position}).")]
    DomainError {
        /// Position of the operator.
        position: usize,
        /// What went wrong.
        detail:   error::DomainError,
    },
    /// The expression evaluated, but not to an exact whole number.
    #[error("{value} is not a whole number.")]
    NotInteger {
        /// The value it did evaluate to.
        value: Number,
    },
    /// The sender also made the previous accepted move.
    #[error("Nobody may count twice in a row.")]
    ConsecutiveMove,
    /// The expression is a whole number, just not the right one.
    #[error("Expected {expected}, but the expression is {got}.")]
    WrongValue {
        /// The total that had to be reached.
        expected: u64,
        /// The value submitted.
        got:      i128,
    },
    /// The total is already the largest the counter can hold.
    #[error("The count cannot go past {total}.")]
    CountExhausted {
        /// The total that was reached.
        total: u64,
    },
}

impl From<ParseError> for Rejection {
    fn from(error: ParseError) -> Self {
        match error {
            ParseError::Empty => Self::EmptyExpression,
            ParseError::InvalidCharacter { character, position } => {
                Self::InvalidCharacter { position,
                                         character }
            },
            ParseError::Syntax { expected, position } => Self::SyntaxError { position,
                                                                             expected },
            ParseError::RepeatedDigit { digit, position } => Self::RepeatedDigit { position,
                                                                                   digit },
        }
    }
}

impl From<EvalError> for Rejection {
    fn from(error: EvalError) -> Self {
        match error {
            EvalError::DivisionByZero { position } => Self::DivisionByZero { position },
            EvalError::Domain { detail, position } => Self::DomainError { position,
                                                                          detail },
        }
    }
}

impl From<Error> for Rejection {
    fn from(error: Error) -> Self {
        match error {
            Error::Parse(e) => e.into(),
            Error::Eval(e) => e.into(),
        }
    }
}
