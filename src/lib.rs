//! # sixcount
//!
//! sixcount backs a counting game played in a chat channel. Players count
//! upwards together, but every move has to be a mathematical expression
//! built from the digits 1 to 6 and the operators `+ - * / ^ !` that
//! evaluates to exactly the next number. Nobody may move twice in a row.
//!
//! The crate validates those expressions (tokenizer, parser, evaluator) and
//! runs the turn-state machine that accepts or rejects each move.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum and operator types that represent a
/// submitted expression as a tree. The AST is built by the parser and
/// consumed by the evaluator.
///
/// # Responsibilities
/// - Defines literal, postfix and binary nodes.
/// - Attaches source positions to nodes for error reporting.
pub mod ast;
/// The chat boundary.
///
/// Separates moves from reserved-prefix messages, answers commands and
/// renders verdicts.
pub mod chat;
/// Settings loaded from TOML.
pub mod config;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines every error that can be raised while lexing,
/// parsing or evaluating an expression. Each carries the position and
/// detail needed to explain the failure without re-running anything.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches character positions for context.
pub mod error;
/// The counting game itself.
///
/// Wraps evaluation results in the game rules: exact integers only, no
/// consecutive moves, and the value must be the next number.
pub mod game;
/// Orchestrates expression evaluation.
///
/// Ties together lexing, parsing, evaluation and the number types.
///
/// # Responsibilities
/// - Coordinates lexer, parser and evaluator.
/// - Provides entry points for evaluating submitted text.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// General numeric helpers.
pub mod util;

use crate::{
    error::Error,
    interpreter::{evaluator::core::Context, value::core::Number},
};

/// Evaluates an expression with the default limits.
///
/// # Errors
/// Returns an error if the text contains characters outside the alphabet,
/// does not parse, or hits a numeric domain error.
///
/// # Examples
/// ```
/// use sixcount::{evaluate, interpreter::value::core::Number};
///
/// assert_eq!(evaluate("3!").unwrap(), Number::from(6));
/// assert_eq!(evaluate("(6-5)!").unwrap(), Number::from(1));
///
/// // `0` is not a digit of the game.
/// assert!(evaluate("4/0").is_err());
/// ```
pub fn evaluate(source: &str) -> Result<Number, Error> {
    Context::default().run(source)
}
