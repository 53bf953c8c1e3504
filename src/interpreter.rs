/// The evaluator module reduces syntax trees to numbers.
///
/// The evaluator walks the AST bottom-up, performs exact rational arithmetic
/// where it can and bounded floating-point arithmetic where it must, and
/// reports domain violations such as division by zero or an oversized
/// factorial.
///
/// # Responsibilities
/// - Evaluates AST nodes in a fixed, deterministic order.
/// - Enforces the factorial and magnitude limits.
/// - Runs the whole tokenize, parse, evaluate pipeline via `Context::run`.
pub mod evaluator;
/// The lexer module tokenizes submitted text.
///
/// The lexer strips one wrapping pair of backticks, skips whitespace and
/// turns the remaining characters into digit, operator and parenthesis
/// tokens, each tagged with its character position.
///
/// # Responsibilities
/// - Rejects every character outside the allowed alphabet.
/// - Reports empty input.
/// - Optionally enforces that no digit is used twice.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// An operator-stack parser over a fixed precedence ladder: `+ -`, then
/// `* /`, then right-associative `^`, then postfix `!`. Nesting depth is
/// limited by memory, not by the call stack.
///
/// # Responsibilities
/// - Converts tokens into AST nodes.
/// - Requires the whole token sequence to be consumed.
/// - Reports the expected construct and position on a mismatch.
pub mod parser;
/// The value module defines the numbers produced by evaluation.
///
/// # Responsibilities
/// - Defines `Number`, tagged exact or inexact.
/// - Implements checked rational arithmetic.
pub mod value;
