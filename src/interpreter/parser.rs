/// Core parsing entry points.
///
/// Holds the token stream wrapper, the `ParseResult` alias and the top-level
/// `parse` loop. Pending operators and open groups live on a heap stack, so
/// deeply nested input cannot exhaust the call stack.
pub mod core;

/// Binary operator parsing.
///
/// Defines precedence and associativity and reduces pending operators.
pub mod binary;

/// Postfix and primary parsing.
///
/// Parses digits, parenthesized groups and trailing factorials.
pub mod unary;
