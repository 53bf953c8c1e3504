use std::{iter::Peekable, slice::Iter};

use crate::{
    ast::{BinaryOperator, Expr},
    error::{Expected, ParseError},
    interpreter::{
        lexer::Token,
        parser::{
            binary::{fold_operators, push_operator, token_to_binary_operator},
            unary::{close_group, parse_operand, parse_postfix},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A peekable cursor over positioned tokens.
///
/// Besides the tokens themselves it knows where the source text ends, so a
/// missing operand at the very end can still be reported with a position.
pub struct TokenStream<'a> {
    tokens: Peekable<Iter<'a, (Token, usize)>>,
    end:    usize,
}

impl<'a> TokenStream<'a> {
    /// Wraps `tokens`; `end` is the character length of the source.
    #[must_use]
    pub fn new(tokens: &'a [(Token, usize)], end: usize) -> Self {
        Self { tokens: tokens.iter().peekable(),
               end }
    }

    pub fn peek(&mut self) -> Option<&'a (Token, usize)> {
        self.tokens.peek().copied()
    }

    pub fn next(&mut self) -> Option<&'a (Token, usize)> {
        self.tokens.next()
    }

    /// Position of the next token, or the end of the source.
    pub fn position(&mut self) -> usize {
        self.peek().map_or(self.end, |(_, position)| *position)
    }

    /// Builds a syntax error at the current position.
    pub fn error(&mut self, expected: Expected) -> ParseError {
        ParseError::Syntax { expected,
                             position: self.position() }
    }
}

/// An operator still waiting for its right operand.
///
/// The parser keeps these on a heap stack instead of the call stack, so
/// nesting depth is bounded by memory rather than by recursion.
pub(crate) enum Frame {
    /// `left op ...`, reduced once the right operand is complete.
    Binary {
        left:     Expr,
        op:       BinaryOperator,
        position: usize,
    },
    /// An unclosed `(`.
    Group,
}

/// Parses a complete token sequence into a single expression.
///
/// Every token must be consumed; anything left over after a complete
/// expression is a syntax error expecting the end of input. Errors are
/// reported at the first token, scanning left to right, that cannot
/// continue the expression.
///
/// Grammar:
/// ```text
///     input          := additive EOF
///     additive       := multiplicative (("+" | "-") multiplicative)*
///     multiplicative := exponent (("*" | "/") exponent)*
///     exponent       := unary ("^" exponent)?
///     unary          := primary "!"*
///     primary        := DIGIT | "(" additive ")"
/// ```
///
/// # Parameters
/// - `tokens`: Positioned tokens from the lexer.
/// - `end`: Character length of the source, used for errors at the end.
///
/// # Returns
/// The root of the syntax tree.
///
/// # Example
/// ```
/// use sixcount::{
///     error::{Expected, ParseError},
///     interpreter::{lexer::tokenize, parser::core::parse},
/// };
///
/// let tokens = tokenize("6+").unwrap();
/// assert_eq!(parse(&tokens, 2),
///            Err(ParseError::Syntax { expected: Expected::Operand,
///                                     position: 2, }));
/// ```
pub fn parse(tokens: &[(Token, usize)], end: usize) -> ParseResult<Expr> {
    let mut stream = TokenStream::new(tokens, end);
    let mut frames = Vec::new();
    let mut operand = parse_operand(&mut stream, &mut frames)?;

    loop {
        operand = parse_postfix(&mut stream, operand);
        match stream.peek() {
            None => {
                let expr = fold_operators(&mut frames, operand, None);
                if frames.is_empty() {
                    return Ok(expr);
                }
                return Err(stream.error(Expected::ClosingParen));
            },
            Some((Token::RParen, _)) => {
                operand = close_group(&mut frames, operand).ok_or_else(|| {
                                                               stream.error(Expected::EndOfInput)
                                                           })?;
                stream.next();
            },
            Some((token, position)) => {
                let Some(op) = token_to_binary_operator(token) else {
                    let expected = if frames.iter().any(|frame| matches!(frame, Frame::Group)) {
                        Expected::ClosingParen
                    } else {
                        Expected::EndOfInput
                    };
                    return Err(stream.error(expected));
                };
                stream.next();
                push_operator(&mut frames, operand, op, *position);
                operand = parse_operand(&mut stream, &mut frames)?;
            },
        }
    }
}
