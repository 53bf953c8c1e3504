use crate::{
    ast::{Expr, UnaryOperator},
    error::Expected,
    interpreter::{
        lexer::{Operator, Token},
        parser::{
            binary::fold_operators,
            core::{Frame, ParseResult, TokenStream},
        },
    },
};

/// Parses the next operand up to, but not including, its factorials.
///
/// Opening parentheses are pushed as [`Frame::Group`] until a digit is
/// found; the matching `)` is handled by [`close_group`].
///
/// Grammar:
/// ```text
///     primary := DIGIT
///              | "(" additive ")"
/// ```
/// # Errors
/// Returns a syntax error expecting an operand if the next token is an
/// operator, a `)`, or the input has ended. There are no prefix operators,
/// so a leading `-` lands here too.
pub(crate) fn parse_operand(tokens: &mut TokenStream<'_>,
                            frames: &mut Vec<Frame>)
                            -> ParseResult<Expr> {
    loop {
        match tokens.peek() {
            Some((Token::Digit(value), position)) => {
                tokens.next();
                return Ok(Expr::Literal { value:    *value,
                                          position: *position, });
            },
            Some((Token::LParen, _)) => {
                tokens.next();
                frames.push(Frame::Group);
            },
            _ => return Err(tokens.error(Expected::Operand)),
        }
    }
}

/// Folds trailing `!` operators onto `node`.
///
/// Each bang wraps the previous result, so `3!!` is `(3!)!` rather than a
/// double factorial.
///
/// Grammar:
/// ```text
///     unary := primary "!"*
/// ```
pub(crate) fn parse_postfix(tokens: &mut TokenStream<'_>, mut node: Expr) -> Expr {
    while let Some((Token::Operator(Operator::Bang), position)) = tokens.peek() {
        tokens.next();
        node = Expr::UnaryOp { op:       UnaryOperator::Factorial,
                               expr:     Box::new(node),
                               position: *position, };
    }
    node
}

/// Completes the innermost open group with `operand` as its last operand.
///
/// # Returns
/// The group's expression as-is (no wrapper node), or `None` if no group
/// is open.
pub(crate) fn close_group(frames: &mut Vec<Frame>, operand: Expr) -> Option<Expr> {
    let expr = fold_operators(frames, operand, None);
    match frames.pop() {
        Some(Frame::Group) => Some(expr),
        _ => None,
    }
}
