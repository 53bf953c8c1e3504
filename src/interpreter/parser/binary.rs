use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::{Operator, Token},
        parser::core::Frame,
    },
};

/// Binding strength of a binary operator: `+ -` < `* /` < `^`.
#[must_use]
pub const fn precedence(op: BinaryOperator) -> u8 {
    match op {
        BinaryOperator::Add | BinaryOperator::Sub => 1,
        BinaryOperator::Mul | BinaryOperator::Div => 2,
        BinaryOperator::Pow => 3,
    }
}

/// Whether `pending`, already on the stack, takes its right operand before
/// `incoming` takes its left one.
///
/// Left-associative operators reduce on equal precedence, so `6-3-2` is
/// `(6-3)-2`. `^` does not, so `2^3^2` is `2^(3^2)`.
///
/// # Example
/// ```
/// use sixcount::{ast::BinaryOperator, interpreter::parser::binary::binds_before};
///
/// assert!(binds_before(BinaryOperator::Mul, BinaryOperator::Add));
/// assert!(binds_before(BinaryOperator::Sub, BinaryOperator::Sub));
/// assert!(!binds_before(BinaryOperator::Pow, BinaryOperator::Pow));
/// assert!(!binds_before(BinaryOperator::Add, BinaryOperator::Mul));
/// ```
#[must_use]
pub const fn binds_before(pending: BinaryOperator, incoming: BinaryOperator) -> bool {
    let (pending_precedence, incoming_precedence) = (precedence(pending), precedence(incoming));
    pending_precedence > incoming_precedence
    || (pending_precedence == incoming_precedence && !matches!(incoming, BinaryOperator::Pow))
}

/// Reduces pending binary operators onto `right`.
///
/// With `incoming` set, only operators that bind before it are reduced;
/// with `None`, every binary frame down to the nearest open group is.
///
/// # Parameters
/// - `frames`: The parser's pending operators.
/// - `right`: The operand just completed.
/// - `incoming`: The operator about to be pushed, if any.
///
/// # Returns
/// The reduced expression, which becomes the next left operand.
pub(crate) fn fold_operators(frames: &mut Vec<Frame>,
                             mut right: Expr,
                             incoming: Option<BinaryOperator>)
                             -> Expr {
    while let Some(&Frame::Binary { op: pending, .. }) = frames.last()
          && incoming.is_none_or(|incoming| binds_before(pending, incoming))
    {
        let Some(Frame::Binary { left, op, position }) = frames.pop() else {
            break;
        };
        right = Expr::BinaryOp { left: Box::new(left),
                                 op,
                                 right: Box::new(right),
                                 position };
    }
    right
}

/// Pushes `left op` after reducing everything that binds tighter.
pub(crate) fn push_operator(frames: &mut Vec<Frame>,
                            left: Expr,
                            op: BinaryOperator,
                            position: usize) {
    let left = fold_operators(frames, left, Some(op));
    frames.push(Frame::Binary { left,
                                op,
                                position });
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for `!`, parentheses and digits.
///
/// # Example
/// ```
/// use sixcount::{
///     ast::BinaryOperator,
///     interpreter::{
///         lexer::{Operator, Token},
///         parser::binary::token_to_binary_operator,
///     },
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Operator(Operator::Plus)),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::Operator(Operator::Bang)), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Operator(Operator::Plus) => Some(BinaryOperator::Add),
        Token::Operator(Operator::Minus) => Some(BinaryOperator::Sub),
        Token::Operator(Operator::Star) => Some(BinaryOperator::Mul),
        Token::Operator(Operator::Slash) => Some(BinaryOperator::Div),
        Token::Operator(Operator::Caret) => Some(BinaryOperator::Pow),
        _ => None,
    }
}
