use crate::{
    ast::{BinaryOperator, Expr, UnaryOperator},
    error::{Error, EvalError},
    interpreter::{
        lexer::{ensure_unique_digits, tokenize},
        parser::core::parse,
        value::core::Number,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Default largest operand accepted by `!`.
pub const MAX_FACTORIAL: u32 = 20;
/// Default magnitude bound on the results of `^`.
pub const MAX_MAGNITUDE: u64 = 1_000_000_000_000;

/// Stores the evaluation settings.
///
/// A `Context` carries no state between evaluations; it only holds the
/// limits that keep evaluation bounded and the optional unique-digit rule.
/// Evaluating the same text with the same context always produces the same
/// result or the same error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// Largest integer `n` for which `n!` is computed.
    pub max_factorial: u32,
    /// Largest magnitude a power may produce. For exact powers this bounds
    /// both numerator and denominator.
    pub max_magnitude: u64,
    /// Reject expressions that use any digit more than once.
    pub unique_digits: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self { max_factorial: MAX_FACTORIAL,
               max_magnitude: MAX_MAGNITUDE,
               unique_digits: false, }
    }
}

impl Context {
    /// Runs the full pipeline on raw text: tokenize, parse, evaluate.
    ///
    /// # Errors
    /// Returns the first lexing, parsing or evaluation error.
    ///
    /// # Example
    /// ```
    /// use sixcount::interpreter::{evaluator::core::Context, value::core::Number};
    ///
    /// let context = Context::default();
    /// assert_eq!(context.run("6^4 + 5*(3!+2) + 1"), Ok(Number::from(1337)));
    /// ```
    pub fn run(&self, source: &str) -> Result<Number, Error> {
        let tokens = tokenize(source)?;
        if self.unique_digits {
            ensure_unique_digits(&tokens)?;
        }
        let expr = parse(&tokens, source.chars().count())?;
        Ok(self.eval(&expr)?)
    }

    /// Evaluates an expression tree bottom-up.
    ///
    /// The left operand is evaluated before the right one, and both before
    /// their operator, so the first error in that order is the one reported.
    /// The walk keeps its pending operators on a heap stack, so tree depth
    /// is not limited by the call stack.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The resulting [`Number`].
    pub fn eval(&self, expr: &Expr) -> EvalResult<Number> {
        let mut pending = Vec::new();
        let mut node = expr;

        loop {
            // Descend along left operands to a literal.
            let mut value = loop {
                match node {
                    Expr::Literal { value, .. } => break Number::from(i128::from(*value)),
                    Expr::UnaryOp { op, expr, position } => {
                        pending.push(Pending::Unary { op:       *op,
                                                      position: *position, });
                        node = expr.as_ref();
                    },
                    Expr::BinaryOp { left,
                                     op,
                                     right,
                                     position, } => {
                        pending.push(Pending::Right { op:       *op,
                                                      right:    right.as_ref(),
                                                      position: *position, });
                        node = left.as_ref();
                    },
                }
            };

            // Apply finished operators until a right operand is still due.
            loop {
                match pending.pop() {
                    None => return Ok(value),
                    Some(Pending::Unary { op, position }) => {
                        value = self.eval_unary(op, &value, position)?;
                    },
                    Some(Pending::Right { op, right, position }) => {
                        pending.push(Pending::Left { op,
                                                     left: value,
                                                     position });
                        node = right;
                        break;
                    },
                    Some(Pending::Left { op, left, position }) => {
                        value = self.eval_binary(op, &left, &value, position)?;
                    },
                }
            }
        }
    }
}

/// An operator whose operands are still being evaluated.
enum Pending<'e> {
    /// `op` applies to the value being computed.
    Unary {
        op:       UnaryOperator,
        position: usize,
    },
    /// The left operand is being computed; `right` comes next.
    Right {
        op:       BinaryOperator,
        right:    &'e Expr,
        position: usize,
    },
    /// The right operand is being computed.
    Left {
        op:       BinaryOperator,
        left:     Number,
        position: usize,
    },
}
