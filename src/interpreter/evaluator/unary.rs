use crate::{
    ast::UnaryOperator,
    error::{DomainError, EvalError},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Number, rational::Rational},
    },
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// The only unary operator is `Factorial`. Its operand must be an exact,
    /// non-negative integer no larger than [`Context::max_factorial`].
    /// Inexact values are rejected even when they look whole, because the
    /// digits they came from do not produce that integer exactly.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `position`: Position of the operator for error reporting.
    ///
    /// # Returns
    /// The computed `Number` wrapped in `EvalResult`.
    ///
    /// # Example
    /// ```
    /// use sixcount::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Number},
    /// };
    ///
    /// let context = Context::default();
    /// let v = context.eval_unary(UnaryOperator::Factorial, &Number::from(4), 1).unwrap();
    /// assert_eq!(v, Number::from(24));
    /// ```
    pub fn eval_unary(&self, op: UnaryOperator, value: &Number, position: usize)
                      -> EvalResult<Number> {
        let domain = |detail: DomainError| EvalError::Domain { detail,
                                                                position };
        match op {
            UnaryOperator::Factorial => {
                let n = value.as_integer()
                             .ok_or_else(|| domain(DomainError::FactorialOfNonInteger))?;
                if n < 0 {
                    return Err(domain(DomainError::FactorialOfNegative));
                }
                if n > i128::from(self.max_factorial) {
                    return Err(domain(DomainError::FactorialTooLarge { max: self.max_factorial }));
                }
                let product = factorial(n).ok_or_else(|| domain(DomainError::Overflow))?;
                Ok(Number::Exact(Rational::from_integer(product)))
            },
        }
    }
}

/// Computes `n!` for a non-negative `n`, or `None` on overflow.
fn factorial(n: i128) -> Option<i128> {
    (2..=n).try_fold(1i128, i128::checked_mul)
}
