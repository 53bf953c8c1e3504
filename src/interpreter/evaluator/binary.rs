use crate::{
    ast::BinaryOperator,
    error::{DomainError, EvalError},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Number, rational::Rational},
    },
    util::num::exact_root,
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// `+ - * /` go through [`Context::eval_scalar_op`]; `^` goes through
    /// [`Context::eval_pow`]. Division checks for an exactly-zero divisor
    /// before anything else.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `position`: Position of the operator for error reporting.
    ///
    /// # Example
    /// ```
    /// use sixcount::{
    ///     ast::BinaryOperator,
    ///     error::EvalError,
    ///     interpreter::{evaluator::core::Context, value::core::Number},
    /// };
    ///
    /// let context = Context::default();
    /// let sum = context.eval_binary(BinaryOperator::Add, &Number::from(3), &Number::from(4), 1);
    /// assert_eq!(sum, Ok(Number::from(7)));
    ///
    /// let quotient =
    ///     context.eval_binary(BinaryOperator::Div, &Number::from(4), &Number::from(0), 1);
    /// assert_eq!(quotient, Err(EvalError::DivisionByZero { position: 1 }));
    /// ```
    pub fn eval_binary(&self,
                       op: BinaryOperator,
                       left: &Number,
                       right: &Number,
                       position: usize)
                       -> EvalResult<Number> {
        match op {
            BinaryOperator::Add => {
                Self::eval_scalar_op(left, right, position, Rational::checked_add, |a, b| a + b)
            },
            BinaryOperator::Sub => {
                Self::eval_scalar_op(left, right, position, Rational::checked_sub, |a, b| a - b)
            },
            BinaryOperator::Mul => {
                Self::eval_scalar_op(left, right, position, Rational::checked_mul, |a, b| a * b)
            },
            BinaryOperator::Div => {
                if right.is_zero() {
                    return Err(EvalError::DivisionByZero { position });
                }
                Self::eval_scalar_op(left, right, position, Rational::checked_div, |a, b| a / b)
            },
            BinaryOperator::Pow => self.eval_pow(left, right, position),
        }
    }

    /// Evaluates a scalar arithmetic operation.
    ///
    /// Two exact operands use checked rational arithmetic; as soon as one
    /// side is inexact both are promoted to `f64`. An exact overflow or a
    /// non-finite float is reported as [`DomainError::Overflow`].
    ///
    /// # Parameters
    /// - `left`, `right`: Operands.
    /// - `position`: Position of the operator.
    /// - `exact`: The checked rational operation.
    /// - `inexact`: The floating-point operation.
    pub fn eval_scalar_op(left: &Number,
                          right: &Number,
                          position: usize,
                          exact: fn(Rational, Rational) -> Option<Rational>,
                          inexact: fn(f64, f64) -> f64)
                          -> EvalResult<Number> {
        let overflow = EvalError::Domain { detail: DomainError::Overflow,
                                           position };
        match (left, right) {
            (Number::Exact(a), Number::Exact(b)) => {
                exact(*a, *b).map(Number::Exact).ok_or(overflow)
            },
            _ => {
                let result = inexact(left.as_f64(), right.as_f64());
                if result.is_finite() { Ok(Number::Inexact(result)) } else { Err(overflow) }
            },
        }
    }

    /// Evaluates an exponentiation operation.
    ///
    /// - `0` to a negative power is a domain error, `0^0` is `1`.
    /// - An exact base with an exact integer exponent is computed exactly.
    /// - An exact fractional exponent `p/q` first looks for an exact `q`-th
    ///   root of the base, so `4^(1/2)` stays exactly `2`. Without one the
    ///   result becomes inexact.
    /// - Even roots of negative bases have no real value.
    /// - Results whose magnitude exceeds [`Context::max_magnitude`] are
    ///   rejected.
    ///
    /// # Example
    /// ```
    /// use sixcount::interpreter::{
    ///     evaluator::core::Context,
    ///     value::{core::Number, rational::Rational},
    /// };
    ///
    /// let context = Context::default();
    /// let half = Number::Exact(Rational::new(1, 2).unwrap());
    ///
    /// assert_eq!(context.eval_pow(&Number::from(2), &Number::from(10), 1),
    ///            Ok(Number::from(1024)));
    /// assert_eq!(context.eval_pow(&Number::from(4), &half, 1), Ok(Number::from(2)));
    /// assert!(!context.eval_pow(&Number::from(2), &half, 1).unwrap().is_exact());
    /// ```
    pub fn eval_pow(&self, base: &Number, exponent: &Number, position: usize)
                    -> EvalResult<Number> {
        let domain = |detail: DomainError| EvalError::Domain { detail,
                                                                position };

        if base.is_zero() {
            let e = exponent.as_f64();
            return if e < 0.0 {
                Err(domain(DomainError::ZeroToNegativePower))
            } else if e == 0.0 {
                Ok(Number::Exact(Rational::ONE))
            } else {
                Ok(Number::Exact(Rational::ZERO))
            };
        }

        match (base, exponent) {
            (Number::Exact(b), Number::Exact(e)) => self.exact_pow(*b, *e).map_err(domain),
            _ => self.inexact_pow(base.as_f64(), exponent.as_f64())
                     .map(Number::Inexact)
                     .map_err(domain),
        }
    }

    fn exact_pow(&self, base: Rational, exponent: Rational) -> Result<Number, DomainError> {
        if let Some(n) = exponent.to_integer() {
            return self.checked_powi(base, n).map(Number::Exact);
        }

        let (p, q) = (exponent.numer(), exponent.denom());
        if base.is_negative() && q % 2 == 0 {
            return Err(DomainError::NonRealPower);
        }

        if let Some(root) = rational_root(base, q) {
            return self.checked_powi(root, p).map(Number::Exact);
        }

        // Odd roots of negative bases are real; take the root of the
        // magnitude and restore the sign.
        let magnitude = self.inexact_pow(base.to_f64().abs(), exponent.to_f64())?;
        if base.is_negative() && p % 2 != 0 {
            Ok(Number::Inexact(-magnitude))
        } else {
            Ok(Number::Inexact(magnitude))
        }
    }

    /// Raises an exact base to an integer power, checking the bound after
    /// every multiplication.
    fn checked_powi(&self, base: Rational, exponent: i128) -> Result<Rational, DomainError> {
        let out_of_range = DomainError::OutOfRange { bound: self.max_magnitude };

        // Bases of magnitude one never grow, so skip the loop for them.
        if base.denom() == 1 && base.numer().unsigned_abs() == 1 {
            let negative = base.is_negative() && exponent % 2 != 0;
            return Ok(Rational::from_integer(if negative { -1 } else { 1 }));
        }

        // Every other base at least doubles a term per step, so the bound
        // stops this loop within a few dozen iterations.
        let mut result = Rational::ONE;
        for _ in 0..exponent.unsigned_abs() {
            result = result.checked_mul(base)
                           .filter(|r| self.within_bound(*r))
                           .ok_or(out_of_range)?;
        }

        if exponent < 0 {
            result.checked_recip().ok_or(DomainError::ZeroToNegativePower)
        } else {
            Ok(result)
        }
    }

    fn inexact_pow(&self, base: f64, exponent: f64) -> Result<f64, DomainError> {
        let result = base.powf(exponent);
        if result.is_nan() {
            return Err(DomainError::NonRealPower);
        }
        #[allow(clippy::cast_precision_loss)]
        let bound = self.max_magnitude as f64;
        if !result.is_finite() || result.abs() > bound {
            return Err(DomainError::OutOfRange { bound: self.max_magnitude });
        }
        Ok(result)
    }

    fn within_bound(&self, value: Rational) -> bool {
        let bound = u128::from(self.max_magnitude);
        value.numer().unsigned_abs() <= bound && value.denom().unsigned_abs() <= bound
    }
}

/// The exact `degree`-th root of a rational, if both terms have one.
///
/// Negative bases keep their sign, which is only meaningful for odd
/// degrees; callers reject even roots of negative numbers first.
fn rational_root(base: Rational, degree: i128) -> Option<Rational> {
    let degree = u32::try_from(degree).ok()?;
    let numer = i128::try_from(exact_root(base.numer().unsigned_abs(), degree)?).ok()?;
    let denom = i128::try_from(exact_root(base.denom().unsigned_abs(), degree)?).ok()?;
    Rational::new(if base.is_negative() { -numer } else { numer }, denom)
}
