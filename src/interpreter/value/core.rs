use std::fmt;

use crate::interpreter::value::rational::Rational;

/// Represents a value computed by the evaluator.
///
/// Literals, sums, products, quotients, factorials and integer powers stay
/// [`Number::Exact`]. A fractional power without an exact root (such as
/// `2^(1/2)`) becomes [`Number::Inexact`], and anything combined with an
/// inexact value stays inexact. Inexact values are always finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// An exact rational value.
    Exact(Rational),
    /// A finite floating-point approximation.
    Inexact(f64),
}

impl From<Rational> for Number {
    fn from(value: Rational) -> Self {
        Self::Exact(value)
    }
}

impl From<i128> for Number {
    fn from(value: i128) -> Self {
        Self::Exact(Rational::from_integer(value))
    }
}

impl Number {
    /// Returns the value as an integer if it is an exact whole number.
    ///
    /// Inexact values never count as integers, even when they happen to
    /// have no fractional part.
    ///
    /// # Example
    /// ```
    /// use sixcount::interpreter::value::{core::Number, rational::Rational};
    ///
    /// assert_eq!(Number::from(7).as_integer(), Some(7));
    /// assert_eq!(Number::Exact(Rational::new(7, 2).unwrap()).as_integer(), None);
    /// assert_eq!(Number::Inexact(7.0).as_integer(), None);
    /// ```
    #[must_use]
    pub const fn as_integer(&self) -> Option<i128> {
        match self {
            Self::Exact(r) => r.to_integer(),
            Self::Inexact(_) => None,
        }
    }

    /// Nearest `f64` to the value.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Exact(r) => r.to_f64(),
            Self::Inexact(x) => *x,
        }
    }

    /// True for an exact or inexact zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Exact(r) => r.is_zero(),
            Self::Inexact(x) => *x == 0.0,
        }
    }

    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(r) => write!(f, "{r}"),
            Self::Inexact(x) => write!(f, "≈{x}"),
        }
    }
}
