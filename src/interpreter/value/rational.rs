use std::fmt;

use crate::util::num::gcd;

/// An exact fraction `numer / denom`.
///
/// Always kept in lowest terms with a positive denominator, so two equal
/// values have identical fields and the derived equality is numeric
/// equality.
///
/// All arithmetic is checked: an operation whose intermediate products do
/// not fit `i128` returns `None` instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: i128,
    denom: i128,
}

impl Rational {
    /// The value `0`.
    pub const ZERO: Self = Self { numer: 0,
                                  denom: 1, };
    /// The value `1`.
    pub const ONE: Self = Self { numer: 1,
                                 denom: 1, };

    /// Builds a reduced fraction.
    ///
    /// Returns `None` if `denom` is zero or if normalizing the sign
    /// overflows.
    ///
    /// # Example
    /// ```
    /// use sixcount::interpreter::value::rational::Rational;
    ///
    /// let half = Rational::new(3, -6).unwrap();
    /// assert_eq!(half.numer(), -1);
    /// assert_eq!(half.denom(), 2);
    /// assert!(Rational::new(1, 0).is_none());
    /// ```
    #[must_use]
    pub fn new(numer: i128, denom: i128) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        let (numer, denom) = if denom < 0 {
            (numer.checked_neg()?, denom.checked_neg()?)
        } else {
            (numer, denom)
        };
        let g = gcd(numer.unsigned_abs(), denom.unsigned_abs());
        // g divides denom, which is positive and fits i128.
        let g = i128::try_from(g).ok()?;
        Some(Self { numer: numer / g,
                    denom: denom / g, })
    }

    /// A whole number.
    #[must_use]
    pub const fn from_integer(value: i128) -> Self {
        Self { numer: value,
               denom: 1, }
    }

    #[must_use]
    pub const fn numer(self) -> i128 {
        self.numer
    }

    #[must_use]
    pub const fn denom(self) -> i128 {
        self.denom
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.numer == 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.numer < 0
    }

    #[must_use]
    pub const fn is_integer(self) -> bool {
        self.denom == 1
    }

    /// The value as an integer, if it is one.
    #[must_use]
    pub const fn to_integer(self) -> Option<i128> {
        if self.is_integer() { Some(self.numer) } else { None }
    }

    /// Nearest `f64`; precision is lost for very large terms.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        self.numer as f64 / self.denom as f64
    }

    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        let g = i128::try_from(gcd(self.denom.unsigned_abs(), rhs.denom.unsigned_abs())).ok()?;
        let left = self.numer.checked_mul(rhs.denom / g)?;
        let right = rhs.numer.checked_mul(self.denom / g)?;
        Self::new(left.checked_add(right)?, (self.denom / g).checked_mul(rhs.denom)?)
    }

    #[must_use]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs.checked_neg()?)
    }

    #[must_use]
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        // Cross-reduce first so products stay small.
        let g1 = i128::try_from(gcd(self.numer.unsigned_abs(), rhs.denom.unsigned_abs())).ok()?;
        let g2 = i128::try_from(gcd(rhs.numer.unsigned_abs(), self.denom.unsigned_abs())).ok()?;
        let numer = (self.numer / g1).checked_mul(rhs.numer / g2)?;
        let denom = (self.denom / g2).checked_mul(rhs.denom / g1)?;
        Self::new(numer, denom)
    }

    /// Division; `None` when `rhs` is zero or the result overflows.
    #[must_use]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        self.checked_mul(rhs.checked_recip()?)
    }

    #[must_use]
    pub fn checked_neg(self) -> Option<Self> {
        Some(Self { numer: self.numer.checked_neg()?,
                    denom: self.denom, })
    }

    /// `1 / self`; `None` for zero.
    #[must_use]
    pub fn checked_recip(self) -> Option<Self> {
        Self::new(self.denom, self.numer)
    }
}

impl From<i128> for Rational {
    fn from(value: i128) -> Self {
        Self::from_integer(value)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}
