/// Greatest common divisor of two unsigned integers.
///
/// `gcd(0, 0)` is `0`; for every other input the result is positive.
///
/// ## Example
/// ```
/// use sixcount::util::num::gcd;
///
/// assert_eq!(gcd(12, 18), 6);
/// assert_eq!(gcd(0, 7), 7);
/// ```
#[must_use]
pub const fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

/// Returns the exact integer `degree`-th root of `value`, if there is one.
///
/// The search is a plain bisection over `u128` with checked powers, so it
/// never loses precision the way a floating-point estimate would for large
/// inputs.
///
/// ## Parameters
/// - `value`: The radicand.
/// - `degree`: The root degree. A degree of `0` has no root.
///
/// ## Returns
/// - `Some(r)` with `r^degree == value`.
/// - `None` if no integer satisfies that.
///
/// ## Example
/// ```
/// use sixcount::util::num::exact_root;
///
/// assert_eq!(exact_root(64, 3), Some(4));
/// assert_eq!(exact_root(2, 2), None);
/// assert_eq!(exact_root(1, 1000), Some(1));
/// ```
#[must_use]
pub fn exact_root(value: u128, degree: u32) -> Option<u128> {
    match (value, degree) {
        (_, 0) => None,
        (0 | 1, _) | (_, 1) => Some(value),
        // Any r >= 2 raised to 128 or more already exceeds u128.
        _ if degree >= u128::BITS => None,
        _ => {
            let mut low = 1u128;
            let mut high = 1u128 << (u128::BITS / degree + 1).min(u128::BITS - 1);
            while low <= high {
                let mid = low + (high - low) / 2;
                match mid.checked_pow(degree) {
                    Some(p) if p == value => return Some(mid),
                    Some(p) if p < value => low = mid + 1,
                    _ => high = mid - 1,
                }
            }
            None
        },
    }
}
