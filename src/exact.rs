//! Arbitrary precision exact binary values.

use crate::round::{round_increment, split_at};
use crate::RoundingMode;
use std::cmp::Ordering;
use std::ops;
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

/// An exact binary value `(-1)^sign * significand * 2^exponent`.
///
/// No operation on this type ever rounds. A zero significand denotes a signed zero.
#[derive(Clone, Debug)]
pub struct ExactValue {
    sign: bool,
    exponent: i64,
    significand: BigUint,
}

impl ExactValue {
    pub fn new(sign: bool, exponent: i64, significand: impl Into<BigUint>) -> Self {
        ExactValue { sign, exponent, significand: significand.into() }
    }

    pub fn zero(sign: bool) -> Self {
        Self::new(sign, 0, BigUint::zero())
    }

    /// Exact value of an integer. Zero is always positive.
    pub fn from_integer(value: impl Into<BigInt>) -> Self {
        let (sign, magnitude) = value.into().into_parts();
        Self::new(sign == Sign::Minus, 0, magnitude)
    }

    #[inline]
    pub fn sign(&self) -> bool {
        self.sign
    }

    #[inline]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    #[inline]
    pub fn significand(&self) -> &BigUint {
        &self.significand
    }

    pub fn is_zero(&self) -> bool {
        self.significand.is_zero()
    }

    /// Exponent of the most significant set bit. Must not be called on zero.
    ///
    /// Widened to `i128` as the bit length can push it past the range of the stored exponent.
    pub(crate) fn leading_exponent(&self) -> i128 {
        debug_assert!(!self.is_zero());
        self.exponent as i128 + self.significand.bits() as i128 - 1
    }

    pub fn negate(&self) -> Self {
        ExactValue {
            sign: !self.sign,
            exponent: self.exponent,
            significand: self.significand.clone(),
        }
    }

    /// Significands of both operands rescaled to their common (smaller) exponent.
    fn align(&self, other: &Self) -> (i64, BigUint, BigUint) {
        let exponent = self.exponent.min(other.exponent);
        let a = &self.significand << self.exponent.abs_diff(exponent) as usize;
        let b = &other.significand << other.exponent.abs_diff(exponent) as usize;
        (exponent, a, b)
    }

    /// Exact sum. Cancellation to zero yields positive zero.
    pub fn add(&self, other: &Self) -> Self {
        // Zeros never take part in alignment, whatever their exponent.
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Self::zero(self.sign && other.sign),
            (true, false) => return other.clone(),
            (false, true) => return self.clone(),
            (false, false) => (),
        }

        let (exponent, a, b) = self.align(other);

        if self.sign == other.sign {
            return ExactValue { sign: self.sign, exponent, significand: a + b };
        }

        match a.cmp(&b) {
            Ordering::Equal => Self::zero(false),
            Ordering::Greater => ExactValue { sign: self.sign, exponent, significand: a - b },
            Ordering::Less => ExactValue { sign: other.sign, exponent, significand: b - a },
        }
    }

    /// Exact product.
    ///
    /// # Panics
    ///
    /// Panics if both operands are nonzero and the sum of their exponents does not fit in `i64`.
    pub fn mul(&self, other: &Self) -> Self {
        let sign = self.sign ^ other.sign;
        if self.is_zero() || other.is_zero() {
            return Self::zero(sign);
        }
        let exponent = match self.exponent.checked_add(other.exponent) {
            Some(exponent) => exponent,
            None => panic!("exponent of exact product out of range"),
        };
        ExactValue { sign, exponent, significand: &self.significand * &other.significand }
    }

    /// Compare `|self|` and `|other|`.
    pub fn cmp_magnitude(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => (),
        }

        // Leading bit positions decide unless they coincide.
        let ord = self.leading_exponent().cmp(&other.leading_exponent());
        if ord != Ordering::Equal {
            return ord;
        }

        let (_, a, b) = self.align(other);
        a.cmp(&b)
    }

    /// Round to an integer under `rounding_mode`.
    ///
    /// Returns the integer and whether any fractional bits were discarded.
    pub fn to_integral(&self, rounding_mode: RoundingMode) -> (BigInt, bool) {
        if self.is_zero() {
            return (BigInt::zero(), false);
        }
        let sign = if self.sign { Sign::Minus } else { Sign::Plus };

        if self.exponent >= 0 {
            let magnitude = &self.significand << self.exponent as usize;
            return (BigInt::from_biguint(sign, magnitude), false);
        }

        let (mut kept, remainder) = split_at(&self.significand, self.exponent.unsigned_abs());
        if round_increment(rounding_mode, self.sign, remainder, kept.bit(0)) {
            kept += BigUint::one();
        }
        (BigInt::from_biguint(sign, kept), !remainder.is_exact())
    }
}

impl PartialEq for ExactValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ExactValue {}

impl PartialOrd for ExactValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Numerical order. Positive and negative zero compare equal.
impl Ord for ExactValue {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.is_zero() && other.is_zero() {
            return Ordering::Equal;
        }
        // A zero operand takes the sign of the other so that magnitude comparison is ordering.
        let self_sign = if self.is_zero() { other.sign } else { self.sign };
        let other_sign = if other.is_zero() { self.sign } else { other.sign };
        match (self_sign, other_sign) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => self.cmp_magnitude(other).reverse(),
        }
    }
}

impl ops::Neg for ExactValue {
    type Output = ExactValue;
    fn neg(mut self) -> ExactValue {
        self.sign = !self.sign;
        self
    }
}

impl ops::Neg for &ExactValue {
    type Output = ExactValue;
    fn neg(self) -> ExactValue {
        self.negate()
    }
}

impl ops::Add for &ExactValue {
    type Output = ExactValue;
    fn add(self, rhs: Self) -> ExactValue {
        ExactValue::add(self, rhs)
    }
}

impl ops::Mul for &ExactValue {
    type Output = ExactValue;
    fn mul(self, rhs: Self) -> ExactValue {
        ExactValue::mul(self, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(sign: bool, exponent: i64, significand: u64) -> ExactValue {
        ExactValue::new(sign, exponent, significand)
    }

    #[test]
    fn test_add_aligns_exponents() {
        let sum = exact(false, 0, 1).add(&exact(false, -24, 1));
        assert_eq!(sum.exponent(), -24);
        assert_eq!(sum.significand(), &BigUint::from((1u64 << 24) + 1));
        assert!(!sum.sign());
    }

    #[test]
    fn test_add_opposite_signs() {
        // 3 + (-5) = -2
        let sum = &exact(false, 0, 3) + &exact(true, 0, 5);
        assert_eq!(sum, ExactValue::from_integer(-2));
        assert!(sum.sign());

        // 1.5 - 1.5 cancels to positive zero
        let sum = &exact(true, -1, 3) + &exact(false, -1, 3);
        assert!(sum.is_zero());
        assert!(!sum.sign());
    }

    #[test]
    fn test_negate_zero() {
        let zero = ExactValue::zero(false);
        assert!((-&zero).sign());
        assert!(!zero.negate().negate().sign());
    }

    #[test]
    fn test_mul() {
        // -0.75 * 2.5 = -1.875
        let product = &exact(true, -2, 3) * &exact(false, -1, 5);
        assert_eq!(product, exact(true, -3, 15));
    }

    #[test]
    fn test_ordering() {
        assert_eq!(exact(false, 1, 1), exact(false, 0, 2));
        assert_eq!(ExactValue::zero(true), ExactValue::zero(false));
        assert!(exact(true, 10, 1) < ExactValue::zero(false));
        assert!(ExactValue::zero(true) < exact(false, -1000, 1));
        assert!(exact(true, 0, 3) < exact(true, 0, 2));
        assert!(exact(false, 0, 3) > exact(false, 1, 1));
        assert_eq!(exact(false, 0, 3).cmp_magnitude(&exact(true, -1, 7)), Ordering::Less);
    }

    #[test]
    fn test_to_integral() {
        let half = exact(false, -1, 1);
        assert_eq!(half.to_integral(RoundingMode::TiesToEven), (BigInt::from(0), true));
        assert_eq!(half.to_integral(RoundingMode::TiesToAway), (BigInt::from(1), true));

        // -2.5
        let value = exact(true, -1, 5);
        assert_eq!(value.to_integral(RoundingMode::TiesToEven), (BigInt::from(-2), true));
        assert_eq!(value.to_integral(RoundingMode::TowardNegative), (BigInt::from(-3), true));
        assert_eq!(value.to_integral(RoundingMode::TowardPositive), (BigInt::from(-2), true));

        let rm = RoundingMode::TowardZero;
        assert_eq!(exact(false, 3, 5).to_integral(rm), (BigInt::from(40), false));
        assert_eq!(exact(true, -2, 12).to_integral(rm), (BigInt::from(-3), false));
        assert_eq!(exact(true, i64::MAX, 0).to_integral(rm), (BigInt::zero(), false));

        let tiny = exact(true, i64::MIN, 3);
        assert_eq!(tiny.to_integral(RoundingMode::TowardNegative), (BigInt::from(-1), true));
        assert_eq!(tiny.to_integral(RoundingMode::TiesToEven), (BigInt::zero(), true));
    }

    #[test]
    fn test_extreme_exponents() {
        let huge = exact(false, i64::MAX - 10, 1 << 20);
        let tiny = exact(true, i64::MIN, 3);
        assert!(huge > exact(false, i64::MAX, 1));
        assert!(tiny < ExactValue::zero(false));
        assert!(tiny > exact(true, i64::MIN + 1, 3));
        assert_eq!(huge.cmp_magnitude(&tiny), Ordering::Greater);

        // Adding a zero never aligns, so its exponent may be arbitrarily far away.
        let sum = exact(false, i64::MAX, 1).add(&exact(false, i64::MIN, 0));
        assert_eq!(sum.exponent(), i64::MAX);
        assert_eq!(sum.significand(), &BigUint::one());
        let sum = exact(true, i64::MIN, 0).add(&tiny);
        assert_eq!(sum.exponent(), i64::MIN);
        assert!(sum.sign());
        assert!(exact(true, i64::MIN, 0).add(&exact(true, i64::MAX, 0)).sign());
        assert!(!exact(false, i64::MIN, 0).add(&exact(true, i64::MAX, 0)).sign());

        let product = &huge * &exact(false, i64::MIN, 0);
        assert!(product.is_zero());
        assert_eq!(&huge * &tiny, exact(true, -11, 3 << 20));
    }

    #[test]
    #[should_panic]
    fn test_mul_exponent_out_of_range() {
        let _ = &exact(false, i64::MAX, 1) * &exact(false, 1, 1);
    }
}
