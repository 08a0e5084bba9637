//! Correctly rounded encoding of exact values.

use crate::int::low_u64;
use crate::{Environment, ExactValue, ExceptionFlags, Fp, FpDesc, RoundingMode};
use std::cmp::Ordering;
use log::trace;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Discarded part of a significand, measured against half a unit in the last kept place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Remainder {
    Zero,
    BelowHalf,
    Half,
    AboveHalf,
}

impl Remainder {
    #[inline]
    pub(crate) fn is_exact(self) -> bool {
        self == Remainder::Zero
    }
}

/// Split `significand` into the bits above position `shift` and the class of the bits below.
pub(crate) fn split_at(significand: &BigUint, shift: u64) -> (BigUint, Remainder) {
    if shift == 0 {
        return (significand.clone(), Remainder::Zero);
    }
    if significand.is_zero() {
        return (BigUint::zero(), Remainder::Zero);
    }

    // Everything sits strictly below the half-ULP bit.
    if significand.bits() < shift {
        return (BigUint::zero(), Remainder::BelowHalf);
    }

    let kept = significand >> shift as usize;
    let discarded = significand - (&kept << shift as usize);
    let half = BigUint::one() << (shift - 1) as usize;
    let remainder = if discarded.is_zero() {
        Remainder::Zero
    } else {
        match discarded.cmp(&half) {
            Ordering::Less => Remainder::BelowHalf,
            Ordering::Equal => Remainder::Half,
            Ordering::Greater => Remainder::AboveHalf,
        }
    };
    (kept, remainder)
}

/// Whether the magnitude of the kept bits must be incremented by one unit.
///
/// `odd` is the lowest kept bit.
pub(crate) fn round_increment(
    rounding_mode: RoundingMode,
    sign: bool,
    remainder: Remainder,
    odd: bool,
) -> bool {
    if remainder == Remainder::Zero {
        return false;
    }
    match rounding_mode {
        RoundingMode::TowardZero => false,
        RoundingMode::TowardNegative => sign,
        RoundingMode::TowardPositive => !sign,
        RoundingMode::TiesToEven => match remainder {
            Remainder::AboveHalf => true,
            Remainder::Half => odd,
            _ => false,
        },
        RoundingMode::TiesToAway => remainder != Remainder::BelowHalf,
    }
}

impl<Desc: FpDesc> Fp<Desc> {
    /// Get the finite number overflowing result in current rounding mode.
    fn round_overflow(sign: bool, env: &mut Environment) -> Self {
        env.raise(ExceptionFlags::OVERFLOW | ExceptionFlags::INEXACT);

        // When we are rounding away from the Infinity, we set the result
        // to be the largest finite number.
        let rm = env.rounding_mode();
        if (sign && rm == RoundingMode::TowardPositive)
            || (!sign && rm == RoundingMode::TowardNegative)
            || rm == RoundingMode::TowardZero
        {
            trace!(target: "softfp", "overflow clamped to largest finite value under {}", rm);
            return Self::max_finite(sign);
        }

        Self::infinity(sign)
    }

    /// Round an exact value to the nearest representable value under the environment's
    /// rounding mode, raising exception flags as needed.
    ///
    /// The unit in the last place is fixed by the leading bit of `value`, but never below
    /// that of the subnormal range. This denormalizes tiny values before rounding so that they
    /// are rounded exactly once.
    pub fn from_exact(value: &ExactValue, env: &mut Environment) -> Self {
        let sign = value.sign();
        if value.is_zero() {
            return Self::zero(sign);
        }

        let leading_exponent = value.leading_exponent();
        if leading_exponent > Self::MAXIMUM_EXPONENT as i128 {
            return Self::round_overflow(sign, env);
        }

        // Both bounds are small, so from here on the exponents fit in `i64`.
        let ulp_exponent = leading_exponent.max(Self::MINIMUM_EXPONENT as i128) as i64
            - Desc::SIGNIFICAND_WIDTH as i64;
        let shift = ulp_exponent as i128 - value.exponent() as i128;

        let (mut significand, remainder) = if shift <= 0 {
            // Widening is exact.
            (value.significand() << shift.unsigned_abs() as usize, Remainder::Zero)
        } else {
            // A shift beyond `u64` discards everything either way.
            let shift = u64::try_from(shift).unwrap_or(u64::MAX);
            split_at(value.significand(), shift)
        };

        if round_increment(env.rounding_mode(), sign, remainder, significand.bit(0)) {
            significand += BigUint::one();
        }

        // Rounding up an all-ones significand carries into a new leading bit. The bit shifted
        // away is zero, so this stays exact.
        let mut exponent = ulp_exponent + Desc::SIGNIFICAND_WIDTH as i64;
        if significand.bits() > (Desc::SIGNIFICAND_WIDTH + 1) as u64 {
            significand >>= 1;
            exponent += 1;
        }

        if exponent > Self::MAXIMUM_EXPONENT as i64 {
            return Self::round_overflow(sign, env);
        }

        let mut flags = ExceptionFlags::empty();
        if !remainder.is_exact() {
            flags |= ExceptionFlags::INEXACT;
        }

        // Subnormal values (including those that rounded to zero) lack the implicit bit.
        let subnormal = !significand.bit(Desc::SIGNIFICAND_WIDTH as u64);
        let biased_exponent = if subnormal {
            if !remainder.is_exact() {
                flags |= ExceptionFlags::UNDERFLOW;
            }
            0
        } else {
            (exponent + Self::EXPONENT_BIAS as i64) as u32
        };
        env.raise(flags);

        Self::from_parts(sign, biased_exponent, low_u64(&significand))
    }

    /// Encode an integer using ties-to-even. Exception flags are discarded.
    pub fn from_integer(value: impl Into<num_bigint::BigInt>) -> Self {
        Self::from_exact(&ExactValue::from_integer(value), &mut Environment::default())
    }
}
