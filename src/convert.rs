//! Conversions between floating point values, integers and other floating point formats.
//! IEEE 754-2008 5.4.1 and 5.8.

use crate::int::IntTarget;
use crate::{Environment, ExactValue, ExceptionFlags, Fp, FpDesc};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

impl<Desc: FpDesc> Fp<Desc> {
    /// Convert an integer of any width, rounding under the environment's rounding mode.
    pub fn convert_from_int(value: impl Into<BigInt>, env: &mut Environment) -> Self {
        Self::from_exact(&ExactValue::from_integer(value), env)
    }

    /// Convert to an integer of kind `I`.
    ///
    /// NaNs and infinities raise `invalid` and produce zero. Results outside the range of `I`
    /// raise `invalid` and saturate. Otherwise `inexact` is raised if a fractional part was
    /// discarded, unless `quiet` is set.
    pub fn convert_to_integer<I: IntTarget>(self, env: &mut Environment, quiet: bool) -> I {
        if !self.is_finite() {
            env.raise(ExceptionFlags::INVALID);
            return I::zero();
        }
        if self.is_zero() {
            return I::zero();
        }

        let (integral, inexact) = self.to_exact().to_integral(env.rounding_mode());
        match I::from_bigint(&integral) {
            Some(value) => {
                if inexact && !quiet {
                    env.raise(ExceptionFlags::INEXACT);
                }
                value
            }
            None => {
                env.raise(ExceptionFlags::INVALID);
                if integral.is_negative() { I::min_value() } else { I::max_value() }
            }
        }
    }

    pub fn convert_to_int(self, env: &mut Environment, quiet: bool) -> i32 {
        self.convert_to_integer(env, quiet)
    }

    pub fn convert_to_long(self, env: &mut Environment, quiet: bool) -> i64 {
        self.convert_to_integer(env, quiet)
    }

    pub fn convert_to_unsigned_int(self, env: &mut Environment, quiet: bool) -> u32 {
        self.convert_to_integer(env, quiet)
    }

    pub fn convert_to_unsigned_long(self, env: &mut Environment, quiet: bool) -> u64 {
        self.convert_to_integer(env, quiet)
    }

    /// Round to an integral value in the same format.
    pub fn round_to_integral(self, env: &mut Environment) -> Self {
        if self.is_nan() {
            if self.is_signaling() {
                env.raise(ExceptionFlags::INVALID);
            }
            return Self::quiet_nan();
        }

        // Infinities and zeros are already integral.
        if self.is_infinite() || self.is_zero() {
            return self;
        }

        let (integral, inexact) = self.to_exact().to_integral(env.rounding_mode());
        if inexact {
            env.raise(ExceptionFlags::INEXACT);
        }

        // The sign of the input survives even if the magnitude rounds to zero.
        if integral.is_zero() {
            return Self::zero(self.sign());
        }

        // Never larger in magnitude than the next power of two, so this is exact.
        Self::from_exact(&ExactValue::from_integer(integral), env)
    }

    /// Convert to another floating point format.
    pub fn convert_format<Other: FpDesc>(self, env: &mut Environment) -> Fp<Other> {
        if self.is_nan() {
            if self.is_signaling() {
                env.raise(ExceptionFlags::INVALID);
            }
            return Fp::<Other>::quiet_nan();
        }
        if self.is_infinite() {
            return Fp::<Other>::infinity(self.sign());
        }
        Fp::<Other>::from_exact(&self.to_exact(), env)
    }
}
