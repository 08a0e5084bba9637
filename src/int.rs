//! Helper traits for templating over integer types.

use std::ops;
use num_bigint::{BigInt, BigUint};
use num_traits::{Bounded, ToPrimitive, Zero};

/// Trait for the fixed-size unsigned integers that hold a floating point bit pattern.
pub trait Int:
    Sized
    + Ord
    + Eq
    + Copy
    + ops::Shr<u32, Output = Self>
    + ops::Shl<u32, Output = Self>
    + ops::Sub<Self, Output = Self>
    + ops::BitAnd<Self, Output = Self>
    + ops::BitOr<Self, Output = Self>
    + ops::BitOrAssign<Self>
    + ops::SubAssign<Self>
    + ops::Not<Output = Self>
    + Into<BigUint>
    + std::hash::Hash
    + std::fmt::Debug
    + std::fmt::LowerHex
{
    fn zero() -> Self;
    fn one() -> Self;
}

impl Int for u32 {
    fn zero() -> u32 {
        0
    }
    fn one() -> u32 {
        1
    }
}

impl Int for u64 {
    fn zero() -> u64 {
        0
    }
    fn one() -> u64 {
        1
    }
}

/// Numerical cast between types. Semantically identical to "as" operator, and can be lossy.
pub trait CastFrom<T> {
    fn cast_from(value: T) -> Self;
}

impl<T: Int> CastFrom<T> for T {
    fn cast_from(value: Self) -> Self {
        value
    }
}

impl CastFrom<u64> for u32 {
    fn cast_from(value: u64) -> u32 {
        value as u32
    }
}

impl CastFrom<u32> for u64 {
    fn cast_from(value: u32) -> u64 {
        value as u64
    }
}

/// Numerical cast between types. Semantically identical to "as" operator, and can be lossy.
pub trait CastTo<T> {
    fn cast_to(self) -> T;
}

impl<T, U: CastFrom<T>> CastTo<U> for T {
    fn cast_to(self) -> U {
        U::cast_from(self)
    }
}

/// Truncate a big integer to its lowest 64 bits.
///
/// Callers only use this on values already known to fit.
pub(crate) fn low_u64(value: &BigUint) -> u64 {
    value.iter_u64_digits().next().unwrap_or(0)
}

/// Fixed-size integer kinds that a floating point value can be converted into.
pub trait IntTarget: Copy + Bounded + Zero {
    /// Narrow an arbitrary precision integer, yielding `None` when it is out of range.
    fn from_bigint(value: &BigInt) -> Option<Self>;
}

macro_rules! impl_int_target {
    ($t:ty, $cvt:ident) => {
        impl IntTarget for $t {
            fn from_bigint(value: &BigInt) -> Option<Self> {
                value.$cvt()
            }
        }
    };
}

impl_int_target!(i32, to_i32);
impl_int_target!(i64, to_i64);
impl_int_target!(u32, to_u32);
impl_int_target!(u64, to_u64);
