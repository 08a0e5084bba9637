use crate::int::{CastFrom, CastTo, Int};
use crate::ExactValue;
use std::fmt;
use std::ops;
use num_bigint::BigUint;

/// Description of a binary interchange format.
///
/// All encoding and rounding logic is generic over this trait; [`F32Desc`] and [`F64Desc`] are
/// the two supported layouts.
pub trait FpDesc: Copy {
    const EXPONENT_WIDTH: u32;
    const SIGNIFICAND_WIDTH: u32;
    type Holder: Int + CastFrom<u32> + CastFrom<u64> + CastTo<u32> + CastTo<u64>;
}

/// A floating point bit pattern of format `Desc`. Equality is bitwise.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fp<Desc: FpDesc>(pub Desc::Holder);

impl<Desc: FpDesc> Fp<Desc> {
    // Special exponent values
    // All biased exponents have type u32, and unbiased exponents have type i32.
    pub(crate) const INFINITY_BIASED_EXPONENT: u32 = (1 << Desc::EXPONENT_WIDTH) - 1;
    pub(crate) const MAXIMUM_BIASED_EXPONENT: u32 = Self::INFINITY_BIASED_EXPONENT - 1;
    pub(crate) const EXPONENT_BIAS: i32 = (1 << (Desc::EXPONENT_WIDTH - 1)) - 1;
    pub(crate) const MINIMUM_EXPONENT: i32 = 1 - Self::EXPONENT_BIAS;
    pub(crate) const MAXIMUM_EXPONENT: i32 =
        Self::MAXIMUM_BIASED_EXPONENT as i32 - Self::EXPONENT_BIAS;

    #[inline]
    pub fn new(value: Desc::Holder) -> Self {
        Fp(value)
    }

    #[inline]
    pub fn bits(self) -> Desc::Holder {
        self.0
    }

    // #region Special constants values
    //

    pub fn quiet_nan() -> Self {
        let mut value = Self(Desc::Holder::zero());
        value.set_biased_exponent(Self::INFINITY_BIASED_EXPONENT);
        value.set_trailing_significand(Desc::Holder::one() << (Desc::SIGNIFICAND_WIDTH - 1));
        value
    }

    pub fn infinity(sign: bool) -> Self {
        let mut value = Self(Desc::Holder::zero());
        value.set_sign(sign);
        value.set_biased_exponent(Self::INFINITY_BIASED_EXPONENT);
        value
    }

    pub fn zero(sign: bool) -> Self {
        let mut value = Self(Desc::Holder::zero());
        value.set_sign(sign);
        value
    }

    /// Largest finite magnitude with the given sign.
    pub fn max_finite(sign: bool) -> Self {
        // Decrement by one will shift value from infinity to max finite number
        let mut value = Self::infinity(sign);
        value.0 -= Desc::Holder::one();
        value
    }

    //
    // #endregion

    // #region Component accessors
    //

    pub fn sign(&self) -> bool {
        self.0 >> (Desc::EXPONENT_WIDTH + Desc::SIGNIFICAND_WIDTH) != Desc::Holder::zero()
    }

    fn set_sign(&mut self, sign: bool) {
        let mask = Desc::Holder::one() << (Desc::EXPONENT_WIDTH + Desc::SIGNIFICAND_WIDTH);
        if sign {
            self.0 |= mask;
        } else {
            self.0 = self.0 & !mask;
        }
    }

    pub fn biased_exponent(&self) -> u32 {
        let mask = (Desc::Holder::one() << Desc::EXPONENT_WIDTH) - Desc::Holder::one();
        CastTo::<u32>::cast_to((self.0 >> Desc::SIGNIFICAND_WIDTH) & mask)
    }

    /// Set the biased exponent of the floating pointer number.
    /// Only up to exponent_width bits are respected and all other bits are ignored.
    fn set_biased_exponent(&mut self, exp: u32) {
        let mask = ((Desc::Holder::one() << Desc::EXPONENT_WIDTH) - Desc::Holder::one())
            << Desc::SIGNIFICAND_WIDTH;
        let exp = CastTo::<Desc::Holder>::cast_to(exp) << Desc::SIGNIFICAND_WIDTH;
        self.0 = (self.0 & !mask) | (exp & mask);
    }

    pub fn trailing_significand(&self) -> Desc::Holder {
        let mask = (Desc::Holder::one() << Desc::SIGNIFICAND_WIDTH) - Desc::Holder::one();
        self.0 & mask
    }

    // Set the trailing significand of the floating pointer number.
    // Only up to significand_width bits are respected and all other bits are ignored.
    fn set_trailing_significand(&mut self, value: Desc::Holder) {
        let mask = (Desc::Holder::one() << Desc::SIGNIFICAND_WIDTH) - Desc::Holder::one();
        self.0 = (self.0 & !mask) | (value & mask);
    }

    /// Assemble a value from its three fields.
    pub(crate) fn from_parts(sign: bool, biased_exponent: u32, trailing_significand: u64) -> Self {
        let mut value = Self(Desc::Holder::zero());
        value.set_sign(sign);
        value.set_biased_exponent(biased_exponent);
        value.set_trailing_significand(trailing_significand.cast_to());
        value
    }

    //
    // #endregion

    /// Decode a finite value into its exact value.
    ///
    /// Panics if `self` is an infinity or NaN; callers must classify first.
    pub fn to_exact(&self) -> ExactValue {
        let biased_exponent = self.biased_exponent();
        let trailing_significand = self.trailing_significand();

        // We couldn't handle this
        assert!(
            biased_exponent != Self::INFINITY_BIASED_EXPONENT,
            "{:?} has no exact value",
            self
        );

        let exponent = Self::MINIMUM_EXPONENT.max(biased_exponent as i32 - Self::EXPONENT_BIAS)
            - Desc::SIGNIFICAND_WIDTH as i32;
        let significand: BigUint = if biased_exponent == 0 {
            trailing_significand.into()
        } else {
            (trailing_significand | (Desc::Holder::one() << Desc::SIGNIFICAND_WIDTH)).into()
        };
        ExactValue::new(self.sign(), exponent as i64, significand)
    }

    // #region sign bit operations
    // IEEE 754-2008 5.5.1 Quiet-computational operations > Sign bit operations
    //

    pub fn abs(mut self) -> Self {
        self.set_sign(false);
        self
    }

    pub fn negate(mut self) -> Self {
        self.set_sign(!self.sign());
        self
    }

    pub fn copy_sign(mut self, another: Self) -> Self {
        self.set_sign(another.sign());
        self
    }

    //
    // #endregion

    // #region Classification
    //

    pub fn is_normal(&self) -> bool {
        let exponent = self.biased_exponent();
        exponent != 0 && exponent != Self::INFINITY_BIASED_EXPONENT
    }

    pub fn is_finite(&self) -> bool {
        self.biased_exponent() != Self::INFINITY_BIASED_EXPONENT
    }

    pub fn is_zero(&self) -> bool {
        self.biased_exponent() == 0 && self.trailing_significand() == Desc::Holder::zero()
    }

    pub fn is_subnormal(&self) -> bool {
        self.biased_exponent() == 0 && self.trailing_significand() != Desc::Holder::zero()
    }

    pub fn is_infinite(&self) -> bool {
        self.biased_exponent() == Self::INFINITY_BIASED_EXPONENT
            && self.trailing_significand() == Desc::Holder::zero()
    }

    pub fn is_nan(&self) -> bool {
        self.biased_exponent() == Self::INFINITY_BIASED_EXPONENT
            && self.trailing_significand() != Desc::Holder::zero()
    }

    pub fn is_signaling(&self) -> bool {
        // Special exponent for Infinites and NaNs
        if !self.is_nan() {
            return false;
        }

        // Signaling NaN has MSB = 0, otherwise quiet NaN
        self.trailing_significand() & (Desc::Holder::one() << (Desc::SIGNIFICAND_WIDTH - 1))
            == Desc::Holder::zero()
    }

    //
    // #endregion
}

impl<Desc: FpDesc> fmt::Debug for Fp<Desc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp({:#x})", self.0)
    }
}

impl<Desc: FpDesc> ops::Neg for Fp<Desc> {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct F32Desc;

impl FpDesc for F32Desc {
    const EXPONENT_WIDTH: u32 = 8;
    const SIGNIFICAND_WIDTH: u32 = 23;
    type Holder = u32;
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct F64Desc;

impl FpDesc for F64Desc {
    const EXPONENT_WIDTH: u32 = 11;
    const SIGNIFICAND_WIDTH: u32 = 52;
    type Holder = u64;
}

pub type F32 = Fp<F32Desc>;
pub type F64 = Fp<F64Desc>;

macro_rules! impl_constants {
    ($desc: ty, $holder: ty) => {
        impl Fp<$desc> {
            const SIGN_BIT: $holder = 1 << (<$desc>::EXPONENT_WIDTH + <$desc>::SIGNIFICAND_WIDTH);
            const INFINITY_BITS: $holder =
                ((1 << <$desc>::EXPONENT_WIDTH) - 1) << <$desc>::SIGNIFICAND_WIDTH;

            pub const ZERO: Self = Fp(0);
            pub const NEGATIVE_ZERO: Self = Fp(Self::SIGN_BIT);
            pub const INFINITY: Self = Fp(Self::INFINITY_BITS);
            pub const NEGATIVE_INFINITY: Self = Fp(Self::SIGN_BIT | Self::INFINITY_BITS);
            pub const NAN: Self = Fp(Self::INFINITY_BITS | 1 << (<$desc>::SIGNIFICAND_WIDTH - 1));
        }
    };
}

impl_constants!(F32Desc, u32);
impl_constants!(F64Desc, u64);
