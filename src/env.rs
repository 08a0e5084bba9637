//! Rounding mode, exception flags and the per-operation environment that carries them.

use crate::Error;
use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;
use log::trace;

// #region Rounding mode
//

/// IEEE 754 rounding direction attribute.
///
/// The discriminants follow the RISC-V `frm` encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u32)]
pub enum RoundingMode {
    /// Round to nearest, ties to even.
    #[cfg_attr(feature = "serde", serde(rename = "even"))]
    TiesToEven = 0b000,
    /// Truncate toward zero.
    #[cfg_attr(feature = "serde", serde(rename = "zero"))]
    TowardZero = 0b001,
    /// Round toward negative infinity.
    #[cfg_attr(feature = "serde", serde(rename = "min"))]
    TowardNegative = 0b010,
    /// Round toward positive infinity.
    #[cfg_attr(feature = "serde", serde(rename = "max"))]
    TowardPositive = 0b011,
    /// Round to nearest, ties away from zero.
    #[cfg_attr(feature = "serde", serde(rename = "away"))]
    TiesToAway = 0b100,
}

impl RoundingMode {
    /// Short token naming this mode.
    pub fn token(self) -> &'static str {
        match self {
            RoundingMode::TiesToEven => "even",
            RoundingMode::TowardZero => "zero",
            RoundingMode::TowardNegative => "min",
            RoundingMode::TowardPositive => "max",
            RoundingMode::TiesToAway => "away",
        }
    }
}

impl Default for RoundingMode {
    fn default() -> Self {
        RoundingMode::TiesToEven
    }
}

impl TryFrom<u32> for RoundingMode {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self, Error> {
        Ok(match value {
            0b000 => RoundingMode::TiesToEven,
            0b001 => RoundingMode::TowardZero,
            0b010 => RoundingMode::TowardNegative,
            0b011 => RoundingMode::TowardPositive,
            0b100 => RoundingMode::TiesToAway,
            _ => return Err(Error::InvalidRoundingMode(value)),
        })
    }
}

impl FromStr for RoundingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Ok(match s {
            "even" => RoundingMode::TiesToEven,
            "zero" => RoundingMode::TowardZero,
            "min" => RoundingMode::TowardNegative,
            "max" => RoundingMode::TowardPositive,
            "away" => RoundingMode::TiesToAway,
            _ => return Err(Error::UnknownRoundingMode(s.to_owned())),
        })
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

//
// #endregion

// #region Exception flags
//

bitflags! {
    /// IEEE 754 exception flags. Bit assignment matches RISC-V `fflags`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ExceptionFlags: u32 {
        const INEXACT = 1;
        const UNDERFLOW = 2;
        const OVERFLOW = 4;
        const DIVIDE_BY_ZERO = 8;
        const INVALID = 16;
    }
}

static FLAG_TOKENS: [(ExceptionFlags, &str); 5] = [
    (ExceptionFlags::INEXACT, "inexact"),
    (ExceptionFlags::UNDERFLOW, "underflow"),
    (ExceptionFlags::OVERFLOW, "overflow"),
    (ExceptionFlags::DIVIDE_BY_ZERO, "divByZero"),
    (ExceptionFlags::INVALID, "invalid"),
];

impl ExceptionFlags {
    /// Look up a single flag by its token.
    pub fn from_token(token: &str) -> Result<Self, Error> {
        FLAG_TOKENS
            .iter()
            .find(|(_, name)| *name == token)
            .map(|(flag, _)| *flag)
            .ok_or_else(|| Error::UnknownExceptionFlag(token.to_owned()))
    }

    /// Tokens of all flags contained in this set, in bit order.
    pub fn tokens(self) -> impl Iterator<Item = &'static str> {
        FLAG_TOKENS.iter().filter(move |(flag, _)| self.contains(*flag)).map(|(_, name)| *name)
    }
}

//
// #endregion

/// Floating point environment of a single logical operation.
///
/// The rounding mode is fixed at construction. Exception flags are sticky: they can only be
/// raised, and the only way to clear them is to start over with a fresh environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Environment {
    rounding_mode: RoundingMode,
    flags: ExceptionFlags,
}

impl Environment {
    pub fn new(rounding_mode: RoundingMode) -> Self {
        Environment { rounding_mode, flags: ExceptionFlags::empty() }
    }

    #[inline]
    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    #[inline]
    pub fn flags(&self) -> ExceptionFlags {
        self.flags
    }

    /// Raise exception flags. Flags already set stay set.
    pub fn raise(&mut self, flags: ExceptionFlags) {
        if flags.is_empty() {
            return;
        }
        trace!(target: "softfp", "raise {:?} under {}", flags, self.rounding_mode);
        self.flags |= flags;
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(RoundingMode::default())
    }
}
