//! Software floating point library.
//!
//! Values in the binary32 ([`F32`]) and binary64 ([`F64`]) interchange formats are plain bit
//! patterns. Every result is produced by rounding an [`ExactValue`], an arbitrary precision
//! intermediate, so results are bit-exact regardless of the host FPU.
//!
//! Each operation takes the rounding mode and accumulates exception flags through an explicit
//! [`Environment`] owned by the caller:
//!
//! ```
//! use softfp::{Environment, ExactValue, ExceptionFlags, RoundingMode, F32};
//!
//! let mut env = Environment::new(RoundingMode::TowardPositive);
//! let tiny = ExactValue::new(false, -150, 3u32);
//! assert_eq!(F32::from_exact(&tiny, &mut env).bits(), 0x0000_0002);
//! assert_eq!(env.flags(), ExceptionFlags::INEXACT | ExceptionFlags::UNDERFLOW);
//! ```

mod convert;
mod env;
mod error;
mod exact;
mod fp;
mod int;
mod round;

pub use env::{Environment, ExceptionFlags, RoundingMode};
pub use error::Error;
pub use exact::ExactValue;
pub use fp::*;
pub use int::IntTarget;
