//! # fxnum
//!
//! Deterministic binary fixed-point arithmetic on arbitrary-precision
//! integers, with a family-based precision model and a full suite of
//! transcendental functions.
//!
//! Every value is an [`FxNum`](number::FxNum): an integer scaled by
//! `2^fraction_bits`, tagged with the [`FxFamily`](family::FxFamily)
//! that fixes its precision.  Results are bit-for-bit reproducible
//! across platforms because nothing ever passes through native
//! floating point.
//!
//! - **Families** choose the fractional resolution, optionally bound
//!   the representable range, and lazily cache the constants `e`,
//!   `ln 2`, `π` and `√2` at that resolution.
//! - **Arithmetic** is exact for addition and subtraction; products,
//!   quotients and conversions round half-up deterministically.
//! - **Transcendentals** (`sqrt`, `exp`, `ln`, `log2`, `pow`, `sin`,
//!   `cos`, `tan`, `asin`, `acos`, `atan`) run series at the family's
//!   own resolution and terminate by term underflow.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! fxnum = "0.1"
//! ```
//!
//! ## Compute with 64 fractional bits
//!
//! ```rust
//! use fxnum::prelude::*;
//!
//! let fam = FxFamily::new(64)?;
//!
//! let x = FxNum::from_int(21, &fam)? / 10;
//! assert_eq!(x.to_string(), "2.0999999999999999999");
//!
//! let root = x.sqrt()?;
//! assert_eq!(root.to_string(), "1.4491376746189438573");
//!
//! // pi at 200 fractional bits, to 60 decimal digits:
//! let wide = FxFamily::new(200)?;
//! assert_eq!(
//!     wide.pi()?.to_string(),
//!     "3.141592653589793238462643383279502884197169399375105820974944",
//! );
//! # Ok::<(), FxError>(())
//! ```
//!
//! Checked variants (`try_add`, `try_mul`, …) return
//! [`Result`](error::Result); the operator overloads panic on family
//! mismatch or overflow, matching the standard library's integer
//! operators.
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`family`] | [`FxFamily`](family::FxFamily): precision, range bounds, cached constants |
//! | [`number`] | [`FxNum`](number::FxNum): construction, conversion, comparison |
//! | [`format`] | Decimal and power-of-two-radix string rendering |
//! | [`error`]  | [`FxError`](error::FxError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types |

pub mod error;
pub mod family;
pub mod format;
pub mod number;
pub mod prelude;

mod math;
mod ops;

#[cfg(test)]
mod proptest_properties;
