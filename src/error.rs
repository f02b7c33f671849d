//! Unified error types for the fxnum library.
//!
//! All fallible operations across the crate return [`FxError`] as their
//! error type, ensuring a consistent error handling experience for
//! consumers.  Each variant corresponds to one failure class:
//!
//! | Variant | Meaning | Expected in normal use? |
//! |---------|---------|-------------------------|
//! | [`FxError::Domain`] | Math-function argument outside its valid range | yes |
//! | [`FxError::Overflow`] | Scaled value exceeds the family's integer-bit capacity | yes |
//! | [`FxError::FamilyMismatch`] | Binary operation between unequal families | caller misuse |
//! | [`FxError::Configuration`] | Operation requires family data that is absent | caller misuse |
//! | [`FxError::DivisionByZero`] | Checked division by a zero-valued operand | yes |
//! | [`FxError::Internal`] | Unreachable branch or non-converging iteration | implementation defect |
//!
//! Errors propagate immediately to the caller; there is no retry,
//! no partial result, and no silent clamping.

use num_bigint::BigInt;
use thiserror::Error;

use crate::family::FxFamily;

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = core::result::Result<T, FxError>;

/// Unified error enum for all fixed-point operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FxError {
    /// A math function received an argument outside its valid input range
    /// (negative `sqrt`/`ln`, `0^(<=0)`, out-of-range two's-complement
    /// bits, ...).
    #[error("domain error: {0}")]
    Domain(&'static str),

    /// A constructed or computed value's scaled integer exceeds the
    /// capacity configured by the family's integer-bit count.
    #[error("overflow: scaled value {value} outside the range of {family}")]
    Overflow {
        /// The offending scaled value.
        value: BigInt,
        /// The family whose range was exceeded.
        family: FxFamily,
    },

    /// A binary operation combined two numbers from unequal families
    /// without an explicit cast.
    #[error("family mismatch: {left} vs {right}")]
    FamilyMismatch {
        /// Family of the left-hand operand.
        left: FxFamily,
        /// Family of the right-hand operand.
        right: FxFamily,
    },

    /// An operation required family configuration that is absent
    /// (e.g. two's-complement decoding without a known integer-bit count).
    #[error("family configuration error: {0}")]
    Configuration(&'static str),

    /// Checked division by a zero-valued operand.
    #[error("division by zero")]
    DivisionByZero,

    /// An unreachable branch was reached, or an iteration failed to
    /// converge within its cap.  Always indicates a defect in this
    /// library, never caller misuse.
    #[error("internal invariant violated: {0}")]
    Internal(&'static str),
}
