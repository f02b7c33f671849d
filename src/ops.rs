//! Checked arithmetic and operator overloads for [`FxNum`].
//!
//! The `try_*` methods are the primary arithmetic surface: they verify
//! family compatibility, apply the exact scaled-integer formulas, run the
//! overflow validator, and report every failure as an [`FxError`].  The
//! standard operator traits delegate to them and panic on error, matching
//! the behavior of the built-in integer operators; callers who need to
//! handle overflow or mismatched families gracefully should use the
//! checked methods directly.
//!
//! Scaled-value formulas:
//!
//! | Operation | Scaled result |
//! |-----------|---------------|
//! | `a + b` | `sa + sb` (exact) |
//! | `a - b` | `sa - sb` (exact) |
//! | `a * b` | `floor((sa·sb + scale/2) / scale)` (round half up) |
//! | `a / b` | `floor((sa·scale + scale/2) / sb)` (round half up) |
//! | `a << n` | `sa · 2^n` (exact) |
//! | `a >> n` | `floor(sa / 2^n)` (exact power-of-two divide) |
//!
//! A bare `i64` operand is promoted into the other operand's family at
//! the operator boundary; internal algorithms always operate on
//! same-family values.

use core::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;

use crate::error::{FxError, Result};
use crate::number::FxNum;

impl FxNum {
    fn require_same_family(&self, other: &Self) -> Result<()> {
        if self.family != other.family {
            return Err(FxError::FamilyMismatch {
                left: self.family.clone(),
                right: other.family.clone(),
            });
        }
        Ok(())
    }

    /// Checked addition; exact on scaled values.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::FamilyMismatch`] for unequal families, or
    /// [`FxError::Overflow`] if the sum exceeds the family's capacity.
    pub fn try_add(&self, other: &Self) -> Result<Self> {
        self.require_same_family(other)?;
        Self::raw(self.family.clone(), &self.scaled + &other.scaled)
    }

    /// Checked subtraction; exact on scaled values.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::FamilyMismatch`] for unequal families, or
    /// [`FxError::Overflow`] if the difference exceeds the family's
    /// capacity.
    pub fn try_sub(&self, other: &Self) -> Result<Self> {
        self.require_same_family(other)?;
        Self::raw(self.family.clone(), &self.scaled - &other.scaled)
    }

    /// Checked multiplication, rounding half up on the raw product.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::FamilyMismatch`] for unequal families, or
    /// [`FxError::Overflow`] if the product exceeds the family's
    /// capacity.
    pub fn try_mul(&self, other: &Self) -> Result<Self> {
        self.require_same_family(other)?;
        let biased = &self.scaled * &other.scaled + self.family.round_up();
        Self::raw(self.family.clone(), biased.div_floor(self.family.scale()))
    }

    /// Checked division, rounding half up on the raw quotient.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::FamilyMismatch`] for unequal families,
    /// [`FxError::DivisionByZero`] for a zero divisor, or
    /// [`FxError::Overflow`] if the quotient exceeds the family's
    /// capacity.
    pub fn try_div(&self, other: &Self) -> Result<Self> {
        self.require_same_family(other)?;
        if other.scaled.is_zero() {
            return Err(FxError::DivisionByZero);
        }
        let biased = &self.scaled * self.family.scale() + self.family.round_up();
        Self::raw(self.family.clone(), biased.div_floor(&other.scaled))
    }

    /// Checked left shift: exact multiplication by `2^shift`.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] if the result exceeds the family's
    /// capacity.
    pub fn try_shl(&self, shift: usize) -> Result<Self> {
        Self::raw(self.family.clone(), &self.scaled << shift)
    }

    /// Checked right shift: exact division by `2^shift`, truncating
    /// toward negative infinity.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] in degenerate configurations where
    /// the family cannot represent the shifted value.
    pub fn try_shr(&self, shift: usize) -> Result<Self> {
        Self::raw(self.family.clone(), &self.scaled >> shift)
    }

    /// Checked negation.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] when negating the most negative
    /// value of a bounded family (the representable range is asymmetric).
    pub fn try_neg(&self) -> Result<Self> {
        Self::raw(self.family.clone(), -&self.scaled)
    }

    /// Exact multiplication by a plain integer (no rounding involved).
    pub(crate) fn mul_int(&self, factor: i64) -> Result<Self> {
        Self::raw(self.family.clone(), &self.scaled * BigInt::from(factor))
    }

    /// Promotes a bare integer literal into this number's family.
    fn promoted(&self, literal: i64) -> Result<Self> {
        Self::from_int(literal, &self.family)
    }
}

// ---------------------------------------------------------------------------
// Operator overloads
// ---------------------------------------------------------------------------

/// Implements a binary operator for all owned/borrowed operand
/// combinations, plus `i64` promotion on either side, delegating to the
/// checked method and panicking on error.
macro_rules! impl_binop {
    ($trait:ident, $method:ident, $checked:ident, $msg:expr) => {
        impl $trait<&FxNum> for &FxNum {
            type Output = FxNum;

            fn $method(self, rhs: &FxNum) -> FxNum {
                match self.$checked(rhs) {
                    Ok(v) => v,
                    Err(e) => panic!("{}: {e}", $msg),
                }
            }
        }

        impl $trait<FxNum> for &FxNum {
            type Output = FxNum;

            fn $method(self, rhs: FxNum) -> FxNum {
                self.$method(&rhs)
            }
        }

        impl $trait<&FxNum> for FxNum {
            type Output = FxNum;

            fn $method(self, rhs: &FxNum) -> FxNum {
                (&self).$method(rhs)
            }
        }

        impl $trait<FxNum> for FxNum {
            type Output = FxNum;

            fn $method(self, rhs: FxNum) -> FxNum {
                (&self).$method(&rhs)
            }
        }

        impl $trait<i64> for &FxNum {
            type Output = FxNum;

            fn $method(self, rhs: i64) -> FxNum {
                let promoted = match self.promoted(rhs) {
                    Ok(v) => v,
                    Err(e) => panic!("{}: {e}", $msg),
                };
                self.$method(&promoted)
            }
        }

        impl $trait<i64> for FxNum {
            type Output = FxNum;

            fn $method(self, rhs: i64) -> FxNum {
                (&self).$method(rhs)
            }
        }

        impl $trait<&FxNum> for i64 {
            type Output = FxNum;

            fn $method(self, rhs: &FxNum) -> FxNum {
                let promoted = match rhs.promoted(self) {
                    Ok(v) => v,
                    Err(e) => panic!("{}: {e}", $msg),
                };
                (&promoted).$method(rhs)
            }
        }

        impl $trait<FxNum> for i64 {
            type Output = FxNum;

            fn $method(self, rhs: FxNum) -> FxNum {
                self.$method(&rhs)
            }
        }
    };
}

impl_binop!(Add, add, try_add, "fixed-point addition failed");
impl_binop!(Sub, sub, try_sub, "fixed-point subtraction failed");
impl_binop!(Mul, mul, try_mul, "fixed-point multiplication failed");
impl_binop!(Div, div, try_div, "fixed-point division failed");

macro_rules! impl_assign {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<&FxNum> for FxNum {
            fn $method(&mut self, rhs: &FxNum) {
                *self = &*self $op rhs;
            }
        }

        impl $trait<FxNum> for FxNum {
            fn $method(&mut self, rhs: FxNum) {
                *self = &*self $op &rhs;
            }
        }

        impl $trait<i64> for FxNum {
            fn $method(&mut self, rhs: i64) {
                *self = &*self $op rhs;
            }
        }
    };
}

impl_assign!(AddAssign, add_assign, +);
impl_assign!(SubAssign, sub_assign, -);
impl_assign!(MulAssign, mul_assign, *);
impl_assign!(DivAssign, div_assign, /);

impl Neg for &FxNum {
    type Output = FxNum;

    /// # Panics
    ///
    /// Panics when negating the most negative value of a bounded family;
    /// use [`FxNum::try_neg`] to handle that case.
    fn neg(self) -> FxNum {
        match self.try_neg() {
            Ok(v) => v,
            Err(e) => panic!("fixed-point negation failed: {e}"),
        }
    }
}

impl Neg for FxNum {
    type Output = FxNum;

    fn neg(self) -> FxNum {
        -&self
    }
}

impl Shl<usize> for &FxNum {
    type Output = FxNum;

    fn shl(self, shift: usize) -> FxNum {
        match self.try_shl(shift) {
            Ok(v) => v,
            Err(e) => panic!("fixed-point left shift failed: {e}"),
        }
    }
}

impl Shl<usize> for FxNum {
    type Output = FxNum;

    fn shl(self, shift: usize) -> FxNum {
        &self << shift
    }
}

impl Shr<usize> for &FxNum {
    type Output = FxNum;

    fn shr(self, shift: usize) -> FxNum {
        match self.try_shr(shift) {
            Ok(v) => v,
            Err(e) => panic!("fixed-point right shift failed: {e}"),
        }
    }
}

impl Shr<usize> for FxNum {
    type Output = FxNum;

    fn shr(self, shift: usize) -> FxNum {
        &self >> shift
    }
}

impl ShlAssign<usize> for FxNum {
    fn shl_assign(&mut self, shift: usize) {
        *self = &*self << shift;
    }
}

impl ShrAssign<usize> for FxNum {
    fn shr_assign(&mut self, shift: usize) {
        *self = &*self >> shift;
    }
}
