//! The fixed-point number representation.
//!
//! An [`FxNum`] pairs a signed arbitrary-precision scaled integer with a
//! shared handle to its owning [`FxFamily`]: the represented real value
//! is `scaled_value / 2^fraction_bits`.  Construction always runs the
//! family's range validator, so a bounded family can never hold an
//! out-of-range value, arithmetic results included.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::error::{FxError, Result};
use crate::family::FxFamily;

/// A binary fixed-point real number.
///
/// Every number belongs to exactly one family; binary operations require
/// both operands to share an equal family (bare integer literals are
/// promoted implicitly at operator boundaries).  Cross-family values
/// must be moved explicitly with [`cast`](Self::cast).
///
/// # Examples
///
/// ```
/// use fxnum::prelude::*;
///
/// let fam = FxFamily::default();
/// let x = FxNum::from_int(21, &fam)? / 10;
/// assert_eq!(x.to_string(), "2.0999999999999999999");
/// # Ok::<(), FxError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FxNum {
    pub(crate) family: FxFamily,
    pub(crate) scaled: BigInt,
}

impl FxNum {
    // -- Construction -------------------------------------------------------

    /// Internal constructor from a raw scaled value; runs the overflow
    /// validator.
    pub(crate) fn raw(family: FxFamily, scaled: BigInt) -> Result<Self> {
        family.validate(&scaled)?;
        Ok(Self { family, scaled })
    }

    /// Internal constructor that skips validation; used only where the
    /// caller already guarantees the value is an intermediate on the way
    /// to a validated result.
    pub(crate) fn raw_unchecked(family: FxFamily, scaled: BigInt) -> Self {
        Self { family, scaled }
    }

    /// Creates a number from an integer value.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] if the value exceeds the family's
    /// integer-bit capacity.
    pub fn from_int(value: impl Into<BigInt>, family: &FxFamily) -> Result<Self> {
        Self::raw(family.clone(), value.into() * family.scale())
    }

    /// Creates a number from an exact integer ratio
    /// `numerator / denominator`.
    ///
    /// The quotient is evaluated at one extra bit of precision and then
    /// rounded once, avoiding the double rounding a naive
    /// divide-then-round would introduce.
    ///
    /// # Errors
    ///
    /// - [`FxError::DivisionByZero`] if `denominator` is zero.
    /// - [`FxError::Overflow`] if the value exceeds the family's
    ///   integer-bit capacity.
    pub fn from_ratio(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
        family: &FxFamily,
    ) -> Result<Self> {
        let tmp_family = family.augmented_by_one_bit();
        let quotient = Self::from_int(numerator, &tmp_family)?
            .try_div(&Self::from_int(denominator, &tmp_family)?)?;
        Self::raw(family.clone(), (quotient.scaled + 1) >> 1)
    }

    /// Creates a number from a host floating-point value, exactly.
    ///
    /// The float is decomposed into its exact binary integer ratio before
    /// rounding, so the result carries no error beyond the single final
    /// rounding into the family's precision.
    ///
    /// # Errors
    ///
    /// - [`FxError::Domain`] if `value` is NaN or infinite.
    /// - [`FxError::Overflow`] if the value exceeds the family's
    ///   integer-bit capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use fxnum::prelude::*;
    ///
    /// let fam = FxFamily::with_integer_bits(12, 4)?;
    /// let x = FxNum::from_f64(1.4, &fam)?;
    /// assert_eq!(x.to_string(), "1.399902");
    /// # Ok::<(), FxError>(())
    /// ```
    pub fn from_f64(value: f64, family: &FxFamily) -> Result<Self> {
        let Some(ratio) = BigRational::from_float(value) else {
            return Err(FxError::Domain(
                "cannot represent a non-finite floating-point value",
            ));
        };
        Self::from_ratio(ratio.numer().clone(), ratio.denom().clone(), family)
    }

    /// Rescales this number into a different family.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] if the value exceeds the target
    /// family's integer-bit capacity.
    pub fn cast(&self, family: &FxFamily) -> Result<Self> {
        let scaled = family.convert(&self.family, &self.scaled);
        Self::raw(family.clone(), scaled)
    }

    // -- Accessors ----------------------------------------------------------

    /// The family this number belongs to.
    #[must_use]
    pub fn family(&self) -> &FxFamily {
        &self.family
    }

    /// The raw scaled integer: the represented value is
    /// `scaled_value / 2^fraction_bits`.
    #[must_use]
    pub fn scaled_value(&self) -> &BigInt {
        &self.scaled
    }

    /// Returns `true` if the value is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.scaled.is_zero()
    }

    /// Returns `true` if the value is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.scaled.is_negative()
    }

    /// The absolute value.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] when negating the most negative
    /// value of a bounded family.
    pub fn abs(&self) -> Result<Self> {
        if self.scaled.is_negative() {
            self.try_neg()
        } else {
            Ok(self.clone())
        }
    }

    // -- Casting out --------------------------------------------------------

    /// Truncates to an integer, toward zero.
    #[must_use]
    pub fn to_bigint(&self) -> BigInt {
        // BigInt division truncates toward zero, matching the cast rule.
        &self.scaled / self.family.scale()
    }

    /// Converts to a host floating-point value.
    ///
    /// For extreme bit counts the numerator and scale are pre-shifted
    /// down by matching amounts before dividing, so the intermediate
    /// quotient never overflows the host float range; relative accuracy
    /// is preserved to host-float precision.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        // Stay under f64's exponent range (|exponent| <= 1023).
        const THRESHOLD: u64 = 970;
        let sv_bits = self.scaled.bits();
        let frac_bits = u64::from(self.family.fraction_bits());
        if sv_bits < THRESHOLD && frac_bits < THRESHOLD {
            return big_to_f64(&self.scaled) / big_to_f64(self.family.scale());
        }
        let num_shift = sv_bits.saturating_sub(THRESHOLD) as usize;
        let dnm_shift = (frac_bits.saturating_sub(THRESHOLD)) as usize;
        let quotient = big_to_f64(&(&self.scaled >> num_shift))
            / big_to_f64(&(self.family.scale() >> dnm_shift));
        quotient * (num_shift as f64 - dnm_shift as f64).exp2()
    }

    // -- Comparison ---------------------------------------------------------

    /// Total ordering against another number of the same family.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::FamilyMismatch`] if the families are unequal.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering> {
        if self.family != other.family {
            return Err(FxError::FamilyMismatch {
                left: self.family.clone(),
                right: other.family.clone(),
            });
        }
        Ok(self.scaled.cmp(&other.scaled))
    }
}

fn big_to_f64(value: &BigInt) -> f64 {
    // BigInt-to-f64 conversion is total; out-of-range magnitudes saturate
    // to infinity inside num-bigint.
    value.to_f64().unwrap_or(f64::NAN)
}

impl PartialEq for FxNum {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family && self.scaled == other.scaled
    }
}

impl Eq for FxNum {}

impl PartialOrd for FxNum {
    /// Numbers from unequal families are unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.try_cmp(other).ok()
    }
}

impl Hash for FxNum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.scaled.hash(state);
    }
}

// Implicit promotion of bare integer literals at comparison boundaries.
impl PartialEq<i64> for FxNum {
    fn eq(&self, other: &i64) -> bool {
        self.scaled == BigInt::from(*other) << self.family.fraction_bits() as usize
    }
}

impl PartialOrd<i64> for FxNum {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        let promoted: BigInt = BigInt::from(*other) << self.family.fraction_bits() as usize;
        Some(self.scaled.cmp(&promoted))
    }
}

impl PartialEq<FxNum> for i64 {
    fn eq(&self, other: &FxNum) -> bool {
        other == self
    }
}

impl PartialOrd<FxNum> for i64 {
    fn partial_cmp(&self, other: &FxNum) -> Option<Ordering> {
        other.partial_cmp(self).map(Ordering::reverse)
    }
}
