//! Precision families: the accuracy descriptor shared by sets of numbers.
//!
//! An [`FxFamily`] fixes the number of fractional binary digits (and
//! optionally a bound on the integer digits) for every [`FxNum`] created
//! within it.  Multiple families can coexist in one program so that, for
//! example, 12-bit control-loop quantities and 200-bit reference
//! quantities are kept rigorously separate; numbers from different
//! families only combine through an explicit [`FxNum::cast`].
//!
//! Families are cheap-clone handles over shared immutable state.  The
//! family-wide mathematical constants ([`e`](FxFamily::e),
//! [`ln2`](FxFamily::ln2), [`pi`](FxFamily::pi),
//! [`sqrt2`](FxFamily::sqrt2)) are computed once on first access, at an
//! augmented working precision that absorbs worst-case rounding-error
//! accumulation, then memoized.

use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use crate::error::{FxError, Result};
use crate::number::FxNum;

/// Descriptor of the accuracy of a set of fixed-point numbers.
///
/// A family stores the number of bits to the right of the binary point
/// and, optionally, the number of bits to the left of it (including the
/// sign bit).  When an integer-bit count is configured, every scaled
/// value constructed in the family, intermediate arithmetic results
/// included, is range-checked against `±2^(fraction_bits + integer_bits - 1)`.
///
/// Two families are equal iff their fractional and integer bit counts
/// match exactly; equality, not handle identity, governs whether two
/// numbers may be combined.
///
/// # Examples
///
/// ```
/// use fxnum::prelude::*;
///
/// let fam = FxFamily::default();          // 64 fractional bits, unbounded
/// let x = (FxNum::from_int(21, &fam)? / 10).sqrt()?;
/// assert_eq!(x.to_string(), "1.4491376746189438573");
/// # Ok::<(), FxError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FxFamily {
    inner: Arc<FamilyInner>,
}

#[derive(Debug)]
struct FamilyInner {
    /// Bits to the right of the binary point.
    fraction_bits: u32,
    /// Bits to the left of the binary point, including sign.
    integer_bits: Option<u32>,
    /// `2^fraction_bits`.
    scale: BigInt,
    /// `2^(fraction_bits - 1)`, the rounding bias for products and quotients.
    round_up: BigInt,
    /// `2^(fraction_bits + integer_bits - 1)` when bounded.
    limit: Option<BigInt>,
    // Memoized constants, stored as scaled values at this family's precision.
    exp1: OnceLock<BigInt>,
    ln2: OnceLock<BigInt>,
    pi: OnceLock<BigInt>,
    sqrt2: OnceLock<BigInt>,
}

impl Default for FxFamily {
    /// The process-default configuration: 64 fractional bits, unbounded
    /// magnitude.
    fn default() -> Self {
        Self::build(64, None)
    }
}

impl PartialEq for FxFamily {
    fn eq(&self, other: &Self) -> bool {
        self.inner.fraction_bits == other.inner.fraction_bits
            && self.inner.integer_bits == other.inner.integer_bits
    }
}

impl Eq for FxFamily {}

impl Hash for FxFamily {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.fraction_bits.hash(state);
        self.inner.integer_bits.hash(state);
    }
}

impl fmt::Display for FxFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.integer_bits {
            Some(ib) => write!(
                f,
                "FxFamily(fraction_bits={}, integer_bits={})",
                self.inner.fraction_bits, ib
            ),
            None => write!(f, "FxFamily(fraction_bits={})", self.inner.fraction_bits),
        }
    }
}

impl FxFamily {
    /// Creates a family with `fraction_bits` binary digits after the
    /// point and unbounded magnitude.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Configuration`] if `fraction_bits` is zero.
    pub fn new(fraction_bits: u32) -> Result<Self> {
        if fraction_bits == 0 {
            return Err(FxError::Configuration(
                "a family requires at least one fractional bit",
            ));
        }
        Ok(Self::build(fraction_bits, None))
    }

    /// Creates a family whose values are limited to `integer_bits` binary
    /// digits (including sign) before the point.
    ///
    /// Every construction in the resulting family, conversions and
    /// arithmetic results alike, fails with [`FxError::Overflow`] when
    /// the scaled value falls outside
    /// `[-2^(fraction_bits + integer_bits - 1), 2^(fraction_bits + integer_bits - 1))`.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Configuration`] if `fraction_bits` is zero.
    pub fn with_integer_bits(fraction_bits: u32, integer_bits: u32) -> Result<Self> {
        if fraction_bits == 0 {
            return Err(FxError::Configuration(
                "a family requires at least one fractional bit",
            ));
        }
        Ok(Self::build(fraction_bits, Some(integer_bits)))
    }

    /// Internal constructor; callers guarantee `fraction_bits > 0`.
    fn build(fraction_bits: u32, integer_bits: Option<u32>) -> Self {
        let scale = BigInt::one() << fraction_bits as usize;
        let round_up = BigInt::one() << (fraction_bits - 1) as usize;
        let limit = integer_bits
            .map(|ib| BigInt::one() << (fraction_bits as usize + ib as usize).saturating_sub(1));
        Self {
            inner: Arc::new(FamilyInner {
                fraction_bits,
                integer_bits,
                scale,
                round_up,
                limit,
                exp1: OnceLock::new(),
                ln2: OnceLock::new(),
                pi: OnceLock::new(),
                sqrt2: OnceLock::new(),
            }),
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// The number of fractional binary digits.
    #[must_use]
    pub fn fraction_bits(&self) -> u32 {
        self.inner.fraction_bits
    }

    /// The configured integer-bit count, or `None` when magnitude is
    /// unbounded.
    #[must_use]
    pub fn integer_bits(&self) -> Option<u32> {
        self.inner.integer_bits
    }

    /// The number of fractional binary digits (alias of
    /// [`fraction_bits`](Self::fraction_bits)).
    #[must_use]
    pub fn resolution(&self) -> u32 {
        self.inner.fraction_bits
    }

    /// `2^fraction_bits`, the denominator of every scaled value in this
    /// family.
    #[must_use]
    pub fn scale(&self) -> &BigInt {
        &self.inner.scale
    }

    pub(crate) fn round_up(&self) -> &BigInt {
        &self.inner.round_up
    }

    /// Upper bound on series/iteration steps for this precision.
    pub(crate) fn series_limit(&self) -> usize {
        self.inner.fraction_bits as usize * 4 + 64
    }

    /// One extra fractional bit, unbounded; the working precision for the
    /// single-rounding rational constructor.
    pub(crate) fn augmented_by_one_bit(&self) -> FxFamily {
        Self::build(self.inner.fraction_bits + 1, None)
    }

    /// Estimates the effective number of fractional decimal digits.
    ///
    /// The number of decimal digits needed to exactly represent `b`
    /// fractional bits is also `b`, but that drastically overestimates
    /// the practical accuracy.  This formula interpolates between one
    /// decimal digit per bit at very low bit counts and a growth rate of
    /// `log10(2) ≈ 0.301` digits per bit beyond roughly four bits.
    ///
    /// Heuristic only: used as the default display precision, never for
    /// correctness.
    #[must_use]
    pub fn pseudo_precision(&self) -> f64 {
        const TRANSITION_WIDTH: f64 = 4.0;
        const LOG10_2: f64 = core::f64::consts::LOG10_2;
        let frac_bits = f64::from(self.inner.fraction_bits);
        let enhancement = if frac_bits < 10.0 * TRANSITION_WIDTH {
            -(1.0 - LOG10_2) * TRANSITION_WIDTH * (-frac_bits / TRANSITION_WIDTH).exp_m1()
        } else {
            0.0
        };
        frac_bits * LOG10_2 + enhancement
    }

    // -- Validation ---------------------------------------------------------

    /// Range-checks a candidate scaled value against the configured
    /// integer-bit capacity.  A no-op for unbounded families.
    pub(crate) fn validate(&self, scaled: &BigInt) -> Result<()> {
        if let Some(limit) = &self.inner.limit {
            if scaled >= limit || *scaled < -limit {
                return Err(FxError::Overflow {
                    value: scaled.clone(),
                    family: self.clone(),
                });
            }
        }
        Ok(())
    }

    // -- Conversion between families ----------------------------------------

    /// Rebases a scaled value from `other`'s fractional-bit count onto
    /// this family's.
    ///
    /// When increasing precision the value is left-shifted and biased by
    /// half the shift for positive values, half-minus-one for zero and
    /// negative values.  When decreasing precision the value is
    /// truncated toward negative infinity, with no rounding, so repeated
    /// down-conversions never grow in magnitude.
    #[must_use]
    pub fn convert(&self, other: &FxFamily, other_val: &BigInt) -> BigInt {
        let bit_inc =
            i64::from(self.inner.fraction_bits) - i64::from(other.inner.fraction_bits);
        if bit_inc == 0 {
            other_val.clone()
        } else if bit_inc > 0 {
            let shift = bit_inc as usize;
            let shifted = other_val << shift;
            let half = BigInt::one() << (shift - 1);
            // Low `shift` bits of `shifted` are zero, so these additions
            // set the bias bits exactly.
            if other_val.is_positive() {
                shifted + half
            } else {
                shifted + (half - 1)
            }
        } else {
            other_val >> (-bit_inc) as usize
        }
    }

    /// Constructs a family with enhanced resolution for internal
    /// computation.
    ///
    /// The returned family gains enough fractional bits to accommodate
    /// worst-case accumulation of 1-LSB errors over `op_count`
    /// operations (defaulting to this family's own bit count), and
    /// carries no integer-bit bound.
    #[must_use]
    pub fn augment(&self, op_count: Option<u64>) -> FxFamily {
        let mut nb = op_count.unwrap_or_else(|| u64::from(self.inner.fraction_bits));
        let mut aug_bits = 4u32;
        while nb > 0 {
            aug_bits += 1;
            nb >>= 1;
        }
        Self::build(self.inner.fraction_bits + aug_bits, None)
    }

    // -- Construction helpers -----------------------------------------------

    /// Creates a number in this family from an integer value.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] if the value exceeds the family's
    /// integer-bit capacity.
    pub fn num(&self, value: i64) -> Result<FxNum> {
        FxNum::from_int(value, self)
    }

    /// Decodes a two's-complement bit pattern spanning
    /// `fraction_bits + integer_bits` bits.
    ///
    /// `integer_bits` overrides the family's own count when supplied.
    ///
    /// # Errors
    ///
    /// - [`FxError::Configuration`] if neither the family nor the caller
    ///   supplies an integer-bit count.
    /// - [`FxError::Domain`] if `raw_bits` lies outside
    ///   `[0, 2^(fraction_bits + integer_bits))`.
    /// - [`FxError::Overflow`] if the decoded value exceeds the family's
    ///   own capacity (possible when the override is wider).
    ///
    /// # Examples
    ///
    /// ```
    /// use fxnum::prelude::*;
    ///
    /// let fam = FxFamily::with_integer_bits(4, 4)?;
    /// // 0b1110_1000 is -1.5 in Q4.4 two's complement.
    /// let x = fam.from_twos_complement(0b1110_1000_u32, None)?;
    /// assert_eq!(x.to_f64(), -1.5);
    /// # Ok::<(), FxError>(())
    /// ```
    pub fn from_twos_complement(
        &self,
        raw_bits: impl Into<BigInt>,
        integer_bits: Option<u32>,
    ) -> Result<FxNum> {
        let Some(int_bits) = integer_bits.or(self.inner.integer_bits) else {
            return Err(FxError::Configuration(
                "two's-complement decoding requires a known integer-bit count",
            ));
        };
        let raw_bits = raw_bits.into();
        let modulus: BigInt = &self.inner.scale << int_bits as usize;
        if raw_bits.is_negative() || raw_bits >= modulus {
            return Err(FxError::Domain(
                "two's-complement bits outside [0, 2^(fraction_bits + integer_bits))",
            ));
        }
        let scaled = if raw_bits < (&modulus >> 1usize) {
            raw_bits
        } else {
            raw_bits - modulus
        };
        FxNum::raw(self.clone(), scaled)
    }

    // -- Identity constants -------------------------------------------------

    /// The additive identity in this family.
    #[must_use]
    pub fn zero(&self) -> FxNum {
        FxNum::raw_unchecked(self.clone(), BigInt::zero())
    }

    /// The multiplicative identity in this family.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] for a bounded family too narrow to
    /// represent `1`.
    pub fn unity(&self) -> Result<FxNum> {
        FxNum::raw(self.clone(), self.inner.scale.clone())
    }

    // -- Cached mathematical constants --------------------------------------

    /// Euler's number `e`, the inverse natural logarithm of unity.
    ///
    /// Computed once at augmented precision by evaluating the raw series
    /// for `exp(1/4)` and squaring twice.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] for a bounded family too narrow to
    /// hold the constant.
    pub fn e(&self) -> Result<FxNum> {
        let scaled = match self.inner.exp1.get() {
            Some(sv) => sv.clone(),
            None => {
                let computed = self.compute_exp1()?;
                self.inner.exp1.get_or_init(|| computed).clone()
            }
        };
        FxNum::raw(self.clone(), scaled)
    }

    /// The natural logarithm of two.
    ///
    /// Computed once at augmented precision via
    /// `ln2 = 5·ln(3^12/2^19) − 12·ln(3^5/2^8)`; both arguments sit very
    /// close to 1, so the core series converges in a handful of terms and
    /// the linear combination cancels accumulated rounding error.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] for a bounded family too narrow to
    /// hold the constant.
    pub fn ln2(&self) -> Result<FxNum> {
        let scaled = match self.inner.ln2.get() {
            Some(sv) => sv.clone(),
            None => {
                let computed = self.compute_ln2()?;
                self.inner.ln2.get_or_init(|| computed).clone()
            }
        };
        FxNum::raw(self.clone(), scaled)
    }

    /// The ratio of a circle's perimeter to its diameter.
    ///
    /// Computed once at augmented precision from the
    /// Bailey–Borwein–Plouffe series, summing quadruples of rational
    /// terms scaled by inverse powers of 16 until a term underflows.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] for a bounded family too narrow to
    /// hold the constant.
    pub fn pi(&self) -> Result<FxNum> {
        let scaled = match self.inner.pi.get() {
            Some(sv) => sv.clone(),
            None => {
                let computed = self.compute_pi()?;
                self.inner.pi.get_or_init(|| computed).clone()
            }
        };
        FxNum::raw(self.clone(), scaled)
    }

    /// The square root of two.
    ///
    /// Computed once at augmented precision by Newton–Raphson iteration
    /// seeded from the rational approximation `577/408`.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] for a bounded family too narrow to
    /// hold the constant.
    pub fn sqrt2(&self) -> Result<FxNum> {
        let scaled = match self.inner.sqrt2.get() {
            Some(sv) => sv.clone(),
            None => {
                let computed = self.compute_sqrt2()?;
                self.inner.sqrt2.get_or_init(|| computed).clone()
            }
        };
        FxNum::raw(self.clone(), scaled)
    }

    // -- Constant derivation (augmented precision) --------------------------

    fn compute_exp1(&self) -> Result<BigInt> {
        let aug = self.augment(None);
        let quarter = aug.unity()?.try_div(&FxNum::from_int(4, &aug)?)?;
        let exp0_25 = quarter.raw_exp()?;
        let exp0_5 = exp0_25.try_mul(&exp0_25)?;
        let exp1 = exp0_5.try_mul(&exp0_5)?;
        Ok(self.convert(&aug, exp1.scaled_value()))
    }

    fn compute_ln2(&self) -> Result<BigInt> {
        let aug = self.augment(None);
        // 3^12 - 2^19 = 7153,  3^5 - 2^8 = -13
        let q0 = FxNum::from_int(7153, &aug)?.try_shr(19)?;
        let q1 = FxNum::from_int(-13, &aug)?.try_shr(8)?;
        let aug_ln2 = q0
            .raw_log(true)?
            .mul_int(5)?
            .try_sub(&q1.raw_log(true)?.mul_int(12)?)?;
        Ok(self.convert(&aug, aug_ln2.scaled_value()))
    }

    fn compute_pi(&self) -> Result<BigInt> {
        let aug = self.augment(None);
        let mut aug_pi = aug.zero();
        let mut k4: usize = 0;
        for _ in 0..aug.series_limit() {
            let k8 = (2 * k4) as i64;
            let term = FxNum::from_int(4, &aug)?
                .try_div(&FxNum::from_int(k8 + 1, &aug)?)?
                .try_sub(&FxNum::from_int(2, &aug)?.try_div(&FxNum::from_int(k8 + 4, &aug)?)?)?
                .try_sub(&aug.unity()?.try_div(&FxNum::from_int(k8 + 5, &aug)?)?)?
                .try_sub(&aug.unity()?.try_div(&FxNum::from_int(k8 + 6, &aug)?)?)?
                .try_shr(k4)?;
            if term.is_zero() {
                return Ok(self.convert(&aug, aug_pi.scaled_value()));
            }
            aug_pi = aug_pi.try_add(&term)?;
            k4 += 4;
        }
        Err(FxError::Internal("pi series did not converge"))
    }

    fn compute_sqrt2(&self) -> Result<BigInt> {
        let aug = self.augment(None);
        // Two-step Newton-Raphson seed: sqrt(2) ~= 577/408 ~= 1.414216
        let mut x = FxNum::from_int(577, &aug)?.try_div(&FxNum::from_int(408, &aug)?)?;
        for _ in 0..aug.series_limit() {
            // Newton-Raphson iteration on f(x) = 2/(x*x) - 1
            let delta = x
                .try_mul(&FxNum::from_int(2, &aug)?.try_sub(&x.try_mul(&x)?)?)?
                .try_shr(2)?;
            x = x.try_add(&delta)?;
            if delta.scaled_value().abs() <= BigInt::one() {
                return Ok(self.convert(&aug, x.scaled_value()));
            }
        }
        Err(FxError::Internal("sqrt(2) iteration did not converge"))
    }
}
