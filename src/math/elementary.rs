//! Square root, powers, exponential and logarithms.

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::{FxError, Result};
use crate::number::FxNum;

impl FxNum {
    /// Computes the square root by Newton–Raphson iteration.
    ///
    /// The initial guess approximates `2^(bit_length/2)`; each iteration
    /// applies `y ← y − (y − x/y)/2` until the correction's scaled value
    /// is exactly zero.  The correction magnitude is non-increasing near
    /// the root, so the fixed point is always reached.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Domain`] for a negative argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use fxnum::prelude::*;
    ///
    /// let fam = FxFamily::default();
    /// let x = FxNum::from_int(21, &fam)? / 10;
    /// assert_eq!(x.sqrt()?.to_string(), "1.4491376746189438573");
    /// # Ok::<(), FxError>(())
    /// ```
    pub fn sqrt(&self) -> Result<Self> {
        if self.scaled.is_negative() {
            return Err(FxError::Domain("square root of a negative value"));
        }
        if self.scaled.is_zero() {
            return Ok(self.clone());
        }

        let mut root = self.sqrt_seed();
        for _ in 0..self.family.series_limit() {
            let delta = root.try_sub(&self.try_div(&root)?)?.try_shr(1)?;
            root = root.try_sub(&delta)?;
            if delta.is_zero() {
                return Ok(root);
            }
        }
        Err(FxError::Internal("square-root iteration did not converge"))
    }

    /// Crude initial guess near `2^(bit_length/2)`; unvalidated because
    /// it only seeds the iteration.
    fn sqrt_seed(&self) -> Self {
        let mut guess = BigInt::one() << (self.family.fraction_bits() / 2) as usize;
        let mut val = self.scaled.clone();
        while val > BigInt::one() {
            val >>= 2;
            guess <<= 1;
        }
        Self::raw_unchecked(self.family.clone(), guess)
    }

    /// Raises to an integer power by repeated squaring; negative powers
    /// take the reciprocal of the positive-power result.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::DivisionByZero`] for `0` raised to a negative
    /// power, or [`FxError::Overflow`] if an intermediate product
    /// exceeds the family's capacity.
    pub fn int_power(&self, power: i64) -> Result<Self> {
        let invert = power < 0;
        let mut remaining = power.unsigned_abs();
        let mut result = self.family.unity()?;
        let mut term = self.clone();
        loop {
            if remaining & 1 == 1 {
                result = result.try_mul(&term)?;
            }
            remaining >>= 1;
            if remaining == 0 {
                break;
            }
            term = term.try_mul(&term)?;
        }
        if invert {
            result = self.family.unity()?.try_div(&result)?;
        }
        Ok(result)
    }

    /// Evaluates `self ^ exponent` for a fixed-point exponent.
    ///
    /// The exponent's integer part is handled by
    /// [`int_power`](Self::int_power); the fractional remainder `r`
    /// contributes `exp(r · ln(self))`.
    ///
    /// # Errors
    ///
    /// - [`FxError::Domain`] for base `0` with a non-positive exponent,
    ///   a negative base with a fractional exponent, or an exponent
    ///   whose integer part exceeds 64 bits.
    /// - [`FxError::FamilyMismatch`] if base and exponent families are
    ///   unequal.
    pub fn pow(&self, exponent: &Self) -> Result<Self> {
        if self.is_zero() {
            return if exponent.scaled.is_positive() {
                Ok(self.family.zero())
            } else {
                Err(FxError::Domain("zero base with a non-positive exponent"))
            };
        }

        let int_part = exponent.to_bigint();
        let Some(power) = int_part.to_i64() else {
            return Err(FxError::Domain("exponent integer part exceeds 64 bits"));
        };
        let remainder = exponent.try_sub(&Self::from_int(int_part, &exponent.family)?)?;
        let frac_factor = if remainder.is_zero() {
            self.family.unity()?
        } else {
            remainder.try_mul(&self.ln()?)?.exp()?
        };
        self.int_power(power)?.try_mul(&frac_factor)
    }

    /// Computes the exponential function.
    ///
    /// The argument splits into integer part `n` and fractional
    /// remainder `r`; the result is `exp(r) · e^n` with `exp(r)` from
    /// the direct Maclaurin series and the cached family constant
    /// [`e`](crate::family::FxFamily::e) raised by fast exponentiation.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] if the result exceeds a bounded
    /// family's capacity, or [`FxError::Domain`] for an integer part
    /// beyond 64 bits.
    pub fn exp(&self) -> Result<Self> {
        let int_part = self.to_bigint();
        let Some(power) = int_part.to_i64() else {
            return Err(FxError::Domain("exponent integer part exceeds 64 bits"));
        };
        let remainder = self.try_sub(&Self::from_int(int_part, &self.family)?)?;
        remainder
            .raw_exp()?
            .try_mul(&self.family.e()?.int_power(power)?)
    }

    /// Maclaurin series for `exp` of a smallish argument: terms
    /// `x^k / k!` summed until one underflows to zero.
    pub(crate) fn raw_exp(&self) -> Result<Self> {
        let mut sum = self.family.unity()?;
        let mut term = self.family.unity()?;
        let mut idx: i64 = 1;
        for _ in 0..self.family.series_limit() {
            term = term.try_mul(&self.try_div(&Self::from_int(idx, &self.family)?)?)?;
            sum = sum.try_add(&term)?;
            idx += 1;
            if term.is_zero() {
                return Ok(sum);
            }
        }
        Err(FxError::Internal("exponential series did not converge"))
    }

    /// Computes the natural logarithm.
    ///
    /// The argument is rescaled into a tight band around 1 by extracting
    /// a signed power-of-two factor, the core series runs on
    /// `z = (v−1)/(v+1)`, and the result recombines as
    /// `ln(v) + count · ln2`.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Domain`] for a non-positive argument.
    pub fn ln(&self) -> Result<Self> {
        if self.scaled == *self.family.scale() {
            return Ok(self.family.zero());
        }
        let (val, count) = self.log_align()?;
        val.raw_log(false)?
            .try_add(&self.family.ln2()?.mul_int(count)?)
    }

    /// Computes the base-2 logarithm as `ln(v)/ln2 + count`.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Domain`] for a non-positive argument.
    pub fn log2(&self) -> Result<Self> {
        if self.scaled == *self.family.scale() {
            return Ok(self.family.zero());
        }
        let (val, count) = self.log_align()?;
        val.raw_log(false)?
            .try_div(&self.family.ln2()?)?
            .try_add(&Self::from_int(count, &self.family)?)
    }

    /// Extracts powers of two so that `self = v · 2^count` with `v` in
    /// `[0.8125, 1.625]`, a band biased high to preserve low-order bits.
    fn log_align(&self) -> Result<(Self, i64)> {
        if !self.scaled.is_positive() {
            return Err(FxError::Domain("logarithm of a non-positive value"));
        }

        // 13/8 and its half; built raw so narrow bounded families can
        // still take logarithms of in-range values.
        let upper = Self::raw_unchecked(
            self.family.clone(),
            (BigInt::from(13) << self.family.fraction_bits() as usize) >> 3usize,
        );
        let two = Self::from_int(2, &self.family)?;
        let lower = upper.try_div(&two)?;

        let mut count = self.scaled.bits() as i64 - i64::from(self.family.fraction_bits()) - 1;
        let mut val = if count == 0 {
            self.clone()
        } else if count < 0 {
            self.try_shl((-count) as usize)?
        } else {
            self.try_div(&Self::from_int(BigInt::one() << count as usize, &self.family)?)?
        };

        while val.try_cmp(&upper)? == core::cmp::Ordering::Greater {
            val = val.try_div(&two)?;
            count += 1;
        }
        while val.try_cmp(&lower)? == core::cmp::Ordering::Less {
            val = val.try_mul(&two)?;
            count -= 1;
        }
        Ok((val, count))
    }

    /// Core logarithm series for an argument close to 1:
    /// `ln(v) = 2·Σ z^(2k+1)/(2k+1)` on `z = (v−1)/(v+1)`.
    ///
    /// With `is_delta` set, the argument is taken as `v − 1`, so
    /// `z = d/(d+2)`; used during `ln2` derivation where the delta is
    /// known exactly.
    pub(crate) fn raw_log(&self, is_delta: bool) -> Result<Self> {
        let z = if is_delta {
            self.try_div(&self.try_add(&Self::from_int(2, &self.family)?)?)?
        } else {
            let one = self.family.unity()?;
            self.try_sub(&one)?.try_div(&self.try_add(&one)?)?
        };
        let z2 = z.try_mul(&z)?;
        let mut sum = self.family.zero();
        let mut term = z.mul_int(2)?;
        let mut idx: i64 = 1;
        for _ in 0..self.family.series_limit() {
            sum = sum.try_add(&term.try_div(&Self::from_int(idx, &self.family)?)?)?;
            term = term.try_mul(&z2)?;
            idx += 2;
            if term.is_zero() {
                return Ok(sum);
            }
        }
        Err(FxError::Internal("logarithm series did not converge"))
    }
}
