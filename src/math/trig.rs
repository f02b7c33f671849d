//! Circular trigonometric functions.
//!
//! All angles are in radians.  Arguments are first reduced modulo
//! `π/2` into a quadrant index plus a small residual angle, so the
//! Maclaurin series only ever runs on arguments of magnitude below
//! about `π/4`.

use num_traits::{Signed, ToPrimitive};

use crate::error::{FxError, Result};
use crate::number::FxNum;

impl FxNum {
    /// Computes the sine of the angle.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] if quadrant reduction exceeds a
    /// bounded family's capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use fxnum::prelude::*;
    ///
    /// let fam = FxFamily::default();
    /// assert!(fam.zero().sin()?.is_zero());
    /// # Ok::<(), FxError>(())
    /// ```
    pub fn sin(&self) -> Result<Self> {
        let (ang, quadrant, reflect) = self.ang_norm()?;
        let sn = match quadrant {
            0 => ang.raw_qsine(false)?,
            1 => ang.raw_qsine(true)?,
            2 => ang.raw_qsine(false)?.try_neg()?,
            3 => ang.raw_qsine(true)?.try_neg()?,
            _ => return Err(FxError::Internal("quadrant index out of range")),
        };
        if reflect {
            sn.try_neg()
        } else {
            Ok(sn)
        }
    }

    /// Computes the cosine of the angle.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] if quadrant reduction exceeds a
    /// bounded family's capacity.
    pub fn cos(&self) -> Result<Self> {
        let (ang, quadrant, _) = self.ang_norm()?;
        match quadrant {
            0 => ang.raw_qsine(true),
            1 => ang.raw_qsine(false)?.try_neg(),
            2 => ang.raw_qsine(true)?.try_neg(),
            3 => ang.raw_qsine(false),
            _ => Err(FxError::Internal("quadrant index out of range")),
        }
    }

    /// Computes sine and cosine together, sharing one quadrant
    /// reduction and series pair.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Overflow`] if quadrant reduction exceeds a
    /// bounded family's capacity.
    pub fn sincos(&self) -> Result<(Self, Self)> {
        let (ang, quadrant, reflect) = self.ang_norm()?;
        let osn = ang.raw_qsine(false)?;
        let ocs = ang.raw_qsine(true)?;
        let (sn, cs) = match quadrant {
            0 => (osn, ocs),
            1 => (ocs, osn.try_neg()?),
            2 => (osn.try_neg()?, ocs.try_neg()?),
            3 => (ocs.try_neg()?, osn),
            _ => return Err(FxError::Internal("quadrant index out of range")),
        };
        if reflect {
            Ok((sn.try_neg()?, cs))
        } else {
            Ok((sn, cs))
        }
    }

    /// Computes the tangent as `sin/cos`.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::DivisionByZero`] when the cosine rounds to
    /// exactly zero.
    pub fn tan(&self) -> Result<Self> {
        let (sn, cs) = self.sincos()?;
        sn.try_div(&cs)
    }

    /// Reduces the angle modulo `π/2`, returning the residual angle,
    /// the index of the nearest multiple of `π/2`, and whether the
    /// original angle was negated to make it non-negative.
    fn ang_norm(&self) -> Result<(Self, u8, bool)> {
        let reflect = self.scaled.is_negative();
        let mut ang = if reflect { self.try_neg()? } else { self.clone() };

        let half_pi = self.family.pi()?.try_div(&Self::from_int(2, &self.family)?)?;
        let half = Self::raw_unchecked(self.family.clone(), self.family.scale() >> 1usize);
        // Nearest multiple of pi/2, truncated from ang/(pi/2) + 1/2.
        let idx = ang.try_div(&half_pi)?.try_add(&half)?.to_bigint();
        ang = ang.try_sub(&Self::raw(
            self.family.clone(),
            &half_pi.scaled * &idx,
        )?)?;

        let Some(quadrant) = (idx % 4u8).to_u8() else {
            return Err(FxError::Internal("quadrant index out of range"));
        };
        Ok((ang, quadrant, reflect))
    }

    /// Maclaurin series shared by sine and cosine for a small angle.
    ///
    /// With `do_cos` set the even-power series is summed directly;
    /// otherwise the odd-power series is summed and multiplied through
    /// by the angle.
    pub(crate) fn raw_qsine(&self, do_cos: bool) -> Result<Self> {
        let mut sum = self.family.zero();
        let x2 = self.try_neg()?.try_mul(self)?;
        let mut term = self.family.unity()?;
        let mut idx: i64 = if do_cos { 1 } else { 2 };
        for _ in 0..self.family.series_limit() {
            sum = sum.try_add(&term)?;
            term = term.try_mul(&x2.try_div(&Self::from_int(idx * (idx + 1), &self.family)?)?)?;
            idx += 2;
            if term.is_zero() {
                return if do_cos { Ok(sum) } else { self.try_mul(&sum) };
            }
        }
        Err(FxError::Internal("sine series did not converge"))
    }
}
