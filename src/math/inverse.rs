//! Inverse trigonometric functions.

use num_bigint::BigInt;
use num_traits::Signed;

use crate::error::{FxError, Result};
use crate::number::FxNum;

impl FxNum {
    /// Computes the inverse sine, in radians.
    ///
    /// Arguments above one half go through the half-angle identity
    /// `asin(x) = π/2 − 2·asin(√((1−x)/2))` so the core series only
    /// sees arguments where it converges quickly.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Domain`] when the argument's magnitude
    /// exceeds one.
    ///
    /// # Examples
    ///
    /// ```
    /// use fxnum::prelude::*;
    ///
    /// let fam = FxFamily::default();
    /// let one = FxNum::from_int(1, &fam)?;
    /// let angle = (&one >> 1).asin()?;
    /// assert!((angle.to_f64() - 0.5f64.asin()).abs() < 1e-16);
    /// # Ok::<(), FxError>(())
    /// ```
    pub fn asin(&self) -> Result<Self> {
        let reflect = self.scaled.is_negative();
        let arg = if reflect { self.try_neg()? } else { self.clone() };

        let half = Self::raw_unchecked(self.family.clone(), self.family.scale() >> 1usize);
        let asn = if arg.try_cmp(&half)? != core::cmp::Ordering::Greater {
            arg.raw_arcsin()?
        } else {
            // Half-angle identity; cos(2t) = 1 - 2 sin^2(t).
            let cs2 = self
                .family
                .unity()?
                .try_sub(&arg)?
                .try_div(&Self::from_int(2, &self.family)?)?;
            if cs2.scaled.is_negative() {
                return Err(FxError::Domain("inverse sine of a value beyond unity"));
            }
            let half_pi = self.family.pi()?.try_div(&Self::from_int(2, &self.family)?)?;
            half_pi.try_sub(&cs2.sqrt()?.raw_arcsin()?.mul_int(2)?)?
        };
        if reflect {
            asn.try_neg()
        } else {
            Ok(asn)
        }
    }

    /// Computes the inverse cosine, in radians.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::Domain`] when the argument's magnitude
    /// exceeds one.
    pub fn acos(&self) -> Result<Self> {
        let reflect = self.scaled.is_negative();
        let arg = if reflect { self.try_neg()? } else { self.clone() };

        let half = Self::raw_unchecked(self.family.clone(), self.family.scale() >> 1usize);
        let acs = if arg.try_cmp(&half)? != core::cmp::Ordering::Greater {
            let half_pi = self.family.pi()?.try_div(&Self::from_int(2, &self.family)?)?;
            half_pi.try_sub(&arg.raw_arcsin()?)?
        } else {
            // Half-angle identity; cos(2t) = 1 - 2 sin^2(t).
            let sn2 = self
                .family
                .unity()?
                .try_sub(&arg)?
                .try_div(&Self::from_int(2, &self.family)?)?;
            if sn2.scaled.is_negative() {
                return Err(FxError::Domain("inverse cosine of a value beyond unity"));
            }
            sn2.sqrt()?.raw_arcsin()?.mul_int(2)?
        };
        if reflect {
            self.family.pi()?.try_sub(&acs)
        } else {
            Ok(acs)
        }
    }

    /// Computes the inverse tangent, in radians.
    ///
    /// The argument is first folded into `[0, 1]` by the reciprocal
    /// identity and then, if still above `tan(π/8) ≈ 0.414`, halved via
    /// `atan(x) = 2·atan((√(1+x²) − 1)/x)` before the series runs.
    pub fn atan(&self) -> Result<Self> {
        let mut reflect = false;
        let mut recip = false;
        let mut double = false;
        let mut tan = self.clone();

        if tan.scaled.is_negative() {
            tan = tan.try_neg()?;
            reflect = true;
        }
        if tan.try_cmp(&self.family.unity()?)? == core::cmp::Ordering::Greater {
            tan = self.family.unity()?.try_div(&tan)?;
            recip = true;
        }
        let fold = Self::from_f64(0.414, &self.family)?;
        if tan.try_cmp(&fold)? == core::cmp::Ordering::Greater {
            let hyp = self
                .family
                .unity()?
                .try_add(&tan.try_mul(&tan)?)?
                .sqrt()?;
            tan = hyp.try_sub(&self.family.unity()?)?.try_div(&tan)?;
            double = true;
        }

        let mut ang = tan.raw_arctan()?;
        if double {
            ang = ang.mul_int(2)?;
        }
        if recip {
            let half_pi = self.family.pi()?.try_div(&Self::from_int(2, &self.family)?)?;
            ang = half_pi.try_sub(&ang)?;
        }
        if reflect {
            ang = ang.try_neg()?;
        }
        Ok(ang)
    }

    /// Maclaurin series for the inverse sine of a smallish argument:
    /// `asin(x) = x·Σ C(2n,n)/4^n · x^(2n)/(2n+1)`.
    ///
    /// The central binomial coefficient is carried unshifted, so this
    /// needs roughly as many integer bits as fractional bits; bounded
    /// families that cannot hold it report [`FxError::Overflow`].
    pub(crate) fn raw_arcsin(&self) -> Result<Self> {
        let mut sum = self.family.unity()?;
        let x2 = self.try_mul(self)?;
        let mut x2n = x2.clone();
        let mut central = BigInt::from(2); // (2n)! / (n!)^2
        let mut idx: i64 = 1;
        for _ in 0..self.family.series_limit() {
            let coeff = Self::from_int(central.clone(), &self.family)?
                .try_shr(2 * idx as usize)?
                .try_div(&Self::from_int(2 * idx + 1, &self.family)?)?;
            let delta = x2n.try_mul(&coeff)?;
            sum = sum.try_add(&delta)?;
            if delta.is_zero() {
                return self.try_mul(&sum);
            }
            idx += 1;
            x2n = x2n.try_mul(&x2)?;
            central = (central * 2 * (2 * idx - 1)) / idx;
        }
        Err(FxError::Internal("inverse-sine series did not converge"))
    }

    /// Accelerated Maclaurin series for the inverse tangent of an
    /// argument with magnitude below one, combining successive
    /// odd-power terms pairwise so each step strictly shrinks.
    pub(crate) fn raw_arctan(&self) -> Result<Self> {
        let mut sum = self.family.unity()?;
        let x2 = self.try_mul(self)?;
        let omx2 = self.family.unity()?.try_sub(&x2)?;
        let opx2 = self.family.unity()?.try_add(&x2)?;
        let x4 = x2.try_mul(&x2)?;
        let mut term = x2;
        let mut idx: i64 = 1;
        for _ in 0..self.family.series_limit() {
            let delta = term
                .try_mul(&omx2.mul_int(4 * idx)?.try_add(&opx2)?)?
                .try_div(&Self::from_int(16 * idx * idx - 1, &self.family)?)?;
            sum = sum.try_sub(&delta)?;
            term = term.try_mul(&x4)?;
            idx += 1;
            if delta.is_zero() {
                return self.try_mul(&sum);
            }
        }
        Err(FxError::Internal("inverse-tangent series did not converge"))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::family::FxFamily;

    fn fam(bits: u32) -> FxFamily {
        let Ok(f) = FxFamily::new(bits) else {
            panic!("valid family");
        };
        f
    }

    fn num(v: i64, f: &FxFamily) -> FxNum {
        let Ok(n) = FxNum::from_int(v, f) else {
            panic!("in range");
        };
        n
    }

    fn ok(r: Result<FxNum>) -> FxNum {
        match r {
            Ok(v) => v,
            Err(e) => panic!("expected Ok: {e}"),
        }
    }

    fn close(a: &FxNum, b: &FxNum, ulps: i64) {
        let Ok(diff) = a.try_sub(b) else {
            panic!("same family");
        };
        assert!(
            diff.scaled_value().abs() <= BigInt::from(ulps),
            "{a} != {b}"
        );
    }

    #[test]
    fn asin_at_landmarks() {
        let f = fam(64);
        let Ok(pi) = f.pi() else {
            panic!("pi computes");
        };
        assert!(ok(num(0, &f).asin()).is_zero());
        close(&ok(num(1, &f).asin()), &(&pi / 2), 16);
        close(&ok(num(-1, &f).asin()), &-(&pi / 2), 16);
        close(&ok((num(1, &f) >> 1).asin()), &(&pi / 6), 64);
    }

    #[test]
    fn asin_beyond_unity_is_domain_error() {
        let f = fam(64);
        assert!(matches!(num(2, &f).asin(), Err(FxError::Domain(_))));
        assert!(matches!(num(-2, &f).asin(), Err(FxError::Domain(_))));
    }

    #[test]
    fn acos_at_landmarks() {
        let f = fam(64);
        let Ok(pi) = f.pi() else {
            panic!("pi computes");
        };
        close(&ok(num(1, &f).acos()), &num(0, &f), 16);
        close(&ok(num(0, &f).acos()), &(&pi / 2), 8);
        close(&ok(num(-1, &f).acos()), &pi, 16);
    }

    #[test]
    fn asin_acos_sum_to_quarter_turn() {
        let f = fam(64);
        let Ok(pi) = f.pi() else {
            panic!("pi computes");
        };
        for tenths in [-9i64, -4, 0, 3, 6, 9] {
            let x = num(tenths, &f) / 10;
            let total = ok(x.asin()) + ok(x.acos());
            close(&total, &(&pi / 2), 128);
        }
    }

    #[test]
    fn asin_inverts_sine() {
        let f = fam(64);
        let x = num(3, &f) / 10;
        close(&ok(ok(x.sin()).asin()), &x, 64);
    }

    #[test]
    fn atan_at_landmarks() {
        let f = fam(64);
        let Ok(pi) = f.pi() else {
            panic!("pi computes");
        };
        assert!(ok(num(0, &f).atan()).is_zero());
        close(&ok(num(1, &f).atan()), &(&pi / 4), 64);
        close(&ok(num(-1, &f).atan()), &-(&pi / 4), 64);
    }

    #[test]
    fn atan_of_large_argument_approaches_quarter_turn() {
        let f = fam(64);
        let Ok(pi) = f.pi() else {
            panic!("pi computes");
        };
        let big = num(1000, &f);
        let ang = ok(big.atan());
        assert!(ang < &pi / 2);
        assert!((ang.to_f64() - 1000.0f64.atan()).abs() < 1e-15);
    }

    #[test]
    fn atan_inverts_tangent() {
        let f = fam(64);
        for tenths in [-14i64, -5, 2, 8, 13] {
            let x = num(tenths, &f) / 10;
            close(&ok(ok(x.tan()).atan()), &x, 64);
        }
    }
}
