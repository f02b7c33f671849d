//! String conversion for fixed-point numbers.
//!
//! Two conversions are provided: decimal ([`FxNum::to_decimal_string`],
//! also backing the [`Display`](core::fmt::Display) impl) and positional
//! base-2/4/8/16 ([`FxNum::to_binary_string`]).  The decimal form
//! defaults to the family's heuristic
//! [`pseudo_precision`](crate::family::FxFamily::pseudo_precision) and
//! truncates beyond it; the binary form emits a fixed-width
//! two's-complement or sign-prefixed digit string.

use core::fmt;

use num_bigint::BigInt;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};

use crate::number::FxNum;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Digit radix for [`FxNum::to_binary_string`]: a power of two between
/// 2 and 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryRadix {
    /// Base 2, one bit per digit.
    Binary,
    /// Base 4, two bits per digit.
    Base4,
    /// Base 8, three bits per digit.
    Octal,
    /// Base 16, four bits per digit.
    Hex,
}

impl BinaryRadix {
    /// Log-base-2 of the digit radix.
    #[must_use]
    pub const fn log_base(self) -> u32 {
        match self {
            Self::Binary => 1,
            Self::Base4 => 2,
            Self::Octal => 3,
            Self::Hex => 4,
        }
    }
}

impl FxNum {
    /// Converts the number to a decimal string.
    ///
    /// `precision` is the maximum number of digits after the decimal
    /// point.  When `None`, a heuristic estimate of the indicative
    /// base-10 precision is used, which may be significantly less than
    /// the digit count required to fully represent the lowest-order
    /// fractional bit; pass `Some(family.fraction_bits())` to guarantee
    /// every non-zero digit is shown.  Digits beyond the precision are
    /// truncated unless `round_last_digit` is set, which first adds half
    /// of the smallest displayed decimal unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use fxnum::prelude::*;
    ///
    /// let fam = FxFamily::default();
    /// let x = FxNum::from_int(21, &fam)? / 10;
    /// assert_eq!(x.to_decimal_string(None, false), "2.0999999999999999999");
    /// assert_eq!(x.to_decimal_string(Some(3), true), "2.100");
    /// # Ok::<(), FxError>(())
    /// ```
    #[must_use]
    pub fn to_decimal_string(&self, precision: Option<u32>, round_last_digit: bool) -> String {
        let fam_scale = self.family.scale();
        let precision =
            precision.unwrap_or_else(|| self.family.pseudo_precision().round() as u32);

        let mut val = self.scaled.clone();
        let mut rep = String::new();
        if val.is_negative() {
            rep.push('-');
            val = -val;
        }

        if round_last_digit {
            // Round the decimal fraction by adding half of its last digit.
            let decimal_scale = BigInt::from(10).pow(precision);
            val = (val * &decimal_scale + (fam_scale >> 1usize)) / &decimal_scale;
        }

        let whole = &val / fam_scale;
        let mut frac = &val - &whole * fam_scale;
        rep.push_str(&whole.to_string());

        if !frac.is_zero() && precision > 0 {
            rep.push('.');
            let mut emitted = 0;
            while emitted < precision && !frac.is_zero() {
                frac *= 10u32;
                let digit = &frac / fam_scale;
                rep.push_str(&digit.to_string());
                frac -= &digit * fam_scale;
                emitted += 1;
            }
        }
        rep
    }

    /// Converts the number to a positional string in base 2, 4, 8 or 16.
    ///
    /// With `twos_complement` set, negative values are encoded in
    /// fixed-width two's-complement form; otherwise they are rendered as
    /// the magnitude with a leading minus sign.  The fractional width is
    /// `ceil(fraction_bits / log_base)` digits.  When the family has no
    /// configured integer-bit count, the integer width is auto-sized to
    /// the smallest digit count whose two's-complement range contains the
    /// value.
    ///
    /// # Examples
    ///
    /// ```
    /// use fxnum::prelude::*;
    ///
    /// let fam = FxFamily::with_integer_bits(4, 4)?;
    /// let x = FxNum::from_f64(-1.5, &fam)?;
    /// assert_eq!(x.to_binary_string(BinaryRadix::Binary, true), "1110.1000");
    /// assert_eq!(x.to_binary_string(BinaryRadix::Binary, false), "-0001.1000");
    /// # Ok::<(), FxError>(())
    /// ```
    #[must_use]
    pub fn to_binary_string(&self, radix: BinaryRadix, twos_complement: bool) -> String {
        let log_base = radix.log_base() as usize;
        let resolution = self.family.fraction_bits() as usize;

        let (scaled, prefix) = if self.scaled.is_negative() && !twos_complement {
            (-&self.scaled, "-")
        } else {
            (self.scaled.clone(), "")
        };

        let frac_digits = (resolution + log_base - 1) / log_base;
        let int_digits = match self.family.integer_bits() {
            Some(ib) => (ib as usize + log_base - 1) / log_base,
            None => auto_int_digits(&scaled, resolution, log_base),
        };

        let mut bits = scaled;
        if bits.is_negative() {
            bits += BigInt::one() << (int_digits * log_base + resolution);
        }
        // Align to a whole number of digits after the point.
        bits <<= frac_digits * log_base - resolution;

        let mask = BigInt::from((1u32 << log_base) - 1);
        let mut digits = Vec::with_capacity(int_digits + frac_digits);
        for _ in 0..(int_digits + frac_digits) {
            let nibble = (&bits & &mask).to_u8().unwrap_or(0);
            digits.push(HEX_DIGITS[nibble as usize] as char);
            bits >>= log_base;
        }

        let mut rep = String::from(prefix);
        for (pos, digit) in digits.iter().rev().enumerate() {
            if pos == int_digits {
                rep.push('.');
            }
            rep.push(*digit);
        }
        rep
    }
}

/// Smallest integer-digit count whose two's-complement range contains
/// the value, for families without a configured integer width.
fn auto_int_digits(scaled: &BigInt, resolution: usize, log_base: usize) -> usize {
    let mut int_digits = 1;
    let int_part: BigInt = scaled >> resolution;
    if int_part.is_negative() {
        while (BigInt::one() << (int_digits * log_base - 1)) + &int_part < BigInt::zero() {
            int_digits += 1;
        }
    } else {
        while int_part >= (BigInt::one() << (int_digits * log_base)) {
            int_digits += 1;
        }
    }
    int_digits
}

impl fmt::Display for FxNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_decimal_string(None, false))
    }
}
